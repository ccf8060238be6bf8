use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://sync-tube.de";

/// Constant trailing segment of every room socket path
pub const SOCKET_PATH_SUFFIX: &str = "ewB9AA==";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid base URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("unsupported scheme {0}, expected http or https")]
    UnsupportedScheme(String),

    #[error("base URL has no host")]
    MissingHost,
}

/// Every address the provisioner talks to, derived from one base URL
#[derive(Debug, Clone)]
pub struct SyncTubeEndpoints {
    base: Url,
}

impl SyncTubeEndpoints {
    pub fn new(base: &str) -> Result<Self, EndpointError> {
        let base = Url::parse(base)?;
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
        if base.host_str().is_none() {
            return Err(EndpointError::MissingHost);
        }

        Ok(Self { base })
    }

    fn root(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// POST target that creates a new room
    pub fn create_url(&self) -> String {
        format!("{}/api/create", self.root())
    }

    pub fn room_url(&self, room_id: &str) -> String {
        format!("{}/room/{}", self.root(), room_id)
    }

    /// Socket address of a room, `ws(s)://<host>/ws/<id>/<suffix>`
    pub fn socket_url(&self, room_id: &str) -> String {
        let scheme = self.base.scheme();
        let socket_scheme = if scheme == "https" { "wss" } else { "ws" };
        format!(
            "{}{}/ws/{}/{}",
            socket_scheme,
            &self.root()[scheme.len()..],
            room_id,
            SOCKET_PATH_SUFFIX
        )
    }

    /// Value for the `Host` header, port included when non-default
    pub fn host(&self) -> String {
        let host = self.base.host_str().unwrap_or_default();
        match self.base.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Value for the `Origin` header
    pub fn origin(&self) -> String {
        self.base.origin().ascii_serialization()
    }
}

impl Default for SyncTubeEndpoints {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}
