use serde::Deserialize;
use std::fmt;

/// Body returned by the room creation endpoint
#[derive(Debug, Deserialize)]
pub struct CreateRoomResponse {
    pub id: String,
}

/// Owner credential handed out when a room is created.
///
/// Only the `name=value` pair is kept; attributes such as `Path` or
/// `Expires` are dropped since they never go back over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    name: String,
    value: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parses a raw `Set-Cookie` header value
    pub fn parse(set_cookie: &str) -> Option<Self> {
        let pair = set_cookie.split(';').next()?.trim();
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self::new(name, value.trim().trim_matches('"')))
    }

    /// Picks the first usable cookie out of a response's `Set-Cookie` headers.
    /// The cookie name is not checked.
    pub fn first_of<S: AsRef<str>>(set_cookies: &[S]) -> Option<Self> {
        set_cookies.iter().find_map(|raw| Self::parse(raw.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A provisioned remote room. Lives only as long as one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: String,
    url: String,
    cookie: SessionCookie,
}

impl Room {
    pub fn new(id: String, url: String, cookie: SessionCookie) -> Self {
        Self { id, url, cookie }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Shareable room link, `<base>/room/<id>`
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn cookie(&self) -> &SessionCookie {
        &self.cookie
    }
}
