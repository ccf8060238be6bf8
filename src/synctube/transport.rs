use async_trait::async_trait;
use futures::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest,
        http::{
            header::{COOKIE, HOST, ORIGIN},
            HeaderValue,
        },
        Error as WsError, Message,
    },
    MaybeTlsStream, WebSocketStream,
};
use tracing::debug;

use super::errors::{ConnectionError, SocketError, TransportError};

/// What the provisioner needs back from the creation call
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
    /// Raw `Set-Cookie` header values in response order
    pub set_cookies: Vec<String>,
}

/// Request/response transport used for room creation
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST with an empty body
    async fn post_empty(&self, url: &str) -> Result<HttpReply, TransportError>;
}

/// Production transport on top of reqwest
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_empty(&self, url: &str) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_string)
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        debug!(url = %url, status, "Creation endpoint replied");

        Ok(HttpReply {
            status,
            body,
            set_cookies,
        })
    }
}

/// Everything needed to open an authenticated room socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub url: String,
    /// Serialized `Cookie` header
    pub cookie: String,
    pub host: String,
    pub origin: String,
}

/// Write half of a room socket, all the setup sequence needs
#[async_trait]
pub trait RoomSocket: Send {
    /// Send one text frame
    async fn send_text(&mut self, message: String) -> Result<(), SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Opens room sockets
#[async_trait]
pub trait SocketConnector: Send + Sync {
    async fn connect(&self, request: &ConnectRequest)
        -> Result<Box<dyn RoomSocket>, ConnectionError>;
}

/// Production connector on top of tokio-tungstenite
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ConnectionError> {
    HeaderValue::from_str(value)
        .map_err(|e| ConnectionError::new(format!("invalid {} header: {}", name, e)))
}

#[async_trait]
impl SocketConnector for TungsteniteConnector {
    async fn connect(
        &self,
        request: &ConnectRequest,
    ) -> Result<Box<dyn RoomSocket>, ConnectionError> {
        let mut ws_request = request
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| ConnectionError::new(e.to_string()))?;

        let headers = ws_request.headers_mut();
        headers.insert(COOKIE, header_value("Cookie", &request.cookie)?);
        headers.insert(HOST, header_value("Host", &request.host)?);
        headers.insert(ORIGIN, header_value("Origin", &request.origin)?);

        match connect_async(ws_request).await {
            Ok((stream, response)) => {
                debug!(url = %request.url, status = %response.status(), "Room socket open");
                Ok(Box::new(TungsteniteSocket { stream }))
            }
            Err(WsError::Http(response)) => {
                let body = response
                    .body()
                    .as_ref()
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned());
                Err(ConnectionError::new(format!(
                    "handshake rejected with status {}",
                    response.status()
                ))
                .with_body(body))
            }
            Err(e) => Err(ConnectionError::new(e.to_string())),
        }
    }
}

/// Room socket backed by a tungstenite stream
pub struct TungsteniteSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl RoomSocket for TungsteniteSocket {
    async fn send_text(&mut self, message: String) -> Result<(), SocketError> {
        self.stream
            .send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| SocketError::CloseFailed(e.to_string()))
    }
}
