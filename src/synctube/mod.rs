// Public API - what other modules can use
pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{Permission, RoomCommand};
pub use endpoints::{EndpointError, SyncTubeEndpoints, DEFAULT_BASE_URL};
pub use errors::{
    ConfigureError, ConnectionError, PermissionUpdateError, RoomCreationError, SocketError,
    TransportError,
};
pub use models::{Room, SessionCookie};
pub use provisioner::{ProvisioningOutcome, RoomProvisioner};
pub use transport::{
    ConnectRequest, HttpReply, HttpTransport, ReqwestTransport, RoomSocket, SocketConnector,
    TungsteniteConnector,
};

// Internal modules
mod clock;
mod commands;
mod endpoints;
mod errors;
pub mod models;
mod provisioner;
mod transport;

#[cfg(test)]
pub mod test_utils;
