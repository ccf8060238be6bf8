use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::{
    clock::Clock,
    commands::RoomCommand,
    endpoints::SyncTubeEndpoints,
    errors::{
        ConfigureError, ConnectionError, PermissionUpdateError, RoomCreationError, SocketError,
    },
    models::{CreateRoomResponse, Room, SessionCookie},
    transport::{ConnectRequest, HttpTransport, RoomSocket, SocketConnector},
};

/// Result of one full provisioning run
#[derive(Debug)]
pub enum ProvisioningOutcome {
    /// Room created and fully configured
    Ready(Room),
    /// Nothing was created
    NotCreated(RoomCreationError),
    /// Room exists and is reachable, but its setup did not finish
    Incomplete { room: Room, error: ConfigureError },
}

impl ProvisioningOutcome {
    /// The room, whenever one was created
    pub fn room(&self) -> Option<&Room> {
        match self {
            ProvisioningOutcome::Ready(room) => Some(room),
            ProvisioningOutcome::Incomplete { room, .. } => Some(room),
            ProvisioningOutcome::NotCreated(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ProvisioningOutcome::Ready(_))
    }
}

/// Creates SyncTube rooms and opens them up for everyone
pub struct RoomProvisioner {
    endpoints: SyncTubeEndpoints,
    room_name: String,
    http: Arc<dyn HttpTransport>,
    connector: Arc<dyn SocketConnector>,
    clock: Arc<dyn Clock>,
}

impl RoomProvisioner {
    pub fn new(
        endpoints: SyncTubeEndpoints,
        room_name: String,
        http: Arc<dyn HttpTransport>,
        connector: Arc<dyn SocketConnector>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            endpoints,
            room_name,
            http,
            connector,
            clock,
        }
    }

    /// Creates a room and configures it, reporting how far it got
    #[instrument(skip(self))]
    pub async fn provision(&self) -> ProvisioningOutcome {
        let room = match self.create_room().await {
            Ok(room) => room,
            Err(e) => {
                error!(error = %e, "Error creating room");
                return ProvisioningOutcome::NotCreated(e);
            }
        };
        info!(room_id = %room.id(), "Room created");

        match self.configure_permissions(&room).await {
            Ok(()) => {
                info!(room_id = %room.id(), "Room finalized");
                ProvisioningOutcome::Ready(room)
            }
            Err(e) => {
                error!(room_id = %room.id(), error = %e, "Error setting room permissions");
                ProvisioningOutcome::Incomplete { room, error: e }
            }
        }
    }

    /// Creates a new remote room. The first cookie of the response becomes
    /// the owner credential.
    #[instrument(skip(self))]
    pub async fn create_room(&self) -> Result<Room, RoomCreationError> {
        let url = self.endpoints.create_url();
        let reply = self.http.post_empty(&url).await?;
        debug!(status = reply.status, cookies = reply.set_cookies.len(), "Creation reply");

        let created: CreateRoomResponse = serde_json::from_str(&reply.body)?;
        let cookie = SessionCookie::first_of(&reply.set_cookies)
            .ok_or(RoomCreationError::MissingCredential)?;
        debug!(cookie = %cookie.name(), "Adopted owner cookie");

        let room_url = self.endpoints.room_url(&created.id);
        Ok(Room::new(created.id, room_url, cookie))
    }

    /// Connects to the room as its owner, renames it and allows every
    /// permission. Stops at the first failed send.
    #[instrument(skip(self, room), fields(room_id = %room.id()))]
    pub async fn configure_permissions(&self, room: &Room) -> Result<(), ConfigureError> {
        if room.id().is_empty() {
            return Err(ConnectionError::new("room has no ID").into());
        }

        let request = ConnectRequest {
            url: self.endpoints.socket_url(room.id()),
            cookie: room.cookie().to_string(),
            host: self.endpoints.host(),
            origin: self.endpoints.origin(),
        };
        info!(url = %request.url, "Connecting to room socket");

        let mut socket = match self.connector.connect(&request).await {
            Ok(socket) => socket,
            Err(e) => {
                error!(
                    error = %e,
                    response = e.response_body.as_deref().unwrap_or(""),
                    "Error connecting to room socket"
                );
                return Err(e.into());
            }
        };

        let timestamp = self.clock.now().timestamp();
        let commands = RoomCommand::setup_sequence(&self.room_name, timestamp);
        let result = send_all(socket.as_mut(), &commands).await;

        if let Err(e) = socket.close().await {
            warn!(error = %e, "Error closing room socket");
        }

        result.map_err(ConfigureError::from)
    }
}

/// Sends commands one at a time, in order, aborting on the first failure
async fn send_all(
    socket: &mut dyn RoomSocket,
    commands: &[RoomCommand],
) -> Result<(), PermissionUpdateError> {
    for (position, command) in commands.iter().enumerate() {
        let frame = command.encode().map_err(|e| {
            PermissionUpdateError::new(command, position, SocketError::InvalidMessage(e.to_string()))
        })?;

        socket
            .send_text(frame)
            .await
            .map_err(|e| PermissionUpdateError::new(command, position, e))?;
        debug!(step = %command, "Room command sent");
    }

    Ok(())
}
