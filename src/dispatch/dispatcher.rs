use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

use super::types::CommandEvent;
use crate::synctube::{ProvisioningOutcome, RoomProvisioner};

pub const SYNCTUBE_COMMAND: &str = "synctube";
pub const SYNCTUBE_COMMAND_DESCRIPTION: &str = "Create a new synctube room";

pub const CREATION_FAILED_REPLY: &str = "error creating synctube room";
pub const SETUP_FAILED_REPLY: &str = "error setting up room permissions";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown command {0}")]
    UnknownCommand(String),
}

/// Turns one inbound command into exactly one reply
pub struct CommandDispatcher {
    provisioner: Arc<RoomProvisioner>,
}

impl CommandDispatcher {
    pub fn new(provisioner: Arc<RoomProvisioner>) -> Self {
        Self { provisioner }
    }

    #[instrument(skip(self), fields(command = %event.command, user = %event.user))]
    pub async fn dispatch(&self, event: &CommandEvent) -> Result<String, DispatchError> {
        info!("User triggered command");

        if event.command != SYNCTUBE_COMMAND {
            error!("Unknown command");
            return Err(DispatchError::UnknownCommand(event.command.clone()));
        }

        let outcome = self.provisioner.provision().await;
        info!(
            ready = outcome.is_ready(),
            room_id = outcome.room().map(|room| room.id()).unwrap_or_default(),
            "Provisioning finished"
        );
        Ok(reply_for(&outcome))
    }
}

/// User-facing text for a provisioning outcome
pub fn reply_for(outcome: &ProvisioningOutcome) -> String {
    match outcome {
        ProvisioningOutcome::Ready(room) => room.url().to_string(),
        ProvisioningOutcome::NotCreated(_) => CREATION_FAILED_REPLY.to_string(),
        ProvisioningOutcome::Incomplete { room, .. } => {
            format!("{}\nRoom available: {}", SETUP_FAILED_REPLY, room.url())
        }
    }
}
