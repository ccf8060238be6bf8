// Library crate for the synctube bot
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod discord;
pub mod dispatch;
pub mod shared;
pub mod synctube;

// Re-export commonly used types for easier access in tests
pub use config::BotConfig;
pub use dispatch::{CommandDispatcher, CommandEvent};
pub use shared::{build_router, AppError, AppState};
pub use synctube::{ProvisioningOutcome, Room, RoomProvisioner};
