// Public API - what other modules can use
pub use dispatcher::{
    reply_for, CommandDispatcher, DispatchError, CREATION_FAILED_REPLY, SETUP_FAILED_REPLY,
    SYNCTUBE_COMMAND, SYNCTUBE_COMMAND_DESCRIPTION,
};
pub use types::CommandEvent;

// Internal modules
mod dispatcher;
mod types;
