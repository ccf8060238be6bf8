// Public API - what other modules can use
pub use handlers::{handle_interaction, health};
pub use registration::{CommandRegistrar, RegistrationError};
pub use signature::{SignatureError, SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use types::{Interaction, InteractionResponse, RegisteredCommand};

// Internal modules
mod handlers;
mod registration;
mod signature;
pub mod types;
