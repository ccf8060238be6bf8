/// Platform-neutral slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub command: String,
    /// Display name of whoever triggered it, empty when unknown
    pub user: String,
}

impl CommandEvent {
    pub fn new(command: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            user: user.into(),
        }
    }
}
