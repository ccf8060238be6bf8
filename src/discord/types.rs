use serde::{Deserialize, Serialize};

use crate::dispatch::CommandEvent;

pub const INTERACTION_PING: u8 = 1;
pub const INTERACTION_APPLICATION_COMMAND: u8 = 2;

pub const RESPONSE_PONG: u8 = 1;
pub const RESPONSE_CHANNEL_MESSAGE: u8 = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub username: String,
}

/// Guild member wrapper; present instead of `user` for guild interactions
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,
}

/// Inbound interaction payload, only the fields the bot reads
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    pub data: Option<CommandData>,
    pub member: Option<Member>,
    pub user: Option<User>,
}

impl Interaction {
    /// Name of the invoking user, from `user` or else `member.user`
    pub fn user_name(&self) -> &str {
        self.user
            .as_ref()
            .or_else(|| self.member.as_ref().and_then(|m| m.user.as_ref()))
            .map(|u| u.username.as_str())
            .unwrap_or_default()
    }

    pub fn command_event(&self) -> Option<CommandEvent> {
        self.data
            .as_ref()
            .map(|data| CommandEvent::new(data.name.clone(), self.user_name()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseData {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: RESPONSE_PONG,
            data: None,
        }
    }

    pub fn message(content: String) -> Self {
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: Some(ResponseData { content }),
        }
    }
}

/// Guild command registration payload
#[derive(Debug, Serialize)]
pub struct NewCommand<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Command as returned by the registration endpoint
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RegisteredCommand {
    pub id: String,
    pub name: String,
}
