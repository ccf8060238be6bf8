use serde::Serialize;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

const OPCODE_RENAME: u8 = 1;
const OPCODE_PERMISSION: u8 = 4;

/// Permission group every toggle applies to (everyone in the room)
const EVERYONE_GROUP: u8 = 0;

/// Room permissions the owner can open up, in the order they get sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Permission {
    #[strum(serialize = "skip")]
    Skip,
    #[strum(serialize = "seek")]
    Seek,
    #[strum(serialize = "play")]
    Play,
    #[strum(serialize = "move")]
    Move,
    #[strum(serialize = "rem")]
    Remove,
    #[strum(serialize = "add")]
    Add,
}

impl Permission {
    /// Identifier used by the remote protocol
    pub fn pid(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pid())
    }
}

/// One configuration directive sent to a room over its socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomCommand {
    Rename { name: String, timestamp: i64 },
    SetPermission { permission: Permission, allow: bool },
}

#[derive(Serialize)]
struct PermissionPayload<'a> {
    pid: &'a str,
    group: u8,
    allow: bool,
}

impl RoomCommand {
    /// The full setup run: rename first, then open every permission
    pub fn setup_sequence(name: &str, timestamp: i64) -> Vec<RoomCommand> {
        let mut commands = vec![RoomCommand::Rename {
            name: name.to_string(),
            timestamp,
        }];
        commands.extend(Permission::iter().map(|permission| RoomCommand::SetPermission {
            permission,
            allow: true,
        }));
        commands
    }

    /// Wire encoding, a JSON array led by the opcode
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        match self {
            RoomCommand::Rename { name, timestamp } => {
                serde_json::to_string(&(OPCODE_RENAME, name, timestamp))
            }
            RoomCommand::SetPermission { permission, allow } => serde_json::to_string(&(
                OPCODE_PERMISSION,
                PermissionPayload {
                    pid: permission.pid(),
                    group: EVERYONE_GROUP,
                    allow: *allow,
                },
            )),
        }
    }
}

impl fmt::Display for RoomCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomCommand::Rename { .. } => f.write_str("rename"),
            RoomCommand::SetPermission { permission, .. } => {
                write!(f, "{} permission", permission)
            }
        }
    }
}
