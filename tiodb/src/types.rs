//! Common type definitions.
//!
//! # ID Types
//!
//! Entity IDs are store-assigned surrogate keys (`SERIAL` columns) wrapped in type
//! aliases so signatures say which table a number belongs to:
//!
//! - [`UserId`]: `tio_user.id`
//! - [`ServerId`]: `server.id`
//!
//! A server's owner reference (`server.uid`) is a [`UserId`].

// Type aliases for IDs
pub type UserId = i32;
pub type ServerId = i32;

/// Which kind of record an operation touched, used in errors and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Server,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::User => "user",
            Entity::Server => "server",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
