//! Database models for users.

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Database request for creating a new user. The id is assigned by the store.
#[derive(Clone, Deserialize)]
pub struct UserCreateDBRequest {
    pub name: String,
    pub passwd: String,
}

/// Database request for replacing a user's credential, keyed by name
#[derive(Clone, Deserialize)]
pub struct UserUpdateDBRequest {
    pub name: String,
    pub passwd: String,
}

/// Database response for a user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserDBResponse {
    pub id: UserId,
    pub name: String,
    pub passwd: String,
}

// The credential is opaque to this layer but still never belongs in logs.
impl fmt::Debug for UserCreateDBRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreateDBRequest")
            .field("name", &self.name)
            .field("passwd", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for UserUpdateDBRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdateDBRequest")
            .field("name", &self.name)
            .field("passwd", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for UserDBResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDBResponse")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("passwd", &"<redacted>")
            .finish()
    }
}
