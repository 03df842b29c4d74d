//! Database models for servers.
//!
//! A server row is one version of a deployable artifact. Several rows may share a
//! `name`; `version` orders them newest first. `tversion` is a second, independent
//! version string and is stored as given.

use crate::types::{ServerId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column list in table order. Every server select uses it so the row mapping
/// never depends on `SELECT *`.
pub(crate) const SERVER_COLUMNS: &str = "id, name, version, uid, stype, domain, path, tversion, timestamp, status, image, raw";

/// Database request for creating a new server row. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCreateDBRequest {
    pub name: String,
    pub version: String,
    /// Owning user
    pub uid: UserId,
    pub stype: String,
    pub domain: String,
    pub path: String,
    pub tversion: String,
    /// Caller-supplied point in time, not generated by the store
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub image: String,
    pub raw: String,
}

/// Database request for replacing a server row, keyed by `id`.
///
/// The owner (`uid`) cannot be changed through an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerUpdateDBRequest {
    pub id: ServerId,
    pub name: String,
    pub version: String,
    pub stype: String,
    pub domain: String,
    pub path: String,
    pub tversion: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub image: String,
    pub raw: String,
}

/// Database response for a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServerDBResponse {
    pub id: ServerId,
    pub name: String,
    pub version: String,
    pub uid: UserId,
    pub stype: String,
    pub domain: String,
    pub path: String,
    pub tversion: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub image: String,
    pub raw: String,
}

impl From<ServerDBResponse> for ServerUpdateDBRequest {
    fn from(server: ServerDBResponse) -> Self {
        Self {
            id: server.id,
            name: server.name,
            version: server.version,
            stype: server.stype,
            domain: server.domain,
            path: server.path,
            tversion: server.tversion,
            timestamp: server.timestamp,
            status: server.status,
            image: server.image,
            raw: server.raw,
        }
    }
}
