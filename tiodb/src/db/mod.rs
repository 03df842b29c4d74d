//! Database layer for data persistence and access.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller    │  (holds Arc<dyn TioClient>)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │  TioClient   │  (client - UserStore + ServerStore traits)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │PostgresClient│  (postgres - pooled queries, row mapping)
//! └──────┬───────┘
//!        │
//!        ↓
//! ┌──────────────┐
//! │  PostgreSQL  │
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`client`]: Backend selection, the client traits and the [`get_client`] factory
//! - [`postgres`]: The PostgreSQL implementation
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Schema
//!
//! The `tio_user` and `server` tables must already exist; this layer never creates
//! or migrates them. `schema/` in the crate holds the reference layout the tests use.
//!
//! # Transactions
//!
//! There are none. Every operation is one autocommit statement, and concurrent
//! callers get only the isolation the backend provides.

pub mod client;
pub mod errors;
pub mod models;
pub mod postgres;

pub use client::{Backend, ServerStore, TioClient, UserStore, get_client, get_client_with_defaults};
pub use errors::{DbError, InitStage};
