//! # tiodb: data access for tio users and servers
//!
//! `tiodb` persists two kinds of records in a relational store: accounts (`tio_user`)
//! and versioned deployment records for deployable artifacts (`server`). Callers ask
//! the factory for a client by backend name and connection string and from then on
//! work against the [`TioClient`] trait, never against a concrete engine.
//!
//! ## Overview
//!
//! - **Client factory** ([`get_client`]): parses the backend name, builds the matching
//!   implementation, opens its pool and pings it. Either a live client comes back or an
//!   error does; there is no half-initialized state.
//! - **PostgreSQL client** ([`db::postgres::PostgresClient`]): owns a `sqlx` pool
//!   (50 connections, five minute connection lifetime by default) and implements every
//!   user and server operation as one parameterized statement under a per-call deadline.
//!
//! Users are addressed by name; their numeric id is assigned by the store and never
//! supplied by callers. Servers are addressed by id or name, and listed newest version
//! first. Updates and deletes report how many rows they touched, so "matched nothing"
//! is visible to the caller.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tiodb::db::models::users::UserCreateDBRequest;
//! use tiodb::{ServerStore, UserStore};
//!
//! # async fn example() -> Result<(), tiodb::DbError> {
//! let client = tiodb::get_client_with_defaults("postgres", "postgres://tio@localhost/tio").await?;
//!
//! client
//!     .create_user(&UserCreateDBRequest {
//!         name: "alice".to_string(),
//!         passwd: "x".to_string(),
//!     })
//!     .await?;
//! let alice = client.get_user("alice").await?;
//! let newest_first = client.list_servers_by_owner(alice.id, 10, "svc").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! All operations return [`DbError`]. Initialization problems are
//! [`DbError::InitializationFailure`] and should abort startup; everything else is an
//! ordinary typed result for the caller to handle.
//!
//! ## Configuration
//!
//! The library reads nothing from the environment. The bundled binary loads its
//! settings through the [`config`] module.

pub mod config;
pub mod db;
pub mod telemetry;
pub mod types;

pub use config::{Config, PoolSettings};
pub use db::errors::DbError;
pub use db::{Backend, ServerStore, TioClient, UserStore, get_client, get_client_with_defaults};
pub use types::{ServerId, UserId};
