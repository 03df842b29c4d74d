//! Database record models matching table schemas.
//!
//! Each entity has a response type that maps a full row (derives `sqlx::FromRow`,
//! column names match the table) and request types for the write paths. Request
//! types never carry the store-assigned `id` where the store is the one assigning it.
//!
//! - [`users`]: accounts in `tio_user`
//! - [`servers`]: versioned deployment records in `server`

pub mod servers;
pub mod users;
