//! `server` queries.
//!
//! Listings stream rows and decode them one at a time: a row that cannot be mapped is
//! logged and skipped instead of failing the whole listing.

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Execute, Executor, FromRow, Postgres, QueryBuilder};
use tracing::{debug, error, instrument};

use super::PostgresClient;
use crate::db::client::ServerStore;
use crate::db::errors::{DbError, Result};
use crate::db::models::servers::{SERVER_COLUMNS, ServerCreateDBRequest, ServerDBResponse, ServerUpdateDBRequest};
use crate::types::{Entity, ServerId, UserId};

const ORDER_NEWEST_VERSION_FIRST: &str = " ORDER BY version DESC, id ASC";

/// Build the owner listing. Both `uid` and `name` are always bound; the limit is
/// bound too, and only added when positive.
fn owner_listing_query(uid: UserId, limit: i64, name: &str) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {SERVER_COLUMNS} FROM server WHERE uid = "));
    builder.push_bind(uid);
    builder.push(" AND name = ");
    builder.push_bind(name.to_string());
    builder.push(ORDER_NEWEST_VERSION_FIRST);
    if limit > 0 {
        builder.push(" LIMIT ");
        builder.push_bind(limit);
    }
    builder
}

impl PostgresClient {
    /// Stream a server listing, skipping rows that fail to decode.
    async fn collect_servers(&self, operation: &'static str, query: Query<'_, Postgres, PgArguments>) -> Result<Vec<ServerDBResponse>> {
        debug!(sql = query.sql(), "Query servers");

        self.with_deadline(operation, async {
            let mut rows = self.pool().fetch(query);
            let mut servers = Vec::new();

            while let Some(row) = rows.try_next().await.map_err(DbError::read(operation))? {
                match ServerDBResponse::from_row(&row) {
                    Ok(server) => servers.push(server),
                    Err(e) => error!(error = %e, "Scan server row failed, skipping"),
                }
            }

            Ok(servers)
        })
        .await
    }
}

#[async_trait]
impl ServerStore for PostgresClient {
    #[instrument(skip(self, request), fields(name = %request.name, version = %request.version, uid = request.uid), err)]
    async fn create_server(&self, request: &ServerCreateDBRequest) -> Result<ServerDBResponse> {
        const OP: &str = "create server";
        let sql = format!(
            "INSERT INTO server (name, version, uid, stype, domain, path, tversion, timestamp, status, image, raw) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {SERVER_COLUMNS}"
        );
        debug!(sql = %sql, "Save new server");

        self.with_deadline(OP, async {
            sqlx::query_as::<_, ServerDBResponse>(&sql)
                .bind(&request.name)
                .bind(&request.version)
                .bind(request.uid)
                .bind(&request.stype)
                .bind(&request.domain)
                .bind(&request.path)
                .bind(&request.tversion)
                .bind(request.timestamp)
                .bind(&request.status)
                .bind(&request.image)
                .bind(&request.raw)
                .fetch_one(self.pool())
                .await
                .map_err(DbError::write(OP))
        })
        .await
    }

    #[instrument(skip(self), err)]
    async fn list_servers(&self) -> Result<Vec<ServerDBResponse>> {
        let sql = format!("SELECT {SERVER_COLUMNS} FROM server{ORDER_NEWEST_VERSION_FIRST}");
        self.collect_servers("list servers", sqlx::query(&sql)).await
    }

    #[instrument(skip(self), err)]
    async fn list_servers_by_owner(&self, uid: UserId, limit: i64, name: &str) -> Result<Vec<ServerDBResponse>> {
        let mut builder = owner_listing_query(uid, limit, name);
        self.collect_servers("list servers by owner", builder.build()).await
    }

    #[instrument(skip(self), err)]
    async fn get_server(&self, id: ServerId) -> Result<ServerDBResponse> {
        const OP: &str = "get server";
        let sql = format!("SELECT {SERVER_COLUMNS} FROM server WHERE id = $1");
        debug!(sql = %sql, "Query server by id");

        let mut rows = self
            .with_deadline(OP, async {
                sqlx::query_as::<_, ServerDBResponse>(&sql)
                    .bind(id)
                    .fetch_all(self.pool())
                    .await
                    .map_err(DbError::read(OP))
            })
            .await?;

        match rows.len() {
            0 => Err(DbError::NotFound {
                entity: Entity::Server,
                key: id.to_string(),
            }),
            1 => Ok(rows.remove(0)),
            n => {
                error!(id, rows = n, "Key lookup returned more than one server");
                Err(DbError::DataIntegrity {
                    entity: Entity::Server,
                    key: id.to_string(),
                    rows: n,
                })
            }
        }
    }

    #[instrument(skip(self), err)]
    async fn get_server_by_name(&self, name: &str) -> Result<ServerDBResponse> {
        const OP: &str = "get server by name";
        // Newest insertion wins.
        let sql = format!("SELECT {SERVER_COLUMNS} FROM server WHERE name = $1 ORDER BY id DESC LIMIT 1");
        debug!(sql = %sql, "Query server by name");

        let server = self
            .with_deadline(OP, async {
                sqlx::query_as::<_, ServerDBResponse>(&sql)
                    .bind(name)
                    .fetch_optional(self.pool())
                    .await
                    .map_err(DbError::read(OP))
            })
            .await?;

        server.ok_or_else(|| DbError::NotFound {
            entity: Entity::Server,
            key: name.to_string(),
        })
    }

    #[instrument(skip(self, request), fields(id = request.id), err)]
    async fn update_server(&self, request: &ServerUpdateDBRequest) -> Result<u64> {
        const OP: &str = "update server";
        let sql = "UPDATE server SET name = $2, version = $3, stype = $4, domain = $5, path = $6, tversion = $7, \
                   timestamp = $8, status = $9, image = $10, raw = $11 WHERE id = $1";
        debug!(sql, "Update server");

        let affected = self
            .with_deadline(OP, async {
                sqlx::query(sql)
                    .bind(request.id)
                    .bind(&request.name)
                    .bind(&request.version)
                    .bind(&request.stype)
                    .bind(&request.domain)
                    .bind(&request.path)
                    .bind(&request.tversion)
                    .bind(request.timestamp)
                    .bind(&request.status)
                    .bind(&request.image)
                    .bind(&request.raw)
                    .execute(self.pool())
                    .await
                    .map(|result| result.rows_affected())
                    .map_err(DbError::write(OP))
            })
            .await?;

        if affected == 0 {
            debug!("Update matched no server");
        }
        Ok(affected)
    }

    #[instrument(skip(self), err)]
    async fn delete_server(&self, name: &str) -> Result<u64> {
        const OP: &str = "delete server";
        let sql = "DELETE FROM server WHERE name = $1";
        debug!(sql, "Delete server");

        self.with_deadline(OP, async {
            sqlx::query(sql)
                .bind(name)
                .execute(self.pool())
                .await
                .map(|result| result.rows_affected())
                .map_err(DbError::write(OP))
        })
        .await
    }
}
