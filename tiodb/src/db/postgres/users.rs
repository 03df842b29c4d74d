//! `tio_user` queries.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::PostgresClient;
use crate::db::client::UserStore;
use crate::db::errors::{DbError, Result};
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse, UserUpdateDBRequest};
use crate::types::Entity;

#[async_trait]
impl UserStore for PostgresClient {
    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create_user(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        const OP: &str = "create user";
        let sql = "INSERT INTO tio_user (name, passwd) VALUES ($1, $2) RETURNING id, name, passwd";
        debug!(sql, "Save new user");

        self.with_deadline(OP, async {
            sqlx::query_as::<_, UserDBResponse>(sql)
                .bind(&request.name)
                .bind(&request.passwd)
                .fetch_one(self.pool())
                .await
                .map_err(DbError::write(OP))
        })
        .await
    }

    #[instrument(skip(self), err)]
    async fn get_user(&self, name: &str) -> Result<UserDBResponse> {
        const OP: &str = "get user";
        // Names are expected to be unique; if the schema allows duplicates the oldest row wins.
        let sql = "SELECT id, name, passwd FROM tio_user WHERE name = $1 ORDER BY id ASC LIMIT 1";
        debug!(sql, "Query user");

        let user = self
            .with_deadline(OP, async {
                sqlx::query_as::<_, UserDBResponse>(sql)
                    .bind(name)
                    .fetch_optional(self.pool())
                    .await
                    .map_err(DbError::read(OP))
            })
            .await?;

        user.ok_or_else(|| DbError::NotFound {
            entity: Entity::User,
            key: name.to_string(),
        })
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn update_user(&self, request: &UserUpdateDBRequest) -> Result<u64> {
        const OP: &str = "update user";
        let sql = "UPDATE tio_user SET passwd = $2 WHERE name = $1";
        debug!(sql, "Update user");

        let affected = self
            .with_deadline(OP, async {
                sqlx::query(sql)
                    .bind(&request.name)
                    .bind(&request.passwd)
                    .execute(self.pool())
                    .await
                    .map(|result| result.rows_affected())
                    .map_err(DbError::write(OP))
            })
            .await?;

        if affected == 0 {
            debug!("Update matched no user");
        }
        Ok(affected)
    }

    #[instrument(skip(self), err)]
    async fn delete_user(&self, name: &str) -> Result<u64> {
        const OP: &str = "delete user";
        let sql = "DELETE FROM tio_user WHERE name = $1";
        debug!(sql, "Delete user");

        let affected = self
            .with_deadline(OP, async {
                sqlx::query(sql)
                    .bind(name)
                    .execute(self.pool())
                    .await
                    .map(|result| result.rows_affected())
                    .map_err(DbError::write(OP))
            })
            .await?;

        if affected == 0 {
            debug!("Delete matched no user");
        }
        Ok(affected)
    }
}
