use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
}

impl User {
    pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, name
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        username: &str,
        password_hash: &str,
        name: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, name
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(name)
        .fetch_one(db)
        .await
    }

    /// Optional fields keep their stored value when absent.
    pub async fn update_profile(
        db: &PgPool,
        id: i64,
        username: &str,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2,
                name = COALESCE($3, name),
                password_hash = COALESCE($4, password_hash)
            WHERE id = $1
            RETURNING id, username, password_hash, name
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
