use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{macros::offset, OffsetDateTime};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub posted_on: OffsetDateTime,
    pub author_id: i64,
}

/// Blog row joined with the author's display name, for public reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogWithAuthor {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub posted_on: OffsetDateTime,
    pub author_id: i64,
    pub author_name: String,
}

/// Posting timestamps are captured in the fixed UTC+05:30 offset.
pub fn posted_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(offset!(+5:30))
}

impl Blog {
    pub async fn create(
        db: &PgPool,
        author_id: i64,
        title: &str,
        content: &str,
        published: bool,
        posted_on: OffsetDateTime,
    ) -> sqlx::Result<Blog> {
        sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (title, content, published, posted_on, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, content, published, posted_on, author_id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(published)
        .bind(posted_on)
        .bind(author_id)
        .fetch_one(db)
        .await
    }

    /// Owner-scoped update. `None` means the row does not exist or belongs
    /// to someone else; the caller decides how to reject.
    pub async fn update_owned(
        db: &PgPool,
        id: i64,
        author_id: i64,
        title: &str,
        content: &str,
        published: bool,
    ) -> sqlx::Result<Option<Blog>> {
        sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs
            SET title = $3, content = $4, published = $5
            WHERE id = $1 AND author_id = $2
            RETURNING id, title, content, published, posted_on, author_id
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(title)
        .bind(content)
        .bind(published)
        .fetch_optional(db)
        .await
    }

    /// Owner-scoped delete; `false` when the compound predicate matched
    /// nothing.
    pub async fn delete_owned(db: &PgPool, id: i64, author_id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(id)
        .bind(author_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get(db: &PgPool, id: i64) -> sqlx::Result<Option<BlogWithAuthor>> {
        sqlx::query_as::<_, BlogWithAuthor>(
            r#"
            SELECT b.id, b.title, b.content, b.published, b.posted_on, b.author_id,
                   u.name AS author_name
            FROM blogs b
            JOIN users u ON u.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_published(db: &PgPool) -> sqlx::Result<Vec<BlogWithAuthor>> {
        sqlx::query_as::<_, BlogWithAuthor>(
            r#"
            SELECT b.id, b.title, b.content, b.published, b.posted_on, b.author_id,
                   u.name AS author_name
            FROM blogs b
            JOIN users u ON u.id = b.author_id
            WHERE b.published = TRUE
            ORDER BY b.posted_on DESC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn list_by_author(db: &PgPool, author_id: i64) -> sqlx::Result<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, content, published, posted_on, author_id
            FROM blogs
            WHERE author_id = $1
            ORDER BY posted_on DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(db)
        .await
    }

    pub async fn list_published_by_author(db: &PgPool, author_id: i64) -> sqlx::Result<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, content, published, posted_on, author_id
            FROM blogs
            WHERE author_id = $1 AND published = TRUE
            ORDER BY posted_on DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posting_timestamp_is_fixed_offset() {
        let now = posted_now();
        assert_eq!(now.offset(), offset!(+5:30));
    }
}
