use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::blogs::repo::{Blog, BlogWithAuthor};
use crate::error::ApiError;
use crate::users::dto::PublicUser;

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

/// The declared update schema carries the id as a string; validation parses
/// it to the numeric key.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub id: String,
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl UpdateBlogRequest {
    pub fn validate(&self) -> Result<i64, ApiError> {
        self.id
            .parse::<i64>()
            .map_err(|_| ApiError::Validation("invalid blog id"))
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorView {
    pub name: String,
}

/// Public blog shape, author's display name nested alongside the row.
#[derive(Debug, Serialize)]
pub struct BlogView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub posted_on: OffsetDateTime,
    pub author_id: i64,
    pub author: AuthorView,
}

impl From<BlogWithAuthor> for BlogView {
    fn from(blog: BlogWithAuthor) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            published: blog.published,
            posted_on: blog.posted_on,
            author_id: blog.author_id,
            author: AuthorView {
                name: blog.author_name,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlogEnvelope {
    pub blog: BlogView,
}

#[derive(Debug, Serialize)]
pub struct BlogListEnvelope {
    pub blogs: Vec<BlogView>,
}

#[derive(Debug, Serialize)]
pub struct CreatedBlogResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// The authenticated author together with all of their blogs.
#[derive(Debug, Serialize)]
pub struct OwnBlogsResponse {
    pub user: PublicUser,
    pub blogs: Vec<Blog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_published_to_false() {
        let req: CreateBlogRequest =
            serde_json::from_str(r#"{"title":"T","content":"C"}"#).unwrap();
        assert!(!req.published);
    }

    #[test]
    fn update_parses_numeric_string_id() {
        let req = UpdateBlogRequest {
            id: "37".into(),
            title: "T".into(),
            content: "C".into(),
            published: true,
        };
        assert_eq!(req.validate().unwrap(), 37);
    }

    #[test]
    fn update_rejects_non_numeric_id() {
        let req = UpdateBlogRequest {
            id: "thirty-seven".into(),
            title: "T".into(),
            content: "C".into(),
            published: true,
        };
        assert!(matches!(
            req.validate(),
            Err(ApiError::Validation("invalid blog id"))
        ));
    }

    #[test]
    fn update_requires_published_flag() {
        let missing =
            serde_json::from_str::<UpdateBlogRequest>(r#"{"id":"1","title":"T","content":"C"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn blog_view_nests_author_name() {
        let view = BlogView::from(BlogWithAuthor {
            id: 9,
            title: "T".into(),
            content: "C".into(),
            published: true,
            posted_on: OffsetDateTime::UNIX_EPOCH,
            author_id: 4,
            author_name: "Ada".into(),
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["author"]["name"], "Ada");
        assert_eq!(json["author_id"], 4);
    }
}
