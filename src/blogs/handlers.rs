use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    blogs::{
        dto::{
            BlogEnvelope, BlogListEnvelope, BlogView, CreateBlogRequest, CreatedBlogResponse,
            MessageResponse, OwnBlogsResponse, UpdateBlogRequest,
        },
        repo::{posted_now, Blog},
    },
    error::ApiError,
    state::AppState,
    users::{dto::PublicUser, repo::User},
};

pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blog", post(create_blog).put(update_blog))
        .route("/blog/bulk", get(bulk_blogs))
        .route("/blog/both", get(own_blogs))
        .route("/blog/:id", get(get_blog).delete(delete_blog))
}

#[instrument(skip(state, principal, payload))]
pub async fn create_blog(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<Json<CreatedBlogResponse>, ApiError> {
    let blog = Blog::create(
        &state.db,
        principal.sub,
        &payload.title,
        &payload.content,
        payload.published,
        posted_now(),
    )
    .await?;

    info!(blog_id = %blog.id, author_id = %blog.author_id, "blog created");
    Ok(Json(CreatedBlogResponse {
        message: format!("blog created successfully: {}", blog.id),
        id: blog.id,
    }))
}

#[instrument(skip(state, principal, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = payload.validate()?;

    // The compound predicate settles ownership; zero rows means the blog is
    // absent or someone else's, and both reject identically.
    let blog = Blog::update_owned(
        &state.db,
        id,
        principal.sub,
        &payload.title,
        &payload.content,
        payload.published,
    )
    .await?;

    match blog {
        Some(blog) => {
            info!(blog_id = %blog.id, author_id = %principal.sub, "blog updated");
            Ok(Json(MessageResponse {
                message: format!("blog updated successfully: {}", blog.id),
            }))
        }
        None => {
            warn!(blog_id = %id, author_id = %principal.sub, "update refused");
            Err(ApiError::Unauthorized)
        }
    }
}

#[instrument(skip(state, principal))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !Blog::delete_owned(&state.db, id, principal.sub).await? {
        warn!(blog_id = %id, author_id = %principal.sub, "delete refused");
        return Err(ApiError::Unauthorized);
    }

    info!(blog_id = %id, author_id = %principal.sub, "blog deleted");
    Ok(Json(MessageResponse {
        message: "blog deleted successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BlogEnvelope>, ApiError> {
    let blog = Blog::get(&state.db, id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(BlogEnvelope {
        blog: BlogView::from(blog),
    }))
}

#[instrument(skip(state))]
pub async fn bulk_blogs(
    State(state): State<AppState>,
) -> Result<Json<BlogListEnvelope>, ApiError> {
    let blogs = Blog::list_published(&state.db).await?;
    Ok(Json(BlogListEnvelope {
        blogs: blogs.into_iter().map(BlogView::from).collect(),
    }))
}

#[instrument(skip(state, principal))]
pub async fn own_blogs(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<OwnBlogsResponse>, ApiError> {
    let user = User::find_by_id(&state.db, principal.sub)
        .await?
        .ok_or(ApiError::NotFound)?;
    let blogs = Blog::list_by_author(&state.db, user.id).await?;

    Ok(Json(OwnBlogsResponse {
        user: PublicUser::from(user),
        blogs,
    }))
}
