use axum::{
    extract::{FromRef, Path, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
    },
    blogs::repo::Blog,
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            MessageResponse, PublicUser, SigninRequest, SignupRequest, TokenResponse,
            UpdateUserRequest, UserProfileResponse,
        },
        repo::User,
    },
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(signup))
        .route("/user/signin", post(signin))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/user/update", put(update_user))
        .route("/user/:id", get(get_user))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.username = payload.username.trim().to_lowercase();
    payload.validate()?;

    // Collision pre-check; the password is hashed only once it passes. A
    // concurrent signup racing past this lands on the unique index and is
    // reported as the same conflict.
    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "signup username taken");
        return Err(ApiError::Conflict);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &hash, &payload.name).await?;

    let jwt = JwtKeys::from_ref(&state).sign(user.id, &user.username, &user.name)?;

    info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok(Json(TokenResponse { jwt }))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    Json(mut payload): Json<SigninRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.username = payload.username.trim().to_lowercase();
    payload.validate()?;

    // Unknown username and wrong password must be indistinguishable.
    let user = match User::find_by_username(&state.db, &payload.username).await? {
        Some(user) => user,
        None => {
            warn!(username = %payload.username, "signin unknown username");
            return Err(ApiError::BadCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "signin wrong password");
        return Err(ApiError::BadCredentials);
    }

    let jwt = JwtKeys::from_ref(&state).sign(user.id, &user.username, &user.name)?;

    info!(user_id = %user.id, "user signed in");
    Ok(Json(TokenResponse { jwt }))
}

#[instrument(skip(state, payload, principal))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    payload.username = payload.username.trim().to_lowercase();
    payload.validate()?;

    // Rehash immediately after validation succeeds, never before.
    let password_hash = match &payload.password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let user = User::update_profile(
        &state.db,
        principal.sub,
        &payload.username,
        payload.name.as_deref(),
        password_hash.as_deref(),
    )
    .await?;

    info!(user_id = %user.id, "user profile updated");
    Ok(Json(MessageResponse {
        message: "user updated successfully".into(),
    }))
}

#[instrument(skip(state, _principal))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_principal): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let blogs = Blog::list_published_by_author(&state.db, user.id).await?;

    Ok(Json(UserProfileResponse {
        user: PublicUser::from(user),
        blogs,
    }))
}
