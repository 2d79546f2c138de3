use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_valid_email(&self.username) {
            return Err(ApiError::Validation("invalid email"));
        }
        if self.password.len() < 8 {
            return Err(ApiError::Validation("password too short"));
        }
        Ok(())
    }
}

/// Request body for signin.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

impl SigninRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_valid_email(&self.username) {
            return Err(ApiError::Validation("invalid email"));
        }
        if self.password.len() < 6 {
            return Err(ApiError::Validation("password too short"));
        }
        Ok(())
    }
}

/// Request body for profile update. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !is_valid_email(&self.username) {
            return Err(ApiError::Validation("invalid email"));
        }
        if let Some(password) = &self.password {
            if password.len() < 6 {
                return Err(ApiError::Validation("password too short"));
            }
        }
        Ok(())
    }
}

/// Response returned after signup or signin.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub jwt: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Public part of the user returned to clients.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub name: String,
}

impl From<crate::users::repo::User> for PublicUser {
    fn from(user: crate::users::repo::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
        }
    }
}

/// A user profile together with their published blogs.
#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub user: PublicUser,
    pub blogs: Vec<crate::blogs::repo::Blog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_accepts_valid_payload() {
        let req = SignupRequest {
            username: "ada@example.com".into(),
            password: "longenough".into(),
            name: "Ada".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn signup_rejects_non_email_username() {
        let req = SignupRequest {
            username: "not-an-email".into(),
            password: "longenough".into(),
            name: "Ada".into(),
        };
        assert!(matches!(
            req.validate(),
            Err(ApiError::Validation("invalid email"))
        ));
    }

    #[test]
    fn signup_rejects_short_password() {
        let req = SignupRequest {
            username: "ada@example.com".into(),
            password: "seven77".into(),
            name: "Ada".into(),
        };
        assert!(matches!(
            req.validate(),
            Err(ApiError::Validation("password too short"))
        ));
    }

    #[test]
    fn signin_allows_six_char_password() {
        let req = SigninRequest {
            username: "ada@example.com".into(),
            password: "sixsix".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_without_password_skips_length_check() {
        let req = UpdateUserRequest {
            username: "ada@example.com".into(),
            name: Some("Countess".into()),
            password: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_validates_present_password() {
        let req = UpdateUserRequest {
            username: "ada@example.com".into(),
            name: None,
            password: Some("five5".into()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn token_response_uses_jwt_field() {
        let json = serde_json::to_string(&TokenResponse { jwt: "abc".into() }).unwrap();
        assert_eq!(json, r#"{"jwt":"abc"}"#);
    }
}
