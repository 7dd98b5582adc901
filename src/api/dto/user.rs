//! DTOs for user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::link::LinkDetail;
use crate::application::services::ProfileUpdate;
use crate::domain::entities::{Link, User};

/// Public user summary returned by registration and profile update.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub created: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            created: user.created_at,
        }
    }
}

/// Detailed user view including owned links. Only ever returned to the
/// authenticated owner.
#[derive(Debug, Serialize)]
pub struct UserDetail {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub verified: bool,
    pub active: bool,
    pub created: DateTime<Utc>,
    pub urls: Vec<LinkDetail>,
}

impl UserDetail {
    pub fn from_parts(user: User, links: Vec<Link>) -> Self {
        UserDetail {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            verified: user.verified,
            active: user.active,
            created: user.created_at,
            urls: links.into_iter().map(LinkDetail::from).collect(),
        }
    }
}

/// Profile update payload; absent fields are untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[validate(length(min = 1, max = 20, message = "first name must be between 1 to 20 characters."))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 20, message = "last name must be between 1 to 20 characters."))]
    pub last_name: Option<String>,

    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<UserUpdateRequest> for ProfileUpdate {
    fn from(req: UserUpdateRequest) -> Self {
        ProfileUpdate {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        }
    }
}
