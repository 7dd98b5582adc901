//! DTOs for registration, login and logout.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::Registration;

/// Hint returned with every issued token.
pub const TOKEN_USAGE: &str =
    "You will need to pass this in the Authorization header like Bearer access_token";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub usage: &'static str,
}

/// Registration payload.
///
/// Name lengths are checked here; username, email and password run through
/// the ordered account-service validators so their failure messages and
/// ordering stay consistent with profile updates.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 20, message = "first name must be between 1 to 20 characters."))]
    pub first_name: String,

    #[validate(length(min = 1, max = 20, message = "last name must be between 1 to 20 characters."))]
    pub last_name: String,

    pub email: String,
    pub username: String,
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            username: req.username,
            password: req.password,
        }
    }
}
