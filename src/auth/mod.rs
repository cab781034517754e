pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_dummy_password, verify_password};
pub use token::{Claims, Identity, TokenService, TOKEN_LIFETIME_SECS};

/// Name of the cookie that carries the session token.
pub const SESSION_COOKIE: &str = "token";

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Between 3 and 32 characters: letters, digits, underscores or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// At least 6 characters.
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body returned by a successful registration or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Attributes of the session cookie set on login and registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookieConfig {
    pub secure: bool,
}

impl SessionCookieConfig {
    /// HTTP-only cookie holding `token`, living as long as the token itself.
    pub fn session(&self, token: &str) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token.to_owned())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .max_age(CookieDuration::seconds(TOKEN_LIFETIME_SECS))
            .finish()
    }

    /// Cookie that makes the client discard the session cookie.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.session("");
        cookie.make_removal();
        cookie
    }
}
