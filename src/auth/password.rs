use crate::error::AppError;
use actix_web::web;
use bcrypt::{hash, verify};
use lazy_static::lazy_static;
use tokio::sync::OnceCell;

/// bcrypt work factor used for every stored password.
pub const BCRYPT_COST: u32 = 10;

const DUMMY_PASSWORD: &str = "taskboard-unknown-user";

lazy_static! {
    // Hashed on first use, at the same cost as stored passwords
    static ref DUMMY_HASH: OnceCell<String> = OnceCell::new();
}

/// Hashes `password` with a fresh salt on the blocking thread pool.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    web::block(move || hash(password, BCRYPT_COST))
        .await?
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt hash on the blocking thread pool.
///
/// A wrong password and an unreadable stored hash both yield `Ok(false)`.
pub async fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hashed_password = hashed_password.to_owned();

    let outcome = web::block(move || verify(password, &hashed_password)).await?;

    Ok(outcome.unwrap_or_else(|e| {
        log::warn!("Stored password hash could not be verified: {}", e);
        false
    }))
}

/// Spends one full bcrypt verification on a throwaway hash and always yields `false`.
///
/// Login runs this for unknown usernames so that both failure paths cost the same.
pub async fn verify_dummy_password(password: &str) -> Result<bool, AppError> {
    let dummy_hash = DUMMY_HASH
        .get_or_try_init(|| hash_password(DUMMY_PASSWORD))
        .await?;
    verify_password(password, dummy_hash).await?;
    Ok(false)
}
