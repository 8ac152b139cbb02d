//! Diesel-backed `LoginService` verifying credentials against `users`.
//!
//! Passwords are stored as Argon2 PHC strings. A missing account and a
//! wrong password produce the same `Unauthenticated` error so login
//! responses do not leak which usernames exist. Infrastructure failures
//! surface as `StoreFailure` (fail closed, never a default identity).

use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, User, UserId, Username};

use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed authentication service.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_account(&self, username: &str) -> Result<Option<UserRow>, Error> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| Error::store_failure(format!("account lookup failed: {err}")))?;

        users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| Error::store_failure(format!("account lookup failed: {err}")))
    }
}

fn invalid_credentials() -> Error {
    Error::unauthenticated("invalid credentials")
}

fn verify_password(row: &UserRow, password: &str) -> Result<(), Error> {
    let parsed = PasswordHash::new(&row.password_hash).map_err(|err| {
        warn!(username = %row.username, error = %err, "stored password hash is malformed");
        Error::store_failure("account record is unusable")
    })?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| invalid_credentials())
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(row) = self.find_account(credentials.username()).await? else {
            return Err(invalid_credentials());
        };
        verify_password(&row, credentials.password())?;

        let username = Username::new(row.username.clone())
            .map_err(|err| Error::store_failure(format!("invalid stored username: {err}")))?;
        Ok(User::new(UserId::from_uuid(row.id), username))
    }
}
