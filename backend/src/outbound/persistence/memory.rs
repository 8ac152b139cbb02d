//! In-memory adapters used when no database pool is configured.
//!
//! These back the development server and the integration suites. They obey
//! the same contracts as the Diesel adapters: the store assigns ids and
//! timestamps, list order is newest first, and deletes report whether a
//! row existed.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{BarcodeRepository, BarcodeRepositoryError, LoginService};
use crate::domain::{
    BarcodeRecord, Error, LoginCredentials, NewBarcode, User, UserId, Username,
};

/// Volatile barcode store.
#[derive(Debug, Default)]
pub struct InMemoryBarcodeRepository {
    records: Mutex<Vec<BarcodeRecord>>,
}

impl InMemoryBarcodeRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<BarcodeRecord>>, BarcodeRepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| BarcodeRepositoryError::connection("store lock poisoned"))
    }
}

#[async_trait]
impl BarcodeRepository for InMemoryBarcodeRepository {
    async fn insert(&self, new: NewBarcode) -> Result<BarcodeRecord, BarcodeRepositoryError> {
        let record = BarcodeRecord::from_parts(
            Uuid::new_v4(),
            new.owner_id,
            new.payload,
            new.symbology,
            Utc::now(),
        );
        let mut records = self.lock()?;
        records.push(record.clone());
        Ok(record)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<BarcodeRecord>, BarcodeRepositoryError> {
        let records = self.lock()?;
        let mut owned: Vec<BarcodeRecord> = records
            .iter()
            .filter(|record| record.owner_id() == owner)
            .cloned()
            .collect();
        // Insertion order breaks created_at ties, matching the database's
        // stable ordering.
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(owned)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<BarcodeRecord>, BarcodeRepositoryError> {
        let records = self.lock()?;
        Ok(records.iter().find(|record| record.id() == *id).cloned())
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, BarcodeRepositoryError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|record| record.id() != *id);
        Ok(records.len() < before)
    }
}

/// Single-account login service for pool-less operation.
///
/// Holds one development account in memory; the credential check mirrors
/// the database-backed service's behaviour (one opaque failure for both a
/// wrong username and a wrong password).
pub struct InMemoryLoginService {
    user: User,
    password: String,
}

impl InMemoryLoginService {
    /// Create a service accepting exactly one username/password pair.
    pub fn new(username: Username, password: impl Into<String>) -> Self {
        Self {
            user: User::new(UserId::random(), username),
            password: password.into(),
        }
    }
}

#[async_trait]
impl LoginService for InMemoryLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.username() == self.user.username.as_str()
            && credentials.password() == self.password
        {
            Ok(self.user.clone())
        } else {
            Err(Error::unauthenticated("invalid credentials"))
        }
    }
}
