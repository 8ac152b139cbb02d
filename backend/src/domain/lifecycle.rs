//! Barcode record lifecycle: ownership-scoped create, list, view, delete.
//!
//! This service is the access-control core of the application. Every
//! operation takes the caller's identity explicitly instead of reading
//! ambient session state, which keeps the rules testable without a live
//! session layer. Ownership failures collapse into `NotFound` so callers
//! cannot probe for other owners' records, and store failures are always
//! surfaced, never downgraded to success.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use super::barcode::{BarcodePayload, BarcodeRecord, NewBarcode, Symbology};
use super::error::Error;
use super::ports::{BarcodeRepository, BarcodeRepositoryError};
use super::user::UserId;
use super::ApiResult;

/// Upper bound on any single store call before it surfaces as a failure.
///
/// A hung store call must eventually report `StoreFailure` instead of
/// stalling the caller indefinitely.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Ownership-scoped barcode operations over a [`BarcodeRepository`].
#[derive(Clone)]
pub struct BarcodeLifecycle {
    store: Arc<dyn BarcodeRepository>,
    store_timeout: Duration,
}

impl BarcodeLifecycle {
    /// Create a lifecycle service with the default store timeout.
    pub fn new(store: Arc<dyn BarcodeRepository>) -> Self {
        Self {
            store,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the bounded store-call timeout.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Persist a new record owned by the caller.
    ///
    /// The payload is validated before the store is touched; an
    /// unauthenticated caller or an empty payload never reaches the store.
    pub async fn create(
        &self,
        caller: Option<&UserId>,
        payload: &str,
        symbology: Symbology,
    ) -> ApiResult<BarcodeRecord> {
        let owner = caller.ok_or_else(|| Error::unauthenticated("login required to save barcodes"))?;
        let payload =
            BarcodePayload::new(payload).map_err(|err| Error::invalid_payload(err.to_string()))?;
        let new = NewBarcode {
            owner_id: owner.clone(),
            payload,
            symbology,
        };
        self.guarded("insert", self.store.insert(new)).await
    }

    /// All records owned by the caller, newest first.
    ///
    /// Anonymous callers and callers with no records both get an empty list,
    /// never an error.
    pub async fn list(&self, caller: Option<&UserId>) -> ApiResult<Vec<BarcodeRecord>> {
        let Some(owner) = caller else {
            return Ok(Vec::new());
        };
        let mut records = self
            .guarded("list", self.store.list_for_owner(owner))
            .await?;
        // Stable sort keeps ties in repository order across repeated calls.
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(records)
    }

    /// Fetch a record the caller owns.
    ///
    /// A missing id and another owner's id are indistinguishable: both are
    /// `NotFound`.
    pub async fn view(&self, caller: Option<&UserId>, id: &Uuid) -> ApiResult<BarcodeRecord> {
        let Some(owner) = caller else {
            return Err(Self::missing());
        };
        let record = self.guarded("lookup", self.store.find_by_id(id)).await?;
        match record {
            Some(record) if record.owner_id() == owner => Ok(record),
            _ => Err(Self::missing()),
        }
    }

    /// Permanently remove a record the caller owns.
    ///
    /// Re-deleting an already-deleted id yields `NotFound`, not success.
    pub async fn delete(&self, caller: Option<&UserId>, id: &Uuid) -> ApiResult<()> {
        let Some(owner) = caller else {
            return Err(Self::missing());
        };
        let record = self.guarded("lookup", self.store.find_by_id(id)).await?;
        let owned = matches!(&record, Some(record) if record.owner_id() == owner);
        if !owned {
            return Err(Self::missing());
        }
        let deleted = self.guarded("delete", self.store.delete_by_id(id)).await?;
        if deleted {
            Ok(())
        } else {
            // Lost a race with a concurrent delete; the record is gone.
            Err(Self::missing())
        }
    }

    fn missing() -> Error {
        Error::not_found("barcode not found")
    }

    async fn guarded<T, F>(&self, operation: &'static str, call: F) -> ApiResult<T>
    where
        F: Future<Output = Result<T, BarcodeRepositoryError>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!(operation, error = %err, "barcode store call failed");
                Err(Error::store_failure(format!(
                    "barcode store failed during {operation}"
                )))
            }
            Err(_) => {
                warn!(operation, "barcode store call timed out");
                Err(Error::store_failure(format!(
                    "barcode store timed out during {operation}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the lifecycle access-control rules.
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockBarcodeRepository;
    use crate::domain::ErrorCode;
    use crate::outbound::persistence::memory::InMemoryBarcodeRepository;

    fn lifecycle_over(store: impl BarcodeRepository + 'static) -> BarcodeLifecycle {
        BarcodeLifecycle::new(Arc::new(store))
    }

    fn memory_lifecycle() -> BarcodeLifecycle {
        lifecycle_over(InMemoryBarcodeRepository::default())
    }

    /// Repository whose every call suspends forever.
    struct HangingRepository;

    #[async_trait]
    impl BarcodeRepository for HangingRepository {
        async fn insert(&self, _new: NewBarcode) -> Result<BarcodeRecord, BarcodeRepositoryError> {
            futures_util::future::pending().await
        }

        async fn list_for_owner(
            &self,
            _owner: &UserId,
        ) -> Result<Vec<BarcodeRecord>, BarcodeRepositoryError> {
            futures_util::future::pending().await
        }

        async fn find_by_id(
            &self,
            _id: &Uuid,
        ) -> Result<Option<BarcodeRecord>, BarcodeRepositoryError> {
            futures_util::future::pending().await
        }

        async fn delete_by_id(&self, _id: &Uuid) -> Result<bool, BarcodeRepositoryError> {
            futures_util::future::pending().await
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unauthenticated_create_never_reaches_store() {
        let mut store = MockBarcodeRepository::new();
        store.expect_insert().never();
        let lifecycle = lifecycle_over(store);

        let err = lifecycle
            .create(None, "12345", Symbology::Code128)
            .await
            .expect_err("anonymous create must fail");
        assert_eq!(err.code(), ErrorCode::Unauthenticated);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t")]
    #[tokio::test]
    async fn blank_payload_create_never_reaches_store(#[case] payload: &str) {
        let mut store = MockBarcodeRepository::new();
        store.expect_insert().never();
        let lifecycle = lifecycle_over(store);
        let caller = UserId::random();

        let err = lifecycle
            .create(Some(&caller), payload, Symbology::Code128)
            .await
            .expect_err("blank payload must fail");
        assert_eq!(err.code(), ErrorCode::InvalidPayload);
    }

    #[rstest]
    #[tokio::test]
    async fn create_persists_for_caller() {
        let lifecycle = memory_lifecycle();
        let caller = UserId::random();

        let record = lifecycle
            .create(Some(&caller), "  12345  ", Symbology::Code128)
            .await
            .expect("create succeeds");
        assert_eq!(record.owner_id(), &caller);
        assert_eq!(record.payload().as_str(), "12345");
        assert_eq!(record.symbology(), Symbology::Code128);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_insert_surfaces_store_failure_and_nothing_is_listed() {
        let mut store = MockBarcodeRepository::new();
        store
            .expect_insert()
            .returning(|_| Err(BarcodeRepositoryError::connection("store outage")));
        store.expect_list_for_owner().returning(|_| Ok(Vec::new()));
        let lifecycle = lifecycle_over(store);
        let caller = UserId::random();

        let err = lifecycle
            .create(Some(&caller), "12345", Symbology::Code128)
            .await
            .expect_err("outage must not report success");
        assert_eq!(err.code(), ErrorCode::StoreFailure);

        let listed = lifecycle
            .list(Some(&caller))
            .await
            .expect("list still works");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn hung_store_call_times_out_as_store_failure() {
        let lifecycle =
            lifecycle_over(HangingRepository).with_store_timeout(Duration::from_millis(20));
        let caller = UserId::random();

        let err = lifecycle
            .create(Some(&caller), "12345", Symbology::Code128)
            .await
            .expect_err("hung insert must time out");
        assert_eq!(err.code(), ErrorCode::StoreFailure);
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_list_is_empty_without_store_access() {
        let mut store = MockBarcodeRepository::new();
        store.expect_list_for_owner().never();
        let lifecycle = lifecycle_over(store);

        let listed = lifecycle.list(None).await.expect("anonymous list is fine");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn list_orders_newest_first_and_keeps_ties_stable() {
        let older = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).single().expect("ts");
        let tied = Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).single().expect("ts");
        let owner = UserId::random();

        let record = |payload: &str, created_at| {
            BarcodeRecord::from_parts(
                Uuid::new_v4(),
                owner.clone(),
                BarcodePayload::new(payload).expect("valid payload"),
                Symbology::Code128,
                created_at,
            )
        };
        let out_of_order = vec![
            record("oldest", older),
            record("tie-first", tied),
            record("tie-second", tied),
        ];

        let mut store = MockBarcodeRepository::new();
        store
            .expect_list_for_owner()
            .returning(move |_| Ok(out_of_order.clone()));
        let lifecycle = lifecycle_over(store);

        let first = lifecycle.list(Some(&owner)).await.expect("list");
        let second = lifecycle.list(Some(&owner)).await.expect("list again");

        let payloads: Vec<&str> = first.iter().map(|r| r.payload().as_str()).collect();
        assert_eq!(payloads, vec!["tie-first", "tie-second", "oldest"]);
        assert_eq!(first, second, "tie order must be stable across calls");
    }

    #[rstest]
    #[tokio::test]
    async fn records_are_invisible_across_owners() {
        let lifecycle = memory_lifecycle();
        let alice = UserId::random();
        let mallory = UserId::random();

        let record = lifecycle
            .create(Some(&alice), "12345", Symbology::Code39)
            .await
            .expect("create succeeds");

        let listed = lifecycle
            .list(Some(&mallory))
            .await
            .expect("list succeeds");
        assert!(listed.is_empty());

        let err = lifecycle
            .view(Some(&mallory), &record.id())
            .await
            .expect_err("other owner must not view");
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = lifecycle
            .delete(Some(&mallory), &record.id())
            .await
            .expect_err("other owner must not delete");
        assert_eq!(err.code(), ErrorCode::NotFound);

        // The record itself is untouched.
        let still_there = lifecycle
            .view(Some(&alice), &record.id())
            .await
            .expect("owner still sees the record");
        assert_eq!(still_there, record);
    }

    #[rstest]
    #[tokio::test]
    async fn view_of_unknown_id_is_not_found() {
        let lifecycle = memory_lifecycle();
        let caller = UserId::random();

        let err = lifecycle
            .view(Some(&caller), &Uuid::new_v4())
            .await
            .expect_err("unknown id must be missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_permanent_and_not_idempotent_success() {
        let lifecycle = memory_lifecycle();
        let caller = UserId::random();

        let record = lifecycle
            .create(Some(&caller), "12345", Symbology::Code128)
            .await
            .expect("create succeeds");

        lifecycle
            .delete(Some(&caller), &record.id())
            .await
            .expect("delete succeeds");

        let err = lifecycle
            .view(Some(&caller), &record.id())
            .await
            .expect_err("deleted record is gone");
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = lifecycle
            .delete(Some(&caller), &record.id())
            .await
            .expect_err("re-delete must not report success");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_race_with_concurrent_removal_is_not_found() {
        let owner = UserId::random();
        let record = BarcodeRecord::from_parts(
            Uuid::new_v4(),
            owner.clone(),
            BarcodePayload::new("12345").expect("valid payload"),
            Symbology::Code128,
            Utc::now(),
        );
        let id = record.id();

        let mut store = MockBarcodeRepository::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        // Another session removed the row between lookup and delete.
        store.expect_delete_by_id().returning(|_| Ok(false));
        let lifecycle = lifecycle_over(store);

        let err = lifecycle
            .delete(Some(&owner), &id)
            .await
            .expect_err("lost race yields not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
