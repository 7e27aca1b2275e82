//! # Mock Store Client
//!
//! [`MockStoreClient`] speaks the same channel protocol as a real
//! [`StoreActor`](crate::StoreActor) but replays scripted expectations
//! instead of owning state. Use it to unit-test logic built *around* a
//! [`StoreClient`] (service-layer orchestration, error mapping) without
//! spawning any store task, and to inject errors that are awkward to
//! provoke through a real store.
//!
//! ```ignore
//! let mut parcels = MockStoreClient::<Parcel>::new();
//! parcels.expect_get().return_ok(None);
//!
//! let service = LifecycleService::new(ParcelClient::new(parcels.client()), ...);
//! assert!(matches!(
//!     service.update_parcel(&admin, &id, req).await,
//!     Err(ServiceError::NotFound)
//! ));
//! parcels.verify();
//! ```
//!
//! Expectations are matched in FIFO order against incoming requests; a
//! request with no matching expectation panics the mock task, which
//! surfaces in the test as a dropped response channel.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::StoreClient;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: StoreEntity> {
    Insert(Result<T, StoreError>),
    Get(Result<Option<T>, StoreError>),
    FindOne(Result<Option<T>, StoreError>),
    List(Result<Vec<T>, StoreError>),
    Apply(Result<T, StoreError>),
    Remove(Result<(), StoreError>),
}

/// Scripted stand-in for a store actor.
pub struct MockStoreClient<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockStoreClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockStoreClient<T> {
    /// Creates a mock with no expectations. Must be called from within a
    /// Tokio runtime (it spawns the replay task).
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<T>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let scripted = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = scripted.lock().unwrap().pop_front();
                match (request, expectation) {
                    (
                        StoreRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Get { respond_to, .. }, Some(Expectation::Get(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::FindOne { respond_to, .. },
                        Some(Expectation::FindOne(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::List { respond_to, .. }, Some(Expectation::List(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Apply { respond_to, .. },
                        Some(Expectation::Apply(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Remove { respond_to, .. },
                        Some(Expectation::Remove(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("mock store: request did not match next expectation"),
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client handle to hand to the code under test.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Insert)
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Expectation::Get)
    }

    pub fn expect_find_one(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Expectation::FindOne)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, Expectation::List)
    }

    pub fn expect_apply(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Apply)
    }

    pub fn expect_remove(&mut self) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, Expectation::Remove)
    }

    /// Panics if any expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("mock store: {remaining} expectation(s) not met");
        }
    }
}

/// Builder returned by the `expect_*` methods; finish with
/// [`return_ok`](ExpectationBuilder::return_ok) or
/// [`return_err`](ExpectationBuilder::return_err).
pub struct ExpectationBuilder<'a, T: StoreEntity, R> {
    mock: &'a MockStoreClient<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<'a, T: StoreEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(mock: &'a MockStoreClient<T>, wrap: fn(Result<R, StoreError>) -> Expectation<T>) -> Self {
        Self { mock, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        self.mock
            .expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(response));
    }
}
