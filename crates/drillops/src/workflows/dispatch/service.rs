use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{ReferenceData, RequestDraft, RequestId, ServiceRequest, User};
use super::filter::{self, FilterCriteria};
use super::ordering;
use super::policy;
use super::repository::{RequestStore, StoreError, Toast, ToastError, ToastSink};
use super::views::{self, BoardView};

/// Service composing the visibility policy, filter and sort engines,
/// and the storage/notification collaborators.
pub struct DispatchService<S, T> {
    store: Arc<S>,
    toasts: Arc<T>,
}

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> RequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, AtomicOrdering::Relaxed);
    RequestId(format!("req-{id:06}"))
}

impl<S, T> DispatchService<S, T>
where
    S: RequestStore + 'static,
    T: ToastSink + 'static,
{
    pub fn new(store: Arc<S>, toasts: Arc<T>) -> Self {
        Self { store, toasts }
    }

    /// The request board as `user` is allowed to see it: visibility
    /// policy applied to the criteria, then filter, then order, then
    /// projection with names resolved through `refs`.
    pub fn board(
        &self,
        user: &User,
        criteria: &FilterCriteria,
        refs: &ReferenceData,
    ) -> Result<BoardView, DispatchServiceError> {
        let requests = self.surface(self.store.all(), "load the request board")?;
        let effective = policy::scoped_criteria(criteria, user);

        let mut visible = filter::filter_requests(&requests, &effective);
        ordering::sort_requests(&mut visible);

        Ok(views::board_view(&visible, refs))
    }

    /// Record a new service request attributed to the acting user.
    pub fn submit(
        &self,
        draft: RequestDraft,
        user: &User,
    ) -> Result<ServiceRequest, DispatchServiceError> {
        let record = policy::new_request(draft, next_request_id(), user);
        let stored = self.surface(self.store.insert(record), "record the service request")?;

        info!(id = %stored.id, user = %user.id.0, "service request recorded");
        self.toasts.notify(Toast::success(format!(
            "Service request {} recorded",
            stored.id
        )))?;

        Ok(stored)
    }

    /// Apply a partial edit to an existing request. The merged record
    /// is stamped with the acting user and `now` before it goes back to
    /// the store; `created_by` and the derived total are protected by
    /// the policy layer.
    pub fn update(
        &self,
        id: &RequestId,
        patch: policy::RequestPatch,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<ServiceRequest, DispatchServiceError> {
        let fetched = self
            .store
            .fetch(id)
            .and_then(|record| record.ok_or(StoreError::NotFound));
        let original = self.surface(fetched, "update the service request")?;

        let updated = policy::apply_edit(&original, patch, user, now);
        self.surface(
            self.store.update(updated.clone()),
            "update the service request",
        )?;

        info!(id = %updated.id, user = %user.id.0, "service request updated");
        self.toasts.notify(Toast::success(format!(
            "Service request {} updated",
            updated.id
        )))?;

        Ok(updated)
    }

    /// Delete a request by id. Irreversible; there is no soft delete.
    pub fn delete(&self, id: &RequestId, user: &User) -> Result<(), DispatchServiceError> {
        self.surface(self.store.delete(id), "delete the service request")?;

        info!(id = %id, user = %user.id.0, "service request deleted");
        self.toasts.notify(Toast::success(format!(
            "Service request {id} deleted"
        )))?;

        Ok(())
    }

    // Store failures reach the operator through the toast channel and
    // are then propagated untouched; the core adds no retry or
    // interpretation of its own.
    fn surface<R>(
        &self,
        result: Result<R, StoreError>,
        action: &str,
    ) -> Result<R, DispatchServiceError> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(action, error = %err, "store operation failed");
                self.toasts
                    .notify(Toast::error(format!("Could not {action}: {err}")))?;
                Err(DispatchServiceError::Store(err))
            }
        }
    }
}

/// Error raised by the dispatch service.
#[derive(Debug, thiserror::Error)]
pub enum DispatchServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Toast(#[from] ToastError),
}
