//! Service-request board: record model, filtering, ordering, billing
//! derivation, and the role-scoped visibility/audit policy.
//!
//! Everything here is synchronous and pure over immutable snapshots;
//! the only stateful collaborators are the [`RequestStore`] and
//! [`ToastSink`] seams the caller provides.

pub mod billing;
pub mod domain;
pub mod filter;
pub mod geo;
pub mod ordering;
pub mod policy;
pub mod repository;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use billing::{cost_breakdown, total_cost, BillableCategory, CostComponent};
pub use domain::{
    Coordinates, Employee, EmployeeId, ParseStatusError, Product, ProductId, ReferenceData,
    RequestDraft, RequestId, ServiceRequest, ServiceStatus, User, UserRole, Vehicle, VehicleId,
};
pub use filter::{filter_requests, matches, FilterCriteria};
pub use geo::{MapHandle, MapProvider, MapProviderError, MarkerHandle, PlaceResult};
pub use ordering::{sort_requests, status_priority, UNRANKED_PRIORITY};
pub use policy::{
    apply_edit, cleared_criteria, default_employee_filter, new_request, scoped_criteria,
    RequestPatch,
};
pub use repository::{RequestStore, StoreError, Toast, ToastError, ToastKind, ToastSink};
pub use service::{DispatchService, DispatchServiceError};
pub use views::{BoardSummary, BoardView, RequestRowView, StatusCountEntry};
