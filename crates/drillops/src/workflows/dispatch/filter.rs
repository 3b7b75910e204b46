use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{EmployeeId, ServiceRequest, ServiceStatus, VehicleId};

/// Predicates applied to the request collection. `None` (and an empty
/// search term) means the predicate is not active, so `Default` is the
/// identity criteria: every request passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search: String,
    pub status: Option<ServiceStatus>,
    pub vehicle: Option<VehicleId>,
    pub employee: Option<EmployeeId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Whether a single request satisfies every active predicate.
pub fn matches(request: &ServiceRequest, criteria: &FilterCriteria) -> bool {
    matches_search(request, &criteria.search)
        && matches_status(request, criteria.status)
        && matches_vehicle(request, criteria.vehicle.as_ref())
        && matches_employee(request, criteria.employee.as_ref())
        && matches_date_range(request, criteria.from, criteria.to)
}

/// Narrow a request collection to the records satisfying `criteria`.
/// Pure; relative input order is preserved (ordering is a separate
/// stage). Contradictory date bounds legitimately yield an empty set.
pub fn filter_requests(requests: &[ServiceRequest], criteria: &FilterCriteria) -> Vec<ServiceRequest> {
    requests
        .iter()
        .filter(|request| matches(request, criteria))
        .cloned()
        .collect()
}

fn matches_search(request: &ServiceRequest, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    request.customer_name.to_lowercase().contains(&needle)
        || request.location.to_lowercase().contains(&needle)
}

fn matches_status(request: &ServiceRequest, status: Option<ServiceStatus>) -> bool {
    match status {
        Some(wanted) => request.status == wanted,
        None => true,
    }
}

fn matches_vehicle(request: &ServiceRequest, vehicle: Option<&VehicleId>) -> bool {
    match vehicle {
        Some(wanted) => request.vehicle.as_ref() == Some(wanted),
        None => true,
    }
}

// Ownership match falls back to the last editor only when no creator was
// recorded; see ServiceRequest::attributed_to.
fn matches_employee(request: &ServiceRequest, employee: Option<&EmployeeId>) -> bool {
    match employee {
        Some(wanted) => request.attributed_to() == Some(wanted),
        None => true,
    }
}

fn matches_date_range(
    request: &ServiceRequest,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    if let Some(start) = from {
        if request.date < start {
            return false;
        }
    }
    if let Some(end) = to {
        if request.date > end {
            return false;
        }
    }
    true
}
