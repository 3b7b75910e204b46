use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::billing;
use super::domain::{
    Coordinates, EmployeeId, RequestDraft, RequestId, ServiceRequest, ServiceStatus, User,
    UserRole, VehicleId,
};
use super::filter::FilterCriteria;

/// Default ownership predicate for a user: staff only see their own
/// requests, anything else starts unrestricted.
pub fn default_employee_filter(user: &User) -> Option<EmployeeId> {
    match user.role {
        UserRole::Staff => Some(user.id.clone()),
        UserRole::Admin => None,
    }
}

/// Criteria as the engine will actually apply them for `user`. For
/// staff the employee predicate is forced to the user's own id no
/// matter what the caller put there; the lock is a function of the
/// acting user, recomputed on every call, never session state.
pub fn scoped_criteria(criteria: &FilterCriteria, user: &User) -> FilterCriteria {
    let mut scoped = criteria.clone();
    if user.role == UserRole::Staff {
        scoped.employee = Some(user.id.clone());
    }
    scoped
}

/// The "clear filters" operation: everything back to defaults, except
/// that a staff user's ownership lock survives the reset.
pub fn cleared_criteria(user: &User) -> FilterCriteria {
    FilterCriteria {
        employee: default_employee_filter(user),
        ..FilterCriteria::default()
    }
}

/// Partial update for a service request. Fields left `None` keep their
/// current value. There is deliberately no id, no `created_by`, and no
/// `total_cost` here: identity and attribution are immutable, and the
/// total is always re-derived from the line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestPatch {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub position: Option<Coordinates>,
    pub date: Option<NaiveDate>,
    pub job_type: Option<String>,
    pub vehicle: Option<VehicleId>,
    pub status: Option<ServiceStatus>,
    pub drilling_depth: Option<f64>,
    pub drilling_rate: Option<f64>,
    pub casing_depth: Option<f64>,
    pub casing_rate: Option<f64>,
    pub casing_type: Option<String>,
    pub casing10_depth: Option<f64>,
    pub casing10_rate: Option<f64>,
}

/// Build a full record from a draft on the creation path. The creator
/// stamp is the acting user; edit stamps stay empty until the first
/// edit; the total is derived immediately.
pub fn new_request(draft: RequestDraft, id: RequestId, creator: &User) -> ServiceRequest {
    let mut record = ServiceRequest {
        id,
        customer_name: draft.customer_name,
        phone: draft.phone,
        location: draft.location,
        position: draft.position,
        date: draft.date,
        job_type: draft.job_type,
        vehicle: draft.vehicle,
        status: draft.status,
        drilling_depth: draft.drilling_depth,
        drilling_rate: draft.drilling_rate,
        casing_depth: draft.casing_depth,
        casing_rate: draft.casing_rate,
        casing_type: draft.casing_type,
        casing10_depth: draft.casing10_depth,
        casing10_rate: draft.casing10_rate,
        total_cost: 0.0,
        created_by: Some(creator.id.clone()),
        last_edited_by: None,
        last_edited_at: None,
    };
    record.total_cost = billing::total_cost(&record);
    record
}

/// Merge `patch` onto `original` and stamp the audit trail: patch
/// fields win field by field, `created_by` is preserved untouched, the
/// edit stamp is set unconditionally (even when the editor is the
/// creator), and the total is recomputed from the merged line items.
pub fn apply_edit(
    original: &ServiceRequest,
    patch: RequestPatch,
    editor: &User,
    now: DateTime<Utc>,
) -> ServiceRequest {
    let mut updated = original.clone();

    if let Some(customer_name) = patch.customer_name {
        updated.customer_name = customer_name;
    }
    if let Some(phone) = patch.phone {
        updated.phone = phone;
    }
    if let Some(location) = patch.location {
        updated.location = location;
    }
    if let Some(position) = patch.position {
        updated.position = Some(position);
    }
    if let Some(date) = patch.date {
        updated.date = date;
    }
    if let Some(job_type) = patch.job_type {
        updated.job_type = job_type;
    }
    if let Some(vehicle) = patch.vehicle {
        updated.vehicle = Some(vehicle);
    }
    if let Some(status) = patch.status {
        updated.status = status;
    }
    if let Some(drilling_depth) = patch.drilling_depth {
        updated.drilling_depth = Some(drilling_depth);
    }
    if let Some(drilling_rate) = patch.drilling_rate {
        updated.drilling_rate = Some(drilling_rate);
    }
    if let Some(casing_depth) = patch.casing_depth {
        updated.casing_depth = Some(casing_depth);
    }
    if let Some(casing_rate) = patch.casing_rate {
        updated.casing_rate = Some(casing_rate);
    }
    if let Some(casing_type) = patch.casing_type {
        updated.casing_type = Some(casing_type);
    }
    if let Some(casing10_depth) = patch.casing10_depth {
        updated.casing10_depth = Some(casing10_depth);
    }
    if let Some(casing10_rate) = patch.casing10_rate {
        updated.casing10_rate = Some(casing10_rate);
    }

    updated.last_edited_by = Some(editor.id.clone());
    updated.last_edited_at = Some(now);
    updated.total_cost = billing::total_cost(&updated);

    updated
}
