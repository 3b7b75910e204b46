use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::billing::{self, CostComponent};
use super::domain::{
    Coordinates, EmployeeId, ReferenceData, RequestId, ServiceRequest, ServiceStatus, VehicleId,
};
use super::ordering;

/// One board row, with ids resolved to display names where the
/// reference data knows them (dangling ids render as-is).
#[derive(Debug, Clone, Serialize)]
pub struct RequestRowView {
    pub id: RequestId,
    pub customer_name: String,
    pub phone: String,
    pub location: String,
    pub date: NaiveDate,
    pub job_type: String,
    pub status: ServiceStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_label: Option<String>,
    pub total_cost: f64,
    pub cost_components: Vec<CostComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<EmployeeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Coordinates>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: ServiceStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSummary {
    pub request_count: usize,
    pub status_counts: Vec<StatusCountEntry>,
    pub total_billed: f64,
}

/// Filtered, ordered board ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub rows: Vec<RequestRowView>,
    pub summary: BoardSummary,
}

pub(crate) fn row_view(request: &ServiceRequest, refs: &ReferenceData) -> RequestRowView {
    let vehicle_label = request.vehicle.as_ref().map(|id| {
        refs.vehicle_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.0.clone())
    });
    let owner_label = request.attributed_to().map(|id| {
        refs.employee_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.0.clone())
    });

    RequestRowView {
        id: request.id.clone(),
        customer_name: request.customer_name.clone(),
        phone: request.phone.clone(),
        location: request.location.clone(),
        date: request.date,
        job_type: request.job_type.clone(),
        status: request.status,
        status_label: request.status.label(),
        vehicle: request.vehicle.clone(),
        vehicle_label,
        total_cost: request.total_cost,
        cost_components: billing::cost_breakdown(request),
        owner_label,
        last_edited_by: request.last_edited_by.clone(),
        last_edited_at: request.last_edited_at,
        position: request.position,
    }
}

/// Project an already filtered and ordered collection into the board
/// view. Status counts cover every known status (zero included) in
/// priority order so the summary strip renders a fixed set of tiles.
pub(crate) fn board_view(requests: &[ServiceRequest], refs: &ReferenceData) -> BoardView {
    let rows: Vec<RequestRowView> = requests
        .iter()
        .map(|request| row_view(request, refs))
        .collect();

    let mut status_counts: Vec<StatusCountEntry> = ServiceStatus::ordered()
        .into_iter()
        .map(|status| StatusCountEntry {
            status,
            status_label: status.label(),
            count: requests
                .iter()
                .filter(|request| request.status == status)
                .count(),
        })
        .collect();
    status_counts.sort_by_key(|entry| ordering::status_priority(entry.status));

    let total_billed = requests.iter().map(|request| request.total_cost).sum();

    BoardView {
        summary: BoardSummary {
            request_count: rows.len(),
            status_counts,
            total_billed,
        },
        rows,
    }
}
