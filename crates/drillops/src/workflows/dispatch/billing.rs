use serde::{Deserialize, Serialize};

use super::domain::ServiceRequest;

/// Billable categories a request can carry metered line items for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillableCategory {
    Drilling,
    Casing,
    Casing10,
}

impl BillableCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Drilling, Self::Casing, Self::Casing10]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Drilling => "Drilling",
            Self::Casing => "Casing",
            Self::Casing10 => "10\" Casing",
        }
    }
}

/// One category's contribution to the derived total, kept around so
/// edit forms and reports can show where a number came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostComponent {
    pub category: BillableCategory,
    pub category_label: &'static str,
    pub depth: f64,
    pub rate: f64,
    pub amount: f64,
}

/// Per-category breakdown of a request's billable work. Absent depths
/// and rates contribute 0.0 rather than failing; a request with no line
/// items is a valid zero-cost request.
pub fn cost_breakdown(request: &ServiceRequest) -> Vec<CostComponent> {
    let lines = [
        (
            BillableCategory::Drilling,
            request.drilling_depth,
            request.drilling_rate,
        ),
        (
            BillableCategory::Casing,
            request.casing_depth,
            request.casing_rate,
        ),
        (
            BillableCategory::Casing10,
            request.casing10_depth,
            request.casing10_rate,
        ),
    ];

    lines
        .into_iter()
        .map(|(category, depth, rate)| {
            let depth = depth.unwrap_or(0.0);
            let rate = rate.unwrap_or(0.0);
            CostComponent {
                category,
                category_label: category.label(),
                depth,
                rate,
                amount: depth * rate,
            }
        })
        .collect()
}

/// Derived total for a request: the sum of depth x rate across all
/// billable categories. This is the only source of `total_cost`; the
/// field is never accepted from input.
pub fn total_cost(request: &ServiceRequest) -> f64 {
    cost_breakdown(request)
        .iter()
        .map(|component| component.amount)
        .sum()
}
