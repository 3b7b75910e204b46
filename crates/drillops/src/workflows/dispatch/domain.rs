use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for service requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for vehicles in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub String);

impl VehicleId {
    /// Derive a stable id from a display name so legacy name-keyed data
    /// maps onto the same record every time.
    pub fn from_display_name(name: &str) -> Self {
        Self(slug(name))
    }
}

/// Identifier wrapper for employees and console users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn from_display_name(name: &str) -> Self {
        Self(slug(name))
    }
}

/// Identifier wrapper for catalog products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn from_display_name(name: &str) -> Self {
        Self(slug(name))
    }
}

fn slug(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}

/// Lifecycle state of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Pending,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Error raised when a status string cannot be recognized.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized service status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for ServiceStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseStatusError(value.trim().to_string())),
        }
    }
}

/// Geographic position supplied by callers and echoed back to map views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One performed or scheduled job for a customer.
///
/// `total_cost` is derived from the billable line items and is never
/// accepted from input; `created_by` is immutable once set. A record
/// without `created_by` is attributed to `last_edited_by` for ownership
/// filtering (legacy rows that only ever saw the edit path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub customer_name: String,
    pub phone: String,
    pub location: String,
    pub position: Option<Coordinates>,
    pub date: NaiveDate,
    pub job_type: String,
    pub vehicle: Option<VehicleId>,
    pub status: ServiceStatus,
    pub drilling_depth: Option<f64>,
    pub drilling_rate: Option<f64>,
    pub casing_depth: Option<f64>,
    pub casing_rate: Option<f64>,
    pub casing_type: Option<String>,
    pub casing10_depth: Option<f64>,
    pub casing10_rate: Option<f64>,
    pub total_cost: f64,
    pub created_by: Option<EmployeeId>,
    pub last_edited_by: Option<EmployeeId>,
    pub last_edited_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    /// The employee a request is attributed to for ownership filtering:
    /// the creator when recorded, otherwise the last editor.
    pub fn attributed_to(&self) -> Option<&EmployeeId> {
        self.created_by.as_ref().or(self.last_edited_by.as_ref())
    }
}

/// Caller-supplied fields for a new service request. Identity, audit
/// fields, and the derived total are assigned by the creation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDraft {
    pub customer_name: String,
    pub phone: String,
    pub location: String,
    pub position: Option<Coordinates>,
    pub date: NaiveDate,
    pub job_type: String,
    pub vehicle: Option<VehicleId>,
    pub status: ServiceStatus,
    pub drilling_depth: Option<f64>,
    pub drilling_rate: Option<f64>,
    pub casing_depth: Option<f64>,
    pub casing_rate: Option<f64>,
    pub casing_type: Option<String>,
    pub casing10_depth: Option<f64>,
    pub casing10_rate: Option<f64>,
}

/// Role attached to a console user; drives default visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
        }
    }
}

/// An authenticated console user. Users share the employee id space so
/// ownership filters compare like with like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EmployeeId,
    pub name: String,
    pub role: UserRole,
}

impl User {
    pub fn new(name: &str, role: UserRole) -> Self {
        Self {
            id: EmployeeId::from_display_name(name),
            name: name.to_string(),
            role,
        }
    }
}

/// Catalog product offered by the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

impl Product {
    pub fn new(name: &str) -> Self {
        Self {
            id: ProductId::from_display_name(name),
            name: name.to_string(),
        }
    }
}

/// Fleet vehicle referenced by service requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
}

impl Vehicle {
    pub fn new(name: &str) -> Self {
        Self {
            id: VehicleId::from_display_name(name),
            name: name.to_string(),
        }
    }
}

/// Field employee referenced by audit and ownership fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
}

impl Employee {
    pub fn new(name: &str) -> Self {
        Self {
            id: EmployeeId::from_display_name(name),
            name: name.to_string(),
        }
    }
}

/// Read-only reference collections supplied by the caller. Lookups are
/// weak: a dangling id is rendered as the raw id, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub products: Vec<Product>,
    pub vehicles: Vec<Vehicle>,
    pub employees: Vec<Employee>,
}

impl ReferenceData {
    pub fn vehicle_name(&self, id: &VehicleId) -> Option<&str> {
        self.vehicles
            .iter()
            .find(|vehicle| &vehicle.id == id)
            .map(|vehicle| vehicle.name.as_str())
    }

    pub fn employee_name(&self, id: &EmployeeId) -> Option<&str> {
        self.employees
            .iter()
            .find(|employee| &employee.id == id)
            .map(|employee| employee.name.as_str())
    }
}
