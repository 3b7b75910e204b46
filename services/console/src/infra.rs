use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use drillops::workflows::dispatch::{
    total_cost, Coordinates, Employee, EmployeeId, MapHandle, MapProvider, MapProviderError,
    MarkerHandle, PlaceResult, Product, ReferenceData, RequestId, ServiceRequest, ServiceStatus,
    StoreError, RequestStore, Toast, ToastError, ToastSink, Vehicle, VehicleId,
};
use serde_json::json;

#[derive(Default, Clone)]
pub(crate) struct InMemoryRequestStore {
    records: Arc<Mutex<HashMap<RequestId, ServiceRequest>>>,
}

impl InMemoryRequestStore {
    pub(crate) fn seeded(requests: Vec<ServiceRequest>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("store mutex poisoned");
            for request in requests {
                guard.insert(request.id.clone(), request);
            }
        }
        store
    }
}

impl RequestStore for InMemoryRequestStore {
    fn insert(&self, record: ServiceRequest) -> Result<ServiceRequest, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ServiceRequest) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &RequestId) -> Result<Option<ServiceRequest>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &RequestId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn all(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut records: Vec<ServiceRequest> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(records)
    }
}

/// Toast sink for a terminal: outcomes print as they happen.
#[derive(Default)]
pub(crate) struct PrintingToastSink;

impl ToastSink for PrintingToastSink {
    fn notify(&self, toast: Toast) -> Result<(), ToastError> {
        println!("  [{}] {}", toast.kind.label(), toast.message);
        Ok(())
    }
}

/// Map collaborator backed by a canned place index, standing in for the
/// real SDK during demos. Handles are provider-opaque strings.
pub(crate) struct CannedMapProvider {
    places: Vec<(Coordinates, &'static str)>,
    sequence: AtomicU64,
}

impl Default for CannedMapProvider {
    fn default() -> Self {
        Self {
            places: vec![
                (
                    Coordinates {
                        latitude: 12.9716,
                        longitude: 77.5946,
                    },
                    "Majestic, Bengaluru",
                ),
                (
                    Coordinates {
                        latitude: 12.9308,
                        longitude: 77.5838,
                    },
                    "Jayanagar 4th Block, Bengaluru",
                ),
                (
                    Coordinates {
                        latitude: 12.3052,
                        longitude: 76.6552,
                    },
                    "Mysuru Palace Road",
                ),
            ],
            sequence: AtomicU64::new(1),
        }
    }
}

impl MapProvider for CannedMapProvider {
    fn create_map(&self, _center: Coordinates) -> Result<MapHandle, MapProviderError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        Ok(MapHandle(format!("map-{id}")))
    }

    fn place_marker(
        &self,
        map: &MapHandle,
        _position: Coordinates,
    ) -> Result<MarkerHandle, MapProviderError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        Ok(MarkerHandle(format!("{}/marker-{id}", map.0)))
    }

    fn search(&self, query: &str) -> Result<Vec<PlaceResult>, MapProviderError> {
        let needle = query.to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|(_, address)| address.to_lowercase().contains(&needle))
            .map(|(position, address)| place(*position, address))
            .collect())
    }

    fn reverse_geocode(
        &self,
        position: Coordinates,
    ) -> Result<Option<PlaceResult>, MapProviderError> {
        Ok(self
            .places
            .iter()
            .find(|(known, _)| {
                (known.latitude - position.latitude).abs() < 1e-4
                    && (known.longitude - position.longitude).abs() < 1e-4
            })
            .map(|(known, address)| place(*known, address)))
    }
}

fn place(position: Coordinates, address: &str) -> PlaceResult {
    PlaceResult {
        address: Some(address.to_string()),
        position: Some(position),
        raw: json!({ "provider": "canned", "confidence": 1.0 }),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_status(raw: &str) -> Result<ServiceStatus, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn sample_reference_data() -> ReferenceData {
    ReferenceData {
        products: vec![
            Product::new("6\" casing pipe"),
            Product::new("10\" casing pipe"),
            Product::new("Submersible pump"),
        ],
        vehicles: vec![
            Vehicle::new("Rig 1"),
            Vehicle::new("Rig 2"),
            Vehicle::new("Support Lorry"),
        ],
        employees: vec![
            Employee::new("Asha Verma"),
            Employee::new("Ravi Kumar"),
            Employee::new("Meera Nair"),
        ],
    }
}

/// Board records used when no ledger export is supplied. Mirrors a
/// small but realistic week of work: mixed statuses, owners, and
/// billing shapes.
pub(crate) fn sample_requests() -> Vec<ServiceRequest> {
    let mut requests = vec![
        sample_request(
            "sr-001",
            "Sharma Borewell Works",
            "Hosur Road, Bengaluru",
            Some(Coordinates {
                latitude: 12.9716,
                longitude: 77.5946,
            }),
            date(2024, 1, 5),
            ServiceStatus::Pending,
            Some("Rig 1"),
            Some((100.0, 50.0)),
            None,
            "Asha Verma",
        ),
        sample_request(
            "sr-002",
            "Patel Estates",
            "Ring Road, Mysuru",
            Some(Coordinates {
                latitude: 12.3052,
                longitude: 76.6552,
            }),
            date(2024, 1, 10),
            ServiceStatus::Pending,
            Some("Rig 2"),
            Some((250.0, 45.0)),
            Some((60.0, 120.0)),
            "Ravi Kumar",
        ),
        sample_request(
            "sr-003",
            "Green Valley Farms",
            "Kanakapura Road",
            None,
            date(2024, 1, 20),
            ServiceStatus::InProgress,
            Some("Rig 1"),
            Some((300.0, 48.0)),
            Some((80.0, 110.0)),
            "Asha Verma",
        ),
        sample_request(
            "sr-004",
            "Lakshmi Nursery",
            "Jayanagar, Bengaluru",
            Some(Coordinates {
                latitude: 12.9308,
                longitude: 77.5838,
            }),
            date(2024, 2, 1),
            ServiceStatus::Completed,
            Some("Rig 2"),
            Some((180.0, 52.0)),
            None,
            "Ravi Kumar",
        ),
        sample_request(
            "sr-005",
            "Anand Dairy",
            "Tumakuru Road",
            None,
            date(2024, 1, 25),
            ServiceStatus::Cancelled,
            None,
            None,
            None,
            "Meera Nair",
        ),
    ];

    for request in &mut requests {
        request.total_cost = total_cost(request);
    }
    requests
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid sample date")
}

fn sample_request(
    id: &str,
    customer: &str,
    location: &str,
    position: Option<Coordinates>,
    on: NaiveDate,
    status: ServiceStatus,
    vehicle: Option<&str>,
    drilling: Option<(f64, f64)>,
    casing: Option<(f64, f64)>,
    created_by: &str,
) -> ServiceRequest {
    ServiceRequest {
        id: RequestId(id.to_string()),
        customer_name: customer.to_string(),
        phone: "+91 98450 00000".to_string(),
        location: location.to_string(),
        position,
        date: on,
        job_type: "New borewell".to_string(),
        vehicle: vehicle.map(VehicleId::from_display_name),
        status,
        drilling_depth: drilling.map(|(depth, _)| depth),
        drilling_rate: drilling.map(|(_, rate)| rate),
        casing_depth: casing.map(|(depth, _)| depth),
        casing_rate: casing.map(|(_, rate)| rate),
        casing_type: casing.map(|_| "PVC".to_string()),
        casing10_depth: None,
        casing10_rate: None,
        total_cost: 0.0,
        created_by: Some(EmployeeId::from_display_name(created_by)),
        last_edited_by: None,
        last_edited_at: None,
    }
}
