use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::json;

use crate::workflows::dispatch::domain::{
    Coordinates, Employee, EmployeeId, Product, ReferenceData, RequestDraft, RequestId,
    ServiceRequest, ServiceStatus, User, UserRole, Vehicle, VehicleId,
};
use crate::workflows::dispatch::geo::{
    MapHandle, MapProvider, MapProviderError, MarkerHandle, PlaceResult,
};
use crate::workflows::dispatch::repository::{
    RequestStore, StoreError, Toast, ToastError, ToastSink,
};
use crate::workflows::dispatch::service::DispatchService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn timestamp(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Baseline request owned by Asha; tests adjust fields as needed.
pub(super) fn request(id: &str, status: ServiceStatus, date: NaiveDate) -> ServiceRequest {
    ServiceRequest {
        id: RequestId(id.to_string()),
        customer_name: "Sharma Borewell Works".to_string(),
        phone: "+91 98450 00000".to_string(),
        location: "Hosur Road, Bengaluru".to_string(),
        position: None,
        date,
        job_type: "New borewell".to_string(),
        vehicle: None,
        status,
        drilling_depth: None,
        drilling_rate: None,
        casing_depth: None,
        casing_rate: None,
        casing_type: None,
        casing10_depth: None,
        casing10_rate: None,
        total_cost: 0.0,
        created_by: Some(EmployeeId::from_display_name("Asha Verma")),
        last_edited_by: None,
        last_edited_at: None,
    }
}

pub(super) fn draft(customer_name: &str, status: ServiceStatus, date: NaiveDate) -> RequestDraft {
    RequestDraft {
        customer_name: customer_name.to_string(),
        phone: "+91 98450 11111".to_string(),
        location: "Mysuru Road".to_string(),
        position: None,
        date,
        job_type: "Deepening".to_string(),
        vehicle: Some(VehicleId::from_display_name("Rig 1")),
        status,
        drilling_depth: Some(80.0),
        drilling_rate: Some(55.0),
        casing_depth: None,
        casing_rate: None,
        casing_type: None,
        casing10_depth: None,
        casing10_rate: None,
    }
}

pub(super) fn admin() -> User {
    User::new("Meera Nair", UserRole::Admin)
}

pub(super) fn staff() -> User {
    User::new("Asha Verma", UserRole::Staff)
}

pub(super) fn references() -> ReferenceData {
    ReferenceData {
        products: vec![
            Product::new("6\" casing pipe"),
            Product::new("Submersible pump"),
        ],
        vehicles: vec![Vehicle::new("Rig 1"), Vehicle::new("Rig 2")],
        employees: vec![
            Employee::new("Asha Verma"),
            Employee::new("Ravi Kumar"),
            Employee::new("Meera Nair"),
        ],
    }
}

pub(super) fn build_service() -> (
    DispatchService<MemoryStore, RecordingToasts>,
    Arc<MemoryStore>,
    Arc<RecordingToasts>,
) {
    let store = Arc::new(MemoryStore::default());
    let toasts = Arc::new(RecordingToasts::default());
    let service = DispatchService::new(store.clone(), toasts.clone());
    (service, store, toasts)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<RequestId, ServiceRequest>>>,
}

impl MemoryStore {
    pub(super) fn seed(&self, requests: Vec<ServiceRequest>) {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        for request in requests {
            guard.insert(request.id.clone(), request);
        }
    }
}

impl RequestStore for MemoryStore {
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

pub(super) struct UnavailableStore;

impl RequestStore for UnavailableStore {
    fn insert(&self, _record: ServiceRequest) -> Result<ServiceRequest, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: ServiceRequest) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &RequestId) -> Result<Option<ServiceRequest>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn delete(&self, _id: &RequestId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn all(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingToasts {
    events: Arc<Mutex<Vec<Toast>>>,
}

impl RecordingToasts {
    pub(super) fn events(&self) -> Vec<Toast> {
        self.events.lock().expect("toast mutex poisoned").clone()
    }
}

impl ToastSink for RecordingToasts {
    fn notify(&self, toast: Toast) -> Result<(), ToastError> {
        self.events
            .lock()
            .expect("toast mutex poisoned")
            .push(toast);
        Ok(())
    }
}

/// Map provider double: answers from a fixed coordinate table the way a
/// real SDK would answer from its index.
pub(super) struct ScriptedMapProvider {
    places: Vec<(Coordinates, &'static str)>,
}

impl ScriptedMapProvider {
    pub(super) fn with_known_places() -> Self {
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
                        latitude: 12.3052,
                        longitude: 76.6552,
                    },
                    "Mysuru Palace Road",
                ),
            ],
        }
    }
}

impl MapProvider for ScriptedMapProvider {
    fn create_map(&self, center: Coordinates) -> Result<MapHandle, MapProviderError> {
        Ok(MapHandle(format!(
            "map@{:.4},{:.4}",
            center.latitude, center.longitude
        )))
    }

    fn place_marker(
        &self,
        map: &MapHandle,
        position: Coordinates,
    ) -> Result<MarkerHandle, MapProviderError> {
        Ok(MarkerHandle(format!(
            "{}#{:.4},{:.4}",
            map.0, position.latitude, position.longitude
        )))
    }

    fn search(&self, query: &str) -> Result<Vec<PlaceResult>, MapProviderError> {
        let needle = query.to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|(_, address)| address.to_lowercase().contains(&needle))
            .map(|(position, address)| PlaceResult {
                address: Some((*address).to_string()),
                position: Some(*position),
                raw: json!({ "source": "scripted" }),
            })
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
                (known.latitude - position.latitude).abs() < 1e-6
                    && (known.longitude - position.longitude).abs() < 1e-6
            })
            .map(|(known, address)| PlaceResult {
                address: Some((*address).to_string()),
                position: Some(*known),
                raw: json!({ "source": "scripted" }),
            }))
    }
}
