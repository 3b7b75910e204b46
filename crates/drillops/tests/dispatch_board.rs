use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, TimeZone, Utc};
use drillops::workflows::dispatch::{
    DispatchService, Employee, FilterCriteria, ReferenceData, RequestDraft, RequestId,
    RequestPatch, RequestStore, ServiceRequest, ServiceStatus, StoreError, Toast, ToastError,
    ToastKind, ToastSink, User, UserRole, Vehicle, VehicleId,
};

#[derive(Default, Clone)]
struct MemoryStore {
    records: Arc<Mutex<HashMap<RequestId, ServiceRequest>>>,
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

#[derive(Default, Clone)]
struct MemoryToasts {
    events: Arc<Mutex<Vec<Toast>>>,
}

impl MemoryToasts {
    fn events(&self) -> Vec<Toast> {
        self.events.lock().expect("toast mutex poisoned").clone()
    }
}

impl ToastSink for MemoryToasts {
    fn notify(&self, toast: Toast) -> Result<(), ToastError> {
        self.events
            .lock()
            .expect("toast mutex poisoned")
            .push(toast);
        Ok(())
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn references() -> ReferenceData {
    ReferenceData {
        products: Vec::new(),
        vehicles: vec![Vehicle::new("Rig 1"), Vehicle::new("Rig 2")],
        employees: vec![Employee::new("Asha Verma"), Employee::new("Meera Nair")],
    }
}

fn draft(customer: &str, status: ServiceStatus, on: NaiveDate) -> RequestDraft {
    RequestDraft {
        customer_name: customer.to_string(),
        phone: "+91 98450 22222".to_string(),
        location: "Kanakapura Road".to_string(),
        position: None,
        date: on,
        job_type: "New borewell".to_string(),
        vehicle: Some(VehicleId::from_display_name("Rig 1")),
        status,
        drilling_depth: Some(200.0),
        drilling_rate: Some(45.0),
        casing_depth: Some(40.0),
        casing_rate: Some(110.0),
        casing_type: Some("PVC".to_string()),
        casing10_depth: None,
        casing10_rate: None,
    }
}

#[test]
fn submitted_requests_flow_through_the_board_with_derived_totals() {
    let store = Arc::new(MemoryStore::default());
    let toasts = Arc::new(MemoryToasts::default());
    let service = DispatchService::new(store, toasts.clone());

    let staff = User::new("Asha Verma", UserRole::Staff);
    let admin = User::new("Meera Nair", UserRole::Admin);

    let pending_old = service
        .submit(draft("Sharma Borewell Works", ServiceStatus::Pending, date(2024, 1, 5)), &staff)
        .expect("submit succeeds");
    service
        .submit(draft("Patel Estates", ServiceStatus::Pending, date(2024, 1, 10)), &staff)
        .expect("submit succeeds");
    service
        .submit(draft("Green Valley Farms", ServiceStatus::Completed, date(2024, 2, 1)), &admin)
        .expect("submit succeeds");

    let board = service
        .board(&admin, &FilterCriteria::default(), &references())
        .expect("board builds");

    // Pending oldest-first, then the completed job.
    assert_eq!(board.rows.len(), 3);
    assert_eq!(board.rows[0].customer_name, "Sharma Borewell Works");
    assert_eq!(board.rows[1].customer_name, "Patel Estates");
    assert_eq!(board.rows[2].customer_name, "Green Valley Farms");

    let expected_total = 200.0 * 45.0 + 40.0 * 110.0;
    assert!(board
        .rows
        .iter()
        .all(|row| row.total_cost == expected_total));
    assert_eq!(board.summary.total_billed, expected_total * 3.0);
    assert_eq!(board.rows[0].vehicle_label.as_deref(), Some("Rig 1"));

    // Staff only see their own submissions.
    let staff_board = service
        .board(&staff, &FilterCriteria::default(), &references())
        .expect("board builds");
    assert_eq!(staff_board.rows.len(), 2);
    assert!(staff_board
        .rows
        .iter()
        .all(|row| row.owner_label.as_deref() == Some("Asha Verma")));

    // An edit restamps the record and the board reflects it.
    let now = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    let updated = service
        .update(
            &pending_old.id,
            RequestPatch {
                status: Some(ServiceStatus::InProgress),
                drilling_rate: Some(50.0),
                ..RequestPatch::default()
            },
            &admin,
            now,
        )
        .expect("update succeeds");

    assert_eq!(updated.total_cost, 200.0 * 50.0 + 40.0 * 110.0);
    assert_eq!(updated.created_by, Some(staff.id.clone()));
    assert_eq!(updated.last_edited_by, Some(admin.id.clone()));

    let board = service
        .board(&admin, &FilterCriteria::default(), &references())
        .expect("board builds");
    assert_eq!(board.rows[0].status, ServiceStatus::Pending);
    assert_eq!(board.rows[1].status, ServiceStatus::InProgress);

    let success_toasts = toasts
        .events()
        .iter()
        .filter(|toast| toast.kind == ToastKind::Success)
        .count();
    assert_eq!(success_toasts, 4);
}

#[test]
fn deleting_a_request_removes_it_from_the_board() {
    let store = Arc::new(MemoryStore::default());
    let toasts = Arc::new(MemoryToasts::default());
    let service = DispatchService::new(store, toasts);

    let admin = User::new("Meera Nair", UserRole::Admin);
    let submitted = service
        .submit(draft("Sharma Borewell Works", ServiceStatus::Pending, date(2024, 1, 5)), &admin)
        .expect("submit succeeds");

    service.delete(&submitted.id, &admin).expect("delete succeeds");

    let board = service
        .board(&admin, &FilterCriteria::default(), &references())
        .expect("board builds");
    assert!(board.rows.is_empty());
    assert_eq!(board.summary.request_count, 0);
}
