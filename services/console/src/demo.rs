use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::Args;
use drillops::config::AppConfig;
use drillops::error::AppError;
use drillops::workflows::dispatch::{
    cleared_criteria, BoardView, DispatchService, EmployeeId, FilterCriteria, MapProvider,
    RequestDraft, RequestPatch, ServiceStatus, User, UserRole, VehicleId,
};
use drillops::workflows::ledger::LedgerImporter;

use crate::infra::{
    self, CannedMapProvider, InMemoryRequestStore, PrintingToastSink,
};

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub(crate) enum RoleArg {
    #[default]
    Admin,
    Staff,
}

impl From<RoleArg> for UserRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => UserRole::Admin,
            RoleArg::Staff => UserRole::Staff,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct BoardArgs {
    /// Ledger CSV export to load (defaults to APP_LEDGER; sample data when absent)
    #[arg(long)]
    pub(crate) ledger: Option<PathBuf>,
    /// Acting user's display name
    #[arg(long, default_value = "Meera Nair")]
    pub(crate) acting_user: String,
    /// Acting user's role; staff are always scoped to their own requests
    #[arg(long, value_enum, default_value = "admin")]
    pub(crate) role: RoleArg,
    /// Free-text search over customer name and location
    #[arg(long, default_value = "")]
    pub(crate) search: String,
    /// Only show requests with this status
    #[arg(long, value_parser = infra::parse_status)]
    pub(crate) status: Option<ServiceStatus>,
    /// Only show requests assigned to this vehicle (display name)
    #[arg(long)]
    pub(crate) vehicle: Option<String>,
    /// Only show requests attributed to this employee (display name)
    #[arg(long)]
    pub(crate) employee: Option<String>,
    /// Earliest service date (YYYY-MM-DD), inclusive
    #[arg(long, value_parser = infra::parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Latest service date (YYYY-MM-DD), inclusive
    #[arg(long, value_parser = infra::parse_date)]
    pub(crate) to: Option<NaiveDate>,
    /// Show the per-category cost breakdown under each row
    #[arg(long)]
    pub(crate) costs: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Ledger CSV export to seed the demo board from
    #[arg(long)]
    pub(crate) ledger: Option<PathBuf>,
}

pub(crate) fn run_board(config: &AppConfig, args: BoardArgs) -> Result<(), AppError> {
    let BoardArgs {
        ledger,
        acting_user,
        role,
        search,
        status,
        vehicle,
        employee,
        from,
        to,
        costs,
    } = args;

    let (store, source) = load_store(ledger.or_else(|| config.console.ledger.clone()))?;
    let service = DispatchService::new(Arc::new(store), Arc::new(PrintingToastSink));

    let user = User::new(&acting_user, role.into());
    let criteria = FilterCriteria {
        search,
        status,
        vehicle: vehicle.as_deref().map(VehicleId::from_display_name),
        employee: employee.as_deref().map(EmployeeId::from_display_name),
        from,
        to,
    };

    let refs = infra::sample_reference_data();
    let board = service.board(&user, &criteria, &refs)?;

    println!("Service request board");
    println!("Acting user: {} ({})", user.name, user.role.label());
    println!("Data source: {source}");
    render_board(&board, config.console.board_limit, costs);

    Ok(())
}

pub(crate) fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { ledger } = args;

    println!("Field-service console demo");

    let (store, source) = load_store(ledger.or_else(|| config.console.ledger.clone()))?;
    let service = DispatchService::new(Arc::new(store), Arc::new(PrintingToastSink));
    let refs = infra::sample_reference_data();

    let admin = User::new("Meera Nair", UserRole::Admin);
    let staff = User::new("Asha Verma", UserRole::Staff);

    println!("Data source: {source}");
    println!(
        "Reference data: {} products, {} vehicles, {} employees",
        refs.products.len(),
        refs.vehicles.len(),
        refs.employees.len()
    );

    println!("\nBoard as {} ({})", admin.name, admin.role.label());
    let board = service.board(&admin, &FilterCriteria::default(), &refs)?;
    render_board(&board, config.console.board_limit, false);

    println!("\nBoard as {} ({})", staff.name, staff.role.label());
    let staff_board = service.board(&staff, &FilterCriteria::default(), &refs)?;
    render_board(&staff_board, config.console.board_limit, false);

    let cleared = cleared_criteria(&staff);
    match &cleared.employee {
        Some(id) => println!(
            "\nClearing filters keeps {} scoped to their own requests ({})",
            staff.name, id.0
        ),
        None => println!("\nClearing filters removes every predicate"),
    }

    println!("\nRecording a new request as {}", staff.name);
    let submitted = service.submit(demo_draft(), &staff)?;
    println!(
        "  {} for {} -> derived total {:.2}",
        submitted.id, submitted.customer_name, submitted.total_cost
    );

    println!("\nMarking {} in progress as {}", submitted.id, admin.name);
    let updated = service.update(
        &submitted.id,
        RequestPatch {
            status: Some(ServiceStatus::InProgress),
            ..RequestPatch::default()
        },
        &admin,
        Utc::now(),
    )?;
    println!(
        "  status {} | edited by {} | total {:.2}",
        updated.status.label(),
        updated
            .last_edited_by
            .as_ref()
            .map(|id| id.0.as_str())
            .unwrap_or("-"),
        updated.total_cost
    );
    match serde_json::to_string_pretty(&updated) {
        Ok(json) => println!("  Stored record payload:\n{json}"),
        Err(err) => println!("  Stored record payload unavailable: {err}"),
    }

    render_map_lookups(&service, &admin, &refs)?;

    Ok(())
}

fn load_store(ledger: Option<PathBuf>) -> Result<(InMemoryRequestStore, String), AppError> {
    match ledger {
        Some(path) => {
            let requests = LedgerImporter::from_path(&path)?;
            let source = format!("ledger export {}", path.display());
            Ok((InMemoryRequestStore::seeded(requests), source))
        }
        None => Ok((
            InMemoryRequestStore::seeded(infra::sample_requests()),
            "sample data".to_string(),
        )),
    }
}

fn render_board(board: &BoardView, limit: Option<usize>, costs: bool) {
    println!(
        "{} request(s) | billed total {:.2}",
        board.summary.request_count, board.summary.total_billed
    );

    println!("Status summary");
    for entry in &board.summary.status_counts {
        println!("- {}: {}", entry.status_label, entry.count);
    }

    if board.rows.is_empty() {
        println!("No requests match the current filters");
        return;
    }

    let shown = limit.unwrap_or(board.rows.len()).min(board.rows.len());
    println!("Requests");
    for row in board.rows.iter().take(shown) {
        let vehicle = row.vehicle_label.as_deref().unwrap_or("-");
        let owner = row.owner_label.as_deref().unwrap_or("-");
        println!(
            "- {} | {} | {} | {} | {} | vehicle {} | total {:.2} | recorded by {}",
            row.id,
            row.customer_name,
            row.location,
            row.date,
            row.status_label,
            vehicle,
            row.total_cost,
            owner
        );

        if costs {
            for component in &row.cost_components {
                if component.amount > 0.0 {
                    println!(
                        "    {}: {} x {:.2} = {:.2}",
                        component.category_label,
                        component.depth,
                        component.rate,
                        component.amount
                    );
                }
            }
        }
    }

    if shown < board.rows.len() {
        println!("... {} more not shown", board.rows.len() - shown);
    }
}

fn render_map_lookups(
    service: &DispatchService<InMemoryRequestStore, PrintingToastSink>,
    user: &User,
    refs: &drillops::workflows::dispatch::ReferenceData,
) -> Result<(), AppError> {
    let provider = CannedMapProvider::default();
    let board = service.board(user, &FilterCriteria::default(), refs)?;

    let positioned: Vec<_> = board
        .rows
        .iter()
        .filter_map(|row| row.position.map(|position| (row, position)))
        .collect();

    if positioned.is_empty() {
        println!("\nMap markers: no requests carry coordinates");
        return Ok(());
    }

    let center = positioned[0].1;
    let map = match provider.create_map(center) {
        Ok(map) => map,
        Err(err) => {
            println!("\nMap view unavailable: {err}");
            return Ok(());
        }
    };

    println!("\nMap markers ({})", map.0);
    for (row, position) in positioned {
        let address = provider
            .reverse_geocode(position)
            .ok()
            .flatten()
            .and_then(|place| place.address)
            .unwrap_or_else(|| format!("{:.4}, {:.4}", position.latitude, position.longitude));
        match provider.place_marker(&map, position) {
            Ok(marker) => println!("- {} -> {} ({})", row.id, address, marker.0),
            Err(err) => println!("- {} -> {} (marker failed: {err})", row.id, address),
        }
    }

    Ok(())
}

fn demo_draft() -> RequestDraft {
    RequestDraft {
        customer_name: "Kaveri Farms".to_string(),
        phone: "+91 98450 33333".to_string(),
        location: "Srirangapatna Road".to_string(),
        position: None,
        date: Utc::now().date_naive(),
        job_type: "Deepening".to_string(),
        vehicle: Some(VehicleId::from_display_name("Rig 1")),
        status: ServiceStatus::Pending,
        drilling_depth: Some(120.0),
        drilling_rate: Some(55.0),
        casing_depth: Some(30.0),
        casing_rate: Some(115.0),
        casing_type: Some("PVC".to_string()),
        casing10_depth: None,
        casing10_rate: None,
    }
}
