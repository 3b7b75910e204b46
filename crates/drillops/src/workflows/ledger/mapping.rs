use std::collections::HashMap;
use std::sync::OnceLock;

use crate::workflows::dispatch::domain::ServiceStatus;

static STATUS_ALIAS_MAP: OnceLock<HashMap<&'static str, ServiceStatus>> = OnceLock::new();

/// Resolve a normalized ledger status cell to a service status. The
/// ledger predates the closed status set, so the table carries every
/// spelling the old exports used.
pub(crate) fn status_for_normalized(normalized: &str) -> Option<ServiceStatus> {
    status_alias_map().get(normalized).copied()
}

fn status_alias_map() -> &'static HashMap<&'static str, ServiceStatus> {
    STATUS_ALIAS_MAP.get_or_init(|| {
        const ALIASES: &[(&str, ServiceStatus)] = &[
            ("pending", ServiceStatus::Pending),
            ("open", ServiceStatus::Pending),
            ("new", ServiceStatus::Pending),
            ("scheduled", ServiceStatus::Pending),
            ("in progress", ServiceStatus::InProgress),
            ("in-progress", ServiceStatus::InProgress),
            ("in_progress", ServiceStatus::InProgress),
            ("ongoing", ServiceStatus::InProgress),
            ("started", ServiceStatus::InProgress),
            ("completed", ServiceStatus::Completed),
            ("complete", ServiceStatus::Completed),
            ("done", ServiceStatus::Completed),
            ("closed", ServiceStatus::Completed),
            ("cancelled", ServiceStatus::Cancelled),
            ("canceled", ServiceStatus::Cancelled),
            ("called off", ServiceStatus::Cancelled),
        ];

        ALIASES.iter().copied().collect()
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(value: &str) -> Option<ServiceStatus> {
    status_for_normalized(&super::normalizer::normalize_key(value))
}
