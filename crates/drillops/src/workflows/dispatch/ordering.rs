use std::cmp::Ordering;

use super::domain::{ServiceRequest, ServiceStatus};

/// Explicit status-to-rank table; lower ranks sort first. Any status
/// missing from the table ranks [`UNRANKED_PRIORITY`].
const STATUS_PRIORITY: &[(ServiceStatus, u8)] = &[
    (ServiceStatus::Pending, 1),
    (ServiceStatus::InProgress, 2),
    (ServiceStatus::Completed, 3),
    (ServiceStatus::Cancelled, 4),
];

/// Rank applied to any status missing from the table.
pub const UNRANKED_PRIORITY: u8 = 99;

pub fn status_priority(status: ServiceStatus) -> u8 {
    STATUS_PRIORITY
        .iter()
        .find(|(candidate, _)| *candidate == status)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED_PRIORITY)
}

/// Total order over requests: status rank first, then chronology within
/// the rank. Pending jobs surface oldest-first (longest waiting gets
/// scheduled next); every other bucket surfaces most-recent-first.
pub fn compare(a: &ServiceRequest, b: &ServiceRequest) -> Ordering {
    let rank_a = status_priority(a.status);
    let rank_b = status_priority(b.status);

    match rank_a.cmp(&rank_b) {
        Ordering::Equal => {
            if a.status == ServiceStatus::Pending {
                a.date.cmp(&b.date)
            } else {
                b.date.cmp(&a.date)
            }
        }
        unequal => unequal,
    }
}

/// Sort in place. The underlying sort is stable, so records tied on
/// both keys keep their input order, and re-sorting is a no-op.
pub fn sort_requests(requests: &mut [ServiceRequest]) {
    requests.sort_by(compare);
}
