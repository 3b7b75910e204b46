//! Import of legacy ledger CSV exports into service-request records.
//!
//! The old spreadsheet ledger keyed everything by display name and
//! carried a hand-maintained total column; the importer normalizes the
//! names into ids and re-derives every total from the line items.

mod mapping;
mod normalizer;
mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::warn;

use crate::workflows::dispatch::billing;
use crate::workflows::dispatch::domain::{RequestId, ServiceRequest};

#[derive(Debug)]
pub enum LedgerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { record: usize, message: String },
}

impl std::fmt::Display for LedgerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerImportError::Io(err) => write!(f, "failed to read ledger export: {}", err),
            LedgerImportError::Csv(err) => write!(f, "invalid ledger CSV data: {}", err),
            LedgerImportError::Row { record, message } => {
                write!(f, "ledger record {} could not be imported: {}", record, message)
            }
        }
    }
}

impl std::error::Error for LedgerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerImportError::Io(err) => Some(err),
            LedgerImportError::Csv(err) => Some(err),
            LedgerImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for LedgerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LedgerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct LedgerImporter;

impl LedgerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ServiceRequest>, LedgerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a ledger export into service requests. Duplicate request
    /// ids keep the first occurrence; rows without an id get a stable
    /// position-derived one.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ServiceRequest>, LedgerImportError> {
        let mut seen: HashSet<RequestId> = HashSet::new();
        let mut requests = Vec::new();

        for (index, record) in parser::parse_records(reader)?.into_iter().enumerate() {
            let id = record
                .request_id
                .clone()
                .map(RequestId)
                .unwrap_or_else(|| RequestId(format!("ldg-{:04}", index + 1)));

            if !seen.insert(id.clone()) {
                warn!(id = %id, "duplicate ledger row skipped");
                continue;
            }

            let mut request = ServiceRequest {
                id,
                customer_name: record.customer_name,
                phone: record.phone.unwrap_or_default(),
                location: record.location.unwrap_or_default(),
                position: record.position,
                date: record.date,
                job_type: record.job_type.unwrap_or_default(),
                vehicle: record.vehicle,
                status: record.status,
                drilling_depth: record.drilling_depth,
                drilling_rate: record.drilling_rate,
                casing_depth: record.casing_depth,
                casing_rate: record.casing_rate,
                casing_type: record.casing_type,
                casing10_depth: record.casing10_depth,
                casing10_rate: record.casing10_rate,
                total_cost: 0.0,
                created_by: record.created_by,
                last_edited_by: record.last_edited_by,
                last_edited_at: record.last_edited_at,
            };
            request.total_cost = billing::total_cost(&request);

            requests.push(request);
        }

        Ok(requests)
    }
}
