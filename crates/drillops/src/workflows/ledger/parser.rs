use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::mapping;
use super::normalizer::{clean_text, normalize_key, parse_metric};
use super::LedgerImportError;
use crate::workflows::dispatch::domain::{
    Coordinates, EmployeeId, ServiceStatus, VehicleId,
};

/// A ledger row after parsing and normalization, ready to become a
/// service request.
#[derive(Debug)]
pub(crate) struct LedgerRecord {
    pub(crate) request_id: Option<String>,
    pub(crate) customer_name: String,
    pub(crate) phone: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) position: Option<Coordinates>,
    pub(crate) date: NaiveDate,
    pub(crate) job_type: Option<String>,
    pub(crate) vehicle: Option<VehicleId>,
    pub(crate) status: ServiceStatus,
    pub(crate) drilling_depth: Option<f64>,
    pub(crate) drilling_rate: Option<f64>,
    pub(crate) casing_depth: Option<f64>,
    pub(crate) casing_rate: Option<f64>,
    pub(crate) casing_type: Option<String>,
    pub(crate) casing10_depth: Option<f64>,
    pub(crate) casing10_rate: Option<f64>,
    pub(crate) created_by: Option<EmployeeId>,
    pub(crate) last_edited_by: Option<EmployeeId>,
    pub(crate) last_edited_at: Option<DateTime<Utc>>,
}

pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<Vec<LedgerRecord>, LedgerImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<LedgerRow>().enumerate() {
        let row = row?;
        records.push(row.into_record(index + 1)?);
    }

    Ok(records)
}

// Header names match the legacy ledger export verbatim. The export also
// carries a "Total Cost" column; it is not read — totals are re-derived
// from the line items.
#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Request ID", default, deserialize_with = "empty_string_as_none")]
    request_id: Option<String>,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(rename = "Latitude", default, deserialize_with = "empty_string_as_none")]
    latitude: Option<String>,
    #[serde(rename = "Longitude", default, deserialize_with = "empty_string_as_none")]
    longitude: Option<String>,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Job Type", default, deserialize_with = "empty_string_as_none")]
    job_type: Option<String>,
    #[serde(rename = "Vehicle", default, deserialize_with = "empty_string_as_none")]
    vehicle: Option<String>,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Drilling Depth", default, deserialize_with = "empty_string_as_none")]
    drilling_depth: Option<String>,
    #[serde(rename = "Drilling Rate", default, deserialize_with = "empty_string_as_none")]
    drilling_rate: Option<String>,
    #[serde(rename = "Casing Depth", default, deserialize_with = "empty_string_as_none")]
    casing_depth: Option<String>,
    #[serde(rename = "Casing Rate", default, deserialize_with = "empty_string_as_none")]
    casing_rate: Option<String>,
    #[serde(rename = "Casing Type", default, deserialize_with = "empty_string_as_none")]
    casing_type: Option<String>,
    #[serde(rename = "10in Casing Depth", default, deserialize_with = "empty_string_as_none")]
    casing10_depth: Option<String>,
    #[serde(rename = "10in Casing Rate", default, deserialize_with = "empty_string_as_none")]
    casing10_rate: Option<String>,
    #[serde(rename = "Created By", default, deserialize_with = "empty_string_as_none")]
    created_by: Option<String>,
    #[serde(rename = "Last Edited By", default, deserialize_with = "empty_string_as_none")]
    last_edited_by: Option<String>,
    #[serde(rename = "Last Edited At", default, deserialize_with = "empty_string_as_none")]
    last_edited_at: Option<String>,
}

impl LedgerRow {
    fn into_record(self, record: usize) -> Result<LedgerRecord, LedgerImportError> {
        let row_error = |message: String| LedgerImportError::Row { record, message };

        let customer_name = clean_text(&self.customer_name);
        if customer_name.is_empty() {
            return Err(row_error("customer name is empty".to_string()));
        }

        let date = parse_date(&self.date)
            .ok_or_else(|| row_error(format!("'{}' is not a recognized date", self.date)))?;

        let status = mapping::status_for_normalized(&normalize_key(&self.status))
            .ok_or_else(|| row_error(format!("unrecognized status '{}'", self.status)))?;

        let position = match (self.latitude.as_deref(), self.longitude.as_deref()) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude: parse_coordinate(latitude)
                    .map_err(|message| row_error(format!("latitude {message}")))?,
                longitude: parse_coordinate(longitude)
                    .map_err(|message| row_error(format!("longitude {message}")))?,
            }),
            (None, None) => None,
            _ => {
                return Err(row_error(
                    "latitude and longitude must be present together".to_string(),
                ))
            }
        };

        let metric = |field: &'static str, value: Option<&str>| -> Result<Option<f64>, LedgerImportError> {
            value
                .map(|raw| {
                    parse_metric(raw)
                        .map_err(|message| LedgerImportError::Row {
                            record,
                            message: format!("{field} {message}"),
                        })
                })
                .transpose()
        };

        Ok(LedgerRecord {
            request_id: self.request_id.as_deref().map(clean_text),
            customer_name,
            phone: self.phone.as_deref().map(clean_text),
            location: self.location.as_deref().map(clean_text),
            position,
            date,
            job_type: self.job_type.as_deref().map(clean_text),
            vehicle: self
                .vehicle
                .as_deref()
                .map(|name| VehicleId::from_display_name(&clean_text(name))),
            status,
            drilling_depth: metric("drilling depth", self.drilling_depth.as_deref())?,
            drilling_rate: metric("drilling rate", self.drilling_rate.as_deref())?,
            casing_depth: metric("casing depth", self.casing_depth.as_deref())?,
            casing_rate: metric("casing rate", self.casing_rate.as_deref())?,
            casing_type: self.casing_type.as_deref().map(clean_text),
            casing10_depth: metric("10in casing depth", self.casing10_depth.as_deref())?,
            casing10_rate: metric("10in casing rate", self.casing10_rate.as_deref())?,
            created_by: self
                .created_by
                .as_deref()
                .map(|name| EmployeeId::from_display_name(&clean_text(name))),
            last_edited_by: self
                .last_edited_by
                .as_deref()
                .map(|name| EmployeeId::from_display_name(&clean_text(name))),
            // Edit timestamps in the old exports are best-effort; an
            // unreadable one degrades to "never edited" rather than
            // failing the row.
            last_edited_at: self.last_edited_at.as_deref().and_then(parse_datetime),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_coordinate(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a coordinate", value.trim()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_datetime(value)
}
