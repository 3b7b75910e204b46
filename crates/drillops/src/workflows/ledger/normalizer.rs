/// Strip BOM/zero-width characters and collapse runs of whitespace.
pub(crate) fn clean_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lookup key for the status alias table.
pub(crate) fn normalize_key(value: &str) -> String {
    clean_text(value).to_ascii_lowercase()
}

/// Parse a metered value (depth or rate) from ledger text. Thousands
/// separators are tolerated; negative or non-finite values are not a
/// meaningful measurement and are rejected.
pub(crate) fn parse_metric(value: &str) -> Result<f64, String> {
    let cleaned = value.trim().replace(',', "");
    let parsed: f64 = cleaned
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;

    if !parsed.is_finite() || parsed < 0.0 {
        return Err(format!("'{}' is not a non-negative amount", value.trim()));
    }

    Ok(parsed)
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_key(value)
}
