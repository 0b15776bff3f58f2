/// Collapse whitespace, strip a BOM if present, and lower-case a task name so
/// hand-edited tracker exports still match the alias map.
pub(crate) fn normalize_name(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(raw: &str) -> String {
    normalize_name(raw)
}
