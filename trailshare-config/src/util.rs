/// Read `name`, treating unset and whitespace-only values alike.
pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn parse_u32_var(name: &str) -> Option<u32> {
    non_empty_var(name).and_then(|raw| raw.parse().ok())
}

/// Trim `value`, dropping it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
