/// Canonical form of a symbol or index name used as a lookup key.
pub fn normalize_key(text: &str) -> String {
    text.trim().to_uppercase()
}

pub fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or("-".to_string())
}
