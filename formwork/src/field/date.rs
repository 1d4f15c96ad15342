//! Date value helpers.

/// Zero-pad the parts of a dash-separated date (`8-2-2013` becomes
/// `08-02-2013`).
///
/// Values that are already ten characters long are returned unchanged.
pub fn zero_pad_date(value: &str) -> String {
    if value.chars().count() == 10 {
        return value.to_string();
    }
    value
        .split('-')
        .map(|part| format!("{:0>2}", part))
        .collect::<Vec<_>>()
        .join("-")
}
