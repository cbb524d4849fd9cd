//! Display formatting for money, dates and quantities.

use chrono::NaiveDate;

/// `S/ 14.00`, or `-` for a missing, zero or non-finite amount.
pub fn format_soles(amount: Option<f64>) -> String {
    match amount {
        Some(v) if v != 0.0 && v.is_finite() => format!("S/ {:.2}", v),
        _ => "-".to_string(),
    }
}

/// `1/3/2025` for `2025-03-01`. A date that does not parse is shown as
/// stored; a missing one as `-`.
pub fn format_date(date: Option<&str>) -> String {
    match date {
        None | Some("") => "-".to_string(),
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(d) => d.format("%-d/%-m/%Y").to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

pub fn format_quantity(quantity: Option<i64>) -> String {
    quantity.unwrap_or(0).to_string()
}

/// Empty text renders as `-`.
pub fn or_dash(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soles() {
        assert_eq!(format_soles(Some(14.0)), "S/ 14.00");
        assert_eq!(format_soles(Some(3.456)), "S/ 3.46");
        assert_eq!(format_soles(Some(0.0)), "-");
        assert_eq!(format_soles(None), "-");
        assert_eq!(format_soles(Some(f64::NAN)), "-");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date(Some("2025-03-01")), "1/3/2025");
        assert_eq!(format_date(Some("2024-12-31")), "31/12/2024");
        assert_eq!(format_date(Some("next week")), "next week");
        assert_eq!(format_date(Some("")), "-");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn quantities_and_text() {
        assert_eq!(format_quantity(Some(4)), "4");
        assert_eq!(format_quantity(None), "0");
        assert_eq!(or_dash(""), "-");
        assert_eq!(or_dash("Widget"), "Widget");
    }
}
