//! Форматирование дат из API (RFC 3339 / `YYYY-MM-DD`)

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// "2024-03-15T14:02:26Z" → "15 Mar 2024, 14:02". Нераспознанное возвращается как есть
pub fn format_timestamp(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }
    // sqlite CURRENT_TIMESTAMP: "2024-03-15 14:02:26"
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }
    value.to_string()
}

/// "2024-03-15" → "15 Mar 2024"
pub fn format_date(value: &str) -> String {
    let date_part = value.split('T').next().unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(d) => d.format("%d %b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-03-15T14:02:26.123Z"), "15 Mar 2024, 14:02");
        assert_eq!(format_timestamp("2024-12-31 23:59:59"), "31 Dec 2024, 23:59");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("1995-07-01"), "01 Jul 1995");
        assert_eq!(format_date("1995-07-01T00:00:00Z"), "01 Jul 1995");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some(" Lahore ")), "Lahore");
        assert_eq!(or_dash(Some("  ")), "—");
        assert_eq!(or_dash(None), "—");
    }
}
