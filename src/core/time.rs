//! Wall-clock helpers.

use chrono::{Local, NaiveDateTime};

/// Current local time as an ISO-8601 string without offset,
/// e.g. `2024-05-01T14:03:59.123456`.
pub fn local_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(14, 3, 59, 123_456)
            .unwrap();
        assert_eq!(format_timestamp(at), "2024-05-01T14:03:59.123456");
    }
}
