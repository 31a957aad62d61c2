use chrono::{DateTime, Local};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Local wall-clock timestamp used for the `run_date` field of run metadata.
pub fn format_run_date(dt: &DateTime<Local>) -> String {
    dt.format(FORMAT).to_string()
}

/// Parse a comma separated list, trimming items and dropping empty ones.
pub fn split_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_run_date() {
        let dt = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(format_run_date(&dt), "2024-03-05 14:07:09.000000");
    }

    #[test]
    fn test_split_comma_list() {
        assert_eq!(
            split_comma_list(" Never, Rarely,,Sometimes ,"),
            vec!["Never", "Rarely", "Sometimes"]
        );
        assert!(split_comma_list("  ").is_empty());
    }
}
