pub mod calendar;
pub mod day;
pub mod export;
pub mod import;
pub mod init;
pub mod stats;
pub mod tasks;
pub mod toggle;

use habit_core::{DateKey, HabitError};

/// Resolve an optional `--date` flag against the injected "today".
pub fn resolve_date(flag: Option<&str>, today: DateKey) -> Result<DateKey, HabitError> {
    flag.map_or(Ok(today), str::parse)
}

#[cfg(test)]
mod tests {
    use super::resolve_date;
    use habit_core::DateKey;

    #[test]
    fn defaults_to_today() {
        let today: DateKey = "2024-03-02".parse().expect("valid");
        assert_eq!(resolve_date(None, today).expect("ok"), today);
    }

    #[test]
    fn explicit_date_wins() {
        let today: DateKey = "2024-03-02".parse().expect("valid");
        let picked = resolve_date(Some("2024-01-15"), today).expect("ok");
        assert_eq!(picked.to_string(), "2024-01-15");
    }

    #[test]
    fn malformed_date_is_rejected() {
        let today: DateKey = "2024-03-02".parse().expect("valid");
        let err = resolve_date(Some("2024-3-2"), today).expect_err("must fail");
        assert_eq!(err.error_code(), "E2002");
    }
}
