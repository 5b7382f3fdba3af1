//! Implements Clock with the local wall clock.

use crate::ports::Clock;

/// Local time without offset, microsecond precision: `2024-03-01T09:30:00.123456`.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_iso8601(&self) -> String {
        chrono::Local::now()
            .naive_local()
            .format(ISO_FORMAT)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_parseable() {
        let ts = SystemClock.now_iso8601();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, ISO_FORMAT).is_ok());
        assert_eq!(ts.len(), "2024-03-01T09:30:00.123456".len());
    }
}
