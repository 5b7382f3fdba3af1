//! Flatten raw survey state into a `ResponseRecord`.

use super::entities::{ResponseRecord, SurveyData};
use crate::ports::Clock;

/// Build the record for a finished survey. Questions whose answer object has
/// no value are left out entirely. Pure: same inputs give the same record.
pub fn normalize(data: &SurveyData, user_id: &str, timestamp: impl Into<String>) -> ResponseRecord {
    let answers = data
        .iter()
        .filter_map(|(question, answer)| {
            answer
                .value
                .as_ref()
                .map(|value| (question.clone(), value.clone()))
        })
        .collect();
    ResponseRecord {
        timestamp: timestamp.into(),
        id: user_id.to_string(),
        answers,
    }
}

/// `normalize` stamped with the current time of `clock`.
pub fn normalize_now(data: &SurveyData, user_id: &str, clock: &dyn Clock) -> ResponseRecord {
    normalize(data, user_id, clock.now_iso8601())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawAnswer;

    struct FixedClock(&'static str);

    impl Clock for FixedClock {
        fn now_iso8601(&self) -> String {
            self.0.to_string()
        }
    }

    fn sample() -> SurveyData {
        let mut data = SurveyData::new();
        data.insert("q1".into(), RawAnswer::with_value("A. Retention-Focused"));
        data.insert("q2".into(), RawAnswer::with_value("B. Performance-Focused"));
        data.insert(
            "q3".into(),
            RawAnswer {
                label: Some("q3".into()),
                value: Some("B. No".into()),
            },
        );
        data.insert("q3_1".into(), RawAnswer::default());
        data.insert("q4".into(), RawAnswer::with_value("A. Yes"));
        data
    }

    #[test]
    fn test_normalize_flattens_values() {
        let record = normalize(&sample(), "Jane Doe", "2024-03-01T09:30:00.000000");
        assert_eq!(record.timestamp, "2024-03-01T09:30:00.000000");
        assert_eq!(record.id, "Jane Doe");
        assert_eq!(record.answer("q1"), Some("A. Retention-Focused"));
        assert_eq!(record.answer("q3"), Some("B. No"));
        assert_eq!(record.answers.len(), 4);
    }

    #[test]
    fn test_normalize_omits_questions_without_value() {
        let record = normalize(&sample(), "Jane Doe", "t");
        assert!(!record.answers.contains_key("q3_1"));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("q3_1").is_none());
    }

    #[test]
    fn test_normalize_keeps_empty_string_value() {
        let mut data = sample();
        data.insert("q3_1".into(), RawAnswer::with_value(""));
        let record = normalize(&data, "Jane Doe", "t");
        assert_eq!(record.answer("q3_1"), Some(""));
    }

    #[test]
    fn test_normalize_idempotent_with_fixed_clock() {
        let clock = FixedClock("2024-03-01T09:30:00.000000");
        let data = sample();
        let first = normalize_now(&data, "Jane Doe", &clock);
        let second = normalize_now(&data, "Jane Doe", &clock);
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_empty_survey() {
        let record = normalize(&SurveyData::new(), "Jane Doe", "t");
        assert!(record.answers.is_empty());
        assert_eq!(record.id, "Jane Doe");
    }
}
