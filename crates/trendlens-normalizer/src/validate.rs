//! Required-field and range checks on normalized records.

use trendlens_core::ContentRecord;

use crate::engagement::{MAX_ENGAGEMENT_SCORE, MAX_RECORD_VIRAL_SCORE};
use crate::error::ValidationFailure;

/// Checks that a record carries its identifying fields and that every
/// computed score is finite and in range.
///
/// # Errors
///
/// Returns [`ValidationFailure`] listing every problem found.
pub fn validate_record(record: &ContentRecord) -> Result<(), ValidationFailure> {
    let mut problems = Vec::new();

    if record.content_id.trim().is_empty() {
        problems.push("content_id is empty".to_string());
    } else {
        let prefix = format!("{}_", record.platform);
        if !record.content_id.starts_with(&prefix) || record.content_id.len() == prefix.len() {
            problems.push(format!(
                "content_id '{}' does not match '{prefix}<id>'",
                record.content_id
            ));
        }
    }

    if record.creator.username.trim().is_empty() {
        problems.push("creator username is empty".to_string());
    }

    let score = record.metrics.engagement_score;
    if !score.is_finite() || !(0.0..=MAX_ENGAGEMENT_SCORE).contains(&score) {
        problems.push(format!("engagement_score {score} outside [0, {MAX_ENGAGEMENT_SCORE}]"));
    }

    let velocity = record.metrics.engagement_velocity;
    if !velocity.is_finite() || velocity < 0.0 {
        problems.push(format!("engagement_velocity {velocity} is negative or not finite"));
    }

    let viral = record.trend_indicators.viral_score;
    if !viral.is_finite() || !(0.0..=MAX_RECORD_VIRAL_SCORE).contains(&viral) {
        problems.push(format!("viral_score {viral} outside [0, {MAX_RECORD_VIRAL_SCORE}]"));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure {
            content_id: record.content_id.clone(),
            problems,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use trendlens_core::{Platform, Taxonomy};

    use super::*;
    use crate::normalize::{normalize, NormalizeContext};

    fn valid_record() -> ContentRecord {
        let taxonomy = Taxonomy::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let raw = json!({
            "id": "99",
            "createTime": 1_717_236_000,
            "desc": "ok",
            "author": {"uniqueId": "someone"},
            "stats": {"playCount": 100, "diggCount": 5}
        });
        normalize(&raw, Platform::TikTok, &NormalizeContext::at(&taxonomy, now)).unwrap()
    }

    #[test]
    fn valid_record_passes() {
        assert!(validate_record(&valid_record()).is_ok());
    }

    #[test]
    fn empty_content_id_fails() {
        let mut record = valid_record();
        record.content_id = String::new();
        let err = validate_record(&record).unwrap_err();
        assert_eq!(err.problems, vec!["content_id is empty".to_string()]);
    }

    #[test]
    fn content_id_with_wrong_platform_prefix_fails() {
        let mut record = valid_record();
        record.content_id = "instagram_99".to_string();
        let err = validate_record(&record).unwrap_err();
        assert!(err.problems[0].contains("does not match"));
    }

    #[test]
    fn bare_prefix_content_id_fails() {
        let mut record = valid_record();
        record.content_id = "tiktok_".to_string();
        assert!(validate_record(&record).is_err());
    }

    #[test]
    fn collects_every_problem() {
        let mut record = valid_record();
        record.creator.username = " ".to_string();
        record.metrics.engagement_score = 1000.5;
        record.metrics.engagement_velocity = f64::NAN;
        record.trend_indicators.viral_score = -1.0;

        let err = validate_record(&record).unwrap_err();
        assert_eq!(err.problems.len(), 4, "got {:?}", err.problems);
        assert!(err.to_string().starts_with("record tiktok_99 failed validation"));
    }
}
