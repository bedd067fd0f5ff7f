//! API payload shapes and validation.
//!
//! The fetcher hands back raw JSON; `validate_response` checks the shape
//! before any record is looked at, so a malformed payload is rejected as
//! a whole rather than failing midway through notification.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{HomewatchError, Result};

/// One homework entry from the review API.
///
/// Both fields stay optional at deserialization time: a record missing
/// its name or status is still a schema violation, but it is reported by
/// the formatter with a precise message instead of failing the whole
/// payload here.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HomeworkRecord {
    /// Title of the submitted work (JSON key `homework_name`).
    #[serde(rename = "homework_name")]
    pub name: Option<String>,
    /// Review status code, resolved against the catalog when formatting.
    pub status: Option<String>,
}

/// Top-level payload of a status query. Fields other than `homeworks`
/// (e.g. `current_date`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub homeworks: Vec<HomeworkRecord>,
}

/// Validate a fetched payload and extract the homework records.
///
/// Rules, in order: the payload must be a JSON object, `homeworks` must
/// be present and be an array, and every element must be an object. An
/// empty array is a valid outcome meaning "no updates".
pub fn validate_response(payload: &Value) -> Result<Vec<HomeworkRecord>> {
    let object = payload
        .as_object()
        .ok_or_else(|| HomewatchError::Schema("response is not a mapping".into()))?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| HomewatchError::Schema("response has no 'homeworks' key".into()))?;
    if !homeworks.is_array() {
        return Err(HomewatchError::Schema(
            "'homeworks' is not a sequence".into(),
        ));
    }

    let response: ApiResponse = serde_json::from_value(payload.clone())
        .map_err(|e| HomewatchError::Schema(format!("homework record is malformed: {e}")))?;

    Ok(response.homeworks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_homeworks_is_valid() {
        let records = validate_response(&json!({"homeworks": []})).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_records_are_returned_in_payload_order() {
        let payload = json!({
            "homeworks": [
                {"homework_name": "hw1", "status": "approved"},
                {"homework_name": "hw2", "status": "rejected"}
            ],
            "current_date": 1_700_000_000
        });

        let records = validate_response(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("hw1"));
        assert_eq!(records[0].status.as_deref(), Some("approved"));
        assert_eq!(records[1].name.as_deref(), Some("hw2"));
    }

    #[test]
    fn test_non_mapping_payload_is_rejected() {
        let err = validate_response(&json!(["homeworks"])).unwrap_err();
        assert!(matches!(err, HomewatchError::Schema(_)));

        let err = validate_response(&json!("homeworks")).unwrap_err();
        assert!(matches!(err, HomewatchError::Schema(_)));
    }

    #[test]
    fn test_missing_homeworks_key_is_rejected() {
        let err = validate_response(&json!({"current_date": 0})).unwrap_err();
        assert!(matches!(err, HomewatchError::Schema(_)));
    }

    #[test]
    fn test_non_sequence_homeworks_is_rejected() {
        let err = validate_response(&json!({"homeworks": "hw1"})).unwrap_err();
        assert!(matches!(err, HomewatchError::Schema(_)));

        let err = validate_response(&json!({"homeworks": {"homework_name": "hw1"}})).unwrap_err();
        assert!(matches!(err, HomewatchError::Schema(_)));
    }

    #[test]
    fn test_non_mapping_record_is_rejected() {
        let err = validate_response(&json!({"homeworks": ["hw1"]})).unwrap_err();
        assert!(matches!(err, HomewatchError::Schema(_)));
    }

    #[test]
    fn test_record_with_missing_fields_still_parses() {
        // Missing name/status is the formatter's call to make, not ours.
        let records = validate_response(&json!({"homeworks": [{"status": "approved"}]})).unwrap();
        assert_eq!(records[0].name, None);
        assert_eq!(records[0].status.as_deref(), Some("approved"));
    }
}
