use crate::editing::SourceRange;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// One range proposed by the external suggestion engine, in source seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestedRange {
    pub start: f64,
    pub end: f64,
    /// Why the engine picked this range. Informational only; the edit engine
    /// never reads it.
    #[serde(default)]
    pub reason: String,
}

/// Validate suggested ranges against the source bounds and convert them into
/// edit-engine input, keeping the order given. This boundary is the only
/// place suggestion ranges are checked; `Timeline::replace_all` takes them
/// as-is.
pub fn ranges_from_suggestions(
    suggestions: &[SuggestedRange],
    source_duration: f64,
) -> Result<Vec<SourceRange>> {
    suggestions
        .iter()
        .map(|s| {
            if s.end <= s.start {
                return Err(CoreError::EmptyRange {
                    start: s.start,
                    end: s.end,
                });
            }
            if s.start < 0.0 || s.end > source_duration {
                return Err(CoreError::RangeOutOfBounds {
                    start: s.start,
                    end: s.end,
                    duration: source_duration,
                });
            }
            Ok(SourceRange {
                start: s.start,
                end: s.end,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(start: f64, end: f64) -> SuggestedRange {
        SuggestedRange {
            start,
            end,
            reason: "key moment".to_string(),
        }
    }

    #[test]
    fn valid_suggestions_convert_in_order() {
        let ranges = ranges_from_suggestions(
            &[suggestion(30.0, 45.0), suggestion(5.0, 12.0)],
            60.0,
        )
        .unwrap();

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0], SourceRange { start: 30.0, end: 45.0 });
        assert_eq!(ranges[1], SourceRange { start: 5.0, end: 12.0 });
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(ranges_from_suggestions(&[], 60.0).unwrap().is_empty());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = ranges_from_suggestions(&[suggestion(10.0, 10.0)], 60.0).unwrap_err();
        assert!(matches!(err, CoreError::EmptyRange { .. }));
    }

    #[test]
    fn out_of_bounds_range_is_rejected() {
        let err = ranges_from_suggestions(&[suggestion(50.0, 70.0)], 60.0).unwrap_err();
        assert!(matches!(err, CoreError::RangeOutOfBounds { .. }));

        let err = ranges_from_suggestions(&[suggestion(-1.0, 5.0)], 60.0).unwrap_err();
        assert!(matches!(err, CoreError::RangeOutOfBounds { .. }));
    }

    #[test]
    fn range_touching_source_end_is_accepted() {
        let ranges = ranges_from_suggestions(&[suggestion(55.0, 60.0)], 60.0).unwrap();
        assert_eq!(ranges[0].end, 60.0);
    }

    #[test]
    fn reason_deserializes_and_defaults() {
        let with_reason: SuggestedRange =
            serde_json::from_str(r#"{"start":1.0,"end":2.0,"reason":"laugh line"}"#).unwrap();
        assert_eq!(with_reason.reason, "laugh line");

        let without: SuggestedRange = serde_json::from_str(r#"{"start":1.0,"end":2.0}"#).unwrap();
        assert_eq!(without.reason, "");
    }
}
