use serde::{Deserialize, Serialize};

use crate::error::CheckError;

/// Name of the checker, used as the report title
pub const CHECK_NAME: &str = "Flow";

/// Output of `flow --json`, limited to the fields we consume
#[derive(Debug, Clone, Deserialize)]
pub struct FlowReport {
    pub errors: Vec<FlowError>,
}

/// One logical type error, possibly spanning several locations
#[derive(Debug, Clone, Deserialize)]
pub struct FlowError {
    pub message: Vec<FlowMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowMessage {
    pub path: String,
    pub loc: Loc,
    pub descr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Loc {
    pub start: Position,
    pub end: Position,
}

/// Line and column, both 1-indexed as flow reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Failure,
}

/// A single location to annotate, one per flow message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub path: String,
    pub start: Position,
    pub end: Position,
    pub annotation_level: AnnotationLevel,
    pub message: String,
}

/// Parse flow's stdout strictly
pub fn parse_report(stdout: &str) -> Result<FlowReport, CheckError> {
    serde_json::from_str(stdout).map_err(CheckError::from_json)
}

/// Flatten every message of every error, keeping report order
pub fn annotations(report: &FlowReport) -> Vec<Annotation> {
    report
        .errors
        .iter()
        .flat_map(|error| error.message.iter())
        .map(|message| Annotation {
            path: message.path.clone(),
            start: message.loc.start,
            end: message.loc.end,
            annotation_level: AnnotationLevel::Failure,
            message: message.descr.clone(),
        })
        .collect()
}

/// Report title, "Flow" or "Flow - <subtitle>"
pub fn title(subtitle: Option<&str>) -> String {
    match subtitle.filter(|s| !s.is_empty()) {
        Some(subtitle) => format!("{} - {}", CHECK_NAME, subtitle),
        None => CHECK_NAME.to_string(),
    }
}

/// Diagnostic text for output that could not be parsed
pub fn format_parse_failure(error: &CheckError, stdout: &str, stderr: &str) -> String {
    let rule = "=".repeat(60);
    format!(
        "{rule}\n\
         ERROR: could not parse flow output\n\
         {rule}\n\
         {error}\n\n\
         Flow most likely failed to run, or this action is misconfigured \
         (check the flow-bin and working directory inputs).\n\n\
         --- flow stderr ---\n{stderr}\n\
         --- flow stdout ---\n{stdout}\n\
         {rule}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_MESSAGES: &str = r#"{"errors":[{"message":[{"path":"a.js","loc":{"start":{"line":1,"column":2},"end":{"line":1,"column":5}},"descr":"bad type"}]},{"message":[{"path":"b.js","loc":{"start":{"line":3,"column":1},"end":{"line":3,"column":4}},"descr":"oops"},{"path":"b.js","loc":{"start":{"line":4,"column":1},"end":{"line":4,"column":2}},"descr":"also"}]}]}"#;

    fn pos(line: u32, column: u32) -> Position {
        Position { line, column }
    }

    #[test]
    fn test_parse_empty_errors() {
        let report = parse_report(r#"{"errors":[]}"#).unwrap();
        assert!(report.errors.is_empty());
        assert!(annotations(&report).is_empty());
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let report = parse_report(r#"{"flowVersion":"0.200.0","passed":true,"errors":[]}"#);
        assert!(report.is_ok());
    }

    #[test]
    fn test_flatten_preserves_order() {
        let report = parse_report(THREE_MESSAGES).unwrap();
        let result = annotations(&report);
        assert_eq!(
            result,
            vec![
                Annotation {
                    path: "a.js".into(),
                    start: pos(1, 2),
                    end: pos(1, 5),
                    annotation_level: AnnotationLevel::Failure,
                    message: "bad type".into(),
                },
                Annotation {
                    path: "b.js".into(),
                    start: pos(3, 1),
                    end: pos(3, 4),
                    annotation_level: AnnotationLevel::Failure,
                    message: "oops".into(),
                },
                Annotation {
                    path: "b.js".into(),
                    start: pos(4, 1),
                    end: pos(4, 2),
                    annotation_level: AnnotationLevel::Failure,
                    message: "also".into(),
                },
            ]
        );
    }

    #[test]
    fn test_error_without_messages_produces_nothing() {
        let report = parse_report(r#"{"errors":[{"message":[]}]}"#).unwrap();
        assert!(annotations(&report).is_empty());
    }

    #[test]
    fn test_parse_not_json() {
        let err = parse_report("Launching Flow server for /repo\nSpawned flow server").unwrap_err();
        assert!(matches!(err, CheckError::InvalidJson(_)));
        assert!(matches!(parse_report("").unwrap_err(), CheckError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_wrong_shape() {
        assert!(matches!(
            parse_report(r#"{"exit":{"code":12}}"#).unwrap_err(),
            CheckError::UnexpectedShape(_)
        ));
        assert!(matches!(
            parse_report(r#"{"errors":[{"message":[{"path":"a.js"}]}]}"#).unwrap_err(),
            CheckError::UnexpectedShape(_)
        ));
    }

    #[test]
    fn test_title() {
        assert_eq!(title(None), "Flow");
        assert_eq!(title(Some("")), "Flow");
        assert_eq!(title(Some("strict")), "Flow - strict");
    }

    #[test]
    fn test_annotation_json_field_names() {
        let report = parse_report(THREE_MESSAGES).unwrap();
        let value = serde_json::to_value(&annotations(&report)[0]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "path": "a.js",
                "start": {"line": 1, "column": 2},
                "end": {"line": 1, "column": 5},
                "annotationLevel": "failure",
                "message": "bad type",
            })
        );
    }

    #[test]
    fn test_format_parse_failure_echoes_output() {
        let err = parse_report("boom").unwrap_err();
        let text = format_parse_failure(&err, "boom", "flow crashed");
        assert!(text.contains("ERROR: could not parse flow output"));
        assert!(text.contains("--- flow stderr ---\nflow crashed"));
        assert!(text.contains("--- flow stdout ---\nboom"));
    }
}
