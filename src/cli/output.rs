//! Result rendering for the command line.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{GeneratedSequence, QuotaState, RangeSet};
use crate::error::AppError;

/// Standard JSON envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (omitted on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Create a success envelope.
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Create an error envelope.
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Quota report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaReport {
    /// Remaining quota, or `None` when it could not be read.
    pub quota: Option<QuotaState>,
    /// Whether the quota covers the requested bytes, when asked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sufficient: Option<bool>,
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Generated strings.
    Strings(Vec<String>),
    /// Generated integers, or `None` when absent.
    Integers(Option<GeneratedSequence>),
    /// Hex-encoded random bytes.
    Bytes(String),
    /// Remote quota.
    Quota(QuotaReport),
    /// Picked JSON values.
    Choices(Vec<Value>),
    /// Evaluated range expression.
    Range(RangeSet),
}

/// Render a command result as text or JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(output: &Output, json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string(&Envelope::success(output));
    }

    let text = match output {
        Output::Strings(values) => values.join("\n"),
        Output::Integers(Some(sequence)) => join_lines(&sequence.values),
        Output::Integers(None) => String::new(),
        Output::Bytes(hex) => hex.clone(),
        Output::Quota(report) => render_quota(report),
        Output::Choices(values) => {
            let lines = values
                .iter()
                .map(serde_json::to_string)
                .collect::<serde_json::Result<Vec<_>>>()?;
            lines.join("\n")
        }
        Output::Range(set) => set.to_string(),
    };
    Ok(text)
}

/// Render an error as text or a JSON error envelope.
#[must_use]
pub fn render_error(err: &anyhow::Error, json: bool) -> String {
    let code = err
        .downcast_ref::<AppError>()
        .map_or(1, |app| app.error_code().as_i32());

    if json {
        let envelope = Envelope::error(code, format!("{err:#}"));
        if let Ok(text) = serde_json::to_string(&envelope) {
            return text;
        }
    }
    format!("Error: {err:#}")
}

fn join_lines(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_quota(report: &QuotaReport) -> String {
    match (report.quota, report.sufficient) {
        (_, Some(sufficient)) => sufficient.to_string(),
        (Some(quota), None) => format!(
            "{} bits ({} bytes)",
            quota.remaining_bits,
            quota.remaining_bytes()
        ),
        (None, None) => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Source;
    use serde_json::json;

    #[test]
    fn test_render_text() {
        let output = Output::Integers(Some(GeneratedSequence::new(vec![3, 1], Source::Local)));
        assert_eq!(render(&output, false).unwrap(), "3\n1");

        let output = Output::Range([1, 2, 5].into_iter().collect());
        assert_eq!(render(&output, false).unwrap(), "1, 2, 5");

        let output = Output::Choices(vec![json!("a"), json!(2)]);
        assert_eq!(render(&output, false).unwrap(), "\"a\"\n2");

        assert_eq!(render(&Output::Integers(None), false).unwrap(), "");
    }

    #[test]
    fn test_render_json_envelope() {
        let output = Output::Integers(Some(GeneratedSequence::new(
            vec![7],
            Source::RemoteBytes,
        )));
        let value: Value = serde_json::from_str(&render(&output, true).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "code": 0,
                "message": "success",
                "data": {"values": [7], "source": "remote_bytes"},
            })
        );

        let value: Value =
            serde_json::from_str(&render(&Output::Integers(None), true).unwrap()).unwrap();
        assert_eq!(value, json!({"code": 0, "message": "success", "data": null}));
    }

    #[test]
    fn test_render_quota() {
        let report = QuotaReport {
            quota: Some(QuotaState::from_bits(500)),
            sufficient: None,
        };
        assert_eq!(render(&Output::Quota(report), false).unwrap(), "500 bits (62 bytes)");

        let report = QuotaReport {
            quota: Some(QuotaState::from_bits(500)),
            sufficient: Some(false),
        };
        assert_eq!(render(&Output::Quota(report), false).unwrap(), "false");

        let report = QuotaReport {
            quota: None,
            sufficient: None,
        };
        assert_eq!(render(&Output::Quota(report), false).unwrap(), "unknown");
    }

    #[test]
    fn test_render_error() {
        let err = anyhow::Error::new(AppError::MixedSyntax);
        let value: Value = serde_json::from_str(&render_error(&err, true)).unwrap();
        assert_eq!(value["code"], 2001);
        assert!(value.get("data").is_none());

        assert!(render_error(&err, false).starts_with("Error: Range notation"));
    }
}
