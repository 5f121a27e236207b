//! Eval request and response types.

use serde::{Deserialize, Serialize};

/// Body of a `POST eval` request.
#[derive(Debug, Clone, Serialize)]
pub struct EvalRequest {
    pub pack: String,
    pub expression: String,
}

/// Raw response body from the eval endpoint.
///
/// The server populates exactly one of the three fields and omits the
/// others; it also echoes the request fields, which we ignore.  Error
/// responses (HTTP 400/500) carry the same shape, so this decodes
/// independently of the status code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvalResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(rename = "compile-error", default)]
    pub compile_error: Option<String>,
    #[serde(rename = "runtime-error", default)]
    pub runtime_error: Option<String>,
}

/// The outcome of one submitted expression.
///
/// Compile and runtime errors come from the server; `TransportError` is
/// raised locally when the request or the response decode fails, so no
/// submission can vanish without a visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalOutcome {
    Value(String),
    CompileError(String),
    RuntimeError(String),
    TransportError(String),
}

impl From<EvalResponse> for EvalOutcome {
    fn from(resp: EvalResponse) -> Self {
        // Compile error wins over runtime error; an empty string counts as
        // absent, mirroring how the web client tested these fields.
        if let Some(msg) = non_empty(resp.compile_error) {
            EvalOutcome::CompileError(msg)
        } else if let Some(msg) = non_empty(resp.runtime_error) {
            EvalOutcome::RuntimeError(msg)
        } else {
            EvalOutcome::Value(resp.result.unwrap_or_default())
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> EvalOutcome {
        serde_json::from_str::<EvalResponse>(json).unwrap().into()
    }

    #[test]
    fn result_becomes_value() {
        assert_eq!(decode(r#"{"result":"42"}"#), EvalOutcome::Value("42".into()));
    }

    #[test]
    fn missing_result_becomes_empty_value() {
        assert_eq!(decode("{}"), EvalOutcome::Value(String::new()));
    }

    #[test]
    fn compile_error_wins_over_runtime_error() {
        let outcome = decode(r#"{"compile-error":"syntax","runtime-error":"late"}"#);
        assert_eq!(outcome, EvalOutcome::CompileError("syntax".into()));
    }

    #[test]
    fn runtime_error_without_compile_error() {
        let outcome = decode(r#"{"runtime-error":"divide by zero"}"#);
        assert_eq!(outcome, EvalOutcome::RuntimeError("divide by zero".into()));
    }

    #[test]
    fn empty_error_strings_count_as_absent() {
        let outcome = decode(r#"{"result":"7","compile-error":"","runtime-error":""}"#);
        assert_eq!(outcome, EvalOutcome::Value("7".into()));
    }

    #[test]
    fn request_serializes_expected_keys() {
        let req = EvalRequest {
            pack: "core".into(),
            expression: "{1d6}".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["pack"], "core");
        assert_eq!(json["expression"], "{1d6}");
    }
}
