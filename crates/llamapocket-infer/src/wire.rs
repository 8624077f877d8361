//! Wire types for the generation endpoint.
//!
//! The contract is a single JSON object each way: `{"input": <prompt>}`
//! out, `{"response": <completion>}` back. Anything else is a malformed
//! response.

use serde::{Deserialize, Serialize};

use llamapocket_core::ports::InferenceError;

/// Request body for `POST /generate`.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub input: &'a str,
}

/// Success body from `POST /generate`.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub response: String,
}

/// Parse a response body into the completion text.
///
/// The completion is whitespace-trimmed; raw completions often carry
/// leading newlines.
pub(crate) fn parse_generate_response(body: &str) -> Result<String, InferenceError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|err| InferenceError::malformed(err.to_string()))?;
    Ok(parsed.response.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_string(&GenerateRequest { input: "hello" }).unwrap();
        assert_eq!(json, "{\"input\":\"hello\"}");
    }

    #[test]
    fn test_parse_trims_completion() {
        let body = "{\"response\": \"\\n  An answer.  \"}";
        assert_eq!(parse_generate_response(body).unwrap(), "An answer.");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = parse_generate_response("{\"output\": \"nope\"}").unwrap_err();
        assert!(matches!(err, InferenceError::MalformedResponse { .. }));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_generate_response("<html>502</html>").unwrap_err();
        assert!(matches!(err, InferenceError::MalformedResponse { .. }));
    }
}
