//! Classification of buffered responses into success, transport failure or
//! application failure.

use crate::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome of a buffered call. Exactly one variant per response.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedResult<T> {
    Success(T),
    /// Non-2xx status, or a body that is not JSON.
    TransportError {
        status: u16,
        status_text: String,
        message: String,
    },
    /// 2xx status whose payload carries an `error` field.
    ApplicationError { message: String },
}

impl<T> ClassifiedResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ClassifiedResult::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ClassifiedResult<U> {
        match self {
            ClassifiedResult::Success(v) => ClassifiedResult::Success(f(v)),
            ClassifiedResult::TransportError {
                status,
                status_text,
                message,
            } => ClassifiedResult::TransportError {
                status,
                status_text,
                message,
            },
            ClassifiedResult::ApplicationError { message } => {
                ClassifiedResult::ApplicationError { message }
            }
        }
    }

    /// Raise the error variants onto the crate's failure surface.
    pub fn into_result(self) -> Result<T> {
        match self {
            ClassifiedResult::Success(v) => Ok(v),
            ClassifiedResult::TransportError {
                status,
                status_text,
                message,
            } => Err(Error::Remote {
                status,
                status_text,
                message,
            }),
            ClassifiedResult::ApplicationError { message } => Err(Error::Application { message }),
        }
    }
}

impl ClassifiedResult<Value> {
    /// Decode a successful payload into a typed response.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let value = self.into_result()?;
        Ok(serde_json::from_value(value)?)
    }
}

pub struct ResponseClassifier;

impl ResponseClassifier {
    /// Classify a fully read response body.
    ///
    /// The body is parsed before the status is looked at: a 2xx payload may
    /// still carry an error, and a non-2xx payload may carry better text than
    /// the status line. An empty body parses as `null`.
    pub fn classify(status: StatusCode, body: &[u8]) -> ClassifiedResult<Value> {
        let parsed = Self::parse_body(body);
        let code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        let parsed = match parsed {
            Some(v) => v,
            None => {
                return ClassifiedResult::TransportError {
                    status: code,
                    status_text,
                    message: Self::generic_message(code),
                }
            }
        };

        let embedded = Self::error_text(&parsed);
        if status.is_success() {
            match embedded {
                Some(message) => ClassifiedResult::ApplicationError { message },
                None => ClassifiedResult::Success(parsed),
            }
        } else {
            ClassifiedResult::TransportError {
                status: code,
                status_text,
                message: embedded.unwrap_or_else(|| Self::generic_message(code)),
            }
        }
    }

    /// Read the body of `response` and classify it.
    pub async fn classify_response(response: reqwest::Response) -> Result<ClassifiedResult<Value>> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(crate::transport::TransportError::Http)?;
        Ok(Self::classify(status, &body))
    }

    fn parse_body(body: &[u8]) -> Option<Value> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Some(Value::Null);
        }
        serde_json::from_slice(body).ok()
    }

    /// Non-empty `error` text: a string, or an object's `message`.
    /// Falsy values (`false`, `0`, `[]`, `{}`) mean no error.
    fn error_text(payload: &Value) -> Option<String> {
        let text = match payload.get("error")? {
            Value::Null | Value::Bool(false) => return None,
            Value::Number(n) if n.as_f64() == Some(0.0) => return None,
            Value::Array(items) if items.is_empty() => return None,
            Value::Object(obj) if obj.is_empty() => return None,
            Value::String(s) => s.clone(),
            Value::Object(obj) => match obj.get("message") {
                Some(Value::String(s)) => s.clone(),
                _ => Value::Object(obj.clone()).to_string(),
            },
            other => other.to_string(),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn generic_message(status: u16) -> String {
        format!("Request failed with status {}", status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(status: u16, body: &str) -> ClassifiedResult<Value> {
        ResponseClassifier::classify(StatusCode::from_u16(status).unwrap(), body.as_bytes())
    }

    #[test]
    fn success_without_error_field() {
        let r = classify(200, r#"{"choices":[]}"#);
        assert_eq!(r, ClassifiedResult::Success(json!({"choices": []})));
    }

    #[test]
    fn error_field_on_200_is_an_application_error() {
        assert_eq!(
            classify(200, r#"{"error": "x"}"#),
            ClassifiedResult::ApplicationError {
                message: "x".into()
            }
        );
    }

    #[test]
    fn error_text_on_500_is_preferred_over_status_message() {
        assert_eq!(
            classify(500, r#"{"error": "y"}"#),
            ClassifiedResult::TransportError {
                status: 500,
                status_text: "Internal Server Error".into(),
                message: "y".into(),
            }
        );
    }

    #[test]
    fn unparseable_500_falls_back_to_generic_message() {
        assert_eq!(
            classify(500, "<html>oops</html>"),
            ClassifiedResult::TransportError {
                status: 500,
                status_text: "Internal Server Error".into(),
                message: "Request failed with status 500".into(),
            }
        );
    }

    #[test]
    fn unparseable_200_is_a_transport_error_with_raw_status() {
        match classify(200, "not json") {
            ClassifiedResult::TransportError { status, .. } => assert_eq!(status, 200),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_2xx_json_without_error_uses_generic_message() {
        match classify(404, r#"{"detail":"missing"}"#) {
            ClassifiedResult::TransportError { status, message, .. } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Request failed with status 404");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_or_null_error_field_is_success() {
        assert!(classify(200, r#"{"error": "", "choices": []}"#).is_success());
        assert!(classify(200, r#"{"error": null}"#).is_success());
    }

    #[test]
    fn falsy_error_field_is_success() {
        for body in [
            r#"{"error": false, "choices": []}"#,
            r#"{"error": 0}"#,
            r#"{"error": 0.0}"#,
            r#"{"error": []}"#,
            r#"{"error": {}}"#,
        ] {
            assert!(classify(200, body).is_success(), "{} should be success", body);
        }
    }

    #[test]
    fn truthy_non_string_error_field_is_stringified() {
        assert_eq!(
            classify(200, r#"{"error": true}"#),
            ClassifiedResult::ApplicationError {
                message: "true".into()
            }
        );
        assert_eq!(
            classify(200, r#"{"error": 42}"#),
            ClassifiedResult::ApplicationError {
                message: "42".into()
            }
        );
    }

    #[test]
    fn falsy_error_on_500_uses_generic_message() {
        match classify(500, r#"{"error": false}"#) {
            ClassifiedResult::TransportError { message, .. } => {
                assert_eq!(message, "Request failed with status 500")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn nested_error_object_message_is_extracted() {
        assert_eq!(
            classify(200, r#"{"error": {"message": "quota"}}"#),
            ClassifiedResult::ApplicationError {
                message: "quota".into()
            }
        );
    }

    #[test]
    fn empty_body_on_204_is_success_null() {
        assert_eq!(classify(204, ""), ClassifiedResult::Success(Value::Null));
    }

    #[test]
    fn into_result_keeps_channels_apart() {
        let app = classify(200, r#"{"error":"x"}"#).into_result().unwrap_err();
        assert!(matches!(app, Error::Application { .. }));
        let remote = classify(502, "").into_result().unwrap_err();
        assert!(matches!(remote, Error::Remote { status: 502, .. }));
    }
}
