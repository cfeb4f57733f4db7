//! Response envelopes.

use serde::Serialize;

/// `{ "success": bool, "data"?: T, "error"?: string }`, as the signup client expects.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserData<U> {
    pub user: U,
}

pub fn error_body(code: &str, message: String, details: Option<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "details": details
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelopes_skip_empty_halves() {
        let ok = serde_json::to_value(Envelope::ok(UserData { user: 1 })).unwrap();
        assert_eq!(ok, json!({ "success": true, "data": { "user": 1 } }));

        let failed = serde_json::to_value(Envelope::<()>::failed("nope")).unwrap();
        assert_eq!(failed, json!({ "success": false, "error": "nope" }));
    }
}
