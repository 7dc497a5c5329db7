//! Response envelope shared by every request handler.
//!
//! # Invariants
//! - `ok == true` implies `error_kind` is absent.
//! - `msg` is `"success"` on success and the caller-safe error text otherwise.

use board_core::ErrorKind;
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "success";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// `null` for failures and for operations without a payload.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            msg: SUCCESS_MESSAGE.to_string(),
            error_kind: None,
            data: Some(data),
        }
    }

    pub fn failure(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            msg: msg.into(),
            error_kind: Some(kind),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without payload; serializes `data` as `null`.
    pub fn done() -> Self {
        Self {
            ok: true,
            msg: SUCCESS_MESSAGE.to_string(),
            error_kind: None,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiResponse;
    use board_core::ErrorKind;

    #[test]
    fn done_serializes_null_data() {
        let json = serde_json::to_value(ApiResponse::done()).unwrap();
        assert_eq!(json, serde_json::json!({"ok": true, "msg": "success", "data": null}));
    }

    #[test]
    fn failure_carries_snake_case_kind() {
        let response = ApiResponse::<u32>::failure(ErrorKind::Forbidden, "incorrect password");
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error_kind"], "forbidden");
        assert_eq!(json["msg"], "incorrect password");
        assert!(json["data"].is_null());
    }
}
