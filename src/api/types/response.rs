//! Response envelope shared by every users endpoint

use serde::{Deserialize, Serialize};

/// Outcome marker carried in every response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
}

/// `{status, message?, data?}` response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    /// Successful response carrying only a message
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Failed response carrying only a message
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Fail,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Successful response carrying data
    pub fn success_data(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_message_serialization() {
        let response = ApiResponse::success_message("pong!");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({"status": "success", "message": "pong!"}));
    }

    #[test]
    fn test_fail_serialization() {
        let value = serde_json::to_value(ApiResponse::fail("Invalid payload.")).unwrap();
        assert_eq!(value, json!({"status": "fail", "message": "Invalid payload."}));
    }

    #[test]
    fn test_success_data_serialization() {
        let value = serde_json::to_value(ApiResponse::success_data(json!({"username": "eder"})))
            .unwrap();

        assert_eq!(value, json!({"status": "success", "data": {"username": "eder"}}));
    }
}
