pub mod api_client;
pub mod forms;
pub mod mock_auth;
pub mod testimonial_relay;

use reqwest::Response;
use serde_json::Value;

use crate::domain::value_objects::submission::SubmitError;

/// Turns a non-success response into the message the admin sees: the body's
/// `error`, else its `message`, else `fallback`.
pub(crate) async fn rejection(response: Response, fallback: &str) -> SubmitError {
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);

    SubmitError::Rejected {
        status,
        message: error_message(&body, fallback),
    }
}

pub(crate) fn error_message(body: &Value, fallback: &str) -> String {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|message| !message.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
