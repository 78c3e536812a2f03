use deed_core::remote::{RemoteError, SubmissionReceipt};
use deed_core::workflow::GatewayParams;
use serde_json::Value;

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Backend `message` from an error body, if it is JSON and has one.
fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .or_else(|| json.get("error"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

fn parse_success(body: &str) -> Result<Value, RemoteError> {
    serde_json::from_str(body).map_err(|e| RemoteError::InvalidResponse(e.to_string()))
}

/// Maps a form-submission response to a receipt.
///
/// The form id is read from `data.id` (or `data._id`) and may be a string
/// or a number.
pub fn interpret_submission_response(
    status: u16,
    body: &str,
) -> Result<SubmissionReceipt, RemoteError> {
    if !is_success(status) {
        return Err(RemoteError::Status {
            status,
            message: error_message(body),
        });
    }

    let json = parse_success(body)?;
    let data = json
        .get("data")
        .ok_or_else(|| RemoteError::InvalidResponse("missing `data`".to_string()))?;
    let form_id = match data.get("id").or_else(|| data.get("_id")) {
        Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(RemoteError::InvalidResponse("missing `data.id`".to_string())),
    };

    Ok(SubmissionReceipt { form_id })
}

/// Maps a payment-initialisation response to gateway parameters, which may
/// sit under `data` or at the top level.
pub fn interpret_gateway_response(
    status: u16,
    body: &str,
) -> Result<GatewayParams, RemoteError> {
    if !is_success(status) {
        return Err(RemoteError::Status {
            status,
            message: error_message(body),
        });
    }

    let params = match parse_success(body)? {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(params).map_err(|e| RemoteError::InvalidResponse(e.to_string()))
}
