pub mod price;
pub mod quality;
pub mod recommend;
pub mod search;

use serde::Serialize;

/// Outcome of one CLI command: a machine-readable JSON payload plus the
/// process exit code.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct SuccessEnvelope<T: Serialize> {
    command: String,
    status: String,
    data: T,
}

#[derive(Debug, Serialize)]
struct FailureEnvelope {
    command: String,
    status: String,
    error_class: String,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, data: impl Serialize) -> Self {
        let payload = SuccessEnvelope {
            command: command.to_string(),
            status: "ok".to_string(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(&payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = FailureEnvelope {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: error_class.to_string(),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }
}

fn serialize_payload(payload: &impl Serialize) -> String {
    serde_json::to_string(payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
