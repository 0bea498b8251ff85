//! CLI response formatting and output.
//!
//! Provides the JSON envelope, printing, and exit-code mapping.

use serde::Serialize;
use serde_json::Value;

use deploydoc::{Error, Result};

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) {
    use std::io::{self, Write};

    let payload = match serde_json::to_string_pretty(response) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Failed to serialize response: {}", e);
            return;
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        // Exit gracefully on SIGPIPE
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("Failed to write response: {}", e);
        }
    }
}

pub fn print_json_result(result: Result<Value>) {
    match result {
        Ok(value) => print_response(&CliResponse::success(value)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Map a command result to a serialized value plus exit code.
///
/// Command handlers return `(data, exit_code)`; errors carry their own
/// exit code so the process exit decision stays here, in one place.
pub fn map_cmd_result_to_json<T: Serialize>(result: Result<(T, i32)>) -> (Result<Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => {
                let err = Error::Json(err);
                let exit_code = err.exit_code();
                (Err(err), exit_code)
            }
        },
        Err(err) => {
            let exit_code = err.exit_code();
            (Err(err), exit_code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_error_carries_code_and_message() {
        let err = Error::Configuration {
            file: "doc.md".to_string(),
        };
        let response = CliResponse::<()>::from_error(&err);
        assert!(!response.success);
        let cli_err = response.error.unwrap();
        assert_eq!(cli_err.code, "CONFIG_ERROR");
        assert!(cli_err.message.contains("doc.md"));
    }

    #[test]
    fn map_cmd_result_keeps_handler_exit_code() {
        let result: Result<(Value, i32)> = Ok((serde_json::json!({"ok": true}), 3));
        let (value, exit_code) = map_cmd_result_to_json(result);
        assert!(value.is_ok());
        assert_eq!(exit_code, 3);
    }

    #[test]
    fn map_cmd_result_maps_error_exit_codes() {
        let err = Error::MissingEnv {
            names: vec!["FOO".to_string()],
        };
        let (value, exit_code) = map_cmd_result_to_json::<Value>(Err(err));
        assert!(value.is_err());
        assert_eq!(exit_code, 3);
    }
}
