//! Operator-facing descriptions of failed download responses.

use reqwest::StatusCode;

/// Describes a non-2xx status with a hint about what to do next.
pub fn describe_status(status: StatusCode) -> String {
    let hint = match status {
        StatusCode::NOT_FOUND => {
            "the release or asset does not exist. Make sure the release exists and the binary is available"
        }
        StatusCode::UNAUTHORIZED => "authentication failed. Check your GITHUB_TOKEN",
        StatusCode::FORBIDDEN => "access forbidden. You may need to set GITHUB_TOKEN",
        StatusCode::TOO_MANY_REQUESTS => {
            "too many requests. Try again later or set GITHUB_TOKEN"
        }
        s if s.is_server_error() => "the release server failed. Try again later",
        s if s.is_redirection() => "too many or unsupported redirects",
        _ => "unexpected response",
    };
    format!("HTTP {}: {}", status.as_u16(), hint)
}

/// Flattens an error and its sources into one line, e.g.
/// `error sending request: client error (Connect): Connection refused`.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
