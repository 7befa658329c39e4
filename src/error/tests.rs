use crate::error::format::format_error_with_color;
use crate::error::*;
use std::io;
use std::path::Path;

fn io_error(kind: io::ErrorKind) -> InhibitError {
    InhibitError::io(
        "open hint file",
        Path::new("/var/lib/inhibit/firefox.lock"),
        io::Error::new(kind, "test"),
    )
}

#[test]
fn test_error_context_invalid_argument() {
    let error = InhibitError::InvalidArgument("hint cannot be empty".to_string());
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_some());
    assert!(context.suggestion.unwrap().contains("inhibit unlock"));
    assert!(context.details.unwrap().contains("hint cannot be empty"));
}

#[test]
fn test_error_context_io_includes_path() {
    let error = io_error(io::ErrorKind::Other);
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.is_none());
    let details = context.details.unwrap();
    assert!(details.contains("open hint file"));
    assert!(details.contains("firefox.lock"));
}

#[test]
fn test_error_context_permission_denied() {
    let error = io_error(io::ErrorKind::PermissionDenied);
    let context = ErrorContext::new(&error);

    let suggestion = context.suggestion.unwrap();
    if cfg!(unix) {
        assert!(suggestion.contains("sudo"));
    } else {
        assert!(suggestion.contains("Administrator"));
    }
}

#[test]
fn test_error_context_short_read() {
    let error = io_error(io::ErrorKind::UnexpectedEof);
    let context = ErrorContext::new(&error);

    assert!(context.suggestion.unwrap().contains("bypassing the lock"));
}

#[test]
fn test_error_display_names_action_and_path() {
    let error = io_error(io::ErrorKind::NotFound);
    let message = error.to_string();

    assert!(message.starts_with("Failed to open hint file"));
    assert!(message.contains("/var/lib/inhibit/firefox.lock"));
    assert_eq!(error.io_kind(), Some(io::ErrorKind::NotFound));
}

#[test]
fn test_error_context_display() {
    let error = InhibitError::WaitTimeout {
        resource: "firefox".to_string(),
        hint: "refresh".to_string(),
        waited_secs: 1.5,
    };
    let output = ErrorContext::new(&error).to_string();

    assert!(output.contains("Error:"));
    assert!(output.contains("Timed out after 1.5s"));
    assert!(output.contains("Suggestion:"));
}

#[test]
fn test_exit_codes() {
    assert_eq!(
        get_exit_code(&InhibitError::InvalidArgument("test".to_string())),
        2
    );
    assert_eq!(
        get_exit_code(&InhibitError::ConfigError("test".to_string())),
        2
    );
    assert_eq!(
        get_exit_code(&InhibitError::WaitTimeout {
            resource: "firefox".to_string(),
            hint: "refresh".to_string(),
            waited_secs: 0.0,
        }),
        3
    );
    assert_eq!(get_exit_code(&io_error(io::ErrorKind::PermissionDenied)), 13);
    assert_eq!(get_exit_code(&io_error(io::ErrorKind::UnexpectedEof)), 1);
}

#[test]
fn test_format_error_chain() {
    let error = InhibitError::InvalidArgument("hint cannot be empty".to_string());
    let formatted = format_error_chain(&error);

    assert!(formatted.contains("Error:"));
    assert!(formatted.contains("Invalid argument"));
}

#[test]
fn test_format_error_with_color_reset() {
    let error = InhibitError::InvalidArgument("hint cannot be empty".to_string());

    let formatted = format_error_with_color(&error, true);

    assert!(formatted.ends_with("\x1b[0m"));
    assert!(formatted.contains("Error:"));
    assert!(formatted.contains("Suggestions:"));
}

#[test]
fn test_format_error_no_color_no_reset() {
    let error = InhibitError::InvalidArgument("hint cannot be empty".to_string());

    let formatted = format_error_with_color(&error, false);

    assert!(!formatted.contains("\x1b["));
    assert!(formatted.contains("Error:"));
    assert!(formatted.contains("Suggestions:"));
}
