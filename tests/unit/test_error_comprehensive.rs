use routeforge::core::error::{AppError, DefaultErrorReporter, ErrorReporter};
use routeforge::core::transform::{parse_document, TransformError};
use routeforge::core::catalog::EmptyCatalog;
use routeforge::core::types::{ErrorCategory, ErrorSeverity};

#[test]
fn test_error_creation_all_categories() {
    let categories = vec![
        ErrorCategory::ValidationError,
        ErrorCategory::DocumentError,
        ErrorCategory::CatalogError,
        ErrorCategory::ConfigurationError,
        ErrorCategory::EditError,
        ErrorCategory::SerializationError,
        ErrorCategory::IoError,
        ErrorCategory::InternalError,
        ErrorCategory::Unknown,
    ];

    for category in categories {
        let error = AppError::new(category, "test message");
        assert_eq!(error.category, category);
        assert_eq!(error.message, "test message");
        assert!(error.context.is_empty());
        assert!(error.recovery_suggestions.is_empty());
        assert!(error.occurred_at <= chrono::Utc::now());
        assert!(error.source.is_none());
    }
}

#[test]
fn test_error_severity_mapping() {
    let test_cases = vec![
        (ErrorCategory::ValidationError, ErrorSeverity::Error),
        (ErrorCategory::DocumentError, ErrorSeverity::Error),
        (ErrorCategory::CatalogError, ErrorSeverity::Error),
        (ErrorCategory::ConfigurationError, ErrorSeverity::Error),
        (ErrorCategory::EditError, ErrorSeverity::Warning),
        (ErrorCategory::SerializationError, ErrorSeverity::Error),
        (ErrorCategory::IoError, ErrorSeverity::Error),
        (ErrorCategory::InternalError, ErrorSeverity::Error),
        (ErrorCategory::Unknown, ErrorSeverity::Info),
    ];

    for (category, expected_severity) in test_cases {
        let error = AppError::new(category, "test");
        assert_eq!(error.severity(), expected_severity);
    }
}

#[test]
fn test_error_builders_accumulate() {
    let error = AppError::new(ErrorCategory::DocumentError, "unsupported")
        .with_code("UNSUPPORTED_DOCUMENT")
        .with_context("flows.yaml")
        .with_suggestion("wrap the flows in a list")
        .with_suggestion("or use an Integration resource");

    assert_eq!(error.code, "UNSUPPORTED_DOCUMENT");
    assert_eq!(error.context.get("context").map(String::as_str), Some("flows.yaml"));
    assert_eq!(error.recovery_suggestions.len(), 2);
}

#[test]
fn test_error_display_mentions_message() {
    let error = AppError::new(ErrorCategory::CatalogError, "catalog unreadable");
    assert!(error.to_string().contains("catalog unreadable"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
    let error = AppError::from(io);
    assert_eq!(error.category, ErrorCategory::IoError);
    assert_eq!(error.code, "IO_ERROR");
    assert!(error.source.is_some());
}

#[test]
fn test_anyhow_conversion_is_internal() {
    let error = AppError::from(anyhow::anyhow!("boom"));
    assert_eq!(error.category, ErrorCategory::InternalError);
    assert_eq!(error.message, "boom");
}

#[test]
fn test_transform_syntax_error_conversion() {
    let err = parse_document("- route: {from: [", &EmptyCatalog).unwrap_err();
    assert!(matches!(err, TransformError::Syntax(_)));
    let error = AppError::from(err);
    assert_eq!(error.category, ErrorCategory::SerializationError);
    assert_eq!(error.code, "YAML_ERROR");
}

#[test]
fn test_app_error_survives_anyhow_round_trip() {
    let wrapped: anyhow::Error = AppError::new(ErrorCategory::EditError, "no change").into();
    let back = wrapped.downcast_ref::<AppError>().unwrap();
    assert_eq!(back.category, ErrorCategory::EditError);
}

#[test]
fn test_reporter_handles_every_level() {
    let reporter = DefaultErrorReporter::new();
    let error = AppError::new(ErrorCategory::ValidationError, "bad id")
        .with_suggestion("use a unique id");
    reporter.report_error(&error);
    reporter.report_warning("skipped a step", Some("route.from.steps.1".to_string()));
    reporter.report_info("parsed");
    reporter.report_debug("details");
}
