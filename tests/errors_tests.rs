use clickgen::errors::{ClickgenError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_constructors_and_codes() {
        let cases = [
            (ClickgenError::config("bad toml"), "E001", "Configuration Error"),
            (ClickgenError::validation("zero users"), "E002", "Validation Error"),
            (ClickgenError::sampling("empty pool"), "E003", "Sampling Error"),
            (ClickgenError::file_operation("disk full"), "E004", "File Operation Error"),
            (ClickgenError::not_found("clicks_stream.csv"), "E005", "File Not Found"),
            (ClickgenError::serialization("row 3"), "E006", "Serialization Error"),
            (ClickgenError::date_parse("yesterday"), "E007", "Date Parse Error"),
        ];
        for (err, code, kind) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.error_type(), kind);
            assert!(err.to_string().starts_with(kind));
        }
    }

    #[test]
    fn test_message_is_preserved() {
        let err = ClickgenError::not_found("urls_metadata.csv");
        assert_eq!(err.message(), "urls_metadata.csv");
        assert_eq!(err.format_simple(), "File Not Found: urls_metadata.csv");
    }

    #[test]
    fn test_colored_format_contains_code() {
        colored::control::set_override(false);
        let err = ClickgenError::validation("popular fraction must be in (0, 1)");
        let colored = err.format_colored();
        assert!(colored.contains("E002"));
        assert!(colored.contains("popular fraction"));
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ClickgenError = io.into();
        assert!(matches!(err, ClickgenError::FileOperation(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClickgenError = json_err.into();
        assert!(matches!(err, ClickgenError::Serialization(_)));
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let parse = chrono::NaiveDate::parse_from_str("2025-13-40", "%Y-%m-%d").unwrap_err();
        let err: ClickgenError = parse.into();
        assert!(matches!(err, ClickgenError::DateParse(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/clickgen/file")?)
        }
        let err = read_missing().unwrap_err();
        assert_eq!(err.code(), "E004");
        assert!(err.source().is_none());
    }
}
