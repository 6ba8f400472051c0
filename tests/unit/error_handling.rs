// tests/unit/error_handling.rs
//! Unit tests for error types and their messages

use catalog_scroll::{
    AppError, FetchError, FetchErrorKind, PageIndex, PageLimit, ValidationError,
};

#[cfg(test)]
mod fetch_error_tests {
    use super::*;

    #[test]
    fn fetch_error_messages() {
        let err = FetchError::transport(PageIndex::FIRST, "HTTP 404 Not Found");
        assert_eq!(err.kind, FetchErrorKind::Transport);
        assert_eq!(
            err.to_string(),
            "page 1 failed (transport): HTTP 404 Not Found"
        );

        let second = PageIndex::new(2).expect("2 is a valid page index");
        let err = FetchError::decode(second, "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "page 2 failed (decode): expected value at line 1"
        );
    }
}

#[cfg(test)]
mod validation_error_tests {
    use super::*;

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::InvalidUrl {
            url: "ftp://example.com".to_string(),
            reason: "unsupported protocol".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid URL: ftp://example.com - unsupported protocol"
        );

        let err = PageLimit::new(0).expect_err("a catalog has at least one page");
        assert!(matches!(err, ValidationError::OutOfBounds { value: 0, .. }));
    }

    #[test]
    fn validation_errors_convert_transparently() {
        let err: AppError = ValidationError::EmptyField("url").into();
        assert_eq!(err.to_string(), "Empty required field: url");
    }
}
