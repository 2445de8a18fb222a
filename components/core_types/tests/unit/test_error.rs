//! Unit tests for JsError and ErrorKind

use core_types::{ErrorKind, JsError, SourcePosition, StackFrame};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_display_matches_name() {
        for kind in [
            ErrorKind::Error,
            ErrorKind::InternalError,
            ErrorKind::ReferenceError,
            ErrorKind::SyntaxError,
            ErrorKind::TypeError,
            ErrorKind::RangeError,
        ] {
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_error_kind_is_copy() {
        let kind = ErrorKind::TypeError;
        let copy = kind;
        assert_eq!(kind, copy);
    }
}

#[cfg(test)]
mod js_error_tests {
    use super::*;

    #[test]
    fn test_js_error_without_stack() {
        let error = JsError::new(ErrorKind::Error, "boom");
        assert!(error.stack.is_empty());
        assert_eq!(error.source_position, None);
        assert_eq!(error.to_string(), "Error: boom\n");
    }

    #[test]
    fn test_js_error_source_position_from_innermost_frame() {
        let mut main = StackFrame::new("main");
        main.set_position(Some("main.js".to_string()), 2, 1);
        let mut callee = StackFrame::new("callee");
        callee.set_position(Some("main.js".to_string()), 7, 13);

        let error = JsError::new(ErrorKind::TypeError, "x").with_stack(vec![main, callee]);
        assert_eq!(error.source_position, Some(SourcePosition::new(7, 13)));
    }

    #[test]
    fn test_js_error_trace_format() {
        let mut main = StackFrame::new("main");
        main.set_position(Some("main.js".to_string()), 2, 1);
        let native = StackFrame::new("push");

        let error = JsError::new(ErrorKind::TypeError, "not a function")
            .with_stack(vec![main, native]);
        assert_eq!(
            error.to_string(),
            "TypeError: not a function\n  at push(<internal>)\n  at main(main.js:2:1)\n"
        );
    }

    #[test]
    fn test_js_error_is_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(JsError::new(ErrorKind::RangeError, "Invalid array length"));
        assert!(error.to_string().starts_with("RangeError"));
    }
}
