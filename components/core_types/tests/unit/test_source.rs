//! Unit tests for SourcePosition and StackFrame

use core_types::{SourcePosition, StackFrame};

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_default_is_unknown() {
        let pos = SourcePosition::default();
        assert_eq!(pos.line, 0);
        assert_eq!(pos.column, 0);
    }

    #[test]
    fn test_source_position_display() {
        assert_eq!(SourcePosition::new(12, 4).to_string(), "12:4");
    }

    #[test]
    fn test_source_position_large_values() {
        let pos = SourcePosition::new(u32::MAX, u32::MAX);
        assert_eq!(pos.line, u32::MAX);
        assert_eq!(pos.column, u32::MAX);
    }
}

#[cfg(test)]
mod stack_frame_tests {
    use super::*;

    #[test]
    fn test_stack_frame_internal_frame_display() {
        let frame = StackFrame::new("Array");
        assert_eq!(frame.to_string(), "Array(<internal>)");
    }

    #[test]
    fn test_stack_frame_empty_url_is_internal() {
        let frame = StackFrame {
            function_name: Some("f".to_string()),
            source_url: Some(String::new()),
            line: 1,
            column: 1,
        };
        assert_eq!(frame.to_string(), "f(<internal>)");
    }

    #[test]
    fn test_stack_frame_position_overwritten() {
        let mut frame = StackFrame::new("f");
        frame.set_position(Some("a.js".to_string()), 1, 1);
        frame.set_position(Some("b.js".to_string()), 9, 3);
        assert_eq!(frame.source_url.as_deref(), Some("b.js"));
        assert_eq!(frame.position(), SourcePosition::new(9, 3));
    }

    #[test]
    fn test_stack_frame_clone_and_eq() {
        let frame = StackFrame::new("main");
        assert_eq!(frame.clone(), frame);
    }
}
