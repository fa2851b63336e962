use hecl_parse::parse;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn factories_set_message_and_code() {
    let error = too_many_args("f");
    assert_eq!(error.message, "proc f has too many arguments");
    assert_eq!(error.code(), Some("ARITY_ERROR"));

    let error = not_enough_args("g");
    assert_eq!(error.message, "proc g doesn't have enough arguments");

    assert_eq!(undefined_variable("x").code(), Some("LOOKUP_ERROR"));
    assert_eq!(unknown_command("nope").code(), Some("LOOKUP_ERROR"));
    assert_eq!(key_not_found("k").code(), Some("LOOKUP_ERROR"));
    assert_eq!(not_an_integer("abc").code(), Some("TYPE_ERROR"));
    assert_eq!(stack_overflow(3).code(), Some("STACK_OVERFLOW"));
    assert!(foreach_mismatch()
        .message
        .contains("does not match list length"));
}

#[test]
fn custom_errors_have_no_code_until_given_one() {
    let error = EvalError::new("boom");
    assert_eq!(error.code(), None);
    assert_eq!(error.with_code("MY_CODE").code(), Some("MY_CODE"));
}

#[test]
fn parse_errors_keep_kind_and_line() {
    let Err(parse_error) = parse("ok\nputs {a") else {
        panic!("expected a parse error");
    };
    let error = EvalError::from(parse_error);
    assert_eq!(error.kind, EvalErrorKind::Parse(ParseErrorKind::UnbalancedBraces));
    assert_eq!(error.code(), Some("PARSE_ERROR"));
    assert_eq!(error.line, Some(2));
}

#[test]
fn conversion_errors_are_type_errors() {
    let error = EvalError::from(ConvError::OddMapList(3));
    assert_eq!(error.code(), Some("TYPE_ERROR"));
}

#[test]
fn display_includes_line() {
    let error = unknown_command("frob").with_line(4);
    assert_eq!(error.to_string(), "command frob does not exist (line 4)");
}

mod control_action {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_line_wins_then_fills_call_site() {
        let mut error = undefined_variable("x");
        error.note_line(3);
        error.push_frame("inner");
        error.note_line(9);
        error.note_line(12);

        assert_eq!(error.line, Some(3));
        assert_eq!(
            error.backtrace.frames(),
            [BacktraceFrame {
                name: "inner".into(),
                line: Some(9)
            }]
        );
    }

    #[test]
    fn signals_ignore_lines() {
        assert_eq!(ControlAction::Break.at_line(5), ControlAction::Break);
        let action = ControlAction::from(EvalError::new("x")).at_line(5);
        let ControlAction::Error(error) = action else {
            panic!("expected an error");
        };
        assert_eq!(error.line, Some(5));
    }

    #[test]
    fn top_level_settlement() {
        assert_eq!(
            ControlAction::Return(Thing::int(5)).into_top_level(),
            Ok(Thing::int(5))
        );
        let Err(error) = ControlAction::Break.into_top_level() else {
            panic!("break escaped as a value");
        };
        assert_eq!(error.code(), Some("BREAK"));
        let Err(error) = ControlAction::Continue.into_top_level() else {
            panic!("continue escaped as a value");
        };
        assert_eq!(error.code(), Some("CONTINUE"));
        assert!(error.message.contains("outside of a loop"));
    }

    #[test]
    fn backtrace_renders_frames() {
        let mut error = EvalError::new("bad");
        error.push_frame("leaf");
        error.push_frame("root");
        error.backtrace.frames[0].line = Some(2);
        let text = error.backtrace.to_string();
        assert!(text.contains("0: leaf called at line 2"));
        assert!(text.contains("1: root"));
    }
}
