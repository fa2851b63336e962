#![allow(clippy::unwrap_used, reason = "Tests can panic")]


use super::*;
use crate::print_handler::buffer_handler;

fn procedure(params: &str, body: &str) -> Procedure {
    Procedure::new(&Thing::string(params), &Thing::string(body)).unwrap()
}

fn argv(words: &[&str]) -> Vec<Thing> {
    words.iter().map(|w| Thing::string(*w)).collect()
}

fn interp() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

mod definition {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixed_parameters() {
        let p = procedure("a b", "set a");
        assert_eq!(p.required(), 2);
        assert!(!p.is_varargs());
    }

    #[test]
    fn trailing_args_collects_extras() {
        let p = procedure("a args", "set a");
        assert_eq!(p.required(), 1);
        assert!(p.is_varargs());
    }

    #[test]
    fn args_elsewhere_is_an_ordinary_name() {
        let p = procedure("args b", "set b");
        assert_eq!(p.required(), 2);
        assert!(!p.is_varargs());
    }

    #[test]
    fn body_is_compiled_up_front() {
        let p = procedure("", "set x 1\nset y 2");
        assert_eq!(p.body().len(), 2);
    }

    #[test]
    fn broken_body_fails_at_definition() {
        let error = Procedure::new(&Thing::string("a"), &Thing::string("set x {")).unwrap_err();
        assert_eq!(error.code(), Some("PARSE_ERROR"));
    }

    #[test]
    fn malformed_parameter_list() {
        let error = Procedure::new(&Thing::string("{a"), &Thing::string("")).unwrap_err();
        assert_eq!(error.code(), Some("TYPE_ERROR"));
    }
}

mod calls {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binds_parameters_in_a_fresh_frame() {
        let mut interp = interp();
        interp.set_var("a", Thing::string("outer"));
        let p = procedure("a b", "set sum \"$a$b\"");
        let value = p.call(&mut interp, &argv(&["join", "x", "y"])).unwrap();
        assert_eq!(value, Thing::string("xy"));
        assert_eq!(interp.call_depth(), 0);
        assert_eq!(interp.get_var("a").unwrap(), Thing::string("outer"));
        assert!(!interp.var_exists("sum"));
    }

    #[test]
    fn varargs_binds_a_list() {
        let mut interp = interp();
        let p = procedure("first args", "llen $args");
        let value = p.call(&mut interp, &argv(&["f", "1", "2", "3"])).unwrap();
        assert_eq!(value, Thing::int(2));
        let value = p.call(&mut interp, &argv(&["f", "1"])).unwrap();
        assert_eq!(value, Thing::int(0));
    }

    #[test]
    fn arity_errors_name_the_invoked_command() {
        let mut interp = interp();
        let p = procedure("a b", "set a");
        let error = match p.call(&mut interp, &argv(&["pair", "1"])) {
            Err(ControlAction::Error(error)) => error,
            other => panic!("expected an error, got {other:?}"),
        };
        assert_eq!(error.message, "proc pair doesn't have enough arguments");

        let error = match p.call(&mut interp, &argv(&["pair", "1", "2", "3"])) {
            Err(ControlAction::Error(error)) => error,
            other => panic!("expected an error, got {other:?}"),
        };
        assert_eq!(error.message, "proc pair has too many arguments");
    }

    #[test]
    fn return_is_consumed() {
        let mut interp = interp();
        let p = procedure("", "return 5\nset never 1");
        let value = p.call(&mut interp, &argv(&["five"])).unwrap();
        assert_eq!(value, Thing::int(5));
    }

    #[test]
    fn loop_signals_pass_through() {
        let mut interp = interp();
        let p = procedure("", "break");
        assert!(matches!(
            p.call(&mut interp, &argv(&["b"])),
            Err(ControlAction::Break)
        ));
        assert_eq!(interp.call_depth(), 0);
    }

    #[test]
    fn failure_pops_frame_and_records_backtrace() {
        let mut interp = interp();
        let p = procedure("", "set ok 1\nnope");
        let error = match p.call(&mut interp, &argv(&["broken"])) {
            Err(ControlAction::Error(error)) => error,
            other => panic!("expected an error, got {other:?}"),
        };
        assert_eq!(interp.call_depth(), 0);
        assert_eq!(error.line, Some(2));
        assert_eq!(error.backtrace.len(), 1);
        assert_eq!(error.backtrace.frames()[0].name, "broken");
    }
}
