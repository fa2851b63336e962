#![allow(clippy::unwrap_used, reason = "Tests can panic")]


use super::*;
use crate::commands::CORE;
use crate::errors::CmdResult;
use crate::print_handler::buffer_handler;

fn interp() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

fn run(interp: &mut Interpreter, source: &str) -> Thing {
    interp
        .eval_script(source)
        .unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
}

fn failure(interp: &mut Interpreter, source: &str) -> EvalError {
    match interp.eval_script(source) {
        Ok(value) => panic!("{source:?} returned {value:?}"),
        Err(e) => e,
    }
}

mod evaluation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_value_is_last_stanza() {
        let mut interp = interp();
        assert_eq!(run(&mut interp, "set a 1\nset b 2"), Thing::string("2"));
    }

    #[test]
    fn empty_script_is_empty() {
        let mut interp = interp();
        assert_eq!(run(&mut interp, "\n# nothing\n"), Thing::empty());
    }

    #[test]
    fn groups_concatenate_resolved_parts() {
        let mut interp = interp();
        run(&mut interp, "set name world");
        assert_eq!(
            run(&mut interp, "set greeting \"hello $name [set name]!\""),
            Thing::string("hello world world!")
        );
    }

    #[test]
    fn lone_variable_passes_value_through() {
        let mut interp = interp();
        run(&mut interp, "set l [list a b]");
        let value = run(&mut interp, "set m $l");
        assert_eq!(value.type_name(), "list");
    }

    #[test]
    fn arguments_resolve_left_to_right() {
        let mut interp = interp();
        run(&mut interp, "set i 0");
        assert_eq!(
            run(&mut interp, "list [incr i] [incr i] $i").to_string(),
            "1 2 2"
        );
    }

    #[test]
    fn eval_thing_runs_text_and_code() {
        let mut interp = interp();
        assert_eq!(
            interp.eval_thing(&Thing::string("set x 5")).unwrap(),
            Thing::string("5")
        );
        let block = hecl_parse::parse("set x").unwrap();
        assert_eq!(
            interp.eval_thing(&Thing::code(block)).unwrap(),
            Thing::string("5")
        );
    }

    #[test]
    fn dispatch_direct() {
        let mut interp = interp();
        let value = interp
            .dispatch(&[Thing::string("eq"), Thing::int(1), Thing::string("1")])
            .unwrap();
        assert_eq!(value, Thing::int(1));
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_command() {
        let mut interp = interp();
        let error = failure(&mut interp, "frobnicate 1");
        assert_eq!(error.code(), Some("LOOKUP_ERROR"));
        assert!(error.message.contains("frobnicate"));
    }

    #[test]
    fn undefined_variable() {
        let mut interp = interp();
        let error = failure(&mut interp, "puts $missing");
        assert_eq!(error.code(), Some("LOOKUP_ERROR"));
        assert!(error.message.contains("missing"));
    }

    #[test]
    fn parse_error_surfaces_with_line() {
        let mut interp = interp();
        let error = failure(&mut interp, "puts ok\nputs {open");
        assert_eq!(error.code(), Some("PARSE_ERROR"));
        assert_eq!(error.line, Some(2));
    }

    #[test]
    fn error_records_innermost_line() {
        let mut interp = interp();
        let error = failure(&mut interp, "set a 1\n\nputs [list [nope]]");
        assert_eq!(error.line, Some(3));
    }

    #[test]
    fn wrong_arg_count_for_builtin() {
        let mut interp = interp();
        let error = failure(&mut interp, "set");
        assert_eq!(error.code(), Some("ARITY_ERROR"));
        assert_eq!(error.message, "wrong # args: should be \"set varname ?value?\"");
    }

    #[test]
    fn top_level_return_ends_script() {
        let mut interp = interp();
        assert_eq!(
            run(&mut interp, "return early\nputs never"),
            Thing::string("early")
        );
        assert_eq!(interp.print_output(), "");
    }

    #[test]
    fn top_level_break_is_an_error() {
        let mut interp = interp();
        assert_eq!(failure(&mut interp, "break").code(), Some("BREAK"));
        assert_eq!(failure(&mut interp, "continue").code(), Some("CONTINUE"));
    }
}

mod variables {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_get_unset() {
        let mut interp = interp();
        interp.set_var("x", Thing::int(3));
        assert!(interp.var_exists("x"));
        assert_eq!(interp.get_var("x").unwrap(), Thing::int(3));
        assert_eq!(interp.unset_var("x"), Some(Thing::int(3)));
        assert_eq!(interp.get_var("x").unwrap_err().code(), Some("LOOKUP_ERROR"));
    }

    #[test]
    fn stack_push_and_pop_isolate_frames() {
        let mut interp = interp();
        interp.set_var("x", Thing::int(1));
        interp.stack_push();
        assert_eq!(interp.call_depth(), 1);
        assert!(!interp.var_exists("x"));
        interp.set_var("x", Thing::int(2));
        interp.stack_pop();
        assert_eq!(interp.get_var("x").unwrap(), Thing::int(1));
    }

    #[test]
    fn scoped_guard_pops_on_error() {
        let mut interp = interp();
        let outcome = {
            let mut scoped = interp.scoped();
            scoped.set_var("inner", Thing::empty());
            scoped.eval_thing(&Thing::string("nope"))
        };
        assert!(outcome.is_err());
        assert_eq!(interp.call_depth(), 0);
        assert!(!interp.var_exists("inner"));
    }

    #[test]
    fn with_scope_returns_closure_value() {
        let mut interp = interp();
        let depth = interp.with_scope(|scoped| scoped.call_depth());
        assert_eq!(depth, 1);
        assert_eq!(interp.call_depth(), 0);
    }
}

mod command_table {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cmd_answer(interp: &mut Interpreter, _argv: &[Thing]) -> CmdResult {
        interp.set_result(Thing::int(42));
        Ok(())
    }

    static EXTRA: CommandFamily = CommandFamily {
        name: "extra",
        commands: &[CommandSpec::new("answer", 0, Some(0), "answer", cmd_answer)],
    };

    #[test]
    fn register_native_command() {
        let mut interp = interp();
        interp.register(CommandSpec::new("answer", 0, Some(0), "answer", cmd_answer));
        assert!(interp.has_command("answer"));
        assert_eq!(run(&mut interp, "answer"), Thing::int(42));
    }

    #[test]
    fn builder_family_and_without_defaults() {
        let mut interp = Interpreter::builder()
            .print_handler(buffer_handler())
            .without_defaults()
            .family(&EXTRA)
            .build();
        assert_eq!(interp.command_names(), ["answer"]);
        assert_eq!(run(&mut interp, "answer"), Thing::int(42));
        assert!(interp.eval_script("set a 1").is_err());
    }

    #[test]
    fn unload_keeps_procedures() {
        let mut interp = interp();
        run(&mut interp, "proc puts {x} {return $x}");
        interp.unload(&CORE);
        assert!(!interp.has_command("set"));
        assert!(interp.has_command("puts"));
        interp.load(&CORE);
        assert!(interp.has_command("set"));
    }

    #[test]
    fn remove_command() {
        let mut interp = interp();
        assert!(interp.remove_command("llen"));
        assert!(!interp.remove_command("llen"));
        assert_eq!(failure(&mut interp, "llen {}").code(), Some("LOOKUP_ERROR"));
    }

    #[test]
    fn result_slot() {
        let mut interp = interp();
        interp.set_result(Thing::string("r"));
        assert_eq!(interp.result(), &Thing::string("r"));
    }
}

mod limits {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn runaway_recursion_is_an_error() {
        let mut interp = Interpreter::builder()
            .print_handler(buffer_handler())
            .max_depth(50)
            .build();
        run(&mut interp, "proc down {} {down}");
        let error = failure(&mut interp, "down");
        assert_eq!(error.code(), Some("STACK_OVERFLOW"));
        assert_eq!(interp.call_depth(), 0);
        assert_eq!(error.backtrace.len(), 51);
    }

    #[test]
    fn default_limit_allows_deep_recursion() {
        let mut interp = interp();
        assert_eq!(interp.max_depth(), DEFAULT_MAX_DEPTH);
        run(
            &mut interp,
            "proc count {n} {if {eq $n 0} {return done}; incr n -1; return [count $n]}",
        );
        assert_eq!(run(&mut interp, "count 500"), Thing::string("done"));
    }

    #[test]
    fn custom_stack_policy_grows_in_small_segments() {
        let policy = StackPolicy::new(64 * 1024, 256 * 1024);
        let mut interp = Interpreter::builder()
            .print_handler(buffer_handler())
            .stack_policy(policy)
            .max_depth(5000)
            .build();
        run(
            &mut interp,
            "proc count {n} {if {eq $n 0} {return done}; incr n -1; return [count $n]}",
        );
        assert_eq!(run(&mut interp, "count 4000"), Thing::string("done"));
        assert_eq!(interp.call_depth(), 0);
    }

    #[test]
    fn default_stack_policy() {
        let policy = StackPolicy::default();
        assert_eq!(policy.red_zone, StackPolicy::DEFAULT_RED_ZONE);
        assert_eq!(policy.segment, StackPolicy::DEFAULT_SEGMENT);
        assert_eq!(policy.run(|| 6 * 7), 42);
    }
}
