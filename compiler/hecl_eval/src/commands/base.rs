//! Variables, procedures, output and script evaluation.

use hecl_ir::Thing;

use super::control::{cmd_break, cmd_continue, cmd_foreach, cmd_if, cmd_return, cmd_while};
use super::{int_arg, CommandFamily, CommandSpec};
use crate::errors::{integer_overflow, undefined_variable, CmdResult, ControlAction};
use crate::interpreter::Interpreter;
use crate::procedure::Procedure;

pub static CORE: CommandFamily = CommandFamily {
    name: "core",
    commands: &[
        CommandSpec::new("set", 1, Some(2), "set varname ?value?", cmd_set),
        CommandSpec::new("unset", 1, Some(1), "unset varname", cmd_unset),
        CommandSpec::new("copy", 1, Some(1), "copy value", cmd_copy),
        CommandSpec::new("puts", 1, Some(1), "puts text", cmd_puts),
        CommandSpec::new("proc", 3, Some(3), "proc name params body", cmd_proc),
        CommandSpec::new("eval", 1, Some(1), "eval script", cmd_eval),
        CommandSpec::new("catch", 1, Some(2), "catch script ?varname?", cmd_catch),
        CommandSpec::new("eq", 2, Some(2), "eq a b", cmd_eq),
        CommandSpec::new("incr", 1, Some(2), "incr varname ?delta?", cmd_incr),
        CommandSpec::new("return", 0, Some(1), "return ?value?", cmd_return),
        CommandSpec::new("break", 0, Some(0), "break", cmd_break),
        CommandSpec::new("continue", 0, Some(0), "continue", cmd_continue),
        CommandSpec::new("foreach", 3, Some(3), "foreach varlist list body", cmd_foreach),
        CommandSpec::new(
            "if",
            2,
            None,
            "if cond body ?elseif cond body ...? ?else body?",
            cmd_if,
        ),
        CommandSpec::new("while", 2, Some(2), "while cond body", cmd_while),
    ],
};

/// `set name ?value?`
fn cmd_set(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let name = argv[1].as_str();
    let value = match argv.get(2) {
        Some(value) => {
            interp.set_var(&*name, value.clone());
            value.clone()
        }
        None => interp.get_var(&name)?,
    };
    interp.set_result(value);
    Ok(())
}

fn cmd_unset(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let name = argv[1].as_str();
    match interp.unset_var(&name) {
        Some(_) => Ok(()),
        None => Err(undefined_variable(&name).into()),
    }
}

/// `copy value`: a copy sharing no storage with the argument.
fn cmd_copy(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    interp.set_result(argv[1].deep_copy());
    Ok(())
}

fn cmd_puts(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    interp.print_handler().println(&argv[1].as_str());
    Ok(())
}

/// `proc name params body`
fn cmd_proc(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let procedure = Procedure::new(&argv[2], &argv[3])?;
    interp.define_proc(argv[1].as_str(), procedure);
    Ok(())
}

fn cmd_eval(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let value = interp.eval_thing(&argv[1])?;
    interp.set_result(value);
    Ok(())
}

/// `catch script ?varname?`
///
/// Result is `1` when the script failed, with the message stored in
/// `varname`, else `0` with the script's value stored. Control-flow
/// signals pass through untouched.
fn cmd_catch(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let (failed, stored) = match interp.eval_thing(&argv[1]) {
        Ok(value) => (false, value),
        Err(ControlAction::Error(error)) => (true, Thing::string(error.message)),
        Err(signal) => return Err(signal),
    };
    if let Some(var) = argv.get(2) {
        interp.set_var(var.as_str(), stored);
    }
    interp.set_result(Thing::boolean(failed));
    Ok(())
}

/// `eq a b`: compares textual forms.
fn cmd_eq(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    interp.set_result(Thing::boolean(argv[1].as_str() == argv[2].as_str()));
    Ok(())
}

/// `incr name ?delta?`
fn cmd_incr(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let delta = match argv.get(2) {
        Some(delta) => int_arg(delta)?,
        None => 1,
    };
    let name = argv[1].as_str();
    let current = int_arg(&interp.get_var(&name)?)?;
    let next = Thing::int(current.checked_add(delta).ok_or_else(integer_overflow)?);
    interp.set_var(&*name, next.clone());
    interp.set_result(next);
    Ok(())
}
