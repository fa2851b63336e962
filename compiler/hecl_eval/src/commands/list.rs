//! List commands.

use hecl_ir::Thing;

use super::{int_arg, int_len, CommandFamily, CommandSpec};
use crate::errors::CmdResult;
use crate::interpreter::Interpreter;

pub static LIST: CommandFamily = CommandFamily {
    name: "list",
    commands: &[
        CommandSpec::new("list", 0, None, "list ?elem ...?", cmd_list),
        CommandSpec::new("llen", 1, Some(1), "llen list", cmd_llen),
        CommandSpec::new("lindex", 2, Some(2), "lindex list index", cmd_lindex),
        CommandSpec::new("lappend", 1, None, "lappend varname ?elem ...?", cmd_lappend),
    ],
};

fn cmd_list(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    interp.set_result(Thing::list(argv[1..].to_vec()));
    Ok(())
}

fn cmd_llen(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let items = argv[1].as_list()?;
    interp.set_result(int_len(items.len()));
    Ok(())
}

/// `lindex list index`: `end` names the last element; out of range is
/// the empty string.
fn cmd_lindex(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let items = argv[1].as_list()?;
    let index = if argv[2].as_str() == "end" {
        items.len().checked_sub(1)
    } else {
        usize::try_from(int_arg(&argv[2])?).ok()
    };
    let value = index
        .and_then(|i| items.get(i))
        .cloned()
        .unwrap_or_default();
    interp.set_result(value);
    Ok(())
}

/// `lappend name ?elem ...?`: appends in place, creating the variable
/// when missing.
fn cmd_lappend(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let name = argv[1].as_str();
    let value = interp.var_or_insert(&name, || Thing::list(Vec::new()));
    value.list_mut()?.extend(argv[2..].iter().cloned());
    let value = value.clone();
    interp.set_result(value);
    Ok(())
}
