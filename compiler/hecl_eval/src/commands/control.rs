//! Control-flow commands.
//!
//! `return`, `break` and `continue` raise their [`ControlAction`]; the loops
//! and procedure calls further up consume them. `foreach` and `while` stop
//! on `Break`, swallow `Continue`, and pass every other action on.

use std::borrow::Cow;

use hecl_ir::{CodeBlock, Thing};

use crate::errors::{foreach_mismatch, wrong_args, CmdResult, ControlAction, EvalError};
use crate::interpreter::{compile, Interpreter};

const FOREACH_USAGE: &str = "foreach varlist list body";
const IF_USAGE: &str = "if cond body ?elseif cond body ...? ?else body?";

pub(super) fn cmd_return(_interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    Err(ControlAction::Return(
        argv.get(1).cloned().unwrap_or_default(),
    ))
}

pub(super) fn cmd_break(_interp: &mut Interpreter, _argv: &[Thing]) -> CmdResult {
    Err(ControlAction::Break)
}

pub(super) fn cmd_continue(_interp: &mut Interpreter, _argv: &[Thing]) -> CmdResult {
    Err(ControlAction::Continue)
}

/// Run one loop iteration. `Ok(false)` means the loop was broken out of.
fn run_body(interp: &mut Interpreter, body: &CodeBlock) -> Result<bool, ControlAction> {
    match interp.eval(body) {
        Ok(_) | Err(ControlAction::Continue) => Ok(true),
        Err(ControlAction::Break) => Ok(false),
        Err(other) => Err(other),
    }
}

/// `foreach varlist list body`
///
/// Binds consecutive chunks of `list` to the names in `varlist`. A final
/// chunk shorter than `varlist` fails after the full chunks have run. An
/// empty `list` does nothing, whatever `varlist` holds.
pub(super) fn cmd_foreach(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let items = argv[2].as_list()?;
    if items.is_empty() {
        return Ok(());
    }
    let vars = argv[1].as_list()?;
    if vars.is_empty() {
        return Err(wrong_args(FOREACH_USAGE).into());
    }
    let body = compile(&argv[3])?;
    for chunk in items.chunks(vars.len()) {
        if chunk.len() != vars.len() {
            return Err(foreach_mismatch().into());
        }
        for (var, value) in vars.iter().zip(chunk) {
            interp.set_var(var.as_str(), value.clone());
        }
        if !run_body(interp, &body)? {
            break;
        }
    }
    Ok(())
}

/// A condition: a literal truth value, or a script whose result is tested.
enum Condition<'a> {
    Literal(bool),
    Script(Cow<'a, CodeBlock>),
}

impl<'a> Condition<'a> {
    fn new(cond: &'a Thing) -> Result<Self, EvalError> {
        let text = cond.as_str();
        let text = text.trim();
        let literal = text.parse::<i64>().is_ok()
            || text.eq_ignore_ascii_case("true")
            || text.eq_ignore_ascii_case("false");
        if literal {
            return Ok(Condition::Literal(cond.is_true()));
        }
        Ok(Condition::Script(compile(cond)?))
    }

    fn holds(&self, interp: &mut Interpreter) -> Result<bool, ControlAction> {
        match self {
            Condition::Literal(value) => Ok(*value),
            Condition::Script(block) => Ok(interp.eval(block)?.is_true()),
        }
    }
}

/// `if cond body ?elseif cond body ...? ?else body?`
pub(super) fn cmd_if(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let mut i = 1;
    loop {
        let (Some(cond), Some(body)) = (argv.get(i), argv.get(i + 1)) else {
            return Err(wrong_args(IF_USAGE).into());
        };
        if Condition::new(cond)?.holds(interp)? {
            let value = interp.eval_thing(body)?;
            interp.set_result(value);
            return Ok(());
        }
        i += 2;
        let Some(keyword) = argv.get(i) else {
            return Ok(());
        };
        match &*keyword.as_str() {
            "elseif" => i += 1,
            "else" if argv.len() == i + 2 => {
                let value = interp.eval_thing(&argv[i + 1])?;
                interp.set_result(value);
                return Ok(());
            }
            _ => return Err(wrong_args(IF_USAGE).into()),
        }
    }
}

/// `while cond body`
pub(super) fn cmd_while(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let cond = Condition::new(&argv[1])?;
    let body = compile(&argv[2])?;
    while cond.holds(interp)? {
        if !run_body(interp, &body)? {
            break;
        }
    }
    Ok(())
}
