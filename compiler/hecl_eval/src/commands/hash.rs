//! Hash table commands.
//!
//! Readers (`hget`, `hkeys`) take a hash value. Writers (`hset`, `hclear`,
//! `hremove`) take a variable name and update that variable in place, so a
//! hash shared with other variables is copied before the first write.

use rustc_hash::FxHashMap;

use hecl_ir::Thing;

use super::{CommandFamily, CommandSpec};
use crate::errors::{key_not_found, CmdResult};
use crate::interpreter::Interpreter;

pub static HASH: CommandFamily = CommandFamily {
    name: "hash",
    commands: &[
        CommandSpec::new("hash", 1, Some(1), "hash list", cmd_hash),
        CommandSpec::new("hget", 2, Some(2), "hget hash key", cmd_hget),
        CommandSpec::new("hset", 3, Some(3), "hset varname key value", cmd_hset),
        CommandSpec::new("hkeys", 1, Some(1), "hkeys hash", cmd_hkeys),
        CommandSpec::new("hclear", 1, Some(1), "hclear varname", cmd_hclear),
        CommandSpec::new("hremove", 2, Some(2), "hremove varname key", cmd_hremove),
    ],
};

/// `hash {k1 v1 k2 v2 ...}`
fn cmd_hash(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let entries = argv[1].as_map()?;
    interp.set_result(Thing::Map(entries));
    Ok(())
}

fn cmd_hget(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let entries = argv[1].as_map()?;
    let key = argv[2].as_str();
    let value = entries
        .get(&*key)
        .cloned()
        .ok_or_else(|| key_not_found(&key))?;
    interp.set_result(value);
    Ok(())
}

/// `hset name key value`: creates the variable when missing.
fn cmd_hset(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let name = argv[1].as_str();
    let value = argv[3].clone();
    interp
        .var_or_insert(&name, || Thing::map(FxHashMap::default()))
        .map_mut()?
        .insert(argv[2].as_str().into_owned(), value.clone());
    interp.set_result(value);
    Ok(())
}

/// Keys in sorted order.
fn cmd_hkeys(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let entries = argv[1].as_map()?;
    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort();
    let keys = keys.into_iter().map(|key| Thing::string(key.as_str())).collect();
    interp.set_result(Thing::list(keys));
    Ok(())
}

fn cmd_hclear(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    interp.var_mut(&argv[1].as_str())?.map_mut()?.clear();
    Ok(())
}

/// Result is the removed value, or empty when the key was absent.
fn cmd_hremove(interp: &mut Interpreter, argv: &[Thing]) -> CmdResult {
    let removed = interp
        .var_mut(&argv[1].as_str())?
        .map_mut()?
        .remove(&*argv[2].as_str());
    interp.set_result(removed.unwrap_or_default());
    Ok(())
}
