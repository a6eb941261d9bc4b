//! Subcommand implementations for the `catalog` binary.

pub mod check_paths;
pub mod fix_fragments;
pub mod reconcile;

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string(value).map_err(|err| format!("json encode: {}", err))?;
    println!("{}", json);
    Ok(())
}
