use std::fmt::Write;

use crate::{COMMANDS, CommandMeta};

pub const META: CommandMeta = CommandMeta {
    name: "usage",
    desc: "Show usage syntax for a specific command.",
    category: "utility",
    usage: "usage <command>",
};

/// Show usage for a specific command.
///
/// Inputs:
/// - required command name: `usage <command>`.
///
/// Error behavior:
/// - missing argument returns this command's usage.
/// - unknown command returns a short not-found message.
pub fn run(arg1: Option<&str>, out: &mut String) -> anyhow::Result<()> {
    let Some(raw_name) = arg1 else {
        writeln!(out, "Usage: `{}`", META.usage)?;
        return Ok(());
    };

    let lookup = raw_name.trim().to_ascii_lowercase();

    let Some(command) = COMMANDS.iter().find(|command| command.name == lookup) else {
        writeln!(out, "Unknown command: `{lookup}`")?;
        return Ok(());
    };

    writeln!(out, "Usage: `{}`", command.usage)?;
    Ok(())
}
