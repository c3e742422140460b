use std::fmt::Write;

use crate::{COMMANDS, CommandMeta};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "help",
};

/// Write the command catalog grouped by category.
pub fn run(out: &mut String) -> anyhow::Result<()> {
    writeln!(out, "Available Commands")?;
    writeln!(out, "{}", grouped_help_description(&sorted_commands()))?;
    Ok(())
}

/// Reply for a command name that is not in [`COMMANDS`].
pub fn unknown_command(cmd: &str, out: &mut String) -> anyhow::Result<()> {
    writeln!(out, "Unknown command: `{cmd}`. Type `help` to list commands.")?;
    Ok(())
}

fn sorted_commands() -> Vec<&'static CommandMeta> {
    let mut commands: Vec<&'static CommandMeta> = COMMANDS.iter().collect();
    commands.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });
    commands
}

fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("  {:<8} {}\n", command.name, command.desc));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_groups_by_category() {
        let mut out = String::new();
        run(&mut out).unwrap();

        let navigation = out.find("[Navigation]").unwrap();
        let utility = out.find("[Utility]").unwrap();
        assert!(navigation < utility);
        assert!(out.contains("  goto     Jump to a page number"));
        assert_eq!(out.lines().filter(|line| line.starts_with("  ")).count(), COMMANDS.len());
    }

    #[test]
    fn test_display_category() {
        assert_eq!(display_category("navigation"), "Navigation");
        assert_eq!(display_category(""), "");
    }
}
