pub mod navigation;
pub mod render;
pub mod session;
pub mod utility;

pub use session::{ProductTable, Session};

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    navigation::step::FIRST_META,
    navigation::step::PREVIOUS_META,
    navigation::step::NEXT_META,
    navigation::step::LAST_META,
    navigation::goto::META,
    navigation::size::META,
    utility::show::META,
    utility::state::META,
    utility::stats::META,
    utility::retry::META,
    utility::reload::META,
    utility::help::META,
    utility::usage::META,
    utility::quit::META,
    // Add new commands here
];

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Answer to the startup prompt shown while the catalog cannot be loaded.
///
/// `quit` or `exit` gives up; anything else, including a blank line, tries again.
pub fn startup_flow(line: &str) -> Flow {
    if is_quit(&line.trim().to_ascii_lowercase()) {
        Flow::Quit
    } else {
        Flow::Continue
    }
}

fn is_quit(cmd: &str) -> bool {
    matches!(cmd, "quit" | "exit")
}

/// Route one input line to its command, writing the reply into `out`.
pub async fn handle_line(session: &mut Session, line: &str, out: &mut String) -> anyhow::Result<Flow> {
    let content = line.trim();
    if content.is_empty() {
        return Ok(Flow::Continue);
    }

    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let arg1 = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(action) = shelf_utils::pagination::NavAction::parse(&cmd) {
        navigation::step::run(session, action, out)?;
        return Ok(Flow::Continue);
    }

    match cmd.as_str() {
        "goto" | "go" => navigation::goto::run(session, arg1, out)?,
        "size" => navigation::size::run(session, arg1, out)?,
        "show" | "rerender" => utility::show::run(session, out)?,
        "state" => utility::state::run(session, out)?,
        "stats" => utility::stats::run(session, out)?,
        "retry" => utility::retry::run(session, out)?,
        "reload" => utility::reload::run(session, out).await?,
        "help" => utility::help::run(out)?,
        "usage" => utility::usage::run(arg1, out)?,
        cmd if is_quit(cmd) => return Ok(Flow::Quit),
        // Add new commands here
        _ => utility::help::unknown_command(&cmd, out)?,
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
pub(crate) mod testing {
    use shelf_catalog::{Catalog, Product};
    use shelf_core::{Context, Settings};

    use crate::Session;

    pub fn products(count: u64) -> Vec<Product> {
        (1..=count)
            .map(|id| Product {
                id,
                title: format!("Product {id}"),
                price: id as f64 + 0.5,
                brand: (id % 2 == 0).then(|| "Acme".to_owned()),
                description: format!("Description of product {id}"),
                rating: 4.5,
            })
            .collect()
    }

    /// A session over `count` products with a 500 ms page latency.
    pub fn session(count: u64) -> Session {
        session_with(count, Settings::default().with_latency_ms(500))
    }

    pub fn session_with(count: u64, settings: Settings) -> Session {
        let ctx = Context::new(settings).expect("context");
        Session::mount(ctx, Catalog::new(products(count))).expect("mount")
    }

    pub async fn settled_session(count: u64) -> Session {
        let mut session = session(count);
        session.table.settle().await;
        session
    }
}
