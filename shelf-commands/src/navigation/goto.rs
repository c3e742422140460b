use std::fmt::Write;

use shelf_utils::pagination::parse_one_based_page;

use crate::render::render_view;
use crate::{CommandMeta, Session};

pub const META: CommandMeta = CommandMeta {
    name: "goto",
    desc: "Jump to a page number (starts at 1).",
    category: "navigation",
    usage: "goto [page]",
};

/// Jump to a one-based page.
///
/// Inputs:
/// - optional page number; empty input jumps to the first page.
///
/// Error behavior:
/// - non-numeric input returns usage text.
/// - numbers below 1 land on the first page; numbers past the end show an empty page.
pub fn run(session: &mut Session, arg1: Option<&str>, out: &mut String) -> anyhow::Result<()> {
    let Some(page_index) = parse_one_based_page(arg1) else {
        writeln!(out, "Usage: `{}` (page starts at 1)", META.usage)?;
        return Ok(());
    };

    session.table.set_page_index(page_index);
    render_view(&session.table.view(), out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::settled_session;

    #[tokio::test(start_paused = true)]
    async fn test_goto_is_one_based() {
        let mut session = settled_session(25).await;
        let mut out = String::new();

        run(&mut session, Some("3"), &mut out).unwrap();
        assert_eq!(session.table.state().page_index, 2);

        run(&mut session, None, &mut out).unwrap();
        assert_eq!(session.table.state().page_index, 0);

        run(&mut session, Some("-2"), &mut out).unwrap();
        assert_eq!(session.table.state().page_index, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_goto_past_the_end_renders_empty_page() {
        let mut session = settled_session(25).await;
        let mut out = String::new();

        run(&mut session, Some("9"), &mut out).unwrap();
        session.table.settle().await;
        out.clear();
        render_view(&session.table.view(), &mut out).unwrap();

        assert!(out.contains("Page 9 of 3"));
        assert!(out.ends_with("0 Rows\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_goto_rejects_words() {
        let mut session = settled_session(25).await;
        let mut out = String::new();

        run(&mut session, Some("two"), &mut out).unwrap();

        assert_eq!(out, "Usage: `goto [page]` (page starts at 1)\n");
        assert_eq!(session.table.state().page_index, 0);
    }
}
