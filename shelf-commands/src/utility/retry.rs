use std::fmt::Write;

use shelf_utils::pagination::PageStatus;

use crate::render::render_view;
use crate::{CommandMeta, Session};

pub const META: CommandMeta = CommandMeta {
    name: "retry",
    desc: "Request the current page again after a failure.",
    category: "utility",
    usage: "retry",
};

pub fn run(session: &mut Session, out: &mut String) -> anyhow::Result<()> {
    if !matches!(session.table.view().status, PageStatus::Failed(_)) {
        writeln!(out, "Nothing to retry.")?;
        return Ok(());
    }

    session.table.retry();
    render_view(&session.table.view(), out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use shelf_core::Settings;

    use super::*;
    use crate::testing::{session_with, settled_session};

    #[tokio::test(start_paused = true)]
    async fn test_retry_without_failure() {
        let mut session = settled_session(25).await;
        let mut out = String::new();

        run(&mut session, &mut out).unwrap();

        assert_eq!(out, "Nothing to retry.\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_page_recovers_after_retry() {
        let mut session = session_with(25, Settings::default().with_simulated_failures(1));
        session.table.settle().await;

        let mut out = String::new();
        render_view(&session.table.view(), &mut out).unwrap();
        assert!(out.starts_with("(<<) (<) (>) (>>)  Page 1 of ?\n"));
        assert!(out.contains(
            "Failed to load page: source unavailable: simulated network failure (try `retry`)"
        ));
        assert!(out.ends_with("0 Rows\n"));

        out.clear();
        run(&mut session, &mut out).unwrap();
        assert_eq!(out, "(<<) (<) (>) (>>)  Page 1 of ?\nLoading...\n");

        session.table.settle().await;
        assert_eq!(session.table.view().status, PageStatus::Ready);

        out.clear();
        render_view(&session.table.view(), &mut out).unwrap();
        assert!(out.starts_with("(<<) (<) [>] [>>]  Page 1 of 3"));
        assert!(!out.contains("Failed to load page"));
        assert!(out.ends_with("10 Rows\n"));

        out.clear();
        run(&mut session, &mut out).unwrap();
        assert_eq!(out, "Nothing to retry.\n");
    }
}
