use std::fmt::Write;

use crate::{CommandMeta, Session};

pub const META: CommandMeta = CommandMeta {
    name: "state",
    desc: "Print the pagination state as JSON.",
    category: "utility",
    usage: "state",
};

pub fn run(session: &mut Session, out: &mut String) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&session.table.state())?;
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::settled_session;

    #[tokio::test(start_paused = true)]
    async fn test_state_is_camel_case_json() {
        let mut session = settled_session(25).await;
        session.table.set_page_index(2);
        let mut out = String::new();

        run(&mut session, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!({ "pageIndex": 2, "pageSize": 10 }));
    }
}
