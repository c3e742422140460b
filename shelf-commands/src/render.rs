//! Plain-text rendering of a table view.

use std::fmt::Write;

use shelf_catalog::Product;
use shelf_utils::pagination::{PageStatus, TableView, build_nav_controls};

const DESCRIPTION_WIDTH: usize = 48;

struct Column {
    header: &'static str,
    cell: fn(&Product) -> String,
}

const COLUMNS: &[Column] = &[
    Column {
        header: "Name",
        cell: |product| product.title.clone(),
    },
    Column {
        header: "Price",
        cell: |product| format!("${}", product.price),
    },
    Column {
        header: "Brand",
        cell: |product| product.brand.clone().unwrap_or_default(),
    },
    Column {
        header: "Description",
        cell: |product| truncate(&product.description, DESCRIPTION_WIDTH),
    },
    Column {
        header: "Rating",
        cell: |product| format!("{}⭐", product.rating),
    },
    Column {
        header: "ID",
        cell: |product| product.id.to_string(),
    },
];

/// Render one frame: navigation, footer, rows, and status lines.
pub fn render_view(view: &TableView<Product>, out: &mut String) -> std::fmt::Result {
    let controls = build_nav_controls(view)
        .iter()
        .map(|control| {
            if control.disabled {
                format!("({})", control.action.label())
            } else {
                format!("[{}]", control.action.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{controls}  {}", view.footer_text())?;

    match &view.status {
        PageStatus::Loading => {
            writeln!(out, "Loading...")?;
            return Ok(());
        }
        PageStatus::Failed(error) => writeln!(out, "Failed to load page: {error} (try `retry`)")?,
        PageStatus::Placeholder => writeln!(out, "Loading...")?,
        PageStatus::Ready => {}
    }

    render_rows(view.rows(), out)?;
    writeln!(out, "{} Rows", view.rows().len())
}

fn render_rows(rows: &[Product], out: &mut String) -> std::fmt::Result {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|product| COLUMNS.iter().map(|column| (column.cell)(product)).collect())
        .collect();

    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(column.header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let headers: Vec<String> = COLUMNS.iter().map(|c| c.header.to_owned()).collect();
    write_row(&headers, &widths, out)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_row(&rule, &widths, out)?;
    for row in &cells {
        write_row(row, &widths, out)?;
    }
    Ok(())
}

fn write_row(cells: &[String], widths: &[usize], out: &mut String) -> std::fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{}", line.trim_end())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut shortened: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{session, settled_session};

    #[tokio::test(start_paused = true)]
    async fn test_ready_view() {
        let session = settled_session(25).await;
        let mut out = String::new();
        render_view(&session.table.view(), &mut out).unwrap();

        assert!(out.starts_with("(<<) (<) [>] [>>]  Page 1 of 3"));
        assert!(out.contains("Name"));
        assert!(out.contains("$1.5"));
        assert!(out.contains("4.5⭐"));
        assert!(out.contains("Product 10"));
        assert!(!out.contains("Product 11"));
        assert!(out.ends_with("10 Rows\n"));
        assert!(!out.contains("Loading..."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_view() {
        let session = session(25);
        let mut out = String::new();
        render_view(&session.table.view(), &mut out).unwrap();

        assert_eq!(out, "(<<) (<) (>) (>>)  Page 1 of ?\nLoading...\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 10), "a longe...");
    }
}
