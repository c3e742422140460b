//! Navigation control descriptors (first/previous/next/last).

use super::view::TableView;

/// A navigation move offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
}

impl NavAction {
    pub const ALL: [NavAction; 4] = [
        NavAction::First,
        NavAction::Previous,
        NavAction::Next,
        NavAction::Last,
    ];

    /// Command word for this action.
    pub fn as_str(self) -> &'static str {
        match self {
            NavAction::First => "first",
            NavAction::Previous => "prev",
            NavAction::Next => "next",
            NavAction::Last => "last",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NavAction::First => "<<",
            NavAction::Previous => "<",
            NavAction::Next => ">",
            NavAction::Last => ">>",
        }
    }

    /// Parse a command word, accepting a few common spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "first" | "<<" => Some(NavAction::First),
            "prev" | "previous" | "<" => Some(NavAction::Previous),
            "next" | ">" => Some(NavAction::Next),
            "last" | ">>" => Some(NavAction::Last),
            _ => None,
        }
    }
}

/// One navigation control and whether it may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControl {
    pub action: NavAction,
    pub disabled: bool,
}

/// The four navigation controls for a view.
///
/// First/previous are disabled on the first page; next/last are disabled when no
/// later page is known to exist.
pub fn build_nav_controls<R>(view: &TableView<R>) -> [NavControl; 4] {
    NavAction::ALL.map(|action| NavControl {
        action,
        disabled: match action {
            NavAction::First | NavAction::Previous => !view.can_go_previous(),
            NavAction::Next | NavAction::Last => !view.can_go_next(),
        },
    })
}

/// Look up the control for `action`.
pub fn nav_control<R>(view: &TableView<R>, action: NavAction) -> NavControl {
    build_nav_controls(view)
        .into_iter()
        .find(|control| control.action == action)
        .unwrap_or(NavControl {
            action,
            disabled: true,
        })
}

#[cfg(test)]
mod tests {
    use shelf_core::PageResult;
    use std::sync::Arc;

    use super::*;
    use crate::pagination::{PageCount, PageStatus, PaginationState};

    fn view_at(page_index: usize, page_count: PageCount) -> TableView<u8> {
        TableView::new(
            Some(Arc::new(PageResult::new(vec![0], 3))),
            PaginationState {
                page_index,
                page_size: 10,
            },
            page_count,
            PageStatus::Ready,
        )
    }

    #[test]
    fn test_first_page_disables_backwards() {
        let controls = build_nav_controls(&view_at(0, PageCount::Known(3)));
        let disabled: Vec<bool> = controls.iter().map(|c| c.disabled).collect();
        assert_eq!(disabled, vec![true, true, false, false]);
    }

    #[test]
    fn test_last_page_disables_forwards() {
        let view = view_at(2, PageCount::Known(3));
        assert!(nav_control(&view, NavAction::Next).disabled);
        assert!(nav_control(&view, NavAction::Last).disabled);
        assert!(!nav_control(&view, NavAction::Previous).disabled);
    }

    #[test]
    fn test_unknown_count_disables_forwards() {
        let view = view_at(0, PageCount::Unknown);
        assert!(nav_control(&view, NavAction::Next).disabled);
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(NavAction::parse("PREV"), Some(NavAction::Previous));
        assert_eq!(NavAction::parse(">>"), Some(NavAction::Last));
        assert_eq!(NavAction::parse("jump"), None);
        for action in NavAction::ALL {
            assert_eq!(NavAction::parse(action.as_str()), Some(action));
        }
    }
}
