//! Quick actions pane component
//!
//! Lists the per-repository action triggers. Each trigger carries the
//! currently presented record as its target; the star label follows the
//! record's current starred state.

use iocraft::prelude::*;

use crate::github::Repository;
use crate::tui::theme::theme;

/// Props for the ActionsPane component
#[derive(Default, Props)]
pub struct ActionsPaneProps {
    /// Repository the triggers act on (if any)
    pub selected: Option<Repository>,
}

/// Actions pane listing the keyboard triggers
#[component]
pub fn ActionsPane(props: &ActionsPaneProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let star_label = match &props.selected {
        Some(repo) if repo.starred => "Unstar",
        _ => "Star",
    };
    let enabled = props.selected.is_some();
    let key_color = if enabled {
        theme.highlight
    } else {
        theme.text_dimmed
    };
    let text_color = if enabled { theme.text } else { theme.text_dimmed };

    let triggers: Vec<(&'static str, String)> = vec![
        ("s", star_label.to_string()),
        ("f", "Fork".to_string()),
        ("y", "Copy Clone URL".to_string()),
        ("o", "Open in Browser".to_string()),
        ("i", "Issues".to_string()),
        ("p", "Pull Requests".to_string()),
        ("w", "Watch/Unwatch".to_string()),
    ];

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: "Quick Actions", color: theme.text, weight: Weight::Bold)
            #(triggers.into_iter().map(move |(key, label)| {
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(content: format!("[{}]", key), color: key_color, weight: Weight::Bold)
                        Text(content: format!(" {}", label), color: text_color)
                    }
                }
            }))
        }
    }
}
