//! Help modal listing keyboard shortcuts

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the HelpModal component
#[derive(Default, Props)]
pub struct HelpModalProps {}

/// Centered overlay listing all keyboard shortcuts
#[component]
pub fn HelpModal(_props: &HelpModalProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            height: 100pct,
            position: Position::Absolute,
            top: 0,
            left: 0,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
        ) {
            View(
                width: 50,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Double,
                border_color: theme.border_focused,
                background_color: Color::Black,
                padding: 1,
            ) {
                Text(content: "Keyboard Shortcuts", color: theme.text, weight: Weight::Bold)
                Text(content: "")
                #(bindings().iter().map(|(key, description)| {
                    element! {
                        Text(
                            content: format!("  {:<12} {}", key, description),
                            color: theme.text,
                        )
                    }
                }))
                Text(content: "")
                Text(content: "Esc to close", color: theme.text_dimmed)
            }
        }
    }
}

fn bindings() -> &'static [(&'static str, &'static str)] {
    &[
        ("j/k, ↑/↓", "Move selection"),
        ("g / G", "Jump to top / bottom"),
        ("PgUp/PgDn", "Move half a page"),
        ("/", "Focus search"),
        ("Esc", "Clear search"),
        ("Tab", "Cycle filter category"),
        ("s", "Star / unstar"),
        ("f", "Fork"),
        ("y", "Copy clone URL"),
        ("o", "Open in browser"),
        ("i", "Issues"),
        ("p", "Pull requests"),
        ("w", "Watch / unwatch"),
        ("r", "Refresh"),
        ("q, Ctrl+C", "Quit"),
    ]
}
