//! Repository table component
//!
//! Renders the filtered collection as rows with a fixed column layout.
//! The row set is rebuilt from scratch on every sync; there is no
//! incremental diffing.

use iocraft::prelude::*;

use crate::tui::browser::model::RepoRow;
use crate::tui::theme::theme;

/// Props for the RepoTable component
#[derive(Default, Props)]
pub struct RepoTableProps {
    /// Visible window of rows, already filtered and paginated
    pub rows: Vec<RepoRow>,
    /// Total number of rows passing the filter
    pub filtered_count: usize,
    /// Whether the initial load is still in flight
    pub is_loading: bool,
}

/// Table pane listing repositories
#[component]
pub fn RepoTable(props: &RepoTableProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 60pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border_focused,
        ) {
            #(render_table_body(props))
        }
    }
}

fn render_table_body(props: &RepoTableProps) -> Option<AnyElement<'static>> {
    let theme = theme();

    if props.is_loading && props.rows.is_empty() {
        return Some(
            element! {
                View(
                    flex_grow: 1.0,
                    width: 100pct,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                ) {
                    Text(content: "Loading repositories...", color: theme.text_dimmed)
                }
            }
            .into_any(),
        );
    }

    if props.filtered_count == 0 {
        return Some(
            element! {
                View(
                    flex_grow: 1.0,
                    width: 100pct,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                ) {
                    Text(content: "No matching repositories", color: theme.text_dimmed)
                }
            }
            .into_any(),
        );
    }

    let rows = props.rows.clone();

    Some(
        element! {
            View(
                width: 100pct,
                height: 100pct,
                flex_direction: FlexDirection::Column,
            ) {
                // Column headers
                View(
                    width: 100pct,
                    flex_direction: FlexDirection::Row,
                    border_edges: Edges::Bottom,
                    border_style: BorderStyle::Single,
                    border_color: theme.border,
                ) {
                    View(width: 2)
                    View(width: 24) { Text(content: "Name", weight: Weight::Bold, color: theme.text) }
                    View(flex_grow: 1.0) { Text(content: "Description", weight: Weight::Bold, color: theme.text) }
                    View(width: 12) { Text(content: "Language", weight: Weight::Bold, color: theme.text) }
                    View(width: 7) { Text(content: "Stars", weight: Weight::Bold, color: theme.text) }
                    View(width: 7) { Text(content: "Forks", weight: Weight::Bold, color: theme.text) }
                    View(width: 11) { Text(content: "Updated", weight: Weight::Bold, color: theme.text) }
                }

                #(rows.iter().map(|row| render_row(row)))
            }
        }
        .into_any(),
    )
}

fn render_row(row: &RepoRow) -> AnyElement<'static> {
    let theme = theme();

    let marker = if row.starred { "★" } else { " " };
    let name_color = if row.private {
        theme.visibility_private
    } else {
        theme.name_color
    };
    let background = row.is_selected.then_some(theme.highlight);
    let text_color = if row.is_selected {
        Color::White
    } else {
        theme.text
    };

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            background_color: background,
        ) {
            View(width: 2) { Text(content: marker, color: theme.starred) }
            View(width: 24) { Text(content: row.name.clone(), color: name_color) }
            View(flex_grow: 1.0) { Text(content: row.description.clone(), color: text_color) }
            View(width: 12) { Text(content: row.language.clone(), color: theme.language) }
            View(width: 7) { Text(content: row.stars.to_string(), color: text_color) }
            View(width: 7) { Text(content: row.forks.to_string(), color: text_color) }
            View(width: 11) { Text(content: row.updated.clone(), color: theme.text_dimmed) }
        }
    }
    .into_any()
}
