//! Category filter tab bar
//!
//! Displays the filter categories with the active one highlighted, and
//! the filtered/total counts on the right.

use iocraft::prelude::*;

use crate::tui::browser::filter::FilterCategory;
use crate::tui::theme::theme;

/// Props for the FilterTabs component
#[derive(Default, Props)]
pub struct FilterTabsProps {
    /// The active category
    pub category: FilterCategory,
    /// Repositories passing the current filter state
    pub filtered_count: usize,
    /// Size of the full collection
    pub total_count: usize,
}

/// Tab bar showing the filter categories
#[component]
pub fn FilterTabs(props: &FilterTabsProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let active = props.category;

    element! {
        View(
            width: 100pct,
            padding_left: 1,
            border_edges: Edges::Bottom,
            border_style: BorderStyle::Single,
            border_color: theme.border,
        ) {
            #(FilterCategory::ORDER.iter().map(|category| {
                let is_active = *category == active;
                element! {
                    Text(
                        content: format!("[{}] ", category.label()),
                        color: if is_active { Color::Cyan } else { theme.text_dimmed },
                        weight: if is_active { Weight::Bold } else { Weight::Normal },
                    )
                }
            }))
            View(flex_grow: 1.0)
            Text(
                content: format!("{}/{} ", props.filtered_count, props.total_count),
                color: theme.text_dimmed,
            )
        }
    }
}
