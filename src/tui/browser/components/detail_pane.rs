//! Repository detail pane component
//!
//! Displays the selected repository's attributes as a fixed field list,
//! or a placeholder prompt when nothing is selected.

use iocraft::prelude::*;

use crate::github::Repository;
use crate::tui::browser::model::detail_fields;
use crate::tui::theme::theme;

/// Props for the DetailPane component
#[derive(Default, Props)]
pub struct DetailPaneProps {
    /// Selected repository (if any)
    pub selected: Option<Repository>,
}

/// Detail pane showing repository attributes
#[component]
pub fn DetailPane(props: &DetailPaneProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            height: 60pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border,
        ) {
            #(render_detail(&props.selected))
        }
    }
}

fn render_detail(selected: &Option<Repository>) -> Option<AnyElement<'static>> {
    let theme = theme();

    let Some(repo) = selected else {
        return Some(
            element! {
                View(
                    flex_grow: 1.0,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                ) {
                    Text(
                        content: "Select a repository to view details",
                        color: theme.text_dimmed,
                    )
                }
            }
            .into_any(),
        );
    };

    let full_name = repo.full_name.clone();
    let description = repo.description.clone().unwrap_or_default();
    let fields = detail_fields(repo);

    Some(
        element! {
            View(
                width: 100pct,
                height: 100pct,
                flex_direction: FlexDirection::Column,
                overflow: Overflow::Hidden,
            ) {
                View(
                    width: 100pct,
                    padding_left: 1,
                    padding_right: 1,
                    flex_direction: FlexDirection::Column,
                    border_edges: Edges::Bottom,
                    border_style: BorderStyle::Single,
                    border_color: theme.border,
                ) {
                    Text(content: full_name, color: theme.name_color, weight: Weight::Bold)
                    #((!description.is_empty()).then(|| element! {
                        Text(content: description.clone(), color: theme.text)
                    }))
                }

                View(
                    width: 100pct,
                    padding_left: 1,
                    padding_right: 1,
                    flex_direction: FlexDirection::Column,
                    overflow: Overflow::Hidden,
                ) {
                    #(fields.iter().map(|(label, value)| {
                        let label = *label;
                        let value = value.clone();
                        element! {
                            View(flex_direction: FlexDirection::Row) {
                                Text(
                                    content: format!("{}: ", label),
                                    color: theme.text_dimmed,
                                    weight: Weight::Bold,
                                )
                                Text(content: value, color: theme.text)
                            }
                        }
                    }))
                }
            }
        }
        .into_any(),
    )
}
