//! Search input component
//!
//! A one-line text input used for incremental filtering. The value is
//! owned by the session state; this component only reports changes
//! through `on_change`.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the InlineSearchBox component
#[derive(Default, Props)]
pub struct InlineSearchBoxProps {
    /// Current query text
    pub value: String,
    /// Whether the search box has focus
    pub has_focus: bool,
    /// Invoked with the new query on every edit
    pub on_change: Handler<String>,
}

/// Inline search input without borders
#[component]
pub fn InlineSearchBox(props: &InlineSearchBoxProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let has_focus = props.has_focus;

    element! {
        View(
            flex_direction: FlexDirection::Row,
            width: 100pct,
            height: 1,
        ) {
            View(
                margin_right: 1,
                justify_content: JustifyContent::Center,
            ) {
                Text(
                    content: "/",
                    color: if has_focus { theme.border_focused } else { theme.text_dimmed },
                )
            }

            View(flex_grow: 1.0) {
                TextInput(
                    value: props.value.clone(),
                    has_focus: has_focus,
                    on_change: props.on_change.clone(),
                    color: theme.text,
                )
            }
        }
    }
}
