//! Browser header component
//!
//! Shows the application name, the browsed account, and a loading
//! indicator while a fetch is in flight.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the BrowserHeader component
#[derive(Default, Props)]
pub struct BrowserHeaderProps {
    /// Account being browsed, if one was resolved up front
    pub account: Option<String>,
    /// Whether the session browses only starred repositories
    pub starred_only: bool,
    /// Whether a load is in flight
    pub is_loading: bool,
}

/// Header row showing "stargazer" with the browse target
#[component]
pub fn BrowserHeader(props: &BrowserHeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let subtitle = match (&props.account, props.starred_only) {
        (Some(account), true) => format!(" starred by {}", account),
        (Some(account), false) => format!(" {}", account),
        (None, true) => " your starred repositories".to_string(),
        (None, false) => " your repositories".to_string(),
    };

    element! {
        View(
            width: 100pct,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(
                content: "stargazer",
                color: Color::Cyan,
                weight: Weight::Bold,
            )
            Text(
                content: subtitle,
                color: theme.text_dimmed,
            )
            View(flex_grow: 1.0)
            #(props.is_loading.then(|| element! {
                Text(content: "loading...", color: Color::Yellow)
            }))
            Text(content: " [?]", color: theme.text_dimmed)
        }
    }
}
