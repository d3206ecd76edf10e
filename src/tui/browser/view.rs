//! Main repository browser component
//!
//! Owns the session state and wires user input, the async loader, and
//! the action dispatcher together. All state transitions go through the
//! pure functions in [`super::model`]; this component only decides when
//! they run and performs the async plumbing around them.

// Allow clone on Copy types - used intentionally in async closures for clarity
#![allow(clippy::clone_on_copy)]

use std::sync::Arc;

use iocraft::prelude::*;

use crate::github::GitHubClient;
use crate::tui::components::{Footer, InlineSearchBox, Toast, render_toast};
use crate::tui::theme::theme;

use super::components::{ActionsPane, BrowserHeader, DetailPane, FilterTabs, HelpModal, RepoTable};
use super::dispatch::{ActionMessage, ActionOutcome, dispatch};
use super::keymap::{KeymapSnapshot, key_to_action};
use super::loader::{BrowseMode, load_repositories};
use super::model::{
    BrowserAction, BrowserState, apply_load, apply_outcome, begin_load, compute_view_model, reduce,
};

/// Props for the RepoBrowser component
#[derive(Default, Props)]
pub struct RepoBrowserProps {
    /// Authenticated API client. The browse command retains its own
    /// handle and closes the transport after the session ends.
    pub client: Option<Arc<GitHubClient>>,
    /// Account to browse; the loader resolves the authenticated user
    /// when none is given.
    pub target_account: Option<String>,
    /// Whether to browse all repositories or only starred ones.
    pub mode: BrowseMode,
}

/// Main repository browser component
#[component]
pub fn RepoBrowser<'a>(props: &RepoBrowserProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let theme = theme();

    let client = props.client.clone();
    let target_account = props.target_account.clone();
    let mode = props.mode;

    let state: State<BrowserState> = hooks.use_state(BrowserState::default);

    // Rows available to the table between the chrome rows (header, tabs,
    // search, table border and column header, footer).
    let list_height = (height.saturating_sub(9) as usize).max(1);

    // Async load handler; completions are applied through the
    // generation check so a superseded load can never clobber state.
    let load_handler: Handler<u64> = hooks.use_async_handler({
        let state = state.clone();
        let client = client.clone();
        let target_account = target_account.clone();

        move |generation: u64| {
            let mut state = state.clone();
            let client = client.clone();
            let target_account = target_account.clone();

            async move {
                let result = match &client {
                    Some(client) => {
                        load_repositories(client.as_ref(), target_account.as_deref(), mode)
                            .await
                            .map_err(|e| e.to_string())
                    }
                    None => Err("no API client configured".to_string()),
                };

                let mut next = state.read().clone();
                apply_load(&mut next, generation, result, list_height);
                state.set(next);
            }
        }
    });

    // Async action dispatch handler.
    let dispatch_handler: Handler<ActionMessage> = hooks.use_async_handler({
        let state = state.clone();
        let client = client.clone();

        move |message: ActionMessage| {
            let mut state = state.clone();
            let client = client.clone();

            async move {
                let outcome = match &client {
                    Some(client) => dispatch(client.as_ref(), message).await,
                    None => ActionOutcome {
                        toast: Toast::error("no API client configured"),
                        patch: None,
                    },
                };

                let mut next = state.read().clone();
                apply_outcome(&mut next, outcome);
                state.set(next);
            }
        }
    });

    // Trigger the initial load exactly once, on mount.
    let mut load_started = hooks.use_state(|| false);
    if !load_started.get() {
        load_started.set(true);
        let mut state = state.clone();
        let mut next = state.read().clone();
        let generation = begin_load(&mut next);
        state.set(next);
        load_handler.clone()(generation);
    }

    let load_handler_for_events = load_handler.clone();
    let dispatch_handler_for_events = dispatch_handler.clone();

    hooks.use_terminal_events({
        let mut state = state.clone();
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let snapshot = {
                    let current = state.read();
                    KeymapSnapshot {
                        search_focused: current.search_focused,
                        show_help: current.show_help,
                    }
                };
                let Some(action) = key_to_action(code, modifiers, &snapshot) else {
                    return;
                };

                match action {
                    BrowserAction::Refresh => {
                        let mut next = state.read().clone();
                        let generation = begin_load(&mut next);
                        next.toast = Some(Toast::info("Refreshing repositories..."));
                        state.set(next);
                        load_handler_for_events.clone()(generation);
                    }
                    BrowserAction::Trigger(kind) => {
                        let target = state.read().selected_repository();
                        match target {
                            Some(target) => {
                                dispatch_handler_for_events.clone()(ActionMessage {
                                    kind,
                                    target,
                                });
                            }
                            None => {
                                let mut next = state.read().clone();
                                next.toast = Some(Toast::info("No repository selected"));
                                state.set(next);
                            }
                        }
                    }
                    action => {
                        let mut next = state.read().clone();
                        reduce(&mut next, action, list_height);
                        state.set(next);
                    }
                }
            }
            _ => {}
        }
    });

    if state.read().should_exit {
        system.exit();
    }

    let vm = compute_view_model(&state.read(), list_height);

    let mut search_state = state.clone();
    let on_search_change = move |query: String| {
        let mut next = search_state.read().clone();
        reduce(&mut next, BrowserAction::UpdateSearch(query), list_height);
        search_state.set(next);
    };

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            BrowserHeader(
                account: target_account.clone(),
                starred_only: mode == BrowseMode::StarredOnly,
                is_loading: vm.is_loading,
            )

            FilterTabs(
                category: vm.category,
                filtered_count: vm.filtered_count,
                total_count: vm.total_count,
            )

            View(
                width: 100pct,
                height: 1,
                padding_left: 1,
                padding_right: 1,
            ) {
                InlineSearchBox(
                    value: vm.search_query.clone(),
                    has_focus: vm.search_focused,
                    on_change: on_search_change,
                )
            }

            View(
                flex_grow: 1.0,
                width: 100pct,
                flex_direction: FlexDirection::Row,
            ) {
                RepoTable(
                    rows: vm.rows.clone(),
                    filtered_count: vm.filtered_count,
                    is_loading: vm.is_loading,
                )

                View(
                    width: 40pct,
                    height: 100pct,
                    flex_direction: FlexDirection::Column,
                ) {
                    DetailPane(selected: vm.selected.clone())
                    ActionsPane(selected: vm.selected.clone())
                }
            }

            Footer(shortcuts: vm.shortcuts.clone())

            #(render_toast(&vm.toast))

            #(vm.show_help.then(|| element! { HelpModal() }))
        }
    }
}
