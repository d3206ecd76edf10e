//! Browser state and pure state transitions.
//!
//! The session's reactive state lives in one plain struct,
//! [`BrowserState`], owned exclusively by the browser component. Every
//! mutation path goes through the pure functions here: the reducer for
//! user input, [`apply_load`] for loader completions, and
//! [`apply_outcome`] for action-dispatch completions. Each of them
//! re-synchronizes the dependent state (filtered view, selection)
//! before returning, so rendering can never observe a half-updated
//! state.

use jiff::Timestamp;

use crate::github::Repository;
use crate::tui::components::{Shortcut, Toast};
use crate::tui::navigation::ListCursor;

use super::dispatch::{ActionKind, ActionOutcome, RepoPatch};
use super::filter::{FilterCategory, filter_repositories};

// ============================================================================
// State
// ============================================================================

/// Raw session state that changes during interaction.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    /// Full collection for the current target account. Empty until the
    /// first load completes.
    pub repositories: Vec<Repository>,

    /// Free-text filter, matched case-insensitively.
    pub search_query: String,
    /// Whether keystrokes currently go to the search box.
    pub search_focused: bool,
    /// Category filter combined with the query.
    pub category: FilterCategory,

    /// Selection and scroll position within the filtered collection.
    pub cursor: ListCursor,

    /// Latest notification, replaced by each new one.
    pub toast: Option<Toast>,
    /// Whether the keyboard-shortcuts modal is open.
    pub show_help: bool,

    /// Whether a load is in flight.
    pub is_loading: bool,
    /// Generation tag of the newest load. Completions carrying an older
    /// generation are discarded.
    pub load_generation: u64,

    /// Set on quit; the component exits on the next render pass.
    pub should_exit: bool,
}

impl BrowserState {
    /// The filtered collection under the current filter state.
    pub fn filtered(&self) -> Vec<Repository> {
        filter_repositories(&self.repositories, &self.search_query, self.category)
    }

    /// The currently selected record, if any.
    pub fn selected_repository(&self) -> Option<Repository> {
        let filtered = self.filtered();
        self.cursor.index.and_then(|i| filtered.get(i).cloned())
    }

    fn selected_full_name(&self) -> Option<String> {
        self.selected_repository().map(|repo| repo.full_name)
    }

    /// Rebuild selection after the filtered collection changed: keep the
    /// previously selected record when it is still present, otherwise
    /// clear the selection.
    fn resync_selection(&mut self, previously_selected: Option<String>, list_height: usize) {
        let filtered = self.filtered();
        let position = previously_selected
            .and_then(|full_name| filtered.iter().position(|r| r.full_name == full_name));
        self.cursor.retarget(position, filtered.len(), list_height);
    }
}

/// Mark the start of a new load and return its generation tag.
///
/// Any load still in flight is superseded: its completion will carry a
/// stale generation and be discarded by [`apply_load`].
pub fn begin_load(state: &mut BrowserState) -> u64 {
    state.load_generation += 1;
    state.is_loading = true;
    state.load_generation
}

/// Apply a loader completion, unless a newer load has started since.
pub fn apply_load(
    state: &mut BrowserState,
    generation: u64,
    result: Result<Vec<Repository>, String>,
    list_height: usize,
) {
    if generation != state.load_generation {
        tracing::debug!(generation, current = state.load_generation, "discarding superseded load");
        return;
    }

    state.is_loading = false;
    match result {
        Ok(repositories) => {
            let previously_selected = state.selected_full_name();
            state.repositories = repositories;
            state.resync_selection(previously_selected, list_height);
        }
        Err(message) => {
            // Collection state is left untouched.
            state.toast = Some(Toast::error(format!(
                "Error loading repositories: {}",
                message
            )));
        }
    }
}

/// Apply a completed action dispatch: show its notification and patch
/// the target record when the underlying call succeeded.
pub fn apply_outcome(state: &mut BrowserState, outcome: ActionOutcome) {
    if let Some(RepoPatch::SetStarred { full_name, starred }) = outcome.patch {
        if let Some(repo) = state
            .repositories
            .iter_mut()
            .find(|r| r.full_name == full_name)
        {
            repo.starred = starred;
        }
    }
    state.toast = Some(outcome.toast);
}

// ============================================================================
// Actions
// ============================================================================

/// All session-level actions a key press can map to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,

    // Search
    FocusSearch,
    ExitSearch,
    ClearSearch,
    UpdateSearch(String),

    // Category filter
    NextCategory,
    PrevCategory,

    // Modals
    ToggleHelp,

    // Async operations, handled by the component rather than the reducer
    Refresh,
    Trigger(ActionKind),

    // App
    Quit,
}

/// Pure reducer: apply one action to the state.
///
/// `Refresh` and `Trigger` require async I/O and are dispatched by the
/// component; the reducer leaves the state unchanged for them.
pub fn reduce(state: &mut BrowserState, action: BrowserAction, list_height: usize) {
    let filtered_len = state.filtered().len();

    match action {
        BrowserAction::MoveUp => state.cursor.up(filtered_len, list_height),
        BrowserAction::MoveDown => state.cursor.down(filtered_len, list_height),
        BrowserAction::GoToTop => state.cursor.top(filtered_len),
        BrowserAction::GoToBottom => state.cursor.bottom(filtered_len, list_height),
        BrowserAction::PageUp => state.cursor.page_up(filtered_len, list_height),
        BrowserAction::PageDown => state.cursor.page_down(filtered_len, list_height),

        BrowserAction::FocusSearch => state.search_focused = true,
        BrowserAction::ExitSearch => state.search_focused = false,
        BrowserAction::ClearSearch => {
            let previously_selected = state.selected_full_name();
            state.search_query.clear();
            state.search_focused = false;
            state.resync_selection(previously_selected, list_height);
        }
        BrowserAction::UpdateSearch(query) => {
            let previously_selected = state.selected_full_name();
            state.search_query = query;
            state.resync_selection(previously_selected, list_height);
        }

        BrowserAction::NextCategory => {
            let previously_selected = state.selected_full_name();
            state.category = state.category.next();
            state.resync_selection(previously_selected, list_height);
        }
        BrowserAction::PrevCategory => {
            let previously_selected = state.selected_full_name();
            state.category = state.category.prev();
            state.resync_selection(previously_selected, list_height);
        }

        BrowserAction::ToggleHelp => state.show_help = !state.show_help,

        BrowserAction::Refresh | BrowserAction::Trigger(_) => {}

        BrowserAction::Quit => state.should_exit = true,
    }
}

// ============================================================================
// View model
// ============================================================================

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRow {
    /// Row key: maps the row back to its record.
    pub full_name: String,
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub updated: String,
    pub starred: bool,
    pub private: bool,
    pub is_selected: bool,
}

/// Everything the render pass needs, computed from [`BrowserState`].
#[derive(Debug, Clone)]
pub struct BrowserViewModel {
    /// Visible window of table rows.
    pub rows: Vec<RepoRow>,
    pub filtered_count: usize,
    pub total_count: usize,
    pub scroll_offset: usize,
    /// Selected record for the detail and actions panes.
    pub selected: Option<Repository>,
    pub search_query: String,
    pub search_focused: bool,
    pub category: FilterCategory,
    pub is_loading: bool,
    pub show_help: bool,
    pub toast: Option<Toast>,
    pub shortcuts: Vec<Shortcut>,
}

/// Pure function: compute the view model from the current state.
pub fn compute_view_model(state: &BrowserState, list_height: usize) -> BrowserViewModel {
    let filtered = state.filtered();
    let selected = state.cursor.index.and_then(|i| filtered.get(i).cloned());

    let rows = filtered
        .iter()
        .enumerate()
        .skip(state.cursor.offset)
        .take(list_height.max(1))
        .map(|(i, repo)| RepoRow {
            full_name: repo.full_name.clone(),
            name: repo.name.clone(),
            description: truncate(repo.description.as_deref().unwrap_or(""), 40),
            language: repo.language.clone().unwrap_or_default(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            updated: format_date(&repo.updated_at),
            starred: repo.starred,
            private: repo.private,
            is_selected: state.cursor.index == Some(i),
        })
        .collect();

    BrowserViewModel {
        rows,
        filtered_count: filtered.len(),
        total_count: state.repositories.len(),
        scroll_offset: state.cursor.offset,
        selected,
        search_query: state.search_query.clone(),
        search_focused: state.search_focused,
        category: state.category,
        is_loading: state.is_loading,
        show_help: state.show_help,
        toast: state.toast.clone(),
        shortcuts: compute_shortcuts(state),
    }
}

/// The fixed ordered field list for the detail pane.
pub fn detail_fields(repo: &Repository) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        (
            "Language",
            repo.language.clone().unwrap_or_else(|| "N/A".to_string()),
        ),
        ("Stars", repo.stargazers_count.to_string()),
        ("Forks", repo.forks_count.to_string()),
        ("Issues", repo.open_issues_count.to_string()),
        (
            "License",
            repo.license
                .as_ref()
                .map(|l| l.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        ("Private", yes_no(repo.private)),
        ("Fork", yes_no(repo.fork)),
    ];

    if let Some(homepage) = &repo.homepage
        && !homepage.is_empty()
    {
        fields.push(("Homepage", homepage.clone()));
    }

    fields.push(("Clone URL", repo.clone_url.clone()));
    fields.push(("HTML URL", repo.html_url.clone()));

    fields.push(("Created", format_timestamp(&repo.created_at)));
    fields.push(("Updated", format_timestamp(&repo.updated_at)));
    if let Some(pushed_at) = &repo.pushed_at {
        fields.push(("Last Push", format_timestamp(pushed_at)));
    }

    fields
}

fn compute_shortcuts(state: &BrowserState) -> Vec<Shortcut> {
    if state.show_help {
        return vec![Shortcut::new("Esc", "Close")];
    }
    if state.search_focused {
        return vec![
            Shortcut::new("Enter", "Apply Search"),
            Shortcut::new("Esc", "Clear & Exit"),
            Shortcut::new("C-c", "Quit"),
        ];
    }

    let star_label = match state.selected_repository() {
        Some(repo) if repo.starred => "Unstar",
        _ => "Star",
    };

    vec![
        Shortcut::new("q", "Quit"),
        Shortcut::new("r", "Refresh"),
        Shortcut::new("/", "Search"),
        Shortcut::new("Tab", "Filter"),
        Shortcut::new("j/k", "Nav"),
        Shortcut::new("s", star_label),
        Shortcut::new("f", "Fork"),
        Shortcut::new("y", "Clone URL"),
        Shortcut::new("o", "Browser"),
        Shortcut::new("?", "Help"),
    ]
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn format_date(timestamp: &Timestamp) -> String {
    timestamp.strftime("%Y-%m-%d").to_string()
}

fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.strftime("%Y-%m-%d %H:%M:%S").to_string()
}
