//! Tests for the repository browser core: loading and starred
//! annotation, load supersession, filtering, selection synchronization,
//! and action dispatch with in-memory reconciliation.

use std::sync::Mutex;

use jiff::Timestamp;
use tokio::sync::oneshot;

use crate::error::{Result, StargazerError};
use crate::github::{RepoHost, RepoOwner, Repository};
use crate::tui::components::ToastLevel;

use super::dispatch::{ActionKind, ActionMessage, RepoPatch, dispatch};
use super::filter::{FilterCategory, filter_repositories};
use super::loader::{BrowseMode, load_repositories};
use super::model::{
    BrowserAction, BrowserState, apply_load, apply_outcome, begin_load, compute_view_model, reduce,
};

// ============================================================================
// Helpers
// ============================================================================

/// Build a repository record with the given owner and name; tests adjust
/// individual fields from there.
pub fn mock_repo(owner: &str, name: &str) -> Repository {
    Repository {
        id: 1,
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        description: None,
        private: false,
        fork: false,
        language: None,
        stargazers_count: 0,
        watchers_count: 0,
        forks_count: 0,
        open_issues_count: 0,
        size: 0,
        default_branch: "main".to_string(),
        homepage: None,
        topics: vec![],
        license: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        pushed_at: None,
        html_url: format!("https://github.com/{owner}/{name}"),
        clone_url: format!("https://github.com/{owner}/{name}.git"),
        ssh_url: format!("git@github.com:{owner}/{name}.git"),
        owner: RepoOwner {
            login: owner.to_string(),
            avatar_url: String::new(),
            html_url: format!("https://github.com/{owner}"),
        },
        starred: false,
    }
}

/// Scripted host recording every call it receives.
#[derive(Default)]
struct MockHost {
    login: String,
    repositories: Vec<Repository>,
    starred: Vec<Repository>,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl MockHost {
    fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            ..Default::default()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<()> {
        if self.fail {
            Err(StargazerError::Api("simulated API failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RepoHost for MockHost {
    async fn resolve_authenticated_login(&self) -> Result<String> {
        self.record("resolve".to_string());
        self.check_failure()?;
        Ok(self.login.clone())
    }

    async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>> {
        self.record(format!("list_repositories {account}"));
        self.check_failure()?;
        Ok(self.repositories.clone())
    }

    async fn list_starred(&self, account: &str) -> Result<Vec<Repository>> {
        self.record(format!("list_starred {account}"));
        self.check_failure()?;
        Ok(self.starred.clone())
    }

    async fn star(&self, owner: &str, name: &str) -> Result<()> {
        self.record(format!("star {owner}/{name}"));
        self.check_failure()
    }

    async fn unstar(&self, owner: &str, name: &str) -> Result<()> {
        self.record(format!("unstar {owner}/{name}"));
        self.check_failure()
    }

    async fn fork(&self, owner: &str, name: &str) -> Result<Repository> {
        self.record(format!("fork {owner}/{name}"));
        self.check_failure()?;
        Ok(mock_repo(&self.login, name))
    }

    async fn close(self) {}
}

/// Host whose repository-list fetch blocks until released, for driving
/// out-of-order load completions.
struct GatedHost {
    inner: MockHost,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl RepoHost for GatedHost {
    async fn resolve_authenticated_login(&self) -> Result<String> {
        self.inner.resolve_authenticated_login().await
    }

    async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.list_repositories(account).await
    }

    async fn list_starred(&self, account: &str) -> Result<Vec<Repository>> {
        self.inner.list_starred(account).await
    }

    async fn star(&self, owner: &str, name: &str) -> Result<()> {
        self.inner.star(owner, name).await
    }

    async fn unstar(&self, owner: &str, name: &str) -> Result<()> {
        self.inner.unstar(owner, name).await
    }

    async fn fork(&self, owner: &str, name: &str) -> Result<Repository> {
        self.inner.fork(owner, name).await
    }

    async fn close(self) {}
}

fn state_with(repositories: Vec<Repository>) -> BrowserState {
    BrowserState {
        repositories,
        ..Default::default()
    }
}

const LIST_HEIGHT: usize = 20;

// ============================================================================
// Loader
// ============================================================================

#[tokio::test]
async fn test_load_annotates_starred_by_cross_reference() {
    let mut host = MockHost::new("alice");
    host.repositories = vec![mock_repo("alice", "one"), mock_repo("alice", "two")];
    host.starred = vec![mock_repo("alice", "two"), mock_repo("bob", "other")];

    let loaded = load_repositories(&host, Some("alice"), BrowseMode::Repositories)
        .await
        .unwrap();

    assert_eq!(loaded.len(), 2);
    assert!(!loaded[0].starred);
    assert!(loaded[1].starred);
    // explicit target: no account resolution call
    assert!(!host.calls().contains(&"resolve".to_string()));
}

#[tokio::test]
async fn test_load_resolves_authenticated_account_when_no_target() {
    let mut host = MockHost::new("me");
    host.repositories = vec![mock_repo("me", "mine")];

    load_repositories(&host, None, BrowseMode::Repositories)
        .await
        .unwrap();

    let calls = host.calls();
    assert_eq!(calls[0], "resolve");
    assert!(calls.contains(&"list_repositories me".to_string()));
    assert!(calls.contains(&"list_starred me".to_string()));
}

#[tokio::test]
async fn test_load_starred_only_marks_everything_starred() {
    let mut host = MockHost::new("alice");
    host.starred = vec![mock_repo("bob", "liked"), mock_repo("carol", "loved")];

    let loaded = load_repositories(&host, Some("alice"), BrowseMode::StarredOnly)
        .await
        .unwrap();

    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().all(|r| r.starred));
    // starred-only mode never fetches the repository list
    assert!(
        !host
            .calls()
            .iter()
            .any(|c| c.starts_with("list_repositories"))
    );
}

/// Scenario C: a loader failure leaves the collection at its prior value
/// and produces exactly one notification; the session stays usable.
#[tokio::test]
async fn test_load_failure_keeps_collection_and_notifies_once() {
    let mut host = MockHost::new("alice");
    host.fail = true;

    let mut state = BrowserState::default();
    let generation = begin_load(&mut state);

    let result = load_repositories(&host, Some("alice"), BrowseMode::Repositories)
        .await
        .map_err(|e| e.to_string());
    assert!(result.is_err());

    apply_load(&mut state, generation, result, LIST_HEIGHT);

    assert!(state.repositories.is_empty(), "collection left unchanged");
    assert!(!state.is_loading, "session is ready again");
    let toast = state.toast.expect("exactly one notification");
    assert_eq!(toast.level, ToastLevel::Error);
    assert!(toast.message.contains("Error loading repositories"));
}

// ============================================================================
// Load supersession
// ============================================================================

#[test]
fn test_superseded_load_result_is_discarded() {
    let mut state = BrowserState::default();

    let first = begin_load(&mut state);
    let second = begin_load(&mut state);
    assert!(second > first);

    // Newer load completes first and is applied.
    apply_load(
        &mut state,
        second,
        Ok(vec![mock_repo("a", "newer")]),
        LIST_HEIGHT,
    );
    // The superseded load resolves afterwards and must be ignored.
    apply_load(
        &mut state,
        first,
        Ok(vec![mock_repo("a", "stale")]),
        LIST_HEIGHT,
    );

    assert_eq!(state.repositories.len(), 1);
    assert_eq!(state.repositories[0].name, "newer");
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_refresh_supersedes_inflight_load() {
    // First load blocks on a gate; a refresh starts and finishes while
    // it is still in flight.
    let (release, gate) = oneshot::channel();
    let mut slow_inner = MockHost::new("alice");
    slow_inner.repositories = vec![mock_repo("alice", "stale")];
    let slow = GatedHost {
        inner: slow_inner,
        gate: Mutex::new(Some(gate)),
    };

    let mut fast = MockHost::new("alice");
    fast.repositories = vec![mock_repo("alice", "fresh")];

    let mut state = BrowserState::default();
    let first = begin_load(&mut state);
    let first_load = tokio::spawn(async move {
        load_repositories(&slow, Some("alice"), BrowseMode::Repositories)
            .await
            .map_err(|e| e.to_string())
    });

    let second = begin_load(&mut state);
    let second_result = load_repositories(&fast, Some("alice"), BrowseMode::Repositories)
        .await
        .map_err(|e| e.to_string());
    apply_load(&mut state, second, second_result, LIST_HEIGHT);
    assert_eq!(state.repositories[0].name, "fresh");

    // Now let the first load finish; its completion must be discarded.
    release.send(()).unwrap();
    let first_result = first_load.await.unwrap();
    apply_load(&mut state, first, first_result, LIST_HEIGHT);

    assert_eq!(state.repositories.len(), 1);
    assert_eq!(
        state.repositories[0].name, "fresh",
        "only the newest load's result may ever be applied"
    );
}

// ============================================================================
// Filtering end-to-end (scenario A)
// ============================================================================

#[test]
fn test_scenario_a_language_query_and_starred_category() {
    let mut python = mock_repo("u", "snake");
    python.language = Some("Python".to_string());
    python.starred = true;
    let mut javascript = mock_repo("u", "webthing");
    javascript.language = Some("JavaScript".to_string());

    let collection = vec![python.clone(), javascript];

    let by_query = filter_repositories(&collection, "python", FilterCategory::All);
    assert_eq!(by_query.len(), 1);
    assert_eq!(by_query[0].full_name, python.full_name);

    let by_category = filter_repositories(&collection, "", FilterCategory::Starred);
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].full_name, python.full_name);
}

// ============================================================================
// Selection synchronization
// ============================================================================

#[test]
fn test_selection_cleared_when_record_filtered_out() {
    let mut state = state_with(vec![
        mock_repo("a", "alpha"),
        mock_repo("a", "beta"),
        mock_repo("a", "gamma"),
    ]);
    reduce(&mut state, BrowserAction::MoveDown, LIST_HEIGHT);
    reduce(&mut state, BrowserAction::MoveDown, LIST_HEIGHT);
    assert_eq!(state.cursor.index, Some(1));

    // "alpha" does not match; the selected "beta" does not either.
    reduce(
        &mut state,
        BrowserAction::UpdateSearch("gamma".to_string()),
        LIST_HEIGHT,
    );
    assert_eq!(
        state.cursor.index, None,
        "selection must clear when the selected record leaves the view"
    );
    assert!(state.selected_repository().is_none());
}

#[test]
fn test_selection_follows_record_across_filter_changes() {
    let mut state = state_with(vec![
        mock_repo("a", "alpha"),
        mock_repo("a", "beta"),
        mock_repo("a", "betamax"),
    ]);
    reduce(&mut state, BrowserAction::MoveDown, LIST_HEIGHT);
    reduce(&mut state, BrowserAction::MoveDown, LIST_HEIGHT);
    assert_eq!(
        state.selected_repository().map(|r| r.name),
        Some("beta".to_string())
    );

    reduce(
        &mut state,
        BrowserAction::UpdateSearch("beta".to_string()),
        LIST_HEIGHT,
    );
    // Still selected, now at a different index.
    assert_eq!(state.cursor.index, Some(0));
    assert_eq!(
        state.selected_repository().map(|r| r.name),
        Some("beta".to_string())
    );
}

#[test]
fn test_selection_clamp_invariant_after_every_sync() {
    let mut state = state_with(
        (0..10)
            .map(|i| {
                let mut r = mock_repo("a", &format!("repo-{i}"));
                if i % 2 == 0 {
                    r.starred = true;
                }
                r
            })
            .collect(),
    );
    reduce(&mut state, BrowserAction::GoToBottom, LIST_HEIGHT);

    for action in [
        BrowserAction::NextCategory,
        BrowserAction::UpdateSearch("repo".to_string()),
        BrowserAction::NextCategory,
        BrowserAction::UpdateSearch("repo-0".to_string()),
        BrowserAction::ClearSearch,
        BrowserAction::PrevCategory,
    ] {
        reduce(&mut state, action, LIST_HEIGHT);
        let len = state.filtered().len();
        if let Some(index) = state.cursor.index {
            assert!(index < len, "index {index} out of bounds for {len} rows");
        }
    }
}

#[test]
fn test_empty_filtered_view_renders_no_rows_and_no_selection() {
    let mut state = state_with(vec![mock_repo("a", "alpha")]);
    reduce(&mut state, BrowserAction::MoveDown, LIST_HEIGHT);
    reduce(
        &mut state,
        BrowserAction::UpdateSearch("zzz".to_string()),
        LIST_HEIGHT,
    );

    let vm = compute_view_model(&state, LIST_HEIGHT);
    assert_eq!(vm.filtered_count, 0);
    assert!(vm.rows.is_empty());
    assert!(vm.selected.is_none());
}

// ============================================================================
// Action dispatch
// ============================================================================

/// Star toggling on the UI path: each dispatch issues exactly one API
/// call and flips the flag only after it succeeds.
#[tokio::test]
async fn test_star_dispatch_toggles_and_returns_to_original() {
    let host = MockHost::new("me");
    let mut state = state_with(vec![mock_repo("a", "r")]);
    reduce(&mut state, BrowserAction::MoveDown, LIST_HEIGHT);

    // First press: star.
    let target = state.selected_repository().unwrap();
    assert!(!target.starred);
    let outcome = dispatch(&host, ActionMessage { kind: ActionKind::Star, target }).await;
    assert_eq!(
        outcome.patch,
        Some(RepoPatch::SetStarred {
            full_name: "a/r".to_string(),
            starred: true
        })
    );
    apply_outcome(&mut state, outcome);
    assert!(state.repositories[0].starred);

    // Second press: unstar, back to the original value.
    let target = state.selected_repository().unwrap();
    let outcome = dispatch(&host, ActionMessage { kind: ActionKind::Star, target }).await;
    apply_outcome(&mut state, outcome);
    assert!(!state.repositories[0].starred);

    assert_eq!(host.calls(), vec!["star a/r", "unstar a/r"]);
}

/// Two rapid dispatches created from the same snapshot converge on the
/// same final state instead of corrupting the flag.
#[tokio::test]
async fn test_duplicate_star_dispatches_converge() {
    let host = MockHost::new("me");
    let mut state = state_with(vec![mock_repo("a", "r")]);
    let target = state.repositories[0].clone();

    let first = dispatch(
        &host,
        ActionMessage {
            kind: ActionKind::Star,
            target: target.clone(),
        },
    )
    .await;
    let second = dispatch(&host, ActionMessage { kind: ActionKind::Star, target }).await;

    apply_outcome(&mut state, first);
    apply_outcome(&mut state, second);
    assert!(state.repositories[0].starred);
}

#[tokio::test]
async fn test_star_failure_leaves_record_unchanged() {
    let mut host = MockHost::new("me");
    host.fail = true;
    let mut state = state_with(vec![mock_repo("a", "r")]);

    let target = state.repositories[0].clone();
    let outcome = dispatch(&host, ActionMessage { kind: ActionKind::Star, target }).await;
    assert!(outcome.patch.is_none());
    assert_eq!(outcome.toast.level, ToastLevel::Error);
    assert!(outcome.toast.message.contains("star"));
    assert!(outcome.toast.message.contains("a/r"));

    apply_outcome(&mut state, outcome);
    assert!(!state.repositories[0].starred);
}

/// Scenario B: fork calls the API once with the target's owner and name,
/// notifies with the fork's full name, and leaves the source unchanged.
#[tokio::test]
async fn test_fork_dispatch_calls_api_once_and_notifies() {
    let host = MockHost::new("me");
    let mut state = state_with(vec![mock_repo("a", "r")]);
    let before = state.repositories[0].clone();

    let outcome = dispatch(
        &host,
        ActionMessage {
            kind: ActionKind::Fork,
            target: before.clone(),
        },
    )
    .await;

    assert_eq!(host.calls(), vec!["fork a/r"]);
    assert!(outcome.toast.message.contains("me/r"));
    assert!(outcome.patch.is_none());

    apply_outcome(&mut state, outcome);
    assert_eq!(state.repositories[0], before, "source record unmodified");
}

/// The clone action is never an error: with no clipboard service the
/// notification itself carries the URL.
#[tokio::test]
async fn test_clone_dispatch_always_notifies_with_url() {
    let host = MockHost::new("me");
    let target = mock_repo("a", "r");
    let clone_url = target.clone_url.clone();

    let outcome = dispatch(&host, ActionMessage { kind: ActionKind::Clone, target }).await;

    assert_eq!(outcome.toast.level, ToastLevel::Info);
    assert!(outcome.toast.message.contains(&clone_url));
    assert!(outcome.patch.is_none());
    assert!(host.calls().is_empty(), "clone never touches the API");
}

#[tokio::test]
async fn test_placeholder_actions_acknowledge_without_api_calls() {
    let host = MockHost::new("me");

    for kind in [ActionKind::Issues, ActionKind::PullRequests, ActionKind::Watch] {
        let outcome = dispatch(
            &host,
            ActionMessage {
                kind,
                target: mock_repo("a", "r"),
            },
        )
        .await;
        assert_eq!(outcome.toast.level, ToastLevel::Info);
        assert!(outcome.toast.message.contains("coming soon"));
        assert!(outcome.patch.is_none());
    }

    assert!(host.calls().is_empty());
}

#[test]
fn test_apply_outcome_patches_only_matching_record() {
    let mut state = state_with(vec![mock_repo("a", "one"), mock_repo("a", "two")]);
    apply_outcome(
        &mut state,
        super::dispatch::ActionOutcome {
            toast: crate::tui::components::Toast::info("Starred a/two"),
            patch: Some(RepoPatch::SetStarred {
                full_name: "a/two".to_string(),
                starred: true,
            }),
        },
    );

    assert!(!state.repositories[0].starred);
    assert!(state.repositories[1].starred);
    assert!(state.toast.is_some());
}

// ============================================================================
// Session state machine
// ============================================================================

#[test]
fn test_begin_load_increments_generation_and_marks_loading() {
    let mut state = BrowserState::default();
    assert_eq!(begin_load(&mut state), 1);
    assert!(state.is_loading);
    assert_eq!(begin_load(&mut state), 2);
}

#[test]
fn test_quit_sets_exit_flag() {
    let mut state = BrowserState::default();
    reduce(&mut state, BrowserAction::Quit, LIST_HEIGHT);
    assert!(state.should_exit);
}

#[test]
fn test_search_focus_lifecycle() {
    let mut state = state_with(vec![mock_repo("a", "r")]);
    reduce(&mut state, BrowserAction::FocusSearch, LIST_HEIGHT);
    assert!(state.search_focused);

    reduce(
        &mut state,
        BrowserAction::UpdateSearch("r".to_string()),
        LIST_HEIGHT,
    );
    reduce(&mut state, BrowserAction::ExitSearch, LIST_HEIGHT);
    assert!(!state.search_focused);
    assert_eq!(state.search_query, "r");

    reduce(&mut state, BrowserAction::ClearSearch, LIST_HEIGHT);
    assert!(state.search_query.is_empty());
}

#[test]
fn test_successful_load_replaces_collection_and_selection_survives() {
    let mut state = state_with(vec![mock_repo("a", "keep"), mock_repo("a", "drop")]);
    reduce(&mut state, BrowserAction::MoveDown, LIST_HEIGHT);
    assert_eq!(
        state.selected_repository().map(|r| r.name),
        Some("keep".to_string())
    );

    let generation = begin_load(&mut state);
    apply_load(
        &mut state,
        generation,
        Ok(vec![mock_repo("a", "new"), mock_repo("a", "keep")]),
        LIST_HEIGHT,
    );

    assert_eq!(state.repositories.len(), 2);
    assert_eq!(
        state.selected_repository().map(|r| r.name),
        Some("keep".to_string()),
        "selection remaps to the record's new position"
    );
    assert_eq!(state.cursor.index, Some(1));
}
