//! Action dispatch for the repository browser.
//!
//! User triggers become [`ActionMessage`] values consumed exactly once
//! by [`dispatch`], which performs at most one side-effecting call and
//! returns an [`ActionOutcome`]: a notification plus an optional state
//! patch. The session applies the outcome afterwards, so a record is
//! never mutated before the underlying call has succeeded, and no
//! failure escapes the dispatch boundary.

use std::fmt;
use std::process::{Command, Stdio};

use crate::error::StargazerError;
use crate::github::{RepoHost, Repository};
use crate::tui::components::Toast;

/// The fixed set of per-repository actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Star,
    Fork,
    Clone,
    OpenBrowser,
    Issues,
    PullRequests,
    Watch,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Star => "star",
            ActionKind::Fork => "fork",
            ActionKind::Clone => "copy clone URL",
            ActionKind::OpenBrowser => "open in browser",
            ActionKind::Issues => "issues",
            ActionKind::PullRequests => "pull requests",
            ActionKind::Watch => "watch",
        };
        write!(f, "{}", name)
    }
}

/// One action request against one target record. Created by the actions
/// pane, consumed exactly once by [`dispatch`].
#[derive(Debug, Clone)]
pub struct ActionMessage {
    pub kind: ActionKind,
    /// Value copy of the record at trigger time.
    pub target: Repository,
}

/// In-memory reconciliation to apply after a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoPatch {
    SetStarred { full_name: String, starred: bool },
}

/// What a dispatch produced: always a notification, sometimes a patch.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub toast: Toast,
    pub patch: Option<RepoPatch>,
}

impl ActionOutcome {
    fn notify(toast: Toast) -> Self {
        Self { toast, patch: None }
    }
}

/// Perform the side effect for one action message.
///
/// Never returns an error: every failure is converted into an
/// error-severity toast naming the action and target, and leaves the
/// record untouched.
pub async fn dispatch(host: &impl RepoHost, message: ActionMessage) -> ActionOutcome {
    let ActionMessage { kind, target } = message;
    tracing::debug!(action = %kind, repo = %target.full_name, "dispatching action");

    match kind {
        ActionKind::Star => {
            if target.starred {
                match host.unstar(&target.owner.login, &target.name).await {
                    Ok(()) => ActionOutcome {
                        toast: Toast::info(format!("Unstarred {}", target.full_name)),
                        patch: Some(RepoPatch::SetStarred {
                            full_name: target.full_name,
                            starred: false,
                        }),
                    },
                    Err(e) => failure(kind, &target, &e),
                }
            } else {
                match host.star(&target.owner.login, &target.name).await {
                    Ok(()) => ActionOutcome {
                        toast: Toast::info(format!("Starred {}", target.full_name)),
                        patch: Some(RepoPatch::SetStarred {
                            full_name: target.full_name,
                            starred: true,
                        }),
                    },
                    Err(e) => failure(kind, &target, &e),
                }
            }
        }

        ActionKind::Fork => match host.fork(&target.owner.login, &target.name).await {
            Ok(forked) => ActionOutcome::notify(Toast::info(format!(
                "Forked {} to {}",
                target.full_name, forked.full_name
            ))),
            Err(e) => failure(kind, &target, &e),
        },

        ActionKind::Clone => copy_clone_url(&target),

        ActionKind::OpenBrowser => match open_url(&target.html_url) {
            Ok(()) => ActionOutcome::notify(Toast::info(format!(
                "Opened {} in browser",
                target.full_name
            ))),
            Err(e) => ActionOutcome::notify(Toast::error(format!(
                "Error performing {} for {}: {}",
                kind, target.full_name, e
            ))),
        },

        ActionKind::Issues => ActionOutcome::notify(Toast::info(format!(
            "Viewing issues for {} (feature coming soon)",
            target.full_name
        ))),
        ActionKind::PullRequests => ActionOutcome::notify(Toast::info(format!(
            "Viewing pull requests for {} (feature coming soon)",
            target.full_name
        ))),
        ActionKind::Watch => ActionOutcome::notify(Toast::info(format!(
            "Watch/unwatch for {} (feature coming soon)",
            target.full_name
        ))),
    }
}

fn failure(kind: ActionKind, target: &Repository, error: &StargazerError) -> ActionOutcome {
    tracing::warn!(action = %kind, repo = %target.full_name, %error, "action failed");
    ActionOutcome::notify(Toast::error(format!(
        "Error performing {} for {}: {}",
        kind, target.full_name, error
    )))
}

/// Put the clone URL on the clipboard; with no clipboard service
/// available, fall back to a notification carrying the URL. Never an
/// error condition.
fn copy_clone_url(target: &Repository) -> ActionOutcome {
    use clipboard_rs::Clipboard;

    let copied = clipboard_rs::ClipboardContext::new()
        .and_then(|ctx| ctx.set_text(target.clone_url.clone()))
        .is_ok();

    let toast = if copied {
        Toast::info(format!(
            "Copied clone URL to clipboard: {}",
            target.clone_url
        ))
    } else {
        Toast::info(format!("Clone URL: {}", target.clone_url))
    };
    ActionOutcome::notify(toast)
}

#[cfg(target_os = "macos")]
const OPEN_COMMAND: &[&str] = &["open"];
#[cfg(target_os = "windows")]
const OPEN_COMMAND: &[&str] = &["cmd", "/C", "start", ""];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPEN_COMMAND: &[&str] = &["xdg-open"];

/// Hand a URL to the platform opener, detached from the terminal.
fn open_url(url: &str) -> std::io::Result<()> {
    Command::new(OPEN_COMMAND[0])
        .args(&OPEN_COMMAND[1..])
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
