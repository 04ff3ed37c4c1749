//! Cancellable delayed actions.
//!
//! Every timer the engine starts is a spawned task paired with a
//! `CancelToken`. Tokens are cooperative: a task checks its token under the
//! engine lock after each wake-up and does nothing once it is cancelled.
//! A `TaskSet` holds the handles of one session, at most one per kind.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::task::JoinHandle;

/// Cooperative cancellation flag.
///
/// A delayed action holds a clone and checks it after every suspension,
/// before touching state. A child token also reports its parent's
/// cancellation, so cancelling a session token stops every task spawned
/// for that session.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    own: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl CancelToken {
    /// A fresh, uncancelled root token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled by either itself or `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            own: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::clone(&self.own)),
        }
    }

    /// Cancel this token and every child of it.
    pub fn cancel(&self) {
        self.own.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.own.load(Ordering::Acquire)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.load(Ordering::Acquire))
    }
}

/// Which delayed action a task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Ends the preview and starts play.
    Preview,
    /// Waits out the resolution delay of a second pick.
    Resolution,
    /// Advances the elapsed time while playing.
    Ticker,
    /// Moves a won game to `Finished`.
    Settle,
}

/// A spawned delayed action and its token.
pub struct TaskHandle {
    cancel_token: CancelToken,
    join_handle: Option<JoinHandle<()>>,
}

impl TaskHandle {
    #[must_use]
    pub fn new(cancel_token: CancelToken, join_handle: JoinHandle<()>) -> Self {
        Self {
            cancel_token,
            join_handle: Some(join_handle),
        }
    }

    /// Ask the task to stop. It exits at its next wake-up.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Has the task run to completion?
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join_handle
            .as_ref()
            .map_or(true, JoinHandle::is_finished)
    }
}

/// The delayed actions belonging to one session, at most one per kind.
#[derive(Default)]
pub struct TaskSet {
    handles: Vec<(TaskKind, TaskHandle)>,
}

impl TaskSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `handle`, cancelling any earlier task of the same kind.
    pub fn insert(&mut self, kind: TaskKind, handle: TaskHandle) {
        self.cancel(kind);
        self.handles.retain(|(_, h)| !h.is_finished());
        self.handles.push((kind, handle));
    }

    /// Cancel and forget the task of `kind`.
    pub fn cancel(&mut self, kind: TaskKind) {
        for (_, handle) in self.handles.iter().filter(|(k, _)| *k == kind) {
            handle.cancel();
        }
        self.remove(kind);
    }

    /// Forget the task of `kind` without cancelling it. Used by a task
    /// that has done its work.
    pub fn remove(&mut self, kind: TaskKind) {
        self.handles.retain(|(k, _)| *k != kind);
    }

    /// Cancel every tracked task.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain(..) {
            handle.cancel();
        }
    }

    /// Kinds with a live, uncancelled task.
    #[must_use]
    pub fn active(&self) -> Vec<TaskKind> {
        self.handles
            .iter()
            .filter(|(_, h)| !h.is_cancelled() && !h.is_finished())
            .map(|(k, _)| *k)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_task(token: &CancelToken) -> TaskHandle {
        TaskHandle::new(token.clone(), tokio::spawn(std::future::pending()))
    }

    #[test]
    fn test_child_sees_parent_cancel() {
        let parent = CancelToken::new();
        let child = parent.child();
        assert!(!child.is_cancelled());

        parent.cancel();
        assert!(child.is_cancelled());
    }

    #[test]
    fn test_child_cancel_leaves_parent() {
        let parent = CancelToken::new();
        let child = parent.child();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_insert_replaces_same_kind() {
        let mut tasks = TaskSet::new();
        let first = CancelToken::new();
        let second = CancelToken::new();

        tasks.insert(TaskKind::Ticker, pending_task(&first));
        tasks.insert(TaskKind::Ticker, pending_task(&second));

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(tasks.active(), vec![TaskKind::Ticker]);
    }

    #[tokio::test]
    async fn test_remove_does_not_cancel() {
        let mut tasks = TaskSet::new();
        let resolution = CancelToken::new();

        tasks.insert(TaskKind::Resolution, pending_task(&resolution));
        tasks.remove(TaskKind::Resolution);

        assert!(!resolution.is_cancelled());
        assert!(tasks.active().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let mut tasks = TaskSet::new();
        let preview = CancelToken::new();
        let settle = CancelToken::new();

        tasks.insert(TaskKind::Preview, pending_task(&preview));
        tasks.insert(TaskKind::Settle, pending_task(&settle));
        tasks.cancel_all();

        assert!(preview.is_cancelled());
        assert!(settle.is_cancelled());
        assert!(tasks.active().is_empty());
    }
}
