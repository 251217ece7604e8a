//! Drag-and-drop gesture reducer.
//!
//! Moving a card is modeled as an explicit state machine rather than a direct
//! mutation, so every intermediate pointer state is representable and the
//! storage write happens exactly once, at drop. The reducer is pure: it emits
//! a [`PendingMove`] and the caller applies it through the board repository.

use crate::model::{Status, Task};

/// Gesture state: either nothing is being dragged, or exactly one card is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task_id: String,
        /// Column currently hovered, already resolved to a status id
        over: Option<String>,
    },
}

/// The move a finished gesture asks the board to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub task_id: String,
    pub status_id: String,
}

/// Reducer over [`DragState`].
///
/// Events that make no sense in the current state are ignored rather than
/// errors: a stray `over` or `finish` while idle leaves the state untouched,
/// matching how pointer event streams behave in practice.
#[derive(Debug, Default)]
pub struct DragGesture {
    state: DragState,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The column the gesture currently hovers, for live highlighting
    pub fn hovered_column(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_deref(),
            DragState::Idle => None,
        }
    }

    /// Begin dragging `task_id`. Starting while a drag is already live
    /// abandons the previous gesture and begins a fresh one.
    pub fn start(&mut self, task_id: impl Into<String>) {
        self.state = DragState::Dragging {
            task_id: task_id.into(),
            over: None,
        };
    }

    /// Record what the pointer hovers. The target is resolved to a column on
    /// every drag-over, not just at drop, so the hovered column can be
    /// highlighted live; an unresolvable target hovers nothing. Ignored
    /// while idle.
    pub fn over(&mut self, target: Option<&str>, statuses: &[Status], tasks: &[Task]) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = target.and_then(|t| resolve_drop_target(t, statuses, tasks));
        }
    }

    /// Drop. Returns the move to apply when the gesture ended over a
    /// resolved column; returns `None` (and still resets to idle) when the
    /// drop was over nothing.
    pub fn finish(&mut self) -> Option<PendingMove> {
        let state = std::mem::take(&mut self.state);
        let DragState::Dragging { task_id, over } = state else {
            return None;
        };
        over.map(|status_id| PendingMove { task_id, status_id })
    }

    /// Abandon the gesture without moving anything
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Resolve a drop target identifier to a column.
///
/// Hovering a column uses that column; hovering another card lands in that
/// card's column. Unknown identifiers resolve to nothing.
pub fn resolve_drop_target(
    target: &str,
    statuses: &[Status],
    tasks: &[Task],
) -> Option<String> {
    if statuses.iter().any(|status| status.id == target) {
        return Some(target.to_string());
    }
    tasks
        .iter()
        .find(|task| task.id == target)
        .map(|task| task.status_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: &str) -> Status {
        Status {
            id: id.to_string(),
            name: format!("col {id}"),
            project_id: "p1".to_string(),
        }
    }

    fn task(id: &str, status_id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            deadline: None,
            assignee: None,
            tags: Vec::new(),
            status_id: status_id.to_string(),
            project_id: "p1".to_string(),
            comments: Vec::new(),
            completed: false,
        }
    }

    #[test]
    fn drop_on_column_moves_there() {
        let statuses = vec![status("s1"), status("s2")];
        let tasks = vec![task("t1", "s1")];

        let mut gesture = DragGesture::new();
        gesture.start("t1");
        gesture.over(Some("s2"), &statuses, &tasks);
        assert_eq!(gesture.hovered_column(), Some("s2"));

        let pending = gesture.finish().expect("move");
        assert_eq!(pending.task_id, "t1");
        assert_eq!(pending.status_id, "s2");
        assert_eq!(gesture.state(), &DragState::Idle);
    }

    #[test]
    fn hovering_a_card_highlights_its_column() {
        let statuses = vec![status("s1"), status("s2")];
        let tasks = vec![task("t1", "s1"), task("t2", "s2")];

        let mut gesture = DragGesture::new();
        gesture.start("t1");
        gesture.over(Some("t2"), &statuses, &tasks);
        assert_eq!(gesture.hovered_column(), Some("s2"));

        let pending = gesture.finish().expect("move");
        assert_eq!(pending.status_id, "s2");
    }

    #[test]
    fn drop_over_nothing_is_a_silent_noop() {
        let statuses = vec![status("s1")];
        let tasks = vec![task("t1", "s1")];

        let mut gesture = DragGesture::new();
        gesture.start("t1");
        gesture.over(None, &statuses, &tasks);
        assert!(gesture.finish().is_none());
        assert_eq!(gesture.state(), &DragState::Idle);
    }

    #[test]
    fn unknown_identifier_hovers_nothing() {
        let statuses = vec![status("s1")];
        let tasks = vec![task("t1", "s1")];

        let mut gesture = DragGesture::new();
        gesture.start("t1");
        gesture.over(Some("nope"), &statuses, &tasks);
        assert_eq!(gesture.hovered_column(), None);
        assert!(gesture.finish().is_none());
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let statuses = vec![status("s1")];
        let mut gesture = DragGesture::new();
        gesture.over(Some("s1"), &statuses, &[]);
        assert_eq!(gesture.state(), &DragState::Idle);
        assert!(gesture.finish().is_none());
    }

    #[test]
    fn cancel_resets_without_a_move() {
        let statuses = vec![status("s1")];
        let mut gesture = DragGesture::new();
        gesture.start("t1");
        gesture.over(Some("s1"), &statuses, &[]);
        gesture.cancel();
        assert!(!gesture.is_dragging());
        assert!(gesture.finish().is_none());
    }

    #[test]
    fn restart_replaces_the_live_gesture() {
        let statuses = vec![status("s1")];
        let mut gesture = DragGesture::new();
        gesture.start("t1");
        gesture.over(Some("s1"), &statuses, &[]);
        gesture.start("t2");
        assert_eq!(
            gesture.state(),
            &DragState::Dragging {
                task_id: "t2".to_string(),
                over: None,
            }
        );
    }
}
