//! Viewer session state
//!
//! Per-session state of the file viewer: which node is selected, the content
//! shown for it, and the transient "copied" flag. Content fetches are not
//! cancelled; each selection gets a ticket and content arriving for an older
//! ticket is dropped.

use std::time::{Duration, Instant};

use crate::content::FileContent;
use crate::tree::NodeId;

/// How long the "copied" indicator stays on
pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_secs(2);

/// Identifies one selection; only the latest ticket may deliver content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionTicket(u64);

/// Transient "copied" indicator
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    deadline: Option<Instant>,
    window: Option<Duration>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom window instead of [`COPY_FEEDBACK_WINDOW`]
    pub fn with_window(window: Duration) -> Self {
        Self {
            deadline: None,
            window: Some(window),
        }
    }

    /// Arm the indicator; any pending deadline is replaced, not stacked
    pub fn mark_copied(&mut self, now: Instant) {
        self.deadline = Some(now + self.window.unwrap_or(COPY_FEEDBACK_WINDOW));
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    pub fn reset(&mut self) {
        self.deadline = None;
    }
}

/// State of one file viewer
#[derive(Debug, Clone, Default)]
pub struct ViewerSession {
    generation: u64,
    selected: Option<NodeId>,
    content: Option<FileContent>,
    dropped: u64,
    pub copy_feedback: CopyFeedback,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a node, superseding any earlier selection
    pub fn select(&mut self, node_id: impl Into<NodeId>) -> SelectionTicket {
        self.generation += 1;
        self.selected = Some(node_id.into());
        self.content = None;
        SelectionTicket(self.generation)
    }

    /// Deliver content for a selection. Returns false (and drops the
    /// content) when a newer selection has been made since.
    pub fn apply_content(&mut self, ticket: SelectionTicket, content: FileContent) -> bool {
        if ticket.0 != self.generation {
            self.dropped += 1;
            tracing::debug!(
                "Dropping stale content for '{}' (ticket {}, current {})",
                content.target,
                ticket.0,
                self.generation
            );
            return false;
        }
        self.content = Some(content);
        true
    }

    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn content(&self) -> Option<&FileContent> {
        self.content.as_ref()
    }

    /// Number of content deliveries dropped as stale
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Copy the shown content: returns the text for the clipboard and arms
    /// the feedback indicator
    pub fn copy_content(&mut self, now: Instant) -> Option<String> {
        let text = self.content.as_ref()?.content.clone();
        self.copy_feedback.mark_copied(now);
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentOrigin;

    fn content(target: &str) -> FileContent {
        FileContent {
            item: "theme-switcher".to_string(),
            target: target.to_string(),
            content: format!("// {}", target),
            origin: ContentOrigin::Manifest,
        }
    }

    #[test]
    fn test_latest_selection_wins() {
        let mut session = ViewerSession::new();
        let slow = session.select("components/a.tsx");
        let fast = session.select("components/b.tsx");

        assert!(session.apply_content(fast, content("components/b.tsx")));
        // the slower fetch resolves after the newer selection
        assert!(!session.apply_content(slow, content("components/a.tsx")));

        assert_eq!(session.selected(), Some("components/b.tsx"));
        assert_eq!(session.content().unwrap().target, "components/b.tsx");
        assert_eq!(session.dropped(), 1);
        assert!(!session.is_current(slow));
    }

    #[test]
    fn test_select_clears_content() {
        let mut session = ViewerSession::new();
        let ticket = session.select("a.tsx");
        session.apply_content(ticket, content("a.tsx"));
        session.select("b.tsx");
        assert!(session.content().is_none());
    }

    #[test]
    fn test_copy_feedback_window() {
        let start = Instant::now();
        let mut feedback = CopyFeedback::new();
        assert!(!feedback.is_active(start));

        feedback.mark_copied(start);
        assert!(feedback.is_active(start + Duration::from_millis(1999)));
        assert!(!feedback.is_active(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_copy_feedback_rearm_replaces_deadline() {
        let start = Instant::now();
        let mut feedback = CopyFeedback::new();
        feedback.mark_copied(start);
        feedback.mark_copied(start + Duration::from_millis(1500));

        // active until 2s after the second copy, not the first
        assert!(feedback.is_active(start + Duration::from_millis(3000)));
        assert!(!feedback.is_active(start + Duration::from_millis(3500)));

        feedback.reset();
        assert!(!feedback.is_active(start));
    }

    #[test]
    fn test_copy_content() {
        let now = Instant::now();
        let mut session = ViewerSession::new();
        assert!(session.copy_content(now).is_none());

        let ticket = session.select("a.tsx");
        session.apply_content(ticket, content("a.tsx"));
        assert_eq!(session.copy_content(now).as_deref(), Some("// a.tsx"));
        assert!(session.copy_feedback.is_active(now));
    }

    #[test]
    fn test_custom_window() {
        let now = Instant::now();
        let mut feedback = CopyFeedback::with_window(Duration::from_millis(10));
        feedback.mark_copied(now);
        assert!(!feedback.is_active(now + Duration::from_millis(10)));
    }
}
