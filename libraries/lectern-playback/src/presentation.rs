//! Presentation state
//!
//! UI-only affordances kept apart from the playback session: the speed menu
//! and the currently displayed notice.

use crate::notice::{Notice, NoticeKind};
use crate::types::PlayerConfig;

/// UI state not coupled to media state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationState {
    speed_menu_open: bool,
    notice: Option<Notice>,
    last_notice_id: u64,
}

impl PresentationState {
    /// Create closed/empty presentation state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the speed menu is open
    pub fn speed_menu_open(&self) -> bool {
        self.speed_menu_open
    }

    /// Flip the speed menu, returning the new state
    pub fn toggle_speed_menu(&mut self) -> bool {
        self.speed_menu_open = !self.speed_menu_open;
        self.speed_menu_open
    }

    /// Close the speed menu
    pub fn close_speed_menu(&mut self) {
        self.speed_menu_open = false;
    }

    /// Currently displayed notice
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Replace the displayed notice with a fresh one of `kind`
    pub fn raise_notice(&mut self, kind: NoticeKind, config: &PlayerConfig) -> Notice {
        self.last_notice_id += 1;
        let notice = Notice::new(self.last_notice_id, kind, config);
        self.notice = Some(notice.clone());
        notice
    }

    /// Dismiss the notice with `id`
    ///
    /// Returns false when a different (newer) notice is showing or none is.
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        match &self.notice {
            Some(notice) if notice.id == id => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_menu_toggles() {
        let mut state = PresentationState::new();
        assert!(state.toggle_speed_menu());
        assert!(!state.toggle_speed_menu());
        state.toggle_speed_menu();
        state.close_speed_menu();
        assert!(!state.speed_menu_open());
    }

    #[test]
    fn stale_dismissal_keeps_newer_notice() {
        let config = PlayerConfig::default();
        let mut state = PresentationState::new();

        let first = state.raise_notice(NoticeKind::AudioUnavailable, &config);
        let second = state.raise_notice(NoticeKind::LoadFailed, &config);
        assert!(second.id > first.id);

        assert!(!state.dismiss_notice(first.id));
        assert_eq!(state.notice().map(|n| n.id), Some(second.id));

        assert!(state.dismiss_notice(second.id));
        assert!(state.notice().is_none());
    }
}
