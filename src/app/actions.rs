//! User-triggered actions: field edits, rebinding, mode selection, and
//! suggestion handling.

use crate::slice::{DisplayMode, LiveSlice, SliceUri};

use super::{App, Focus};

impl App {
    /// Text-change hook for the authority field.
    pub fn on_authority_changed(&mut self) {
        self.suggestion_selected = None;
        self.try_display_slice();
    }

    /// Text-change hook for the path field.
    pub fn on_path_changed(&mut self) {
        self.try_display_slice();
    }

    /// Rebuild the identifier from current input and rebind the display
    /// surface. Runs on every text change; empty fields still bind and are
    /// left to the resolution layer to reject.
    fn try_display_slice(&mut self) {
        // Blank the pane first; stale content must not survive resolution.
        self.current = None;
        self.scroll = 0;

        let uri = SliceUri::new(self.authority.text.as_str(), self.path.text.as_str());

        if !self.registry.can_acquire(&uri) {
            log::warn!("permission denied to access {uri}");
            // Teardown mirrors the cleared pane: a superseded stream may
            // not keep feeding the display.
            self.binder.unbind();
            return;
        }

        self.binder.rebind(LiveSlice::subscribe(&self.registry, &uri));
    }

    /// Exclusive display-density selection.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        self.scroll = 0;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Authority => Focus::Path,
            Focus::Path => Focus::Authority,
        };
        self.suggestion_selected = None;
    }

    /// Suggestions whose authority contains the current input text.
    pub fn filtered_suggestions(&self) -> Vec<&str> {
        let needle = self.authority.text.as_str();
        self.suggestions
            .iter()
            .map(String::as_str)
            .filter(|authority| authority.contains(needle))
            .collect()
    }

    pub fn select_next_suggestion(&mut self) {
        let len = self.filtered_suggestions().len();
        if len == 0 {
            self.suggestion_selected = None;
            return;
        }
        self.suggestion_selected = Some(match self.suggestion_selected {
            None => 0,
            Some(i) => (i + 1) % len,
        });
    }

    pub fn select_prev_suggestion(&mut self) {
        let len = self.filtered_suggestions().len();
        if len == 0 {
            self.suggestion_selected = None;
            return;
        }
        self.suggestion_selected = Some(match self.suggestion_selected {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Accept the highlighted suggestion into the authority field.
    /// Returns whether anything was accepted.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(index) = self.suggestion_selected else {
            return false;
        };
        let Some(authority) = self
            .filtered_suggestions()
            .get(index)
            .map(|s| (*s).to_string())
        else {
            return false;
        };
        self.authority.set_text(authority);
        self.on_authority_changed();
        true
    }

    /// Keep the dropdown selection valid after the list is replaced.
    pub(super) fn clamp_suggestion_selection(&mut self) {
        let len = self.filtered_suggestions().len();
        self.suggestion_selected = match self.suggestion_selected {
            Some(i) if i < len => Some(i),
            _ => None,
        };
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }
}
