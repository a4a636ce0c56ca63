#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

const PAGE: u16 = 10;

/// Scroll position of the conversation pane. Sticks to the newest turn until
/// the user scrolls up, and again once they scroll back to the bottom.
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    following: bool,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Default for Scroll {
    fn default() -> Scroll {
        return Scroll {
            list_length: 0,
            viewport_length: 0,
            following: true,
            position: 0,
            scrollbar_state: ScrollbarState::default(),
        };
    }
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar_state = self.scrollbar_state.position(self.position);
    }

    pub fn is_following(&self) -> bool {
        return self.following;
    }

    pub fn up(&mut self) {
        self.following = false;
        self.position = self.position.saturating_sub(1);
        self.sync_scrollbar();
    }

    pub fn up_page(&mut self) {
        self.following = false;
        self.position = self.position.saturating_sub(PAGE);
        self.sync_scrollbar();
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
        self.following = self.position == self.max_position();
        self.sync_scrollbar();
    }

    pub fn down_page(&mut self) {
        self.position = self.position.saturating_add(PAGE).min(self.max_position());
        self.following = self.position == self.max_position();
        self.sync_scrollbar();
    }

    pub fn last(&mut self) {
        self.following = true;
        self.position = self.max_position();
        self.sync_scrollbar();
    }

    /// Lengths past `u16::MAX` saturate instead of wrapping.
    pub fn set_state(&mut self, list_length: usize, viewport_length: u16) {
        let list_length = u16::try_from(list_length).unwrap_or(u16::MAX);
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length)
            .viewport_content_length(viewport_length);

        if self.following {
            self.last();
        } else {
            self.position = self.position.min(self.max_position());
            self.sync_scrollbar();
        }
    }
}
