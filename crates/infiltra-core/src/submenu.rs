//! Bounded cursor over the active submenu's option list.

use crate::menu::Topic;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubmenuCursor {
    topic: Topic,
    index: u8,
}

impl Default for SubmenuCursor {
    fn default() -> Self {
        Self::new(Topic::Wifi)
    }
}

impl SubmenuCursor {
    pub const fn new(topic: Topic) -> Self {
        Self { topic, index: 0 }
    }

    /// Switches the option list and parks the cursor on the back row.
    pub fn set_topic(&mut self, topic: Topic) {
        self.topic = topic;
        self.index = 0;
    }

    pub const fn topic(&self) -> Topic {
        self.topic
    }

    pub fn items(&self) -> &'static [&'static str] {
        self.topic.options()
    }

    pub fn item_count(&self) -> u8 {
        self.items().len().max(1) as u8
    }

    pub const fn selected_index(&self) -> u8 {
        self.index
    }

    pub fn selected_label(&self) -> &'static str {
        self.items().get(self.index as usize).copied().unwrap_or("")
    }

    pub fn next(&mut self) {
        self.index = rotate_next(self.index, self.item_count());
    }

    pub fn previous(&mut self) {
        self.index = rotate_prev(self.index, self.item_count());
    }
}

#[inline]
pub(crate) fn rotate_next(index: u8, count: u8) -> u8 {
    if count == 0 {
        return 0;
    }
    (index.saturating_add(1)) % count
}

#[inline]
pub(crate) fn rotate_prev(index: u8, count: u8) -> u8 {
    if count == 0 {
        return 0;
    }
    if index == 0 { count - 1 } else { index - 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_topic_resets_to_back_row() {
        let mut cursor = SubmenuCursor::new(Topic::Ir);
        cursor.next();
        cursor.next();
        cursor.set_topic(Topic::Extras);
        assert_eq!(cursor.selected_index(), 0);
        assert_eq!(cursor.topic(), Topic::Extras);
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut cursor = SubmenuCursor::new(Topic::Ir);
        let count = cursor.item_count();

        cursor.previous();
        assert_eq!(cursor.selected_index(), count - 1);
        cursor.next();
        assert_eq!(cursor.selected_index(), 0);

        for _ in 0..count {
            cursor.next();
        }
        assert_eq!(cursor.selected_index(), 0);
    }

    #[test]
    fn selected_label_tracks_index() {
        let mut cursor = SubmenuCursor::new(Topic::Extras);
        cursor.next();
        assert_eq!(cursor.selected_label(), "Stopwatch");
    }
}
