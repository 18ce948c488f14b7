//! Wraparound cursor shared by change-group and keyword navigation

/// Cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// Nothing focused yet
    #[default]
    Idle,
    /// Zero-based index of the focused item
    Focused(usize),
}

/// Idle/Focused state machine over `total` items
///
/// `next` from idle focuses the first item and `prev` the last; both wrap
/// around afterwards. With no items every move is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationCursor {
    state: CursorState,
    total: usize,
}

impl NavigationCursor {
    pub fn new(total: usize) -> Self {
        Self {
            state: CursorState::Idle,
            total,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn index(&self) -> Option<usize> {
        match self.state {
            CursorState::Idle => None,
            CursorState::Focused(i) => Some(i),
        }
    }

    /// Index with `-1` standing for idle
    pub fn raw_index(&self) -> i64 {
        self.index().map(|i| i as i64).unwrap_or(-1)
    }

    pub fn next(&mut self) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        let next = match self.state {
            CursorState::Idle => 0,
            CursorState::Focused(i) => (i + 1) % self.total,
        };
        self.state = CursorState::Focused(next);
        Some(next)
    }

    pub fn prev(&mut self) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        let prev = match self.state {
            CursorState::Idle => self.total - 1,
            CursorState::Focused(i) => (i + self.total - 1) % self.total,
        };
        self.state = CursorState::Focused(prev);
        Some(prev)
    }

    pub fn reset(&mut self) {
        self.state = CursorState::Idle;
    }

    /// Change the item count, returning to idle
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.state = CursorState::Idle;
    }

    /// Human-readable position, e.g. `"2 / 5"`; `"0 / 5"` while idle
    pub fn label(&self) -> String {
        let position = self.index().map(|i| i + 1).unwrap_or(0);
        format!("{} / {}", position, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_from_idle_focuses_first() {
        let mut cursor = NavigationCursor::new(3);
        assert_eq!(cursor.raw_index(), -1);
        assert_eq!(cursor.next(), Some(0));
        assert_eq!(cursor.state(), CursorState::Focused(0));
    }

    #[test]
    fn test_prev_from_idle_focuses_last() {
        let mut cursor = NavigationCursor::new(3);
        assert_eq!(cursor.prev(), Some(2));
    }

    #[test]
    fn test_wraparound() {
        let mut cursor = NavigationCursor::new(3);
        for _ in 0..3 {
            cursor.next();
        }
        assert_eq!(cursor.next(), Some(0));
        assert_eq!(cursor.prev(), Some(2));
    }

    #[test]
    fn test_k_steps_from_idle() {
        for total in 1..6usize {
            for k in 1..15usize {
                let mut cursor = NavigationCursor::new(total);
                for _ in 0..k {
                    cursor.next();
                }
                assert_eq!(cursor.index(), Some((k - 1) % total));
            }
        }
    }

    #[test]
    fn test_empty_is_noop() {
        let mut cursor = NavigationCursor::new(0);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.prev(), None);
        assert_eq!(cursor.state(), CursorState::Idle);
        assert_eq!(cursor.label(), "0 / 0");
    }

    #[test]
    fn test_reset_and_label() {
        let mut cursor = NavigationCursor::new(4);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.label(), "2 / 4");
        cursor.reset();
        assert_eq!(cursor.label(), "0 / 4");
        cursor.set_total(2);
        assert_eq!(cursor.total(), 2);
        assert_eq!(cursor.index(), None);
    }
}
