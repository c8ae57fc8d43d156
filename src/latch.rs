use crate::snake::Direction;

/// Single-slot buffer for direction changes. The first signal of a tick window
/// closes the latch, whether or not it is accepted; everything after it is
/// dropped until [`HeadingLatch::reset`] runs at the next tick boundary.
#[derive(Debug, Default, Clone)]
pub struct HeadingLatch {
    pending: Option<Direction>,
    closed: bool,
}

impl HeadingLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the heading that will be used on the next tick if this signal
    /// changed it, `None` if it was ignored.
    pub fn on_direction_input(&mut self, requested: Direction, current: Direction) -> Option<Direction> {
        if self.closed {
            return None;
        }
        self.closed = true;

        if requested.is_reverse_of(current) {
            return None;
        }

        self.pending = Some(requested);
        self.pending
    }

    /// Heading for the tick that is about to run.
    pub fn heading_or(&self, current: Direction) -> Direction {
        self.pending.unwrap_or(current)
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.closed = false;
    }
}
