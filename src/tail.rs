use crate::grid::{Movable, Position};

/// Body segments ordered from the one nearest the head to the last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tail {
    segments: Vec<Position>,
    previous_last: Option<Position>,
}

impl Tail {
    pub fn new(segments: impl IntoIterator<Item = Position>) -> Self {
        Tail {
            segments: segments.into_iter().collect(),
            previous_last: None,
        }
    }

    /// Shifts every segment into the slot ahead of it; the first segment
    /// takes `lead`. Returns the cell the last segment gave up.
    pub fn shift(&mut self, lead: Position) -> Position {
        let mut next = lead;
        for segment in self.segments.iter_mut() {
            next = std::mem::replace(segment, next);
        }
        self.previous_last = Some(next);
        next
    }

    /// Grows by one segment on the cell vacated by the latest shift.
    ///
    /// Before any shift there is no vacated cell, so nothing is added.
    pub fn add_cell(&mut self) -> Option<Position> {
        let cell = self.previous_last?;
        self.segments.push(cell);
        Some(cell)
    }

    pub fn occupied_positions(&self) -> Vec<Position> {
        self.segments.clone()
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    pub fn previous_last_position(&self) -> Option<Position> {
        self.previous_last
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Movable for Tail {
    fn step(&mut self, vacated: Position) -> Position {
        self.shift(vacated)
    }
}
