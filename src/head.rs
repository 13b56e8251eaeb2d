use crate::grid::{Direction, Movable, Position};
use crate::input::KeyInput;

#[derive(Clone, Debug, PartialEq)]
pub struct Head {
    position: Position,
    previous_position: Position,
    direction: Direction,
    pending: Direction,
}

impl Head {
    pub fn new(position: Position, direction: Direction) -> Self {
        Head {
            position,
            previous_position: position,
            direction,
            pending: direction,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn previous_position(&self) -> Position {
        self.previous_position
    }

    /// Direction of the last move.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next move will take.
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    /// Buffers the first pressed key, in scan order, that would not reverse
    /// the committed direction. Leaves the pending direction alone otherwise.
    pub fn record_input(&mut self, input: &impl KeyInput) {
        if let Some(key) = Direction::SCAN_ORDER
            .into_iter()
            .filter(|&key| input.is_key_just_pressed(key))
            .find(|&key| !key.is_opposite(self.direction))
        {
            self.pending = key;
        }
    }

    /// Commits the pending direction and advances one cell.
    pub fn advance(&mut self) {
        self.previous_position = self.position;
        self.direction = self.pending;
        self.position = self.position.moved(self.direction);
    }
}

impl Movable for Head {
    /// Leads the chain, so there is no cell ahead of it to follow.
    fn step(&mut self, _vacated: Position) -> Position {
        self.advance();
        self.previous_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PressedKeys;

    fn keys(pressed: &[Direction]) -> PressedKeys {
        PressedKeys::from(pressed)
    }

    #[test]
    fn test_advance_records_previous_position() {
        let mut head = Head::new(Position::new(0, 0), Direction::Up);
        head.advance();
        assert_eq!(head.position(), Position::new(0, 1));
        assert_eq!(head.previous_position(), Position::new(0, 0));

        head.advance();
        assert_eq!(head.position(), Position::new(0, 2));
        assert_eq!(head.previous_position(), Position::new(0, 1));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut head = Head::new(Position::new(0, 0), Direction::Right);
        head.record_input(&keys(&[Direction::Left]));
        assert_eq!(head.pending_direction(), Direction::Right);

        head.advance();
        assert_eq!(head.direction(), Direction::Right);
        assert_eq!(head.position(), Position::new(1, 0));
    }

    #[test]
    fn test_scan_order_tie_break() {
        // Up comes before Left in scan order
        let mut head = Head::new(Position::new(0, 0), Direction::Right);
        head.record_input(&keys(&[Direction::Left, Direction::Up]));
        assert_eq!(head.pending_direction(), Direction::Up);

        // Up is a reversal while moving Down, so the scan falls through to Right
        let mut head = Head::new(Position::new(0, 0), Direction::Down);
        head.record_input(&keys(&[Direction::Up, Direction::Right, Direction::Left]));
        assert_eq!(head.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_reversal_checked_against_committed_direction() {
        // Pending Up while still moving Right; Left is judged against Right
        let mut head = Head::new(Position::new(0, 0), Direction::Right);
        head.record_input(&keys(&[Direction::Up]));
        head.record_input(&keys(&[Direction::Left]));
        assert_eq!(head.pending_direction(), Direction::Up);

        // Down is not a reversal of Right, so it replaces the pending Up
        head.record_input(&keys(&[Direction::Down]));
        assert_eq!(head.pending_direction(), Direction::Down);
        head.advance();
        assert_eq!(head.position(), Position::new(0, -1));
    }

    #[test]
    fn test_no_keys_keeps_pending() {
        let mut head = Head::new(Position::new(0, 0), Direction::Up);
        head.record_input(&keys(&[Direction::Left]));
        head.record_input(&PressedKeys::default());
        assert_eq!(head.pending_direction(), Direction::Left);
    }

    #[test]
    fn test_step_returns_vacated_cell() {
        let mut head = Head::new(Position::new(3, 3), Direction::Left);
        let vacated = head.step(Position::new(99, 99));
        assert_eq!(vacated, Position::new(3, 3));
        assert_eq!(head.position(), Position::new(2, 3));
    }
}
