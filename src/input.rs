use crate::grid::Direction;

/// Source of directional key presses, sampled once per frame.
pub trait KeyInput {
    fn is_key_just_pressed(&self, key: Direction) -> bool;
}

/// Directional keys pressed since the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PressedKeys {
    up: bool,
    right: bool,
    down: bool,
    left: bool,
}

impl PressedKeys {
    pub fn press(&mut self, key: Direction) {
        *self.slot(key) = true;
    }

    pub fn clear(&mut self) {
        *self = PressedKeys::default();
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.right || self.down || self.left)
    }

    fn slot(&mut self, key: Direction) -> &mut bool {
        match key {
            Direction::Up => &mut self.up,
            Direction::Right => &mut self.right,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
        }
    }
}

impl From<&[Direction]> for PressedKeys {
    fn from(keys: &[Direction]) -> Self {
        let mut pressed = PressedKeys::default();
        for &key in keys {
            pressed.press(key);
        }
        pressed
    }
}

impl KeyInput for PressedKeys {
    fn is_key_just_pressed(&self, key: Direction) -> bool {
        match key {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }
}
