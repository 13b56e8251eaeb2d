#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn moved(&self, direction: Direction) -> Position {
        let delta = direction.delta();
        Position {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Order in which pressed keys are considered; the first acceptable one wins.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn delta(&self) -> Position {
        match self {
            Direction::Up => Position { x: 0, y: 1 },
            Direction::Right => Position { x: 1, y: 0 },
            Direction::Down => Position { x: 0, y: -1 },
            Direction::Left => Position { x: -1, y: 0 },
        }
    }
}

/// Square playing field of `plane_scale` cells per side, centred near the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    plane_scale: i32,
}

impl Grid {
    pub fn new(plane_scale: u16) -> Self {
        Grid {
            plane_scale: plane_scale as i32,
        }
    }

    pub fn plane_scale(&self) -> i32 {
        self.plane_scale
    }

    /// Shift between storage index and world coordinate on both axes.
    pub fn offset(&self) -> i32 {
        self.plane_scale / 2 - 1
    }

    pub fn cell_count(&self) -> usize {
        let n = self.plane_scale as usize;
        n * n
    }

    /// Every cell, x-major, in world coordinates.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let n = self.plane_scale;
        let offset = self.offset();
        (0..n).flat_map(move |x| (0..n).map(move |y| Position::new(x - offset, y - offset)))
    }

    pub fn contains(&self, pos: Position) -> bool {
        let lo = -self.offset();
        let hi = lo + self.plane_scale;
        (lo..hi).contains(&pos.x) && (lo..hi).contains(&pos.y)
    }
}

/// Something that advances one cell per tick.
///
/// `vacated` is the cell freed by whatever moved just before this in the
/// same tick; the return value is the cell this movable freed. The head
/// leads the chain and ignores `vacated`.
pub trait Movable {
    fn step(&mut self, vacated: Position) -> Position;
}
