use std::collections::HashSet;
use std::fmt;

use log::debug;
use rand::Rng;

use crate::grid::{Grid, Position};
use crate::head::Head;
use crate::tail::Tail;

/// No cell is left for the apple: every one is under the head or the tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridFull;

impl fmt::Display for GridFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no free cell left on the grid")
    }
}

impl std::error::Error for GridFull {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Apple {
    position: Position,
}

impl Apple {
    pub fn at(position: Position) -> Self {
        Apple { position }
    }

    pub fn spawn(
        grid: &Grid,
        head: &Head,
        tail: &Tail,
        rng: &mut impl Rng,
    ) -> Result<Apple, GridFull> {
        let position = Self::pick(grid, head, tail, rng)?;
        Ok(Apple { position })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the apple to a uniformly chosen free cell.
    pub fn relocate(
        &mut self,
        grid: &Grid,
        head: &Head,
        tail: &Tail,
        rng: &mut impl Rng,
    ) -> Result<Position, GridFull> {
        self.position = Self::pick(grid, head, tail, rng)?;
        Ok(self.position)
    }

    /// Grid cells under neither the head nor any tail segment, in grid order.
    pub fn free_cells(grid: &Grid, head: &Head, tail: &Tail) -> Vec<Position> {
        let occupied: HashSet<Position> = std::iter::once(head.position())
            .chain(tail.segments().iter().copied())
            .collect();
        grid.cells().filter(|c| !occupied.contains(c)).collect()
    }

    fn pick(
        grid: &Grid,
        head: &Head,
        tail: &Tail,
        rng: &mut impl Rng,
    ) -> Result<Position, GridFull> {
        let free = Self::free_cells(grid, head, tail);
        if free.is_empty() {
            return Err(GridFull);
        }
        let cell = free[rng.gen_range(0..free.len())];
        debug!(
            "Apple placed at {:?} ({} of {} cells free)",
            cell,
            free.len(),
            grid.cell_count()
        );
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_free_cells_excludes_snake() {
        let grid = Grid::new(4);
        let head = Head::new(p(0, 0), Direction::Up);
        let tail = Tail::new([p(0, -1), p(1, -1)]);

        let free = Apple::free_cells(&grid, &head, &tail);
        assert_eq!(free.len(), 16 - 3);
        assert!(!free.contains(&p(0, 0)));
        assert!(!free.contains(&p(0, -1)));
        assert!(!free.contains(&p(1, -1)));
    }

    #[test]
    fn test_relocate_never_lands_on_snake() {
        let grid = Grid::new(4);
        let head = Head::new(p(0, 0), Direction::Up);
        let tail = Tail::new([p(0, -1), p(-1, -1), p(-1, 0), p(-1, 1)]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut apple = Apple::at(p(2, 2));

        for _ in 0..200 {
            let pos = apple.relocate(&grid, &head, &tail, &mut rng).unwrap();
            assert_ne!(pos, head.position());
            assert!(!tail.contains(pos));
            assert!(grid.contains(pos));
        }
    }

    #[test]
    fn test_relocate_single_free_cell() {
        // 2x2 grid has cells (0,0), (0,1), (1,0), (1,1)
        let grid = Grid::new(2);
        let head = Head::new(p(0, 0), Direction::Up);
        let tail = Tail::new([p(0, 1), p(1, 1)]);
        let mut rng = StdRng::seed_from_u64(1);

        let apple = Apple::spawn(&grid, &head, &tail, &mut rng).unwrap();
        assert_eq!(apple.position(), p(1, 0));
    }

    #[test]
    fn test_grid_full() {
        let grid = Grid::new(2);
        let head = Head::new(p(0, 0), Direction::Up);
        let tail = Tail::new([p(0, 1), p(1, 1), p(1, 0)]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut apple = Apple::at(p(1, 0));

        assert_eq!(apple.relocate(&grid, &head, &tail, &mut rng), Err(GridFull));
        // A failed relocation leaves the apple where it was
        assert_eq!(apple.position(), p(1, 0));
        assert_eq!(GridFull.to_string(), "no free cell left on the grid");
    }
}
