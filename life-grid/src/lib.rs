#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod simulation;

pub use simulation::{Event, Simulation, Speed};

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt;
use std::ops::Index;

/// A fixed-size rectangle of live/dead cells. The edges are hard walls: there is no
/// wrap-around, so cells on the border simply have fewer neighbors.
///
/// A grid is never changed once it has been built; [`Grid::advance`] produces the
/// next generation as a new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// An all-dead grid. Panics if either dimension is zero.
    pub fn new(rows: u32, cols: u32) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "grid dimensions must be positive, got {rows}x{cols}"
        );
        Self {
            rows,
            cols,
            cells: vec![false; rows as usize * cols as usize],
        }
    }

    /// Each cell is an independent fair coin flip, drawn in row-major order.
    pub fn new_random(rows: u32, cols: u32, rand: &mut Random) -> Self {
        let mut result = Self::new(rows, cols);
        for cell in result.cells.iter_mut() {
            *cell = rand.next_bool(0.5);
        }
        result
    }

    pub fn from_live_cells<I>(rows: u32, cols: u32, live_cells: I) -> Self
    where
        I: IntoIterator<Item = Loc>,
    {
        let mut result = Self::new(rows, cols);
        for loc in live_cells {
            *result.cell_mut(loc) = true;
        }
        result
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// `None` for locations outside the grid.
    pub fn get(&self, loc: Loc) -> Option<bool> {
        loc.grid_index(self.rows, self.cols)
            .map(|index| self.cells[index])
    }

    /// Row-major.
    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &bool> + Clone {
        self.cells.iter()
    }

    pub fn locs(&self) -> impl Iterator<Item = Loc> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Loc::new(row, col)))
    }

    pub fn live_cells(&self) -> impl Iterator<Item = Loc> + '_ {
        self.locs().filter(|&loc| self[loc])
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Number of live cells among the (up to) eight cells adjacent to `loc`.
    pub fn count_neighbors(&self, loc: Loc) -> u8 {
        let mut result = 0;
        Neighborhood::new(self, loc).for_neighbor_cells(|_, alive| {
            if alive {
                result += 1;
            }
        });
        result
    }

    /// Computes the next generation. Every cell is judged against this grid, never
    /// against partially written results.
    pub fn advance(&self) -> Grid {
        let mut next = Grid::new(self.rows, self.cols);
        for loc in self.locs() {
            let neighbors = self.count_neighbors(loc);
            *next.cell_mut(loc) = next_cell_state(self[loc], neighbors);
        }
        next
    }

    fn cell_mut(&mut self, loc: Loc) -> &mut bool {
        let index = loc
            .grid_index(self.rows, self.cols)
            .unwrap_or_else(|| panic!("Cell {}, {} out of bounds", loc.row, loc.col));
        &mut self.cells[index]
    }
}

impl Index<Loc> for Grid {
    type Output = bool;

    fn index(&self, loc: Loc) -> &Self::Output {
        loc.grid_index(self.rows, self.cols)
            .map(|index| &self.cells[index])
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Birth on exactly 3 neighbors, survival on 2 or 3, death otherwise.
pub fn next_cell_state(alive: bool, neighbors: u8) -> bool {
    if neighbors == 3 {
        true
    } else {
        alive && neighbors == 2
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub struct Neighborhood<'a> {
    grid: &'a Grid,
    center: Loc,
}

impl<'a> Neighborhood<'a> {
    pub fn new(grid: &'a Grid, center: Loc) -> Self {
        Self { grid, center }
    }

    /// Visits only the neighbors that lie inside the grid.
    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(Loc, bool),
    {
        for (row_offset, col_offset) in NEIGHBOR_OFFSETS {
            if let Some(loc) = self.center.offset(row_offset, col_offset)
                && let Some(alive) = self.grid.get(loc)
            {
                f(loc, alive);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, rows: u32, cols: u32) -> Option<usize> {
        if self.row < rows && self.col < cols {
            Some(self.row as usize * cols as usize + self.col as usize)
        } else {
            None
        }
    }

    /// `None` when the offset would go below zero. The high side is left to
    /// [`Loc::grid_index`].
    pub fn offset(&self, row_offset: i32, col_offset: i32) -> Option<Loc> {
        Some(Loc::new(
            self.row.checked_add_signed(row_offset)?,
            self.col.checked_add_signed(col_offset)?,
        ))
    }
}

#[derive(Clone, Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Same seed, same sequence (on a given platform).
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn locs(cells: &[(u32, u32)]) -> Vec<Loc> {
        cells.iter().map(|&(row, col)| Loc::new(row, col)).collect()
    }

    fn live_cells(grid: &Grid) -> Vec<Loc> {
        grid.live_cells().collect()
    }

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(3, 5);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.num_cells(), 15);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    #[should_panic(expected = "grid dimensions must be positive")]
    fn zero_rows_are_rejected() {
        Grid::new(0, 4);
    }

    #[test]
    #[should_panic(expected = "grid dimensions must be positive")]
    fn zero_cols_are_rejected() {
        Grid::new(4, 0);
    }

    #[test]
    fn get_outside_grid_is_none() {
        let grid = Grid::from_live_cells(2, 3, locs(&[(1, 2)]));
        assert_eq!(grid.get(Loc::new(1, 2)), Some(true));
        assert_eq!(grid.get(Loc::new(0, 0)), Some(false));
        assert_eq!(grid.get(Loc::new(2, 0)), None);
        assert_eq!(grid.get(Loc::new(0, 3)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_outside_grid_panics() {
        let grid = Grid::new(2, 2);
        let _alive = grid[Loc::new(2, 0)];
    }

    #[test]
    fn offset_below_zero_is_none() {
        let loc = Loc::new(0, 3);
        assert_eq!(loc.offset(-1, 0), None);
        assert_eq!(loc.offset(0, -4), None);
        assert_eq!(loc.offset(1, -3), Some(Loc::new(1, 0)));
    }

    #[test]
    fn neighbor_counts_on_full_grid_reflect_edges() {
        let grid = Grid::from_live_cells(3, 3, Grid::new(3, 3).locs());
        assert_eq!(grid.count_neighbors(Loc::new(0, 0)), 3);
        assert_eq!(grid.count_neighbors(Loc::new(0, 2)), 3);
        assert_eq!(grid.count_neighbors(Loc::new(2, 0)), 3);
        assert_eq!(grid.count_neighbors(Loc::new(2, 2)), 3);
        assert_eq!(grid.count_neighbors(Loc::new(0, 1)), 5);
        assert_eq!(grid.count_neighbors(Loc::new(1, 0)), 5);
        assert_eq!(grid.count_neighbors(Loc::new(1, 1)), 8);
    }

    #[test]
    fn neighbors_do_not_wrap_around() {
        // Opposite corners would be neighbors on a torus.
        let grid = Grid::from_live_cells(4, 4, locs(&[(3, 3), (3, 0), (0, 3)]));
        assert_eq!(grid.count_neighbors(Loc::new(0, 0)), 0);
    }

    #[test]
    fn cell_does_not_count_itself() {
        let grid = Grid::from_live_cells(3, 3, locs(&[(1, 1)]));
        assert_eq!(grid.count_neighbors(Loc::new(1, 1)), 0);
        assert_eq!(grid.count_neighbors(Loc::new(0, 0)), 1);
    }

    #[test]
    fn transition_rule() {
        for neighbors in 0..=8 {
            assert_eq!(next_cell_state(false, neighbors), neighbors == 3);
            assert_eq!(
                next_cell_state(true, neighbors),
                neighbors == 2 || neighbors == 3
            );
        }
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = locs(&[(2, 1), (2, 2), (2, 3)]);
        let vertical = locs(&[(1, 2), (2, 2), (3, 2)]);
        let grid = Grid::from_live_cells(5, 5, horizontal.clone());

        let grid = grid.advance();
        assert_eq!(live_cells(&grid), vertical, "\n{grid}");

        let grid = grid.advance();
        assert_eq!(live_cells(&grid), horizontal, "\n{grid}");
    }

    #[test]
    fn block_is_still_life() {
        let block = locs(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let grid = Grid::from_live_cells(4, 4, block.clone());
        assert_eq!(live_cells(&grid.advance()), block);
    }

    #[test]
    fn isolated_cell_dies() {
        let grid = Grid::from_live_cells(5, 5, locs(&[(2, 2)]));
        assert_eq!(grid.advance().population(), 0);
    }

    #[test]
    fn single_cell_grid_always_dies() {
        let grid = Grid::from_live_cells(1, 1, locs(&[(0, 0)]));
        assert_eq!(grid.count_neighbors(Loc::new(0, 0)), 0);
        assert!(!grid.advance()[Loc::new(0, 0)]);
    }

    #[test]
    fn block_in_corner_is_stable() {
        let block = locs(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let grid = Grid::from_live_cells(2, 2, block.clone());
        assert_eq!(live_cells(&grid.advance()), block);
    }

    #[test]
    fn same_seed_gives_same_random_grid() {
        let first = Grid::new_random(20, 20, &mut Random::from_seed(42));
        let second = Grid::new_random(20, 20, &mut Random::from_seed(42));
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_give_different_random_grids() {
        let first = Grid::new_random(20, 20, &mut Random::from_seed(1));
        let second = Grid::new_random(20, 20, &mut Random::from_seed(2));
        assert_ne!(first, second);
    }

    #[test]
    fn random_grid_is_roughly_half_alive() {
        let grid = Grid::new_random(20, 20, &mut Random::from_seed(7));
        let population = grid.population();
        assert!(
            (100..300).contains(&population),
            "population {population}"
        );
    }

    #[test]
    fn display_draws_rows() {
        let grid = Grid::from_live_cells(2, 3, locs(&[(0, 1), (1, 2)]));
        assert_eq!(grid.to_string(), ".#.\n..#\n");
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1u32..12, 1u32..12).prop_flat_map(|(rows, cols)| {
            vec(any::<bool>(), (rows * cols) as usize).prop_map(move |cells| {
                let live = cells
                    .iter()
                    .enumerate()
                    .filter(|(_, alive)| **alive)
                    .map(|(index, _)| Loc::new(index as u32 / cols, index as u32 % cols));
                Grid::from_live_cells(rows, cols, live)
            })
        })
    }

    proptest! {
        #[test]
        fn advance_keeps_dimensions(grid in arb_grid()) {
            let next = grid.advance();
            prop_assert_eq!(next.rows(), grid.rows());
            prop_assert_eq!(next.cols(), grid.cols());
        }

        #[test]
        fn advance_applies_rule_to_every_cell(grid in arb_grid()) {
            let next = grid.advance();
            for loc in grid.locs() {
                let neighbors = grid.count_neighbors(loc);
                prop_assert!(neighbors <= 8);
                let expected = neighbors == 3 || (grid[loc] && neighbors == 2);
                prop_assert_eq!(next[loc], expected, "at {:?}\n{}", loc, grid);
            }
        }

        #[test]
        fn neighbor_count_matches_brute_force(grid in arb_grid()) {
            for loc in grid.locs() {
                let expected = grid
                    .live_cells()
                    .filter(|other| {
                        other != &loc
                            && other.row.abs_diff(loc.row) <= 1
                            && other.col.abs_diff(loc.col) <= 1
                    })
                    .count();
                prop_assert_eq!(grid.count_neighbors(loc) as usize, expected);
            }
        }

        #[test]
        fn advance_is_pure(grid in arb_grid()) {
            let before = grid.clone();
            let first = grid.advance();
            let second = grid.advance();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&grid, &before);
        }
    }
}
