//! Axial hex lattice with cyclic-dominance dynamics
//!
//! Cells are addressed by axial coordinates `(i, j)` on two basis vectors
//! `u = (s·√3/2, s/2)` and `v = (0, s)`, so valid cell centers form the
//! sublattice where `i + 2j` is a multiple of three. States live in a dense
//! array over the bounding box of the tiling, with a validity mask marking
//! which entries are real cells.

use crate::io::error::state_corruption;
use bitvec::prelude::{BitVec, bitvec};
use ndarray::Array2;
use rand::Rng;
use tracing::warn;

/// Axial hex coordinate
pub type HexCoord = (i32, i32);

/// Offsets of the six adjacent cells
pub const NEIGHBOR_OFFSETS: [HexCoord; 6] = [(2, -1), (1, 1), (-1, 2), (-2, 1), (-1, -1), (1, -2)];

/// Offsets of the six corners of a cell, in drawing order
pub const VERTEX_OFFSETS: [HexCoord; 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Basis vectors and bounds of a hex tiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGeometry {
    width: f64,
    height: f64,
    cell_size: f64,
    u: (f64, f64),
    v: (f64, f64),
    origin: (f64, f64),
}

impl HexGeometry {
    /// Tiling of a `width` by `height` region with hexes of radius `cell_size`
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let u = (cell_size * 3f64.sqrt() / 2.0, cell_size / 2.0);
        let v = (0.0, cell_size);
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            cell_size,
            u,
            v,
            origin: (v.0 + u.0, v.1),
        }
    }

    /// Hex radius in canvas pixels
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Every cell inside the bounds, row by row
    ///
    /// The sequence is lazy and finite; calling this again restarts it.
    pub fn cells(&self) -> HexCells {
        let span = self.u.0 * 2.0;
        HexCells {
            even_columns: (self.width / span).floor().max(0.0) as i32,
            odd_columns: ((self.width - self.u.0) / span).floor().max(0.0) as i32,
            rows: (self.height / (self.v.1 * 3.0)).floor().max(0.0) as i32,
            tail_row: self.height % (self.v.1 * 3.0) >= self.v.1 * 2.0,
            geometry: *self,
            row: 0,
            phase: RowPhase::Even,
            column: 0,
        }
    }

    /// Canvas position of a cell center
    pub fn center(&self, (i, j): HexCoord) -> (f64, f64) {
        let (i, j) = (f64::from(i), f64::from(j));
        (
            self.origin.0 + self.u.0 * i + self.v.0 * j,
            self.origin.1 + self.u.1 * i + self.v.1 * j,
        )
    }

    /// Canvas positions of the six corners of a cell
    pub fn vertices(&self, (i, j): HexCoord) -> [(f64, f64); 6] {
        VERTEX_OFFSETS.map(|(di, dj)| self.center((i + di, j + dj)))
    }

    fn odd_row_fits(&self, row: i32) -> bool {
        f64::from(3 * row + 3) * self.cell_size < self.height
    }
}

/// The six cells adjacent to `coord`
pub fn neighbors((i, j): HexCoord) -> [HexCoord; 6] {
    NEIGHBOR_OFFSETS.map(|(di, dj)| (i + di, j + dj))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowPhase {
    Even,
    Odd,
    Tail,
    Done,
}

/// Lazy enumeration of the cells of a [`HexGeometry`]
#[derive(Debug, Clone)]
pub struct HexCells {
    geometry: HexGeometry,
    even_columns: i32,
    odd_columns: i32,
    rows: i32,
    tail_row: bool,
    row: i32,
    phase: RowPhase,
    column: i32,
}

impl Iterator for HexCells {
    type Item = HexCoord;

    fn next(&mut self) -> Option<HexCoord> {
        loop {
            match self.phase {
                RowPhase::Even => {
                    if self.row >= self.rows {
                        self.phase = if self.tail_row {
                            RowPhase::Tail
                        } else {
                            RowPhase::Done
                        };
                        self.column = 0;
                        continue;
                    }
                    if self.column < self.even_columns {
                        let k = self.column;
                        self.column += 1;
                        return Some((2 * k, 3 * self.row - k));
                    }
                    self.column = 0;
                    if self.geometry.odd_row_fits(self.row) {
                        self.phase = RowPhase::Odd;
                    } else {
                        self.row += 1;
                    }
                }
                RowPhase::Odd => {
                    if self.column < self.odd_columns {
                        let k = self.column;
                        self.column += 1;
                        return Some((2 * k + 1, 3 * self.row + 1 - k));
                    }
                    self.column = 0;
                    self.row += 1;
                    self.phase = RowPhase::Even;
                }
                RowPhase::Tail => {
                    if self.column < self.even_columns {
                        let k = self.column;
                        self.column += 1;
                        return Some((2 * k, 3 * self.rows - k));
                    }
                    self.phase = RowPhase::Done;
                }
                RowPhase::Done => return None,
            }
        }
    }
}

/// Hex grid of cyclic states
///
/// State `s` is beaten by `(s + 1) % state_count`. A cell adopts its beater
/// when at least `threshold` of its six neighbors hold that state.
#[derive(Debug, Clone)]
pub struct HexLattice {
    geometry: HexGeometry,
    state_count: usize,
    threshold: usize,
    min_i: i32,
    min_j: i32,
    states: Array2<u8>,
    valid: BitVec,
    cell_count: usize,
}

impl HexLattice {
    /// Lattice covering `width` by `height`, every cell in state 0
    ///
    /// `state_count` is raised to at least 3 and capped at 255; `threshold`
    /// is kept in `[1, 7]`.
    pub fn new(
        width: f64,
        height: f64,
        cell_size: f64,
        state_count: usize,
        threshold: usize,
    ) -> Self {
        let geometry = HexGeometry::new(width, height, cell_size);

        let (mut min_i, mut max_i, mut min_j, mut max_j) = (0, -1, 0, -1);
        for (index, (i, j)) in geometry.cells().enumerate() {
            if index == 0 {
                (min_i, max_i, min_j, max_j) = (i, i, j, j);
            } else {
                min_i = min_i.min(i);
                max_i = max_i.max(i);
                min_j = min_j.min(j);
                max_j = max_j.max(j);
            }
        }

        let rows = (max_i - min_i + 1).max(0) as usize;
        let cols = (max_j - min_j + 1).max(0) as usize;

        let mut lattice = Self {
            geometry,
            state_count: state_count.clamp(3, usize::from(u8::MAX)),
            threshold: threshold.clamp(1, 7),
            min_i,
            min_j,
            states: Array2::zeros((rows, cols)),
            valid: bitvec![0; rows * cols],
            cell_count: 0,
        };

        for cell in geometry.cells() {
            match lattice.slot(cell) {
                Some((row, col)) => {
                    lattice.valid.set(row * cols + col, true);
                    lattice.cell_count += 1;
                }
                None => warn!(
                    error = %state_corruption("hex lattice", &format!("{cell:?} outside bounding box")),
                    "dropping cell"
                ),
            }
        }

        lattice
    }

    /// Tiling geometry
    pub const fn geometry(&self) -> &HexGeometry {
        &self.geometry
    }

    /// Number of cyclic states
    pub const fn state_count(&self) -> usize {
        self.state_count
    }

    /// Votes needed for a flip
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Changes the votes needed for a flip
    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold.clamp(1, 7);
    }

    /// Number of cells in the tiling
    pub const fn len(&self) -> usize {
        self.cell_count
    }

    /// Whether the tiling holds no cells
    pub const fn is_empty(&self) -> bool {
        self.cell_count == 0
    }

    /// Every cell of the tiling, see [`HexGeometry::cells`]
    pub fn cells(&self) -> HexCells {
        self.geometry.cells()
    }

    fn slot(&self, (i, j): HexCoord) -> Option<(usize, usize)> {
        let row = usize::try_from(i - self.min_i).ok()?;
        let col = usize::try_from(j - self.min_j).ok()?;
        let (rows, cols) = self.states.dim();
        (row < rows && col < cols).then_some((row, col))
    }

    fn is_valid_slot(&self, (row, col): (usize, usize)) -> bool {
        let cols = self.states.ncols();
        self.valid.get(row * cols + col).is_some_and(|bit| *bit)
    }

    /// Whether `coord` is a cell of this tiling
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.slot(coord).is_some_and(|slot| self.is_valid_slot(slot))
    }

    /// State of a cell, `None` when the coordinate is not part of the tiling
    pub fn state(&self, coord: HexCoord) -> Option<u8> {
        let slot = self.slot(coord)?;
        if !self.is_valid_slot(slot) {
            return None;
        }
        self.states.get(slot).copied()
    }

    /// Sets a cell's state modulo the state count, `false` if absent
    pub fn set_state(&mut self, coord: HexCoord, state: u8) -> bool {
        let Some(slot) = self.slot(coord).filter(|slot| self.is_valid_slot(*slot)) else {
            return false;
        };
        let wrapped = (usize::from(state) % self.state_count) as u8;
        if let Some(value) = self.states.get_mut(slot) {
            *value = wrapped;
            return true;
        }
        false
    }

    /// Puts every cell into the same state
    pub fn fill(&mut self, state: u8) {
        let cells: Vec<HexCoord> = self.cells().collect();
        for cell in cells {
            self.set_state(cell, state);
        }
    }

    /// Random states, biased towards states 0 and 1 with probability `bias`
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, bias: f64) {
        let bias = if bias.is_finite() {
            bias.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let cells: Vec<HexCoord> = self.cells().collect();
        for cell in cells {
            let state = if rng.random_bool(bias) {
                rng.random_range(0..2)
            } else {
                rng.random_range(0..self.state_count)
            };
            self.set_state(cell, state as u8);
        }
    }

    /// Number of cells currently in each state
    pub fn state_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; self.state_count];
        for cell in self.cells() {
            if let Some(slot) = self
                .state(cell)
                .and_then(|state| counts.get_mut(usize::from(state)))
            {
                *slot += 1;
            }
        }
        counts
    }

    /// One synchronous pass with the lattice's own threshold
    ///
    /// Returns the number of cells that changed.
    pub fn update(&mut self) -> usize {
        self.update_with_threshold(self.threshold)
    }

    /// One synchronous pass with an explicit threshold, kept in `[1, 7]`
    ///
    /// Votes are counted on the current states and written into a fresh
    /// buffer, so flips within a pass never influence each other.
    pub fn update_with_threshold(&mut self, threshold: usize) -> usize {
        let threshold = threshold.clamp(1, 7);
        let mut next = self.states.clone();
        let mut changed = 0;

        for cell in self.cells() {
            let Some(state) = self.state(cell) else {
                continue;
            };
            let beater = ((usize::from(state) + 1) % self.state_count) as u8;

            let votes = neighbors(cell)
                .into_iter()
                .filter(|&neighbor| self.state(neighbor) == Some(beater))
                .count();

            if votes >= threshold {
                if let Some(value) = self.slot(cell).and_then(|slot| next.get_mut(slot)) {
                    *value = beater;
                    changed += 1;
                }
            }
        }

        self.states = next;
        changed
    }
}
