//! Uniform spatial grid for candidate-pair search.
//!
//! Atoms are bucketed into cubic cells whose edge exceeds every bond
//! cutoff, so any two atoms closer than the largest cutoff share a cell or
//! sit in adjacent ones. Enumerating the 3x3x3 neighbourhood of each atom
//! therefore yields a superset of all bonded pairs in near-linear time.

use glam::Vec3;
use rustc_hash::FxHashMap;

/// Atoms bucketed by cell.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    min: Vec3,
    inv_cell: f32,
    dims: [usize; 3],
    cells: FxHashMap<[usize; 3], Vec<usize>>,
    cell_of: Vec<[usize; 3]>,
}

impl SpatialGrid {
    /// Bucket `positions` into cells of edge `cell_size`, after padding the
    /// bounding box by `padding` on every side.
    #[must_use]
    pub fn new(positions: &[Vec3], cell_size: f32, padding: f32) -> Self {
        let (lo, hi) = positions.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        );
        let (min, span) = if positions.is_empty() {
            (Vec3::ZERO, Vec3::ZERO)
        } else {
            (lo - padding, (hi + padding) - (lo - padding))
        };
        let inv_cell = 1.0 / cell_size;

        // Cell indices are rounded, so an index can reach ceil(span / edge)
        // itself; size each axis one past that.
        let dims = span
            .to_array()
            .map(|s| ((s * inv_cell).ceil() as usize).saturating_add(1));

        let mut grid = Self {
            min,
            inv_cell,
            dims,
            cells: FxHashMap::default(),
            cell_of: Vec::with_capacity(positions.len()),
        };
        for (i, &p) in positions.iter().enumerate() {
            let cell = grid.cell_for(p);
            grid.cells.entry(cell).or_default().push(i);
            grid.cell_of.push(cell);
        }
        grid
    }

    /// Cells per axis.
    #[must_use]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Cell coordinate of a point, by per-axis rounding.
    #[must_use]
    pub fn cell_for(&self, p: Vec3) -> [usize; 3] {
        let local = (p - self.min) * self.inv_cell;
        let mut cell = [0; 3];
        for (axis, c) in cell.iter_mut().enumerate() {
            *c = (local[axis].round().max(0.0) as usize)
                .min(self.dims[axis] - 1);
        }
        cell
    }

    fn axis_range(&self, cell: [usize; 3], axis: usize) -> std::ops::Range<usize> {
        cell[axis].saturating_sub(1)..cell[axis].saturating_add(2).min(self.dims[axis])
    }

    /// `cell` and its (up to 26) neighbours inside the grid.
    fn neighbourhood(&self, cell: [usize; 3]) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.axis_range(cell, 0).flat_map(move |x| {
            self.axis_range(cell, 1).flat_map(move |y| {
                self.axis_range(cell, 2)
                    .map(move |z| [x, y, z])
            })
        })
    }

    /// Every unordered pair `(i, j)` with `i < j` whose atoms share a cell or
    /// sit in adjacent cells. Each pair appears exactly once.
    #[must_use]
    pub fn close_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, &cell) in self.cell_of.iter().enumerate() {
            for neighbour in self.neighbourhood(cell) {
                let Some(members) = self.cells.get(&neighbour) else {
                    continue;
                };
                pairs.extend(members.iter().filter(|&&j| i < j).map(|&j| (i, j)));
            }
        }
        pairs
    }
}
