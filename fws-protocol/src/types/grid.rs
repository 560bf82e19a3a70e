//! Rectangular cell image carried by DRAW_FILL

use std::ops::Index;

use super::Cell;

/// `width x height` block of cells addressed as `grid[(i, j)]`
///
/// `i` runs over the width and `j` over the height. Cells are stored flat
/// at `i * height + j`, which is also the order they travel on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Grid with every position set to `fill`
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; cell_count(width, height)],
        }
    }

    /// Grid whose cell at `(i, j)` is `f(i, j)`
    ///
    /// # Panics
    ///
    /// If `width * height` overflows `usize`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Cell) -> Self {
        let mut cells = Vec::with_capacity(cell_count(width, height));
        for i in 0..width {
            for j in 0..height {
                cells.push(f(i, j));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Grid from cells already in wire order; `None` on a shape mismatch
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Option<Self> {
        let expected = width.checked_mul(height)?;
        (cells.len() == expected).then_some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Cell> {
        self.offset(i, j).map(|idx| &self.cells[idx])
    }

    /// Replace the cell at `(i, j)`; returns false when out of bounds
    pub fn set(&mut self, i: usize, j: usize, cell: Cell) -> bool {
        match self.offset(i, j) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Cells in wire order
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.width && j < self.height).then(|| i * self.height + j)
    }
}

impl Index<(usize, usize)> for CellGrid {
    type Output = Cell;

    fn index(&self, (i, j): (usize, usize)) -> &Cell {
        match self.get(i, j) {
            Some(cell) => cell,
            None => panic!(
                "cell ({}, {}) out of bounds for {}x{} grid",
                i, j, self.width, self.height
            ),
        }
    }
}

fn cell_count(width: usize, height: usize) -> usize {
    match width.checked_mul(height) {
        Some(n) => n,
        None => panic!("{}x{} grid overflows usize", width, height),
    }
}

impl<'a> IntoIterator for &'a CellGrid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Color};

    fn numbered(i: usize, j: usize) -> Cell {
        let ch = char::from(b'a' + (i * 10 + j) as u8);
        Cell::new(ch, Color::opaque(i as u8, j as u8, 0), Color::TRANSPARENT, Attr::empty())
    }

    #[test]
    fn test_from_fn_layout_is_column_major() {
        let grid = CellGrid::from_fn(3, 2, numbered);
        let order: Vec<char> = grid.iter().map(|c| c.ch).collect();
        // (0,0) (0,1) (1,0) (1,1) (2,0) (2,1)
        assert_eq!(order, vec!['a', 'b', 'k', 'l', 'u', 'v']);
        assert_eq!(grid[(2, 1)], numbered(2, 1));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = CellGrid::new(2, 2, Cell::default());
        assert!(grid.get(2, 0).is_none());
        assert!(grid.get(0, 2).is_none());
        assert!(grid.get(1, 1).is_some());
    }

    #[test]
    fn test_set() {
        let mut grid = CellGrid::new(2, 3, Cell::default());
        assert!(grid.set(1, 2, numbered(1, 2)));
        assert!(!grid.set(2, 0, numbered(0, 0)));
        assert_eq!(grid[(1, 2)], numbered(1, 2));
    }

    #[test]
    fn test_from_cells_checks_shape() {
        assert!(CellGrid::from_cells(2, 2, vec![Cell::default(); 3]).is_none());
        assert!(CellGrid::from_cells(usize::MAX, 2, Vec::new()).is_none());
        let grid = CellGrid::from_cells(2, 2, vec![Cell::default(); 4]).unwrap();
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_empty_grid() {
        let grid = CellGrid::new(0, 5, Cell::default());
        assert!(grid.is_empty());
        assert_eq!(grid.height(), 5);
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_new_rejects_overflowing_dimensions() {
        let _ = CellGrid::new(1 << (usize::BITS - 1), 2, Cell::default());
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_from_fn_rejects_overflowing_dimensions() {
        let _ = CellGrid::from_fn(usize::MAX, 3, |_, _| unreachable!());
    }
}
