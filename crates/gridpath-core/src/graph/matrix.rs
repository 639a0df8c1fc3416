//! Backing grid storage.

use gridpath_common::types::Vertex;
use gridpath_common::utils::error::{Error, Result};

/// How cell values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    /// Cells are 0 (empty) or 1 (present). Present cells weigh 1.
    Binary,
    /// Any integer is a present cell whose value is the weight into it.
    Weighted,
}

/// A rectangular grid of optional integer cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    kind: MatrixKind,
    rows: usize,
    cols: usize,
    cells: Vec<Option<i64>>,
}

impl Matrix {
    /// Creates an all-empty matrix.
    #[must_use]
    pub fn empty(kind: MatrixKind, rows: usize, cols: usize) -> Self {
        Self {
            kind,
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Builds a binary matrix from 0/1 rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for any value other than 0 or 1, and
    /// [`Error::InvalidShape`] if rows differ in length.
    pub fn binary(rows: &[Vec<i64>]) -> Result<Self> {
        let (n_rows, n_cols) = Self::check_shape(rows)?;
        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                cells.push(Self::binary_cell(Vertex::new(r, c), value)?);
            }
        }
        Ok(Self {
            kind: MatrixKind::Binary,
            rows: n_rows,
            cols: n_cols,
            cells,
        })
    }

    /// Builds a weighted matrix where every cell is present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if rows differ in length.
    pub fn weighted(rows: &[Vec<i64>]) -> Result<Self> {
        let (n_rows, n_cols) = Self::check_shape(rows)?;
        Ok(Self {
            kind: MatrixKind::Weighted,
            rows: n_rows,
            cols: n_cols,
            cells: rows.iter().flatten().map(|&w| Some(w)).collect(),
        })
    }

    /// Builds a weighted matrix where `None` marks an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if rows differ in length.
    pub fn weighted_sparse(rows: &[Vec<Option<i64>>]) -> Result<Self> {
        let (n_rows, n_cols) = Self::check_shape(rows)?;
        Ok(Self {
            kind: MatrixKind::Weighted,
            rows: n_rows,
            cols: n_cols,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    fn check_shape<T>(rows: &[Vec<T>]) -> Result<(usize, usize)> {
        let expected = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(Error::InvalidShape {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok((rows.len(), expected))
    }

    fn binary_cell(vertex: Vertex, value: i64) -> Result<Option<i64>> {
        match value {
            0 => Ok(None),
            1 => Ok(Some(1)),
            _ => Err(Error::InvalidValue { vertex, value }),
        }
    }

    /// Returns the value interpretation.
    #[must_use]
    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if `v` lies inside the grid.
    #[inline]
    #[must_use]
    pub fn contains(&self, v: Vertex) -> bool {
        v.row < self.rows && v.col < self.cols
    }

    #[inline]
    fn index(&self, v: Vertex) -> Option<usize> {
        self.contains(v).then(|| v.row * self.cols + v.col)
    }

    /// Returns the cell value, or `None` for empty or out-of-bounds cells.
    #[inline]
    #[must_use]
    pub fn get(&self, v: Vertex) -> Option<i64> {
        self.index(v).and_then(|i| self.cells[i])
    }

    /// Returns true if `v` is inside the grid and carries a value.
    #[inline]
    #[must_use]
    pub fn is_present(&self, v: Vertex) -> bool {
        self.get(v).is_some()
    }

    /// Writes a cell. `None` empties it.
    ///
    /// On a binary matrix `Some(0)` also empties the cell and anything other
    /// than 0 or 1 is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the grid and
    /// [`Error::InvalidValue`] for a non-binary value on a binary matrix.
    pub fn set(&mut self, v: Vertex, value: Option<i64>) -> Result<()> {
        let idx = self.index(v).ok_or(Error::OutOfBounds(v))?;
        let cell = match (self.kind, value) {
            (_, None) => None,
            (MatrixKind::Binary, Some(value)) => Self::binary_cell(v, value)?,
            (MatrixKind::Weighted, Some(value)) => Some(value),
        };
        self.cells[idx] = cell;
        Ok(())
    }

    /// Number of value-bearing cells.
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterates over value-bearing cells in row-major order.
    pub fn present(&self) -> impl Iterator<Item = (Vertex, i64)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|w| (Vertex::new(i / cols, i % cols), w)))
    }
}
