//! Fixed-grid geometry for composite radar mosaics.

/// Index of a single cell inside a composite grid.
///
/// Column 0 / row 0 is the grid origin; a `GridIndex` only names a real
/// cell when both components are inside the grid extent, which the
/// projection enforces before handing one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub col: usize,
    pub row: usize,
}

impl GridIndex {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Extent of a row-major 2D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridExtent {
    /// Number of columns (x axis).
    pub cols: usize,
    /// Number of rows (y axis).
    pub rows: usize,
}

impl GridExtent {
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells.
    pub const fn len(&self) -> usize {
        self.cols * self.rows
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a cell index falls inside this extent.
    pub fn contains(&self, index: GridIndex) -> bool {
        index.col < self.cols && index.row < self.rows
    }

    /// Position of a cell in a row-major flat buffer.
    pub fn flat_index(&self, index: GridIndex) -> usize {
        index.row * self.cols + index.col
    }
}

/// The DWD DE1200 composite grid: 1100 columns by 1200 rows at 1 km
/// spacing, covering Germany and its nearer surroundings.
pub const DE1200_EXTENT: GridExtent = GridExtent::new(1100, 1200);
