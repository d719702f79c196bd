use super::state::Cell;
use crate::error::ConfigError;

/// Board dimensions
///
/// The board is measured in pixels (`width` x `height`) and split into square
/// cells of `cell_size` pixels. Cells are addressed in grid units, so the
/// valid range is `0..columns` by `0..rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl GridGeometry {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if width < cell_size || height < cell_size {
            return Err(ConfigError::EmptyBoard {
                width,
                height,
                cell_size,
            });
        }
        if width % cell_size != 0 || height % cell_size != 0 {
            return Err(ConfigError::MisalignedBoard {
                width,
                height,
                cell_size,
            });
        }

        // Cell coordinates and counts are i32
        let columns = width / cell_size;
        let rows = height / cell_size;
        let fits = columns
            .checked_mul(rows)
            .is_some_and(|count| i32::try_from(count).is_ok());
        if !fits {
            return Err(ConfigError::BoardTooLarge { columns, rows });
        }

        Ok(Self {
            width,
            height,
            cell_size,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of cells per row
    pub fn columns(&self) -> i32 {
        (self.width / self.cell_size) as i32
    }

    /// Number of cells per column
    pub fn rows(&self) -> i32 {
        (self.height / self.cell_size) as i32
    }

    pub fn cell_count(&self) -> usize {
        (self.width / self.cell_size) as usize * (self.height / self.cell_size) as usize
    }

    /// Cell whose top-left corner sits at the board's pixel centre (rounded down)
    pub fn center(&self) -> Cell {
        Cell::new(self.columns() / 2, self.rows() / 2)
    }

    /// True iff the cell's pixel box lies fully inside the board
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.columns() && cell.y >= 0 && cell.y < self.rows()
    }

    /// Top-left pixel of a cell
    pub fn to_pixels(&self, cell: Cell) -> (i64, i64) {
        let size = i64::from(self.cell_size);
        (i64::from(cell.x) * size, i64::from(cell.y) * size)
    }

    /// Every cell on the board, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let columns = self.columns();
        let rows = self.rows();
        (0..rows).flat_map(move |y| (0..columns).map(move |x| Cell::new(x, y)))
    }
}
