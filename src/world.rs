use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid must have at least one row and one column"),
            GridError::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
        }
    }
}

impl std::error::Error for GridError {}

// Layout of the classic level, rows top to bottom. 1 = wall.
const DEMO_LEVEL: [[u8; 17]; 10] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const OPEN_ROOM_SIZE: usize = 5;

/// Static occupancy grid. Row index grows along world +Y, column index along +X.
/// Anything outside the grid counts as solid.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build from row slices; `0` is empty, anything else is a wall.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(
                row.iter()
                    .map(|&v| if v == 0 { Cell::Empty } else { Cell::Wall }),
            );
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// All-empty grid, bounded only by its edge.
    pub fn open(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    /// The 10x17 level with a solid block at rows 3-4, cols 6-9.
    pub fn demo_level() -> Self {
        Self {
            rows: DEMO_LEVEL.len(),
            cols: DEMO_LEVEL[0].len(),
            cells: DEMO_LEVEL
                .iter()
                .flatten()
                .map(|&v| if v == 0 { Cell::Empty } else { Cell::Wall })
                .collect(),
        }
    }

    /// 5x5 room with no interior walls.
    pub fn open_room() -> Self {
        Self {
            rows: OPEN_ROOM_SIZE,
            cols: OPEN_ROOM_SIZE,
            cells: vec![Cell::Empty; OPEN_ROOM_SIZE * OPEN_ROOM_SIZE],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: i32, col: i32) -> Option<Cell> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(self.cells[row as usize * self.cols + col as usize])
    }

    /// Out of bounds is solid.
    #[inline]
    pub fn is_wall(&self, row: i32, col: i32) -> bool {
        self.cell(row, col).is_none_or(|c| c == Cell::Wall)
    }

    /// True iff `0 <= x < cols` and `0 <= y < rows`.
    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.cols as f32 && y < self.rows as f32
    }

    /// Point query in world coordinates: x selects the column, y the row.
    #[inline]
    pub fn is_wall_at(&self, x: f32, y: f32) -> bool {
        self.is_wall(y.floor() as i32, x.floor() as i32)
    }
}
