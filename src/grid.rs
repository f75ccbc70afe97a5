/// A cell coordinate in grid units, `(0, 0)` is the top left corner
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell offset by `(dx, dy)`
    pub const fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// The fixed playing field
///
/// Dimensions are counted in cells. `cell_size` is the pixel edge length of a
/// cell and only matters to front ends that draw the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: u32,
}

impl Grid {
    /// Pixel width of the reference board
    pub const WIDTH_PX: u32 = 480;
    /// Pixel height of the reference board
    pub const HEIGHT_PX: u32 = 480;
    /// Pixel edge length of a cell on the reference board
    pub const CELL_SIZE: u32 = 20;

    /// Build a grid of `width` by `height` cells
    ///
    /// **Panics** if either dimension is zero
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_cell_size(width, height, Self::CELL_SIZE)
    }

    /// Build a grid covering a pixel extent, truncating partial cells
    ///
    /// **Panics** if `cell_size` is zero or larger than either extent
    pub fn from_pixels(width_px: u32, height_px: u32, cell_size: u32) -> Self {
        assert!(cell_size > 0, "Cell size must be positive.");
        Self::with_cell_size(width_px / cell_size, height_px / cell_size, cell_size)
    }

    fn with_cell_size(width: u32, height: u32, cell_size: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Grid must contain at least one cell."
        );
        Self {
            width: width as i32,
            height: height as i32,
            cell_size,
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of cells in the grid
    pub const fn area(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// The cell a fresh snake starts on
    pub const fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub const fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_pixels(Self::WIDTH_PX, Self::HEIGHT_PX, Self::CELL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_grid() {
        let grid = Grid::default();
        assert_eq!(grid.width(), 24, "Width in cells");
        assert_eq!(grid.height(), 24, "Height in cells");
        assert_eq!(grid.cell_size(), 20, "Cell size kept");
        assert_eq!(grid.center(), Cell::new(12, 12), "Center cell");
        assert_eq!(grid.area(), 576, "Area");
    }

    #[test]
    fn bounds() {
        let grid = Grid::new(4, 3);
        assert!(grid.in_bounds(Cell::new(0, 0)), "Origin in bounds");
        assert!(grid.in_bounds(Cell::new(3, 2)), "Far corner in bounds");
        assert!(!grid.in_bounds(Cell::new(-1, 0)), "x = -1 out of bounds");
        assert!(!grid.in_bounds(Cell::new(4, 0)), "x = width out of bounds");
        assert!(!grid.in_bounds(Cell::new(0, -1)), "y = -1 out of bounds");
        assert!(!grid.in_bounds(Cell::new(0, 3)), "y = height out of bounds");
    }

    #[test]
    #[should_panic]
    fn empty_grid_panics() {
        Grid::new(0, 5);
    }
}
