use crate::snake::Position;

/// A rectangle in canvas pixels: top-left corner plus a square side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Maps a fixed-size canvas onto a grid of square cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cell_size: u32,
    width: i32,
    height: i32,
}

impl Grid {
    /// Panics if `cell_size` is zero; callers validate their configuration first.
    /// Sides too long for `i32` saturate rather than wrap.
    pub fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        assert!(cell_size > 0, "cell size must be positive");
        Grid {
            cell_size,
            width: i32::try_from(canvas_width / cell_size).unwrap_or(i32::MAX),
            height: i32::try_from(canvas_height / cell_size).unwrap_or(i32::MAX),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn area(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    pub fn to_cell(&self, pixel: u32) -> i32 {
        (pixel / self.cell_size) as i32
    }

    /// Only meaningful for cells inside the grid.
    pub fn to_pixel_rect(&self, cell: Position) -> PixelRect {
        PixelRect {
            x: cell.col as u32 * self.cell_size,
            y: cell.row as u32 * self.cell_size,
            size: self.cell_size,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.col >= 0 && pos.row >= 0 && pos.col < self.width && pos.row < self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Position::new(col, row)))
    }
}
