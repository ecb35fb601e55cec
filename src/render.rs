use crate::geometry::{Grid, PixelRect};
use crate::snake::{Position, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The drawing primitives the game needs from a canvas.
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);
    fn stroke_rect(&mut self, rect: PixelRect, color: Rgb);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub snake_fill: Rgb,
    pub snake_outline: Rgb,
    pub apple_fill: Rgb,
    pub apple_outline: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            snake_fill: Rgb(0x78, 0x00, 0x3f),
            snake_outline: Rgb(0x00, 0x37, 0x79),
            apple_fill: Rgb(0xe6, 0x41, 0x64),
            apple_outline: Rgb(0x88, 0x1a, 0x1b),
        }
    }
}

/// Repaints the whole board: apple first, then the head and its trail.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    grid: &Grid,
    palette: &Palette,
    snake: &Snake,
    apple: Option<Position>,
) {
    surface.clear();

    if let Some(apple) = apple {
        paint_cell(surface, grid, apple, palette.apple_fill, palette.apple_outline);
    }

    for cell in snake.cells() {
        paint_cell(surface, grid, cell, palette.snake_fill, palette.snake_outline);
    }
}

fn paint_cell<S: Surface + ?Sized>(surface: &mut S, grid: &Grid, cell: Position, fill: Rgb, outline: Rgb) {
    let rect = grid.to_pixel_rect(cell);
    surface.fill_rect(rect, fill);
    surface.stroke_rect(rect, outline);
}
