use crossterm::style::Color;
use tracing::warn;

use crate::controller::{Frame, Observer, Status};
use crate::error::{Error, Result};
use crate::geometry::{Grid, PixelRect};
use crate::render::{render, Palette, Rgb, Surface};
use crate::rules::Collision;
use crate::term::{Coords, Glyph, TermInt, TermManager};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_COLUMNS: TermInt = 2;

/// Draws the game into the terminal whenever the controller reports a change.
pub struct TerminalView {
    term: TermManager,
    grid: Grid,
    palette: Palette,
    board_origin: Coords,
    cells: Vec<Glyph>,
    last_status: Option<Status>,
}

impl TerminalView {
    /// Takes over the terminal. Fails if the board would not fit.
    pub fn new(mut term: TermManager, grid: Grid, palette: Palette) -> Result<Self> {
        let (have_width, have_height) = term.size();
        let too_small = |need_width, need_height| Error::TerminalTooSmall {
            have_width,
            have_height,
            need_width,
            need_height,
        };
        let (board_width, board_height) =
            board_size(&grid).ok_or_else(|| too_small(TermInt::MAX, TermInt::MAX))?;
        // One extra row for the score line.
        if board_width > have_width || board_height >= have_height {
            return Err(too_small(board_width, board_height.saturating_add(1)));
        }

        term.setup()?;
        let board_origin = ((have_width - board_width) / 2, (have_height - board_height - 1) / 2);
        term.draw_borders(board_origin, (board_width, board_height))?;
        term.flush()?;

        Ok(TerminalView {
            term,
            grid,
            palette,
            board_origin,
            cells: vec![Glyph::BLANK; grid.area() * CELL_COLUMNS as usize],
            last_status: None,
        })
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        // The last frame before a crash stays up under the game-over box.
        if frame.status != Status::Lost {
            let palette = self.palette;
            render(self, frame.board.grid(), &palette, frame.board.snake(), frame.board.apple());
            self.present()?;
        }

        self.draw_score(frame)?;

        if self.last_status != Some(frame.status) {
            self.last_status = Some(frame.status);
            self.draw_message(frame)?;
        }

        self.term.flush()
    }

    fn present(&mut self) -> Result<()> {
        let (x0, y0) = (self.board_origin.0 + 1, self.board_origin.1 + 1);
        let row_len = self.grid.width() as usize * CELL_COLUMNS as usize;

        for (i, glyph) in self.cells.iter().enumerate() {
            let pos = (x0 + (i % row_len) as TermInt, y0 + (i / row_len) as TermInt);
            self.term.print_at(pos, *glyph)?;
        }

        Ok(())
    }

    fn draw_score(&mut self, frame: &Frame<'_>) -> Result<()> {
        let text = format!(" Score: {}   Best: {}", frame.board.score(), frame.best());
        let y = self.board_origin.1 + self.grid.height() as TermInt + 2;
        let width = self.grid.width() as TermInt * CELL_COLUMNS + 2;
        self.term.print_line((self.board_origin.0, y), &text, width)
    }

    fn draw_message(&mut self, frame: &Frame<'_>) -> Result<()> {
        match frame.status {
            Status::Idle => self.term.show_message(&[
                "Lost? Have a game of snake.",
                "",
                "Arrow keys or WASD to move",
                "Enter to play, Esc to quit",
            ]),
            Status::Countdown(n) => self.term.show_message(&["Get ready", "", &n.to_string()]),
            Status::Running => self.term.hide_message(),
            Status::Lost => {
                let cause = match frame.crash {
                    Some(Collision::Wall) => "You hit the wall",
                    Some(Collision::Itself) => "You ran into yourself",
                    None => "",
                };
                let result = if frame.new_record {
                    "New record!".to_string()
                } else {
                    format!("Score: {}", frame.board.score())
                };
                self.term.show_message(&[
                    "Game over!",
                    cause,
                    &result,
                    "",
                    "Enter to play again,",
                    "or Esc to quit.",
                ])
            }
        }
    }

    fn cell_index(&self, rect: PixelRect) -> Option<usize> {
        let col = self.grid.to_cell(rect.x);
        let row = self.grid.to_cell(rect.y);
        if col >= self.grid.width() || row >= self.grid.height() {
            return None;
        }
        Some((row * self.grid.width() + col) as usize * CELL_COLUMNS as usize)
    }
}

impl Surface for TerminalView {
    fn clear(&mut self) {
        for glyph in self.cells.iter_mut() {
            *glyph = Glyph::BLANK;
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        if let Some(i) = self.cell_index(rect) {
            for glyph in &mut self.cells[i..i + CELL_COLUMNS as usize] {
                glyph.bg = Some(to_term_color(color));
            }
        }
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Rgb) {
        if let Some(i) = self.cell_index(rect) {
            let outline = ['[', ']'];
            for (glyph, ch) in self.cells[i..i + CELL_COLUMNS as usize].iter_mut().zip(outline.iter()) {
                glyph.ch = *ch;
                glyph.fg = Some(to_term_color(color));
            }
        }
    }
}

impl Observer for TerminalView {
    fn notify(&mut self, frame: &Frame<'_>) {
        if let Err(e) = self.draw(frame) {
            warn!(error = %e, "failed to draw frame");
        }
    }
}

/// Terminal size of the framed board, or `None` if it cannot be addressed.
fn board_size(grid: &Grid) -> Option<(TermInt, TermInt)> {
    let width = TermInt::try_from(grid.width()).ok()?.checked_mul(CELL_COLUMNS)?.checked_add(2)?;
    let height = TermInt::try_from(grid.height()).ok()?.checked_add(2)?;
    Some((width, height))
}

fn to_term_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_52_by_21() {
        assert_eq!(board_size(&Grid::from_canvas(500, 380, 20)), Some((52, 21)));
    }

    #[test]
    fn boards_beyond_terminal_coordinates_do_not_fit() {
        assert_eq!(board_size(&Grid::from_canvas(32_768, 10, 1)), None);
        assert_eq!(board_size(&Grid::from_canvas(65_536, 10, 1)), None);
        assert_eq!(board_size(&Grid::from_canvas(10, 65_535, 1)), None);
        assert_eq!(board_size(&Grid::from_canvas(3_000_000_000, 10, 1)), None);
    }
}
