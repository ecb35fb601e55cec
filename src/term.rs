use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::error::Result;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// One terminal character with optional colours.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph { ch: ' ', fg: None, bg: None };

    pub fn plain(ch: char) -> Self {
        Glyph { ch, fg: None, bg: None }
    }
}

/// Owns the terminal while the game runs. Keeps a copy of everything drawn
/// so message boxes can be removed without redrawing the board.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
    active: bool,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![Glyph::BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None, active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()?;
        self.active = true;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Frames the rectangle `top_left .. top_left + size` (border included).
    pub fn draw_borders(&mut self, top_left: Coords, size: Coords) -> Result<()> {
        let (width, height) = size;
        let (x0, y0) = top_left;
        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x { '+' } else { '-' };
            self.print_at((x, y0), Glyph::plain(ch))?;
            self.print_at((x, end_y), Glyph::plain(ch))?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), Glyph::plain('|'))?;
            self.print_at((end_x, y), Glyph::plain('|'))?;
        }

        Ok(())
    }

    /// Writes `text` starting at `pos`, padded with blanks to `width`.
    pub fn print_line(&mut self, pos: Coords, text: &str, width: TermInt) -> Result<()> {
        let padded = format!("{:<width$}", text, width = width as usize);
        for (i, ch) in padded.chars().take(width as usize).enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), Glyph::plain(ch))?;
        }
        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), Glyph::BLANK)?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), Glyph::plain(ch))?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        Ok(())
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let pos = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(glyph) = self.saved(pos) {
                    self.print_at_no_save(pos, glyph)?;
                }
            }
        }

        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    /// Draws `glyph` and remembers it. Positions off screen are dropped.
    pub fn print_at(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        if let Some(i) = self.index(pos) {
            self.screen[i] = glyph;
            // Leave message boxes on top; the buffer restores this cell later.
            if !self.covered_by_message(pos) {
                self.print_at_no_save(pos, glyph)?;
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All))?;
        self.screen = vec![Glyph::BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at_no_save(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            SetForegroundColor(glyph.fg.unwrap_or(Color::Reset)),
            SetBackgroundColor(glyph.bg.unwrap_or(Color::Reset)),
            Print(glyph.ch)
        )?;
        Ok(())
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn saved(&self, pos: Coords) -> Option<Glyph> {
        self.index(pos).map(|i| self.screen[i])
    }

    fn covered_by_message(&self, pos: Coords) -> bool {
        self.current_msg.as_ref().map_or(false, |msg| {
            pos.0 >= msg.top_left.0
                && pos.0 < msg.top_left.0 + msg.width
                && pos.1 >= msg.top_left.1
                && pos.1 < msg.top_left.1 + msg.height
        })
    }
}

/// Drains pending key presses, waiting at most `timeout` for the first.
pub fn read_key_events(timeout: Duration) -> Result<Vec<KeyEvent>> {
    let mut events = vec![];
    let mut wait = timeout;

    while poll(wait)? {
        if let Event::Key(ev) = read()? {
            events.push(ev);
        }
        wait = Duration::from_millis(0);
    }

    Ok(events)
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
