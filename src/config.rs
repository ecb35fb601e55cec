use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{Error, Result};
use crate::geometry::Grid;

/// Largest grid side accepted, in cells. Keeps every board coordinate well
/// inside `i32` and the terminal drawing inside `u16`.
pub const MAX_GRID_SIDE: u32 = 4096;

#[derive(Parser, Debug, Clone)]
#[command(name = "snake404")]
#[command(about = "Snake for when the page you wanted is not there")]
pub struct Config {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 500)]
    pub canvas_width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 380)]
    pub canvas_height: u32,

    /// Side of one grid cell in pixels
    #[arg(long, default_value_t = 20)]
    pub cell_size: u32,

    /// Ticks per second at the start of a game
    #[arg(long, default_value_t = 7)]
    pub min_speed: u32,

    /// Ticks per second the game never goes beyond
    #[arg(long, default_value_t = 7)]
    pub max_speed: u32,

    /// Milliseconds between countdown steps
    #[arg(long, default_value_t = 800)]
    pub countdown_ms: u64,

    /// Countdown starting value
    #[arg(long, default_value_t = 3)]
    pub countdown_from: u32,

    /// Where the best score is kept
    #[arg(long, default_value = "snake404-highscore.json")]
    pub highscore_file: PathBuf,

    /// Write logs here (the terminal is busy drawing the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            canvas_width: 500,
            canvas_height: 380,
            cell_size: 20,
            min_speed: 7,
            max_speed: 7,
            countdown_ms: 800,
            countdown_from: 3,
            highscore_file: PathBuf::from("snake404-highscore.json"),
            log_file: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(Error::InvalidConfig("cell size must be positive".into()));
        }
        if self.canvas_width < self.cell_size || self.canvas_height < self.cell_size {
            return Err(Error::InvalidConfig(format!(
                "a {}x{} canvas holds no {}px cells",
                self.canvas_width, self.canvas_height, self.cell_size
            )));
        }
        let (columns, rows) = (self.canvas_width / self.cell_size, self.canvas_height / self.cell_size);
        if columns > MAX_GRID_SIDE || rows > MAX_GRID_SIDE {
            return Err(Error::InvalidConfig(format!(
                "a {}x{} grid exceeds the {} cell limit per side",
                columns, rows, MAX_GRID_SIDE
            )));
        }
        if self.min_speed == 0 || self.max_speed == 0 {
            return Err(Error::InvalidConfig("speeds must be positive".into()));
        }
        if self.min_speed > self.max_speed {
            return Err(Error::InvalidConfig(format!(
                "min speed {} exceeds max speed {}",
                self.min_speed, self.max_speed
            )));
        }
        if self.countdown_from == 0 || self.countdown_ms == 0 {
            return Err(Error::InvalidConfig("countdown must last at least one step".into()));
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::from_canvas(self.canvas_width, self.canvas_height, self.cell_size)
    }

    pub fn speed_ramp(&self) -> SpeedRamp {
        SpeedRamp { min_speed: self.min_speed, max_speed: self.max_speed }
    }

    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_ms)
    }
}

/// Tick rate as a function of score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpeedRamp {
    pub min_speed: u32,
    pub max_speed: u32,
}

impl SpeedRamp {
    /// Ticks per second: `min_speed` until the score passes it, then the
    /// score itself, capped at `max_speed`.
    pub fn speed(&self, score: u32) -> u32 {
        if score > self.min_speed {
            score.min(self.max_speed)
        } else {
            self.min_speed
        }
    }

    pub fn interval(&self, score: u32) -> Duration {
        Duration::from_secs(1) / self.speed(score).max(1)
    }
}
