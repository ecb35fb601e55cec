//! Snake for a "page not found" screen: a fixed grid, one apple, a countdown
//! before each round and a best score kept between runs.
//!
//! The gameplay core (`geometry`, `snake`, `apple`, `rules`, `schedule`,
//! `controller`, `render`) has no terminal dependency; `term`, `view` and
//! `game` put it on screen with crossterm.

pub mod apple;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod render;
pub mod rules;
pub mod schedule;
pub mod snake;
pub mod store;
pub mod term;
pub mod view;

pub use config::Config;
pub use controller::{Controller, Frame, Observer, Status};
pub use error::{Error, Result};
pub use store::{FileStore, MemoryStore, ScoreStore};
