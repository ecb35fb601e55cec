use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use snake404::geometry::{Grid, PixelRect};
use snake404::render::{render, Palette, Rgb, Surface};
use snake404::rules::Collision;
use snake404::snake::{Position, Velocity};
use snake404::{Config, Controller, Frame, MemoryStore, Observer, Status};

const MS: Duration = Duration::from_millis(1);
// First whole millisecond past a 7-per-second deadline.
const TICK: Duration = Duration::from_millis(143);

/// What an observer saw after each notification.
#[derive(Clone, Debug)]
struct Seen {
    status: Status,
    head: Position,
    trail_len: usize,
    apple: Option<Position>,
    score: u32,
    ticks: u64,
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Seen>>>);

impl Observer for Recorder {
    fn notify(&mut self, frame: &Frame<'_>) {
        self.0.borrow_mut().push(Seen {
            status: frame.status,
            head: frame.board.snake().head(),
            trail_len: frame.board.snake().trail().len(),
            apple: frame.board.apple(),
            score: frame.board.score(),
            ticks: frame.board.ticks(),
        });
    }
}

/// Counts paint calls, standing in for a canvas.
#[derive(Clone, Default)]
struct Canvas(Rc<RefCell<usize>>);

impl Surface for Canvas {
    fn clear(&mut self) {}

    fn fill_rect(&mut self, _rect: PixelRect, _color: Rgb) {
        *self.0.borrow_mut() += 1;
    }

    fn stroke_rect(&mut self, _rect: PixelRect, _color: Rgb) {}
}

impl Observer for Canvas {
    fn notify(&mut self, frame: &Frame<'_>) {
        let grid = *frame.board.grid();
        render(self, &grid, &Palette::default(), frame.board.snake(), frame.board.apple());
    }
}

type Game = Controller<MemoryStore, StdRng>;

/// A started game whose first apple is off the origin's column, so a snake
/// left alone runs straight into the top wall.
fn game_without_apple_ahead(store: MemoryStore) -> (Game, Recorder, Instant) {
    for seed in 0.. {
        let recorder = Recorder::default();
        let mut game = Controller::new(&Config::default(), store.clone(), StdRng::seed_from_u64(seed));
        game.subscribe(Box::new(recorder.clone()));
        let start = Instant::now();
        game.start(start);
        if game.board().apple().map_or(true, |apple| apple.col != 12) {
            return (game, recorder, start);
        }
    }
    unreachable!()
}

fn finish_countdown(game: &mut Game, start: Instant) -> Instant {
    let now = start + 3 * 800 * MS;
    game.advance(start + 800 * MS);
    game.advance(start + 1600 * MS);
    game.advance(now);
    assert_eq!(game.status(), Status::Running);
    now
}

#[test]
fn start_resets_everything() {
    let (game, recorder, _) = game_without_apple_ahead(MemoryStore::new());

    assert_eq!(game.status(), Status::Countdown(3));
    assert_eq!(game.board().score(), 0);
    assert_eq!(game.board().snake().head(), Position::new(12, 9));
    assert!(game.board().snake().trail().is_empty());
    let apple = game.board().apple().unwrap();
    assert!(!game.board().snake().occupies(apple));
    assert!(!game.new_record());

    let seen = recorder.0.borrow();
    assert_eq!(seen[0].status, Status::Idle);
    assert_eq!(seen[1].status, Status::Countdown(3));
}

#[test]
fn untouched_snake_leaves_through_the_top() {
    let (mut game, recorder, start) = game_without_apple_ahead(MemoryStore::new());
    let mut now = finish_countdown(&mut game, start);

    // Rows 8 down to 0 are fine, the tenth tick leaves the board.
    for tick in 1..=9u64 {
        now += TICK;
        game.advance(now);
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.board().snake().head(), Position::new(12, 9 - tick as i32));
        assert_eq!(game.board().snake().trail().len(), tick.min(2) as usize);
    }

    now += TICK;
    game.advance(now);
    assert_eq!(game.status(), Status::Lost);
    assert_eq!(game.crash(), Some(Collision::Wall));
    assert_eq!(game.board().score(), 0);
    assert_eq!(game.highscore(), 0);
    assert!(!game.new_record());
    assert_eq!(game.store().writes(), 0);
    assert_eq!(game.active_timer(), None);

    // Nothing else happens once lost.
    let notifications = recorder.0.borrow().len();
    game.advance(now + 10 * TICK);
    assert_eq!(recorder.0.borrow().len(), notifications);
}

#[test]
fn trail_invariant_holds_every_tick() {
    let mut game = Controller::new(&Config::default(), MemoryStore::new(), StdRng::seed_from_u64(99));
    let recorder = Recorder::default();
    game.subscribe(Box::new(recorder.clone()));
    let start = Instant::now();
    game.start(start);
    let mut now = finish_countdown(&mut game, start);

    // Sweep the board in a zigzag until something ends the game.
    let turns = [Velocity::LEFT, Velocity::DOWN, Velocity::RIGHT, Velocity::UP];
    for i in 0..400 {
        if game.status() != Status::Running {
            break;
        }
        if i % 7 == 0 {
            game.steer(turns[(i / 7) % turns.len()]);
        }
        now += TICK;
        game.advance(now);
    }

    for seen in recorder.0.borrow().iter().filter(|s| s.status == Status::Running) {
        let expected = seen.ticks.min(seen.score as u64 + 2) as usize;
        assert_eq!(seen.trail_len, expected, "{:?}", seen);
        if let Some(apple) = seen.apple {
            assert_ne!(apple, seen.head);
        }
    }
}

#[test]
fn restart_after_loss_begins_a_fresh_round() {
    let (mut game, _recorder, start) = game_without_apple_ahead(MemoryStore::new());
    let mut now = finish_countdown(&mut game, start);
    for _ in 0..10 {
        now += TICK;
        game.advance(now);
    }
    assert_eq!(game.status(), Status::Lost);
    assert_eq!(game.board().velocity(), Velocity::STILL);

    assert!(game.start(now));
    assert_eq!(game.status(), Status::Countdown(3));
    assert_eq!(game.board().snake().head(), Position::new(12, 9));
    assert_eq!(game.board().velocity(), Velocity::UP);
    assert_eq!(game.crash(), None);
}

#[test]
fn reversal_is_ignored_until_the_turn_commits() {
    let (mut game, _recorder, start) = game_without_apple_ahead(MemoryStore::new());
    let mut now = finish_countdown(&mut game, start);

    assert!(!game.steer(Velocity::DOWN));
    now += TICK;
    game.advance(now);
    assert_eq!(game.board().snake().head(), Position::new(12, 8));

    // Last write wins between ticks.
    assert!(game.steer(Velocity::LEFT));
    assert!(game.steer(Velocity::RIGHT));
    now += TICK;
    game.advance(now);
    assert_eq!(game.board().snake().head(), Position::new(13, 8));
    assert!(!game.steer(Velocity::LEFT));
}

#[test]
fn renderer_runs_once_per_state_change() {
    let canvas = Canvas::default();
    let (mut game, recorder, start) = game_without_apple_ahead(MemoryStore::new());
    game.subscribe(Box::new(canvas.clone()));
    let notified_before = recorder.0.borrow().len();

    // Head plus apple on subscribe.
    assert_eq!(*canvas.0.borrow(), 2);

    // Polling between deadlines changes nothing and paints nothing.
    game.advance(start + 100 * MS);
    game.advance(start + 200 * MS);
    assert_eq!(*canvas.0.borrow(), 2);

    finish_countdown(&mut game, start);
    assert_eq!(recorder.0.borrow().len(), notified_before + 3);
    assert_eq!(*canvas.0.borrow(), 2 + 3 * 2);
}

#[test]
fn first_play_with_a_stored_record() {
    let (mut game, _recorder, start) = game_without_apple_ahead(MemoryStore::with_score(4));
    assert_eq!(game.highscore(), 4);
    let mut now = finish_countdown(&mut game, start);
    for _ in 0..10 {
        now += TICK;
        game.advance(now);
    }
    assert_eq!(game.status(), Status::Lost);
    assert_eq!(game.highscore(), 4);
    assert_eq!(game.store().writes(), 0);
}

#[test]
fn tiny_board_fills_up_without_hanging() {
    let config = Config { canvas_width: 40, canvas_height: 20, cell_size: 20, ..Config::default() };
    let grid: Grid = config.grid();
    assert_eq!((grid.width(), grid.height()), (2, 1));

    let mut game = Controller::new(&config, MemoryStore::new(), StdRng::seed_from_u64(0));
    let start = Instant::now();
    game.start(start);
    assert_eq!(game.board().snake().head(), Position::new(1, 0));
    assert_eq!(game.board().apple(), Some(Position::new(0, 0)));

    let now = finish_countdown(&mut game, start);
    assert!(game.steer(Velocity::LEFT));
    game.advance(now + TICK);

    // Eating the only free cell leaves nowhere for a new apple.
    assert_eq!(game.board().score(), 1);
    assert_eq!(game.board().apple(), None);
}
