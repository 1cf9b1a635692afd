use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::sleep,
    time::{Duration, Instant},
};

use log::{debug, info};
use rand::Rng;
use signal_hook::consts::{SIGINT, SIGTERM};

use crate::board::Board;
use crate::collision::{classify, Collision};
use crate::config::{BoundaryPolicy, GROW_RATE, SCORE_MULTIPLIER, START_SIZE};
use crate::error::{GameError, Result};
use crate::food::Food;
use crate::input::{Command, Input};
use crate::render::{Renderer, View};
use crate::score::ScoreTracker;
use crate::snake::{Direction, Snake};
use crate::sound::Chime;
use crate::store::HighScoreStore;

const INITIAL_DIRECTION: Direction = Direction::East;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Playing,
    Paused,
    GameOver,
    /// The snake filled the board.
    Won,
    Terminated,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Waiting,
    Moved,
    Ate { points: u64 },
    Died(Collision),
    Won,
    Quit,
}

/// The whole simulation: one snake, one food, one score.
pub struct Game<S, G> {
    board: Board,
    boundary: BoundaryPolicy,
    snake: Snake,
    food: Food,
    direction: Direction,
    score: ScoreTracker<S>,
    state: GameState,
    rng: G,
    frame: u64,
}

impl<S: HighScoreStore, G: Rng> Game<S, G> {
    pub fn new(board: Board, boundary: BoundaryPolicy, store: S, rng: G, now: Instant) -> Result<Self> {
        let snake = Snake::centered(&board, START_SIZE, INITIAL_DIRECTION);
        if !snake.body().all(|seg| board.is_interior(*seg)) {
            return Err(GameError::BoardTooSmall {
                rows: board.rows(),
                cols: board.cols(),
                length: START_SIZE,
            });
        }

        Ok(Game {
            board,
            boundary,
            snake,
            food: Food::new(),
            direction: INITIAL_DIRECTION,
            score: ScoreTracker::new(store, SCORE_MULTIPLIER, now),
            state: GameState::Idle,
            rng,
            frame: 0,
        })
    }

    /// Puts everything back to where a fresh game starts and begins playing.
    pub fn new_game(&mut self, now: Instant) {
        info!("New game on a {}x{} board", self.board.rows(), self.board.cols());
        self.snake = Snake::centered(&self.board, START_SIZE, INITIAL_DIRECTION);
        self.direction = INITIAL_DIRECTION;
        self.food.consume();
        self.score.reset(now);
        self.state = GameState::Playing;
    }

    /// Changes direction unless that would reverse into the neck.
    pub fn turn(&mut self, to: Direction) {
        if to != self.direction.opposite() {
            self.direction = to;
        }
    }

    pub fn tick(&mut self, command: Option<Command>, now: Instant) -> Tick {
        self.frame += 1;

        if self.state == GameState::Idle {
            self.new_game(now);
        }

        match command {
            Some(Command::Quit) => {
                self.state = GameState::Terminated;
                return Tick::Quit;
            }
            Some(Command::Turn(dir)) if self.state == GameState::Playing => self.turn(dir),
            Some(Command::Restart) if matches!(self.state, GameState::GameOver | GameState::Won) => {
                self.new_game(now)
            }
            Some(Command::Pause) => match self.state {
                GameState::Playing => self.state = GameState::Paused,
                GameState::Paused => self.state = GameState::Playing,
                _ => {}
            },
            _ => {}
        }

        if self.state != GameState::Playing {
            return Tick::Waiting;
        }

        if !self.food.is_set() && self.food.place(&self.board, &self.snake, &mut self.rng).is_none() {
            return self.win();
        }

        self.snake.advance(self.direction);

        let mut hit = classify(&self.snake, &self.food, &self.board, self.boundary);
        if let Collision::Wrapped { to } = hit {
            self.snake.warp_head(to);
            hit = classify(&self.snake, &self.food, &self.board, self.boundary);
        }

        match hit {
            Collision::AteFood => {
                self.food.consume();
                self.snake.grow(GROW_RATE);
                let points = self.score.record_pickup(now);
                debug!("Ate food, +{} (score {})", points, self.score.score());

                if self.food.place(&self.board, &self.snake, &mut self.rng).is_none() {
                    return self.win();
                }
                Tick::Ate { points }
            }
            Collision::SelfHit | Collision::BoundaryHit => {
                info!("Game over ({:?}) with score {}", hit, self.score.score());
                self.state = GameState::GameOver;
                Tick::Died(hit)
            }
            Collision::Wrapped { .. } | Collision::None => Tick::Moved,
        }
    }

    pub fn view(&self) -> View<'_> {
        View {
            board: &self.board,
            snake: &self.snake,
            food: self.food.position(),
            direction: self.direction,
            score: self.score.score(),
            high_score: self.score.high_score(),
            new_high: self.score.is_new_high(),
            state: self.state,
            frame: self.frame,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    fn win(&mut self) -> Tick {
        info!("Board full, won with score {}", self.score.score());
        self.state = GameState::Won;
        Tick::Won
    }

    #[cfg(test)]
    pub(crate) fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake, direction: Direction) {
        self.snake = snake;
        self.direction = direction;
    }

    #[cfg(test)]
    pub(crate) fn tracker(&self) -> &ScoreTracker<S> {
        &self.score
    }
}

/// SIGINT and SIGTERM set `flag` instead of killing the process, so the loop
/// can stop and the terminal gets restored.
pub fn stop_on_signals(flag: &Arc<AtomicBool>) -> Result<()> {
    for sig in [SIGINT, SIGTERM].iter() {
        signal_hook::flag::register(*sig, Arc::clone(flag))?;
    }
    Ok(())
}

/// Runs a `Game` at a fixed tick rate until the player quits.
pub struct SnakeGame<S, G, I, R> {
    game: Game<S, G>,
    input: I,
    renderer: R,
    chime: Chime,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl<S, G, I, R> SnakeGame<S, G, I, R>
where
    S: HighScoreStore,
    G: Rng,
    I: Input,
    R: Renderer,
{
    pub fn new(game: Game<S, G>, input: I, renderer: R, chime: Chime, interval: Duration) -> Self {
        SnakeGame { game, input, renderer, chime, interval, shutdown: Arc::new(AtomicBool::new(false)) }
    }

    /// Setting this flag stops the loop at the start of the next tick.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    pub fn game(&self) -> &Game<S, G> {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn play(&mut self) -> Result<()> {
        let result = self.run_loop();
        self.chime.shutdown();
        result
    }

    fn run_loop(&mut self) -> Result<()> {
        let mut next_tick = Instant::now() + self.interval;

        loop {
            let command = if self.shutdown.load(Ordering::SeqCst) {
                Some(Command::Quit)
            } else {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                self.input.poll(timeout)?
            };

            let now = Instant::now();
            if now < next_tick {
                sleep(next_tick - now);
            }
            next_tick = next_tick.max(now) + self.interval;

            let tick = self.game.tick(command, Instant::now());
            if let Tick::Ate { .. } = tick {
                self.chime.play();
            }

            self.renderer.draw(&self.game.view())?;

            if tick == Tick::Quit {
                info!("Quitting");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Direction::*, Segment};
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123_4567_89AB_CDEF;

    fn game_on(board: Board, boundary: BoundaryPolicy) -> Game<MemoryStore, ChaCha8Rng> {
        Game::new(
            board,
            boundary,
            MemoryStore::default(),
            ChaCha8Rng::seed_from_u64(RNG_SEED),
            Instant::now(),
        )
        .unwrap()
    }

    /// A 20x20 game already playing, with the food parked in a corner.
    fn playing(boundary: BoundaryPolicy) -> (Game<MemoryStore, ChaCha8Rng>, Instant) {
        let mut game = game_on(Board::new(20, 20), boundary);
        let start = Instant::now();
        game.new_game(start);
        game.food_mut().set(Segment::new(1, 1));
        (game, start)
    }

    #[test]
    fn starts_idle_and_plays_on_first_tick() {
        let mut game = game_on(Board::new(20, 20), BoundaryPolicy::Bounded);
        assert_eq!(game.state(), GameState::Idle);

        let tick = game.tick(None, Instant::now());
        assert_eq!(game.state(), GameState::Playing);
        assert!(matches!(tick, Tick::Moved | Tick::Ate { .. }));
        assert!(game.food().is_set());
    }

    #[test]
    fn too_small_board_is_rejected() {
        let result = Game::new(
            Board::new(3, 8),
            BoundaryPolicy::Bounded,
            MemoryStore::default(),
            ChaCha8Rng::seed_from_u64(RNG_SEED),
            Instant::now(),
        );
        assert!(matches!(result, Err(GameError::BoardTooSmall { rows: 3, cols: 8, length: 5 })));
    }

    #[test]
    fn eating_grows_scores_and_replaces_food() {
        let (mut game, start) = playing(BoundaryPolicy::Bounded);
        let in_front = game.snake().head().step(East);
        game.food_mut().set(in_front);

        let tick = game.tick(None, start + Duration::from_secs(1));
        assert_eq!(tick, Tick::Ate { points: 500 });
        assert_eq!(game.snake().head(), in_front);
        assert_eq!(game.snake().len(), 8);
        assert_eq!(game.score(), 500);

        let food = game.food().position().unwrap();
        assert!(!game.snake().contains(food));
        assert!(game.tracker().is_new_high());
        assert_eq!(game.tracker().store().value, 500);
    }

    #[test]
    fn reverse_is_ignored() {
        let (mut game, start) = playing(BoundaryPolicy::Bounded);
        game.tick(Some(Command::Turn(West)), start);
        assert_eq!(game.direction(), East);

        game.tick(Some(Command::Turn(North)), start);
        game.tick(Some(Command::Turn(West)), start);
        assert_eq!(game.direction(), West);
        game.tick(Some(Command::Turn(East)), start);
        assert_eq!(game.direction(), West);
        assert_eq!(game.snake().heading(), West);
    }

    #[test]
    fn u_turn_ends_the_game() {
        let (mut game, start) = playing(BoundaryPolicy::Bounded);
        assert_eq!(game.tick(Some(Command::Turn(South)), start), Tick::Moved);
        assert_eq!(game.tick(Some(Command::Turn(West)), start), Tick::Moved);
        assert_eq!(game.tick(Some(Command::Turn(North)), start), Tick::Died(Collision::SelfHit));
        assert_eq!(game.state(), GameState::GameOver);

        let head = game.snake().head();
        assert_eq!(game.tick(None, start), Tick::Waiting);
        assert_eq!(game.snake().head(), head);
    }

    #[test]
    fn wall_ends_the_game_when_bounded() {
        let (mut game, start) = playing(BoundaryPolicy::Bounded);
        let mut last = Tick::Waiting;
        for _ in 0..9 {
            last = game.tick(None, start);
        }
        assert_eq!(last, Tick::Died(Collision::BoundaryHit));
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn wrap_mode_reenters_on_the_left() {
        let mut game = game_on(Board::new(20, 12), BoundaryPolicy::Wrap);
        let start = Instant::now();
        game.new_game(start);
        game.food_mut().set(Segment::new(1, 1));
        assert_eq!(game.snake().head(), Segment::new(10, 6));

        for _ in 0..4 {
            assert_eq!(game.tick(None, start), Tick::Moved);
        }
        assert_eq!(game.snake().head(), Segment::new(10, 10));

        assert_eq!(game.tick(None, start), Tick::Moved);
        assert_eq!(game.snake().head(), Segment::new(10, 1));
        assert_eq!(game.snake().len(), 5);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn wrapping_onto_the_body_is_fatal() {
        let mut game = game_on(Board::new(20, 12), BoundaryPolicy::Wrap);
        let start = Instant::now();
        game.new_game(start);
        game.food_mut().set(Segment::new(1, 1));
        // cols 10 down to 0; after one step East the body still covers (10, 1)
        game.set_snake(Snake::new(Segment::new(10, 10), 11, East), East);

        assert_eq!(game.tick(None, start), Tick::Died(Collision::SelfHit));
        assert_eq!(game.snake().head(), Segment::new(10, 1));
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn wrapping_onto_food_eats_it() {
        let mut game = game_on(Board::new(20, 12), BoundaryPolicy::Wrap);
        let start = Instant::now();
        game.new_game(start);
        game.food_mut().set(Segment::new(10, 1));

        for _ in 0..4 {
            game.tick(None, start);
        }
        assert!(matches!(game.tick(None, start), Tick::Ate { .. }));
        assert_eq!(game.snake().len(), 8);
    }

    #[test]
    fn restart_resets_everything_the_same_way() {
        let (mut game, start) = playing(BoundaryPolicy::Bounded);
        let next = game.snake().head().step(East);
        game.food_mut().set(next);
        game.tick(None, start + Duration::from_secs(1));
        game.food_mut().set(Segment::new(1, 1));
        game.tick(Some(Command::Turn(South)), start);
        game.tick(Some(Command::Turn(West)), start);
        game.tick(Some(Command::Turn(North)), start);
        assert_eq!(game.state(), GameState::GameOver);

        let later = start + Duration::from_secs(5);
        game.new_game(later);
        let first = game.snake().clone();
        assert_eq!(game.score(), 0);

        game.new_game(later);
        assert_eq!(game.snake(), &first);
        assert_eq!(game.score(), 0);
        assert_eq!(game.direction(), East);
        assert_eq!(game.state(), GameState::Playing);
        assert!(!game.tracker().is_new_high());
    }

    #[test]
    fn restart_only_after_game_over() {
        let (mut game, start) = playing(BoundaryPolicy::Bounded);
        game.tick(None, start);
        let head = game.snake().head();
        game.tick(Some(Command::Restart), start);
        assert_eq!(game.snake().head(), head.step(East));

        game.tick(Some(Command::Turn(South)), start);
        game.tick(Some(Command::Turn(West)), start);
        game.tick(Some(Command::Turn(North)), start);
        assert_eq!(game.state(), GameState::GameOver);

        game.tick(Some(Command::Restart), start);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().head(), Board::new(20, 20).center().step(East));
    }

    #[test]
    fn pause_freezes_the_snake() {
        let (mut game, start) = playing(BoundaryPolicy::Bounded);
        game.tick(Some(Command::Pause), start);
        assert_eq!(game.state(), GameState::Paused);
        let head = game.snake().head();

        assert_eq!(game.tick(Some(Command::Turn(South)), start), Tick::Waiting);
        assert_eq!(game.snake().head(), head);
        assert_eq!(game.direction(), East);

        assert_eq!(game.tick(Some(Command::Pause), start), Tick::Moved);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn filling_the_board_wins() {
        let mut game = game_on(Board::new(3, 10), BoundaryPolicy::Bounded);
        let start = Instant::now();
        game.new_game(start);
        game.set_snake(Snake::new(Segment::new(1, 7), 7, East), East);
        game.food_mut().set(Segment::new(1, 8));

        assert_eq!(game.tick(None, start), Tick::Won);
        assert_eq!(game.state(), GameState::Won);
        assert!(!game.food().is_set());

        game.tick(Some(Command::Restart), start);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn quit_terminates() {
        let (mut game, start) = playing(BoundaryPolicy::Bounded);
        assert_eq!(game.tick(Some(Command::Quit), start), Tick::Quit);
        assert_eq!(game.state(), GameState::Terminated);
    }

    struct Script(VecDeque<Option<Command>>);

    impl Input for Script {
        fn poll(&mut self, _timeout: Duration) -> Result<Option<Command>> {
            Ok(self.0.pop_front().unwrap_or(Some(Command::Quit)))
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(GameState, u64, usize)>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, view: &View<'_>) -> Result<()> {
            self.frames.push((view.state, view.score, view.snake.len()));
            Ok(())
        }
    }

    fn runner(script: Vec<Option<Command>>) -> SnakeGame<MemoryStore, ChaCha8Rng, Script, Recorder> {
        SnakeGame::new(
            game_on(Board::new(20, 20), BoundaryPolicy::Bounded),
            Script(script.into_iter().collect()),
            Recorder::default(),
            Chime::new(false, Duration::from_millis(0)),
            Duration::from_millis(0),
        )
    }

    #[test]
    fn loop_renders_every_tick_until_quit() {
        let mut snake_game = runner(vec![None, Some(Command::Turn(South)), None]);
        snake_game.play().unwrap();

        let frames = &snake_game.renderer().frames;
        assert_eq!(frames.len(), 4);
        assert!(frames[..3].iter().all(|(state, _, _)| *state == GameState::Playing));
        assert_eq!(frames[3].0, GameState::Terminated);
        assert_eq!(snake_game.game().direction(), South);
    }

    #[test]
    fn shutdown_flag_stops_the_loop() {
        let mut snake_game = runner(vec![None; 10]);
        snake_game.shutdown_flag().store(true, Ordering::SeqCst);
        snake_game.play().unwrap();

        assert_eq!(snake_game.renderer().frames.len(), 1);
        assert_eq!(snake_game.game().state(), GameState::Terminated);
    }

    #[cfg(unix)]
    #[test]
    fn sigterm_stops_the_loop() {
        let mut snake_game = runner(vec![None; 10]);
        stop_on_signals(&snake_game.shutdown_flag()).unwrap();
        signal_hook::low_level::raise(SIGTERM).unwrap();
        snake_game.play().unwrap();

        assert_eq!(snake_game.renderer().frames.len(), 1);
        assert_eq!(snake_game.game().state(), GameState::Terminated);
    }
}
