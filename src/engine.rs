use std::time::Duration;

use chrono::{DateTime, Local};
use ggez::graphics::{Color, Rect};
use ggez::mint::Point2;
use ggez::GameResult;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::entity::Entity;
use crate::food::Food;
use crate::grid::{Direction, GridSize};
use crate::palette::{self, BACKGROUND_COLOR, GAME_OVER_COLOR, GRID_COLOR, TITLE_COLOR};
use crate::snake::Snake;
use crate::surface::{Align, Surface};

pub const DEFAULT_BASE_SPEED_MS: i32 = 100;
pub const POINTS_PER_LEVEL: u32 = 50;
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 3;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// A player command, already decoded from whatever key produced it.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Input {
    Start,
    Pause,
    Resume,
    Steer(Direction),
}

/// Something the host may want to react to, produced synchronously by the engine.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GameEvent {
    ScoreChanged(u32),
    FoodEaten { value: u32 },
    LevelUp(u32),
    NewHighScore(u32),
    /// Every cell is covered by the snake; no food can be placed.
    BoardFilled,
    GameOver { score: u32 },
}

/// Best score of this process. Never written to disk.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct HighScore {
    pub score: u32,
    pub set_at: Option<DateTime<Local>>,
}

pub fn difficulty_name(difficulty: u8) -> &'static str {
    match difficulty {
        1 => "Easy",
        3 => "Hard",
        _ => "Medium",
    }
}

pub struct GameEngine {
    state: GameState,
    snake: Option<Snake>,
    food: Option<Food>,
    score: u32,
    level: u32,
    high_score: HighScore,
    grid: GridSize,
    cell_size: i32,
    base_speed: i32,
    difficulty: u8,
    show_grid: bool,
    snake_color: Color,
    rng: StdRng,
}

impl GameEngine {
    /// An engine for a `width` x `height` pixel play area split into square
    /// cells of `cell_size` pixels. Starts in the menu.
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self::with_rng(width, height, cell_size, StdRng::from_entropy())
    }

    /// Same as [`GameEngine::new`] with a reproducible food sequence.
    pub fn with_seed(width: i32, height: i32, cell_size: i32, seed: u64) -> Self {
        Self::with_rng(width, height, cell_size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: i32, height: i32, cell_size: i32, rng: StdRng) -> Self {
        let cell_size = cell_size.max(1);
        GameEngine {
            state: GameState::Menu,
            snake: None,
            food: None,
            score: 0,
            level: 1,
            high_score: HighScore::default(),
            grid: GridSize::from_pixels(width, height, cell_size),
            cell_size,
            base_speed: DEFAULT_BASE_SPEED_MS,
            difficulty: 2,
            show_grid: true,
            snake_color: palette::from_rgb(palette::DEFAULT_SNAKE_COLOR),
            rng,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        debug!("difficulty set to {}", difficulty_name(self.difficulty));
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show_grid: bool) {
        self.show_grid = show_grid;
    }

    pub fn snake_color(&self) -> Color {
        self.snake_color
    }

    /// Changes the snake color, recoloring the live snake immediately.
    pub fn set_snake_color(&mut self, color: Color) {
        self.snake_color = color;
        if let Some(snake) = self.snake.as_mut() {
            snake.set_color(color);
        }
    }

    pub fn set_base_speed(&mut self, base_speed_ms: i32) {
        self.base_speed = base_speed_ms;
    }

    /// Tick interval in milliseconds for the current level and difficulty.
    ///
    /// Not floored: high levels drive this towards zero and below, so use
    /// [`GameEngine::tick_interval`] when scheduling.
    pub fn speed(&self) -> i32 {
        let modifier = match self.difficulty {
            1 => 20,
            3 => -20,
            _ => 0,
        };
        self.base_speed - self.level as i32 * 5 + modifier
    }

    pub fn tick_interval(&self, min_ms: u64) -> Duration {
        let ms = i64::from(self.speed()).max(min_ms as i64);
        Duration::from_millis(ms as u64)
    }

    /// Recomputes the grid for a new play area. The snake and food stay where
    /// they are, even if that is now outside the grid.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.grid = GridSize::from_pixels(width, height, self.cell_size);
        debug!("grid resized to {}x{}", self.grid.width, self.grid.height);
    }

    pub fn start_new_game(&mut self) -> Vec<GameEvent> {
        self.score = 0;
        self.level = 1;

        let snake = Snake::new(self.grid.center(), self.snake_color);
        self.food = Food::spawn(self.grid, &snake, &mut self.rng);
        if self.food.is_none() {
            warn!("no free cell for food on a {}x{} grid", self.grid.width, self.grid.height);
        }
        self.snake = Some(snake);
        self.state = GameState::Playing;

        info!(
            "new game on {}x{} grid ({})",
            self.grid.width,
            self.grid.height,
            difficulty_name(self.difficulty)
        );
        vec![GameEvent::ScoreChanged(0)]
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
        }
    }

    /// Applies one player command. Commands that mean nothing in the current
    /// state are dropped.
    pub fn handle_input(&mut self, input: Input) -> Vec<GameEvent> {
        match (self.state, input) {
            (GameState::Menu | GameState::GameOver, Input::Start) => return self.start_new_game(),
            (GameState::Playing, Input::Steer(direction)) => {
                if let Some(snake) = self.snake.as_mut() {
                    snake.change_direction(direction);
                }
            }
            (GameState::Playing, Input::Pause) => self.pause(),
            (GameState::Paused, Input::Resume) => self.resume(),
            _ => {}
        }
        Vec::new()
    }

    /// Advances the simulation by one tick.
    pub fn update(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Playing {
            return events;
        }
        let snake = match self.snake.as_mut() {
            Some(snake) => snake,
            None => return events,
        };

        if !snake.step(self.grid) {
            self.state = GameState::GameOver;
            info!("game over: score {}, length {}", self.score, snake.len());
            events.push(GameEvent::GameOver { score: self.score });
            return events;
        }

        let eaten = match self.food {
            Some(food) if snake.head() == Some(food.position) => food,
            _ => {
                snake.shrink_tail();
                return events;
            }
        };

        self.score += eaten.value;
        events.push(GameEvent::ScoreChanged(self.score));
        events.push(GameEvent::FoodEaten { value: eaten.value });

        if self.score > self.high_score.score {
            self.high_score = HighScore {
                score: self.score,
                set_at: Some(Local::now()),
            };
            events.push(GameEvent::NewHighScore(self.score));
        }

        self.food = Food::spawn(self.grid, snake, &mut self.rng);

        if self.score % POINTS_PER_LEVEL == 0 {
            let level = self.score / POINTS_PER_LEVEL + 1;
            if level != self.level {
                debug!("level {} reached at score {}", level, self.score);
                events.push(GameEvent::LevelUp(level));
            }
            self.level = level;
        }

        if self.food.is_none() {
            warn!("board filled at length {}", snake.len());
            self.state = GameState::GameOver;
            events.push(GameEvent::BoardFilled);
            events.push(GameEvent::GameOver { score: self.score });
        }

        events
    }

    /// Replaces the live snake, for scripted setups.
    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake = Some(snake);
    }

    /// Replaces the food item, for scripted setups.
    pub fn place_food(&mut self, food: Food) {
        self.food = Some(food);
    }

    fn area_width(&self) -> f32 {
        (self.grid.width * self.cell_size) as f32
    }

    fn area_height(&self) -> f32 {
        (self.grid.height * self.cell_size) as f32
    }

    /// Draws the current state. Reads the engine only.
    pub fn render(&self, surface: &mut dyn Surface) -> GameResult {
        surface.clear(BACKGROUND_COLOR)?;

        if self.show_grid {
            self.draw_grid(surface)?;
        }

        match self.state {
            GameState::Menu => self.draw_menu(surface)?,
            GameState::Playing => {
                self.draw_entities(surface)?;
                self.draw_info(surface)?;
            }
            GameState::Paused => {
                self.draw_entities(surface)?;
                self.draw_info(surface)?;
                self.draw_paused_overlay(surface)?;
            }
            GameState::GameOver => {
                self.draw_entities(surface)?;
                self.draw_info(surface)?;
                self.draw_game_over_overlay(surface)?;
            }
        }

        Ok(())
    }

    fn draw_grid(&self, surface: &mut dyn Surface) -> GameResult {
        let cell = self.cell_size as f32;
        let (width, height) = (self.area_width(), self.area_height());

        for x in 0..=self.grid.width {
            let px = x as f32 * cell;
            surface.line(Point2 { x: px, y: 0.0 }, Point2 { x: px, y: height }, GRID_COLOR)?;
        }
        for y in 0..=self.grid.height {
            let py = y as f32 * cell;
            surface.line(Point2 { x: 0.0, y: py }, Point2 { x: width, y: py }, GRID_COLOR)?;
        }

        Ok(())
    }

    fn draw_entities(&self, surface: &mut dyn Surface) -> GameResult {
        let cell = self.cell_size as f32;
        if let Some(snake) = &self.snake {
            snake.render(surface, cell)?;
        }
        if let Some(food) = &self.food {
            food.render(surface, cell)?;
        }
        Ok(())
    }

    fn draw_info(&self, surface: &mut dyn Surface) -> GameResult {
        let lines = [
            format!("Score: {}", self.score),
            format!("High Score: {}", self.high_score.score),
            format!("Level: {}", self.level),
        ];

        for (i, line) in lines.iter().enumerate() {
            let y = 10.0 + i as f32 * 30.0;
            surface.text(line, Point2 { x: 12.0, y: y + 2.0 }, 20.0, Color::BLACK, Align::Left)?;
            surface.text(line, Point2 { x: 10.0, y }, 20.0, Color::WHITE, Align::Left)?;
        }

        Ok(())
    }

    fn draw_menu(&self, surface: &mut dyn Surface) -> GameResult {
        self.draw_snake_silhouette(surface)?;

        let center_x = self.area_width() / 2.0;
        let title_y = self.area_height() / 2.0 - 80.0;

        surface.text(
            "SNAKE GAME",
            Point2 { x: center_x + 3.0, y: title_y + 3.0 },
            48.0,
            Color::from_rgba(0, 0, 0, 100),
            Align::Center,
        )?;
        surface.text("SNAKE GAME", Point2 { x: center_x, y: title_y }, 48.0, TITLE_COLOR, Align::Center)?;
        surface.text(
            "Press ENTER to Start",
            Point2 { x: center_x, y: title_y + 80.0 },
            24.0,
            Color::WHITE,
            Align::Center,
        )?;
        surface.text(
            "Use Arrow Keys to Move",
            Point2 { x: center_x, y: title_y + 120.0 },
            24.0,
            Color::WHITE,
            Align::Center,
        )?;
        surface.text(
            "O - Settings   G - Grid   M - Sound   Q - Quit",
            Point2 { x: center_x, y: title_y + 160.0 },
            18.0,
            Color::new(0.8, 0.8, 0.8, 1.0),
            Align::Center,
        )
    }

    /// A faint coiled snake behind the menu text.
    fn draw_snake_silhouette(&self, surface: &mut dyn Surface) -> GameResult {
        let color = Color::from_rgba(0, 255, 0, 40);
        let center_x = self.area_width() / 2.0;
        let center_y = self.area_height() / 2.0;

        for i in 0..20 {
            let angle = (i as f32 * 0.5) % (2.0 * std::f32::consts::PI);
            let radius = 150.0 - i as f32 * 5.0;
            let size = 30.0 - (i / 2) as f32;
            surface.fill_circle(
                Point2 {
                    x: center_x + angle.cos() * radius,
                    y: center_y + angle.sin() * radius,
                },
                size / 2.0,
                color,
            )?;
        }

        Ok(())
    }

    fn draw_paused_overlay(&self, surface: &mut dyn Surface) -> GameResult {
        surface.fill_rect(
            Rect::new(0.0, 0.0, self.area_width(), self.area_height()),
            Color::from_rgba(0, 0, 0, 150),
        )?;

        let center_x = self.area_width() / 2.0;
        let y = self.area_height() / 2.0 - 50.0;
        surface.text("PAUSED", Point2 { x: center_x, y }, 48.0, Color::WHITE, Align::Center)?;
        surface.text(
            "Press P or ESC to Resume",
            Point2 { x: center_x, y: y + 60.0 },
            24.0,
            Color::WHITE,
            Align::Center,
        )
    }

    fn draw_game_over_overlay(&self, surface: &mut dyn Surface) -> GameResult {
        surface.fill_rect(
            Rect::new(0.0, 0.0, self.area_width(), self.area_height()),
            Color::from_rgba(0, 0, 0, 180),
        )?;

        let center_x = self.area_width() / 2.0;
        let y = self.area_height() / 2.0 - 90.0;

        surface.text(
            "GAME OVER",
            Point2 { x: center_x + 3.0, y: y + 3.0 },
            48.0,
            palette::with_alpha(Color::BLACK, 150),
            Align::Center,
        )?;
        surface.text("GAME OVER", Point2 { x: center_x, y }, 48.0, GAME_OVER_COLOR, Align::Center)?;
        surface.text(
            &format!("Your Score: {}", self.score),
            Point2 { x: center_x, y: y + 60.0 },
            32.0,
            Color::WHITE,
            Align::Center,
        )?;

        let best = match self.high_score.set_at {
            Some(at) => format!("High Score: {} (set {})", self.high_score.score, at.format("%H:%M:%S")),
            None => format!("High Score: {}", self.high_score.score),
        };
        surface.text(&best, Point2 { x: center_x, y: y + 100.0 }, 24.0, Color::YELLOW, Align::Center)?;
        surface.text(
            "Press ENTER to Play Again",
            Point2 { x: center_x, y: y + 140.0 },
            24.0,
            Color::WHITE,
            Align::Center,
        )
    }
}
