use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use ggez::graphics::{Color, Rect};
use ggez::mint::Point2;
use ggez::GameResult;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::engine::{difficulty_name, GameEngine, GameState, MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::palette::{self, SNAKE_COLORS};
use crate::sound::SoundManager;
use crate::surface::{Align, Surface};

pub const SETTINGS_FILE: &str = "settings.json";

/// Startup configuration, read from JSON. Missing fields take their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub show_grid: bool,
    pub sound_enabled: bool,
    pub difficulty: u8,
    pub snake_color: [u8; 3],
    pub cell_size: i32,
    pub window_width: i32,
    pub window_height: i32,
    pub base_speed_ms: i32,
    pub min_tick_ms: u64,
    pub resource_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            show_grid: true,
            sound_enabled: true,
            difficulty: 2,
            snake_color: palette::DEFAULT_SNAKE_COLOR,
            cell_size: 25,
            window_width: 830,
            window_height: 650,
            base_speed_ms: 100,
            min_tick_ms: 30,
            resource_dir: "resources".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Settings> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.difficulty = settings.difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        settings.cell_size = settings.cell_size.max(1);
        Ok(settings)
    }

    /// Defaults when the file is absent; defaults plus a warning when it is broken.
    pub fn load_or_default(path: impl AsRef<Path>) -> Settings {
        let path = path.as_ref();
        if !path.exists() {
            info!("no {}, using default settings", path.display());
            return Settings::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                info!("settings loaded from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("{:#}; using default settings", e);
                Settings::default()
            }
        }
    }

    /// Pushes these settings into the engine and the sound service.
    pub fn apply(&self, engine: &mut GameEngine, sounds: &mut SoundManager) {
        engine.set_show_grid(self.show_grid);
        engine.set_difficulty(self.difficulty);
        engine.set_snake_color(palette::from_rgb(self.snake_color));
        engine.set_base_speed(self.base_speed_ms);
        sounds.set_enabled(self.sound_enabled);
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PanelRow {
    ShowGrid,
    Sound,
    Difficulty,
    SnakeColor,
    Done,
}

const ROWS: [PanelRow; 5] = [
    PanelRow::ShowGrid,
    PanelRow::Sound,
    PanelRow::Difficulty,
    PanelRow::SnakeColor,
    PanelRow::Done,
];

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PanelKey {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Close,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PanelOutcome {
    Open,
    Closed,
}

/// The in-window settings dialog.
///
/// Opening it pauses a running game. "Done" writes the edited values back,
/// while Escape throws them away. Either way a game that was running when the
/// panel opened resumes.
#[derive(Debug)]
pub struct SettingsPanel {
    selected: usize,
    show_grid: bool,
    sound_enabled: bool,
    difficulty: u8,
    snake_color: [u8; 3],
    was_playing: bool,
}

impl SettingsPanel {
    pub fn open(engine: &mut GameEngine, sounds: &SoundManager) -> Self {
        let was_playing = engine.state() == GameState::Playing;
        if was_playing {
            engine.pause();
        }

        SettingsPanel {
            selected: 0,
            show_grid: engine.show_grid(),
            sound_enabled: sounds.enabled(),
            difficulty: engine.difficulty(),
            snake_color: palette::to_rgb(engine.snake_color()),
            was_playing,
        }
    }

    pub fn selected(&self) -> PanelRow {
        ROWS[self.selected]
    }

    pub fn handle_key(
        &mut self,
        key: PanelKey,
        engine: &mut GameEngine,
        sounds: &mut SoundManager,
    ) -> PanelOutcome {
        match key {
            PanelKey::Up => self.selected = (self.selected + ROWS.len() - 1) % ROWS.len(),
            PanelKey::Down => self.selected = (self.selected + 1) % ROWS.len(),
            PanelKey::Left => self.adjust(-1),
            PanelKey::Right => self.adjust(1),
            PanelKey::Confirm if self.selected() == PanelRow::Done => {
                self.apply(engine, sounds);
                self.close(engine);
                return PanelOutcome::Closed;
            }
            PanelKey::Confirm => self.adjust(1),
            PanelKey::Close => {
                debug!("settings discarded");
                self.close(engine);
                return PanelOutcome::Closed;
            }
        }
        PanelOutcome::Open
    }

    fn adjust(&mut self, step: i32) {
        match self.selected() {
            PanelRow::ShowGrid => self.show_grid = !self.show_grid,
            PanelRow::Sound => self.sound_enabled = !self.sound_enabled,
            PanelRow::Difficulty => {
                let span = i32::from(MAX_DIFFICULTY - MIN_DIFFICULTY) + 1;
                let offset = i32::from(self.difficulty - MIN_DIFFICULTY) + step;
                self.difficulty = MIN_DIFFICULTY + offset.rem_euclid(span) as u8;
            }
            PanelRow::SnakeColor => {
                let count = SNAKE_COLORS.len() as i32;
                let next = match palette::preset_index(self.snake_color) {
                    Some(i) => (i as i32 + step).rem_euclid(count),
                    None => 0,
                };
                self.snake_color = SNAKE_COLORS[next as usize].1;
            }
            PanelRow::Done => {}
        }
    }

    fn apply(&self, engine: &mut GameEngine, sounds: &mut SoundManager) {
        engine.set_show_grid(self.show_grid);
        engine.set_difficulty(self.difficulty);
        engine.set_snake_color(palette::from_rgb(self.snake_color));
        sounds.set_enabled(self.sound_enabled);
        debug!("settings applied: {:?}", self);
    }

    fn close(&self, engine: &mut GameEngine) {
        if self.was_playing {
            engine.resume();
        }
    }

    fn value_label(&self, row: PanelRow) -> String {
        let on_off = |on: bool| if on { "On" } else { "Off" };
        match row {
            PanelRow::ShowGrid => format!("Show Grid: {}", on_off(self.show_grid)),
            PanelRow::Sound => format!("Sound: {}", on_off(self.sound_enabled)),
            PanelRow::Difficulty => format!("Difficulty: {}", difficulty_name(self.difficulty)),
            PanelRow::SnakeColor => format!("Snake Color: {}", palette::preset_name(self.snake_color)),
            PanelRow::Done => "Done".to_string(),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, width: f32, height: f32) -> GameResult {
        surface.fill_rect(
            Rect::new(0.0, 0.0, width, height),
            Color::from_rgba(0, 0, 0, 170),
        )?;

        let panel = Rect::new(width / 2.0 - 180.0, height / 2.0 - 170.0, 360.0, 340.0);
        surface.fill_rect(panel, Color::from_rgb(30, 30, 70))?;

        let center_x = width / 2.0;
        surface.text(
            "Game Settings",
            Point2 { x: center_x, y: panel.y + 20.0 },
            32.0,
            Color::WHITE,
            Align::Center,
        )?;

        for (i, row) in ROWS.iter().enumerate() {
            let color = if i == self.selected {
                Color::GREEN
            } else {
                Color::WHITE
            };
            let y = panel.y + 80.0 + i as f32 * 40.0;
            surface.text(&self.value_label(*row), Point2 { x: center_x, y }, 24.0, color, Align::Center)?;

            if *row == PanelRow::SnakeColor {
                surface.fill_rect(
                    Rect::new(panel.x + panel.w - 45.0, y + 2.0, 20.0, 20.0),
                    palette::from_rgb(self.snake_color),
                )?;
            }
        }

        surface.text(
            "Up/Down select, Left/Right change, ESC to cancel",
            Point2 { x: center_x, y: panel.y + panel.h - 30.0 },
            16.0,
            Color::YELLOW,
            Align::Center,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::RecordingSurface;

    fn engine() -> GameEngine {
        GameEngine::with_seed(200, 200, 20, 5)
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "difficulty": 3, "show_grid": false }"#)
            .expect("valid json");
        assert_eq!(settings.difficulty, 3);
        assert!(!settings.show_grid);
        assert_eq!(settings.cell_size, 25);
        assert_eq!(settings.snake_color, [0, 128, 0]);
    }

    #[test]
    fn out_of_range_difficulty_is_clamped() {
        let settings = Settings::from_json(r#"{ "difficulty": 7 }"#).expect("valid json");
        assert_eq!(settings.difficulty, 3);
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(Settings::from_json("{ difficulty: ").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load_or_default("does/not/exist/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn apply_configures_engine_and_sound() {
        let mut engine = engine();
        let mut sounds = SoundManager::silent(true);
        let settings = Settings {
            show_grid: false,
            sound_enabled: false,
            difficulty: 1,
            snake_color: [30, 90, 200],
            ..Settings::default()
        };
        settings.apply(&mut engine, &mut sounds);

        assert!(!engine.show_grid());
        assert!(!sounds.enabled());
        assert_eq!(engine.difficulty(), 1);
        assert_eq!(palette::to_rgb(engine.snake_color()), [30, 90, 200]);
    }

    #[test]
    fn panel_pauses_and_resumes_a_running_game() {
        let mut engine = engine();
        let mut sounds = SoundManager::silent(true);
        engine.start_new_game();

        let mut panel = SettingsPanel::open(&mut engine, &sounds);
        assert_eq!(engine.state(), GameState::Paused);

        let outcome = panel.handle_key(PanelKey::Close, &mut engine, &mut sounds);
        assert_eq!(outcome, PanelOutcome::Closed);
        assert_eq!(engine.state(), GameState::Playing);
    }

    #[test]
    fn panel_leaves_a_paused_game_paused() {
        let mut engine = engine();
        let mut sounds = SoundManager::silent(true);
        engine.start_new_game();
        engine.pause();

        let mut panel = SettingsPanel::open(&mut engine, &sounds);
        panel.handle_key(PanelKey::Close, &mut engine, &mut sounds);
        assert_eq!(engine.state(), GameState::Paused);
    }

    #[test]
    fn panel_edits_are_applied_on_done() {
        let mut engine = engine();
        let mut sounds = SoundManager::silent(true);
        engine.start_new_game();
        let mut panel = SettingsPanel::open(&mut engine, &sounds);

        // Show grid -> off
        panel.handle_key(PanelKey::Confirm, &mut engine, &mut sounds);
        // Sound -> off
        panel.handle_key(PanelKey::Down, &mut engine, &mut sounds);
        panel.handle_key(PanelKey::Right, &mut engine, &mut sounds);
        // Medium -> Hard -> Easy
        panel.handle_key(PanelKey::Down, &mut engine, &mut sounds);
        panel.handle_key(PanelKey::Right, &mut engine, &mut sounds);
        panel.handle_key(PanelKey::Right, &mut engine, &mut sounds);
        // Green -> Crimson
        panel.handle_key(PanelKey::Down, &mut engine, &mut sounds);
        panel.handle_key(PanelKey::Left, &mut engine, &mut sounds);

        assert!(engine.show_grid(), "nothing applies before Done");

        panel.handle_key(PanelKey::Down, &mut engine, &mut sounds);
        assert_eq!(panel.selected(), PanelRow::Done);
        let outcome = panel.handle_key(PanelKey::Confirm, &mut engine, &mut sounds);

        assert_eq!(outcome, PanelOutcome::Closed);
        assert!(!engine.show_grid());
        assert!(!sounds.enabled());
        assert_eq!(engine.difficulty(), 1);
        assert_eq!(palette::to_rgb(engine.snake_color()), [180, 20, 60]);
        let head = engine.snake().expect("snake").head_color();
        assert_eq!(head.to_rgba(), (230, 70, 110, 255));
    }

    #[test]
    fn escape_discards_edits() {
        let mut engine = engine();
        let mut sounds = SoundManager::silent(true);
        engine.start_new_game();
        let difficulty = engine.difficulty();
        let color = palette::to_rgb(engine.snake_color());
        let mut panel = SettingsPanel::open(&mut engine, &sounds);

        // Show grid -> off, sound -> off, next difficulty, next color
        panel.handle_key(PanelKey::Confirm, &mut engine, &mut sounds);
        for _ in 0..3 {
            panel.handle_key(PanelKey::Down, &mut engine, &mut sounds);
            panel.handle_key(PanelKey::Right, &mut engine, &mut sounds);
        }

        let outcome = panel.handle_key(PanelKey::Close, &mut engine, &mut sounds);
        assert_eq!(outcome, PanelOutcome::Closed);
        assert!(engine.show_grid());
        assert!(sounds.enabled());
        assert_eq!(engine.difficulty(), difficulty);
        assert_eq!(palette::to_rgb(engine.snake_color()), color);
        assert_eq!(engine.state(), GameState::Playing);
    }

    #[test]
    fn selection_wraps() {
        let mut engine = engine();
        let mut sounds = SoundManager::silent(true);
        let mut panel = SettingsPanel::open(&mut engine, &sounds);
        panel.handle_key(PanelKey::Up, &mut engine, &mut sounds);
        assert_eq!(panel.selected(), PanelRow::Done);
        panel.handle_key(PanelKey::Down, &mut engine, &mut sounds);
        assert_eq!(panel.selected(), PanelRow::ShowGrid);
    }

    #[test]
    fn panel_renders_every_row() {
        let mut engine = engine();
        let sounds = SoundManager::silent(true);
        let panel = SettingsPanel::open(&mut engine, &sounds);
        let mut surface = RecordingSurface::default();
        panel.render(&mut surface, 400.0, 400.0).expect("render");

        assert!(surface.has_text("Show Grid: On"));
        assert!(surface.has_text("Sound: On"));
        assert!(surface.has_text("Difficulty: Medium"));
        assert!(surface.has_text("Snake Color: Green"));
        assert!(surface.has_text("Done"));
    }
}
