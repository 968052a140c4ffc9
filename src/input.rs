use std::time::Duration;

use ggez::input::keyboard::KeyCode;

use crate::engine::{GameState, Input};
use crate::grid::Direction;
use crate::settings::PanelKey;

pub const DIRECTION_DEBOUNCE: Duration = Duration::from_millis(100);

/// Window-level commands that never reach the engine's input handler.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum HostCommand {
    NewGame,
    ToggleGrid,
    ToggleSound,
    OpenSettings,
    Quit,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum KeyAction {
    Game(Input),
    Host(HostCommand),
}

pub fn direction_for(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Direction::Up),
        KeyCode::Down | KeyCode::S => Some(Direction::Down),
        KeyCode::Left | KeyCode::A => Some(Direction::Left),
        KeyCode::Right | KeyCode::D => Some(Direction::Right),
        _ => None,
    }
}

/// Decodes a key press. Space means "start" on the title and game-over
/// screens but "resume" while paused.
pub fn map_key(key: KeyCode, state: GameState) -> Option<KeyAction> {
    if let Some(direction) = direction_for(key) {
        return Some(KeyAction::Game(Input::Steer(direction)));
    }

    let action = match (key, state) {
        (KeyCode::Return, _) => KeyAction::Game(Input::Start),
        (KeyCode::Space, GameState::Paused) => KeyAction::Game(Input::Resume),
        (KeyCode::Space, _) => KeyAction::Game(Input::Start),
        (KeyCode::P | KeyCode::Escape, GameState::Paused) => KeyAction::Game(Input::Resume),
        (KeyCode::P | KeyCode::Escape, _) => KeyAction::Game(Input::Pause),
        (KeyCode::N, _) => KeyAction::Host(HostCommand::NewGame),
        (KeyCode::G, _) => KeyAction::Host(HostCommand::ToggleGrid),
        (KeyCode::M, _) => KeyAction::Host(HostCommand::ToggleSound),
        (KeyCode::O, _) => KeyAction::Host(HostCommand::OpenSettings),
        (KeyCode::Q, _) => KeyAction::Host(HostCommand::Quit),
        _ => return None,
    };
    Some(action)
}

/// Keys understood by the settings panel while it is open.
pub fn panel_key(key: KeyCode) -> Option<PanelKey> {
    match key {
        KeyCode::Up | KeyCode::W => Some(PanelKey::Up),
        KeyCode::Down | KeyCode::S => Some(PanelKey::Down),
        KeyCode::Left | KeyCode::A => Some(PanelKey::Left),
        KeyCode::Right | KeyCode::D => Some(PanelKey::Right),
        KeyCode::Return | KeyCode::Space => Some(PanelKey::Confirm),
        KeyCode::Escape | KeyCode::O => Some(PanelKey::Close),
        _ => None,
    }
}

/// Drops events that arrive within `window` of the last accepted one.
#[derive(Debug)]
pub struct Debounce {
    window: Duration,
    last: Option<Duration>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Debounce { window, last: None }
    }

    /// `now` is any monotonic timestamp, e.g. time since the window opened.
    pub fn accept(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last {
            if now.saturating_sub(last) < self.window {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Debounce::new(DIRECTION_DEBOUNCE)
    }
}
