use ggez::audio::{self, SoundSource};
use ggez::Context;
use log::{debug, warn};

use crate::engine::GameEvent;

pub const EAT_SOUND_PATH: &str = "/sounds/eat.wav";
pub const GAME_OVER_SOUND_PATH: &str = "/sounds/gameover.wav";

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SoundEffect {
    Eat,
    GameOver,
}

impl SoundEffect {
    /// The effect a game event should trigger, if any.
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::FoodEaten { .. } => Some(SoundEffect::Eat),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Plays game sounds. Created and owned by the window; the engine never sees it.
///
/// Requests are queued and played on the next [`SoundManager::flush`]. Missing
/// files and playback failures only cost the sound.
pub struct SoundManager {
    enabled: bool,
    eat: Option<audio::Source>,
    game_over: Option<audio::Source>,
    pending: Vec<SoundEffect>,
}

impl SoundManager {
    pub fn load(ctx: &Context, enabled: bool) -> Self {
        SoundManager {
            enabled,
            eat: load_source(ctx, EAT_SOUND_PATH),
            game_over: load_source(ctx, GAME_OVER_SOUND_PATH),
            pending: Vec::new(),
        }
    }

    /// A manager with no sound files behind it.
    pub fn silent(enabled: bool) -> Self {
        SoundManager {
            enabled,
            eat: None,
            game_over: None,
            pending: Vec::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending.clear();
        }
    }

    pub fn request(&mut self, effect: SoundEffect) {
        if self.enabled {
            self.pending.push(effect);
        }
    }

    pub fn queue_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.request(effect);
        }
    }

    pub fn pending(&self) -> &[SoundEffect] {
        &self.pending
    }

    pub fn flush(&mut self, ctx: &Context) {
        for effect in std::mem::take(&mut self.pending) {
            let source = match effect {
                SoundEffect::Eat => self.eat.as_mut(),
                SoundEffect::GameOver => self.game_over.as_mut(),
            };
            if let Some(source) = source {
                if let Err(e) = source.play_detached(ctx) {
                    debug!("failed to play {:?}: {}", effect, e);
                }
            }
        }
    }
}

fn load_source(ctx: &Context, path: &str) -> Option<audio::Source> {
    match audio::Source::new(ctx, path) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!("sound {} unavailable: {}", path, e);
            None
        }
    }
}
