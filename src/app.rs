use std::time::Duration;

use ggez::event::EventHandler;
use ggez::graphics;
use ggez::input::keyboard::KeyInput;
use ggez::{Context, GameResult};
use log::{debug, info};

use snake_desktop::input::{map_key, panel_key, Debounce, HostCommand, KeyAction};
use snake_desktop::palette::BACKGROUND_COLOR;
use snake_desktop::settings::{PanelOutcome, Settings, SettingsPanel};
use snake_desktop::sound::SoundManager;
use snake_desktop::{GameEngine, GameEvent, GameState, Input};

use crate::canvas::CanvasSurface;

/// The window: owns the engine and the sound service and drives both.
pub struct App {
    engine: GameEngine,
    sounds: SoundManager,
    settings: Settings,
    panel: Option<SettingsPanel>,
    debounce: Debounce,
    last_update: Duration,
    tick_interval: Duration,
}

impl App {
    pub fn new(ctx: &mut Context, settings: Settings) -> GameResult<Self> {
        let (width, height) = ctx.gfx.drawable_size();
        let mut engine = GameEngine::new(width as i32, height as i32, settings.cell_size);
        let mut sounds = SoundManager::load(ctx, settings.sound_enabled);
        settings.apply(&mut engine, &mut sounds);

        let grid = engine.grid();
        info!(
            "window {}x{}, grid {}x{} cells of {}px",
            width, height, grid.width, grid.height, settings.cell_size
        );

        let tick_interval = engine.tick_interval(settings.min_tick_ms);
        Ok(App {
            engine,
            sounds,
            settings,
            panel: None,
            debounce: Debounce::default(),
            last_update: Duration::ZERO,
            tick_interval,
        })
    }

    fn handle_events(&mut self, ctx: &Context, events: &[GameEvent]) {
        self.sounds.queue_events(events);
        if events.contains(&GameEvent::ScoreChanged(0)) {
            // A fresh game waits a full tick before its first move.
            self.last_update = ctx.time.time_since_start();
        }
        self.tick_interval = self.engine.tick_interval(self.settings.min_tick_ms);
    }

    fn run_command(&mut self, ctx: &mut Context, command: HostCommand) {
        match command {
            HostCommand::NewGame => {
                let events = self.engine.start_new_game();
                self.handle_events(ctx, &events);
            }
            HostCommand::ToggleGrid => {
                let show = !self.engine.show_grid();
                self.engine.set_show_grid(show);
            }
            HostCommand::ToggleSound => {
                let enabled = !self.sounds.enabled();
                self.sounds.set_enabled(enabled);
                debug!("sound {}", if enabled { "on" } else { "off" });
            }
            HostCommand::OpenSettings => {
                self.panel = Some(SettingsPanel::open(&mut self.engine, &self.sounds));
            }
            HostCommand::Quit => ctx.request_quit(),
        }
    }
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let now = ctx.time.time_since_start();

        if self.engine.state() == GameState::Playing
            && now.saturating_sub(self.last_update) >= self.tick_interval
        {
            self.last_update = now;
            let events = self.engine.update();
            self.handle_events(ctx, &events);
        }

        self.sounds.flush(ctx);
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, BACKGROUND_COLOR);
        let (width, height) = ctx.gfx.drawable_size();

        {
            let mut surface = CanvasSurface::new(ctx, &mut canvas);
            self.engine.render(&mut surface)?;
            if let Some(panel) = &self.panel {
                panel.render(&mut surface, width, height)?;
            }
        }

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeat: bool) -> GameResult {
        let keycode = match input.keycode {
            Some(keycode) => keycode,
            None => return Ok(()),
        };

        if let Some(panel) = self.panel.as_mut() {
            if let Some(key) = panel_key(keycode) {
                if panel.handle_key(key, &mut self.engine, &mut self.sounds) == PanelOutcome::Closed {
                    self.panel = None;
                }
            }
            return Ok(());
        }

        match map_key(keycode, self.engine.state()) {
            Some(KeyAction::Game(Input::Steer(direction))) => {
                if self.engine.state() == GameState::Playing
                    && !self.debounce.accept(ctx.time.time_since_start())
                {
                    debug!("ignored {:?}: too soon after the last turn", direction);
                    return Ok(());
                }
                self.engine.handle_input(Input::Steer(direction));
            }
            Some(KeyAction::Game(input)) => {
                let events = self.engine.handle_input(input);
                self.handle_events(ctx, &events);
            }
            Some(KeyAction::Host(command)) => self.run_command(ctx, command),
            None => {}
        }

        Ok(())
    }

    fn resize_event(&mut self, _ctx: &mut Context, width: f32, height: f32) -> GameResult {
        self.engine.resize(width as i32, height as i32);
        Ok(())
    }
}
