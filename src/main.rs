mod app;
mod canvas;

use ggez::{event, GameResult};
use snake_desktop::settings::{Settings, SETTINGS_FILE};

fn main() -> GameResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load_or_default(SETTINGS_FILE);
    let resource_dir = std::path::PathBuf::from(&settings.resource_dir);
    let window_setup = ggez::conf::WindowSetup::default()
        .title("Snake Game")
        .vsync(true);
    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(settings.window_width as f32, settings.window_height as f32)
        .resizable(true);

    let (mut ctx, event_loop) = ggez::ContextBuilder::new("snake_desktop", "snake_desktop")
        .add_resource_path(resource_dir)
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let app = app::App::new(&mut ctx, settings)?;
    event::run(ctx, event_loop, app)
}
