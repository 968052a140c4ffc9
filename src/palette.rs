use ggez::graphics::Color;

pub const BACKGROUND_COLOR: Color = Color::new(15.0 / 255.0, 15.0 / 255.0, 40.0 / 255.0, 1.0);
pub const GRID_COLOR: Color = Color::new(30.0 / 255.0, 30.0 / 255.0, 50.0 / 255.0, 1.0);
pub const TITLE_COLOR: Color = Color::new(50.0 / 255.0, 205.0 / 255.0, 50.0 / 255.0, 1.0);
pub const GAME_OVER_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);

pub const STANDARD_FOOD_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const SPECIAL_FOOD_COLOR: Color = Color::new(1.0, 215.0 / 255.0, 0.0, 1.0);

pub const DEFAULT_SNAKE_COLOR: [u8; 3] = [0, 128, 0];

/// Snake colors offered by the settings panel, in cycling order.
pub const SNAKE_COLORS: [(&str, [u8; 3]); 6] = [
    ("Green", [0, 128, 0]),
    ("Blue", [30, 90, 200]),
    ("Purple", [128, 0, 128]),
    ("Orange", [220, 120, 0]),
    ("Teal", [0, 128, 128]),
    ("Crimson", [180, 20, 60]),
];

pub fn from_rgb(rgb: [u8; 3]) -> Color {
    Color::from_rgb(rgb[0], rgb[1], rgb[2])
}

pub fn to_rgb(color: Color) -> [u8; 3] {
    let (r, g, b) = color.to_rgb();
    [r, g, b]
}

/// Head color for a given body color: every channel raised by 50, clamped to 255.
pub fn lighten(color: Color) -> Color {
    let (r, g, b, a) = color.to_rgba();
    Color::from_rgba(
        r.saturating_add(50),
        g.saturating_add(50),
        b.saturating_add(50),
        a,
    )
}

/// Same color with a different alpha, for overlays.
pub fn with_alpha(color: Color, alpha: u8) -> Color {
    let (r, g, b) = color.to_rgb();
    Color::from_rgba(r, g, b, alpha)
}

/// Index of `rgb` in [`SNAKE_COLORS`], if it is one of the presets.
pub fn preset_index(rgb: [u8; 3]) -> Option<usize> {
    SNAKE_COLORS.iter().position(|(_, preset)| *preset == rgb)
}

pub fn preset_name(rgb: [u8; 3]) -> &'static str {
    preset_index(rgb)
        .map(|i| SNAKE_COLORS[i].0)
        .unwrap_or("Custom")
}
