use ggez::graphics::Color;
use ggez::GameResult;

use crate::grid::Position;
use crate::surface::Surface;

/// Something that sits on one grid cell and knows how to draw itself there.
pub trait Entity {
    fn position(&self) -> Position;

    fn color(&self) -> Color;

    fn render(&self, surface: &mut dyn Surface, cell_size: f32) -> GameResult;

    /// Top-left pixel of the entity's cell.
    fn origin(&self, cell_size: f32) -> (f32, f32) {
        let pos = self.position();
        (pos.x as f32 * cell_size, pos.y as f32 * cell_size)
    }
}
