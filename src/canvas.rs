use ggez::graphics::{Canvas, Color, DrawMode, DrawParam, Mesh, Rect, Text};
use ggez::mint::Point2;
use ggez::{Context, GameResult};
use snake_desktop::surface::{Align, Surface};

/// Draws onto a ggez frame canvas.
pub struct CanvasSurface<'a> {
    ctx: &'a Context,
    canvas: &'a mut Canvas,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a Context, canvas: &'a mut Canvas) -> Self {
        CanvasSurface { ctx, canvas }
    }
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, color: Color) -> GameResult {
        let (width, height) = self.ctx.gfx.drawable_size();
        self.fill_rect(Rect::new(0.0, 0.0, width, height), color)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> GameResult {
        let mesh = Mesh::new_rectangle(self.ctx, DrawMode::fill(), rect, color)?;
        self.canvas.draw(&mesh, DrawParam::default());
        Ok(())
    }

    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, color: Color) -> GameResult {
        if radius <= 0.0 {
            return Ok(());
        }
        let mesh = Mesh::new_circle(self.ctx, DrawMode::fill(), center, radius, 0.5, color)?;
        self.canvas.draw(&mesh, DrawParam::default());
        Ok(())
    }

    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) -> GameResult {
        let mesh = Mesh::new_line(self.ctx, &[from, to], 1.0, color)?;
        self.canvas.draw(&mesh, DrawParam::default());
        Ok(())
    }

    fn text(
        &mut self,
        text: &str,
        at: Point2<f32>,
        scale: f32,
        color: Color,
        align: Align,
    ) -> GameResult {
        let mut text = Text::new(text);
        text.set_scale(scale);

        let x = match align {
            Align::Left => at.x,
            Align::Center => at.x - text.measure(self.ctx)?.x / 2.0,
        };

        self.canvas.draw(
            &text,
            DrawParam::default()
                .dest(Point2 { x, y: at.y })
                .color(color),
        );
        Ok(())
    }
}
