use ggez::graphics::{Color, Rect};
use ggez::mint::Point2;
use ggez::GameResult;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Align {
    Left,
    Center,
}

/// Anything the game can draw onto.
///
/// The window implements this over a ggez canvas; tests record the calls.
/// Coordinates are in pixels, origin top-left.
pub trait Surface {
    fn clear(&mut self, color: Color) -> GameResult;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> GameResult;

    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, color: Color) -> GameResult;

    fn line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) -> GameResult;

    /// Draws `text` with its top edge at `at.y`. With [`Align::Center`] the
    /// text is centered horizontally on `at.x`.
    fn text(
        &mut self,
        text: &str,
        at: Point2<f32>,
        scale: f32,
        color: Color,
        align: Align,
    ) -> GameResult;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawCall {
        Clear(Color),
        Rect(Rect, Color),
        Circle(Point2<f32>, f32, Color),
        Line(Point2<f32>, Point2<f32>, Color),
        Text(String, Color),
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::Text(text, _) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn has_text(&self, needle: &str) -> bool {
            self.texts().iter().any(|text| text.contains(needle))
        }

        pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
            self.calls.iter().filter(|call| pred(*call)).count()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, color: Color) -> GameResult {
            self.calls.push(DrawCall::Clear(color));
            Ok(())
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) -> GameResult {
            self.calls.push(DrawCall::Rect(rect, color));
            Ok(())
        }

        fn fill_circle(&mut self, center: Point2<f32>, radius: f32, color: Color) -> GameResult {
            self.calls.push(DrawCall::Circle(center, radius, color));
            Ok(())
        }

        fn line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Color) -> GameResult {
            self.calls.push(DrawCall::Line(from, to, color));
            Ok(())
        }

        fn text(
            &mut self,
            text: &str,
            _at: Point2<f32>,
            _scale: f32,
            color: Color,
            _align: Align,
        ) -> GameResult {
            self.calls.push(DrawCall::Text(text.to_string(), color));
            Ok(())
        }
    }
}
