use std::collections::VecDeque;

use ggez::graphics::{Color, Rect};
use ggez::mint::Point2;
use ggez::GameResult;

use crate::entity::Entity;
use crate::grid::{Direction, GridSize, Position};
use crate::palette;
use crate::surface::Surface;

pub const INITIAL_LENGTH: i32 = 3;

/// One body cell of the snake.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Segment {
    pub position: Position,
    pub color: Color,
}

impl Entity for Segment {
    fn position(&self) -> Position {
        self.position
    }

    fn color(&self) -> Color {
        self.color
    }

    fn render(&self, surface: &mut dyn Surface, cell_size: f32) -> GameResult {
        let (x, y) = self.origin(cell_size);
        let margin = 1.0;
        surface.fill_rect(
            Rect::new(
                x + margin,
                y + margin,
                cell_size - margin * 2.0,
                cell_size - margin * 2.0,
            ),
            self.color,
        )?;

        let highlight = cell_size / 10.0;
        surface.fill_circle(
            Point2 {
                x: x + margin + 1.0 + highlight,
                y: y + margin + 1.0 + highlight,
            },
            highlight,
            Color::from_rgba(255, 255, 255, 100),
        )
    }
}

/// The player's snake. The head is always the front segment.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Segment>,
    direction: Direction,
    head_color: Color,
    body_color: Color,
}

impl Snake {
    /// A snake of [`INITIAL_LENGTH`] with its head at `head`, trailing to the
    /// left and heading right.
    pub fn new(head: Position, body_color: Color) -> Self {
        let positions = (0..INITIAL_LENGTH).map(|i| Position::new(head.x - i, head.y));
        Self::from_positions(positions, Direction::Right, body_color)
    }

    /// Builds a snake from explicit cells, head first.
    pub fn from_positions(
        positions: impl IntoIterator<Item = Position>,
        direction: Direction,
        body_color: Color,
    ) -> Self {
        let head_color = palette::lighten(body_color);
        let body = positions
            .into_iter()
            .enumerate()
            .map(|(i, position)| Segment {
                position,
                color: if i == 0 { head_color } else { body_color },
            })
            .collect();

        Snake {
            body,
            direction,
            head_color,
            body_color,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Option<Position> {
        self.body.front().map(|segment| segment.position)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().map(|segment| segment.position)
    }

    pub fn head_color(&self) -> Color {
        self.head_color
    }

    pub fn body_color(&self) -> Color {
        self.body_color
    }

    /// Advances the head one cell, wrapping at the grid edges.
    ///
    /// Returns `false` without touching the body when the new head would land
    /// on a segment other than the head or the tail. The tail is left for the
    /// caller to drop with [`Snake::shrink_tail`] when nothing was eaten.
    pub fn step(&mut self, grid: GridSize) -> bool {
        let head = match self.head() {
            Some(head) => head,
            None => return false,
        };
        let new_head = grid.wrap(head.step(self.direction));

        let interior = self.body.len().saturating_sub(1);
        if self
            .body
            .iter()
            .take(interior)
            .skip(1)
            .any(|segment| segment.position == new_head)
        {
            return false;
        }

        if let Some(old_head) = self.body.front_mut() {
            old_head.color = self.body_color;
        }
        self.body.push_front(Segment {
            position: new_head,
            color: self.head_color,
        });

        true
    }

    /// Drops the last segment. Does nothing to an empty body.
    pub fn shrink_tail(&mut self) {
        self.body.pop_back();
    }

    /// Turns the snake unless `direction` is the exact reverse of the current one.
    pub fn change_direction(&mut self, direction: Direction) {
        if direction.is_opposite(self.direction) {
            return;
        }
        self.direction = direction;
    }

    pub fn contains(&self, position: Position) -> bool {
        self.body.iter().any(|segment| segment.position == position)
    }

    /// Recolors every live segment: `color` for the body, a lighter shade for the head.
    pub fn set_color(&mut self, color: Color) {
        self.body_color = color;
        self.head_color = palette::lighten(color);
        for (i, segment) in self.body.iter_mut().enumerate() {
            segment.color = if i == 0 { self.head_color } else { self.body_color };
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, cell_size: f32) -> GameResult {
        for segment in &self.body {
            segment.render(surface, cell_size)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn green() -> Color {
        palette::from_rgb(palette::DEFAULT_SNAKE_COLOR)
    }

    fn positions(snake: &Snake) -> Vec<Position> {
        snake.positions().collect()
    }

    #[test]
    fn new_snake_has_three_segments_trailing_left() {
        let snake = Snake::new(Position::new(5, 5), green());
        assert_eq!(
            positions(&snake),
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn step_prepends_head_and_keeps_tail() {
        let mut snake = Snake::new(Position::new(5, 5), green());
        assert!(snake.step(GridSize::new(10, 10)));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Some(Position::new(6, 5)));

        snake.shrink_tail();
        assert_eq!(
            positions(&snake),
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn step_recolors_previous_head() {
        let mut snake = Snake::new(Position::new(5, 5), green());
        snake.step(GridSize::new(10, 10));
        let colors: Vec<Color> = snake.segments().map(|s| s.color).collect();
        assert_eq!(colors[0], snake.head_color());
        assert_eq!(colors[1], snake.body_color());
    }

    #[test]
    fn wraps_right_edge_to_column_zero() {
        let mut snake = Snake::from_positions(
            [Position::new(9, 2), Position::new(8, 2), Position::new(7, 2)],
            Direction::Right,
            green(),
        );
        assert!(snake.step(GridSize::new(10, 10)));
        assert_eq!(snake.head(), Some(Position::new(0, 2)));
    }

    #[test]
    fn wraps_top_edge_to_last_row() {
        let mut snake = Snake::from_positions(
            [Position::new(3, 0), Position::new(3, 1), Position::new(3, 2)],
            Direction::Up,
            green(),
        );
        assert!(snake.step(GridSize::new(10, 10)));
        assert_eq!(snake.head(), Some(Position::new(3, 9)));
    }

    #[test]
    fn wraps_left_and_bottom_edges() {
        let grid = GridSize::new(6, 4);
        let mut left = Snake::from_positions(
            [Position::new(0, 1), Position::new(1, 1)],
            Direction::Left,
            green(),
        );
        assert!(left.step(grid));
        assert_eq!(left.head(), Some(Position::new(5, 1)));

        let mut down = Snake::from_positions(
            [Position::new(2, 3), Position::new(2, 2)],
            Direction::Down,
            green(),
        );
        assert!(down.step(grid));
        assert_eq!(down.head(), Some(Position::new(2, 0)));
    }

    #[test]
    fn reverse_turn_is_ignored() {
        let mut snake = Snake::new(Position::new(5, 5), green());
        snake.change_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Right);

        snake.change_direction(Direction::Up);
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn collision_with_interior_segment_leaves_body_untouched() {
        // Head at (3,4) going down runs into (3,5), an interior segment of the coil.
        let mut snake = Snake::from_positions(
            [
                Position::new(3, 4),
                Position::new(4, 4),
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
            ],
            Direction::Down,
            green(),
        );
        let before = positions(&snake);

        assert!(!snake.step(GridSize::new(8, 8)));
        assert_eq!(positions(&snake), before);
    }

    #[test]
    fn moving_into_the_tail_cell_is_allowed() {
        let mut snake = Snake::from_positions(
            [
                Position::new(3, 4),
                Position::new(4, 4),
                Position::new(4, 5),
                Position::new(3, 5),
            ],
            Direction::Down,
            green(),
        );
        assert!(snake.step(GridSize::new(8, 8)));
        snake.shrink_tail();
        assert_eq!(snake.head(), Some(Position::new(3, 5)));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn shrink_tail_on_empty_body_is_a_no_op() {
        let mut snake = Snake::from_positions(Vec::new(), Direction::Right, green());
        snake.shrink_tail();
        assert!(snake.is_empty());
        assert!(!snake.step(GridSize::new(4, 4)));
    }

    #[test]
    fn set_color_recolors_live_segments() {
        let mut snake = Snake::new(Position::new(5, 5), green());
        snake.set_color(Color::from_rgb(100, 0, 220));

        let colors: Vec<_> = snake.segments().map(|s| s.color.to_rgba()).collect();
        assert_eq!(colors[0], (150, 50, 255, 255));
        assert_eq!(colors[1], (100, 0, 220, 255));
        assert_eq!(colors[2], (100, 0, 220, 255));
    }

    #[test]
    fn contains_matches_exact_cells() {
        let snake = Snake::new(Position::new(5, 5), green());
        assert!(snake.contains(Position::new(3, 5)));
        assert!(!snake.contains(Position::new(2, 5)));
        assert!(!snake.contains(Position::new(5, 6)));
    }
}
