use ggez::graphics::Color;
use ggez::mint::Point2;
use ggez::GameResult;
use rand::Rng;

use crate::entity::Entity;
use crate::grid::{GridSize, Position};
use crate::palette;
use crate::snake::Snake;
use crate::surface::Surface;

pub const STANDARD_VALUE: u32 = 10;
pub const SPECIAL_VALUE: u32 = 30;
/// Random draws tried before falling back to a scan of the whole grid.
pub const MAX_SPAWN_ATTEMPTS: usize = 100;

/// The single food item on the board.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Food {
    pub position: Position,
    pub color: Color,
    pub value: u32,
}

impl Food {
    pub fn new(position: Position, color: Color, value: u32) -> Self {
        Food {
            position,
            color,
            value,
        }
    }

    pub fn standard(position: Position) -> Self {
        Food::new(position, palette::STANDARD_FOOD_COLOR, STANDARD_VALUE)
    }

    pub fn special(position: Position) -> Self {
        Food::new(position, palette::SPECIAL_FOOD_COLOR, SPECIAL_VALUE)
    }

    pub fn is_special(&self) -> bool {
        self.value == SPECIAL_VALUE
    }

    /// Places a new food item on a cell the snake does not occupy.
    ///
    /// Candidates are drawn from the grid inset by one cell on every side, or
    /// from the whole grid when that inset leaves nothing. After
    /// [`MAX_SPAWN_ATTEMPTS`] misses the grid is scanned row by row for the
    /// first free cell. Returns `None` only when every cell is taken.
    ///
    /// One draw in ten yields a special item worth [`SPECIAL_VALUE`].
    pub fn spawn<R: Rng + ?Sized>(grid: GridSize, snake: &Snake, rng: &mut R) -> Option<Food> {
        if grid.width <= 0 || grid.height <= 0 {
            return None;
        }

        let (mut min_x, mut min_y) = (1, 1);
        let (mut max_x, mut max_y) = ((grid.width - 2).max(1), (grid.height - 2).max(1));
        if max_x <= min_x || max_y <= min_y {
            min_x = 0;
            min_y = 0;
            max_x = grid.width - 1;
            max_y = grid.height - 1;
        }

        let drawn = (0..MAX_SPAWN_ATTEMPTS)
            .map(|_| Position::new(rng.gen_range(min_x..=max_x), rng.gen_range(min_y..=max_y)))
            .find(|pos| !snake.contains(*pos));

        let position = match drawn {
            Some(pos) => pos,
            None => first_free_cell(grid, snake)?,
        };

        if rng.gen_range(0..10) == 0 {
            Some(Food::special(position))
        } else {
            Some(Food::standard(position))
        }
    }
}

fn first_free_cell(grid: GridSize, snake: &Snake) -> Option<Position> {
    (0..grid.height)
        .flat_map(|y| (0..grid.width).map(move |x| Position::new(x, y)))
        .find(|pos| !snake.contains(*pos))
}

impl Entity for Food {
    fn position(&self) -> Position {
        self.position
    }

    fn color(&self) -> Color {
        self.color
    }

    fn render(&self, surface: &mut dyn Surface, cell_size: f32) -> GameResult {
        let (x, y) = self.origin(cell_size);
        let padding = 2.0;
        surface.fill_circle(
            Point2 {
                x: x + cell_size / 2.0,
                y: y + cell_size / 2.0,
            },
            cell_size / 2.0 - padding,
            self.color,
        )?;

        let highlight = cell_size / 10.0;
        surface.fill_circle(
            Point2 {
                x: x + cell_size / 4.0 + highlight,
                y: y + cell_size / 4.0 + highlight,
            },
            highlight,
            Color::from_rgba(255, 255, 255, 150),
        )
    }
}
