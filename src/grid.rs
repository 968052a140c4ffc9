use serde::{Deserialize, Serialize};

/// A cell on the game grid, column first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// One step in `direction`, without any boundary handling.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Grid dimensions in cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub const fn new(width: i32, height: i32) -> Self {
        GridSize { width, height }
    }

    /// Derives the cell counts of a pixel area by integer division.
    pub fn from_pixels(width_px: i32, height_px: i32, cell_size: i32) -> Self {
        let cell_size = cell_size.max(1);
        GridSize {
            width: width_px / cell_size,
            height: height_px / cell_size,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Wraps an out-of-range coordinate to the opposite edge.
    ///
    /// Only handles positions at most one cell outside the grid, which is all a
    /// single step can produce.
    pub fn wrap(&self, mut pos: Position) -> Position {
        if pos.x < 0 {
            pos.x = self.width - 1;
        } else if pos.x >= self.width {
            pos.x = 0;
        }

        if pos.y < 0 {
            pos.y = self.height - 1;
        } else if pos.y >= self.height {
            pos.y = 0;
        }

        pos
    }
}
