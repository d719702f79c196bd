use std::collections::{HashSet, VecDeque};

use super::action::Heading;
use super::geometry::GridGeometry;

/// A cell on the game grid, in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell in a heading
    pub fn moved_in(&self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        self.moved_by(dx, dy)
    }

    /// True if the two cells differ by exactly one step along one axis
    pub fn is_adjacent(&self, other: Cell) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    /// Last applied heading
    pub heading: Heading,
}

impl Snake {
    /// Create a snake lying straight behind `head`
    pub fn new(head: Cell, heading: Heading, length: usize) -> Self {
        let (dx, dy) = heading.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, heading }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty segment list.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, heading: Heading) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, heading })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Segments from head to tail
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Prepend `new_head`, dropping the tail unless the snake grew
    pub fn advance(&mut self, new_head: Cell, grew: bool) {
        self.body.push_front(new_head);

        if !grew {
            self.retract_tail();
        }
    }

    /// Drop the last segment, finalising a tentative `advance(_, true)`
    pub fn retract_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// True if the head overlaps any other segment, tail included
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }

    pub fn collides_with_wall(&self, board: &GridGeometry) -> bool {
        !board.contains(self.head())
    }

    /// No repeated cells and every pair of neighbours adjacent
    pub fn is_well_formed(&self) -> bool {
        let unique: HashSet<Cell> = self.body.iter().copied().collect();
        unique.len() == self.body.len()
            && self
                .body
                .iter()
                .zip(self.body.iter().skip(1))
                .all(|(a, b)| a.is_adjacent(*b))
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Agent ran too long without resolving the episode
    Stagnation,
    /// No free cell left for food
    BoardFull,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub board: GridGeometry,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, board: GridGeometry) -> Self {
        Self {
            snake,
            food,
            board,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    pub fn heading(&self) -> Heading {
        self.snake.heading
    }

    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }

    /// Whether moving the head to `cell` next step would end the episode
    ///
    /// The current tail counts as blocked: it is still in place when the
    /// collision check runs.
    pub fn is_danger(&self, cell: Cell) -> bool {
        !self.board.contains(cell) || self.snake.cells().any(|c| c == cell)
    }
}
