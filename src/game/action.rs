use serde::{Deserialize, Serialize};

/// Direction the snake is travelling in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Right,
    Down,
    Left,
    Up,
}

impl Heading {
    /// Headings in clockwise order, starting from `Right`
    pub const CLOCKWISE: [Heading; 4] = [Heading::Right, Heading::Down, Heading::Left, Heading::Up];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Heading) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Heading {
        match self {
            Heading::Right => Heading::Left,
            Heading::Left => Heading::Right,
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
        }
    }

    /// Next heading clockwise (a right turn)
    pub fn clockwise(&self) -> Heading {
        Self::CLOCKWISE[(self.index() + 1) % 4]
    }

    /// Next heading counter-clockwise (a left turn)
    pub fn counter_clockwise(&self) -> Heading {
        Self::CLOCKWISE[(self.index() + 3) % 4]
    }

    /// Returns the delta (dx, dy) in cells; y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    fn index(&self) -> usize {
        match self {
            Heading::Right => 0,
            Heading::Down => 1,
            Heading::Left => 2,
            Heading::Up => 3,
        }
    }
}

/// Turn command relative to the current heading, used by agent drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeTurn {
    Straight,
    TurnRight,
    TurnLeft,
}

impl RelativeTurn {
    pub const ALL: [RelativeTurn; 3] = [
        RelativeTurn::Straight,
        RelativeTurn::TurnRight,
        RelativeTurn::TurnLeft,
    ];

    /// Decode a one-hot `[straight, right, left]` action vector.
    ///
    /// Anything that is not exactly one-hot keeps the snake going straight.
    pub fn from_one_hot(action: [u8; 3]) -> Self {
        match action {
            [1, 0, 0] => RelativeTurn::Straight,
            [0, 1, 0] => RelativeTurn::TurnRight,
            [0, 0, 1] => RelativeTurn::TurnLeft,
            _ => RelativeTurn::Straight,
        }
    }

    /// Decode a discrete action index
    ///
    /// - 0 → Straight
    /// - 1 → TurnRight
    /// - 2 → TurnLeft
    /// - other → Straight
    pub fn from_index(idx: usize) -> Self {
        match idx {
            1 => RelativeTurn::TurnRight,
            2 => RelativeTurn::TurnLeft,
            _ => RelativeTurn::Straight,
        }
    }

    pub fn to_one_hot(self) -> [u8; 3] {
        match self {
            RelativeTurn::Straight => [1, 0, 0],
            RelativeTurn::TurnRight => [0, 1, 0],
            RelativeTurn::TurnLeft => [0, 0, 1],
        }
    }

    /// Heading that results from applying this turn to `heading`
    pub fn apply(self, heading: Heading) -> Heading {
        match self {
            RelativeTurn::Straight => heading,
            RelativeTurn::TurnRight => heading.clockwise(),
            RelativeTurn::TurnLeft => heading.counter_clockwise(),
        }
    }
}

impl From<[u8; 3]> for RelativeTurn {
    fn from(action: [u8; 3]) -> Self {
        Self::from_one_hot(action)
    }
}
