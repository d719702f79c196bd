use crate::game::{GameState, Heading, RelativeTurn};

/// Number of features in an [`Observation`]
pub const OBSERVATION_SIZE: usize = 11;

/// Compact feature vector describing the snake's surroundings
///
/// Layout:
/// - 0..3: danger straight / right / left (1.0 if that move ends the episode)
/// - 3..7: current heading one-hot (right, down, left, up)
/// - 7..11: food is left / right / above / below the head
pub type Observation = [f32; OBSERVATION_SIZE];

/// Build the feature vector for the current state
pub fn create_observation(state: &GameState) -> Observation {
    let head = state.snake.head();
    let heading = state.heading();
    let mut features = [0.0; OBSERVATION_SIZE];

    for (i, turn) in RelativeTurn::ALL.iter().enumerate() {
        let target = head.moved_in(turn.apply(heading));
        features[i] = flag(state.is_danger(target));
    }

    for (i, candidate) in Heading::CLOCKWISE.iter().enumerate() {
        features[3 + i] = flag(*candidate == heading);
    }

    let food = state.food;
    features[7] = flag(food.x < head.x);
    features[8] = flag(food.x > head.x);
    features[9] = flag(food.y < head.y);
    features[10] = flag(food.y > head.y);

    features
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, GameConfig, GameState, Snake};

    fn state(snake: Snake, food: Cell) -> GameState {
        GameState::new(snake, food, GameConfig::small().geometry().unwrap())
    }

    #[test]
    fn test_open_board() {
        let obs = create_observation(&state(
            Snake::new(Cell::new(5, 5), Heading::Right, 3),
            Cell::new(8, 2),
        ));

        assert_eq!(&obs[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&obs[3..7], &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(&obs[7..11], &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_wall_ahead() {
        let obs = create_observation(&state(
            Snake::new(Cell::new(9, 0), Heading::Right, 3),
            Cell::new(0, 9),
        ));

        // Straight hits the right wall, left turn hits the top wall
        assert_eq!(&obs[0..3], &[1.0, 0.0, 1.0]);
        assert_eq!(&obs[7..11], &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_body_counts_as_danger() {
        let snake = Snake::from_cells(
            [
                Cell::new(5, 5),
                Cell::new(5, 4),
                Cell::new(6, 4),
                Cell::new(6, 5),
                Cell::new(6, 6),
            ],
            Heading::Down,
        )
        .unwrap();
        let obs = create_observation(&state(snake, Cell::new(0, 0)));

        // Heading down: straight (5,6) free, right turn (4,5) free, left turn (6,5) body
        assert_eq!(&obs[0..3], &[0.0, 0.0, 1.0]);
        assert_eq!(&obs[3..7], &[0.0, 1.0, 0.0, 0.0]);
    }
}
