use rand::Rng;

use crate::grid::Cell;
use crate::snake::{Direction, Snake};

/// Points awarded for each food eaten.
pub const FOOD_REWARD: u32 = 10;

const INITIAL_HEAD: Cell = Cell::new(160, 200);
const INITIAL_SNAKE_LENGTH: usize = 3;

/// Everything a game needs between two ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    pub snake: Snake,
    pub heading: Direction,
    pub food: Cell,
    pub score: u32,
    pub alive: bool,
}

/// What happened during one call to [`advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub ate_food: bool,
}

impl SimulationState {
    /// The fixed starting layout with freshly spawned food.
    pub fn initial<R: Rng + ?Sized>(rng: &mut R) -> Self {
        SimulationState {
            snake: Snake::new(INITIAL_HEAD, INITIAL_SNAKE_LENGTH, Direction::Right),
            heading: Direction::Right,
            food: Cell::random(rng),
            score: 0,
            alive: true,
        }
    }
}

/// Moves the snake one cell towards `heading`. Eating the food grows the snake,
/// adds [`FOOD_REWARD`] and respawns the food anywhere on the board, possibly
/// under the snake.
pub fn advance<R: Rng + ?Sized>(
    mut state: SimulationState,
    heading: Direction,
    rng: &mut R,
) -> (SimulationState, Advance) {
    state.heading = heading;

    let ate_food = state.snake.head().offset(heading.delta()) == state.food;
    state.snake.step(heading, ate_food);

    if ate_food {
        state.score += FOOD_REWARD;
        state.food = Cell::random(rng);
    }

    (state, Advance { ate_food })
}
