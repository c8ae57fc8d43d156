use crate::state::SimulationState;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

pub fn collision(state: &SimulationState) -> Option<Collision> {
    let head = state.snake.head();

    if !head.in_bounds() {
        Some(Collision::Wall)
    } else if state.snake.tail_cells().any(|&cell| cell == head) {
        Some(Collision::SelfHit)
    } else {
        None
    }
}

pub fn is_terminal(state: &SimulationState) -> bool {
    collision(state).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, CELL_SIZE};
    use crate::snake::{Direction::*, Snake};

    fn state(cells: &[(i32, i32)]) -> SimulationState {
        SimulationState {
            snake: Snake::from_cells(cells.iter().map(|&(x, y)| Cell::new(x, y))),
            heading: Right,
            food: Cell::new(380, 380),
            score: 0,
            alive: true,
        }
    }

    #[test]
    fn live_snake() {
        let s = state(&[(160, 200), (140, 200), (120, 200)]);
        assert_eq!(collision(&s), None);
        assert!(!is_terminal(&s));
    }

    #[test]
    fn left_of_origin_is_a_wall() {
        let s = state(&[(-20, 0), (0, 0), (20, 0)]);
        assert_eq!(collision(&s), Some(Collision::Wall));
        assert!(is_terminal(&s));
    }

    #[test]
    fn every_edge_is_a_wall() {
        for head in [(400, 100), (100, 400), (100, -20)] {
            assert_eq!(collision(&state(&[head])), Some(Collision::Wall));
        }
        assert_eq!(collision(&state(&[(380, 0)])), None);
    }

    #[test]
    fn head_reentering_body() {
        // Head back on the cell it occupied three moves ago.
        let s = state(&[(100, 100), (120, 100), (120, 120), (100, 120), (100, 100)]);
        assert_eq!(collision(&s), Some(Collision::SelfHit));
    }

    #[test]
    fn self_hit_found_by_moving_in_a_square() {
        let mut snake = Snake::new(Cell::new(100, 100), 5, Right);
        for dir in [Down, Left, Up] {
            snake.step(dir, false);
        }
        let s = SimulationState { snake, ..state(&[(0, 0)]) };
        assert!(is_terminal(&s));
        assert_eq!(s.snake.head().x % CELL_SIZE, 0);
    }
}
