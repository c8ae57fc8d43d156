use rand::Rng;
use tracing::{debug, info, trace};

use crate::adapter::{Audio, Presentation};
use crate::collision::collision;
use crate::latch::HeadingLatch;
use crate::snake::Direction;
use crate::state::{advance, SimulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

/// Owns the simulation and moves it forward one tick at a time. The timer that
/// calls [`SnakeGame::tick`] lives outside; ticks must not overlap.
pub struct SnakeGame<P, A, R> {
    phase: Phase,
    state: Option<SimulationState>,
    latch: HeadingLatch,
    presentation: P,
    audio: A,
    rng: R,
}

impl<P: Presentation, A: Audio, R: Rng> SnakeGame<P, A, R> {
    pub fn new(presentation: P, audio: A, rng: R) -> Self {
        SnakeGame {
            phase: Phase::Idle,
            state: None,
            latch: HeadingLatch::new(),
            presentation,
            audio,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn show_intro(&mut self) {
        self.presentation.show_start_screen();
    }

    /// Start or restart. Ignored while a game is running.
    pub fn start(&mut self) {
        if self.phase == Phase::Running {
            debug!("start requested mid-game, ignoring");
            return;
        }

        let state = SimulationState::initial(&mut self.rng);
        info!(food = ?state.food, "game started");

        self.latch.reset();
        self.phase = Phase::Running;
        self.presentation.show_playfield();
        self.presentation.render(&state);
        self.state = Some(state);
    }

    /// Latches a direction change for the next tick. Only listened to while
    /// running.
    pub fn on_direction_input(&mut self, requested: Direction) {
        if self.phase != Phase::Running {
            return;
        }

        if let Some(state) = &self.state {
            if let Some(heading) = self.latch.on_direction_input(requested, state.heading) {
                trace!(?heading, "heading latched");
            }
        }
    }

    /// One simulation step. A no-op unless running.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        let state = match self.state.take() {
            Some(state) => state,
            None => return,
        };

        let heading = self.latch.heading_or(state.heading);
        self.latch.reset();

        let (mut state, outcome) = advance(state, heading, &mut self.rng);
        trace!(head = ?state.snake.head(), ?heading, "tick");

        if outcome.ate_food {
            debug!(score = state.score, food = ?state.food, "food eaten");
            self.audio.food_eaten();
        }

        if let Some(cause) = collision(&state) {
            state.alive = false;
            info!(score = state.score, ?cause, "game over");
            self.phase = Phase::GameOver;
            self.presentation.show_game_over_screen(state.score);
        } else {
            self.presentation.render(&state);
        }

        self.state = Some(state);
    }
}
