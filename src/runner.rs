use anyhow::Result;
use rand::Rng;
use tracing::info;

use crate::adapter::{Audio, Presentation};
use crate::game::{Phase, SnakeGame};
use crate::input::{InputEvent, InputSource};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The main loop: waits for input until the next tick is due, then ticks.
pub struct Runner<P, A, R, I, S> {
    game: SnakeGame<P, A, R>,
    input: I,
    scheduler: S,
}

impl<P, A, R, I, S> Runner<P, A, R, I, S>
where
    P: Presentation,
    A: Audio,
    R: Rng,
    I: InputSource,
    S: Scheduler,
{
    pub fn new(game: SnakeGame<P, A, R>, input: I, scheduler: S) -> Self {
        Runner { game, input, scheduler }
    }

    /// Shows the intro and plays until the player quits.
    pub fn run(&mut self) -> Result<()> {
        self.game.show_intro();
        while self.step()? == Flow::Continue {}
        info!("quitting");
        Ok(())
    }

    /// One pass of the loop: handle at most one input event, then tick if due.
    pub fn step(&mut self) -> Result<Flow> {
        let timeout = self.scheduler.time_until_tick();

        match self.input.next_event(timeout)? {
            Some(InputEvent::Quit) => return Ok(Flow::Quit),
            Some(InputEvent::Start) => {
                if self.game.phase() != Phase::Running {
                    self.game.start();
                    self.scheduler.restart();
                }
            }
            Some(InputEvent::Direction(dir)) => self.game.on_direction_input(dir),
            None => {}
        }

        if self.scheduler.take_tick() {
            self.game.tick();
        }

        Ok(Flow::Continue)
    }

    pub fn game(&self) -> &SnakeGame<P, A, R> {
        &self.game
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
