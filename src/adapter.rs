use crate::state::SimulationState;

/// Anything that can show the game. Calls are notifications; failures are the
/// adapter's business.
pub trait Presentation {
    fn render(&mut self, state: &SimulationState);
    fn show_start_screen(&mut self);
    fn show_game_over_screen(&mut self, final_score: u32);
    fn show_playfield(&mut self);
}

pub trait Audio {
    /// Called once per food eaten. Must not block.
    fn food_eaten(&mut self);
}

/// Audio sink for `--mute`.
pub struct Silence;

impl Audio for Silence {
    fn food_eaten(&mut self) {}
}

impl<P: Presentation + ?Sized> Presentation for &mut P {
    fn render(&mut self, state: &SimulationState) {
        (**self).render(state)
    }

    fn show_start_screen(&mut self) {
        (**self).show_start_screen()
    }

    fn show_game_over_screen(&mut self, final_score: u32) {
        (**self).show_game_over_screen(final_score)
    }

    fn show_playfield(&mut self) {
        (**self).show_playfield()
    }
}

impl<A: Audio + ?Sized> Audio for Box<A> {
    fn food_eaten(&mut self) {
        (**self).food_eaten()
    }
}
