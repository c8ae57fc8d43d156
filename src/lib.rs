//! Grid snake for the terminal: the simulation core, a tick controller that
//! drives it, and a crossterm front end.

pub mod adapter;
pub mod collision;
pub mod game;
pub mod grid;
pub mod input;
pub mod latch;
pub mod runner;
pub mod scheduler;
pub mod snake;
pub mod state;
pub mod term;

pub type TermInt = u16;
pub type Coords = (u16, u16);
