use crate::{Coords, TermInt};
use std::io::{Stdout, Write, stdout};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use tracing::error;

use crate::adapter::{Audio, Presentation};
use crate::grid::{Cell, CELLS_PER_SIDE};
use crate::state::SimulationState;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = '●';

const HEAD_COLOR: Color = Color::Green;
const BODY_COLOR: Color = Color::DarkGreen;
const FOOD_COLOR: Color = Color::Red;

/// Terminal columns per grid cell; characters are about twice as tall as wide.
const COLS_PER_CELL: TermInt = 2;
const BOARD_COLS: TermInt = CELLS_PER_SIDE as TermInt * COLS_PER_CELL;
const BOARD_ROWS: TermInt = CELLS_PER_SIDE as TermInt;
/// Board plus border, plus one line for the score.
const MIN_WIDTH: TermInt = BOARD_COLS + 2;
const MIN_HEIGHT: TermInt = BOARD_ROWS + 3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::Reset };

/// Raw access to the terminal: a character grid that remembers what was drawn,
/// so message boxes can be taken down again.
pub struct TermManager<W: Write = Stdout> {
    width: TermInt,
    height: TermInt,
    out: W,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager<Stdout> {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        Ok(TermManager::with_output(stdout(), width, height))
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_output(out: W, width: TermInt, height: TermInt) -> Self {
        let screen = vec![BLANK; width as usize * height as usize];
        TermManager { width, height, out, screen, current_msg: None }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        Ok(())
    }

    /// Undoes `setup`, also after a partial one. Every step is attempted.
    pub fn restore(&mut self) -> Result<()> {
        let raw = terminal::disable_raw_mode().context("Error disabling raw mode");
        let screen = execute!(self.out, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen");
        raw.and(screen)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Box outline with its top-left corner at `top_left`, outer size `size`.
    pub fn draw_borders(&mut self, top_left: Coords, size: Coords) -> Result<()> {
        let (x0, y0) = top_left;
        let (width, height) = size;
        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {'+'} else {'-'};
            self.print_at((x, y0), ch, Color::Reset)?;
            self.print_at((x, end_y), ch, Color::Reset)?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), '|', Color::Reset)?;
            self.print_at((end_x, y), '|', Color::Reset)?;
        }

        Ok(())
    }

    pub fn print_str_at(&mut self, pos: Coords, s: &str) -> Result<()> {
        for (i, ch) in s.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), ch, Color::Reset)?;
        }
        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Blank first and last line
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back whatever the box was covering
        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            for x in msg.top_left.0..msg.top_left.0 + msg.width {
                if let Some(glyph) = self.glyph_at((x, y)) {
                    self.queue_glyph((x, y), glyph)?;
                }
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: Coords, ch: char, color: Color) -> Result<()> {
        let glyph = Glyph { ch, color };
        self.queue_glyph(pos, glyph)?;
        if let Some(idx) = self.index(pos) {
            self.screen[idx] = glyph;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.out, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    // Message boxes skip the screen buffer so they can be restored from it
    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        self.queue_glyph(pos, Glyph { ch, color: Color::Reset })
    }

    fn queue_glyph(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(glyph.color),
            style::Print(glyph.ch)
        )?;
        Ok(())
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn glyph_at(&self, pos: Coords) -> Option<Glyph> {
        self.index(pos).map(|idx| self.screen[idx])
    }
}

/// Terminal front end: the board centred on screen with the score above it.
pub struct TerminalView<W: Write = Stdout> {
    term: TermManager<W>,
    /// Top-left corner of the score line; the border starts one row below.
    origin: Coords,
    last_frame: Vec<Option<Glyph>>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(term: TermManager<W>) -> Result<Self> {
        let (width, height) = term.get_terminal_size();
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            bail!(
                "Terminal is {}x{}, the board needs at least {}x{}",
                width, height, MIN_WIDTH, MIN_HEIGHT
            );
        }

        let origin = ((width - MIN_WIDTH) / 2, (height - MIN_HEIGHT) / 2);
        Ok(TerminalView { term, origin, last_frame: vec![] })
    }

    fn cell_pos(&self, (col, row): (i32, i32)) -> Coords {
        (
            self.origin.0 + 1 + col as TermInt * COLS_PER_CELL,
            self.origin.1 + 2 + row as TermInt,
        )
    }

    fn try_render(&mut self, state: &SimulationState) -> Result<()> {
        let score_line = format!("Score: {:<10}", state.score);
        self.term.print_str_at(self.origin, &score_line)?;

        let frame = frame_of(state);
        for (idx, glyph) in frame.iter().enumerate() {
            if self.last_frame.get(idx) == Some(glyph) {
                continue;
            }

            let col_row = (idx as i32 % CELLS_PER_SIDE, idx as i32 / CELLS_PER_SIDE);
            let pos = self.cell_pos(col_row);
            let Glyph { ch, color } = glyph.unwrap_or(BLANK);
            self.term.print_at(pos, ch, color)?;
            self.term.print_at((pos.0 + 1, pos.1), ch, color)?;
        }

        self.last_frame = frame;
        self.term.flush()
    }

    fn try_show_playfield(&mut self) -> Result<()> {
        if self.term.has_message() && !self.last_frame.is_empty() {
            // Restart from game over: the old board is still under the box
            return self.term.hide_message();
        }

        self.term.clear()?;
        self.last_frame.clear();
        let border_top_left = (self.origin.0, self.origin.1 + 1);
        self.term.draw_borders(border_top_left, (MIN_WIDTH, BOARD_ROWS + 2))?;
        self.term.flush()
    }

    fn try_show_start_screen(&mut self) -> Result<()> {
        self.term.clear()?;
        self.term.show_message(&[
            "LIQUID SNAKE",
            "",
            "Arrow keys or WASD to move",
            "q or Esc to quit",
            "",
            "Press Enter to play",
        ])
    }

    fn try_show_game_over(&mut self, final_score: u32) -> Result<()> {
        self.term.show_message(&[
            "Game over!",
            &*format!("Your score was {}", final_score),
            "",
            "Press Enter to play again,",
            "or q to quit.",
        ])
    }
}

/// Glyph per board cell in row-major order, `None` for empty cells. Drawing
/// order is food, then body, then head, so the head always shows.
fn frame_of(state: &SimulationState) -> Vec<Option<Glyph>> {
    let side = CELLS_PER_SIDE as usize;
    let mut frame = vec![None; side * side];

    let mut put = |cell: Cell, glyph: Glyph| {
        if cell.in_bounds() {
            let (col, row) = cell.column_row();
            frame[row as usize * side + col as usize] = Some(glyph);
        }
    };

    put(state.food, Glyph { ch: FOOD_CHAR, color: FOOD_COLOR });
    for &cell in state.snake.tail_cells() {
        put(cell, Glyph { ch: SNAKE_BODY_CHAR, color: BODY_COLOR });
    }
    put(state.snake.head(), Glyph { ch: state.heading.head_char(), color: HEAD_COLOR });

    frame
}

impl<W: Write> Presentation for TerminalView<W> {
    fn render(&mut self, state: &SimulationState) {
        if let Err(e) = self.try_render(state) {
            error!("render failed: {:#}", e);
        }
    }

    fn show_start_screen(&mut self) {
        if let Err(e) = self.try_show_start_screen() {
            error!("drawing start screen failed: {:#}", e);
        }
    }

    fn show_game_over_screen(&mut self, final_score: u32) {
        if let Err(e) = self.try_show_game_over(final_score) {
            error!("drawing game over screen failed: {:#}", e);
        }
    }

    fn show_playfield(&mut self) {
        if let Err(e) = self.try_show_playfield() {
            error!("drawing playfield failed: {:#}", e);
        }
    }
}

/// Terminal bell on every food eaten.
pub struct Bell {
    out: Stdout,
}

impl Bell {
    pub fn new() -> Self {
        Bell { out: stdout() }
    }
}

/// A terminal that has to be put back the way it was found.
pub trait Session {
    fn setup(&mut self) -> Result<()>;
    fn restore(&mut self) -> Result<()>;
}

impl<W: Write> Session for TerminalView<W> {
    fn setup(&mut self) -> Result<()> {
        self.term.setup()
    }

    fn restore(&mut self) -> Result<()> {
        self.term.restore()
    }
}

/// Runs `play` inside a set-up session. `restore` runs on every path, and a
/// failure of `setup` or `play` wins over a failure to restore.
pub fn in_session<S, T, F>(session: &mut S, play: F) -> Result<T>
where
    S: Session,
    F: FnOnce(&mut S) -> Result<T>,
{
    let result = session.setup().and_then(|()| play(&mut *session));
    let restored = session.restore();

    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            error!("restoring the terminal failed: {:#}", restore_err);
            Err(e)
        }
        (result, restored) => restored.and(result),
    }
}

impl Audio for Bell {
    fn food_eaten(&mut self) {
        if let Err(e) = execute!(self.out, style::Print('\x07')) {
            error!("bell failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Direction, Snake};

    fn state() -> SimulationState {
        SimulationState {
            snake: Snake::new(Cell::new(160, 200), 3, Direction::Right),
            heading: Direction::Right,
            food: Cell::new(0, 380),
            score: 0,
            alive: true,
        }
    }

    fn at(frame: &[Option<Glyph>], col: usize, row: usize) -> Option<Glyph> {
        frame[row * CELLS_PER_SIDE as usize + col]
    }

    #[test]
    fn frame_places_snake_and_food() {
        let frame = frame_of(&state());

        assert_eq!(at(&frame, 8, 10).map(|g| g.ch), Some('>'));
        assert_eq!(at(&frame, 7, 10).map(|g| g.ch), Some(SNAKE_BODY_CHAR));
        assert_eq!(at(&frame, 6, 10).map(|g| g.ch), Some(SNAKE_BODY_CHAR));
        assert_eq!(at(&frame, 0, 19).map(|g| g.ch), Some(FOOD_CHAR));
        assert_eq!(frame.iter().filter(|g| g.is_some()).count(), 4);
    }

    #[test]
    fn head_is_drawn_over_food() {
        let mut s = state();
        s.food = s.snake.head();
        let frame = frame_of(&s);
        assert!(at(&frame, 8, 10) == Some(Glyph { ch: '>', color: HEAD_COLOR }));
    }

    #[test]
    fn off_board_cells_are_skipped() {
        let mut s = state();
        s.snake = Snake::from_cells(vec![Cell::new(-20, 0), Cell::new(0, 0)]);
        let frame = frame_of(&s);
        assert_eq!(frame.iter().filter(|g| g.is_some()).count(), 2);
    }

    #[test]
    fn message_box_restores_what_it_covers() {
        let mut term = TermManager::with_output(Vec::new(), 40, 12);
        term.print_at((20, 6), 'X', Color::Red).unwrap();
        term.show_message(&["hello"]).unwrap();
        assert!(term.has_message());

        term.out.clear();
        term.hide_message().unwrap();

        assert!(!term.has_message());
        assert!(String::from_utf8_lossy(&term.out).contains('X'));
        assert_eq!(term.glyph_at((20, 6)), Some(Glyph { ch: 'X', color: Color::Red }));
    }

    #[test]
    fn restart_uncovers_the_old_board() {
        let mut view = TerminalView::new(TermManager::with_output(Vec::new(), 80, 30)).unwrap();
        view.show_playfield();
        view.render(&state());
        view.show_game_over_screen(10);
        assert!(view.term.has_message());

        view.term.out.clear();
        view.show_playfield();

        assert!(!view.term.has_message());
        assert!(!view.last_frame.is_empty());
        let out = String::from_utf8_lossy(&view.term.out).into_owned();
        assert!(out.contains('>'));
        assert!(out.contains(SNAKE_BODY_CHAR));

        // Head at column 8, row 10 of a board whose score line sits at (19, 3).
        assert_eq!(view.term.glyph_at((36, 15)), Some(Glyph { ch: '>', color: HEAD_COLOR }));
    }

    #[test]
    fn too_small_terminal_is_refused() {
        assert!(TerminalView::new(TermManager::with_output(Vec::new(), 41, 30)).is_err());
        assert!(TerminalView::new(TermManager::with_output(Vec::new(), 80, 22)).is_err());
    }

    #[derive(Default)]
    struct FakeSession {
        fail_setup: bool,
        fail_restore: bool,
        restored: bool,
    }

    impl Session for FakeSession {
        fn setup(&mut self) -> Result<()> {
            if self.fail_setup {
                bail!("no tty");
            }
            Ok(())
        }

        fn restore(&mut self) -> Result<()> {
            self.restored = true;
            if self.fail_restore {
                bail!("stuck in raw mode");
            }
            Ok(())
        }
    }

    #[test]
    fn failed_setup_still_restores() {
        let mut session = FakeSession { fail_setup: true, ..Default::default() };
        let mut played = false;

        let err = in_session(&mut session, |_| {
            played = true;
            Ok(())
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "no tty");
        assert!(session.restored);
        assert!(!played);
    }

    #[test]
    fn game_error_survives_a_failed_restore() {
        let mut session = FakeSession { fail_restore: true, ..Default::default() };

        let err = in_session(&mut session, |_| -> Result<()> { bail!("input gone") }).unwrap_err();

        assert_eq!(err.to_string(), "input gone");
        assert!(session.restored);
    }

    #[test]
    fn restore_failure_after_a_clean_game_is_reported() {
        let mut session = FakeSession { fail_restore: true, ..Default::default() };
        let err = in_session(&mut session, |_| Ok(7)).unwrap_err();
        assert_eq!(err.to_string(), "stuck in raw mode");

        let mut session = FakeSession::default();
        assert_eq!(in_session(&mut session, |_| Ok(7)).unwrap(), 7);
        assert!(session.restored);
    }

    #[test]
    fn board_fits_minimum_size() {
        assert_eq!(MIN_WIDTH, 42);
        assert_eq!(MIN_HEIGHT, 23);
    }
}
