use crate::action::Action::*;
use crate::args::{MAX_H, MAX_W, MinesweptArgs};
use crate::board::{Board, FlagOutcome, MIN_H, MIN_W, Phase, RevealOutcome};
use crate::error::GameError;
use crate::generator::Generator;
use crate::input_state::InputState;
use crate::util::Unit::{self, Negative, Positive, Zero};
use color_eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color::*;
use ratatui::{
    DefaultTerminal, Frame,
    style::Stylize,
    text::Line,
    widgets::{Block, Paragraph},
};

pub fn main(args: MinesweptArgs) -> Result<()> {
    let app = App::new(args)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// Holds the board and translates terminal events into board operations.
pub struct App {
    running: bool,
    board: Board,
    input: InputState,
    /// One-line notice for refused moves, shown until the next action.
    message: Option<&'static str>,
}

impl App {
    pub fn new(args: MinesweptArgs) -> Result<Self> {
        let generator = Generator::new(args.seed);
        let board = Board::new(
            args.width,
            args.height,
            args.difficulty,
            !args.no_reveal_around,
            generator,
        )?;
        let cursor = (board.width() / 2, board.height() / 2);
        Ok(Self {
            running: false,
            board,
            input: InputState {
                cursor,
                action: None,
            },
            message: None,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        std::io::stdout().execute(event::EnableMouseCapture)?;

        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.update()?;
        }

        std::io::stdout().execute(event::DisableMouseCapture)?;
        Ok(())
    }

    /// Applies the pending action to the board. Refused moves turn into a
    /// status message, out-of-bounds targets are dispatcher bugs and abort.
    fn update(&mut self) -> Result<()> {
        let Some(action) = self.input.action.take() else {
            return Ok(());
        };
        self.message = None;
        match action {
            Quit => self.running = false,
            Move(dx, dy) => self.move_cursor(dx, dy),
            Reveal => self.reveal()?,
            Flag => self.flag()?,
            GiveUp => self.board.reveal_all(),
            Restart => {
                self.board.restart();
                self.center_cursor();
            }
            Resize(dx, dy) => {
                let width = self
                    .board
                    .width()
                    .saturating_add_signed(dx as i16)
                    .clamp(MIN_W, MAX_W);
                let height = self
                    .board
                    .height()
                    .saturating_add_signed(dy as i16)
                    .clamp(MIN_H, MAX_H);
                self.board.reset(width, height, self.board.difficulty())?;
                self.center_cursor();
            }
            AdjustDifficulty(step) => {
                let difficulty = (self.board.difficulty() as i16 + step as i16 * 5).clamp(1, 100);
                self.board
                    .reset(self.board.width(), self.board.height(), difficulty as u8)?;
                self.center_cursor();
            }
        }
        Ok(())
    }

    fn reveal(&mut self) -> Result<()> {
        match self.board.reveal(self.input.cursor) {
            Ok(RevealOutcome::Exploded) => self.board.reveal_all(),
            Ok(RevealOutcome::Flagged) => self.message = Some("unflag the tile first"),
            Ok(_) => {}
            Err(GameError::GameOver) => self.message = Some("the round is over, press r"),
            Err(error) => return Err(error.into()),
        }
        Ok(())
    }

    fn flag(&mut self) -> Result<()> {
        match self.board.toggle_flag(self.input.cursor) {
            Ok(FlagOutcome::Won) => self.board.reveal_all(),
            Ok(FlagOutcome::Revealed) => self.message = Some("the tile is already revealed"),
            Ok(FlagOutcome::Toggled) => {}
            Err(GameError::GameOver) => self.message = Some("the round is over, press r"),
            Err(error) => return Err(error.into()),
        }
        Ok(())
    }

    fn move_cursor(&mut self, dx: Unit, dy: Unit) {
        let (x, y) = self.input.cursor;
        self.input.cursor = (
            x.saturating_add_signed(dx as i16).min(self.board.width() - 1),
            y.saturating_add_signed(dy as i16).min(self.board.height() - 1),
        );
    }

    fn center_cursor(&mut self) {
        self.input.cursor = (self.board.width() / 2, self.board.height() / 2);
    }

    fn render(&self, frame: &mut Frame) {
        let width = self.board.width();
        let height = self.board.height();
        let (x, y) = self.input.cursor;

        const RETRY: &str = "(r)estart (q)uit";
        const RETRY_SHORT: &str = "(r) (q)";
        let verdict_help = if width < RETRY.len() as u16 {
            RETRY_SHORT
        } else {
            RETRY
        };

        let (title, bottom) = match self.board.phase() {
            Phase::Won => (
                Line::from("swept clean").bold().light_green().centered(),
                Line::from(verdict_help).bold().light_green().centered(),
            ),
            Phase::Lost => (
                Line::from("boom").bold().light_red().centered(),
                Line::from(verdict_help).bold().light_red().centered(),
            ),
            _ => {
                let stats = match self.message {
                    Some(message) => message.to_string(),
                    None if self.board.phase() == Phase::Empty => format!(
                        "{}x{}, {} mines, {}%",
                        width,
                        height,
                        self.board.mines_left(),
                        self.board.difficulty()
                    ),
                    None => {
                        let mut stats = format!(
                            "{} left ({},{}) {}x{} {}%",
                            self.board.mines_left(),
                            x,
                            y,
                            width,
                            height,
                            self.board.difficulty()
                        );
                        if stats.len() as u16 > width {
                            stats = format!("{} {},{}", self.board.mines_left(), x, y);
                        }
                        stats
                    }
                };
                (
                    Line::from("mineswept").bold().light_blue().centered(),
                    Line::from(stats).centered(),
                )
            }
        };
        let area = frame.area().clamp(Rect::new(0, 0, width + 2, height + 2));

        frame.render_widget(
            Paragraph::new("")
                .block(Block::bordered().title(title).title_bottom(bottom))
                .centered(),
            area,
        );

        if area.height < 2 || area.width < 2 {
            return;
        }

        for j in area.y + 1..area.y + area.height - 1 {
            for i in area.x + 1..area.x + area.width - 1 {
                let Some(tile) = self.board.tile((i - 1, j - 1)) else {
                    continue;
                };

                let (char, bg, fg) = if !tile.revealed {
                    if tile.flagged {
                        ('!', LightRed, LightYellow)
                    } else {
                        ('#', Reset, Reset)
                    }
                } else if tile.mine {
                    ('*', Black, LightRed)
                } else {
                    match tile.adjacent {
                        0 => (' ', Black, Reset),
                        1 => ('1', LightBlue, Black),
                        2 => ('2', LightCyan, Black),
                        3 => ('3', LightGreen, Black),
                        4 => ('4', LightYellow, Black),
                        5 => ('5', LightMagenta, Black),
                        6 => ('6', Gray, Black),
                        7 => ('7', White, Black),
                        8.. => ('8', LightRed, Black),
                    }
                };

                let w = frame.area().width;
                let mut c = Cell::new("");
                c.set_char(char).set_fg(fg).set_bg(bg);
                frame.buffer_mut().content[w as usize * j as usize + i as usize] = c;
            }
        }

        frame.set_cursor_position(Position { x: x + 1, y: y + 1 });
    }

    fn handle_crossterm_events(&mut self) -> Result<()> {
        match event::read()? {
            // key release events would double up every press
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(m) => match m.kind {
                MouseEventKind::Down(button) => 'block: {
                    if !(1..self.board.width() + 1).contains(&m.column)
                        || !(1..self.board.height() + 1).contains(&m.row)
                    {
                        break 'block;
                    }
                    self.input.cursor = (m.column - 1, m.row - 1);
                    self.input.action = match button {
                        MouseButton::Left => Some(Reveal),
                        MouseButton::Right | MouseButton::Middle => Some(Flag),
                    };
                }
                _ => {}
            },
            Event::Resize(_, _) => {}
            _ => {}
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        self.input.action = match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => Some(Quit),
            (_, KeyCode::Char('x' | ' ')) => Some(Reveal),
            (_, KeyCode::Char('z' | 'f')) => Some(Flag),
            (_, KeyCode::Char('g')) => Some(GiveUp),
            (_, KeyCode::Char('r')) => Some(Restart),
            (_, KeyCode::Char('+')) => Some(AdjustDifficulty(Positive)),
            (_, KeyCode::Char('-')) => Some(AdjustDifficulty(Negative)),
            (_, KeyCode::Char('h')) => Some(Move(Negative, Zero)),
            (_, KeyCode::Char('l')) => Some(Move(Positive, Zero)),
            (_, KeyCode::Char('k')) => Some(Move(Zero, Negative)),
            (_, KeyCode::Char('j')) => Some(Move(Zero, Positive)),
            (modifiers, key @ (KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down)) => {
                let (dx, dy) = match key {
                    KeyCode::Left => (Negative, Zero),
                    KeyCode::Right => (Positive, Zero),
                    KeyCode::Up => (Zero, Negative),
                    KeyCode::Down => (Zero, Positive),
                    _ => unreachable!(),
                };
                if modifiers.contains(KeyModifiers::SHIFT) {
                    Some(Resize(dx, dy))
                } else {
                    Some(Move(dx, dy))
                }
            }
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(width: u16, height: u16) -> App {
        App::new(MinesweptArgs {
            width,
            height,
            difficulty: 14,
            no_reveal_around: false,
            seed: Some(9),
            log_file: None,
        })
        .unwrap()
    }

    #[test]
    fn cursor_starts_centered_and_clamps_at_edges() {
        let mut app = app(10, 12);
        assert_eq!(app.input.cursor, (5, 6));
        for _ in 0..20 {
            app.input.action = Some(Move(Negative, Negative));
            app.update().unwrap();
        }
        assert_eq!(app.input.cursor, (0, 0));
        app.input.action = Some(Move(Positive, Zero));
        app.update().unwrap();
        assert_eq!(app.input.cursor, (1, 0));
    }

    #[test]
    fn resize_clamps_to_limits_and_recenters() {
        let mut app = app(10, 10);
        app.input.action = Some(Resize(Negative, Negative));
        app.update().unwrap();
        assert_eq!((app.board.width(), app.board.height()), (10, 10));
        app.input.action = Some(Resize(Positive, Zero));
        app.update().unwrap();
        assert_eq!((app.board.width(), app.board.height()), (11, 10));
        assert_eq!(app.input.cursor, (5, 5));
    }

    #[test]
    fn difficulty_steps_stay_in_range() {
        let mut app = app(10, 10);
        for _ in 0..30 {
            app.input.action = Some(AdjustDifficulty(Negative));
            app.update().unwrap();
        }
        assert_eq!(app.board.difficulty(), 1);
        app.input.action = Some(AdjustDifficulty(Positive));
        app.update().unwrap();
        assert_eq!(app.board.difficulty(), 6);
    }

    #[test]
    fn refused_reveal_reports_instead_of_failing() {
        let mut app = app(10, 10);
        app.input.action = Some(Flag);
        app.update().unwrap();
        app.input.action = Some(Reveal);
        app.update().unwrap();
        assert!(app.message.is_some());
        assert_eq!(app.board.phase(), Phase::Empty);
    }

    #[test]
    fn give_up_ends_the_round() {
        let mut app = app(10, 10);
        app.input.action = Some(GiveUp);
        app.update().unwrap();
        assert_eq!(app.board.phase(), Phase::Lost);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app(10, 10);
        app.running = true;
        app.input.action = Some(Quit);
        app.update().unwrap();
        assert!(!app.running);
    }
}
