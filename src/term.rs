use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::trace;

use crate::error::{GameError, Result};
use crate::grid::{Direction::{self, *}, Grid, GridPosition};
use crate::scene::{Costume, Scene, Sound};
use crate::snake::Player;

type Coords = (u16, u16);

const TEXT_COLOR: Color = Color::Yellow;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<Cell>,
    current_msg: Option<Message>,
    scale: u16,
    origin: Coords,
    active: bool,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new(scale: u16) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None, scale, origin: (0, 0), active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    /// The grid takes `scale` columns per cell plus a status line below it.
    pub fn place_grid(&mut self, grid: &Grid) -> Result<()> {
        let min_width = grid.width() * self.scale;
        let min_height = grid.height() + 1;

        if self.width < min_width || self.height < min_height {
            return Err(GameError::TerminalTooSmall { width: self.width, height: self.height, min_width, min_height });
        }

        self.origin = ((self.width - min_width) / 2, (self.height - min_height) / 2);
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Waits at most `timeout` for a key press.
    pub fn read_key_timeout(&self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn draw_scene(&mut self, scene: &Scene, grid: &Grid) -> Result<()> {
        let mut frame = vec![BLANK; grid.cell_count()];
        for sprite in &scene.sprites {
            let pos = sprite.position;
            if grid.contains(pos) {
                frame[pos.y as usize * grid.width() as usize + pos.x as usize] = glyph(sprite.costume);
            }
        }

        for pos in grid.cells() {
            let cell = frame[pos.y as usize * grid.width() as usize + pos.x as usize];
            let fill = if is_solid(cell.ch) { cell } else { BLANK };
            let (x, y) = self.to_screen(pos);
            self.print_at((x, y), cell)?;
            for dx in 1..self.scale {
                self.print_at((x + dx, y), fill)?;
            }
        }

        self.draw_status(scene, grid)?;
        self.flush()
    }

    pub fn show_message<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.as_ref().chars().count()).max().unwrap_or(0) + 4) as u16;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ', TEXT_COLOR)?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line.as_ref(), width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as u16, y), ch, TEXT_COLOR)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let (x, y) = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(cell) = self.screen_cell((x, y)) {
                    self.print_at_no_save((x, y), cell.ch, cell.color)?;
                }
            }
        }

        self.flush()
    }

    pub fn play(&mut self, sound: Sound) -> Result<()> {
        trace!("sound {:?}", sound);

        // The bell is the only noise a terminal makes
        if matches!(sound, Sound::Collide | Sound::LevelComplete) {
            execute!(self.stdout, style::Print('\x07'))?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_status(&mut self, scene: &Scene, grid: &Grid) -> Result<()> {
        let width = (grid.width() * self.scale) as usize;
        let score = scene.score_text();
        let level = scene.level_text();
        let gap = width.saturating_sub(score.chars().count() + level.chars().count());
        let line = format!("{}{}{}", score, " ".repeat(gap), level);

        let y = self.origin.1 + grid.height();
        for (i, ch) in line.chars().take(width).enumerate() {
            self.print_at((self.origin.0 + i as u16, y), Cell { ch, color: TEXT_COLOR })?;
        }
        Ok(())
    }

    fn to_screen(&self, pos: GridPosition) -> Coords {
        (self.origin.0 + pos.x * self.scale, self.origin.1 + pos.y)
    }

    fn screen_cell(&self, pos: Coords) -> Option<Cell> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return None;
        }
        Some(self.screen[self.width as usize * pos.1 as usize + pos.0 as usize])
    }

    fn print_at(&mut self, pos: Coords, cell: Cell) -> Result<()> {
        if self.screen_cell(pos) == Some(cell) {
            return Ok(());
        }
        self.print_at_no_save(pos, cell.ch, cell.color)?;
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = cell;
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char, color: Color) -> Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::SetForegroundColor(color), style::Print(ch))?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Message {
    pub fn new(width: u16, height: u16, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }
}

fn glyph(costume: Costume) -> Cell {
    let (ch, color) = match costume {
        Costume::MazeCell => ('█', Color::DarkGrey),
        Costume::Donut { value } if value >= 12 => ('@', Color::Cyan),
        Costume::Donut { value } if value >= 9 => ('O', Color::Magenta),
        Costume::Donut { .. } => ('o', Color::Yellow),
        Costume::Segment(player) => ('▓', player_color(player)),
        Costume::Head(player, dir) => (head_char(dir), player_color(player)),
    };
    Cell { ch, color }
}

fn is_solid(ch: char) -> bool {
    matches!(ch, '█' | '▓')
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Blue,
        Player::Two => Color::Red,
    }
}

fn head_char(direction: Direction) -> char {
    match direction {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}
