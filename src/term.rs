use crate::TermInt;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use log::warn;

/// The small fixed palette glyphs are drawn with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Style {
    Plain,
    Border,
    Body,
    Head,
    Food,
    Banner,
}

impl Style {
    fn color(self) -> Option<Color> {
        match self {
            Style::Border => Some(Color::Cyan),
            Style::Body => Some(Color::Green),
            Style::Head => Some(Color::Yellow),
            Style::Food => Some(Color::Red),
            Style::Plain | Style::Banner => None,
        }
    }

    fn bold(self) -> bool {
        matches!(self, Style::Food | Style::Banner)
    }
}

/// An addressable character grid. Nothing is guaranteed visible until `flush`.
pub trait Surface {
    fn put(&mut self, col: TermInt, row: TermInt, ch: char, style: Style) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    fn put_str(&mut self, col: TermInt, row: TermInt, text: &str, style: Style) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as TermInt, row, ch, style)?;
        }
        Ok(())
    }
}

pub struct TermManager {
    stdout: Stdout,
    colors: bool,
}

impl TermManager {
    pub fn new(colors: bool) -> Self {
        TermManager { stdout: stdout(), colors }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("failed to hide cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking)
            .context("failed to show cursor")?;
        execute!(self.stdout, LeaveAlternateScreen).context("failed to leave alternate screen")?;
        Ok(())
    }

    /// Logs a warning when the terminal cannot show `cols` x `rows`.
    pub fn check_size(&self, cols: TermInt, rows: TermInt) -> Result<()> {
        let (width, height) = terminal::size().context("failed to read terminal size")?;
        if width < cols || height < rows {
            warn!("terminal is {}x{}, the field needs {}x{}", width, height, cols, rows);
        }
        Ok(())
    }

    /// Returns immediately with `None` when no key is waiting.
    pub fn poll_key(&self) -> Result<Option<KeyEvent>> {
        while poll(Duration::from_millis(0)).context("failed to poll input")? {
            if let Event::Key(ev) = read().context("failed to read input")? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("failed to read input")? {
                return Ok(ev);
            }
        }
    }
}

impl Surface for TermManager {
    fn put(&mut self, col: TermInt, row: TermInt, ch: char, style: Style) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(col, row))?;

        match style.color() {
            Some(color) if self.colors => queue!(self.stdout, SetForegroundColor(color))?,
            _ => {}
        }
        if style.bold() {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }

        queue!(self.stdout, Print(ch), SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("failed to clear screen")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("failed to flush terminal")?;
        Ok(())
    }
}
