use super::pollable::{DecryptAnimation, PollableState};
use super::style::GlyphTheme;
use crate::decrypt::{DecryptFrame, TriggerEvent};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::info;
use std::io::{self, Write};
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const HELP: &str = "q: quit  r: replay  ↑/↓ PgUp/PgDn wheel: scroll  hover the text to decrypt it";

/// Where the text sits on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLayout {
    /// Rows of content above the text.
    pub offset: u16,
    /// Rows scrolled past.
    pub scroll: u16,
    /// Terminal columns.
    pub columns: u16,
    /// Rows available for content.
    pub rows: u16,
    /// Display width of the text.
    pub width: u16,
}

impl TextLayout {
    /// The number of terminal lines the text wraps into.
    pub fn lines(&self) -> u16 {
        if self.columns == 0 {
            return 1;
        }
        self.width.div_ceil(self.columns).max(1)
    }

    /// The screen row the text starts at, which may be above the screen.
    pub fn top(&self) -> i32 {
        self.offset as i32 - self.scroll as i32
    }

    pub fn start_column(&self) -> u16 {
        if self.width >= self.columns { 0 } else { (self.columns - self.width) / 2 }
    }

    /// The fraction of the text's lines inside the viewport.
    pub fn intersection_ratio(&self) -> f64 {
        let top = self.top();
        let lines = self.lines() as i32;
        let visible = (top..top + lines).filter(|row| *row >= 0 && *row < self.rows as i32).count();
        visible as f64 / lines as f64
    }

    /// Whether a screen cell is covered by the text.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let row = row as i32;
        let top = self.top();
        if row >= self.rows as i32 || row < top || row >= top + self.lines() as i32 {
            return false;
        }
        if self.lines() == 1 {
            let start = self.start_column();
            column >= start && column < start + self.width
        } else {
            column < self.columns
        }
    }

    /// The furthest the content can be scrolled.
    pub fn max_scroll(&self) -> u16 {
        self.offset
    }
}

/// Display width of a frame, in terminal cells.
pub fn frame_width(frame: &DecryptFrame) -> u16 {
    let width: usize = frame.glyphs().iter().map(|glyph| glyph.ch.width().unwrap_or(0)).sum();
    width.min(u16::MAX as usize) as u16
}

/// Run `enter`, calling `undo` if it fails.
fn enter_or_undo<E, U>(enter: E, undo: U) -> io::Result<()>
where
    E: FnOnce() -> io::Result<()>,
    U: FnOnce() -> io::Result<()>,
{
    if let Err(e) = enter() {
        let _ = undo();
        return Err(e);
    }
    Ok(())
}

/// Plays a decrypt animation on the terminal until the user quits.
pub struct TerminalPlayer {
    animation: DecryptAnimation,
    theme: GlyphTheme,
    offset: u16,
    scroll: u16,
    hovering: bool,
}

impl TerminalPlayer {
    pub fn new(animation: DecryptAnimation, theme: GlyphTheme, offset: u16) -> Self {
        Self { animation, theme, offset, scroll: 0, hovering: false }
    }

    pub fn run(mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        enter_or_undo(
            || execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide),
            terminal::disable_raw_mode,
        )?;
        info!("starting player");

        let result = self.event_loop(&mut stdout);

        self.animation.unmount();
        execute!(stdout, ResetColor, Show, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        info!("player stopped");
        result
    }

    fn event_loop<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let mut pollable = self.animation.pollable();
        self.observe_visibility()?;
        self.draw(out)?;
        loop {
            let mut redraw = false;
            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('r') => redraw = self.replay()?,
                        KeyCode::Up => redraw = self.scroll_by(-1)?,
                        KeyCode::Down => redraw = self.scroll_by(1)?,
                        KeyCode::PageUp => redraw = self.scroll_by(-10)?,
                        KeyCode::PageDown => redraw = self.scroll_by(10)?,
                        _ => (),
                    },
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::ScrollUp => redraw = self.scroll_by(-1)?,
                        MouseEventKind::ScrollDown => redraw = self.scroll_by(1)?,
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            redraw = self.pointer_moved(mouse.column, mouse.row)?;
                        }
                        _ => (),
                    },
                    Event::Resize(..) => {
                        self.observe_visibility()?;
                        redraw = true;
                    }
                    _ => (),
                }
            }
            match pollable.poll() {
                PollableState::Modified => redraw = true,
                PollableState::Done => return Ok(()),
                PollableState::Unmodified => (),
            }
            if redraw {
                self.draw(out)?;
            }
        }
    }

    fn layout(&self) -> io::Result<TextLayout> {
        let (columns, rows) = terminal::size()?;
        let width = frame_width(&self.animation.frame());
        // The last row holds the help line.
        Ok(TextLayout { offset: self.offset, scroll: self.scroll, columns, rows: rows.saturating_sub(1), width })
    }

    fn scroll_by(&mut self, delta: i32) -> io::Result<bool> {
        let max_scroll = self.layout()?.max_scroll() as i32;
        let scroll = (self.scroll as i32 + delta).clamp(0, max_scroll) as u16;
        if scroll == self.scroll {
            return Ok(false);
        }
        self.scroll = scroll;
        self.observe_visibility()?;
        Ok(true)
    }

    fn replay(&mut self) -> io::Result<bool> {
        info!("replaying animation");
        self.animation.reset_trigger();
        self.hovering = false;
        self.observe_visibility()?;
        Ok(true)
    }

    fn observe_visibility(&mut self) -> io::Result<bool> {
        let ratio = self.layout()?.intersection_ratio();
        Ok(self.animation.handle(TriggerEvent::Intersection(ratio)))
    }

    fn pointer_moved(&mut self, column: u16, row: u16) -> io::Result<bool> {
        let inside = self.layout()?.contains(column, row);
        if inside == self.hovering {
            return Ok(false);
        }
        self.hovering = inside;
        let event = if inside { TriggerEvent::PointerEnter } else { TriggerEvent::PointerLeave };
        Ok(self.animation.handle(event))
    }

    fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let layout = self.layout()?;
        let frame = self.animation.frame();
        queue!(out, Clear(ClearType::All))?;

        let mut row = layout.top();
        let mut column = layout.start_column();
        let mut moved = false;
        for glyph in frame.glyphs() {
            let width = glyph.ch.width().unwrap_or(0) as u16;
            if column + width > layout.columns && column > 0 {
                row += 1;
                column = 0;
                moved = false;
            }
            if row >= 0 && row < layout.rows as i32 {
                if !moved {
                    queue!(out, MoveTo(column, row as u16))?;
                    moved = true;
                }
                queue!(out, SetForegroundColor(self.theme.color(glyph.state).into()), Print(glyph.ch))?;
            } else {
                moved = false;
            }
            column += width;
        }

        queue!(out, ResetColor, MoveTo(0, layout.rows), Print(HELP))?;
        out.flush()
    }
}
