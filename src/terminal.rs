use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    interactive: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Take over the screen: raw mode, alternate screen, mouse capture
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        leave_raw_on_error(execute!(stdout(), EnterAlternateScreen, Hide, EnableMouseCapture))?;

        Ok(Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
            interactive: true,
        })
    }

    /// Off-screen buffer of a fixed size (for printing a single frame)
    pub fn headless(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
            interactive: false,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Resize the back buffer, dropping its contents
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a cell; out-of-range positions are ignored
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = cell;
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer.get(y as usize)?.get(x as usize)
    }

    /// Draw the back buffer, emitting style changes only when they differ
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout();
        let mut style: Option<(Option<Color>, Option<Color>, bool)> = None;

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;
            for cell in row {
                let wanted = (cell.fg, cell.bg, cell.bold);
                if style != Some(wanted) {
                    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                    if cell.bold {
                        queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    if let Some(fg) = cell.fg {
                        queue!(out, SetForegroundColor(fg))?;
                    }
                    if let Some(bg) = cell.bg {
                        queue!(out, SetBackgroundColor(bg))?;
                    }
                    style = Some(wanted);
                }
                queue!(out, Print(cell.ch))?;
            }
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()
    }

    /// Next pending input event, without blocking
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        if poll(Duration::from_millis(0))? {
            return Ok(Some(read()?));
        }
        Ok(None)
    }

    /// Sleep for specified duration
    pub fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    /// Buffer as text lines, with ANSI styling unless `plain`
    pub fn to_lines(&self, plain: bool) -> Vec<String> {
        self.buffer
            .iter()
            .map(|row| {
                let mut line = String::new();
                for cell in row {
                    if plain || cell.ch == ' ' {
                        line.push(cell.ch);
                        continue;
                    }
                    if cell.bold {
                        line.push_str("\x1b[1m");
                    }
                    if let Some(color) = cell.fg {
                        line.push_str(&ansi_fg(color));
                    }
                    line.push(cell.ch);
                    line.push_str("\x1b[0m");
                }
                line
            })
            .collect()
    }

    /// Print buffer to stdout (for the single-frame mode)
    pub fn print_to_stdout(&self, plain: bool) -> io::Result<()> {
        let mut out = stdout().lock();
        for line in self.to_lines(plain) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.interactive {
            let _ = execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

/// Raw mode is already on when screen setup runs; undo it if setup fails
fn leave_raw_on_error(result: io::Result<()>) -> io::Result<()> {
    if result.is_err() {
        let _ = disable_raw_mode();
    }
    result
}

fn ansi_fg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("\x1b[38;2;{};{};{}m", r, g, b),
        Color::AnsiValue(v) => format!("\x1b[38;5;{}m", v),
        // Standard colors (0-7)
        Color::Black => "\x1b[30m".into(),
        Color::DarkRed => "\x1b[31m".into(),
        Color::DarkGreen => "\x1b[32m".into(),
        Color::DarkYellow => "\x1b[33m".into(),
        Color::DarkBlue => "\x1b[34m".into(),
        Color::DarkMagenta => "\x1b[35m".into(),
        Color::DarkCyan => "\x1b[36m".into(),
        Color::Grey => "\x1b[37m".into(),
        // Bright colors (8-15)
        Color::DarkGrey => "\x1b[90m".into(),
        Color::Red => "\x1b[91m".into(),
        Color::Green => "\x1b[92m".into(),
        Color::Yellow => "\x1b[93m".into(),
        Color::Blue => "\x1b[94m".into(),
        Color::Magenta => "\x1b[95m".into(),
        Color::Cyan => "\x1b[96m".into(),
        Color::White => "\x1b[97m".into(),
        _ => String::new(),
    }
}
