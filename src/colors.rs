use crate::shader::CellOutput;
use crate::terminal::Cell;
use crossterm::event::KeyCode;
use crossterm::style::Color;

/// Scheme that leaves the shader's own white-on-black output untouched
pub const MONO: u8 = 7;

/// Four intensity steps per scheme, dim to bright
const SCHEMES: [[Color; 4]; 10] = [
    [Color::DarkGreen, Color::Green, Color::Green, Color::AnsiValue(10)],        // 0 matrix
    [Color::DarkRed, Color::Red, Color::DarkYellow, Color::Yellow],              // 1 fire
    [Color::DarkBlue, Color::Blue, Color::Cyan, Color::Cyan],                    // 2 ice
    [Color::DarkMagenta, Color::Magenta, Color::Magenta, Color::AnsiValue(13)],  // 3 pink
    [Color::DarkYellow, Color::Yellow, Color::Yellow, Color::AnsiValue(11)],     // 4 gold
    [Color::DarkCyan, Color::Cyan, Color::Cyan, Color::AnsiValue(14)],           // 5 electric
    [Color::DarkRed, Color::Red, Color::Magenta, Color::AnsiValue(9)],           // 6 lava
    [Color::DarkGrey, Color::Grey, Color::White, Color::White],                  // 7 mono
    [Color::Red, Color::Yellow, Color::Green, Color::Cyan],                      // 8 rainbow
    [Color::DarkBlue, Color::Blue, Color::Magenta, Color::AnsiValue(13)],        // 9 neon
];

/// Color scheme selected at runtime
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorState {
    pub scheme: u8,
}

impl ColorState {
    pub fn new(default_scheme: u8) -> Self {
        Self { scheme: default_scheme.min(9) }
    }

    /// Shift+digit picks a scheme. Returns true if the key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let scheme = match code {
            KeyCode::Char(')') => 0,
            KeyCode::Char('!') => 1,
            KeyCode::Char('@') => 2,
            KeyCode::Char('#') => 3,
            KeyCode::Char('$') => 4,
            KeyCode::Char('%') => 5,
            KeyCode::Char('^') => 6,
            KeyCode::Char('&') => 7,
            KeyCode::Char('*') => 8,
            KeyCode::Char('(') => 9,
            _ => return false,
        };
        self.scheme = scheme;
        true
    }

    pub fn is_mono(&self) -> bool {
        self.scheme == MONO
    }

    /// Terminal cell for a shader result. Mono keeps the shader's colors;
    /// other schemes color by weight tier.
    pub fn tint(&self, out: &CellOutput) -> Cell {
        let fg = if self.is_mono() {
            out.fg
        } else {
            SCHEMES[self.scheme as usize % SCHEMES.len()][out.weight.tier() as usize]
        };
        Cell {
            ch: out.ch,
            fg: Some(fg),
            bg: Some(out.bg),
            bold: out.weight.is_bold(),
        }
    }
}
