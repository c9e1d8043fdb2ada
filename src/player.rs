//! Frame loop that drives the shader on a real terminal

use crate::colors::ColorState;
use crate::config::{FrameConfig, PlayConfig};
use crate::shader::{Coord, CursorState, FrameContext, Shader};
use crate::terminal::Terminal;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rand::prelude::*;
use std::io;
use std::time::{Duration, Instant};

const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 240;

/// Runtime state for interactive controls
pub struct PlayerState {
    pub fps: u32,
    pub paused: bool,
    pub colors: ColorState,
}

impl PlayerState {
    pub fn new(fps: u32, scheme: u8) -> Self {
        Self {
            fps: fps.clamp(MIN_FPS, MAX_FPS),
            paused: false,
            colors: ColorState::new(scheme),
        }
    }

    /// Handle keypress, returns true if should quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.colors.handle_key(code) {
            return false;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.fps = (self.fps + 5).min(MAX_FPS);
            }
            KeyCode::Char('-') => {
                self.fps = self.fps.saturating_sub(5).max(MIN_FPS);
            }
            _ => {}
        }
        false
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}

/// Animation time that stands still while paused
#[derive(Default)]
pub struct Clock {
    elapsed: Duration,
}

impl Clock {
    pub fn advance(&mut self, dt: Duration, paused: bool) {
        if !paused {
            self.elapsed += dt;
        }
    }

    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Track the pointer; only the left button counts as pressed
pub fn apply_mouse(cursor: &mut CursorState, event: &MouseEvent) {
    cursor.x = event.column as f64;
    cursor.y = event.row as f64;
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            cursor.pressed = true;
        }
        MouseEventKind::Up(MouseButton::Left) => cursor.pressed = false,
        _ => {}
    }
}

fn shader_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Run every cell of one frame through the shader into the back buffer
pub fn render_into(
    term: &mut Terminal,
    shader: &Shader,
    ctx: &FrameContext,
    cursor: &CursorState,
    colors: &ColorState,
) {
    for y in 0..ctx.rows {
        for x in 0..ctx.cols {
            let out = shader.cell(Coord::new(x, y), ctx, cursor);
            term.set(x as i32, y as i32, colors.tint(&out));
        }
    }
}

/// Run the interactive animation until the user quits
pub fn run(config: PlayConfig) -> io::Result<()> {
    let mut shader = Shader::new(config.effect, shader_rng(config.seed));
    let mut state = PlayerState::new(config.effect.fps, config.scheme);
    let mut cursor = CursorState::default();
    let mut clock = Clock::default();

    let mut term = Terminal::new()?;
    let (mut w, mut h) = term.size();
    term.clear_screen()?;

    tracing::info!(
        mode = ?config.effect.mode(),
        fps = state.fps,
        seed = ?config.seed,
        cols = w,
        rows = h,
        "starting playback"
    );

    let mut last = Instant::now();
    loop {
        let frame_start = Instant::now();
        clock.advance(frame_start - last, state.paused);
        last = frame_start;

        let (new_w, new_h) = crossterm::terminal::size().unwrap_or((w, h));
        if new_w != w || new_h != h {
            tracing::debug!(
                cols = new_w,
                rows = new_h,
                flame = ?shader.flame().dims(),
                "terminal resized"
            );
            w = new_w;
            h = new_h;
            term.resize(w, h);
            term.clear_screen()?;
        }

        while let Some(event) = term.poll_event()? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if state.handle_key(key.code, key.modifiers) {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => apply_mouse(&mut cursor, &mouse),
                _ => {}
            }
        }

        if w > 0 && h > 0 {
            let ctx = FrameContext {
                cols: w as usize,
                rows: h as usize,
                time_ms: clock.millis(),
                aspect: config.aspect,
            };
            if state.paused {
                shader.sync(&ctx);
            } else {
                shader.pre(&ctx, &cursor);
            }
            render_into(&mut term, &shader, &ctx, &cursor, &state.colors);
            term.present()?;
        }

        let spent = frame_start.elapsed();
        if let Some(rest) = state.frame_duration().checked_sub(spent) {
            term.sleep(rest);
        }
    }
}

/// Render one frame at a fixed time and print it
pub fn print_frame(config: FrameConfig) -> io::Result<()> {
    let mut shader = Shader::new(config.effect, shader_rng(config.seed));
    let cursor = CursorState::default();
    let colors = ColorState::new(config.scheme);
    let frame_ms = 1000.0 / config.effect.fps as f64;

    let mut ctx = FrameContext {
        cols: config.cols,
        rows: config.rows,
        time_ms: config.time_ms,
        aspect: config.aspect,
    };

    // Flames need history; replay the frames leading up to the requested time
    for step in (1..=config.warmup).rev() {
        ctx.time_ms = (config.time_ms - step as f64 * frame_ms).max(0.0);
        shader.pre(&ctx, &cursor);
    }
    ctx.time_ms = config.time_ms;
    shader.pre(&ctx, &cursor);

    let mut term = Terminal::headless(config.cols as u16, config.rows as u16);
    render_into(&mut term, &shader, &ctx, &cursor, &colors);
    term.print_to_stdout(config.plain)
}
