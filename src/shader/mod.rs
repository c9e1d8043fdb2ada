//! Per-cell eye shader.
//!
//! The host calls [`Shader::pre`] once per frame and then [`Shader::cell`]
//! for every grid cell, in any order. `pre` is the only writer (it advances
//! the flame grid); `cell` borrows the shader immutably.

pub mod blink;
pub mod eye;
pub mod flame;
pub mod math;
pub mod motion;
pub mod noise;
pub mod plasma;

use crate::config::EffectConfig;
use crossterm::style::Color;
use eye::{EyePair, Gaze};
use flame::FlameGrid;
use math::Vec2;
use motion::{resolve_cycle_from, CycleSpan};
use noise::ValueNoise;
use rand::rngs::StdRng;

/// Glyph drawn inside an open eye
pub const EYE_GLYPH: char = '*';

/// Eye bases over plasma sit closer together than over flames
const PLASMA_SPREAD: f64 = 0.5;
const WIDE_SPREAD: f64 = 0.8;

/// Column / row of one grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Per-frame input from the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub cols: usize,
    pub rows: usize,
    /// Milliseconds since the animation started
    pub time_ms: f64,
    /// Width / height of one character cell
    pub aspect: f64,
}

impl FrameContext {
    pub fn seconds(&self) -> f64 {
        self.time_ms / 1000.0
    }

    /// Center-origin coordinates: the shorter grid side spans [-1, 1],
    /// x is scaled by the cell aspect so circles stay round
    pub fn normalize(&self, coord: Coord) -> Vec2 {
        let m = self.cols.min(self.rows) as f64;
        Vec2::new(
            2.0 * (coord.x as f64 - self.cols as f64 / 2.0) / m * self.aspect,
            2.0 * (coord.y as f64 - self.rows as f64 / 2.0) / m,
        )
    }
}

/// Pointer position in cell units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    pub x: f64,
    pub y: f64,
    pub pressed: bool,
}

/// CSS-style numeric font weight
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const HEAVY: FontWeight = FontWeight(800);

    pub fn is_bold(self) -> bool {
        self >= Self::BOLD
    }

    /// Weight tier 0..=3, used for tinting
    pub fn tier(self) -> u8 {
        match self.0 {
            0..=199 => 0,
            200..=499 => 1,
            500..=749 => 2,
            _ => 3,
        }
    }
}

/// What one cell shows this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellOutput {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub weight: FontWeight,
}

impl CellOutput {
    /// White on black, for a monochrome display
    pub fn mono(ch: char, weight: FontWeight) -> Self {
        Self {
            ch,
            fg: Color::White,
            bg: Color::Black,
            weight,
        }
    }

    pub fn blank() -> Self {
        Self::mono(' ', FontWeight::NORMAL)
    }

    pub fn eye() -> Self {
        Self::mono(EYE_GLYPH, FontWeight::HEAVY)
    }
}

pub struct Shader {
    config: EffectConfig,
    noise: ValueNoise,
    flame: FlameGrid,
    /// Jitter for flame propagation and injection
    rng: StdRng,
    /// Last cycle resolved by `pre`; only speeds up the cycle scan
    cycle_hint: CycleSpan,
}

impl Shader {
    pub fn new(config: EffectConfig, mut rng: StdRng) -> Self {
        let noise = ValueNoise::new(&mut rng);
        Self {
            config,
            noise,
            flame: FlameGrid::new(),
            rng,
            cycle_hint: CycleSpan::ZERO,
        }
    }

    pub fn flame(&self) -> &FlameGrid {
        &self.flame
    }

    /// Pre-frame step: advance the flame grid (flame mode) and remember the
    /// current motion cycle
    pub fn pre(&mut self, ctx: &FrameContext, cursor: &CursorState) {
        if self.config.flame {
            self.flame.update(ctx, cursor, &self.noise, &mut self.rng);
        }
        self.cycle_hint = resolve_cycle_from(self.cycle_hint, ctx.seconds());
    }

    /// Keep the flame grid sized to the frame without advancing it, for
    /// frames that skip `pre`
    pub fn sync(&mut self, ctx: &FrameContext) {
        if self.config.flame {
            self.flame.resize(ctx.cols, ctx.rows);
        }
    }

    /// Gaze for this frame's time
    pub fn gaze(&self, ctx: &FrameContext) -> Gaze {
        Gaze::at(ctx.seconds(), self.cycle_hint)
    }

    /// Content of one cell. The cursor is accepted for symmetry with `pre`;
    /// pointer effects reach the output through the flame grid.
    pub fn cell(&self, coord: Coord, ctx: &FrameContext, _cursor: &CursorState) -> CellOutput {
        assert!(ctx.cols > 0 && ctx.rows > 0, "shader needs a non-empty frame");
        let st = ctx.normalize(coord);

        if self.config.plasma {
            let raw = Vec2::new(coord.x as f64, coord.y as f64);
            let eyes = EyePair::symmetric(PLASMA_SPREAD);
            if self.config.eyes_on_plasma && eyes.contains(st, &self.gaze(ctx)) {
                return CellOutput::eye();
            }
            return plasma::shade(raw, st, ctx.time_ms);
        }

        if EyePair::symmetric(WIDE_SPREAD).contains(st, &self.gaze(ctx)) {
            return CellOutput::eye();
        }

        if self.config.flame {
            if let Some(out) = self.flame.glyph(coord.x, coord.y) {
                return out;
            }
        }

        CellOutput::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectMode;
    use motion::{look_offset, random_offset, OFFSET_RANGE};
    use rand::SeedableRng;

    fn shader(mode: EffectMode) -> Shader {
        Shader::new(EffectConfig::from_mode(mode), StdRng::seed_from_u64(11))
    }

    fn frame(cols: usize, rows: usize, time_ms: f64) -> FrameContext {
        FrameContext { cols, rows, time_ms, aspect: 0.5 }
    }

    fn render(shader: &mut Shader, ctx: &FrameContext) -> Vec<CellOutput> {
        let cursor = CursorState::default();
        shader.pre(ctx, &cursor);
        let mut out = Vec::with_capacity(ctx.cols * ctx.rows);
        for y in 0..ctx.rows {
            for x in 0..ctx.cols {
                out.push(shader.cell(Coord::new(x, y), ctx, &cursor));
            }
        }
        out
    }

    fn count_eyes(cells: &[CellOutput]) -> usize {
        cells.iter().filter(|c| c.ch == EYE_GLYPH).count()
    }

    /// Cell whose normalized position is closest to `target`
    fn nearest_cell(ctx: &FrameContext, target: Vec2) -> Coord {
        let mut best = (Coord::new(0, 0), f64::MAX);
        for y in 0..ctx.rows {
            for x in 0..ctx.cols {
                let c = Coord::new(x, y);
                let d = (ctx.normalize(c) - target).length();
                if d < best.1 {
                    best = (c, d);
                }
            }
        }
        best.0
    }

    #[test]
    fn normalize_centers_the_grid() {
        let ctx = frame(40, 20, 0.0);
        assert_eq!(ctx.normalize(Coord::new(20, 10)), Vec2::new(0.0, 0.0));
        assert_eq!(ctx.normalize(Coord::new(0, 0)), Vec2::new(-1.0, -1.0));
        let wide = FrameContext { aspect: 1.0, ..ctx };
        assert_eq!(wide.normalize(Coord::new(0, 0)), Vec2::new(-2.0, -1.0));
    }

    #[test]
    fn plasma_with_eyes_at_time_zero() {
        let mut s = shader(EffectMode::PlasmaEyes);
        let ctx = frame(40, 20, 0.0);
        let cells = render(&mut s, &ctx);

        let offset = random_offset(0.0, OFFSET_RANGE);
        assert_eq!(s.gaze(&ctx).offset, offset);

        let gaze = s.gaze(&ctx);
        for y in 0..ctx.rows {
            for x in 0..ctx.cols {
                let c = Coord::new(x, y);
                let st = ctx.normalize(c);
                let got = cells[y * ctx.cols + x];
                if EyePair::symmetric(PLASMA_SPREAD).contains(st, &gaze) {
                    assert_eq!(got, CellOutput::eye());
                } else {
                    let raw = Vec2::new(x as f64, y as f64);
                    assert_eq!(got, plasma::shade(raw, st, 0.0));
                }
            }
        }

        // Both base positions (shifted by the shared offset) land inside an eye
        let right = Vec2::new(0.5, 0.0) + offset;
        let c = nearest_cell(&ctx, right);
        assert_eq!(cells[c.y * ctx.cols + c.x].ch, EYE_GLYPH);
        assert!(count_eyes(&cells) > 10);
    }

    #[test]
    fn eyes_reopen_one_window_after_a_blink() {
        let mut s = shader(EffectMode::PlasmaEyes);
        let open = count_eyes(&render(&mut s, &frame(40, 20, 0.0)));
        // A blink is scheduled at t = 0 in the first bucket
        let shut = count_eyes(&render(&mut s, &frame(40, 20, 75.0)));
        let after = frame(40, 20, 150.0);
        let reopened = render(&mut s, &after);

        assert!(shut < open);
        assert_eq!(s.gaze(&after).shape, eye::EyeShape::from_blink(0.0));
        assert_eq!(s.gaze(&after).offset, look_offset(0.15));
        assert!(count_eyes(&reopened) > shut);
    }

    #[test]
    fn plasma_only_never_draws_eyes() {
        let mut s = shader(EffectMode::Plasma);
        for &t in &[0.0, 1234.0, 98765.0] {
            let cells = render(&mut s, &frame(40, 20, t));
            assert_eq!(count_eyes(&cells), 0);
            assert!(cells.iter().all(|c| plasma::RAMP.contains(&c.ch)));
        }
        assert_eq!(s.flame().dims(), (0, 0));
    }

    #[test]
    fn bare_eyes_are_eye_or_blank() {
        let mut s = shader(EffectMode::Eyes);
        let cells = render(&mut s, &frame(80, 24, 2500.0));
        assert!(cells.iter().all(|c| *c == CellOutput::eye() || *c == CellOutput::blank()));
        assert!(count_eyes(&cells) > 0);
    }

    #[test]
    fn flame_mode_composites_eyes_over_flames() {
        let mut s = shader(EffectMode::Flame);
        let mut ctx = frame(80, 24, 0.0);
        let mut cells = Vec::new();
        for step in 0..80 {
            ctx.time_ms = step as f64 * 50.0;
            cells = render(&mut s, &ctx);
        }
        assert_eq!(s.flame().dims(), (80, 24));

        let gaze = s.gaze(&ctx);
        for y in 0..ctx.rows {
            for x in 0..ctx.cols {
                let got = cells[y * ctx.cols + x];
                let st = ctx.normalize(Coord::new(x, y));
                let expected = if EyePair::symmetric(WIDE_SPREAD).contains(st, &gaze) {
                    CellOutput::eye()
                } else {
                    s.flame().glyph(x, y).unwrap_or_else(CellOutput::blank)
                };
                assert_eq!(got, expected);
            }
        }
        let bottom = &cells[ctx.cols * (ctx.rows - 1)..];
        assert!(bottom.iter().any(|c| flame::RAMP.contains(&c.ch) && c.ch != EYE_GLYPH));
    }

    #[test]
    fn pressed_pointer_feeds_the_flame() {
        let mut s = shader(EffectMode::Flame);
        let ctx = frame(30, 12, 0.0);
        let cursor = CursorState { x: 3.0, y: 2.0, pressed: true };
        s.pre(&ctx, &cursor);
        // Above the seeded floor, only the neighbors right over the pointer
        // can have picked up the injected heat
        let near: u32 = (2..=4).map(|x| s.flame().get(x, 1)).sum();
        let above_floor: u32 = (0..ctx.rows - 2)
            .flat_map(|y| (0..ctx.cols).map(move |x| (x, y)))
            .map(|(x, y)| s.flame().get(x, y))
            .sum();
        assert_eq!(above_floor, near);
        assert!(near <= 3 * 50);
    }

    #[test]
    fn cells_are_order_independent() {
        let mut s = shader(EffectMode::Flame);
        let ctx = frame(20, 10, 500.0);
        let cursor = CursorState::default();
        s.pre(&ctx, &cursor);
        let forward: Vec<CellOutput> = (0..200)
            .map(|i| s.cell(Coord::new(i % 20, i / 20), &ctx, &cursor))
            .collect();
        let backward: Vec<CellOutput> = (0..200)
            .rev()
            .map(|i| s.cell(Coord::new(i % 20, i / 20), &ctx, &cursor))
            .collect();
        assert!(forward.iter().eq(backward.iter().rev()));
    }

    #[test]
    fn font_weight_tiers() {
        assert_eq!(FontWeight::THIN.tier(), 0);
        assert_eq!(FontWeight::NORMAL.tier(), 1);
        assert_eq!(FontWeight::BOLD.tier(), 3);
        assert!(FontWeight::HEAVY.is_bold());
        assert!(!FontWeight::NORMAL.is_bold());
    }

    #[test]
    fn sync_resets_flames_on_a_paused_resize() {
        let mut s = shader(EffectMode::Flame);
        for step in 0..60 {
            render(&mut s, &frame(20, 10, step as f64 * 50.0));
        }
        assert!(s.flame().cells().iter().any(|&h| h > 0));

        let ctx = frame(12, 6, 3000.0);
        s.sync(&ctx);
        assert_eq!(s.flame().dims(), (12, 6));
        assert!(s.flame().cells().iter().all(|&h| h == 0));

        let cursor = CursorState::default();
        for y in 0..ctx.rows {
            for x in 0..ctx.cols {
                let out = s.cell(Coord::new(x, y), &ctx, &cursor);
                assert_eq!(s.flame().get(x, y), 0);
                assert!(out == CellOutput::eye() || out == CellOutput::blank());
            }
        }

        // Same size again keeps the grid untouched
        s.sync(&ctx);
        assert_eq!(s.flame().dims(), (12, 6));
    }

    #[test]
    fn sync_leaves_other_modes_alone() {
        let mut s = shader(EffectMode::PlasmaEyes);
        s.sync(&frame(12, 6, 0.0));
        assert_eq!(s.flame().dims(), (0, 0));
    }
}
