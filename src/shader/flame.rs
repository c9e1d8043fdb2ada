//! Doom-style flame grid: embers along the floor drift upward and cool

use super::math::map_range;
use super::noise::ValueNoise;
use super::{CellOutput, CursorState, FontWeight, FrameContext};
use rand::prelude::*;
use std::ops::RangeInclusive;

/// Glyph ramp from dimmest to brightest
pub const RAMP: [char; 26] = [
    '.', '.', '.', ':', ':', '/', '\\', '/', '\\', '/', '\\', '+', '=', '*', 'a', 'b', 'c', 'd',
    'e', 'f', '0', '1', 'X', 'Y', 'Z', '#',
];

/// Floor targets are mapped from noise into this range
const FLOOR_MIN: f64 = 5.0;
const FLOOR_MAX: f64 = 40.0;
/// Largest rise of a floor cell per frame
const FLOOR_CLIMB: u32 = 2;
const NOISE_X_SCALE: f64 = 0.05;
const NOISE_T_SCALE: f64 = 0.0015;
/// Heat dropped by a pressed pointer
const INJECT_HEAT: RangeInclusive<u32> = 5..=50;
const MAX_DECAY: u32 = 2;
/// Cells hotter than this draw bold
const BOLD_ABOVE: u32 = 20;

/// Row-major heat grid with a scratch buffer for propagation
#[derive(Default)]
pub struct FlameGrid {
    cols: usize,
    rows: usize,
    cells: Vec<u32>,
    scratch: Vec<u32>,
}

impl FlameGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[cfg(test)]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Heat at a cell, 0 outside the grid
    pub fn get(&self, x: usize, y: usize) -> u32 {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x]
        } else {
            0
        }
    }

    #[cfg(test)]
    pub fn bottom_row(&self) -> &[u32] {
        let start = self.cols * self.rows.saturating_sub(1);
        &self.cells[start..]
    }

    /// Match the grid to `cols` x `rows`, zeroing everything on a change.
    /// Returns true when a reset happened.
    pub fn resize(&mut self, cols: usize, rows: usize) -> bool {
        if cols == self.cols && rows == self.rows {
            return false;
        }
        tracing::debug!(cols, rows, old_cols = self.cols, old_rows = self.rows, "flame grid reset");
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![0; cols * rows];
        self.scratch = vec![0; cols * rows];
        true
    }

    /// Raise the bottom row toward a noise-driven target, at most
    /// `FLOOR_CLIMB` per frame
    pub fn seed_floor(&mut self, noise: &ValueNoise, time_ms: f64) {
        let t = time_ms * NOISE_T_SCALE;
        let last = self.cols * (self.rows - 1);
        for (i, cell) in self.cells[last..].iter_mut().enumerate() {
            let target = map_range(noise.sample(i as f64 * NOISE_X_SCALE, t), 0.0, 1.0, FLOOR_MIN, FLOOR_MAX)
                .floor()
                .max(0.0) as u32;
            *cell = target.min(*cell + FLOOR_CLIMB);
        }
    }

    /// Drop a random burst of heat under a pressed pointer
    pub fn inject<R: Rng>(&mut self, cursor: &CursorState, rng: &mut R) {
        if !cursor.pressed {
            return;
        }
        let (cx, cy) = (cursor.x.floor(), cursor.y.floor());
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f64 || cy >= self.rows as f64 {
            tracing::trace!(x = cursor.x, y = cursor.y, "pointer outside flame grid");
            return;
        }
        let heat = rng.gen_range(INJECT_HEAT);
        tracing::trace!(x = cx, y = cy, heat, "flame injection");
        self.cells[cy as usize * self.cols + cx as usize] = heat;
    }

    /// Move every cell's heat up one row with random sideways drift and
    /// cooling. Reads only the previous snapshot.
    pub fn propagate<R: Rng>(&mut self, rng: &mut R) {
        let (cols, rows) = (self.cols, self.rows);
        for row in 0..rows {
            let src_row = (row + 1).min(rows - 1);
            for col in 0..cols {
                let drift: isize = rng.gen_range(-1..=1);
                let src_col = (col as isize + drift).clamp(0, cols as isize - 1) as usize;
                let decay = rng.gen_range(0..=MAX_DECAY);
                self.scratch[row * cols + col] =
                    self.cells[src_row * cols + src_col].saturating_sub(decay);
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
    }

    /// One frame: resize if needed, seed the floor, inject, propagate
    pub fn update<R: Rng>(
        &mut self,
        ctx: &FrameContext,
        cursor: &CursorState,
        noise: &ValueNoise,
        rng: &mut R,
    ) {
        assert!(ctx.cols > 0 && ctx.rows > 0, "flame grid needs a non-empty frame");
        self.resize(ctx.cols, ctx.rows);
        self.seed_floor(noise, ctx.time_ms);
        self.inject(cursor, rng);
        self.propagate(rng);
    }

    /// Glyph for a cell, `None` where there is no heat
    pub fn glyph(&self, x: usize, y: usize) -> Option<CellOutput> {
        glyph_for(self.get(x, y))
    }
}

pub fn glyph_for(heat: u32) -> Option<CellOutput> {
    if heat == 0 {
        return None;
    }
    let idx = (heat as usize).min(RAMP.len() - 1);
    let weight = if heat > BOLD_ABOVE { FontWeight::BOLD } else { FontWeight::THIN };
    Some(CellOutput::mono(RAMP[idx], weight))
}
