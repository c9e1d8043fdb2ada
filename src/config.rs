use clap::ValueEnum;
use serde::Deserialize;

/// Default target frame rate
pub const DEFAULT_FPS: u32 = 50;
/// Typical terminal cell: twice as tall as it is wide
pub const DEFAULT_ASPECT: f64 = 0.5;
/// Mono keeps the white-on-black look
pub const DEFAULT_SCHEME: u8 = 7;

/// Named effect presets
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectMode {
    Flame,       // Eyes over doom-style flames
    Plasma,      // Plasma alone
    PlasmaEyes,  // Eyes over plasma
    Eyes,        // Eyes on a blank screen
}

/// Effect toggles. Fixed for the lifetime of a shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectConfig {
    pub flame: bool,
    pub plasma: bool,
    pub eyes_on_plasma: bool,
    pub fps: u32,
}

impl EffectConfig {
    pub fn from_mode(mode: EffectMode) -> Self {
        let (flame, plasma, eyes_on_plasma) = match mode {
            EffectMode::Flame => (true, false, false),
            EffectMode::Plasma => (false, true, false),
            EffectMode::PlasmaEyes => (false, true, true),
            EffectMode::Eyes => (false, false, false),
        };
        Self { flame, plasma, eyes_on_plasma, fps: DEFAULT_FPS }
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.clamp(1, 240);
        self
    }

    /// Preset these toggles render as. Plasma wins over flame.
    pub fn mode(&self) -> EffectMode {
        match (self.plasma, self.eyes_on_plasma, self.flame) {
            (true, true, _) => EffectMode::PlasmaEyes,
            (true, false, _) => EffectMode::Plasma,
            (false, _, true) => EffectMode::Flame,
            (false, _, false) => EffectMode::Eyes,
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::from_mode(EffectMode::PlasmaEyes)
    }
}

/// Configuration for interactive playback
#[derive(Clone)]
pub struct PlayConfig {
    pub effect: EffectConfig,
    pub aspect: f64,
    pub seed: Option<u64>,
    pub scheme: u8,
}

/// Configuration for rendering one frame to stdout
#[derive(Clone)]
pub struct FrameConfig {
    pub effect: EffectConfig,
    pub cols: usize,
    pub rows: usize,
    pub time_ms: f64,
    pub aspect: f64,
    pub seed: Option<u64>,
    pub warmup: u32,
    pub plain: bool,
    pub scheme: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_round_trip_through_toggles() {
        for mode in [EffectMode::Flame, EffectMode::Plasma, EffectMode::PlasmaEyes, EffectMode::Eyes] {
            assert_eq!(EffectConfig::from_mode(mode).mode(), mode);
        }
    }

    #[test]
    fn default_is_eyes_over_plasma_at_fifty_fps() {
        let c = EffectConfig::default();
        assert!(c.plasma && c.eyes_on_plasma && !c.flame);
        assert_eq!(c.fps, 50);
    }

    #[test]
    fn fps_is_clamped() {
        assert_eq!(EffectConfig::default().with_fps(0).fps, 1);
        assert_eq!(EffectConfig::default().with_fps(1000).fps, 240);
        assert_eq!(EffectConfig::default().with_fps(30).fps, 30);
    }
}
