//! Tone calibration: warmth and structure sliders mapped to a behavioral
//! quadrant.
//!
//! Pure logic. Slider values are clamped into [`MIN_LEVEL`]..=[`MAX_LEVEL`]
//! when constructed, so [`classify`] never sees an out-of-range input.

use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u8 = 0;
pub const MAX_LEVEL: u8 = 100;

/// Level at which a slider counts as "high". Inclusive.
pub const QUADRANT_THRESHOLD: u8 = 50;

/// Slider position used for a fresh draft.
pub const DEFAULT_LEVEL: u8 = 70;

// ---------------------------------------------------------------------------
// ToneLevel
// ---------------------------------------------------------------------------

/// A warmth or structure slider value, always within 0..=100.
///
/// Deserializes from any integer and clamps, so out-of-range client input is
/// corrected rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct ToneLevel(u8);

impl ToneLevel {
    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_high(self) -> bool {
        self.0 >= QUADRANT_THRESHOLD
    }
}

impl Default for ToneLevel {
    fn default() -> Self {
        Self(DEFAULT_LEVEL)
    }
}

impl From<i64> for ToneLevel {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<ToneLevel> for i64 {
    fn from(level: ToneLevel) -> Self {
        i64::from(level.0)
    }
}

// ---------------------------------------------------------------------------
// Quadrants
// ---------------------------------------------------------------------------

/// One of the four behavioral postures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// High warmth, high structure.
    Demanding,
    /// High warmth, low structure.
    Enabling,
    /// Low warmth, high structure.
    Dominating,
    /// Low warmth, low structure.
    Neglecting,
}

impl Quadrant {
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::Demanding => "Demanding (Ideal)",
            Quadrant::Enabling => "Enabling",
            Quadrant::Dominating => "Dominating",
            Quadrant::Neglecting => "Neglecting",
        }
    }

    /// Display color token. UI-only; nothing else should branch on it.
    pub fn color(self) -> &'static str {
        match self {
            Quadrant::Demanding => "#2D8B5A",
            Quadrant::Enabling => "#D4A84B",
            Quadrant::Dominating => "#C65D4A",
            Quadrant::Neglecting => "#7A7A7A",
        }
    }
}

/// Result of [`classify`]: the quadrant plus its display pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneClassification {
    pub quadrant: Quadrant,
    pub label: &'static str,
    pub color: &'static str,
}

/// Map a warmth/structure pair to its quadrant.
pub fn classify(warmth: ToneLevel, structure: ToneLevel) -> ToneClassification {
    let quadrant = match (warmth.is_high(), structure.is_high()) {
        (true, true) => Quadrant::Demanding,
        (true, false) => Quadrant::Enabling,
        (false, true) => Quadrant::Dominating,
        (false, false) => Quadrant::Neglecting,
    };
    ToneClassification {
        quadrant,
        label: quadrant.label(),
        color: quadrant.color(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
