use crate::error::{Result, check_strength};

/// Cut point for binarization
///
/// Pixels whose intensity is at or below the resolved level become black,
/// everything above becomes white.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Fractional strength in [0, 1], mapped to `round(strength * 255)`
    Strength(f64),
    /// Explicit intensity level
    Level(u8),
}

impl Threshold {
    /// Resolve to an integer intensity level
    ///
    /// Fails with `OutOfRange` for a strength outside [0, 1] or non-finite.
    pub fn level(self) -> Result<u8> {
        match self {
            Threshold::Strength(strength) => {
                let strength = check_strength("strength", strength)?;
                Ok((strength * 255.0).round() as u8)
            }
            Threshold::Level(level) => Ok(level),
        }
    }
}

impl From<u8> for Threshold {
    fn from(level: u8) -> Self {
        Threshold::Level(level)
    }
}
