use std::fmt;

use crate::{AirQualityLevel, Reading};

/// Number of breakpoints per pollutant. Readings above the last one are rated poor.
pub const BREAKPOINTS: usize = 4;

const DEFAULT_PM2_5: [f32; BREAKPOINTS] = [15.0, 30.0, 55.0, 110.0];
const DEFAULT_PM10: [f32; BREAKPOINTS] = [25.0, 50.0, 90.0, 180.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pollutant {
    Pm2_5,
    Pm10,
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pollutant::Pm2_5 => f.write_str("PM2.5"),
            Pollutant::Pm10 => f.write_str("PM10"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdError {
    WrongLength { pollutant: Pollutant, len: usize },
    NotANumber { pollutant: Pollutant },
    Descending { pollutant: Pollutant },
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { pollutant, len } => write!(
                f,
                "{} needs {} breakpoints, got {}",
                pollutant, BREAKPOINTS, len
            ),
            Self::NotANumber { pollutant } => write!(f, "{} breakpoint is not a number", pollutant),
            Self::Descending { pollutant } => {
                write!(f, "{} breakpoints must be ascending", pollutant)
            }
        }
    }
}

impl std::error::Error for ThresholdError {}

/// Upper band limits for both pollutants, in μg/m³.
///
/// Band `n` covers everything up to and including `limits[n]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pm2_5: [f32; BREAKPOINTS],
    pm10: [f32; BREAKPOINTS],
}

impl Thresholds {
    pub fn new(pm2_5: &[f32], pm10: &[f32]) -> Result<Self, ThresholdError> {
        Ok(Self {
            pm2_5: breakpoints(Pollutant::Pm2_5, pm2_5)?,
            pm10: breakpoints(Pollutant::Pm10, pm10)?,
        })
    }

    pub fn pm2_5(&self) -> &[f32; BREAKPOINTS] {
        &self.pm2_5
    }

    pub fn pm10(&self) -> &[f32; BREAKPOINTS] {
        &self.pm10
    }

    pub fn classify(&self, reading: Reading) -> AirQualityLevel {
        classify(reading.pm2_5, reading.pm10, self)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pm2_5: DEFAULT_PM2_5,
            pm10: DEFAULT_PM10,
        }
    }
}

fn breakpoints(pollutant: Pollutant, raw: &[f32]) -> Result<[f32; BREAKPOINTS], ThresholdError> {
    let limits: [f32; BREAKPOINTS] = raw
        .try_into()
        .map_err(|_| ThresholdError::WrongLength {
            pollutant,
            len: raw.len(),
        })?;

    if limits.iter().any(|limit| limit.is_nan()) {
        return Err(ThresholdError::NotANumber { pollutant });
    }
    if limits.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(ThresholdError::Descending { pollutant });
    }

    Ok(limits)
}

/// Rates a pair of concentrations against `thresholds`.
///
/// Both pollutants have to fit under a band's limits for the band to apply, so the
/// dirtier of the two decides. `(0, 0)` means no data and rates as unknown. NaN fails
/// every comparison and ends up poor.
pub fn classify(pm2_5: f32, pm10: f32, thresholds: &Thresholds) -> AirQualityLevel {
    if pm2_5 == 0.0 && pm10 == 0.0 {
        return AirQualityLevel::Unknown;
    }

    thresholds
        .pm2_5
        .iter()
        .zip(thresholds.pm10.iter())
        .zip(AirQualityLevel::BANDS)
        .find(|((pm2_5_limit, pm10_limit), _)| pm2_5 <= **pm2_5_limit && pm10 <= **pm10_limit)
        .map(|(_, level)| level)
        .unwrap_or(AirQualityLevel::Poor)
}
