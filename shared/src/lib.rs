mod store;
mod thresholds;

pub use store::SampleStore;
pub use thresholds::{classify, Pollutant, ThresholdError, Thresholds, BREAKPOINTS};

/// Latest particulate matter concentrations.
///
/// `(0, 0)` doubles as the "nothing measured yet" state, see [`Reading::is_unknown`].
#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub struct Reading {
    /// Mass Concentration PM2.5 [μg/m³]
    pub pm2_5: f32,
    /// Mass Concentration PM10 [μg/m³]
    pub pm10: f32,
}

impl Reading {
    pub const fn new(pm2_5: f32, pm10: f32) -> Self {
        Self { pm2_5, pm10 }
    }

    pub fn is_unknown(&self) -> bool {
        self.pm2_5 == 0.0 && self.pm10 == 0.0
    }
}

/// One sample as delivered by the sensor driver.
#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub struct Measurement {
    /// Mass Concentration PM2.5 [μg/m³]
    pub pm2_5: f32,
    /// Mass Concentration PM10 [μg/m³]
    pub pm10: f32,
}

impl From<Measurement> for Reading {
    fn from(measurement: Measurement) -> Self {
        Self::new(measurement.pm2_5, measurement.pm10)
    }
}

/// Air quality rating, ordered from no data through the cleanest to the dirtiest band.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum AirQualityLevel {
    Unknown,
    Excellent,
    Good,
    Fair,
    Inferior,
    Poor,
}

impl AirQualityLevel {
    /// Levels assigned to bands one to four, in order. Anything above is [`AirQualityLevel::Poor`].
    pub const BANDS: [AirQualityLevel; BREAKPOINTS] = [
        AirQualityLevel::Excellent,
        AirQualityLevel::Good,
        AirQualityLevel::Fair,
        AirQualityLevel::Inferior,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Inferior => "inferior",
            Self::Poor => "poor",
        }
    }
}

impl Default for AirQualityLevel {
    fn default() -> Self {
        Self::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(AirQualityLevel::Unknown < AirQualityLevel::Excellent);
        assert!(AirQualityLevel::Excellent < AirQualityLevel::Good);
        assert!(AirQualityLevel::Good < AirQualityLevel::Fair);
        assert!(AirQualityLevel::Fair < AirQualityLevel::Inferior);
        assert!(AirQualityLevel::Inferior < AirQualityLevel::Poor);
    }

    #[test]
    fn zero_reading_is_unknown() {
        assert!(Reading::default().is_unknown());
        assert!(!Reading::new(0.0, 0.1).is_unknown());
        assert!(!Reading::new(3.0, 0.0).is_unknown());
    }
}
