use crate::{AirQualityLevel, Reading, Thresholds};

/// Holds the most recent reading. Every measurement overwrites the previous one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleStore {
    reading: Reading,
    measurements: u32,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores both concentrations as delivered, without any range checks.
    pub fn record_measurement(&mut self, pm2_5: f32, pm10: f32) {
        self.reading = Reading::new(pm2_5, pm10);
        self.measurements = self.measurements.saturating_add(1);
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    /// Number of measurements recorded since construction.
    pub fn measurement_count(&self) -> u32 {
        self.measurements
    }

    pub fn air_quality(&self, thresholds: &Thresholds) -> AirQualityLevel {
        thresholds.classify(self.reading)
    }
}
