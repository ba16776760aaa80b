use shared::{AirQualityLevel, Measurement, Reading, SampleStore, Thresholds};

use crate::config::AccessoryConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    AirQualitySensor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicKind {
    AirQuality,
}

/// A service the accessory offers, as enumerated by the host at setup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescription {
    pub kind: ServiceKind,
    pub name: String,
    pub characteristics: Vec<CharacteristicKind>,
}

/// Particulate matter sensor exposed as an air quality sensor.
///
/// Measurements overwrite the stored reading; reads rate whatever is stored at that moment
/// and never wait for fresh data.
#[derive(Debug)]
pub struct AirQualityAccessory {
    name: String,
    thresholds: Thresholds,
    store: SampleStore,
}

impl AirQualityAccessory {
    pub fn new(config: &AccessoryConfig) -> Self {
        Self {
            name: config.name.clone(),
            thresholds: config.thresholds,
            store: SampleStore::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn record_measurement(&mut self, measurement: Measurement) {
        self.store.record_measurement(measurement.pm2_5, measurement.pm10);
        if self.store.measurement_count() == 1 {
            log::info!(
                "{}: first measurement, PM2.5 {} PM10 {}",
                self.name,
                measurement.pm2_5,
                measurement.pm10
            );
        }
    }

    pub fn reading(&self) -> Reading {
        self.store.reading()
    }

    pub fn handle_air_quality_get(&self) -> AirQualityLevel {
        self.store.air_quality(&self.thresholds)
    }

    pub fn services(&self) -> Vec<ServiceDescription> {
        vec![ServiceDescription {
            kind: ServiceKind::AirQualitySensor,
            name: self.name.clone(),
            characteristics: vec![CharacteristicKind::AirQuality],
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accessory() -> AirQualityAccessory {
        AirQualityAccessory::new(&AccessoryConfig::default())
    }

    fn measurement(pm2_5: f32, pm10: f32) -> Measurement {
        Measurement { pm2_5, pm10 }
    }

    #[test]
    fn unknown_until_first_measurement() {
        let accessory = accessory();
        assert_eq!(accessory.handle_air_quality_get(), AirQualityLevel::Unknown);
        assert_eq!(accessory.handle_air_quality_get(), AirQualityLevel::Unknown);
    }

    #[test]
    fn rates_latest_measurement() {
        let mut accessory = accessory();

        accessory.record_measurement(measurement(10.0, 20.0));
        assert_eq!(accessory.handle_air_quality_get(), AirQualityLevel::Excellent);

        accessory.record_measurement(measurement(20.0, 20.0));
        assert_eq!(accessory.handle_air_quality_get(), AirQualityLevel::Good);

        accessory.record_measurement(measurement(200.0, 20.0));
        assert_eq!(accessory.handle_air_quality_get(), AirQualityLevel::Poor);
        assert_eq!(accessory.reading(), Reading::new(200.0, 20.0));
    }

    #[test]
    fn repeated_reads_are_stable() {
        let mut accessory = accessory();
        accessory.record_measurement(measurement(40.0, 70.0));

        let first = accessory.handle_air_quality_get();
        assert_eq!(first, AirQualityLevel::Fair);
        assert_eq!(accessory.handle_air_quality_get(), first);
    }

    #[test]
    fn offers_one_air_quality_service() {
        let accessory = AirQualityAccessory::new(&AccessoryConfig {
            name: "Living Room".to_string(),
            thresholds: Thresholds::default(),
        });

        assert_eq!(
            accessory.services(),
            vec![ServiceDescription {
                kind: ServiceKind::AirQualitySensor,
                name: "Living Room".to_string(),
                characteristics: vec![CharacteristicKind::AirQuality],
            }]
        );
    }
}
