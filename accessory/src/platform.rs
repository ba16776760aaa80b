use std::future::Future;
use std::time::Duration;

use shared::AirQualityLevel;
use tokio::time::MissedTickBehavior;

use crate::accessory::AirQualityAccessory;
use crate::driver::MeasurementReceiver;
use crate::hap::HapAirQuality;

/// In-process host for a single accessory.
///
/// Owns the accessory and drives both of its paths from one loop, so a measurement update
/// and a characteristic read never interleave.
pub struct Platform {
    accessory: AirQualityAccessory,
    query_period: Duration,
}

impl Platform {
    pub fn register(accessory: AirQualityAccessory, query_period: Duration) -> Self {
        for service in accessory.services() {
            log::info!(
                "Registered {:?} '{}' ({})",
                service.kind,
                service.name,
                service.kind.hap_uuid()
            );
            for characteristic in service.characteristics {
                log::info!(
                    "  characteristic {:?} ({})",
                    characteristic,
                    characteristic.hap_uuid()
                );
            }
        }

        Self {
            accessory,
            query_period,
        }
    }

    pub fn accessory(&self) -> &AirQualityAccessory {
        &self.accessory
    }

    /// Characteristic read as issued by a controller.
    pub fn read(&self) -> HapAirQuality {
        HapAirQuality::from(self.accessory.handle_air_quality_get())
    }

    /// Applies measurements as they arrive and reads the characteristic every query period
    /// until `shutdown` resolves. Once the driver hangs up the last reading keeps being served.
    pub async fn run<F>(mut self, mut measurements: MeasurementReceiver, shutdown: F) -> Self
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.query_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut driver_connected = true;
        loop {
            tokio::select! {
                biased;
                changed = measurements.changed(), if driver_connected => match changed {
                    Ok(()) => {
                        let latest = *measurements.borrow_and_update();
                        if let Some(measurement) = latest {
                            self.accessory.record_measurement(measurement);
                        }
                    }
                    Err(_) => {
                        log::warn!("Sensor driver went away, serving the last reading.");
                        driver_connected = false;
                    }
                },
                _ = ticker.tick() => {
                    let value = self.read();
                    log::info!(
                        "{}: air quality {} ({})",
                        self.accessory.name(),
                        AirQualityLevel::from(value).name(),
                        value.value()
                    );
                }
                _ = &mut shutdown => break,
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessoryConfig;
    use crate::driver::measurement_channel;
    use shared::Measurement;

    fn platform() -> Platform {
        Platform::register(
            AirQualityAccessory::new(&AccessoryConfig::default()),
            Duration::from_secs(10),
        )
    }

    #[test]
    fn reads_unknown_before_data() {
        let platform = platform();
        assert_eq!(platform.read().value(), 0);
        assert_eq!(platform.read().value(), 0);
    }

    #[tokio::test]
    async fn last_measurement_wins() {
        let (sender, receiver) = measurement_channel();
        for (pm2_5, pm10) in [(200.0, 20.0), (10.0, 20.0), (20.0, 20.0)] {
            sender.send(Some(Measurement { pm2_5, pm10 })).unwrap();
        }
        drop(sender);

        let platform = platform().run(receiver, std::future::ready(())).await;

        assert_eq!(
            platform.accessory().handle_air_quality_get(),
            AirQualityLevel::Good
        );
        assert_eq!(platform.read().value(), 2);
    }

    #[tokio::test]
    async fn keeps_unknown_without_driver() {
        let (sender, receiver) = measurement_channel();
        drop(sender);

        let platform = platform().run(receiver, std::future::ready(())).await;

        assert_eq!(platform.read(), HapAirQuality::from(AirQualityLevel::Unknown));
    }
}
