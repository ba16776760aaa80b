use std::time::Duration;

use clap::Parser;
use shared::{ThresholdError, Thresholds};

use crate::sds011::MAX_WORKING_PERIOD;

const DEFAULT_INTERVAL: u16 = 30;

/// Exposes a particulate matter sensor as an air quality accessory.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    /// Name the accessory is shown under.
    #[clap(long, default_value = "Air Quality")]
    pub name: String,
    /// Minutes between sensor measurements, 1 to 30. Zero falls back to the default.
    #[clap(long, default_value_t = DEFAULT_INTERVAL)]
    pub interval: u16,
    /// Serial port the sensor driver is attached to.
    #[clap(long, default_value = "/dev/ttyUSB0")]
    pub port: String,
    #[clap(long, default_value_t = 9600)]
    pub baud_rate: u32,
    /// Seconds between air quality reads issued by the host.
    #[clap(long, default_value_t = 10)]
    pub query_period: u64,
    /// Four ascending PM2.5 band limits in μg/m³, e.g. 15,30,55,110.
    #[clap(long, value_delimiter = ',')]
    pub pm25_limits: Option<Vec<f32>>,
    /// Four ascending PM10 band limits in μg/m³, e.g. 25,50,90,180.
    #[clap(long, value_delimiter = ',')]
    pub pm10_limits: Option<Vec<f32>>,
}

/// What the accessory itself needs to be constructed.
#[derive(Debug, Clone)]
pub struct AccessoryConfig {
    pub name: String,
    pub thresholds: Thresholds,
}

impl Default for AccessoryConfig {
    fn default() -> Self {
        Self {
            name: "Air Quality".to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub port: String,
    pub baud_rate: u32,
    pub working_period: u8,
}

impl Config {
    pub fn accessory(&self) -> Result<AccessoryConfig, ThresholdError> {
        let defaults = Thresholds::default();
        let pm2_5 = self
            .pm25_limits
            .as_deref()
            .unwrap_or(defaults.pm2_5().as_slice());
        let pm10 = self
            .pm10_limits
            .as_deref()
            .unwrap_or(defaults.pm10().as_slice());

        Ok(AccessoryConfig {
            name: self.name.clone(),
            thresholds: Thresholds::new(pm2_5, pm10)?,
        })
    }

    pub fn driver(&self) -> DriverConfig {
        DriverConfig {
            port: self.port.clone(),
            baud_rate: self.baud_rate,
            working_period: self.working_period(),
        }
    }

    pub fn working_period(&self) -> u8 {
        let interval = match self.interval {
            0 => DEFAULT_INTERVAL,
            interval => interval,
        };
        interval.min(u16::from(MAX_WORKING_PERIOD)) as u8
    }

    pub fn query_period(&self) -> Duration {
        Duration::from_secs(self.query_period.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["pm-accessory"]).unwrap();

        assert_eq!(config.name, "Air Quality");
        assert_eq!(config.interval, 30);
        assert_eq!(config.port, "/dev/ttyUSB0");
        assert_eq!(config.query_period(), Duration::from_secs(10));
        assert_eq!(config.accessory().unwrap().thresholds, Thresholds::default());
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            "pm-accessory",
            "--name",
            "Bedroom",
            "--interval",
            "5",
            "--port",
            "/dev/ttyAMA0",
            "--pm25-limits",
            "10,20,40,80",
        ])
        .unwrap();

        let accessory = config.accessory().unwrap();
        assert_eq!(accessory.name, "Bedroom");
        assert_eq!(accessory.thresholds.pm2_5(), &[10.0, 20.0, 40.0, 80.0]);
        assert_eq!(accessory.thresholds.pm10(), Thresholds::default().pm10());

        let driver = config.driver();
        assert_eq!(driver.port, "/dev/ttyAMA0");
        assert_eq!(driver.working_period, 5);
    }

    #[test]
    fn working_period_falls_back_and_caps() {
        let config = Config::try_parse_from(["pm-accessory", "--interval", "0"]).unwrap();
        assert_eq!(config.driver().working_period, 30);

        let config = Config::try_parse_from(["pm-accessory", "--interval", "45"]).unwrap();
        assert_eq!(config.working_period(), 30);

        let config = Config::try_parse_from(["pm-accessory"]).unwrap();
        assert_eq!(config.working_period(), 30);
    }

    #[test]
    fn rejects_short_limits() {
        let config =
            Config::try_parse_from(["pm-accessory", "--pm10-limits", "10,20,40"]).unwrap();
        assert!(config.accessory().is_err());
    }

    #[test]
    fn zero_query_period_is_clamped() {
        let config = Config::try_parse_from(["pm-accessory", "--query-period", "0"]).unwrap();
        assert_eq!(config.query_period(), Duration::from_secs(1));
    }
}
