//! Translation between the accessory's own types and HomeKit Accessory Protocol values.

use std::fmt;

use shared::AirQualityLevel;

use crate::accessory::{CharacteristicKind, ServiceKind};

const HAP_BASE_UUID: &str = "-0000-1000-8000-0026BB765291";

impl ServiceKind {
    /// Short HAP type code.
    pub fn hap_type(&self) -> u32 {
        match self {
            ServiceKind::AirQualitySensor => 0x8d,
        }
    }

    pub fn hap_uuid(&self) -> String {
        format!("{:08X}{}", self.hap_type(), HAP_BASE_UUID)
    }
}

impl CharacteristicKind {
    pub fn hap_type(&self) -> u32 {
        match self {
            CharacteristicKind::AirQuality => 0x95,
        }
    }

    pub fn hap_uuid(&self) -> String {
        format!("{:08X}{}", self.hap_type(), HAP_BASE_UUID)
    }
}

/// Value of the HAP air quality characteristic, 0 (unknown) to 5 (poor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapAirQuality(u8);

impl HapAirQuality {
    pub const MAX: u8 = 5;

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<AirQualityLevel> for HapAirQuality {
    fn from(level: AirQualityLevel) -> Self {
        Self(match level {
            AirQualityLevel::Unknown => 0,
            AirQualityLevel::Excellent => 1,
            AirQualityLevel::Good => 2,
            AirQualityLevel::Fair => 3,
            AirQualityLevel::Inferior => 4,
            AirQualityLevel::Poor => 5,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAirQuality(pub u8);

impl fmt::Display for InvalidAirQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "air quality value {} is out of range 0..={}",
            self.0,
            HapAirQuality::MAX
        )
    }
}

impl std::error::Error for InvalidAirQuality {}

impl TryFrom<u8> for HapAirQuality {
    type Error = InvalidAirQuality;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            return Err(InvalidAirQuality(value));
        }
        Ok(Self(value))
    }
}

impl From<HapAirQuality> for AirQualityLevel {
    fn from(value: HapAirQuality) -> Self {
        match value.0 {
            1 => AirQualityLevel::Excellent,
            2 => AirQualityLevel::Good,
            3 => AirQualityLevel::Fair,
            4 => AirQualityLevel::Inferior,
            5 => AirQualityLevel::Poor,
            _ => AirQualityLevel::Unknown,
        }
    }
}
