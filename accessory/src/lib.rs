pub mod accessory;
pub mod config;
pub mod driver;
pub mod hap;
pub mod platform;
pub mod sds011;

pub use accessory::AirQualityAccessory;
pub use config::Config;
pub use platform::Platform;
