use std::fmt;

use shared::Measurement;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio_serial::{SerialPortBuilderExt, SerialStream};

use crate::config::DriverConfig;
use crate::sds011::{FrameDecoder, ReportingMode, Reply, Sds011Command, ANY_DEVICE};

/// Latest measurement slot shared with the platform. Each send replaces the previous value.
pub type MeasurementSender = watch::Sender<Option<Measurement>>;
pub type MeasurementReceiver = watch::Receiver<Option<Measurement>>;

pub fn measurement_channel() -> (MeasurementSender, MeasurementReceiver) {
    watch::channel(None)
}

#[derive(Debug)]
pub enum Error {
    Serial(tokio_serial::Error),
    Io(std::io::Error),
}

impl From<tokio_serial::Error> for Error {
    fn from(e: tokio_serial::Error) -> Self {
        Self::Serial(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Serial(e) => write!(f, "serial port: {}", e),
            Error::Io(e) => write!(f, "io: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Serial(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

async fn send_command<P>(port: &mut P, command: Sds011Command) -> Result<(), Error>
where
    P: AsyncWrite + Unpin,
{
    port.write_all(&command.encode(ANY_DEVICE)).await?;
    log::debug!("Sent {:?} to the sensor.", command);
    Ok(())
}

/// Puts the sensor into active reporting with the configured working period.
pub async fn configure<P>(port: &mut P, working_period: u8) -> Result<(), Error>
where
    P: AsyncWrite + Unpin,
{
    send_command(port, Sds011Command::SetReportingMode(ReportingMode::Active)).await?;
    send_command(port, Sds011Command::SetWorkingPeriod(working_period)).await?;
    port.flush().await?;
    Ok(())
}

/// Publishes every measurement read from `port` until the port closes or the platform goes
/// away. Frames that fail to parse are dropped.
pub async fn run<P>(
    mut port: P,
    working_period: u8,
    measurements: MeasurementSender,
) -> Result<(), Error>
where
    P: AsyncRead + AsyncWrite + Unpin,
{
    configure(&mut port, working_period).await?;

    let mut buffer = [0; 256];
    let mut frames = FrameDecoder::default();
    loop {
        let read = port.read(&mut buffer).await?;
        if read == 0 {
            log::warn!("Sensor link closed.");
            return Ok(());
        }

        frames.extend(&buffer[..read]);
        while let Some(reply) = frames.next_reply() {
            match reply {
                Ok(Reply::Measurement { measurement, device }) => {
                    log::trace!("Measured PM from {:04x}: {:?}", device, measurement);
                    if measurements.send(Some(measurement)).is_err() {
                        return Ok(());
                    }
                }
                Ok(Reply::Ack(command)) => {
                    log::debug!("Sensor acknowledged command {:#04x}.", command)
                }
                Err(e) => log::warn!("Dropping sensor frame: {}", e),
            }
        }
    }
}

pub fn open(config: &DriverConfig) -> Result<SerialStream, Error> {
    Ok(tokio_serial::new(config.port.as_str(), config.baud_rate).open_native_async()?)
}

/// Opens the configured serial port and runs the driver on it. Failures are logged and end
/// the task; the accessory keeps serving the last known value.
pub async fn run_serial(config: DriverConfig, measurements: MeasurementSender) {
    let result = match open(&config) {
        Ok(port) => {
            log::info!("Opened sensor port {}.", config.port);
            run(port, config.working_period, measurements).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log::error!("Sensor driver on {} stopped: {}", config.port, e);
    }
}
