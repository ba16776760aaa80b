//! SDS011 serial frames.
//!
//! Commands are 19 bytes, `AA B4 <13 data bytes> <device id> <checksum> AB`. The sensor
//! answers with 10 byte frames, `AA <kind> <6 data bytes> <checksum> AB`. Checksums are the
//! low byte of the sum of everything between the command byte and the checksum.

use std::fmt;

use shared::Measurement;

const HEAD: u8 = 0xaa;
const TAIL: u8 = 0xab;
const COMMAND: u8 = 0xb4;
const DATA_REPLY: u8 = 0xc0;
const COMMAND_REPLY: u8 = 0xc5;

pub const COMMAND_LEN: usize = 19;
pub const REPLY_LEN: usize = 10;

/// Targets whichever sensor is on the line.
pub const ANY_DEVICE: u16 = 0xffff;

/// Longest working period the sensor accepts, in minutes. Zero means continuous.
pub const MAX_WORKING_PERIOD: u8 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingMode {
    /// The sensor pushes a measurement every working period.
    Active,
    /// The sensor only measures when asked.
    Query,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sds011Command {
    SetReportingMode(ReportingMode),
    /// Minutes between measurements.
    SetWorkingPeriod(u8),
}

impl Sds011Command {
    pub fn raw(&self) -> u8 {
        match self {
            Self::SetReportingMode(_) => 0x02,
            Self::SetWorkingPeriod(_) => 0x08,
        }
    }

    fn argument(&self) -> u8 {
        match self {
            Self::SetReportingMode(ReportingMode::Active) => 0x00,
            Self::SetReportingMode(ReportingMode::Query) => 0x01,
            Self::SetWorkingPeriod(minutes) => (*minutes).min(MAX_WORKING_PERIOD),
        }
    }

    pub fn encode(&self, device: u16) -> [u8; COMMAND_LEN] {
        let mut frame = [0u8; COMMAND_LEN];
        frame[0] = HEAD;
        frame[1] = COMMAND;
        frame[2] = self.raw();
        // write, as opposed to query the current setting
        frame[3] = 0x01;
        frame[4] = self.argument();
        frame[15..17].copy_from_slice(&device.to_be_bytes());
        frame[17] = checksum(&frame[2..17]);
        frame[18] = TAIL;
        frame
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reply {
    Measurement { measurement: Measurement, device: u16 },
    /// Acknowledgement of a command, carrying the command byte it answers.
    Ack(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsingError {
    Checksum,
    UnknownReply(u8),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsingError::Checksum => f.write_str("checksum mismatch"),
            ParsingError::UnknownReply(kind) => write!(f, "unknown reply kind {:#04x}", kind),
        }
    }
}

impl std::error::Error for ParsingError {}

pub(crate) fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte))
}

/// Parses one complete reply frame, head and tail already checked.
fn parse(frame: &[u8]) -> Result<Reply, ParsingError> {
    if checksum(&frame[2..8]) != frame[8] {
        return Err(ParsingError::Checksum);
    }

    match frame[1] {
        DATA_REPLY => {
            let pm2_5 = u16::from_le_bytes([frame[2], frame[3]]);
            let pm10 = u16::from_le_bytes([frame[4], frame[5]]);
            Ok(Reply::Measurement {
                measurement: Measurement {
                    pm2_5: f32::from(pm2_5) / 10.0,
                    pm10: f32::from(pm10) / 10.0,
                },
                device: u16::from_be_bytes([frame[6], frame[7]]),
            })
        }
        COMMAND_REPLY => Ok(Reply::Ack(frame[2])),
        kind => Err(ParsingError::UnknownReply(kind)),
    }
}

/// Reassembles reply frames from arbitrarily chunked serial reads.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    rolling: Vec<u8>,
}

impl FrameDecoder {
    pub fn extend(&mut self, bytes: &[u8]) {
        self.rolling.extend_from_slice(bytes);
    }

    /// Next reply in the stream, `None` until a whole frame is buffered. Noise in front of a
    /// frame is skipped.
    pub fn next_reply(&mut self) -> Option<Result<Reply, ParsingError>> {
        loop {
            match self.rolling.iter().position(|byte| *byte == HEAD) {
                Some(start) => {
                    self.rolling.drain(..start);
                }
                None => {
                    self.rolling.clear();
                    return None;
                }
            }

            if self.rolling.len() < REPLY_LEN {
                return None;
            }

            if self.rolling[REPLY_LEN - 1] != TAIL {
                // not a frame start after all, resync on the next head byte
                self.rolling.remove(0);
                continue;
            }

            let frame: Vec<u8> = self.rolling.drain(..REPLY_LEN).collect();
            return Some(parse(&frame));
        }
    }

    pub fn pending(&self) -> usize {
        self.rolling.len()
    }
}
