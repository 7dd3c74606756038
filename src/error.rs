//! OCV error types
//
// https://github.com/rust-iot/rust-ocv
// Copyright 2021 Ryan Kurte

use core::fmt::{self, Write};

use crate::channel::{ChannelWidth, SecondaryChannel};

/// Capacity of a rendered error message
pub const OCV_ERRORSTR_LEN: usize = 256;

/// Rendered error message
pub type ErrorStr = heapless::String<OCV_ERRORSTR_LEN>;

/// Failure to interpret an operating class / channel pair
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeriveError {
    /// No frequency known for the operating class / channel pair
    UnrecognizedChannelPair { op_class: u8, channel: u8 },

    /// Operating class not present in the table
    UnrecognizedOperatingClass(u8),
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeriveError::UnrecognizedChannelPair { op_class, channel } => write!(
                f,
                "Error interpreting OCI: unrecognized opclass/channel pair ({}/{})",
                op_class, channel
            ),
            DeriveError::UnrecognizedOperatingClass(op_class) => write!(
                f,
                "Error interpreting OCI: unrecognized opclass ({})",
                op_class
            ),
        }
    }
}

/// Failure to encode the local channel as an OCI
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// No operating class / channel pair describes the channel
    ChannelNotRepresentable {
        freq: i32,
        width: ChannelWidth,
        sec: SecondaryChannel,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::ChannelNotRepresentable { freq, width, sec } => write!(
                f,
                "Cannot determine operating class and channel for OCI element (freq={} chanwidth={} sec_channel={})",
                freq, width, sec.offset()
            ),
        }
    }
}

/// Operating channel validation failures
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OcvError {
    /// No OCI was received
    MissingOci,

    /// OCI payload of unexpected length
    MalformedOci(usize),

    /// OCI names an unknown operating class / channel
    UnresolvableOci(DeriveError),

    /// Primary frequency differs, expected is the local frequency
    PrimaryChannelMismatch { expected: i32, actual: i32 },

    /// Transmit bandwidth exceeds what the peer supports
    BandwidthMismatch { used: u16, supported: u16 },

    /// Secondary channel offset differs (2.4 GHz, 40 MHz only)
    SecondaryChannelMismatch { expected: i8, actual: i8 },

    /// Frequency segment 1 index differs (160 / 80+80 MHz only)
    Segment1Mismatch { expected: u8, actual: u8 },
}

impl OcvError {
    /// Render the diagnostic message into an owned buffer
    pub fn message(&self) -> ErrorStr {
        let mut s = ErrorStr::new();
        // Messages are well under capacity, overflow truncates the remainder
        let _ = write!(s, "{}", self);
        s
    }
}

impl fmt::Display for OcvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcvError::MissingOci => write!(f, "OCV failed: did not receive mandatory OCI"),
            OcvError::MalformedOci(len) => write!(
                f,
                "OCV failed: received OCI of unexpected length ({})",
                len
            ),
            OcvError::UnresolvableOci(_) => write!(f, "OCV failed: unable to interpret received OCI"),
            OcvError::PrimaryChannelMismatch { expected, actual } => write!(
                f,
                "OCV failed: primary channel mismatch in received OCI (we use {} but receiver is using {})",
                expected, actual
            ),
            OcvError::BandwidthMismatch { used, supported } => write!(
                f,
                "OCV failed: channel bandwidth mismatch in received OCI (we use {} but receiver only supports {})",
                used, supported
            ),
            OcvError::SecondaryChannelMismatch { expected, actual } => write!(
                f,
                "OCV failed: secondary channel mismatch in received OCI (we use {} but receiver is using {})",
                expected, actual
            ),
            OcvError::Segment1Mismatch { expected, actual } => write!(
                f,
                "OCV failed: frequency segment 1 mismatch in received OCI (we use {} but receiver is using {})",
                expected, actual
            ),
        }
    }
}

/// Wrapper over all OCV errors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Derive(DeriveError),
    Encode(EncodeError),
    Verify(OcvError),
}

impl From<DeriveError> for Error {
    fn from(e: DeriveError) -> Self {
        Error::Derive(e)
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Error::Encode(e)
    }
}

impl From<OcvError> for Error {
    fn from(e: OcvError) -> Self {
        Error::Verify(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Derive(e) => fmt::Display::fmt(e, f),
            Error::Encode(e) => fmt::Display::fmt(e, f),
            Error::Verify(e) => fmt::Display::fmt(e, f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeriveError {}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[cfg(feature = "std")]
impl std::error::Error for OcvError {}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;

    use std::string::ToString;

    #[test]
    fn verify_messages() {
        let e = OcvError::PrimaryChannelMismatch { expected: 5180, actual: 5200 };
        assert_eq!(
            e.message().as_str(),
            "OCV failed: primary channel mismatch in received OCI (we use 5180 but receiver is using 5200)"
        );

        let e = OcvError::MalformedOci(4);
        assert_eq!(e.to_string(), "OCV failed: received OCI of unexpected length (4)");

        let e = OcvError::UnresolvableOci(DeriveError::UnrecognizedOperatingClass(7));
        assert_eq!(e.to_string(), "OCV failed: unable to interpret received OCI");
    }

    #[test]
    fn encode_message() {
        let e = EncodeError::ChannelNotRepresentable {
            freq: 5900,
            width: ChannelWidth::Cw80P80,
            sec: SecondaryChannel::Below,
        };
        assert_eq!(
            e.to_string(),
            "Cannot determine operating class and channel for OCI element (freq=5900 chanwidth=80+80 sec_channel=-1)"
        );
    }

    #[test]
    fn wrapped_errors() {
        let e: Error = DeriveError::UnrecognizedChannelPair { op_class: 81, channel: 14 }.into();
        assert_eq!(
            e.to_string(),
            "Error interpreting OCI: unrecognized opclass/channel pair (81/14)"
        );

        let e: Error = OcvError::MissingOci.into();
        assert_eq!(e, Error::Verify(OcvError::MissingOci));
    }
}
