//! Channel description types
//
// https://github.com/rust-iot/rust-ocv
// Copyright 2021 Ryan Kurte

use bytes::BufMut;
use strum::{Display, EnumIter};

use crate::OCV_OCI_LEN;

/// Upper bound (exclusive) of the 2.4 GHz band in MHz.
///
/// Secondary channel placement is only checked below this frequency.
// TODO: 6 GHz channels may need their own branch once they can be encoded
pub const BAND_2G4_MAX_MHZ: i32 = 2500;

/// Channel width of an operating channel
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelWidth {
    #[strum(to_string = "20")]
    Cw20,
    #[strum(to_string = "40")]
    Cw40,
    #[strum(to_string = "80")]
    Cw80,
    #[strum(to_string = "160")]
    Cw160,
    #[strum(to_string = "80+80")]
    Cw80P80,
}

impl ChannelWidth {
    /// Occupied bandwidth in MHz, 80+80 counts as 160
    pub fn mhz(&self) -> u16 {
        match self {
            ChannelWidth::Cw20 => 20,
            ChannelWidth::Cw40 => 40,
            ChannelWidth::Cw80 => 80,
            ChannelWidth::Cw160 | ChannelWidth::Cw80P80 => 160,
        }
    }

    /// Widths using a second frequency segment
    pub fn has_segment1(&self) -> bool {
        match self {
            ChannelWidth::Cw160 | ChannelWidth::Cw80P80 => true,
            _ => false,
        }
    }
}

/// Position of the secondary 20 MHz channel relative to the primary
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SecondaryChannel {
    Below,
    None,
    Above,
}

impl Default for SecondaryChannel {
    fn default() -> Self {
        SecondaryChannel::None
    }
}

impl SecondaryChannel {
    /// Signed offset, -1 below / 0 none / +1 above
    pub fn offset(&self) -> i8 {
        match self {
            SecondaryChannel::Below => -1,
            SecondaryChannel::None => 0,
            SecondaryChannel::Above => 1,
        }
    }
}

/// Operating Channel Information, the compact form sent over the air.
///
/// Fields are raw bytes until interpreted by [`crate::params::derive_all_parameters`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Oci {
    pub op_class: u8,
    pub channel: u8,
    pub seg1_idx: u8,
}

impl Oci {
    pub fn new(op_class: u8, channel: u8, seg1_idx: u8) -> Self {
        Self { op_class, channel, seg1_idx }
    }

    /// Read an OCI from a payload of exactly [`OCV_OCI_LEN`] bytes
    pub fn from_bytes(buff: &[u8]) -> Option<Self> {
        if buff.len() != OCV_OCI_LEN {
            return None;
        }

        Some(Self {
            op_class: buff[0],
            channel: buff[1],
            seg1_idx: buff[2],
        })
    }

    pub fn to_bytes(&self) -> [u8; OCV_OCI_LEN] {
        [self.op_class, self.channel, self.seg1_idx]
    }

    /// Append the OCI to the provided buffer
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.to_bytes());
    }
}

/// Fully interpreted channel, derived from an [`Oci`]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelDescription {
    pub op_class: u8,
    pub channel: u8,
    pub seg1_idx: u8,

    /// Primary channel frequency in MHz
    pub freq: i32,

    pub channel_width: ChannelWidth,

    /// Only set for the 40 MHz classes with an explicit secondary channel
    pub sec_channel: SecondaryChannel,
}

impl ChannelDescription {
    pub fn oci(&self) -> Oci {
        Oci::new(self.op_class, self.channel, self.seg1_idx)
    }
}

/// Channel currently in use by the local radio
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelInfo {
    /// Primary channel frequency in MHz
    pub frequency: i32,

    pub channel_width: ChannelWidth,

    /// Only meaningful when operating at 40 MHz
    pub sec_channel: SecondaryChannel,
}

impl ChannelInfo {
    pub fn new(frequency: i32, channel_width: ChannelWidth, sec_channel: SecondaryChannel) -> Self {
        Self { frequency, channel_width, sec_channel }
    }

    /// Check whether the primary channel lies in the 2.4 GHz band
    pub fn is_2g4(&self) -> bool {
        self.frequency < BAND_2G4_MAX_MHZ
    }
}

/// Parameters used to transmit the frame being validated.
///
/// These may be narrower than what [`ChannelInfo`] permits.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxParams {
    pub channel_width: ChannelWidth,
    pub seg1_idx: u8,
}

impl TxParams {
    pub fn new(channel_width: ChannelWidth, seg1_idx: u8) -> Self {
        Self { channel_width, seg1_idx }
    }
}
