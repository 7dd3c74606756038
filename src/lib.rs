//! Operating Channel Validation (OCV) for IEEE 802.11 stacks.
//!
//! Peers exchange Operating Channel Information (OCI) during key exchange so
//! each can check the other is on the channel actually used to reach it,
//! defeating channel-shifting relays. This crate derives channel parameters
//! from an OCI, writes the OCI elements, and verifies received OCIs.
//
// https://github.com/rust-iot/rust-ocv
// Copyright 2021 Ryan Kurte

#![no_std]

#[cfg(any(test, feature="std"))]
extern crate std;

use bytes::BufMut;

pub mod channel;

pub mod opclass;

pub mod params;

pub mod oci;

pub mod verify;

pub mod error;

pub mod prelude;

use crate::channel::{ChannelDescription, ChannelInfo, Oci, TxParams};
use crate::error::{DeriveError, EncodeError, OcvError};
use crate::opclass::{GlobalOperClasses, OperClassTable};


/// Length of the OCI payload
pub const OCV_OCI_LEN: usize = 3;

/// Length of an OCI KDE including element header
pub const OCV_OCI_KDE_LEN: usize = 2 + RSN_SELECTOR_LEN + OCV_OCI_LEN;

/// Length of an extended OCI element including element header
pub const OCV_OCI_EXTENDED_LEN: usize = 3 + OCV_OCI_LEN;

pub const WLAN_EID_VENDOR_SPECIFIC: u8 = 0xDD;
pub const WLAN_EID_EXTENSION: u8 = 0xFF;
pub const WLAN_EID_EXT_OCV_OCI: u8 = 54;

pub const RSN_SELECTOR_LEN: usize = 4;

/// OCI KDE selector, 00-0F-AC:13
pub const RSN_KEY_DATA_OCI: u32 = 0x000F_AC0D;


/// Operating channel validation over an operating class table
#[derive(Clone, Debug, Default)]
pub struct Ocv<T> {
    table: T,
}

impl Ocv<GlobalOperClasses> {
    /// Create an instance using the global operating class table
    pub fn global() -> Self {
        Self::new(GlobalOperClasses)
    }
}

impl<T: OperClassTable> Ocv<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// Expand an OCI into a full channel description
    pub fn derive(&self, oci: Oci) -> Result<ChannelDescription, DeriveError> {
        params::derive_all_parameters(&self.table, oci)
    }

    /// Write the bare OCI for the local channel
    pub fn insert_oci<B: BufMut>(&self, ci: &ChannelInfo, seg1_idx: u8, buf: &mut B) -> Result<(), EncodeError> {
        oci::write_oci(&self.table, ci, seg1_idx, buf)
    }

    /// Write an OCI KDE for the local channel
    pub fn insert_oci_kde<B: BufMut>(&self, ci: &ChannelInfo, seg1_idx: u8, buf: &mut B) -> Result<(), EncodeError> {
        oci::write_oci_kde(&self.table, ci, seg1_idx, buf)
    }

    /// Write an extended OCI element for the local channel
    pub fn insert_extended_oci<B: BufMut>(&self, ci: &ChannelInfo, seg1_idx: u8, buf: &mut B) -> Result<(), EncodeError> {
        oci::write_extended_oci(&self.table, ci, seg1_idx, buf)
    }

    /// Verify a received OCI payload, see [`verify::verify_tx_params`]
    pub fn verify_tx_params(&self, oci: Option<&[u8]>, ci: &ChannelInfo, tx: &TxParams) -> Result<ChannelDescription, OcvError> {
        verify::verify_tx_params(&self.table, oci, ci, tx)
    }
}
