//! Operating channel verification
//
// https://github.com/rust-iot/rust-ocv
// Copyright 2021 Ryan Kurte

use crate::channel::{ChannelDescription, ChannelInfo, ChannelWidth, Oci, TxParams};
use crate::error::OcvError;
use crate::opclass::OperClassTable;
use crate::params::derive_all_parameters;

/// Verify a received OCI against the channel used to transmit to its sender.
///
/// `oci` is the raw OCI payload, `None` if the peer did not include one.
/// `ci` describes the local operating channel and `tx` how the frame being
/// validated was sent. Checks run in order and stop at the first failure:
///
/// 1. an OCI must be present and exactly 3 bytes long
/// 2. the OCI must name a known operating class / channel
/// 3. the primary frequency must match
/// 4. the transmit bandwidth must not exceed what the peer supports
/// 5. in the 2.4 GHz band at 40 MHz, the secondary channel must match
/// 6. for 160 / 80+80 MHz channels, frequency segment 1 must match
///
/// On success the peer's derived channel is returned.
pub fn verify_tx_params<T>(
    table: &T,
    oci: Option<&[u8]>,
    ci: &ChannelInfo,
    tx: &TxParams,
) -> Result<ChannelDescription, OcvError>
where
    T: OperClassTable + ?Sized,
{
    let oci = oci.ok_or(OcvError::MissingOci)?;
    let oci = Oci::from_bytes(oci).ok_or(OcvError::MalformedOci(oci.len()))?;

    let peer = derive_all_parameters(table, oci).map_err(OcvError::UnresolvableOci)?;

    // Primary frequency used to send frames to the peer must match the peer's
    if ci.frequency != peer.freq {
        return Err(OcvError::PrimaryChannelMismatch {
            expected: ci.frequency,
            actual: peer.freq,
        });
    }

    // We shouldn't transmit with a higher bandwidth than the peer supports
    if tx.channel_width.mhz() > peer.channel_width.mhz() {
        return Err(OcvError::BandwidthMismatch {
            used: tx.channel_width.mhz(),
            supported: peer.channel_width.mhz(),
        });
    }

    // Secondary channel is only checked for 40 MHz in the 2.4 GHz band,
    // in the 5 GHz band it follows from the primary frequency
    if let ChannelWidth::Cw40 = tx.channel_width {
        if ci.is_2g4() && ci.sec_channel != peer.sec_channel {
            return Err(OcvError::SecondaryChannelMismatch {
                expected: ci.sec_channel.offset(),
                actual: peer.sec_channel.offset(),
            });
        }
    }

    // 160 and 80+80 MHz channels must use the same segments as the peer
    match ci.channel_width {
        ChannelWidth::Cw160 | ChannelWidth::Cw80P80 if tx.seg1_idx != peer.seg1_idx => {
            return Err(OcvError::Segment1Mismatch {
                expected: tx.seg1_idx,
                actual: peer.seg1_idx,
            });
        }
        _ => (),
    }

    Ok(peer)
}
