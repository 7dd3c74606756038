//! Channel parameter derivation
//
// https://github.com/rust-iot/rust-ocv
// Copyright 2021 Ryan Kurte

use log::debug;

use crate::channel::{ChannelDescription, Oci};
use crate::error::DeriveError;
use crate::opclass::OperClassTable;

/// Expand an OCI into a full channel description.
///
/// The frequency is resolved from the operating class / channel pair, then
/// the channel width and secondary channel from the operating class alone.
/// `seg1_idx` is passed through uninterpreted.
pub fn derive_all_parameters<T>(table: &T, oci: Oci) -> Result<ChannelDescription, DeriveError>
where
    T: OperClassTable + ?Sized,
{
    // Negative frequencies are lookup failures
    let freq = match table.chan_to_freq(oci.op_class, oci.channel) {
        Some(f) if f >= 0 => f,
        _ => {
            debug!(
                "Error interpreting OCI: unrecognized opclass/channel pair ({}/{})",
                oci.op_class, oci.channel
            );
            return Err(DeriveError::UnrecognizedChannelPair {
                op_class: oci.op_class,
                channel: oci.channel,
            });
        }
    };

    let class = match table.oper_class(oci.op_class) {
        Some(c) => c,
        None => {
            debug!("Error interpreting OCI: unrecognized opclass ({})", oci.op_class);
            return Err(DeriveError::UnrecognizedOperatingClass(oci.op_class));
        }
    };

    Ok(ChannelDescription {
        op_class: oci.op_class,
        channel: oci.channel,
        seg1_idx: oci.seg1_idx,
        freq,
        channel_width: class.bw().channel_width(),
        sec_channel: class.bw().sec_channel(),
    })
}
