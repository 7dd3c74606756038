//! OCI element encoding and extraction
//
// https://github.com/rust-iot/rust-ocv
// Copyright 2021 Ryan Kurte

use byteorder::{BigEndian, ByteOrder};
use bytes::BufMut;
use log::warn;

use crate::channel::{ChannelInfo, Oci};
use crate::error::EncodeError;
use crate::opclass::OperClassTable;
use crate::{
    OCV_OCI_LEN, RSN_KEY_DATA_OCI, RSN_SELECTOR_LEN, WLAN_EID_EXTENSION, WLAN_EID_EXT_OCV_OCI,
    WLAN_EID_VENDOR_SPECIFIC,
};

/// Resolve the OCI describing the local channel
pub fn local_oci<T>(table: &T, ci: &ChannelInfo, seg1_idx: u8) -> Result<Oci, EncodeError>
where
    T: OperClassTable + ?Sized,
{
    match table.chaninfo_to_channel(ci.frequency, ci.channel_width, ci.sec_channel) {
        Some((op_class, channel)) => Ok(Oci::new(op_class, channel, seg1_idx)),
        None => {
            warn!(
                "Cannot determine operating class and channel for OCI element (freq={} chanwidth={} sec_channel={})",
                ci.frequency,
                ci.channel_width,
                ci.sec_channel.offset()
            );
            Err(EncodeError::ChannelNotRepresentable {
                freq: ci.frequency,
                width: ci.channel_width,
                sec: ci.sec_channel,
            })
        }
    }
}

/// Write the bare 3 byte OCI for the local channel.
///
/// Buffer capacity is the caller's responsibility, nothing is written on error.
pub fn write_oci<T, B>(table: &T, ci: &ChannelInfo, seg1_idx: u8, buf: &mut B) -> Result<(), EncodeError>
where
    T: OperClassTable + ?Sized,
    B: BufMut,
{
    let oci = local_oci(table, ci, seg1_idx)?;
    oci.encode(buf);
    Ok(())
}

/// Write the OCI as a vendor specific key data element (OCI KDE)
pub fn write_oci_kde<T, B>(table: &T, ci: &ChannelInfo, seg1_idx: u8, buf: &mut B) -> Result<(), EncodeError>
where
    T: OperClassTable + ?Sized,
    B: BufMut,
{
    let oci = local_oci(table, ci, seg1_idx)?;

    buf.put_u8(WLAN_EID_VENDOR_SPECIFIC);
    buf.put_u8((RSN_SELECTOR_LEN + OCV_OCI_LEN) as u8);
    buf.put_u32(RSN_KEY_DATA_OCI);
    oci.encode(buf);

    Ok(())
}

/// Write the OCI as an extended element
pub fn write_extended_oci<T, B>(table: &T, ci: &ChannelInfo, seg1_idx: u8, buf: &mut B) -> Result<(), EncodeError>
where
    T: OperClassTable + ?Sized,
    B: BufMut,
{
    let oci = local_oci(table, ci, seg1_idx)?;

    buf.put_u8(WLAN_EID_EXTENSION);
    buf.put_u8((1 + OCV_OCI_LEN) as u8);
    buf.put_u8(WLAN_EID_EXT_OCV_OCI);
    oci.encode(buf);

    Ok(())
}

/// Fetch the OCI payload from an OCI KDE.
///
/// Returns `None` if the buffer does not start with an OCI KDE. The payload
/// length is not checked here so short or long OCIs reach verification.
pub fn parse_oci_kde(buff: &[u8]) -> Option<&[u8]> {
    if buff.len() < 2 + RSN_SELECTOR_LEN || buff[0] != WLAN_EID_VENDOR_SPECIFIC {
        return None;
    }

    let len = buff[1] as usize;
    if len < RSN_SELECTOR_LEN || buff.len() < 2 + len {
        return None;
    }

    if BigEndian::read_u32(&buff[2..]) != RSN_KEY_DATA_OCI {
        return None;
    }

    Some(&buff[2 + RSN_SELECTOR_LEN..2 + len])
}

/// Fetch the OCI payload from an extended OCI element
pub fn parse_extended_oci(buff: &[u8]) -> Option<&[u8]> {
    if buff.len() < 3 || buff[0] != WLAN_EID_EXTENSION {
        return None;
    }

    let len = buff[1] as usize;
    if len < 1 || buff.len() < 2 + len || buff[2] != WLAN_EID_EXT_OCV_OCI {
        return None;
    }

    Some(&buff[3..2 + len])
}

#[cfg(test)]
mod test {
    use super::*;

    use std::vec::Vec;

    use bytes::BytesMut;

    use crate::channel::{ChannelWidth, SecondaryChannel};
    use crate::opclass::GlobalOperClasses;
    use crate::{OCV_OCI_EXTENDED_LEN, OCV_OCI_KDE_LEN};

    fn ci_5g_80() -> ChannelInfo {
        ChannelInfo::new(5180, ChannelWidth::Cw80, SecondaryChannel::None)
    }

    #[test]
    fn write_raw() {
        let mut buff = Vec::<u8>::new();
        write_oci(&GlobalOperClasses, &ci_5g_80(), 0, &mut buff).unwrap();
        assert_eq!(&buff, &[128, 36, 0]);

        let ci = ChannelInfo::new(2437, ChannelWidth::Cw40, SecondaryChannel::Below);
        let mut buff = Vec::<u8>::new();
        write_oci(&GlobalOperClasses, &ci, 0, &mut buff).unwrap();
        assert_eq!(&buff, &[84, 6, 0]);
    }

    #[test]
    fn write_kde() {
        let mut buff = BytesMut::new();
        write_oci_kde(&GlobalOperClasses, &ci_5g_80(), 5, &mut buff).unwrap();

        assert_eq!(buff.len(), OCV_OCI_KDE_LEN);
        assert_eq!(&buff[..], &[0xdd, 7, 0x00, 0x0f, 0xac, 0x0d, 128, 36, 5]);
    }

    #[test]
    fn write_extended() {
        let mut buff = [0u8; 16];
        let mut cursor = &mut buff[..];
        write_extended_oci(&GlobalOperClasses, &ci_5g_80(), 0, &mut cursor).unwrap();
        let remaining = cursor.len();

        let n = buff.len() - remaining;
        assert_eq!(n, OCV_OCI_EXTENDED_LEN);
        assert_eq!(&buff[..n], &[0xff, 4, 54, 128, 36, 0]);
    }

    #[test]
    fn write_appends() {
        let mut buff: Vec<u8> = std::vec![0xaa, 0xbb];
        write_oci(&GlobalOperClasses, &ci_5g_80(), 0, &mut buff).unwrap();
        write_extended_oci(&GlobalOperClasses, &ci_5g_80(), 1, &mut buff).unwrap();

        assert_eq!(&buff, &[0xaa, 0xbb, 128, 36, 0, 0xff, 4, 54, 128, 36, 1]);
    }

    #[test]
    fn write_not_representable() {
        let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, simplelog::Config::default());

        let ci = ChannelInfo::new(2437, ChannelWidth::Cw80, SecondaryChannel::None);
        let expected = Err(EncodeError::ChannelNotRepresentable {
            freq: 2437,
            width: ChannelWidth::Cw80,
            sec: SecondaryChannel::None,
        });

        let mut buff = Vec::<u8>::new();
        assert_eq!(write_oci(&GlobalOperClasses, &ci, 0, &mut buff), expected);
        assert_eq!(write_oci_kde(&GlobalOperClasses, &ci, 0, &mut buff), expected);
        assert_eq!(write_extended_oci(&GlobalOperClasses, &ci, 0, &mut buff), expected);

        // No partial elements
        assert!(buff.is_empty());
    }

    #[test]
    fn parse_kde() {
        let mut buff = Vec::<u8>::new();
        write_oci_kde(&GlobalOperClasses, &ci_5g_80(), 2, &mut buff).unwrap();
        assert_eq!(parse_oci_kde(&buff), Some(&[128, 36, 2][..]));

        // Trailing elements are ignored
        buff.extend_from_slice(&[0xdd, 0x00]);
        assert_eq!(parse_oci_kde(&buff), Some(&[128, 36, 2][..]));

        // Short payloads are returned for verification to reject
        assert_eq!(
            parse_oci_kde(&[0xdd, 6, 0x00, 0x0f, 0xac, 0x0d, 128, 36]),
            Some(&[128, 36][..])
        );

        // Other KDEs
        assert_eq!(parse_oci_kde(&[0xdd, 7, 0x00, 0x0f, 0xac, 0x01, 128, 36, 0]), None);
        // Truncated
        assert_eq!(parse_oci_kde(&[0xdd, 7, 0x00, 0x0f, 0xac, 0x0d, 128]), None);
        assert_eq!(parse_oci_kde(&[0x30, 7, 0x00, 0x0f, 0xac, 0x0d, 128, 36, 0]), None);
    }

    #[test]
    fn parse_extended() {
        let mut buff = Vec::<u8>::new();
        write_extended_oci(&GlobalOperClasses, &ci_5g_80(), 0, &mut buff).unwrap();
        assert_eq!(parse_extended_oci(&buff), Some(&[128, 36, 0][..]));

        assert_eq!(parse_extended_oci(&[0xff, 5, 54, 128, 36, 0, 1]), Some(&[128, 36, 0, 1][..]));
        assert_eq!(parse_extended_oci(&[0xff, 4, 55, 128, 36, 0]), None);
        assert_eq!(parse_extended_oci(&[0xff, 4, 54, 128]), None);
        assert_eq!(parse_extended_oci(&[0xdd, 4, 54, 128, 36, 0]), None);
    }
}
