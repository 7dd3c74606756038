//! OCV crate prelude
//
// https://github.com/rust-iot/rust-ocv
// Copyright 2021 Ryan Kurte

pub use crate::Ocv;

pub use crate::channel::{ChannelDescription, ChannelInfo, ChannelWidth, Oci, SecondaryChannel, TxParams};

pub use crate::error::{DeriveError, EncodeError, Error, OcvError};

pub use crate::opclass::{GlobalOperClasses, OperClassTable};

pub use crate::params::derive_all_parameters;

pub use crate::oci::{parse_extended_oci, parse_oci_kde, write_extended_oci, write_oci, write_oci_kde};

pub use crate::verify::verify_tx_params;
