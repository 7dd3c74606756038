//! Operating class tables
//
// https://github.com/rust-iot/rust-ocv
// Copyright 2021 Ryan Kurte

use core::iter::StepBy;
use core::ops::RangeInclusive;

use crate::channel::{ChannelWidth, SecondaryChannel};

/// Bandwidth tag of an operating class
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    Bw20,
    /// 40 MHz, secondary channel above the primary
    Bw40Plus,
    /// 40 MHz, secondary channel below the primary
    Bw40Minus,
    Bw80,
    Bw160,
    Bw80P80,
}

impl Bandwidth {
    pub fn channel_width(&self) -> ChannelWidth {
        match self {
            Bandwidth::Bw20 => ChannelWidth::Cw20,
            Bandwidth::Bw40Plus | Bandwidth::Bw40Minus => ChannelWidth::Cw40,
            Bandwidth::Bw80 => ChannelWidth::Cw80,
            Bandwidth::Bw160 => ChannelWidth::Cw160,
            Bandwidth::Bw80P80 => ChannelWidth::Cw80P80,
        }
    }

    pub fn sec_channel(&self) -> SecondaryChannel {
        match self {
            Bandwidth::Bw40Plus => SecondaryChannel::Above,
            Bandwidth::Bw40Minus => SecondaryChannel::Below,
            _ => SecondaryChannel::None,
        }
    }
}

/// Operating class descriptor
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OperClass {
    op_class: u8,
    min_chan: u8,
    max_chan: u8,
    /// Channel number increment between valid channels, never zero
    inc: u8,
    bw: Bandwidth,
}

impl OperClass {
    /// Create a class descriptor, an increment of zero is treated as one
    pub const fn new(op_class: u8, min_chan: u8, max_chan: u8, inc: u8, bw: Bandwidth) -> Self {
        let inc = if inc == 0 { 1 } else { inc };
        Self { op_class, min_chan, max_chan, inc, bw }
    }

    pub fn op_class(&self) -> u8 {
        self.op_class
    }

    pub fn bw(&self) -> Bandwidth {
        self.bw
    }

    /// Iterate over the valid channel numbers of this class
    pub fn channels(&self) -> StepBy<RangeInclusive<u8>> {
        (self.min_chan..=self.max_chan).step_by(self.inc as usize)
    }
}

/// Regulatory lookup service used to interpret and produce OCIs
pub trait OperClassTable {
    /// Primary channel frequency in MHz for an operating class / channel pair
    fn chan_to_freq(&self, op_class: u8, channel: u8) -> Option<i32>;

    /// Descriptor for an operating class
    fn oper_class(&self, op_class: u8) -> Option<OperClass>;

    /// Operating class and channel describing a channel in use
    fn chaninfo_to_channel(&self, freq: i32, width: ChannelWidth, sec: SecondaryChannel) -> Option<(u8, u8)>;
}

impl<T: OperClassTable + ?Sized> OperClassTable for &T {
    fn chan_to_freq(&self, op_class: u8, channel: u8) -> Option<i32> {
        (**self).chan_to_freq(op_class, channel)
    }

    fn oper_class(&self, op_class: u8) -> Option<OperClass> {
        (**self).oper_class(op_class)
    }

    fn chaninfo_to_channel(&self, freq: i32, width: ChannelWidth, sec: SecondaryChannel) -> Option<(u8, u8)> {
        (**self).chaninfo_to_channel(freq, width, sec)
    }
}

/// Global operating classes per IEEE Std 802.11-2016 Table E-4
pub const GLOBAL_OPER_CLASSES: &[OperClass] = &[
    OperClass::new(81, 1, 13, 1, Bandwidth::Bw20),
    OperClass::new(82, 14, 14, 1, Bandwidth::Bw20),
    OperClass::new(83, 1, 9, 1, Bandwidth::Bw40Plus),
    OperClass::new(84, 5, 13, 1, Bandwidth::Bw40Minus),
    OperClass::new(115, 36, 48, 4, Bandwidth::Bw20),
    OperClass::new(116, 36, 44, 8, Bandwidth::Bw40Plus),
    OperClass::new(117, 40, 48, 8, Bandwidth::Bw40Minus),
    OperClass::new(118, 52, 64, 4, Bandwidth::Bw20),
    OperClass::new(119, 52, 60, 8, Bandwidth::Bw40Plus),
    OperClass::new(120, 56, 64, 8, Bandwidth::Bw40Minus),
    OperClass::new(121, 100, 144, 4, Bandwidth::Bw20),
    OperClass::new(122, 100, 140, 8, Bandwidth::Bw40Plus),
    OperClass::new(123, 104, 144, 8, Bandwidth::Bw40Minus),
    OperClass::new(124, 149, 161, 4, Bandwidth::Bw20),
    OperClass::new(125, 149, 169, 4, Bandwidth::Bw20),
    OperClass::new(126, 149, 157, 8, Bandwidth::Bw40Plus),
    OperClass::new(127, 153, 161, 8, Bandwidth::Bw40Minus),
    // 80 and 80+80 MHz classes are addressed by any 20 MHz channel rather
    // than the center frequency indices (42, 58, 106, 122, 138, 155)
    OperClass::new(128, 36, 161, 4, Bandwidth::Bw80),
    OperClass::new(129, 50, 114, 16, Bandwidth::Bw160),
    OperClass::new(130, 36, 161, 4, Bandwidth::Bw80P80),
];

/// Global operating class table (2.4 and 5 GHz bands)
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct GlobalOperClasses;

impl OperClassTable for GlobalOperClasses {
    fn chan_to_freq(&self, op_class: u8, channel: u8) -> Option<i32> {
        // (first channel, last channel, base frequency)
        let (lo, hi, base) = match op_class {
            81 | 83 | 84 => (1, 13, 2407),
            82 => (14, 14, 2414),
            115..=120 => (36, 64, 5000),
            121..=123 => (100, 144, 5000),
            124 | 126 | 127 => (149, 161, 5000),
            125 => (149, 169, 5000),
            128 | 130 => (36, 161, 5000),
            129 => (36, 128, 5000),
            _ => return None,
        };

        if channel < lo || channel > hi {
            return None;
        }

        Some(base + 5 * channel as i32)
    }

    fn oper_class(&self, op_class: u8) -> Option<OperClass> {
        GLOBAL_OPER_CLASSES.iter().find(|c| c.op_class == op_class).cloned()
    }

    fn chaninfo_to_channel(&self, freq: i32, width: ChannelWidth, sec: SecondaryChannel) -> Option<(u8, u8)> {
        let vht_class = match width {
            ChannelWidth::Cw20 | ChannelWidth::Cw40 => None,
            ChannelWidth::Cw80 => Some(128),
            ChannelWidth::Cw160 => Some(129),
            ChannelWidth::Cw80P80 => Some(130),
        };

        // 2.4 GHz, channels 1..13
        if (2412..=2472).contains(&freq) {
            if (freq - 2407) % 5 != 0 || vht_class.is_some() {
                return None;
            }

            let op_class = match sec {
                SecondaryChannel::Above => 83,
                SecondaryChannel::Below => 84,
                SecondaryChannel::None => 81,
            };

            return Some((op_class, ((freq - 2407) / 5) as u8));
        }

        // 2.4 GHz, channel 14
        if freq == 2484 {
            if sec != SecondaryChannel::None || vht_class.is_some() {
                return None;
            }

            return Some((82, 14));
        }

        // 5 GHz, channels 36..169
        if freq < 5000 || freq >= 5900 || (freq - 5000) % 5 != 0 {
            return None;
        }

        let channel = ((freq - 5000) / 5) as u8;

        let op_class = match vht_class {
            Some(c) => c,
            None => {
                // (20 MHz, 40 MHz above, 40 MHz below)
                let (ht20, ht40plus, ht40minus) = match freq {
                    5180..=5240 => (115, 116, 117),
                    5260..=5320 => (118, 119, 120),
                    5500..=5720 => (121, 122, 123),
                    5745..=5805 => (124, 126, 127),
                    5806..=5845 => (125, 126, 127),
                    _ => return None,
                };

                match sec {
                    SecondaryChannel::Above => ht40plus,
                    SecondaryChannel::Below => ht40minus,
                    SecondaryChannel::None => ht20,
                }
            }
        };

        // Only produce pairs that map back to a frequency
        self.chan_to_freq(op_class, channel).map(|_| (op_class, channel))
    }
}

#[cfg(any(test, feature = "mocks"))]
pub mod mock {
    use super::*;

    /// Mock operating class table with fixed answers, for exercising
    /// lookup failures the global table cannot produce
    #[derive(Clone, Debug, Default)]
    pub struct MockTable {
        pub freq: Option<i32>,
        pub class: Option<OperClass>,
        pub channel: Option<(u8, u8)>,
    }

    impl MockTable {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_freq(mut self, freq: i32) -> Self {
            self.freq = Some(freq);
            self
        }

        pub fn with_class(mut self, op_class: u8, bw: Bandwidth) -> Self {
            self.class = Some(OperClass::new(op_class, 1, 255, 1, bw));
            self
        }

        pub fn with_channel(mut self, op_class: u8, channel: u8) -> Self {
            self.channel = Some((op_class, channel));
            self
        }
    }

    impl OperClassTable for MockTable {
        fn chan_to_freq(&self, _op_class: u8, _channel: u8) -> Option<i32> {
            self.freq
        }

        fn oper_class(&self, _op_class: u8) -> Option<OperClass> {
            self.class
        }

        fn chaninfo_to_channel(&self, _freq: i32, _width: ChannelWidth, _sec: SecondaryChannel) -> Option<(u8, u8)> {
            self.channel
        }
    }
}
