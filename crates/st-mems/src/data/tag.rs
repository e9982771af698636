//! ST1VAFE3BX tagged FIFO records.
//!
//! Every record is one FIFO_DATA_OUT_TAG byte (tag in bits 3..7) followed by
//! six payload bytes. The payload layout depends on the tag and, for
//! accelerometer + vAFE records, on FIFO_WTM.xl_only_fifo.

use super::{AccelRaw, VafeRaw};
use crate::register::st1vafe3bx::fifo_data_out_tag;

/// Bytes per FIFO record (tag + payload).
pub const FIFO_RECORD_LEN: usize = 7;

/// FIFO record tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoTag {
    /// No data.
    Empty,
    /// Two 8-bit accelerometer samples (2X depth).
    XlOnly2x,
    /// Timestamp / configuration change.
    TimestampCfgChg,
    /// Step counter.
    StepCounter,
    /// Machine-learning core result.
    MlcResult,
    /// Machine-learning core filter.
    MlcFilter,
    /// Machine-learning core feature.
    MlcFeature,
    /// Finite-state-machine result.
    FsmResult,
    /// vAFE sample only.
    AhVafeOnly,
    /// Accelerometer sample, with or without vAFE.
    XlAndAhVafe1,
    /// Tag value not listed in the datasheet.
    Unknown(u8),
}

impl FifoTag {
    /// Decodes a FIFO_DATA_OUT_TAG register value.
    pub const fn from_tag_byte(byte: u8) -> Self {
        match byte >> fifo_data_out_tag::TAG_SHIFT {
            0x00 => Self::Empty,
            0x03 => Self::XlOnly2x,
            0x04 => Self::TimestampCfgChg,
            0x12 => Self::StepCounter,
            0x1A => Self::MlcResult,
            0x1B => Self::MlcFilter,
            0x1C => Self::MlcFeature,
            0x1D => Self::FsmResult,
            0x1E => Self::AhVafeOnly,
            0x1F => Self::XlAndAhVafe1,
            other => Self::Unknown(other),
        }
    }
}

/// Timestamp / configuration-change record payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CfgChange {
    /// ODR or BDR changed.
    pub cfg_change: bool,
    /// ODR code (CTRL5.odr).
    pub odr: u8,
    /// Bandwidth code.
    pub bandwidth: u8,
    /// High-performance mode active.
    pub high_performance: bool,
    /// vAFE enabled.
    pub vafe_enabled: bool,
    /// Full-scale code.
    pub full_scale: u8,
    /// Timestamp decimation code.
    pub timestamp_decimation: u8,
    /// Accelerometer batch rate code.
    pub odr_xl_batch: u8,
    /// Timestamp counter.
    pub timestamp: u32,
}

/// One decoded FIFO record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoRecord {
    /// FIFO had nothing to return.
    Empty,
    /// Two consecutive accelerometer samples at ODR/2 (8-bit precision).
    XlOnly2x([AccelRaw; 2]),
    /// Configuration change with timestamp.
    TimestampCfgChg(CfgChange),
    /// Step count with timestamp.
    StepCounter {
        /// Steps counted.
        steps: u16,
        /// Timestamp counter.
        timestamp: u32,
    },
    /// vAFE sample (16-bit).
    AhVafeOnly(VafeRaw),
    /// Accelerometer sample; `vafe` is present in the packed 12-bit layout.
    XlAndAhVafe1 {
        /// Accelerometer sample.
        accel: AccelRaw,
        /// vAFE sample, absent in accelerometer-only mode.
        vafe: Option<VafeRaw>,
    },
    /// Embedded-function or unknown record, payload undecoded.
    Raw {
        /// Record tag.
        tag: FifoTag,
        /// Payload bytes.
        data: [u8; 6],
    },
}

impl FifoRecord {
    /// Decodes a tag byte plus payload. `xl_only` mirrors FIFO_WTM.xl_only_fifo.
    pub const fn decode(tag_byte: u8, data: [u8; 6], xl_only: bool) -> Self {
        let tag = FifoTag::from_tag_byte(tag_byte);
        match tag {
            FifoTag::Empty => Self::Empty,
            FifoTag::XlOnly2x => Self::XlOnly2x([
                AccelRaw {
                    x: widen_i8(data[0]),
                    y: widen_i8(data[1]),
                    z: widen_i8(data[2]),
                },
                AccelRaw {
                    x: widen_i8(data[3]),
                    y: widen_i8(data[4]),
                    z: widen_i8(data[5]),
                },
            ]),
            FifoTag::TimestampCfgChg => Self::TimestampCfgChg(CfgChange {
                cfg_change: (data[0] >> 7) != 0,
                odr: (data[0] >> 3) & 0x0F,
                bandwidth: (data[0] >> 1) & 0x03,
                high_performance: (data[0] & 0x01) != 0,
                vafe_enabled: (data[1] >> 7) != 0,
                full_scale: (data[1] >> 5) & 0x03,
                timestamp_decimation: (data[1] >> 3) & 0x03,
                odr_xl_batch: data[1] & 0x07,
                timestamp: u32::from_le_bytes([data[2], data[3], data[4], data[5]]),
            }),
            FifoTag::StepCounter => Self::StepCounter {
                steps: u16::from_le_bytes([data[0], data[1]]),
                timestamp: u32::from_le_bytes([data[2], data[3], data[4], data[5]]),
            },
            FifoTag::AhVafeOnly => Self::AhVafeOnly(VafeRaw {
                value: i16::from_le_bytes([data[0], data[1]]),
            }),
            FifoTag::XlAndAhVafe1 => {
                if xl_only {
                    Self::XlAndAhVafe1 {
                        accel: AccelRaw::from_le_bytes(data),
                        vafe: None,
                    }
                } else {
                    Self::XlAndAhVafe1 {
                        accel: AccelRaw {
                            x: widen_12(data[0] as u16 | ((data[1] as u16 & 0x0F) << 8)),
                            y: widen_12((data[1] >> 4) as u16 | ((data[2] as u16) << 4)),
                            z: widen_12(data[3] as u16 | ((data[4] as u16 & 0x0F) << 8)),
                        },
                        vafe: Some(VafeRaw {
                            value: widen_12((data[4] >> 4) as u16 | ((data[5] as u16) << 4)),
                        }),
                    }
                }
            }
            _ => Self::Raw { tag, data },
        }
    }

    /// Decodes a 7-byte record as read from FIFO_DATA_OUT_TAG onwards.
    pub const fn from_bytes(bytes: [u8; FIFO_RECORD_LEN], xl_only: bool) -> Self {
        Self::decode(
            bytes[0],
            [bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6]],
            xl_only,
        )
    }
}

/// 8-bit sample to the 16-bit output scale.
const fn widen_i8(byte: u8) -> i16 {
    ((byte as i8) as i16) << 8
}

/// 12-bit two's complement sample to the 16-bit output scale.
const fn widen_12(bits: u16) -> i16 {
    (bits << 4) as i16
}

/// Iterator over 7-byte FIFO records.
pub struct FifoRecordIterator<'a> {
    data: &'a [u8],
    xl_only: bool,
    offset: usize,
}

impl<'a> FifoRecordIterator<'a> {
    /// Creates an iterator over records; a trailing partial record is ignored.
    pub const fn new(data: &'a [u8], xl_only: bool) -> Self {
        Self {
            data,
            xl_only,
            offset: 0,
        }
    }

    /// Returns the remaining unparsed bytes.
    pub const fn remaining(&self) -> usize {
        if self.offset >= self.data.len() {
            0
        } else {
            self.data.len() - self.offset
        }
    }
}

impl Iterator for FifoRecordIterator<'_> {
    type Item = FifoRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.offset + FIFO_RECORD_LEN;
        let chunk = self.data.get(self.offset..end)?;
        let mut bytes = [0u8; FIFO_RECORD_LEN];
        bytes.copy_from_slice(chunk);
        self.offset = end;
        Some(FifoRecord::from_bytes(bytes, self.xl_only))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn tag(value: u8) -> u8 {
        value << 3
    }

    #[test]
    fn tag_ignores_low_bits() {
        assert_eq!(FifoTag::from_tag_byte(0x1F << 3 | 0x07), FifoTag::XlAndAhVafe1);
        assert_eq!(FifoTag::from_tag_byte(tag(0x04)), FifoTag::TimestampCfgChg);
        assert_eq!(FifoTag::from_tag_byte(tag(0x05)), FifoTag::Unknown(0x05));
    }

    #[test]
    fn packed_accel_and_vafe() {
        // x = 0x123, y = 0x456, z = 0xFFF (-1), vafe = 0x800 (-2048)
        let data = [0x23, 0x61, 0x45, 0xFF, 0x0F, 0x80];
        let record = FifoRecord::decode(tag(0x1F), data, false);
        assert_eq!(
            record,
            FifoRecord::XlAndAhVafe1 {
                accel: AccelRaw {
                    x: 0x1230,
                    y: 0x4560,
                    z: -16,
                },
                vafe: Some(VafeRaw { value: -32_768 }),
            }
        );
    }

    #[test]
    fn accel_only_record_is_plain_little_endian() {
        let data = [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x40];
        let record = FifoRecord::decode(tag(0x1F), data, true);
        assert_eq!(
            record,
            FifoRecord::XlAndAhVafe1 {
                accel: AccelRaw {
                    x: 1,
                    y: -1,
                    z: 0x4000,
                },
                vafe: None,
            }
        );
    }

    #[test]
    fn two_x_record_widens_signed_bytes() {
        let record = FifoRecord::decode(tag(0x03), [0x01, 0xFF, 0x80, 0x7F, 0x00, 0xC8], false);
        let FifoRecord::XlOnly2x(samples) = record else {
            panic!("unexpected record {record:?}");
        };
        assert_eq!(samples[0], AccelRaw { x: 256, y: -256, z: -32_768 });
        assert_eq!(samples[1], AccelRaw { x: 0x7F00, y: 0, z: -14_336 });
    }

    #[test]
    fn cfg_change_fields() {
        let data = [0b1_0101_10_1, 0b1_10_01_011, 0x78, 0x56, 0x34, 0x12];
        let FifoRecord::TimestampCfgChg(cfg) = FifoRecord::decode(tag(0x04), data, false) else {
            panic!("expected cfg change");
        };
        assert!(cfg.cfg_change);
        assert_eq!(cfg.odr, 0b0101);
        assert_eq!(cfg.bandwidth, 0b10);
        assert!(cfg.high_performance);
        assert!(cfg.vafe_enabled);
        assert_eq!(cfg.full_scale, 0b10);
        assert_eq!(cfg.timestamp_decimation, 0b01);
        assert_eq!(cfg.odr_xl_batch, 0b011);
        assert_eq!(cfg.timestamp, 0x1234_5678);
    }

    #[test]
    fn step_counter_and_vafe_only() {
        assert_eq!(
            FifoRecord::decode(tag(0x12), [0x10, 0x27, 1, 0, 0, 0], false),
            FifoRecord::StepCounter {
                steps: 10_000,
                timestamp: 1,
            }
        );
        assert_eq!(
            FifoRecord::decode(tag(0x1E), [0xFE, 0xFF, 0, 0, 0, 0], false),
            FifoRecord::AhVafeOnly(VafeRaw { value: -2 })
        );
    }

    #[test]
    fn embedded_function_payload_is_passed_through() {
        let data = [1, 2, 3, 4, 5, 6];
        assert_eq!(
            FifoRecord::decode(tag(0x1A), data, false),
            FifoRecord::Raw {
                tag: FifoTag::MlcResult,
                data,
            }
        );
    }

    #[test]
    fn iterator_skips_partial_record() {
        let buffer = [
            tag(0x1E), 0x05, 0x00, 0, 0, 0, 0, //
            tag(0x00), 0, 0, 0, 0, 0, 0, //
            tag(0x1E), 0x01,
        ];
        let mut iter = FifoRecordIterator::new(&buffer, false);
        assert_eq!(iter.next(), Some(FifoRecord::AhVafeOnly(VafeRaw { value: 5 })));
        assert_eq!(iter.next(), Some(FifoRecord::Empty));
        assert_eq!(iter.remaining(), 2);
        assert_eq!(iter.next(), None);
    }
}
