//! IR frame model and pulse-train decoding.
//!
//! Durations are microseconds, alternating mark/space, starting with a mark.

use heapless::Vec;

/// Raw durations kept per captured frame.
pub const IR_RAW_CAPACITY: usize = 256;

pub type RawDurations = Vec<u16, IR_RAW_CAPACITY>;

const TOLERANCE_DIV: u16 = 4;

const NEC_HEADER_MARK: u16 = 9_000;
const NEC_HEADER_SPACE: u16 = 4_500;
const NEC_REPEAT_SPACE: u16 = 2_250;
const SAMSUNG_HEADER_MARK: u16 = 4_500;
const SAMSUNG_HEADER_SPACE: u16 = 4_500;
const BIT_MARK: u16 = 560;
const ZERO_SPACE: u16 = 560;
const ONE_SPACE: u16 = 1_690;
const DATA_BITS: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IrProtocol {
    Nec,
    NecRepeat,
    Samsung,
    Unknown,
}

impl IrProtocol {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nec => "NEC",
            Self::NecRepeat => "NEC-RPT",
            Self::Samsung => "SAMSUNG",
            Self::Unknown => "UNK",
        }
    }
}

/// One decoded (or undecodable) IR frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IrFrame {
    pub protocol: IrProtocol,
    pub address: u32,
    pub command: u32,
    pub value: u64,
    pub raw: RawDurations,
}

impl IrFrame {
    pub fn unknown(durations: &[u16]) -> Self {
        Self {
            protocol: IrProtocol::Unknown,
            address: 0,
            command: 0,
            value: 0,
            raw: copy_raw(durations),
        }
    }
}

/// Non-blocking IR receiver.
pub trait IrReceiver {
    /// Arms the receiver and drops any partially captured frame.
    fn enable(&mut self);

    /// Returns a completed frame if one is ready; never waits.
    fn poll_frame(&mut self) -> Option<IrFrame>;
}

/// Decodes one captured pulse train.
pub fn decode(durations: &[u16]) -> IrFrame {
    if durations.len() < 3 {
        return IrFrame::unknown(durations);
    }

    let (mark, space) = (durations[0], durations[1]);

    if within(mark, NEC_HEADER_MARK) && within(space, NEC_REPEAT_SPACE) {
        return IrFrame {
            protocol: IrProtocol::NecRepeat,
            address: 0,
            command: 0,
            value: 0,
            raw: copy_raw(durations),
        };
    }

    let protocol = if within(mark, NEC_HEADER_MARK) && within(space, NEC_HEADER_SPACE) {
        IrProtocol::Nec
    } else if within(mark, SAMSUNG_HEADER_MARK) && within(space, SAMSUNG_HEADER_SPACE) {
        IrProtocol::Samsung
    } else {
        return IrFrame::unknown(durations);
    };

    let Some(bits) = decode_bits(&durations[2..]) else {
        return IrFrame::unknown(durations);
    };

    let bytes = bits.to_le_bytes();
    let (address, command) = match protocol {
        IrProtocol::Nec => (
            nec_field(bytes[0], bytes[1]),
            nec_field(bytes[2], bytes[3]),
        ),
        _ => (
            if bytes[0] == bytes[1] {
                bytes[0] as u32
            } else {
                u16::from_le_bytes([bytes[0], bytes[1]]) as u32
            },
            nec_field(bytes[2], bytes[3]),
        ),
    };

    IrFrame {
        protocol,
        address,
        command,
        value: bits as u64,
        raw: copy_raw(durations),
    }
}

/// Pulse-distance bits, LSB first.
fn decode_bits(data: &[u16]) -> Option<u32> {
    if data.len() < DATA_BITS * 2 {
        return None;
    }

    let mut bits = 0u32;
    for bit in 0..DATA_BITS {
        let mark = data[bit * 2];
        let space = data[bit * 2 + 1];
        if !within(mark, BIT_MARK) {
            return None;
        }
        if within(space, ONE_SPACE) {
            bits |= 1 << bit;
        } else if !within(space, ZERO_SPACE) {
            return None;
        }
    }

    Some(bits)
}

/// 8-bit value when followed by its complement, 16-bit otherwise.
fn nec_field(lo: u8, hi: u8) -> u32 {
    if lo == !hi {
        lo as u32
    } else {
        u16::from_le_bytes([lo, hi]) as u32
    }
}

#[inline]
fn within(measured: u16, expected: u16) -> bool {
    measured.abs_diff(expected) <= expected / TOLERANCE_DIV
}

fn copy_raw(durations: &[u16]) -> RawDurations {
    let mut raw = RawDurations::new();
    let take = durations.len().min(IR_RAW_CAPACITY);
    let _ = raw.extend_from_slice(&durations[..take]);
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse_train(header: (u16, u16), payload: u32) -> std::vec::Vec<u16> {
        let mut out = std::vec![header.0, header.1];
        for bit in 0..32 {
            out.push(BIT_MARK);
            out.push(if payload & (1 << bit) != 0 {
                ONE_SPACE
            } else {
                ZERO_SPACE
            });
        }
        out.push(BIT_MARK);
        out
    }

    fn nec_payload(address: u8, command: u8) -> u32 {
        u32::from_le_bytes([address, !address, command, !command])
    }

    #[test]
    fn decodes_standard_nec() {
        let frame = decode(&pulse_train((9_000, 4_500), nec_payload(0x04, 0x08)));
        assert_eq!(frame.protocol, IrProtocol::Nec);
        assert_eq!(frame.address, 0x04);
        assert_eq!(frame.command, 0x08);
        assert_eq!(frame.value, nec_payload(0x04, 0x08) as u64);
        assert_eq!(frame.raw.len(), 67);
    }

    #[test]
    fn extended_nec_address_keeps_both_bytes() {
        let payload = u32::from_le_bytes([0x12, 0x34, 0x56, !0x56]);
        let frame = decode(&pulse_train((9_000, 4_500), payload));
        assert_eq!(frame.protocol, IrProtocol::Nec);
        assert_eq!(frame.address, 0x3412);
        assert_eq!(frame.command, 0x56);
    }

    #[test]
    fn tolerates_timing_jitter() {
        let mut train = pulse_train((8_600, 4_700), nec_payload(0x01, 0x02));
        for (i, d) in train.iter_mut().enumerate().skip(2) {
            *d = if i % 2 == 0 { *d + 60 } else { *d - 40 };
        }
        let frame = decode(&train);
        assert_eq!(frame.protocol, IrProtocol::Nec);
        assert_eq!(frame.command, 0x02);
    }

    #[test]
    fn decodes_repeat_code() {
        let frame = decode(&[9_000, 2_250, 560]);
        assert_eq!(frame.protocol, IrProtocol::NecRepeat);
    }

    #[test]
    fn decodes_samsung_header() {
        let payload = u32::from_le_bytes([0x07, 0x07, 0x02, !0x02]);
        let frame = decode(&pulse_train((4_500, 4_500), payload));
        assert_eq!(frame.protocol, IrProtocol::Samsung);
        assert_eq!(frame.address, 0x07);
        assert_eq!(frame.command, 0x02);
    }

    #[test]
    fn truncated_or_foreign_trains_are_unknown() {
        let mut train = pulse_train((9_000, 4_500), nec_payload(1, 2));
        train.truncate(20);
        assert_eq!(decode(&train).protocol, IrProtocol::Unknown);

        let frame = decode(&[2_400, 600, 1_200, 600, 600]);
        assert_eq!(frame.protocol, IrProtocol::Unknown);
        assert_eq!(frame.raw.as_slice(), &[2_400, 600, 1_200, 600, 600]);
    }

    #[test]
    fn raw_capture_is_capped() {
        let train = [600u16; IR_RAW_CAPACITY + 40];
        assert_eq!(decode(&train).raw.len(), IR_RAW_CAPACITY);
    }
}
