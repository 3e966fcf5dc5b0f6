use embedded_hal::digital::{InputPin, OutputPin};

use infiltra_core::input::{InputSource, RawButtons};

/// Decoder select lines driving the 3-to-8 row demultiplexer.
pub const SELECT_LINES: usize = 3;
/// Column sense inputs, active low.
pub const SENSE_LINES: usize = 7;
const SCAN_STEPS: u8 = 1 << SELECT_LINES;

/// Position in the 4x14 key layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyPosition {
    pub row: u8,
    pub col: u8,
}

impl KeyPosition {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Enter.
pub const KEY_A: KeyPosition = KeyPosition::new(2, 13);
/// `.`
pub const KEY_B: KeyPosition = KeyPosition::new(3, 11);
/// `;`
pub const KEY_C: KeyPosition = KeyPosition::new(2, 11);
/// `` ` ``
pub const KEY_ESCAPE: KeyPosition = KeyPosition::new(0, 0);

/// Maps a decoder step and sense bit to its layout position.
pub const fn matrix_position(step: u8, sense_bit: u8) -> KeyPosition {
    let col = if step > 3 {
        sense_bit * 2
    } else {
        sense_bit * 2 + 1
    };
    KeyPosition::new(3 - (step & 3), col)
}

#[derive(Debug)]
pub enum KeyboardError<SelErr, SenseErr> {
    Select(SelErr),
    Sense(SenseErr),
}

/// Scanned keyboard matrix exposing A/B/C/escape as raw levels.
#[derive(Debug)]
pub struct KeyboardMatrix<O, I> {
    select: [O; SELECT_LINES],
    sense: [I; SENSE_LINES],
}

impl<O, I> KeyboardMatrix<O, I>
where
    O: OutputPin,
    I: InputPin,
{
    pub fn new(select: [O; SELECT_LINES], sense: [I; SENSE_LINES]) -> Self {
        Self { select, sense }
    }

    fn drive_step(&mut self, step: u8) -> Result<(), KeyboardError<O::Error, I::Error>> {
        for (bit, pin) in self.select.iter_mut().enumerate() {
            if step & (1 << bit) != 0 {
                pin.set_high().map_err(KeyboardError::Select)?;
            } else {
                pin.set_low().map_err(KeyboardError::Select)?;
            }
        }
        Ok(())
    }
}

impl<O, I> InputSource for KeyboardMatrix<O, I>
where
    O: OutputPin,
    I: InputPin,
{
    type Error = KeyboardError<O::Error, I::Error>;

    fn sample(&mut self) -> Result<RawButtons, Self::Error> {
        let mut raw = RawButtons::RELEASED;

        for step in 0..SCAN_STEPS {
            self.drive_step(step)?;
            for (bit, pin) in self.sense.iter_mut().enumerate() {
                if !pin.is_low().map_err(KeyboardError::Sense)? {
                    continue;
                }
                match matrix_position(step, bit as u8) {
                    KEY_A => raw.a = true,
                    KEY_B => raw.b = true,
                    KEY_C => raw.c = true,
                    KEY_ESCAPE => raw.escape = true,
                    _ => {}
                }
            }
        }

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::{cell::Cell, convert::Infallible};
    use std::rc::Rc;

    /// Decoder output shared between the select pins and the sense pins.
    #[derive(Clone, Default)]
    struct Bus {
        step: Rc<Cell<u8>>,
        pressed: Rc<Cell<Option<KeyPosition>>>,
    }

    struct SelectPin {
        bus: Bus,
        bit: u8,
    }

    impl embedded_hal::digital::ErrorType for SelectPin {
        type Error = Infallible;
    }

    impl OutputPin for SelectPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let step = self.bus.step.get() & !(1 << self.bit);
            self.bus.step.set(step);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let step = self.bus.step.get() | (1 << self.bit);
            self.bus.step.set(step);
            Ok(())
        }
    }

    struct SensePin {
        bus: Bus,
        bit: u8,
    }

    impl embedded_hal::digital::ErrorType for SensePin {
        type Error = Infallible;
    }

    impl InputPin for SensePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.is_low().map(|low| !low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            let here = matrix_position(self.bus.step.get(), self.bit);
            Ok(self.bus.pressed.get() == Some(here))
        }
    }

    fn make_matrix(bus: &Bus) -> KeyboardMatrix<SelectPin, SensePin> {
        let select = core::array::from_fn(|bit| SelectPin {
            bus: bus.clone(),
            bit: bit as u8,
        });
        let sense = core::array::from_fn(|bit| SensePin {
            bus: bus.clone(),
            bit: bit as u8,
        });
        KeyboardMatrix::new(select, sense)
    }

    #[test]
    fn layout_positions_match_scan_order() {
        assert_eq!(matrix_position(0, 0), KeyPosition::new(3, 1));
        assert_eq!(matrix_position(4, 0), KeyPosition::new(3, 0));
        assert_eq!(matrix_position(7, 0), KeyPosition::new(0, 0));
        assert_eq!(matrix_position(5, 6), KeyPosition::new(2, 12));
        assert_eq!(matrix_position(1, 6), KeyPosition::new(2, 13));
    }

    #[test]
    fn every_layout_cell_is_reachable_once() {
        let mut seen = [[0u8; 14]; 4];
        for step in 0..SCAN_STEPS {
            for bit in 0..SENSE_LINES as u8 {
                let pos = matrix_position(step, bit);
                seen[pos.row as usize][pos.col as usize] += 1;
            }
        }
        assert!(seen.iter().flatten().all(|count| *count == 1));
    }

    #[test]
    fn mapped_keys_report_their_button() {
        let bus = Bus::default();
        let mut matrix = make_matrix(&bus);

        let expected = |a, b, c, escape| RawButtons { a, b, c, escape };
        for (key, want) in [
            (KEY_A, expected(true, false, false, false)),
            (KEY_B, expected(false, true, false, false)),
            (KEY_C, expected(false, false, true, false)),
            (KEY_ESCAPE, expected(false, false, false, true)),
        ] {
            bus.pressed.set(Some(key));
            assert_eq!(matrix.sample().unwrap(), want);
        }
    }

    #[test]
    fn unmapped_key_is_ignored() {
        let bus = Bus::default();
        let mut matrix = make_matrix(&bus);
        bus.pressed.set(Some(KeyPosition::new(1, 3)));
        assert_eq!(matrix.sample().unwrap(), RawButtons::RELEASED);
    }
}
