use embedded_hal::digital::InputPin;

use infiltra_core::input::{InputSource, RawButtons};

#[derive(Debug, Clone, Copy)]
pub struct ButtonConfig {
    active_low: bool,
    debounce_polls: u8,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active_low: true,
            debounce_polls: 1,
        }
    }
}

impl ButtonConfig {
    pub const fn with_active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    /// Polls a new level must hold before it is reported; 0 reports immediately.
    pub const fn with_debounce_polls(mut self, debounce_polls: u8) -> Self {
        self.debounce_polls = debounce_polls;
        self
    }
}

#[derive(Debug)]
pub enum ButtonInputError<AErr, BErr, CErr> {
    A(AErr),
    B(BErr),
    C(CErr),
}

type ButtonResult<AErr, BErr, CErr, T> = Result<T, ButtonInputError<AErr, BErr, CErr>>;

#[derive(Debug, Clone, Copy, Default)]
struct Debounce {
    raw: bool,
    stable: bool,
    stable_count: u8,
}

impl Debounce {
    fn seeded(pressed: bool) -> Self {
        Self {
            raw: pressed,
            stable: pressed,
            stable_count: 0,
        }
    }

    fn update(&mut self, pressed: bool, threshold: u8) -> bool {
        if pressed == self.raw {
            self.stable_count = self.stable_count.saturating_add(1);
        } else {
            self.raw = pressed;
            self.stable_count = 0;
        }

        if self.stable_count >= threshold {
            self.stable = self.raw;
        }
        self.stable
    }
}

/// Three front-panel buttons on dedicated GPIOs.
#[derive(Debug)]
pub struct GpioButtons<A, B, C> {
    a: A,
    b: B,
    c: C,
    config: ButtonConfig,
    state: [Debounce; 3],
}

impl<A, B, C> GpioButtons<A, B, C>
where
    A: InputPin,
    B: InputPin,
    C: InputPin,
{
    /// Seeds debounce state from the current levels so a button held at boot
    /// does not produce an edge.
    pub fn new(
        mut a: A,
        mut b: B,
        mut c: C,
        config: ButtonConfig,
    ) -> ButtonResult<A::Error, B::Error, C::Error, Self> {
        let a_high = a.is_high().map_err(ButtonInputError::A)?;
        let b_high = b.is_high().map_err(ButtonInputError::B)?;
        let c_high = c.is_high().map_err(ButtonInputError::C)?;

        let state = [
            Debounce::seeded(pressed_from_level(a_high, config.active_low)),
            Debounce::seeded(pressed_from_level(b_high, config.active_low)),
            Debounce::seeded(pressed_from_level(c_high, config.active_low)),
        ];

        Ok(Self {
            a,
            b,
            c,
            config,
            state,
        })
    }
}

impl<A, B, C> InputSource for GpioButtons<A, B, C>
where
    A: InputPin,
    B: InputPin,
    C: InputPin,
{
    type Error = ButtonInputError<A::Error, B::Error, C::Error>;

    fn sample(&mut self) -> Result<RawButtons, Self::Error> {
        let a_high = self.a.is_high().map_err(ButtonInputError::A)?;
        let b_high = self.b.is_high().map_err(ButtonInputError::B)?;
        let c_high = self.c.is_high().map_err(ButtonInputError::C)?;

        let active_low = self.config.active_low;
        let threshold = self.config.debounce_polls;
        Ok(RawButtons {
            a: self.state[0].update(pressed_from_level(a_high, active_low), threshold),
            b: self.state[1].update(pressed_from_level(b_high, active_low), threshold),
            c: self.state[2].update(pressed_from_level(c_high, active_low), threshold),
            escape: false,
        })
    }
}

#[inline]
fn pressed_from_level(level_high: bool, active_low: bool) -> bool {
    if active_low { !level_high } else { level_high }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::{cell::Cell, convert::Infallible};
    use std::rc::Rc;

    #[derive(Clone)]
    struct SharedPin(Rc<Cell<bool>>);

    impl SharedPin {
        fn new(high: bool) -> Self {
            Self(Rc::new(Cell::new(high)))
        }

        fn set(&self, high: bool) {
            self.0.set(high);
        }
    }

    impl embedded_hal::digital::ErrorType for SharedPin {
        type Error = Infallible;
    }

    impl InputPin for SharedPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0.get())
        }
    }

    fn released_pins() -> (SharedPin, SharedPin, SharedPin) {
        (SharedPin::new(true), SharedPin::new(true), SharedPin::new(true))
    }

    #[test]
    fn active_low_press_reports_after_debounce() {
        let (a, b, c) = released_pins();
        let handle = a.clone();
        let mut buttons = GpioButtons::new(a, b, c, ButtonConfig::default()).unwrap();

        handle.set(false);
        assert!(!buttons.sample().unwrap().a);
        assert!(buttons.sample().unwrap().a);

        handle.set(true);
        assert!(buttons.sample().unwrap().a);
        assert!(!buttons.sample().unwrap().a);
    }

    #[test]
    fn bounce_shorter_than_threshold_is_ignored() {
        let (a, b, c) = released_pins();
        let handle = b.clone();
        let config = ButtonConfig::default().with_debounce_polls(2);
        let mut buttons = GpioButtons::new(a, b, c, config).unwrap();

        handle.set(false);
        buttons.sample().unwrap();
        handle.set(true);
        buttons.sample().unwrap();
        assert!(!buttons.sample().unwrap().b);
    }

    #[test]
    fn zero_debounce_is_immediate_and_escape_stays_released() {
        let (a, b, c) = released_pins();
        let handle = c.clone();
        let config = ButtonConfig::default().with_debounce_polls(0);
        let mut buttons = GpioButtons::new(a, b, c, config).unwrap();

        handle.set(false);
        let raw = buttons.sample().unwrap();
        assert!(raw.c);
        assert!(!raw.escape);
    }

    #[test]
    fn button_held_at_boot_reads_pressed_without_transition() {
        let (a, b, c) = released_pins();
        a.set(false);
        let mut buttons = GpioButtons::new(a, b, c, ButtonConfig::default()).unwrap();
        assert!(buttons.sample().unwrap().a);
    }
}
