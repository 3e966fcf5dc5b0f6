//! Input abstraction layer.

mod edges;
pub mod mock;

pub use edges::{EdgeDetector, Edges};

/// Raw button levels sampled once per tick (`true` = held).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RawButtons {
    pub a: bool,
    pub b: bool,
    pub c: bool,
    /// Dedicated escape key; always released on pin-button surfaces.
    pub escape: bool,
}

impl RawButtons {
    pub const RELEASED: Self = Self {
        a: false,
        b: false,
        c: false,
        escape: false,
    };
}

/// Kind of physical input surface the board exposes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InputSurface {
    /// Three GPIO buttons; C doubles as back.
    #[default]
    Buttons,
    /// Keyboard matrix with a distinct escape key.
    Keyboard,
}

/// Polled raw-level provider.
pub trait InputSource {
    type Error;

    /// Reads the current level of every logical button. Called exactly once per tick.
    fn sample(&mut self) -> Result<RawButtons, Self::Error>;
}
