//! Board input surfaces feeding [`infiltra_core::input::InputSource`].

pub mod buttons;
pub mod keyboard;

pub use buttons::{ButtonConfig, ButtonInputError, GpioButtons};
pub use keyboard::{KeyboardError, KeyboardMatrix};
