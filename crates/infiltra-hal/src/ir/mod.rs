//! Interrupt-fed IR receiver.

mod capture;

pub use capture::{CapturedIrReceiver, IrCaptureConfig, MicrosClock, PulseCapture};
