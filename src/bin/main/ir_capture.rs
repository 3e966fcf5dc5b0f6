//! GPIO edge interrupt feeding the shared IR pulse buffer.

use core::cell::RefCell;

use critical_section::Mutex;
use esp_hal::{
    gpio::{Event, Input},
    handler, ram,
    time::Instant,
};
use infiltra_hal::ir::{IrCaptureConfig, MicrosClock, PulseCapture};

pub(super) static IR_CAPTURE: PulseCapture = PulseCapture::new(IrCaptureConfig::new());

static IR_PIN: Mutex<RefCell<Option<Input<'static>>>> = Mutex::new(RefCell::new(None));

/// Microseconds since boot from the esp-hal system timer.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct HalClock;

impl MicrosClock for HalClock {
    fn now_us(&self) -> u64 {
        now_us()
    }
}

fn now_us() -> u64 {
    Instant::now().duration_since_epoch().as_micros()
}

/// Arms any-edge interrupts on the receiver pin and hands it to the handler.
pub(super) fn attach(mut pin: Input<'static>) {
    critical_section::with(|cs| {
        pin.listen(Event::AnyEdge);
        IR_PIN.borrow_ref_mut(cs).replace(pin);
    });
}

#[handler]
#[ram]
pub(super) fn gpio_handler() {
    let now = now_us();
    critical_section::with(|cs| {
        if let Some(pin) = IR_PIN.borrow_ref_mut(cs).as_mut()
            && pin.is_interrupt_set()
        {
            pin.clear_interrupt();
            IR_CAPTURE.record_edge(now);
        }
    });
}
