use core::cell::RefCell;

use critical_section::Mutex;
use log::debug;

use infiltra_core::ir::{IR_RAW_CAPACITY, IrFrame, IrReceiver, RawDurations, decode};

#[derive(Debug, Clone, Copy)]
pub struct IrCaptureConfig {
    frame_gap_us: u32,
    min_pulses: u8,
}

impl Default for IrCaptureConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl IrCaptureConfig {
    pub const fn new() -> Self {
        Self {
            frame_gap_us: 10_000,
            min_pulses: 3,
        }
    }

    /// Silence after the last edge that closes a frame.
    pub const fn with_frame_gap_us(mut self, frame_gap_us: u32) -> Self {
        self.frame_gap_us = frame_gap_us;
        self
    }

    /// Shorter bursts are discarded as noise.
    pub const fn with_min_pulses(mut self, min_pulses: u8) -> Self {
        self.min_pulses = min_pulses;
        self
    }

    const fn is_gap(&self, since_last_us: u64) -> bool {
        since_last_us >= self.frame_gap_us as u64
    }

    const fn is_complete(&self, durations: usize) -> bool {
        durations >= self.min_pulses as usize
    }
}

#[derive(Debug)]
struct CaptureState {
    durations: RawDurations,
    last_edge_us: Option<u64>,
    overflowed: bool,
    /// A complete frame is held; edges are ignored until it is taken.
    latched: bool,
}

impl CaptureState {
    const fn new() -> Self {
        Self {
            durations: RawDurations::new(),
            last_edge_us: None,
            overflowed: false,
            latched: false,
        }
    }

    fn clear(&mut self) {
        self.durations.clear();
        self.last_edge_us = None;
        self.overflowed = false;
        self.latched = false;
    }
}

/// Edge timestamps shared between the receiver pin interrupt and the UI loop.
///
/// Durations alternate mark/space starting with the first mark. Once a frame
/// is closed by the gap it stays latched until [`PulseCapture::take_frame`] or
/// [`PulseCapture::reset`], so late polls never see merged trains.
pub struct PulseCapture {
    config: IrCaptureConfig,
    state: Mutex<RefCell<CaptureState>>,
}

impl Default for PulseCapture {
    fn default() -> Self {
        Self::new(IrCaptureConfig::new())
    }
}

impl PulseCapture {
    pub const fn new(config: IrCaptureConfig) -> Self {
        Self {
            config,
            state: Mutex::new(RefCell::new(CaptureState::new())),
        }
    }

    /// Called from the any-edge interrupt.
    pub fn record_edge(&self, now_us: u64) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.latched {
                return;
            }

            if let Some(last) = state.last_edge_us {
                let since_last = now_us.saturating_sub(last);
                if self.config.is_gap(since_last) {
                    if self.config.is_complete(state.durations.len()) {
                        state.latched = true;
                        return;
                    }
                    // Noise before the gap; this edge starts a new frame.
                    state.durations.clear();
                    state.overflowed = false;
                } else {
                    let delta = since_last.min(u16::MAX as u64) as u16;
                    if state.durations.push(delta).is_err() {
                        state.overflowed = true;
                    }
                }
            }
            state.last_edge_us = Some(now_us);
        });
    }

    pub fn reset(&self) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).clear());
    }

    /// Takes the buffered pulse train once it is latched or the line has been
    /// idle for the frame gap.
    pub fn take_frame(&self, now_us: u64) -> Option<RawDurations> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            let last = state.last_edge_us?;
            if !state.latched && !self.config.is_gap(now_us.saturating_sub(last)) {
                return None;
            }

            if state.overflowed {
                debug!("ir-capture: frame truncated at {} durations", IR_RAW_CAPACITY);
            }
            let complete = self.config.is_complete(state.durations.len());
            let durations = core::mem::take(&mut state.durations);
            state.clear();
            complete.then_some(durations)
        })
    }
}

/// Monotonic microsecond clock used to timestamp the frame gap.
pub trait MicrosClock {
    fn now_us(&self) -> u64;
}

/// [`IrReceiver`] backed by a [`PulseCapture`] filled from a pin interrupt.
pub struct CapturedIrReceiver<'a, C> {
    capture: &'a PulseCapture,
    clock: C,
}

impl<'a, C> CapturedIrReceiver<'a, C>
where
    C: MicrosClock,
{
    pub const fn new(capture: &'a PulseCapture, clock: C) -> Self {
        Self { capture, clock }
    }
}

impl<C> IrReceiver for CapturedIrReceiver<'_, C>
where
    C: MicrosClock,
{
    fn enable(&mut self) {
        self.capture.reset();
    }

    fn poll_frame(&mut self) -> Option<IrFrame> {
        let durations = self.capture.take_frame(self.clock.now_us())?;
        Some(decode(&durations))
    }
}
