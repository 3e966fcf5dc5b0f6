use log::debug;

use crate::{
    ir::{IrFrame, IrReceiver},
    render::{ToolScreen, ToolSurface},
};

use super::{Tool, ToolEdges};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IrReadState {
    Waiting,
    Received,
}

/// Live IR decoder view: last frame fields plus its raw waveform.
#[derive(Debug)]
pub struct IrRead<R> {
    receiver: R,
    state: IrReadState,
    paused: bool,
    dirty: bool,
    last_frame: Option<IrFrame>,
}

impl<R> IrRead<R>
where
    R: IrReceiver,
{
    pub const fn new(receiver: R) -> Self {
        Self {
            receiver,
            state: IrReadState::Waiting,
            paused: false,
            dirty: true,
            last_frame: None,
        }
    }

    pub const fn state(&self) -> IrReadState {
        self.state
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn last_frame(&self) -> Option<&IrFrame> {
        self.last_frame.as_ref()
    }

    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    fn clear_capture(&mut self) {
        self.last_frame = None;
        self.state = IrReadState::Waiting;
        self.dirty = true;
    }
}

impl<R> Tool for IrRead<R>
where
    R: IrReceiver,
{
    fn reset(&mut self, _now_ms: u64) {
        self.receiver.enable();
        self.paused = false;
        self.clear_capture();
    }

    fn draw_if_needed(&mut self, surface: &mut dyn ToolSurface, _now_ms: u64) -> bool {
        if !self.dirty {
            return false;
        }

        let frame = self.last_frame.as_ref();
        surface.draw_tool(ToolScreen::IrRead {
            state: self.state,
            paused: self.paused,
            protocol: frame.map(|frame| frame.protocol),
            address: frame.map_or(0, |frame| frame.address),
            command: frame.map_or(0, |frame| frame.command),
            value: frame.map_or(0, |frame| frame.value),
            raw: frame.map(|frame| frame.raw.as_slice()).unwrap_or(&[]),
        });
        self.dirty = false;
        true
    }

    /// A clears, B toggles pause, C exits. Polls the receiver once while unpaused.
    fn handle_input(&mut self, edges: ToolEdges, _now_ms: u64) -> bool {
        if edges.a {
            self.clear_capture();
        }
        if edges.b {
            self.paused = !self.paused;
            if !self.paused {
                // Drop whatever was captured while paused.
                self.receiver.enable();
            }
            self.dirty = true;
        }
        if edges.c {
            return true;
        }

        if !self.paused
            && let Some(frame) = self.receiver.poll_frame()
        {
            debug!(
                "ir-read: {} addr=0x{:X} cmd=0x{:X} raw={}",
                frame.protocol.label(),
                frame.address,
                frame.command,
                frame.raw.len()
            );
            self.last_frame = Some(frame);
            self.state = IrReadState::Received;
            self.dirty = true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IrProtocol, decode};

    #[derive(Default)]
    struct QueueReceiver {
        enabled: usize,
        pending: Option<IrFrame>,
        polls: usize,
    }

    impl IrReceiver for QueueReceiver {
        fn enable(&mut self) {
            self.enabled += 1;
            self.pending = None;
        }

        fn poll_frame(&mut self) -> Option<IrFrame> {
            self.polls += 1;
            self.pending.take()
        }
    }

    struct NullSurface;

    impl ToolSurface for NullSurface {
        fn draw_tool(&mut self, _screen: ToolScreen<'_>) {}
    }

    const NONE: ToolEdges = ToolEdges::new(false, false, false);

    #[test]
    fn reset_arms_receiver_and_waits() {
        let mut tool = IrRead::new(QueueReceiver::default());
        tool.reset(0);
        assert_eq!(tool.receiver_mut().enabled, 1);
        assert_eq!(tool.state(), IrReadState::Waiting);
        assert!(!tool.is_paused());
    }

    #[test]
    fn received_frame_is_snapshotted_and_marks_dirty() {
        let mut tool = IrRead::new(QueueReceiver::default());
        let mut surface = NullSurface;
        tool.reset(0);
        assert!(tool.draw_if_needed(&mut surface, 0));
        assert!(!tool.draw_if_needed(&mut surface, 0));

        tool.receiver_mut().pending = Some(decode(&[9_000, 2_250, 560]));
        assert!(!tool.handle_input(NONE, 30));
        assert_eq!(tool.state(), IrReadState::Received);
        assert_eq!(
            tool.last_frame().map(|frame| frame.protocol),
            Some(IrProtocol::NecRepeat)
        );
        assert!(tool.draw_if_needed(&mut surface, 30));
    }

    #[test]
    fn paused_tool_does_not_poll() {
        let mut tool = IrRead::new(QueueReceiver::default());
        tool.reset(0);
        tool.handle_input(ToolEdges::new(false, true, false), 0);
        assert!(tool.is_paused());
        let polls = tool.receiver_mut().polls;

        tool.handle_input(NONE, 30);
        assert_eq!(tool.receiver_mut().polls, polls);
    }

    #[test]
    fn resume_rearms_receiver_and_skips_paused_frames() {
        let mut tool = IrRead::new(QueueReceiver::default());
        tool.reset(0);
        let pause = ToolEdges::new(false, true, false);
        tool.handle_input(pause, 0);
        tool.receiver_mut().pending = Some(decode(&[9_000, 2_250, 560]));

        tool.handle_input(pause, 30);
        assert!(!tool.is_paused());
        assert_eq!(tool.receiver_mut().enabled, 2);
        assert_eq!(tool.state(), IrReadState::Waiting);
        assert!(tool.last_frame().is_none());
    }

    #[test]
    fn a_clears_capture() {
        let mut tool = IrRead::new(QueueReceiver::default());
        tool.reset(0);
        tool.receiver_mut().pending = Some(decode(&[9_000, 2_250, 560]));
        tool.handle_input(NONE, 0);
        tool.handle_input(ToolEdges::new(true, false, false), 30);
        assert_eq!(tool.state(), IrReadState::Waiting);
        assert!(tool.last_frame().is_none());
    }

    #[test]
    fn c_requests_exit_before_polling() {
        let mut tool = IrRead::new(QueueReceiver::default());
        tool.reset(0);
        assert!(tool.handle_input(ToolEdges::new(false, false, true), 0));
        assert_eq!(tool.receiver_mut().polls, 0);
    }
}
