use log::debug;

use crate::render::{ToolScreen, ToolSurface};

use super::{Tool, ToolEdges};

/// Elapsed time split for the `MM:SS.cc` display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StopwatchReading {
    pub minutes: u32,
    pub seconds: u8,
    pub centis: u8,
}

impl StopwatchReading {
    pub const fn from_millis(elapsed_ms: u64) -> Self {
        Self {
            minutes: (elapsed_ms / 60_000) as u32,
            seconds: ((elapsed_ms / 1_000) % 60) as u8,
            centis: ((elapsed_ms / 10) % 100) as u8,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    start_ms: u64,
    paused_elapsed_ms: u64,
    running: bool,
    dirty: bool,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self {
            start_ms: 0,
            paused_elapsed_ms: 0,
            running: false,
            dirty: true,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.running {
            now_ms.saturating_sub(self.start_ms)
        } else {
            self.paused_elapsed_ms
        }
    }

    pub fn reading(&self, now_ms: u64) -> StopwatchReading {
        StopwatchReading::from_millis(self.elapsed_ms(now_ms))
    }

    /// Run/pause toggle; elapsed time carries over across pauses.
    pub fn toggle(&mut self, now_ms: u64) {
        if self.running {
            self.running = false;
            self.paused_elapsed_ms = now_ms.saturating_sub(self.start_ms);
        } else {
            self.running = true;
            self.start_ms = now_ms.saturating_sub(self.paused_elapsed_ms);
        }
        self.dirty = true;
        debug!(
            "stopwatch: {} at {}ms",
            if self.running { "run" } else { "pause" },
            self.elapsed_ms(now_ms)
        );
    }

    /// Partial refresh of the time field, independent of the dirty flag.
    pub fn draw_time(&self, surface: &mut dyn ToolSurface, now_ms: u64) {
        surface.draw_tool(ToolScreen::StopwatchTime {
            reading: self.reading(now_ms),
        });
    }
}

impl Tool for Stopwatch {
    fn reset(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
        self.paused_elapsed_ms = 0;
        self.running = false;
        self.dirty = true;
    }

    fn draw_if_needed(&mut self, surface: &mut dyn ToolSurface, now_ms: u64) -> bool {
        if !self.dirty {
            return false;
        }

        surface.draw_tool(ToolScreen::Stopwatch {
            reading: self.reading(now_ms),
            running: self.running,
        });
        self.dirty = false;
        true
    }

    /// A toggles run/pause; C is the back edge chosen by the caller.
    fn handle_input(&mut self, edges: ToolEdges, now_ms: u64) -> bool {
        if edges.c {
            return true;
        }
        if edges.a {
            self.toggle(now_ms);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ToolScreen;

    #[derive(Default)]
    struct CountingSurface {
        full: usize,
        time_only: usize,
    }

    impl ToolSurface for CountingSurface {
        fn draw_tool(&mut self, screen: ToolScreen<'_>) {
            match screen {
                ToolScreen::Stopwatch { .. } => self.full += 1,
                ToolScreen::StopwatchTime { .. } => self.time_only += 1,
                _ => {}
            }
        }
    }

    #[test]
    fn reading_splits_minutes_seconds_centis() {
        let reading = StopwatchReading::from_millis(125_678);
        assert_eq!(reading.minutes, 2);
        assert_eq!(reading.seconds, 5);
        assert_eq!(reading.centis, 67);
    }

    #[test]
    fn pause_preserves_elapsed_time() {
        let mut sw = Stopwatch::new();
        sw.reset(1_000);
        sw.toggle(1_000);
        assert!(sw.is_running());
        assert_eq!(sw.elapsed_ms(1_500), 500);

        sw.toggle(1_500);
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(9_000), 500);

        sw.toggle(10_000);
        assert_eq!(sw.elapsed_ms(10_250), 750);
    }

    #[test]
    fn draw_if_needed_is_idempotent() {
        let mut sw = Stopwatch::new();
        let mut surface = CountingSurface::default();
        sw.reset(0);

        assert!(sw.draw_if_needed(&mut surface, 0));
        assert!(!sw.draw_if_needed(&mut surface, 10));
        assert_eq!(surface.full, 1);

        sw.handle_input(ToolEdges::new(true, false, false), 20);
        assert!(sw.draw_if_needed(&mut surface, 20));
        assert_eq!(surface.full, 2);
    }

    #[test]
    fn back_edge_requests_exit_without_toggling() {
        let mut sw = Stopwatch::new();
        sw.reset(0);
        assert!(sw.handle_input(ToolEdges::new(true, false, true), 5));
        assert!(!sw.is_running());
    }

    #[test]
    fn time_field_draw_ignores_dirty_flag() {
        let mut sw = Stopwatch::new();
        let mut surface = CountingSurface::default();
        sw.reset(0);
        sw.draw_time(&mut surface, 0);
        sw.draw_time(&mut surface, 0);
        assert_eq!(surface.time_only, 2);
    }
}
