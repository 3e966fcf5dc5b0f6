//! Modal tools that take over input until they ask to exit.

pub mod bgone;
pub mod ir_read;
pub mod stopwatch;

use crate::render::ToolSurface;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ToolKind {
    Stopwatch,
    BGone,
    IrRead,
}

/// Edges forwarded to the active tool for one tick.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ToolEdges {
    pub a: bool,
    pub b: bool,
    pub c: bool,
}

impl ToolEdges {
    pub const fn new(a: bool, b: bool, c: bool) -> Self {
        Self { a, b, c }
    }
}

/// Lifecycle shared by every tool.
///
/// Tools never touch dispatcher state; leaving is requested through the
/// `handle_input` return value.
pub trait Tool {
    /// Clears internal state, arms any peripheral and marks the view dirty.
    fn reset(&mut self, now_ms: u64);

    /// Repaints only when dirty. Returns whether anything was drawn.
    fn draw_if_needed(&mut self, surface: &mut dyn ToolSurface, now_ms: u64) -> bool;

    /// Interprets one tick of edges. Returns `true` when the tool wants to exit.
    fn handle_input(&mut self, edges: ToolEdges, now_ms: u64) -> bool;
}
