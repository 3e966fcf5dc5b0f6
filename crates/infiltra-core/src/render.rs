//! View models and draw requests consumed by the board renderer.

use crate::{
    ir::IrProtocol,
    menu::Topic,
    tools::{ToolKind, ir_read::IrReadState, stopwatch::StopwatchReading},
};

/// Redraw path chosen by the dispatcher for one tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedrawCommand {
    None,
    /// Full top-level view of a ring entry.
    Ring(Topic),
    /// Clear screen, top rotation, full submenu view.
    Submenu {
        topic: Topic,
        /// Repaint the options layer background under the list first.
        layered: bool,
    },
    /// Option list refresh after a cursor move.
    SubmenuOptions(Topic),
    /// Generic layered option-detail pane.
    OptionDetail(Topic),
    /// Conditional repaint of a tool; no-op unless the tool is dirty.
    Tool(ToolKind),
    /// Live time field only.
    StopwatchTime,
}

pub enum MenuScreen<'a> {
    Ring {
        label: &'a str,
        index: usize,
        count: usize,
    },
    Submenu {
        title: &'a str,
        items: &'a [&'a str],
        cursor: usize,
        layered: bool,
    },
    SubmenuOptions {
        items: &'a [&'a str],
        cursor: usize,
    },
    OptionDetail {
        title: &'a str,
        option: &'a str,
        index: usize,
    },
}

pub enum ToolScreen<'a> {
    Stopwatch {
        reading: StopwatchReading,
        running: bool,
    },
    StopwatchTime {
        reading: StopwatchReading,
    },
    BGoneMenu {
        items: &'a [&'a str],
        selected: usize,
        page_start: usize,
        per_page: usize,
    },
    BGoneTvRemote {
        keys: &'a [&'a str],
        selected: usize,
    },
    IrRead {
        state: IrReadState,
        paused: bool,
        protocol: Option<IrProtocol>,
        address: u32,
        command: u32,
        value: u64,
        raw: &'a [u16],
    },
}

/// Draw target for tool views.
pub trait ToolSurface {
    fn draw_tool(&mut self, screen: ToolScreen<'_>);
}

/// Draw target for menu views; every menu surface can also host tools.
pub trait MenuSurface: ToolSurface {
    fn draw_menu(&mut self, screen: MenuScreen<'_>);
}
