//! Navigation dispatcher: ring, submenus, option screens and modal tools.

use log::{debug, info};

use crate::{
    input::{EdgeDetector, Edges, InputSource, InputSurface, RawButtons},
    ir::IrReceiver,
    menu::{MenuState, Topic},
    render::{MenuScreen, MenuSurface, RedrawCommand},
    submenu::SubmenuCursor,
    tools::{
        Tool, ToolEdges, ToolKind, bgone::BGone, ir_read::IrRead, stopwatch::Stopwatch,
    },
};

const RING_THROTTLE_MS: u64 = 200;
const TOOL_FRAME_DELAY_MS: u32 = 30;

/// Submenu rows that open a tool instead of the generic option screen.
const SUBMENU_TOOLS: [(Topic, u8, ToolKind); 3] = [
    (Topic::Extras, 1, ToolKind::Stopwatch),
    (Topic::Ir, 1, ToolKind::BGone),
    (Topic::Ir, 4, ToolKind::IrRead),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UiConfig {
    pub ring_throttle_ms: u64,
    pub tool_frame_delay_ms: u32,
    pub surface: InputSurface,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            ring_throttle_ms: RING_THROTTLE_MS,
            tool_frame_delay_ms: TOOL_FRAME_DELAY_MS,
            surface: InputSurface::Buttons,
        }
    }
}

impl UiConfig {
    pub const fn with_ring_throttle_ms(mut self, ring_throttle_ms: u64) -> Self {
        self.ring_throttle_ms = ring_throttle_ms;
        self
    }

    pub const fn with_tool_frame_delay_ms(mut self, tool_frame_delay_ms: u32) -> Self {
        self.tool_frame_delay_ms = tool_frame_delay_ms;
        self
    }

    pub const fn with_surface(mut self, surface: InputSurface) -> Self {
        self.surface = surface;
        self
    }
}

/// Mutually exclusive mode flags. All clear means menu browsing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ModeFlags {
    pub in_option_screen: bool,
    pub in_stopwatch: bool,
    pub in_bgone: bool,
    pub in_ir_read: bool,
}

impl ModeFlags {
    pub const fn active_count(&self) -> usize {
        self.in_option_screen as usize
            + self.in_stopwatch as usize
            + self.in_bgone as usize
            + self.in_ir_read as usize
    }

    pub const fn any(&self) -> bool {
        self.active_count() > 0
    }

    fn set_tool(&mut self, kind: ToolKind, active: bool) {
        match kind {
            ToolKind::Stopwatch => self.in_stopwatch = active,
            ToolKind::BGone => self.in_bgone = active,
            ToolKind::IrRead => self.in_ir_read = active,
        }
    }
}

/// Which branch of the priority chain handled a tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchPath {
    IrRead,
    BGone,
    Stopwatch,
    OptionBack,
    OptionConfirm,
    SubmenuBrowse,
    RingBrowse,
    EnterSubmenu,
    /// Option screen open and no edge it reacts to.
    Idle,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TickResult {
    pub path: DispatchPath,
    pub redraw: RedrawCommand,
    /// Inter-frame delay requested by an active tool.
    pub frame_delay_ms: Option<u32>,
}

impl TickResult {
    const fn new(path: DispatchPath, redraw: RedrawCommand) -> Self {
        Self {
            path,
            redraw,
            frame_delay_ms: None,
        }
    }

    const fn with_frame_delay(mut self, delay_ms: u32) -> Self {
        self.frame_delay_ms = Some(delay_ms);
        self
    }
}

/// Complete navigation position; the dispatcher is its only writer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavigationState {
    pub current_menu: MenuState,
    pub flags: ModeFlags,
    pub cursor: SubmenuCursor,
    /// Shared by both ring directions.
    pub last_ring_step_ms: Option<u64>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            current_menu: MenuState::default(),
            flags: ModeFlags::default(),
            cursor: SubmenuCursor::default(),
            last_ring_step_ms: None,
        }
    }
}

/// Tool instances owned by the dispatcher.
pub struct ToolSet<IR> {
    pub stopwatch: Stopwatch,
    pub bgone: BGone,
    pub ir_read: IrRead<IR>,
}

impl<IR> ToolSet<IR>
where
    IR: IrReceiver,
{
    pub const fn new(ir_receiver: IR) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            bgone: BGone::new(),
            ir_read: IrRead::new(ir_receiver),
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Stopwatch => &mut self.stopwatch,
            ToolKind::BGone => &mut self.bgone,
            ToolKind::IrRead => &mut self.ir_read,
        }
    }
}

pub struct MenuApp<IN, IR>
where
    IN: InputSource,
    IR: IrReceiver,
{
    input: IN,
    edges: EdgeDetector,
    state: NavigationState,
    tools: ToolSet<IR>,
    config: UiConfig,
    input_fault_logged: bool,
}

include!("dispatch.rs");
include!("router.rs");
include!("view.rs");
