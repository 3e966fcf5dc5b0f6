use log::debug;

use crate::{
    menu::BACK_OPTION,
    render::{ToolScreen, ToolSurface},
    submenu::{rotate_next, rotate_prev},
};

use super::{Tool, ToolEdges};

const MENU_ITEMS: [&str; 7] = [BACK_OPTION, "Add", "TV", "Proj", "LEDs", "AC", "Fan"];
const MENU_BACK: u8 = 0;
const MENU_DEFAULT: u8 = 1;
const MENU_TV: u8 = 2;
/// 2x2 tile grid.
pub const TILES_PER_PAGE: u8 = 4;

const TV_KEYS: [&str; 6] = ["Power", "Mute", "Vol+", "Vol-", "Ch+", "Ch-"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BGoneMode {
    Menu,
    TvRemote,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TvKey {
    Power,
    Mute,
    VolumeUp,
    VolumeDown,
    ChannelUp,
    ChannelDown,
}

impl TvKey {
    fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Power,
            1 => Self::Mute,
            2 => Self::VolumeUp,
            3 => Self::VolumeDown,
            4 => Self::ChannelUp,
            _ => Self::ChannelDown,
        }
    }
}

/// Remote picker with a device menu and a TV key pad.
#[derive(Clone, Copy, Debug)]
pub struct BGone {
    mode: BGoneMode,
    selected: u8,
    page_start: u8,
    tv_selected: u8,
    dirty: bool,
}

impl Default for BGone {
    fn default() -> Self {
        Self::new()
    }
}

impl BGone {
    pub const fn new() -> Self {
        Self {
            mode: BGoneMode::Menu,
            selected: MENU_DEFAULT,
            page_start: 0,
            tv_selected: 0,
            dirty: true,
        }
    }

    pub const fn mode(&self) -> BGoneMode {
        self.mode
    }

    pub const fn selected(&self) -> u8 {
        self.selected
    }

    pub const fn page_start(&self) -> u8 {
        self.page_start
    }

    pub const fn tv_selected(&self) -> u8 {
        self.tv_selected
    }

    fn ensure_selection_visible(&mut self) {
        if self.selected < self.page_start || self.selected >= self.page_start + TILES_PER_PAGE {
            self.page_start = (self.selected / TILES_PER_PAGE) * TILES_PER_PAGE;
        }
    }

    fn handle_menu_input(&mut self, edges: ToolEdges) -> bool {
        let count = MENU_ITEMS.len() as u8;

        if edges.b {
            self.selected = rotate_next(self.selected, count);
            self.ensure_selection_visible();
            self.dirty = true;
        }
        if edges.c {
            if self.selected == MENU_BACK {
                return true;
            }
            self.selected = rotate_prev(self.selected, count);
            self.ensure_selection_visible();
            self.dirty = true;
        }
        if edges.a {
            match self.selected {
                MENU_BACK => return true,
                MENU_TV => {
                    self.mode = BGoneMode::TvRemote;
                    self.tv_selected = 0;
                    self.dirty = true;
                }
                other => debug!("bgone: {} not wired", MENU_ITEMS[other as usize]),
            }
        }
        false
    }

    fn handle_tv_input(&mut self, edges: ToolEdges) {
        if edges.b {
            self.tv_selected = rotate_next(self.tv_selected, TV_KEYS.len() as u8);
            self.dirty = true;
        }
        if edges.c {
            self.mode = BGoneMode::Menu;
            self.dirty = true;
            return;
        }
        if edges.a {
            // TODO: encode and transmit once an IR transmitter driver exists.
            debug!(
                "bgone: tv key {:?} (transmit stub)",
                TvKey::from_index(self.tv_selected)
            );
        }
    }
}

impl Tool for BGone {
    fn reset(&mut self, _now_ms: u64) {
        *self = Self::new();
    }

    fn draw_if_needed(&mut self, surface: &mut dyn ToolSurface, _now_ms: u64) -> bool {
        if !self.dirty {
            return false;
        }

        match self.mode {
            BGoneMode::Menu => surface.draw_tool(ToolScreen::BGoneMenu {
                items: &MENU_ITEMS,
                selected: self.selected as usize,
                page_start: self.page_start as usize,
                per_page: TILES_PER_PAGE as usize,
            }),
            BGoneMode::TvRemote => surface.draw_tool(ToolScreen::BGoneTvRemote {
                keys: &TV_KEYS,
                selected: self.tv_selected as usize,
            }),
        }
        self.dirty = false;
        true
    }

    fn handle_input(&mut self, edges: ToolEdges, _now_ms: u64) -> bool {
        match self.mode {
            BGoneMode::Menu => self.handle_menu_input(edges),
            BGoneMode::TvRemote => {
                self.handle_tv_input(edges);
                false
            }
        }
    }
}
