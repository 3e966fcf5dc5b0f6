//! Command set and addressing helpers for the ST7789 controller.

pub const SWRESET: u8 = 0x01;
pub const SLPOUT: u8 = 0x11;
pub const NORON: u8 = 0x13;
pub const INVOFF: u8 = 0x20;
pub const INVON: u8 = 0x21;
pub const DISPON: u8 = 0x29;
pub const CASET: u8 = 0x2A;
pub const RASET: u8 = 0x2B;
pub const RAMWR: u8 = 0x2C;
pub const MADCTL: u8 = 0x36;
pub const COLMOD: u8 = 0x3A;

/// 16 bits per pixel on both the RGB and MCU interfaces.
pub const COLMOD_RGB565: u8 = 0x55;

pub const MADCTL_MY: u8 = 0x80;
pub const MADCTL_MX: u8 = 0x40;
pub const MADCTL_MV: u8 = 0x20;
pub const MADCTL_BGR: u8 = 0x08;

/// Controller frame memory, portrait.
pub const RAM_WIDTH: u16 = 240;
pub const RAM_HEIGHT: u16 = 320;

/// Visible panel window inside controller RAM, in native portrait orientation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PanelGeometry {
    pub width: u16,
    pub height: u16,
    pub col_offset: u16,
    pub row_offset: u16,
}

impl PanelGeometry {
    /// 1.14" 135x240 IPS module.
    pub const P135X240: Self = Self {
        width: 135,
        height: 240,
        col_offset: 52,
        row_offset: 40,
    };
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Rotation {
    #[default]
    Portrait,
    Landscape,
    PortraitFlipped,
    LandscapeFlipped,
}

impl Rotation {
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Landscape | Self::LandscapeFlipped)
    }

    pub const fn madctl(self) -> u8 {
        match self {
            Self::Portrait => 0x00,
            Self::Landscape => MADCTL_MX | MADCTL_MV,
            Self::PortraitFlipped => MADCTL_MX | MADCTL_MY,
            Self::LandscapeFlipped => MADCTL_MY | MADCTL_MV,
        }
    }

    /// Visible size `(width, height)` after rotation.
    pub const fn size(self, panel: PanelGeometry) -> (u16, u16) {
        if self.is_landscape() {
            (panel.height, panel.width)
        } else {
            (panel.width, panel.height)
        }
    }

    /// RAM `(column, row)` of the visible origin after rotation.
    pub const fn offsets(self, panel: PanelGeometry) -> (u16, u16) {
        let far_col = RAM_WIDTH - panel.width - panel.col_offset;
        let far_row = RAM_HEIGHT - panel.height - panel.row_offset;
        match self {
            Self::Portrait => (panel.col_offset, panel.row_offset),
            Self::Landscape => (panel.row_offset, far_col),
            Self::PortraitFlipped => (far_col, far_row),
            Self::LandscapeFlipped => (far_row, panel.col_offset),
        }
    }
}

/// `CASET`/`RASET` payload: big-endian inclusive start and end.
#[inline]
pub const fn window_args(start: u16, end: u16) -> [u8; 4] {
    let start = start.to_be_bytes();
    let end = end.to_be_bytes();
    [start[0], start[1], end[0], end[1]]
}
