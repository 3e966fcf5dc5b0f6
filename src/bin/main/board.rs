//! Per-board constants. Pin wiring lives next to the peripheral setup in `main`.

use infiltra_core::{app::UiConfig, input::InputSurface};
use infiltra_hal::render::RendererConfig;
use st7789::Rotation;

#[cfg(all(feature = "board-stick", feature = "board-cardputer"))]
compile_error!("enable exactly one of `board-stick` or `board-cardputer`");

#[cfg(not(any(feature = "board-stick", feature = "board-cardputer")))]
compile_error!("a board feature is required: `board-stick` or `board-cardputer`");

#[cfg(feature = "board-stick")]
pub(super) const NAME: &str = "m5stickc-plus2";
#[cfg(feature = "board-stick")]
pub(super) const PINS: &str =
    "tft mosi=15 sclk=13 dc=14 rst=12 cs=5 bl=27, buttons a=37 b=39 c=35, hold=4, ir=33";
#[cfg(feature = "board-stick")]
const SURFACE: InputSurface = InputSurface::Buttons;
#[cfg(feature = "board-stick")]
pub(super) const RENDERER: RendererConfig = RendererConfig {
    top: Rotation::PortraitFlipped,
    alt: Rotation::LandscapeFlipped,
};

#[cfg(feature = "board-cardputer")]
pub(super) const NAME: &str = "m5cardputer";
#[cfg(feature = "board-cardputer")]
pub(super) const PINS: &str =
    "tft mosi=35 sclk=36 dc=34 rst=33 cs=37 bl=38, kbd select=8,9,11 sense=13,15,3,4,5,6,7, ir=1";
#[cfg(feature = "board-cardputer")]
const SURFACE: InputSurface = InputSurface::Keyboard;
#[cfg(feature = "board-cardputer")]
pub(super) const RENDERER: RendererConfig = RendererConfig {
    top: Rotation::Portrait,
    alt: Rotation::Landscape,
};

pub(super) fn ui_config() -> UiConfig {
    UiConfig::default().with_surface(SURFACE)
}
