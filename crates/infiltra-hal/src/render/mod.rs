//! embedded-graphics renderer for menu and tool views.

use core::fmt::{Debug, Write};

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_7X13_BOLD, FONT_9X15_BOLD, FONT_10X20},
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle},
    text::{Alignment, Text},
};
use heapless::String;
use log::info;

use infiltra_core::{
    ir::IrProtocol,
    render::{MenuScreen, MenuSurface, ToolScreen, ToolSurface},
    tools::{ir_read::IrReadState, stopwatch::StopwatchReading},
};
use st7789::Rotation;

mod menu;
mod primitives;
mod tools;

use self::{menu::*, primitives::*, tools::*};

const BACKGROUND: Rgb565 = Rgb565::BLACK;
const FOREGROUND: Rgb565 = Rgb565::WHITE;
const MUTED: Rgb565 = Rgb565::new(24, 48, 24);
const FRAME: Rgb565 = Rgb565::new(10, 20, 10);
const ACCENT: Rgb565 = Rgb565::new(0, 56, 12);

const LAYER_INSET: i32 = 2;
const LAYER_RADIUS: u32 = 8;

/// Display that can switch scan orientation between frames.
pub trait Orientable: DrawTarget<Color = Rgb565> {
    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Self::Error>;
}

/// Rotations used by the two view families.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RendererConfig {
    /// Menus, submenus and the options layer background.
    pub top: Rotation,
    /// Tool content.
    pub alt: Rotation,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            top: Rotation::Portrait,
            alt: Rotation::Landscape,
        }
    }
}

/// Paints [`MenuScreen`] and [`ToolScreen`] views onto an orientable display.
#[derive(Debug)]
pub struct ScreenRenderer<D> {
    display: D,
    config: RendererConfig,
    fault_logged: bool,
}

impl<D> ScreenRenderer<D>
where
    D: Orientable,
    D::Error: Debug,
{
    pub fn new(display: D, config: RendererConfig) -> Self {
        Self {
            display,
            config,
            fault_logged: false,
        }
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn release(self) -> D {
        self.display
    }

    /// Top rotation, cleared.
    pub fn clear_top(&mut self) {
        let result = self.reset_top();
        self.note(result);
    }

    fn reset_top(&mut self) -> Result<(), D::Error> {
        self.display.set_rotation(self.config.top)?;
        self.display.clear(BACKGROUND)
    }

    /// Options layer in the top rotation, then switch to the tool rotation.
    fn begin_tool_frame(&mut self) -> Result<(), D::Error> {
        self.reset_top()?;
        draw_options_layer_background(&mut self.display)?;
        self.display.set_rotation(self.config.alt)
    }

    fn render_menu(&mut self, screen: MenuScreen<'_>) -> Result<(), D::Error> {
        match screen {
            MenuScreen::Ring {
                label,
                index,
                count,
            } => {
                self.reset_top()?;
                draw_ring(&mut self.display, label, index, count)
            }
            MenuScreen::Submenu {
                title,
                items,
                cursor,
                layered,
            } => {
                self.reset_top()?;
                if layered {
                    draw_options_layer_background(&mut self.display)?;
                }
                draw_submenu(&mut self.display, title, items, cursor)
            }
            MenuScreen::SubmenuOptions { items, cursor } => {
                self.display.set_rotation(self.config.top)?;
                draw_option_rows(&mut self.display, items, cursor)
            }
            MenuScreen::OptionDetail { title, option, .. } => {
                self.reset_top()?;
                draw_options_layer_background(&mut self.display)?;
                draw_option_detail(&mut self.display, title, option)
            }
        }
    }

    fn render_tool(&mut self, screen: ToolScreen<'_>) -> Result<(), D::Error> {
        match screen {
            ToolScreen::Stopwatch { reading, running } => {
                self.begin_tool_frame()?;
                draw_stopwatch(&mut self.display, reading, running)
            }
            ToolScreen::StopwatchTime { reading } => {
                self.display.set_rotation(self.config.alt)?;
                draw_stopwatch_time(&mut self.display, reading)
            }
            ToolScreen::BGoneMenu {
                items,
                selected,
                page_start,
                per_page,
            } => {
                self.begin_tool_frame()?;
                draw_bgone_menu(&mut self.display, items, selected, page_start, per_page)
            }
            ToolScreen::BGoneTvRemote { keys, selected } => {
                self.begin_tool_frame()?;
                draw_tv_remote(&mut self.display, keys, selected)
            }
            ToolScreen::IrRead {
                state,
                paused,
                protocol,
                address,
                command,
                value,
                raw,
            } => {
                self.begin_tool_frame()?;
                draw_ir_read(
                    &mut self.display,
                    IrReadView {
                        state,
                        paused,
                        protocol,
                        address,
                        command,
                        value,
                        raw,
                    },
                )
            }
        }
    }

    fn note(&mut self, result: Result<(), D::Error>) {
        match result {
            Ok(()) => self.fault_logged = false,
            Err(err) if !self.fault_logged => {
                info!("render: draw failed: {:?}", err);
                self.fault_logged = true;
            }
            Err(_) => {}
        }
    }
}

impl<D> ToolSurface for ScreenRenderer<D>
where
    D: Orientable,
    D::Error: Debug,
{
    fn draw_tool(&mut self, screen: ToolScreen<'_>) {
        let result = self.render_tool(screen);
        self.note(result);
    }
}

impl<D> MenuSurface for ScreenRenderer<D>
where
    D: Orientable,
    D::Error: Debug,
{
    fn draw_menu(&mut self, screen: MenuScreen<'_>) {
        let result = self.render_menu(screen);
        self.note(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::vec::Vec;

    struct FakeDisplay {
        rotation: Rotation,
        rotations: Vec<Rotation>,
        pixels: usize,
        clears: usize,
        fail: bool,
    }

    impl FakeDisplay {
        fn new() -> Self {
            Self {
                rotation: Rotation::Portrait,
                rotations: Vec::new(),
                pixels: 0,
                clears: 0,
                fail: false,
            }
        }
    }

    impl OriginDimensions for FakeDisplay {
        fn size(&self) -> Size {
            let (w, h) = self.rotation.size(st7789::PanelGeometry::P135X240);
            Size::new(w as u32, h as u32)
        }
    }

    impl DrawTarget for FakeDisplay {
        type Color = Rgb565;
        type Error = ();

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            if self.fail {
                return Err(());
            }
            self.pixels += pixels.into_iter().count();
            Ok(())
        }

        fn clear(&mut self, _color: Self::Color) -> Result<(), Self::Error> {
            self.clears += 1;
            Ok(())
        }
    }

    impl Orientable for FakeDisplay {
        fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Self::Error> {
            self.rotation = rotation;
            self.rotations.push(rotation);
            Ok(())
        }
    }

    fn renderer() -> ScreenRenderer<FakeDisplay> {
        ScreenRenderer::new(FakeDisplay::new(), RendererConfig::default())
    }

    #[test]
    fn menu_views_use_top_rotation() {
        let mut renderer = renderer();
        renderer.draw_menu(MenuScreen::Ring {
            label: "WiFi",
            index: 0,
            count: 14,
        });
        let display = renderer.display_mut();
        assert_eq!(display.rotation, Rotation::Portrait);
        assert_eq!(display.clears, 1);
        assert!(display.pixels > 0);
    }

    #[test]
    fn tool_views_frame_in_top_then_draw_in_alt() {
        let mut renderer = renderer();
        renderer.draw_tool(ToolScreen::BGoneTvRemote {
            keys: &["Power", "Mute"],
            selected: 0,
        });
        let display = renderer.release();
        assert_eq!(
            display.rotations,
            [Rotation::Portrait, Rotation::Landscape]
        );
    }

    #[test]
    fn option_list_refresh_does_not_clear() {
        let mut renderer = renderer();
        renderer.draw_menu(MenuScreen::SubmenuOptions {
            items: &["<- Back", "Scan"],
            cursor: 1,
        });
        assert_eq!(renderer.display_mut().clears, 0);
    }

    #[test]
    fn stopwatch_time_refresh_stays_in_alt() {
        let mut renderer = renderer();
        renderer.draw_tool(ToolScreen::StopwatchTime {
            reading: StopwatchReading::from_millis(1_234),
        });
        let display = renderer.release();
        assert_eq!(display.rotations, [Rotation::Landscape]);
        assert_eq!(display.clears, 0);
    }

    #[test]
    fn ir_read_waveform_draws_with_frame() {
        let mut renderer = renderer();
        renderer.draw_tool(ToolScreen::IrRead {
            state: IrReadState::Received,
            paused: false,
            protocol: Some(IrProtocol::Nec),
            address: 0x04,
            command: 0x08,
            value: 0xF708_FB04,
            raw: &[9_000, 4_500, 560, 560, 560, 1_690],
        });
        assert!(renderer.display_mut().pixels > 0);
    }

    #[test]
    fn draw_failure_is_latched_until_success() {
        let mut renderer = renderer();
        renderer.display_mut().fail = true;
        renderer.draw_menu(MenuScreen::OptionDetail {
            title: "WiFi",
            option: "Scan",
            index: 1,
        });
        assert!(renderer.fault_logged);

        renderer.display_mut().fail = false;
        renderer.clear_top();
        assert!(!renderer.fault_logged);
    }
}
