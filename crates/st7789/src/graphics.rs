use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{IntoStorage, Rgb565},
    primitives::{PointsIter, Rectangle},
};
use embedded_hal::{
    digital::{ErrorType as PinErrorType, OutputPin},
    spi::{ErrorType as SpiErrorType, SpiBus},
};

use crate::{Error, St7789};

type GraphicsError<SPI, DC, CS, RST> = Error<
    <SPI as SpiErrorType>::Error,
    <DC as PinErrorType>::Error,
    <CS as PinErrorType>::Error,
    <RST as PinErrorType>::Error,
>;

/// Longest horizontal stretch written through one address window.
const RUN_MAX: usize = 64;

/// Consecutive pixels on one row, left to right.
struct PixelRun {
    x: u16,
    y: u16,
    len: usize,
    colors: [u16; RUN_MAX],
}

impl PixelRun {
    const fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            len: 0,
            colors: [0; RUN_MAX],
        }
    }

    fn extends(&self, x: u16, y: u16) -> bool {
        self.len > 0 && self.len < RUN_MAX && y == self.y && x == self.x + self.len as u16
    }

    fn start(&mut self, x: u16, y: u16) {
        self.x = x;
        self.y = y;
        self.len = 0;
    }

    fn push(&mut self, color: u16) {
        self.colors[self.len] = color;
        self.len += 1;
    }
}

impl<SPI, DC, CS, RST> St7789<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    fn flush_run(&mut self, run: &mut PixelRun) -> Result<(), GraphicsError<SPI, DC, CS, RST>> {
        if run.len == 0 {
            return Ok(());
        }
        let x1 = run.x + run.len as u16 - 1;
        self.set_window(run.x, run.y, x1, run.y)?;
        let len = core::mem::replace(&mut run.len, 0);
        self.write_pixels(run.colors[..len].iter().copied())
    }
}

impl<SPI, DC, CS, RST> DrawTarget for St7789<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = GraphicsError<SPI, DC, CS, RST>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.size();
        let mut run = PixelRun::new();
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            if x >= width || y >= height {
                continue;
            }

            if !run.extends(x, y) {
                self.flush_run(&mut run)?;
                run.start(x, y);
            }
            run.push(color.into_storage());
        }

        self.flush_run(&mut run)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let visible = area.intersection(&self.bounding_box());
        let Some(bottom_right) = visible.bottom_right() else {
            return Ok(());
        };

        // Partially clipped areas fall back to per-pixel writes.
        if visible != *area {
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        let count = area.size.width as usize * area.size.height as usize;
        self.write_pixels(colors.into_iter().take(count).map(|color| color.into_storage()))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let visible = area.intersection(&self.bounding_box());
        if visible.is_zero_sized() {
            return Ok(());
        }

        self.fill_rect(
            visible.top_left.x as u16,
            visible.top_left.y as u16,
            visible.size.width as u16,
            visible.size.height as u16,
            color.into_storage(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into_storage())
    }
}

impl<SPI, DC, CS, RST> OriginDimensions for St7789<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    fn size(&self) -> Size {
        let (width, height) = St7789::size(self);
        Size::new(width as u32, height as u32)
    }
}
