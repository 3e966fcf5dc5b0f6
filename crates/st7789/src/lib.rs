#![cfg_attr(not(test), no_std)]

//! ST7789 (240x320 RAM, RGB565) TFT controller driver primitives.

pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

pub use protocol::{PanelGeometry, Rotation};

/// Bytes staged per SPI write while streaming pixels.
const PIXEL_CHUNK_BYTES: usize = 64;

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// SPI clock in Hz the board configures the bus with.
    pub spi_hz: u32,
    pub panel: PanelGeometry,
    pub rotation: Rotation,
    /// IPS modules need display inversion for true colors.
    pub invert_colors: bool,
    pub bgr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spi_hz: 40_000_000,
            panel: PanelGeometry::P135X240,
            rotation: Rotation::Portrait,
            invert_colors: true,
            bgr: false,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, DcErr, CsErr, RstErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// Data/command pin operation failed.
    Dc(DcErr),
    /// Chip-select pin operation failed.
    Cs(CsErr),
    /// Reset pin operation failed.
    Rst(RstErr),
    /// Window outside the visible area.
    InvalidInput,
}

pub type DriverResult<SpiErr, DcErr, CsErr, RstErr> =
    Result<(), Error<SpiErr, DcErr, CsErr, RstErr>>;

type PinResult<SPI, DC, CS, RST> = DriverResult<
    <SPI as embedded_hal::spi::ErrorType>::Error,
    <DC as embedded_hal::digital::ErrorType>::Error,
    <CS as embedded_hal::digital::ErrorType>::Error,
    <RST as embedded_hal::digital::ErrorType>::Error,
>;

/// ST7789 driver over a 4-wire SPI bus.
#[derive(Debug)]
pub struct St7789<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    config: Config,
}

impl<SPI, DC, CS, RST> St7789<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Creates a new driver instance. Nothing is sent until [`Self::init`].
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, config: Config) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            config,
        }
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, DC, CS, RST) {
        (self.spi, self.dc, self.cs, self.rst)
    }

    /// Visible `(width, height)` in the current rotation.
    pub fn size(&self) -> (u16, u16) {
        self.config.rotation.size(self.config.panel)
    }

    /// Hardware reset followed by the power-up command sequence.
    pub fn init<D>(&mut self, delay: &mut D) -> PinResult<SPI, DC, CS, RST>
    where
        D: DelayNs,
    {
        self.cs.set_high().map_err(Error::Cs)?;
        self.rst.set_high().map_err(Error::Rst)?;
        delay.delay_ms(5);
        self.rst.set_low().map_err(Error::Rst)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(Error::Rst)?;
        delay.delay_ms(120);

        self.command(protocol::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(protocol::SLPOUT, &[])?;
        delay.delay_ms(10);
        self.command(protocol::COLMOD, &[protocol::COLMOD_RGB565])?;
        self.write_madctl()?;
        let inversion = if self.config.invert_colors {
            protocol::INVON
        } else {
            protocol::INVOFF
        };
        self.command(inversion, &[])?;
        self.command(protocol::NORON, &[])?;
        delay.delay_ms(10);
        self.command(protocol::DISPON, &[])?;
        delay.delay_ms(10);

        Ok(())
    }

    /// Switches scan direction; the next window uses the new offsets.
    pub fn set_rotation(&mut self, rotation: Rotation) -> PinResult<SPI, DC, CS, RST> {
        if self.config.rotation == rotation {
            return Ok(());
        }
        self.config.rotation = rotation;
        self.write_madctl()
    }

    /// Opens an inclusive drawing window in visible coordinates and starts `RAMWR`.
    pub fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> PinResult<SPI, DC, CS, RST> {
        let (width, height) = self.size();
        if x0 > x1 || y0 > y1 || x1 >= width || y1 >= height {
            return Err(Error::InvalidInput);
        }

        let (col, row) = self.config.rotation.offsets(self.config.panel);
        self.command(protocol::CASET, &protocol::window_args(x0 + col, x1 + col))?;
        self.command(protocol::RASET, &protocol::window_args(y0 + row, y1 + row))?;
        self.command(protocol::RAMWR, &[])
    }

    /// Streams RGB565 words into the open window.
    pub fn write_pixels<I>(&mut self, pixels: I) -> PinResult<SPI, DC, CS, RST>
    where
        I: IntoIterator<Item = u16>,
    {
        self.dc.set_high().map_err(Error::Dc)?;
        self.cs.set_low().map_err(Error::Cs)?;

        let result = (|| {
            let mut chunk = [0u8; PIXEL_CHUNK_BYTES];
            let mut len = 0usize;
            for pixel in pixels {
                chunk[len..len + 2].copy_from_slice(&pixel.to_be_bytes());
                len += 2;
                if len == PIXEL_CHUNK_BYTES {
                    self.spi.write(&chunk).map_err(Error::Spi)?;
                    len = 0;
                }
            }
            if len > 0 {
                self.spi.write(&chunk[..len]).map_err(Error::Spi)?;
            }
            self.spi.flush().map_err(Error::Spi)
        })();

        let cs_result = self.cs.set_high().map_err(Error::Cs);
        result.and(cs_result)
    }

    /// Fills a clipped rectangle with one color.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: u16,
    ) -> PinResult<SPI, DC, CS, RST> {
        let (max_w, max_h) = self.size();
        if width == 0 || height == 0 || x >= max_w || y >= max_h {
            return Ok(());
        }
        let x1 = x.saturating_add(width - 1).min(max_w - 1);
        let y1 = y.saturating_add(height - 1).min(max_h - 1);

        self.set_window(x, y, x1, y1)?;
        let count = (x1 - x + 1) as usize * (y1 - y + 1) as usize;
        self.write_pixels(core::iter::repeat_n(color, count))
    }

    /// Fills the visible area.
    pub fn fill(&mut self, color: u16) -> PinResult<SPI, DC, CS, RST> {
        let (width, height) = self.size();
        self.fill_rect(0, 0, width, height, color)
    }

    fn write_madctl(&mut self) -> PinResult<SPI, DC, CS, RST> {
        let mut madctl = self.config.rotation.madctl();
        if self.config.bgr {
            madctl |= protocol::MADCTL_BGR;
        }
        self.command(protocol::MADCTL, &[madctl])
    }

    /// One CS-low transaction: command byte with DC low, then arguments with DC high.
    fn command(&mut self, command: u8, args: &[u8]) -> PinResult<SPI, DC, CS, RST> {
        self.cs.set_low().map_err(Error::Cs)?;

        let result = (|| {
            self.dc.set_low().map_err(Error::Dc)?;
            self.spi.write(&[command]).map_err(Error::Spi)?;
            self.spi.flush().map_err(Error::Spi)?;
            if !args.is_empty() {
                self.dc.set_high().map_err(Error::Dc)?;
                self.spi.write(args).map_err(Error::Spi)?;
                self.spi.flush().map_err(Error::Spi)?;
            }
            Ok(())
        })();

        let cs_result = self.cs.set_high().map_err(Error::Cs);
        result.and(cs_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<Vec<u8>>,
    }

    impl embedded_hal::spi::ErrorType for RecordingBus {
        type Error = Infallible;
    }

    impl SpiBus<u8> for RecordingBus {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.writes.push(words.to_vec());
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct NoopPin;

    impl embedded_hal::digital::ErrorType for NoopPin {
        type Error = Infallible;
    }

    impl OutputPin for NoopPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn make_driver(rotation: Rotation) -> St7789<RecordingBus, NoopPin, NoopPin, NoopPin> {
        let config = Config {
            rotation,
            ..Config::default()
        };
        St7789::new(RecordingBus::default(), NoopPin, NoopPin, NoopPin, config)
    }

    #[test]
    fn window_applies_rotation_offsets() {
        let mut driver = make_driver(Rotation::Portrait);
        driver.set_window(0, 0, 9, 19).unwrap();

        let (bus, ..) = driver.release();
        assert_eq!(bus.writes[0], [protocol::CASET]);
        assert_eq!(bus.writes[1], protocol::window_args(52, 61));
        assert_eq!(bus.writes[2], [protocol::RASET]);
        assert_eq!(bus.writes[3], protocol::window_args(40, 59));
        assert_eq!(bus.writes[4], [protocol::RAMWR]);
    }

    #[test]
    fn window_outside_visible_area_is_rejected() {
        let mut driver = make_driver(Rotation::Portrait);
        assert_eq!(driver.set_window(0, 0, 135, 10), Err(Error::InvalidInput));

        driver.set_rotation(Rotation::Landscape).unwrap();
        assert!(driver.set_window(0, 0, 239, 134).is_ok());
    }

    #[test]
    fn pixels_stream_big_endian_in_chunks() {
        let mut driver = make_driver(Rotation::Portrait);
        driver
            .write_pixels(core::iter::repeat_n(0xF800u16, 40))
            .unwrap();

        let (bus, ..) = driver.release();
        assert_eq!(bus.writes.len(), 2);
        assert_eq!(bus.writes[0].len(), PIXEL_CHUNK_BYTES);
        assert_eq!(bus.writes[1].len(), 80 - PIXEL_CHUNK_BYTES);
        assert_eq!(&bus.writes[0][..2], &[0xF8, 0x00]);
    }

    #[test]
    fn fill_rect_clips_to_panel() {
        let mut driver = make_driver(Rotation::Portrait);
        driver.fill_rect(130, 230, 50, 50, 0xFFFF).unwrap();

        let (bus, ..) = driver.release();
        assert_eq!(bus.writes[1], protocol::window_args(52 + 130, 52 + 134));
        let pixel_bytes: usize = bus.writes[5..].iter().map(Vec::len).sum();
        assert_eq!(pixel_bytes, 5 * 10 * 2);
    }

    #[cfg(feature = "embedded-graphics")]
    #[test]
    fn pixel_rows_share_one_window() {
        use embedded_graphics_core::{
            Pixel,
            draw_target::DrawTarget,
            geometry::Point,
            pixelcolor::{Rgb565, RgbColor},
        };

        let mut driver = make_driver(Rotation::Portrait);
        let row = (3..13).map(|x| Pixel(Point::new(x, 5), Rgb565::RED));
        let below = core::iter::once(Pixel(Point::new(3, 6), Rgb565::RED));
        driver.draw_iter(row.chain(below)).unwrap();

        let (bus, ..) = driver.release();
        let windows = bus
            .writes
            .iter()
            .filter(|write| **write == [protocol::RAMWR])
            .count();
        assert_eq!(windows, 2);
        assert_eq!(bus.writes[1], protocol::window_args(52 + 3, 52 + 12));
        assert_eq!(bus.writes[5].len(), 10 * 2);
    }

    #[test]
    fn unchanged_rotation_sends_nothing() {
        let mut driver = make_driver(Rotation::Landscape);
        driver.set_rotation(Rotation::Landscape).unwrap();
        let (bus, ..) = driver.release();
        assert!(bus.writes.is_empty());
    }
}
