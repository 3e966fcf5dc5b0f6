use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
use st7789::{Config, DriverResult, Rotation, St7789};

use crate::render::Orientable;

pub type Tft<SPI, DC, CS, RST> = St7789<SPI, DC, CS, RST>;

impl<SPI, DC, CS, RST> Orientable for St7789<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Self::Error> {
        St7789::set_rotation(self, rotation)
    }
}

/// 135x240 module as mounted on both supported boards, starting in `top`.
pub fn tft_config(top: Rotation) -> Config {
    Config {
        rotation: top,
        ..Config::default()
    }
}

/// Reset, power-up sequence and a black first frame.
pub fn bring_up<SPI, DC, CS, RST, D>(
    tft: &mut Tft<SPI, DC, CS, RST>,
    delay: &mut D,
) -> DriverResult<SPI::Error, DC::Error, CS::Error, RST::Error>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    tft.init(delay)?;
    tft.fill(0x0000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tft_config_starts_in_top_rotation_at_bus_clock() {
        let config = tft_config(Rotation::PortraitFlipped);
        assert_eq!(config.rotation, Rotation::PortraitFlipped);
        assert_eq!(config.spi_hz, 40_000_000);
        assert_eq!(config.panel, st7789::PanelGeometry::P135X240);
    }
}
