#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::Timer;
use esp_hal::{
    clock::CpuClock,
    delay::Delay,
    gpio::{Input, InputConfig, Io, Level, Output, OutputConfig, Pull},
    spi::master::Spi,
    time::{Instant, Rate},
    timer::timg::TimerGroup,
};
use infiltra_core::app::MenuApp;
use infiltra_hal::{
    ir::CapturedIrReceiver,
    platform::display::{Tft, bring_up, tft_config},
    render::ScreenRenderer,
};
use log::{LevelFilter, info};

use ir_capture::{HalClock, IR_CAPTURE};

#[path = "main/board.rs"]
mod board;
#[path = "main/ir_capture.rs"]
mod ir_capture;

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

const IDLE_TICK_MS: u64 = 1;

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: infiltra starting ({})", board::NAME);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);
    info!("board {} pins: {}", board::NAME, board::PINS);

    // Power-hold must be asserted before anything else or the stick switches
    // itself off when the power button is released.
    #[cfg(feature = "board-stick")]
    let _power_hold = Output::new(peripherals.GPIO4, Level::High, OutputConfig::default());

    // Stick TFT wiring: MOSI=GPIO15, SCLK=GPIO13, DC=GPIO14, RST=GPIO12, CS=GPIO5, BL=GPIO27
    #[cfg(feature = "board-stick")]
    let (sck, mosi, dc, rst, cs, backlight) = (
        peripherals.GPIO13,
        peripherals.GPIO15,
        peripherals.GPIO14,
        peripherals.GPIO12,
        peripherals.GPIO5,
        peripherals.GPIO27,
    );
    // Cardputer TFT wiring: MOSI=GPIO35, SCLK=GPIO36, DC=GPIO34, RST=GPIO33, CS=GPIO37, BL=GPIO38
    #[cfg(feature = "board-cardputer")]
    let (sck, mosi, dc, rst, cs, backlight) = (
        peripherals.GPIO36,
        peripherals.GPIO35,
        peripherals.GPIO34,
        peripherals.GPIO33,
        peripherals.GPIO37,
        peripherals.GPIO38,
    );

    let _backlight = Output::new(backlight, Level::High, OutputConfig::default());
    let dc = Output::new(dc, Level::Low, OutputConfig::default());
    let rst = Output::new(rst, Level::High, OutputConfig::default());
    let cs = Output::new(cs, Level::High, OutputConfig::default());

    let tft_config = tft_config(board::RENDERER.top);
    let spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_hz(tft_config.spi_hz))
        .with_mode(esp_hal::spi::Mode::_0);

    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(sck)
        .with_mosi(mosi);

    let mut delay = Delay::new();

    let mut tft = Tft::new(spi, dc, cs, rst, tft_config);
    esp_println::println!("display: init begin");
    if let Err(err) = bring_up(&mut tft, &mut delay) {
        esp_println::println!("display: initialize failed");
        info!("display initialize failed: {:?}", err);
    } else {
        esp_println::println!("display: initialize ok");
    }
    let mut renderer = ScreenRenderer::new(tft, board::RENDERER);

    // Stick buttons: A=GPIO37, B=GPIO39, C=GPIO35. Input-only pads, pulled up on the board.
    #[cfg(feature = "board-stick")]
    let input = {
        let input_cfg = InputConfig::default();
        infiltra_hal::input::GpioButtons::new(
            Input::new(peripherals.GPIO37, input_cfg),
            Input::new(peripherals.GPIO39, input_cfg),
            Input::new(peripherals.GPIO35, input_cfg),
            infiltra_hal::input::ButtonConfig::default(),
        )
        .unwrap()
    };

    // Cardputer keyboard: select=GPIO8,9,11 sense=GPIO13,15,3,4,5,6,7
    #[cfg(feature = "board-cardputer")]
    let input = {
        let select_cfg = OutputConfig::default();
        let sense_cfg = InputConfig::default().with_pull(Pull::Up);
        infiltra_hal::input::KeyboardMatrix::new(
            [
                Output::new(peripherals.GPIO8, Level::Low, select_cfg),
                Output::new(peripherals.GPIO9, Level::Low, select_cfg),
                Output::new(peripherals.GPIO11, Level::Low, select_cfg),
            ],
            [
                Input::new(peripherals.GPIO13, sense_cfg),
                Input::new(peripherals.GPIO15, sense_cfg),
                Input::new(peripherals.GPIO3, sense_cfg),
                Input::new(peripherals.GPIO4, sense_cfg),
                Input::new(peripherals.GPIO5, sense_cfg),
                Input::new(peripherals.GPIO6, sense_cfg),
                Input::new(peripherals.GPIO7, sense_cfg),
            ],
        )
    };

    // IR receiver: GPIO33 on the stick grove port, GPIO1 on the cardputer.
    #[cfg(feature = "board-stick")]
    let ir_pin = peripherals.GPIO33;
    #[cfg(feature = "board-cardputer")]
    let ir_pin = peripherals.GPIO1;

    let mut io = Io::new(peripherals.IO_MUX);
    io.set_interrupt_handler(ir_capture::gpio_handler);
    ir_capture::attach(Input::new(ir_pin, InputConfig::default().with_pull(Pull::Up)));
    let ir_receiver = CapturedIrReceiver::new(&IR_CAPTURE, HalClock);

    let mut app = MenuApp::new(input, ir_receiver, board::ui_config());
    app.present(app.initial_redraw(), 0, &mut renderer);
    esp_println::println!("boot: menu ready");

    let loop_start = Instant::now();
    loop {
        let now_ms = loop_start.elapsed().as_millis();
        let result = app.tick(now_ms);
        app.present(result.redraw, now_ms, &mut renderer);

        let delay_ms = result.frame_delay_ms.map_or(IDLE_TICK_MS, u64::from);
        Timer::after_millis(delay_ms).await;
    }
}
