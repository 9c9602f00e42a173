//! Vellum - E-Paper Calendar Firmware
//!
//! Main firmware binary for ESP32-S3 boards driving a Waveshare 7.5" v2
//! panel in portrait. Fetches a JSON plan feed over HTTPS on a fixed
//! cadence and redraws the wall agenda, degrading to cached or empty
//! content whenever the network or the clock is not ready.
//!
//! Named after vellum, the parchment of medieval calendars - a page
//! rewritten in place, which is all an e-paper panel ever does.
//!
//! Build-time configuration comes from four environment variables:
//! `VELLUM_WIFI_SSID`, `VELLUM_WIFI_PASSWORD`, `VELLUM_FEED_URL` and
//! `VELLUM_FEED_API_KEY`.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_time::{Delay, Duration, Timer, WithTimeout};
use embedded_hal_bus::spi::ExclusiveDevice;
use epd_waveshare::epd7in5_v2::Display7in5;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::rng::Rng;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::spi::Mode;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_radio::Controller;
use log::{info, trace, warn};

use vellum_core::engine::{EngineConfig, RefreshEngine};
use vellum_core::traits::{DrawSurface, RefreshMode};

use crate::battery::BoardBattery;
use crate::clock::{SyncedClock, TZ_OFFSET_SECS};
use crate::fetch::{FetchTcpState, HttpPlanSource, TLS_READ_BUF_SIZE, TLS_WRITE_BUF_SIZE};
use crate::surface::PanelSurface;
use crate::tasks::{net_task, refresh_task, timesync_task, wifi_task};

mod battery;
mod channels;
mod clock;
mod fetch;
mod surface;
mod tasks;

esp_bootloader_esp_idf::esp_app_desc!();

macro_rules! mk_static {
    ($t:ty,$val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

// Build-time configuration. All four are required.
const WIFI_SSID: &str = env!(
    "VELLUM_WIFI_SSID",
    "Set VELLUM_WIFI_SSID in your environment before building/flashing."
);
const WIFI_PASSWORD: &str = env!(
    "VELLUM_WIFI_PASSWORD",
    "Set VELLUM_WIFI_PASSWORD in your environment before building/flashing."
);
const FEED_URL: &str = env!(
    "VELLUM_FEED_URL",
    "Set VELLUM_FEED_URL to the https:// plan feed endpoint."
);
const FEED_API_KEY: &str = env!(
    "VELLUM_FEED_API_KEY",
    "Set VELLUM_FEED_API_KEY to the feed's API key."
);

/// How long boot waits for the first DHCP lease before starting cycles
/// anyway. Cycles fetch-fail cleanly while the link is still down.
const STARTUP_NETWORK_WAIT_SECS: u64 = 30;

/// Main entry point
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);
    info!("Vellum firmware starting...");

    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    info!("Peripherals initialized");

    // esp-radio requires an allocator
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 65536);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Radio and Wi-Fi station interface
    let radio = &*mk_static!(Controller<'static>, esp_radio::init().expect("radio init failed"));
    let (controller, interfaces) = esp_radio::wifi::new(
        radio,
        peripherals.WIFI,
        esp_radio::wifi::Config::default(),
    )
    .expect("wifi init failed");

    let mut rng = Rng::new();
    let net_seed = (rng.random() as u64) << 32 | rng.random() as u64;
    let tls_seed = (rng.random() as u64) << 32 | rng.random() as u64;

    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        mk_static!(StackResources<4>, StackResources::<4>::new()),
        net_seed,
    );

    spawner.spawn(net_task(runner)).unwrap();
    spawner
        .spawn(wifi_task(controller, stack, WIFI_SSID, WIFI_PASSWORD))
        .unwrap();
    spawner.spawn(timesync_task(stack)).unwrap();
    info!("Network tasks spawned");

    // Give the first association a grace period; after that the refresh
    // loop runs regardless and serves cached or empty content offline.
    match stack
        .wait_config_up()
        .with_timeout(Duration::from_secs(STARTUP_NETWORK_WAIT_SECS))
        .await
    {
        Ok(()) => {
            if let Some(config) = stack.config_v4() {
                info!("Network up, ip {}", config.address);
            }
        }
        Err(_) => warn!("Network not up yet, starting cycles offline"),
    }

    // Panel on SPI2: SCK=GPIO10 MOSI=GPIO11 CS=GPIO9, control lines
    // DC=GPIO8 RST=GPIO12 BUSY=GPIO13
    let spi = Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_mhz(10))
            .with_mode(Mode::_0),
    )
    .expect("SPI init failed")
    .with_sck(peripherals.GPIO10)
    .with_mosi(peripherals.GPIO11);
    let cs = Output::new(peripherals.GPIO9, Level::High, OutputConfig::default());
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).expect("SPI device init failed");

    let dc = Output::new(peripherals.GPIO8, Level::Low, OutputConfig::default());
    let rst = Output::new(peripherals.GPIO12, Level::High, OutputConfig::default());
    let busy = Input::new(peripherals.GPIO13, InputConfig::default().with_pull(Pull::Up));

    let framebuffer = mk_static!(Display7in5, Display7in5::default());
    let mut panel = PanelSurface::new(spi_device, busy, dc, rst, Delay, framebuffer)
        .expect("panel init failed");

    // One full-waveform wipe at boot clears whatever the panel last held
    panel.clear().expect("panel clear failed");
    panel.flush(RefreshMode::Full).expect("panel wipe failed");
    info!("Panel initialized");

    let battery = BoardBattery::new(peripherals.ADC1, peripherals.GPIO4);
    let clock = SyncedClock::new(TZ_OFFSET_SECS);

    let engine_config = EngineConfig::default();
    let source = HttpPlanSource::new(
        stack,
        mk_static!(FetchTcpState, FetchTcpState::new()),
        mk_static!([u8; TLS_READ_BUF_SIZE], [0; TLS_READ_BUF_SIZE]),
        mk_static!([u8; TLS_WRITE_BUF_SIZE], [0; TLS_WRITE_BUF_SIZE]),
        tls_seed,
        FEED_URL,
        FEED_API_KEY,
        Duration::from_millis(u64::from(engine_config.fetch_timeout_ms)),
    );
    let engine = RefreshEngine::new(engine_config);

    spawner
        .spawn(refresh_task(engine, panel, source, clock, battery))
        .unwrap();
    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
