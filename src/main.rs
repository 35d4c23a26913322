//! Proofing-box controller firmware, main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  HardwareAdapter              LogEventSink               │
//! │  (SensorPort + RelayPort)     (EventSink)                │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ─────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        ProofingService (pure logic)            │      │
//! │  │  Safety · ThermalStateMachine · Status         │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use proofer::adapters::hardware::HardwareAdapter;
use proofer::adapters::log_sink::LogEventSink;
use proofer::app::commands::AppCommand;
use proofer::app::service::ProofingService;
use proofer::clock::MonotonicClock;
use proofer::config::ControllerConfig;
use proofer::drivers::adc::OneshotAdc;
use proofer::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Proofer v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControllerConfig::default();
    config.validate()?;

    // ── 3. Hardware ───────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let relay_pin = PinDriver::output(peripherals.pins.gpio4)?;
    let adc = OneshotAdc::new()?;
    let mut hw = HardwareAdapter::new(relay_pin, adc)?;
    let mut sink = LogEventSink::new();
    info!("relay on GPIO{}", pins::RELAY_GPIO);

    // ── 4. Controller ─────────────────────────────────────────
    let mut service = ProofingService::new(&config, MonotonicClock::new(), &mut hw, &mut sink);
    service.handle_command(AppCommand::ReportStatus, &mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        service.tick(&mut hw, &mut sink);
        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}
