//! Antlia - Water Sampler Firmware
//!
//! Main firmware binary for RP2040-based sampler controllers.
//!
//! On water detection the rig runs up to six pumps in a timed sequence,
//! one at a time, each for the shared configured runtime. Offsets and
//! runtime are edited on the three-button panel and persisted in flash.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use antlia_drivers::GpioPump;
use antlia_hal_rp2040::{ButtonAdc, SettingsFlash};

use crate::tasks::pumps::{PumpBank, PumpPin};

mod channels;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Antlia firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Settings come out of flash before anything else runs
    let mut storage = SettingsFlash::new(p.FLASH, p.DMA_CH0);
    let settings = tasks::storage::load_settings(&mut storage).await;
    if settings.is_loaded() {
        info!("Settings loaded");
    } else {
        warn!("Settings load failed, running on defaults");
    }

    // Setup UART for panel communication
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for panel communication");

    // Button ladder on ADC0 (GPIO26); the external ladder pulls the idle
    // line to full scale
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let ladder = Channel::new_pin(p.PIN_26, Pull::None);
    let buttons = ButtonAdc::new(adc, ladder);

    // Float switch closes to ground when water lifts the float
    let float_pin = Input::new(p.PIN_22, Pull::Up);

    // Six pump outputs, deasserted at boot
    let pumps: PumpBank = [
        GpioPump::new_active_high(PumpPin(Output::new(p.PIN_2, Level::Low))),
        GpioPump::new_active_high(PumpPin(Output::new(p.PIN_3, Level::Low))),
        GpioPump::new_active_high(PumpPin(Output::new(p.PIN_4, Level::Low))),
        GpioPump::new_active_high(PumpPin(Output::new(p.PIN_5, Level::Low))),
        GpioPump::new_active_high(PumpPin(Output::new(p.PIN_6, Level::Low))),
        GpioPump::new_active_high(PumpPin(Output::new(p.PIN_7, Level::Low))),
    ];
    info!("Outputs initialized");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::buttons_task(buttons)).unwrap();
    spawner.spawn(tasks::float_switch_task(float_pin)).unwrap();
    spawner.spawn(tasks::pumps_task(pumps)).unwrap();
    spawner.spawn(tasks::storage_task(storage)).unwrap();
    spawner.spawn(tasks::display_rx_task(rx)).unwrap();
    spawner.spawn(tasks::display_tx_task(tx)).unwrap();
    spawner.spawn(tasks::controller_task(settings)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
