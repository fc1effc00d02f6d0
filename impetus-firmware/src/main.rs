//! Impetus - Interval Timer Watch Firmware
//!
//! Main firmware binary for RP2040-based watch boards. The paired phone runs
//! the workout; a BLE bridge on UART0 relays its messages. The watch counts
//! each phase down locally and signals phase changes with the vibration
//! motor and backlight.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use impetus_core::controller::Button;

mod channels;
mod config;
mod device;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Impetus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Setup UART for the BLE bridge
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for BLE bridge");

    // Buttons are active low
    let up = Input::new(p.PIN_2, Pull::Up);
    let select = Input::new(p.PIN_3, Pull::Up);
    let down = Input::new(p.PIN_4, Pull::Up);

    let motor = Output::new(p.PIN_15, Level::Low);
    let backlight = Output::new(p.PIN_16, Level::Low);

    info!("GPIO initialized");

    // Spawn tasks
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::haptics_task(motor, config.double_pulse_segments()))
        .unwrap();
    spawner
        .spawn(tasks::backlight_task(backlight, config.backlight_timeout_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(up, Button::Up, config.button_repeat_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(select, Button::Select, config.button_repeat_ms))
        .unwrap();
    spawner
        .spawn(tasks::button_task(down, Button::Down, config.button_repeat_ms))
        .unwrap();
    spawner.spawn(tasks::controller_task()).unwrap();
    spawner.spawn(tasks::tick_task(config.tick_interval_ms)).unwrap();

    info!("All tasks spawned");
}
