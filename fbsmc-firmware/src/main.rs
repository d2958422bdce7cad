//! FBSMC - FibStack Stepper Motor Controller
//!
//! Firmware for an RP2040 board driving four step/dir stepper axes.
//! Commands arrive as text over an I2C target bus, are queued per axis,
//! and a fixed-period tick turns them into step pulses.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

use fbsmc_core::config::BoardConfig;
use fbsmc_core::traits::{PinOutputs, PinSwitches};
use fbsmc_hal::BusAddress;
use fbsmc_hal_rp2040::flash::Rp2040FlashStorage;
use fbsmc_hal_rp2040::pins::{PinBank, PinError};

use crate::config::{load_board_config, AddressStore};
use crate::tasks::{BoardOutputs, BoardSwitches, BusPeripherals};

mod config;
mod state;
mod tasks;

bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => embassy_rp::i2c::InterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("FBSMC firmware starting...");

    let p = embassy_rp::init(Default::default());
    let board = load_board_config();

    let (mut bank, rest) = PinBank::from_peripherals(p);
    let (outputs, switches) = unwrap!(claim_pins(&mut bank, &board));
    info!("Axis and limit switch pins claimed");

    let mut store = AddressStore::new(Rp2040FlashStorage::new(rest.flash, rest.dma_ch0));
    let default_address = board.bus_address().unwrap_or(BusAddress::DEFAULT);
    let address = store.load_persisted_address(default_address).await;

    let bus = BusPeripherals {
        i2c: rest.i2c0,
        sda: rest.sda,
        scl: rest.scl,
    };

    spawner.spawn(unwrap!(tasks::tick_task(
        outputs,
        switches,
        board.tick_period_us
    )));
    spawner.spawn(unwrap!(tasks::bus_task(bus, store, address)));

    info!("All tasks spawned, firmware running");
}

/// Take the configured pins out of the bank
fn claim_pins(
    bank: &mut PinBank,
    board: &BoardConfig,
) -> Result<(BoardOutputs, BoardSwitches), PinError> {
    let [a, b, c, d] = &board.axes;
    let step = [
        bank.take_output(a.step.pin)?,
        bank.take_output(b.step.pin)?,
        bank.take_output(c.step.pin)?,
        bank.take_output(d.step.pin)?,
    ];
    let dir = [
        bank.take_output(a.dir.pin)?,
        bank.take_output(b.dir.pin)?,
        bank.take_output(c.dir.pin)?,
        bank.take_output(d.dir.pin)?,
    ];

    let [s0, s1, s2, s3] = &board.switches;
    let switches = [
        bank.take_input(s0.pin, s0.pull_up)?,
        bank.take_input(s1.pin, s1.pull_up)?,
        bank.take_input(s2.pin, s2.pull_up)?,
        bank.take_input(s3.pin, s3.pull_up)?,
    ];

    Ok((
        PinOutputs::new(step, dir, board.step_inverted(), board.dir_inverted()),
        PinSwitches::new(switches, board.switch_inverted()),
    ))
}
