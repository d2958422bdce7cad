//! I2C target task
//!
//! Each master write is fed byte by byte into the transport; every
//! completed line is dispatched against the machine and its reply becomes
//! the response for the next master read. A stop condition ends the
//! transaction.
//!
//! An accepted `setaddr` clears the response and only takes effect after
//! the transaction that carried it: the address is persisted, then the
//! target is rebuilt on the new address.

use defmt::*;
use embassy_rp::i2c_slave::{self, Command as BusCommand, I2cSlave};
use embassy_rp::peripherals::{I2C0, PIN_0, PIN_1};
use embassy_rp::Peri;

use fbsmc_core::dispatch::dispatch;
use fbsmc_hal::BusAddress;
use fbsmc_protocol::{Command, Transport, BUFFER_SIZE};

use crate::config::AddressStore;
use crate::state::with_machine;
use crate::Irqs;

/// Peripherals owned by the bus task
pub struct BusPeripherals {
    pub i2c: Peri<'static, I2C0>,
    pub sda: Peri<'static, PIN_0>,
    pub scl: Peri<'static, PIN_1>,
}

#[embassy_executor::task]
pub async fn bus_task(
    mut bus: BusPeripherals,
    mut store: AddressStore<'static>,
    mut address: BusAddress,
) {
    info!("Bus task started");

    let mut transport = Transport::new();

    loop {
        let mut config = i2c_slave::Config::default();
        config.addr = u16::from(address.get());

        let mut target = I2cSlave::new(
            bus.i2c.reborrow(),
            bus.scl.reborrow(),
            bus.sda.reborrow(),
            Irqs,
            config,
        );
        info!("Listening on address {:#x}", address.get());

        let new_address = serve(&mut target, &mut transport).await;
        drop(target);

        if let Err(e) = store.store_persisted_address(new_address).await {
            error!("Failed to persist bus address: {:?}", e);
        }
        address = new_address;
    }
}

/// Handle transactions until one changes the bus address
async fn serve(target: &mut I2cSlave<'_, I2C0>, transport: &mut Transport) -> BusAddress {
    let mut pending = None;

    loop {
        let mut buffer = [0u8; BUFFER_SIZE];

        match target.listen(&mut buffer).await {
            Ok(BusCommand::Write(len)) => {
                receive(transport, &buffer[..len], &mut pending);
            }
            Ok(BusCommand::WriteRead(len)) => {
                receive(transport, &buffer[..len], &mut pending);
                respond(target, transport).await;
            }
            Ok(BusCommand::Read) => {
                respond(target, transport).await;
            }
            Ok(BusCommand::GeneralCall(len)) => {
                debug!("Ignoring general call ({} bytes)", len);
            }
            Err(i2c_slave::Error::PartialWrite(len)) => {
                // Longer than a frame; the transport drops the oversized line
                receive(transport, &buffer[..len.min(BUFFER_SIZE)], &mut pending);
            }
            Err(e) => {
                warn!("I2C target error: {:?}", e);
            }
        }

        transport.stop();

        if let Some(address) = pending {
            return address;
        }
    }
}

/// Feed written bytes, dispatching every completed line
fn receive(transport: &mut Transport, bytes: &[u8], pending: &mut Option<BusAddress>) {
    for &byte in bytes {
        match transport.receive(byte) {
            Ok(Some(message)) => {
                let command = Command::from_bytes(&message);
                trace!("Command: {}", command.name());

                let reply = with_machine(|machine| dispatch(machine, command));
                match reply.new_address {
                    Some(address) => {
                        transport.clear_response();
                        *pending = Some(address);
                    }
                    None => transport.set_response(&reply.text),
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Dropped command: {:?}", e),
        }
    }
}

/// Serve the padded response frame to the master
async fn respond(target: &mut I2cSlave<'_, I2C0>, transport: &mut Transport) {
    let mut frame = [0u8; BUFFER_SIZE];
    for (slot, byte) in frame.iter_mut().zip(core::iter::from_fn(|| transport.transmit())) {
        *slot = byte;
    }

    if let Err(e) = target.respond_and_fill(&frame, 0x00).await {
        warn!("I2C read failed: {:?}", e);
    }
}
