//! Step tick task
//!
//! Runs the scheduler once per configured tick period.

use defmt::*;
use embassy_time::{Duration, Ticker};

use fbsmc_core::scheduler::tick;
use fbsmc_core::state::Event;
use fbsmc_core::traits::{PinOutputs, PinSwitches};
use fbsmc_hal_rp2040::gpio::{RpInput, RpOutput};

use crate::state::with_machine;

/// Step/dir outputs for all four axes
pub type BoardOutputs = PinOutputs<RpOutput<'static>, RpOutput<'static>>;

/// Limit switch inputs
pub type BoardSwitches = PinSwitches<RpInput<'static>>;

#[embassy_executor::task]
pub async fn tick_task(mut outputs: BoardOutputs, mut switches: BoardSwitches, period_us: u32) {
    info!("Tick task started, period {}us", period_us);

    let mut ticker = Ticker::every(Duration::from_micros(u64::from(period_us)));

    loop {
        ticker.next().await;

        let events = with_machine(|machine| tick(machine, &mut outputs, &mut switches));

        for event in events {
            match event {
                Event::OverrideFinished { axis } => {
                    info!("Move on axis {} finished, paused", axis.letter())
                }
                Event::SlotFinished { index } => debug!("Slot {} finished", index),
                Event::SwitchTripped(pattern) => {
                    warn!("Limit switch {} engaged, motion held", pattern.label())
                }
            }
        }
    }
}
