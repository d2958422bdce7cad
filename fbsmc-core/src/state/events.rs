//! Transitions reported by the scheduler

use fbsmc_protocol::Axis;

use crate::safety::SwitchPattern;

/// Something worth logging that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The override move on this axis ran out; the machine is now paused
    OverrideFinished { axis: Axis },
    /// Every axis in the slot at `index` finished
    SlotFinished { index: usize },
    /// A limit switch engaged while the latch was clear
    SwitchTripped(SwitchPattern),
}
