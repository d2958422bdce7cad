//! Global motion flags and the override slot

use fbsmc_protocol::Axis;

use super::RunCommand;
use crate::safety::SwitchPattern;

/// Motion flags shared by the scheduler and the dispatcher
///
/// Lives from power-on until reset. The override ("move") command takes
/// priority over queued motion and ignores both the pause flag and the
/// switch latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    paused: bool,
    switch_activated: bool,
    override_cmd: RunCommand,
    override_axis: Option<Axis>,
    last_switch_sample: SwitchPattern,
}

impl MotionState {
    pub const fn new() -> Self {
        Self {
            paused: false,
            switch_activated: false,
            override_cmd: RunCommand::IDLE,
            override_axis: None,
            last_switch_sample: SwitchPattern::RELEASED,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Sticky limit switch latch
    pub fn switch_activated(&self) -> bool {
        self.switch_activated
    }

    pub fn set_switch_activated(&mut self, activated: bool) {
        self.switch_activated = activated;
    }

    /// Pattern read on the most recent tick
    pub fn last_switch_sample(&self) -> SwitchPattern {
        self.last_switch_sample
    }

    /// Record a fresh sample, latching the switch flag if anything is engaged
    ///
    /// Returns `true` if the sample shows an engaged switch.
    pub fn record_switch_sample(&mut self, sample: SwitchPattern) -> bool {
        self.last_switch_sample = sample;
        if sample.is_engaged() {
            self.switch_activated = true;
        }
        sample.is_engaged()
    }

    /// Axis the override currently targets
    pub fn override_axis(&self) -> Option<Axis> {
        self.override_axis
    }

    pub fn override_command(&self) -> &RunCommand {
        &self.override_cmd
    }

    pub fn override_command_mut(&mut self) -> &mut RunCommand {
        &mut self.override_cmd
    }

    /// Replace the override as a whole
    pub fn set_override(&mut self, axis: Axis, cmd: RunCommand) {
        self.override_cmd = cmd;
        self.override_axis = Some(axis);
    }

    /// Drop the override and its target axis
    pub fn clear_override(&mut self) {
        self.override_cmd.clear();
        self.override_axis = None;
    }

    /// Finish an exhausted override
    ///
    /// The switch latch follows `sample` rather than staying sticky, and
    /// the machine is left paused.
    pub fn finish_override(&mut self, sample: SwitchPattern) {
        self.clear_override();
        self.switch_activated = sample.is_engaged();
        self.paused = true;
    }

    /// Clear everything `reset` is allowed to touch
    ///
    /// The switch latch survives a reset.
    pub fn reset(&mut self) {
        self.clear_override();
        self.paused = false;
    }
}
