//! A single per-axis motion instruction

use fbsmc_protocol::{Axis, AxisMove, Direction};

use crate::traits::AxisOutputs;

/// One pending or in-progress instruction for one axis
///
/// `steps == 0` means the command is idle. `speed` is the number of ticks
/// between successive step edges, so one full pulse takes `2 * speed`
/// ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunCommand {
    /// Remaining full pulses
    pub steps: u32,
    /// Direction pin level while stepping
    pub direction: Direction,
    /// Ticks per edge
    pub speed: u16,
    /// Ticks since the last edge
    pub phase_counter: u16,
}

impl Default for RunCommand {
    fn default() -> Self {
        Self::IDLE
    }
}

impl RunCommand {
    /// The cleared command
    pub const IDLE: Self = Self {
        steps: 0,
        direction: Direction::Forward,
        speed: 0,
        phase_counter: 0,
    };

    /// Create a fresh command with a zeroed phase counter
    pub const fn new(direction: Direction, steps: u32, speed: u16) -> Self {
        Self {
            steps,
            direction,
            speed,
            phase_counter: 0,
        }
    }

    /// Check if pulses remain
    pub const fn is_active(&self) -> bool {
        self.steps > 0
    }

    /// Reset to the idle command
    pub fn clear(&mut self) {
        *self = Self::IDLE;
    }

    /// Do one tick of pulse work on `axis`
    ///
    /// The step count only drops on the edge that returns the step output
    /// low, so a command reports completion after its last pulse has fully
    /// ended. A zero speed never advances.
    pub fn pulse<O: AxisOutputs + ?Sized>(&mut self, axis: Axis, outputs: &mut O) {
        if self.steps == 0 || self.speed == 0 {
            return;
        }

        self.phase_counter = self.phase_counter.saturating_add(1);
        if self.phase_counter < self.speed {
            return;
        }

        outputs.set_direction(axis, self.direction);
        let step_high = outputs.toggle_step(axis);
        if !step_high {
            self.steps -= 1;
        }
        self.phase_counter = 0;
    }
}

impl From<AxisMove> for RunCommand {
    fn from(m: AxisMove) -> Self {
        Self::new(m.direction, m.steps, m.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::outputs::tests::RecordingOutputs;

    #[test]
    fn test_idle_is_noop() {
        let mut outputs = RecordingOutputs::default();
        let mut cmd = RunCommand::IDLE;
        cmd.pulse(Axis::A, &mut outputs);
        assert_eq!(cmd, RunCommand::IDLE);
        assert_eq!(outputs.toggles[0], 0);
    }

    #[test]
    fn test_one_pulse_every_two_speed_ticks() {
        let mut outputs = RecordingOutputs::default();
        let mut cmd = RunCommand::new(Direction::Forward, 2, 3);

        // Rising edge after 3 ticks, no decrement yet
        for _ in 0..3 {
            cmd.pulse(Axis::B, &mut outputs);
        }
        assert!(outputs.step[1]);
        assert_eq!(cmd.steps, 2);
        assert_eq!(cmd.phase_counter, 0);

        // Falling edge after 3 more ticks completes the pulse
        for _ in 0..3 {
            cmd.pulse(Axis::B, &mut outputs);
        }
        assert!(!outputs.step[1]);
        assert_eq!(cmd.steps, 1);

        for _ in 0..6 {
            cmd.pulse(Axis::B, &mut outputs);
        }
        assert_eq!(cmd.steps, 0);
        assert_eq!(outputs.toggles[1], 4);

        // Exhausted: further ticks leave the pin alone
        cmd.pulse(Axis::B, &mut outputs);
        assert_eq!(outputs.toggles[1], 4);
    }

    #[test]
    fn test_direction_driven_on_edge() {
        let mut outputs = RecordingOutputs::default();
        outputs.dir[2] = Some(Direction::Forward);
        let mut cmd = RunCommand::new(Direction::Reverse, 1, 1);
        cmd.pulse(Axis::C, &mut outputs);
        assert_eq!(outputs.dir[2], Some(Direction::Reverse));
    }

    #[test]
    fn test_zero_speed_stalls() {
        let mut outputs = RecordingOutputs::default();
        let mut cmd = RunCommand::new(Direction::Forward, 5, 0);
        for _ in 0..100 {
            cmd.pulse(Axis::A, &mut outputs);
        }
        assert_eq!(cmd.steps, 5);
        assert_eq!(outputs.toggles[0], 0);
    }
}
