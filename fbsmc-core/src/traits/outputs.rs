//! Step and direction outputs

use fbsmc_hal::OutputPin;
use fbsmc_protocol::{Axis, Direction, AXIS_COUNT};

/// Step/direction output pairs for all axes
pub trait AxisOutputs {
    /// Drive the direction output of `axis`
    fn set_direction(&mut self, axis: Axis, direction: Direction);

    /// Toggle the step output of `axis`, returning the new level
    fn toggle_step(&mut self, axis: Axis) -> bool;
}

/// [`AxisOutputs`] over individual GPIO pins
///
/// `Forward` drives the direction pin high unless that axis is configured
/// as inverted. Step levels are logical: an inverted step pin idles high
/// and `toggle_step` reports the level before inversion.
pub struct PinOutputs<S, D> {
    step: [S; AXIS_COUNT],
    dir: [D; AXIS_COUNT],
    step_inverted: [bool; AXIS_COUNT],
    dir_inverted: [bool; AXIS_COUNT],
}

impl<S: OutputPin, D: OutputPin> PinOutputs<S, D> {
    /// Wrap the pins, parking every step output at its logical low
    pub fn new(
        mut step: [S; AXIS_COUNT],
        dir: [D; AXIS_COUNT],
        step_inverted: [bool; AXIS_COUNT],
        dir_inverted: [bool; AXIS_COUNT],
    ) -> Self {
        for (pin, inverted) in step.iter_mut().zip(step_inverted) {
            pin.set_state(inverted);
        }
        Self {
            step,
            dir,
            step_inverted,
            dir_inverted,
        }
    }
}

impl<S: OutputPin, D: OutputPin> AxisOutputs for PinOutputs<S, D> {
    fn set_direction(&mut self, axis: Axis, direction: Direction) {
        let i = axis.index();
        self.dir[i].set_state(direction.is_forward() != self.dir_inverted[i]);
    }

    fn toggle_step(&mut self, axis: Axis) -> bool {
        let i = axis.index();
        let pin = &mut self.step[i];
        pin.toggle();
        pin.is_set_high() != self.step_inverted[i]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every output change for scheduler tests
    #[derive(Debug, Default)]
    pub struct RecordingOutputs {
        pub step: [bool; AXIS_COUNT],
        pub dir: [Option<Direction>; AXIS_COUNT],
        pub toggles: [u32; AXIS_COUNT],
    }

    impl AxisOutputs for RecordingOutputs {
        fn set_direction(&mut self, axis: Axis, direction: Direction) {
            self.dir[axis.index()] = Some(direction);
        }

        fn toggle_step(&mut self, axis: Axis) -> bool {
            let i = axis.index();
            self.step[i] = !self.step[i];
            self.toggles[i] += 1;
            self.step[i]
        }
    }

    #[derive(Debug, Default, Clone, Copy)]
    struct Latch(bool);

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_step_pins_start_low() {
        let outputs = PinOutputs::new([Latch(true); 4], [Latch(false); 4], [false; 4], [false; 4]);
        assert!(outputs.step.iter().all(|p| !p.0));
    }

    #[test]
    fn test_toggle_reports_level() {
        let mut outputs =
            PinOutputs::new([Latch(false); 4], [Latch(false); 4], [false; 4], [false; 4]);
        assert!(outputs.toggle_step(Axis::D));
        assert!(!outputs.toggle_step(Axis::D));
        assert!(!outputs.step[0].0);
    }

    #[test]
    fn test_inverted_step_pin() {
        let mut outputs = PinOutputs::new(
            [Latch(false); 4],
            [Latch(false); 4],
            [false, false, true, false],
            [false; 4],
        );
        assert!(outputs.step[2].0);
        assert!(!outputs.step[1].0);

        // Logical rising edge drives the pin low
        assert!(outputs.toggle_step(Axis::C));
        assert!(!outputs.step[2].0);
        assert!(!outputs.toggle_step(Axis::C));
        assert!(outputs.step[2].0);
    }

    #[test]
    fn test_direction_inversion() {
        let mut outputs = PinOutputs::new(
            [Latch(false); 4],
            [Latch(false); 4],
            [false; 4],
            [false, true, false, false],
        );
        outputs.set_direction(Axis::A, Direction::Forward);
        outputs.set_direction(Axis::B, Direction::Forward);
        assert!(outputs.dir[0].0);
        assert!(!outputs.dir[1].0);

        outputs.set_direction(Axis::B, Direction::Reverse);
        assert!(outputs.dir[1].0);
    }
}
