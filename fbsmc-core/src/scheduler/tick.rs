//! One scheduler tick

use fbsmc_protocol::Axis;
use heapless::Vec;

use crate::state::{Event, Machine};
use crate::traits::{AxisOutputs, LimitSwitchInput};

/// Events produced by a single tick
pub type TickEvents = Vec<Event, 2>;

/// Advance the machine by one tick
///
/// Priority order:
/// 1. A live override pulses its axis alone; queued motion is frozen and
///    neither the pause flag nor the switch latch blocks it.
/// 2. An exhausted override is cleared, the switch latch is set from the
///    current sample and the machine is paused.
/// 3. Without an override, and with neither latch nor pause set, every
///    axis of the head slot pulses. A finished slot is retired.
/// 4. The switches are sampled and latched on every tick.
pub fn tick<O, S>(machine: &mut Machine, outputs: &mut O, switches: &mut S) -> TickEvents
where
    O: AxisOutputs + ?Sized,
    S: LimitSwitchInput + ?Sized,
{
    let mut events = TickEvents::new();
    let sample = switches.sample();
    let (queue, motion) = machine.split_mut();

    if let Some(axis) = motion.override_axis() {
        if motion.override_command().is_active() {
            motion.override_command_mut().pulse(axis, outputs);
        } else {
            motion.finish_override(sample);
            let _ = events.push(Event::OverrideFinished { axis });
        }
    } else if !motion.switch_activated() && !motion.is_paused() {
        let head = queue.head();
        let was_live = queue.is_live(head);

        for (axis, cmd) in Axis::ALL.into_iter().zip(queue.head_slot_mut().iter_mut()) {
            cmd.pulse(axis, outputs);
        }

        if queue.slot_ready_to_advance(head) {
            if was_live {
                let _ = events.push(Event::SlotFinished { index: head });
            }
            queue.retire_head();
        }
    }

    let latched = motion.switch_activated();
    if motion.record_switch_sample(sample) && !latched {
        let _ = events.push(Event::SwitchTripped(sample));
    }

    events
}
