//! `status` report

use core::fmt::{self, Write};

use fbsmc_protocol::{format_uint, Axis};

use super::ReplyText;
use crate::motion::RunCommand;
use crate::queue::QUEUE_CAPACITY;
use crate::state::{Machine, Mode};

/// Build the multi-line status report
///
/// ```text
/// RUN
/// A:100,5
/// B:-20,3
/// C:0,0
/// D:0,0
/// SW:NONE
/// BUFF:1/10
/// ```
///
/// In `MOVE` mode only the override axis is listed. Axis lines show the
/// command at the queue head.
pub fn status_report(machine: &Machine) -> ReplyText {
    let mut out = ReplyText::new();
    // The longest possible report is well under the reply capacity
    let _ = write_report(machine, &mut out);
    out
}

fn write_report(machine: &Machine, out: &mut ReplyText) -> fmt::Result {
    let mode = machine.mode();
    writeln!(out, "{}", mode.as_str())?;

    let motion = machine.motion();
    match (mode, motion.override_axis()) {
        (Mode::Move, Some(axis)) => write_axis(out, axis, motion.override_command())?,
        _ => {
            let queue = machine.queue();
            let head = queue.slot(queue.head());
            for (axis, cmd) in Axis::ALL.into_iter().zip(head.iter()) {
                write_axis(out, axis, cmd)?;
            }
        }
    }

    writeln!(out, "SW:{}", motion.last_switch_sample().label())?;
    write!(
        out,
        "BUFF:{}/{}",
        machine.queue().occupancy(),
        QUEUE_CAPACITY
    )
}

fn write_axis(out: &mut ReplyText, axis: Axis, cmd: &RunCommand) -> fmt::Result {
    let sign = if cmd.direction.is_forward() { "" } else { "-" };
    writeln!(
        out,
        "{}:{}{},{}",
        axis.letter(),
        sign,
        format_uint(cmd.steps),
        format_uint(u32::from(cmd.speed))
    )
}
