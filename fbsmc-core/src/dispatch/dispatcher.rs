//! Command execution

use fbsmc_hal::BusAddress;
use fbsmc_protocol::{ArgError, Command, MoveArgs, Response, MAX_MESSAGE_LEN};
use heapless::String;

use super::status::status_report;
use crate::motion::RunCommand;
use crate::queue::{QueueFull, Slot, IDLE_SLOT};
use crate::state::Machine;

/// Reply text; always fits in one transport response
pub type ReplyText = String<MAX_MESSAGE_LEN>;

/// Outcome of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text to serve on the next read
    pub text: ReplyText,
    /// Address to persist and switch to once the transaction is over
    pub new_address: Option<BusAddress>,
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        let mut text = ReplyText::new();
        // Fixed responses are far shorter than a message
        let _ = text.push_str(response.as_str());
        Self {
            text,
            new_address: None,
        }
    }
}

impl From<QueueFull> for Response {
    fn from(_: QueueFull) -> Self {
        Response::BufferFull
    }
}

/// Execute a raw message
pub fn dispatch_message(machine: &mut Machine, message: &[u8]) -> Reply {
    dispatch(machine, Command::from_bytes(message))
}

/// Execute a parsed command
pub fn dispatch(machine: &mut Machine, command: Command<'_>) -> Reply {
    match command {
        Command::Version => Response::Version.into(),
        Command::SetAddress(value) => match value.and_then(BusAddress::from_u16) {
            Some(address) => Reply {
                text: ReplyText::new(),
                new_address: Some(address),
            },
            None => Response::Invalid.into(),
        },
        Command::Status => Reply {
            text: status_report(machine),
            new_address: None,
        },
        Command::Run(args) => run(machine, args).into(),
        Command::Move(args) => move_override(machine, args).into(),
        Command::Pause => {
            machine.motion_mut().pause();
            Response::Ok.into()
        }
        Command::Resume => {
            machine.motion_mut().resume();
            Response::Ok.into()
        }
        Command::Reset => {
            machine.reset();
            Response::Ok.into()
        }
        Command::Unknown => Response::Invalid.into(),
    }
}

fn run(machine: &mut Machine, args: MoveArgs<'_>) -> Response {
    if machine.queue().is_full() {
        return Response::BufferFull;
    }

    let slot = match stage_slot(args) {
        Ok(slot) => slot,
        Err(e) => return e.into(),
    };

    match machine.queue_mut().enqueue(slot) {
        Ok(()) => Response::Ok,
        Err(e) => e.into(),
    }
}

/// Collect every group into a fresh slot; later groups for an axis win
fn stage_slot(args: MoveArgs<'_>) -> Result<Slot, ArgError> {
    let mut slot = IDLE_SLOT;
    let mut any = false;
    for group in args {
        let m = group?;
        slot[m.axis.index()] = RunCommand::from(m);
        any = true;
    }
    if any {
        Ok(slot)
    } else {
        Err(ArgError::InvalidDeviceId)
    }
}

fn move_override(machine: &mut Machine, mut args: MoveArgs<'_>) -> Response {
    let staged = args
        .next()
        .unwrap_or(Err(ArgError::InvalidDeviceId));

    let motion = machine.motion_mut();
    match staged {
        Ok(m) => {
            motion.set_override(m.axis, RunCommand::from(m));
            Response::Ok
        }
        Err(e) => {
            motion.clear_override();
            e.into()
        }
    }
}
