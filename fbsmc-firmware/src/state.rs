//! Shared machine state
//!
//! The tick task and the bus task both mutate the one [`Machine`]. Each
//! holds the lock for its whole handler, so a tick never sees a command
//! half applied.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use fbsmc_core::state::Machine;

pub static MACHINE: Mutex<CriticalSectionRawMutex, RefCell<Machine>> =
    Mutex::new(RefCell::new(Machine::new()));

/// Run `f` with exclusive access to the machine
pub fn with_machine<R>(f: impl FnOnce(&mut Machine) -> R) -> R {
    MACHINE.lock(|cell| f(&mut cell.borrow_mut()))
}
