//! Command dispatcher
//!
//! Turns one received command line into changes to the [`Machine`] and a
//! reply for the bus master.
//!
//! [`Machine`]: crate::state::Machine

pub mod dispatcher;
pub mod status;

pub use dispatcher::{dispatch, dispatch_message, Reply, ReplyText};
pub use status::status_report;
