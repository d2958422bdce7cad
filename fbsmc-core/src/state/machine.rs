//! The state container

use crate::motion::MotionState;
use crate::queue::CommandQueue;

/// Operating mode as shown by `status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// An override move is installed
    Move,
    /// Queued motion may run
    Run,
    /// Queued motion is held by the pause flag
    Paused,
}

impl Mode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Mode::Move => "MOVE",
            Mode::Run => "RUN",
            Mode::Paused => "PAUSED",
        }
    }
}

/// Queue plus motion flags
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Machine {
    queue: CommandQueue,
    motion: MotionState,
}

impl Machine {
    pub const fn new() -> Self {
        Self {
            queue: CommandQueue::new(),
            motion: MotionState::new(),
        }
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut CommandQueue {
        &mut self.queue
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionState {
        &mut self.motion
    }

    /// Borrow both halves at once
    pub fn split_mut(&mut self) -> (&mut CommandQueue, &mut MotionState) {
        (&mut self.queue, &mut self.motion)
    }

    pub fn mode(&self) -> Mode {
        if self.motion.override_axis().is_some() {
            Mode::Move
        } else if self.motion.is_paused() {
            Mode::Paused
        } else {
            Mode::Run
        }
    }

    /// Drop all queued and override motion and clear the pause flag
    pub fn reset(&mut self) {
        self.queue.clear();
        self.motion.reset();
    }
}
