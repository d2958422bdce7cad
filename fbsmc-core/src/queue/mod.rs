//! Per-axis command queue
//!
//! Four parallel ring buffers, one per axis, addressed by a single shared
//! `head`/`tail` pair. The four commands at one index form a *slot*. A slot
//! acts as a barrier: `head` only moves on once every axis in the slot has
//! finished, so axes started together stay in lockstep across slots.
//!
//! ```text
//!        head              tail
//!         v                 v
//!   A: [ 40 | 12 |  0 | 80 |  0 | ... ]
//!   B: [  0 | 12 | 30 |  0 |  0 | ... ]
//!   C: [ 10 |  0 |  0 |  0 |  0 | ... ]
//!   D: [  0 |  0 |  5 |  0 |  0 | ... ]
//! ```

use fbsmc_protocol::AXIS_COUNT;

use crate::motion::RunCommand;

/// Number of slots in the ring
pub const QUEUE_CAPACITY: usize = 10;

/// One command per axis at the same ring index
pub type Slot = [RunCommand; AXIS_COUNT];

/// A slot with every axis idle
pub const IDLE_SLOT: Slot = [RunCommand::IDLE; AXIS_COUNT];

/// Returned when `enqueue` finds no free slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

/// Fixed-capacity ring of slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandQueue {
    slots: [Slot; QUEUE_CAPACITY],
    head: usize,
    tail: usize,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

const fn next(index: usize) -> usize {
    (index + 1) % QUEUE_CAPACITY
}

impl CommandQueue {
    pub const fn new() -> Self {
        Self {
            slots: [IDLE_SLOT; QUEUE_CAPACITY],
            head: 0,
            tail: 0,
        }
    }

    /// Index of the slot currently being executed
    pub fn head(&self) -> usize {
        self.head
    }

    /// Index the next enqueue writes to
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Slot at `index` (taken modulo the capacity)
    pub fn slot(&self, index: usize) -> &Slot {
        &self.slots[index % QUEUE_CAPACITY]
    }

    /// Check if any axis in the slot still has steps to do
    pub fn is_live(&self, index: usize) -> bool {
        self.slot(index).iter().any(RunCommand::is_active)
    }

    /// Check if every axis in the slot has finished
    pub fn slot_ready_to_advance(&self, index: usize) -> bool {
        !self.is_live(index)
    }

    pub fn is_full(&self) -> bool {
        self.tail == self.head && self.is_live(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    /// Append a slot at `tail`
    ///
    /// An idle head with nothing queued behind it is first moved up to
    /// `tail`, so a head left stalled by the scheduler can never be lapped.
    pub fn enqueue(&mut self, slot: Slot) -> Result<(), QueueFull> {
        if self.is_full() {
            return Err(QueueFull);
        }

        if !self.is_live(self.head) && next(self.head) == self.tail {
            self.head = self.tail;
        }

        self.slots[self.tail] = slot;
        self.tail = next(self.tail);
        Ok(())
    }

    /// Number of slots waiting or running
    pub fn occupancy(&self) -> usize {
        let diff = (self.tail + QUEUE_CAPACITY - self.head) % QUEUE_CAPACITY;
        let head_live = self.is_live(self.head);
        match diff {
            0 if head_live => QUEUE_CAPACITY,
            0 => 0,
            1 if !head_live => 0,
            n => n,
        }
    }

    /// Mutable access to the head slot for the scheduler
    pub fn head_slot_mut(&mut self) -> &mut Slot {
        &mut self.slots[self.head]
    }

    /// Retire a finished head slot
    ///
    /// Clears the slot and moves `head` on only if the next slot is live;
    /// otherwise `head` stays put as a stalled marker. Returns `true` if
    /// `head` moved.
    pub fn retire_head(&mut self) -> bool {
        self.slots[self.head] = IDLE_SLOT;
        if self.is_live(next(self.head)) {
            self.head = next(self.head);
            true
        } else {
            false
        }
    }

    /// Zero every slot and rewind both cursors
    pub fn clear(&mut self) {
        self.slots = [IDLE_SLOT; QUEUE_CAPACITY];
        self.head = 0;
        self.tail = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbsmc_protocol::Direction;
    use proptest::prelude::*;

    fn slot_with(steps: u32) -> Slot {
        let mut slot = IDLE_SLOT;
        slot[0] = RunCommand::new(Direction::Forward, steps, 1);
        slot
    }

    fn finish_head(queue: &mut CommandQueue) {
        *queue.head_slot_mut() = IDLE_SLOT;
        queue.retire_head();
    }

    #[test]
    fn test_new_queue_is_empty() {
        let queue = CommandQueue::new();
        assert_eq!(queue.occupancy(), 0);
        assert!(!queue.is_full());
        assert!(queue.slot_ready_to_advance(0));
    }

    #[test]
    fn test_accepts_exactly_capacity() {
        let mut queue = CommandQueue::new();
        for i in 0..QUEUE_CAPACITY {
            assert_eq!(queue.enqueue(slot_with(i as u32 + 1)), Ok(()));
            assert_eq!(queue.occupancy(), i + 1);
        }
        assert!(queue.is_full());
        assert_eq!(queue.enqueue(slot_with(99)), Err(QueueFull));
        assert_eq!(queue.occupancy(), QUEUE_CAPACITY);
    }

    #[test]
    fn test_rejected_enqueue_writes_nothing() {
        let mut queue = CommandQueue::new();
        for _ in 0..QUEUE_CAPACITY {
            queue.enqueue(slot_with(7)).unwrap();
        }
        let before = queue.clone();
        assert!(queue.enqueue(slot_with(1)).is_err());
        assert_eq!(queue, before);
    }

    #[test]
    fn test_retire_stalls_on_idle_next() {
        let mut queue = CommandQueue::new();
        queue.enqueue(slot_with(1)).unwrap();
        finish_head(&mut queue);

        // Head stays behind tail, queue reads empty
        assert_eq!(queue.head(), 0);
        assert_eq!(queue.tail(), 1);
        assert_eq!(queue.occupancy(), 0);
    }

    #[test]
    fn test_stalled_head_collapses() {
        let mut queue = CommandQueue::new();
        queue.enqueue(slot_with(1)).unwrap();
        finish_head(&mut queue);

        queue.enqueue(slot_with(2)).unwrap();
        assert_eq!(queue.head(), 1);
        assert_eq!(queue.slot(queue.head())[0].steps, 2);

        // Still exactly N live slots before full
        for _ in 1..QUEUE_CAPACITY {
            queue.enqueue(slot_with(3)).unwrap();
        }
        assert!(queue.is_full());
        assert_eq!(queue.occupancy(), QUEUE_CAPACITY);
        assert_eq!(queue.slot(queue.head())[0].steps, 2);
    }

    #[test]
    fn test_retire_moves_to_live_next() {
        let mut queue = CommandQueue::new();
        queue.enqueue(slot_with(1)).unwrap();
        queue.enqueue(slot_with(2)).unwrap();
        *queue.head_slot_mut() = IDLE_SLOT;
        assert!(queue.retire_head());
        assert_eq!(queue.head(), 1);
        assert_eq!(queue.occupancy(), 1);
    }

    #[test]
    fn test_clear() {
        let mut queue = CommandQueue::new();
        for _ in 0..4 {
            queue.enqueue(slot_with(5)).unwrap();
        }
        queue.clear();
        assert_eq!(queue, CommandQueue::new());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Enqueue,
        Finish,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Enqueue), Just(Op::Finish)]
    }

    proptest! {
        #[test]
        fn queue_matches_fifo_model(ops in prop::collection::vec(op(), 0..200)) {
            let mut queue = CommandQueue::new();
            let mut model = std::collections::VecDeque::new();
            let mut next_id = 1u32;

            for op in ops {
                match op {
                    Op::Enqueue => {
                        let full = queue.is_full();
                        let result = queue.enqueue(slot_with(next_id));
                        prop_assert_eq!(result.is_err(), full);
                        prop_assert_eq!(full, model.len() == QUEUE_CAPACITY);
                        if result.is_ok() {
                            model.push_back(next_id);
                            next_id += 1;
                        }
                    }
                    Op::Finish => {
                        if queue.is_live(queue.head()) {
                            let front = model.pop_front();
                            prop_assert_eq!(Some(queue.slot(queue.head())[0].steps), front);
                            finish_head(&mut queue);
                        } else {
                            prop_assert!(model.is_empty());
                        }
                    }
                }
                prop_assert!(queue.occupancy() <= QUEUE_CAPACITY);
                prop_assert_eq!(queue.occupancy(), model.len());
            }
        }
    }
}
