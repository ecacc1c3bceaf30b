//! Bounded blocking FIFO used as a stage's inbox.
//!
//! Built from a mutex-guarded circular buffer and three [`Monitor`]s:
//! `not_full` gates producers, `not_empty` gates consumers, and `finished`
//! carries the stage-completion handshake to the orchestrator. The monitors
//! are wake *hints* only; the loop conditions under the queue lock are the
//! source of truth, which is what makes the single-wake/sticky monitor
//! behavior safe here.

use bytes::Bytes;
use parking_lot::Mutex;

use crate::error::PipelineError;
use crate::sync::Monitor;

struct Ring {
    slots: Box<[Option<Bytes>]>,
    head: usize,
    tail: usize,
    count: usize,
}

/// Fixed-capacity producer/consumer queue of owned byte strings.
pub struct WorkQueue {
    ring: Mutex<Ring>,
    capacity: usize,
    not_full: Monitor,
    not_empty: Monitor,
    finished: Monitor,
}

impl WorkQueue {
    /// Creates a queue holding at most `capacity` items.
    ///
    /// `not_full` starts signaled: an empty queue can always accept work.
    pub fn with_capacity(capacity: usize) -> Result<Self, PipelineError> {
        if capacity == 0 {
            return Err(PipelineError::InvalidCapacity);
        }

        let queue = Self {
            ring: Mutex::new(Ring {
                slots: (0..capacity).map(|_| None).collect(),
                head: 0,
                tail: 0,
                count: 0,
            }),
            capacity,
            not_full: Monitor::new(),
            not_empty: Monitor::new(),
            finished: Monitor::new(),
        };
        queue.not_full.signal();
        Ok(queue)
    }

    /// Maximum number of items the queue can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently queued.
    pub fn len(&self) -> usize {
        self.ring.lock().count
    }

    /// True when no items are queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enqueues `item`, blocking while the queue is full.
    ///
    /// Ownership of the item transfers to the queue. Back-pressure is the
    /// only flow control: the call parks on `not_full` until a consumer
    /// makes room, rechecking `count` after every wakeup.
    pub fn put(&self, item: Bytes) {
        let mut ring = self.ring.lock();
        while ring.count >= self.capacity {
            // Release the queue lock so consumers can drain, then recheck:
            // the monitor wake is only a hint.
            drop(ring);
            self.not_full.wait();
            ring = self.ring.lock();
        }

        let tail = ring.tail;
        ring.slots[tail] = Some(item);
        ring.tail = (ring.tail + 1) % self.capacity;
        ring.count += 1;

        self.not_empty.signal();
        if ring.count >= self.capacity {
            self.not_full.reset();
        }
    }

    /// Dequeues the oldest item, blocking while the queue is empty.
    ///
    /// Ownership of the returned item transfers to the caller.
    pub fn get(&self) -> Bytes {
        let mut ring = self.ring.lock();
        while ring.count == 0 {
            drop(ring);
            self.not_empty.wait();
            ring = self.ring.lock();
        }

        let head = ring.head;
        let item = ring.slots[head]
            .take()
            .unwrap_or_else(|| unreachable!("count > 0 implies a live slot at head"));
        ring.head = (ring.head + 1) % self.capacity;
        ring.count -= 1;

        self.not_full.signal();
        if ring.count == 0 {
            self.not_empty.reset();
        }

        item
    }

    /// Marks the owning stage as finished.
    ///
    /// Wakes at most one thread parked in [`wait_finished`]; the shutdown
    /// protocol calls this exactly once per stage, matched by exactly one
    /// orchestrator waiter.
    ///
    /// [`wait_finished`]: WorkQueue::wait_finished
    pub fn signal_finished(&self) {
        self.finished.signal();
    }

    /// Blocks until [`signal_finished`] has been called.
    ///
    /// [`signal_finished`]: WorkQueue::signal_finished
    pub fn wait_finished(&self) {
        self.finished.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn item(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(matches!(
            WorkQueue::with_capacity(0),
            Err(PipelineError::InvalidCapacity)
        ));
    }

    #[test]
    fn maintains_fifo_order() {
        let queue = WorkQueue::with_capacity(4).unwrap();
        queue.put(item("a"));
        queue.put(item("b"));
        queue.put(item("c"));
        assert_eq!(queue.get(), item("a"));
        assert_eq!(queue.get(), item("b"));
        assert_eq!(queue.get(), item("c"));
        assert!(queue.is_empty());
    }

    #[test]
    fn wraps_around_the_ring() {
        let queue = WorkQueue::with_capacity(2).unwrap();
        for cycle in 0..3 {
            queue.put(item(&format!("x{cycle}")));
            queue.put(item(&format!("y{cycle}")));
            assert_eq!(queue.len(), 2);
            assert_eq!(queue.get(), item(&format!("x{cycle}")));
            assert_eq!(queue.get(), item(&format!("y{cycle}")));
        }
    }

    #[test]
    fn put_blocks_until_a_get_makes_room() {
        let queue = Arc::new(WorkQueue::with_capacity(1).unwrap());
        queue.put(item("first"));

        let second_landed = Arc::new(AtomicBool::new(false));
        let producer = {
            let queue = Arc::clone(&queue);
            let second_landed = Arc::clone(&second_landed);
            thread::spawn(move || {
                queue.put(item("second"));
                second_landed.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!second_landed.load(Ordering::SeqCst));

        assert_eq!(queue.get(), item("first"));
        producer.join().unwrap();
        assert!(second_landed.load(Ordering::SeqCst));
        assert_eq!(queue.get(), item("second"));
    }

    #[test]
    fn get_blocks_until_a_put_arrives() {
        let queue = Arc::new(WorkQueue::with_capacity(1).unwrap());

        let got = Arc::new(AtomicBool::new(false));
        let consumer = {
            let queue = Arc::clone(&queue);
            let got = Arc::clone(&got);
            thread::spawn(move || {
                assert_eq!(queue.get(), item("late"));
                got.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!got.load(Ordering::SeqCst));

        queue.put(item("late"));
        consumer.join().unwrap();
        assert!(got.load(Ordering::SeqCst));
    }

    #[test]
    fn drop_releases_queued_items_exactly_once() {
        // Bytes tracks shared ownership; after the queue drops its copies,
        // the handles held here must be the sole owners again.
        let queue = WorkQueue::with_capacity(4).unwrap();
        let a = item("still-queued-a");
        let b = item("still-queued-b");
        queue.put(a.clone());
        queue.put(b.clone());
        drop(queue);
        assert_eq!(a.try_into_mut().ok().map(|m| m.len()), Some(14));
        assert_eq!(b.try_into_mut().ok().map(|m| m.len()), Some(14));
    }

    #[test]
    fn finished_handshake_unblocks_one_waiter() {
        let queue = Arc::new(WorkQueue::with_capacity(1).unwrap());
        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.wait_finished())
        };
        thread::sleep(Duration::from_millis(50));
        queue.signal_finished();
        waiter.join().unwrap();
    }

    #[test]
    fn survives_concurrent_producers_and_consumers() {
        const TOTAL: usize = 10_000;
        const PRODUCERS: usize = 2;
        const CONSUMERS: usize = 2;

        for capacity in 1..=4 {
            let queue = Arc::new(WorkQueue::with_capacity(capacity).unwrap());

            let producers: Vec<_> = (0..PRODUCERS)
                .map(|p| {
                    let queue = Arc::clone(&queue);
                    thread::spawn(move || {
                        for i in 0..TOTAL / PRODUCERS {
                            queue.put(item(&format!("{p}:{i}")));
                        }
                    })
                })
                .collect();

            let consumers: Vec<_> = (0..CONSUMERS)
                .map(|_| {
                    let queue = Arc::clone(&queue);
                    thread::spawn(move || {
                        (0..TOTAL / CONSUMERS)
                            .map(|_| queue.get())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for producer in producers {
                producer.join().unwrap();
            }
            let mut received: Vec<Bytes> = consumers
                .into_iter()
                .flat_map(|c| c.join().unwrap())
                .collect();

            // No loss, no duplication: the received multiset must match
            // exactly what the producers sent.
            assert_eq!(received.len(), TOTAL);
            received.sort();
            let mut expected: Vec<Bytes> = (0..PRODUCERS)
                .flat_map(|p| (0..TOTAL / PRODUCERS).map(move |i| item(&format!("{p}:{i}"))))
                .collect();
            expected.sort();
            assert_eq!(received, expected);
            assert!(queue.is_empty());
        }
    }

    proptest! {
        #[test]
        fn preserves_insertion_order(payloads in prop::collection::vec(".{0,16}", 0..32)) {
            let queue = WorkQueue::with_capacity(32).unwrap();
            for payload in &payloads {
                queue.put(Bytes::copy_from_slice(payload.as_bytes()));
            }
            for payload in &payloads {
                prop_assert_eq!(queue.get(), Bytes::copy_from_slice(payload.as_bytes()));
            }
            prop_assert!(queue.is_empty());
        }
    }
}
