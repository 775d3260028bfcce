//! Passing of accepted edges from interrupts to the control loop.
//!
//! Edges are accepted in the context of the interrupt bound to the sensor
//! line, while the display is refreshed from a slower loop. Each channel gets
//! its own single-producer single-consumer queue, so both interrupts can post
//! without sharing anything. The order of changes of a single channel is
//! preserved. There is no ordering promised between channels.

use heapless::spsc::{Consumer, Producer, Queue};

use crate::channel::Channel;
use crate::log;

/// Notification about an accepted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepChanged {
    pub channel: Channel,
    /// Progress in percent, one of 0, 20, 40, 60, 80 or 100.
    pub step: u8,
    /// Raw count of accepted edges.
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PostError {
    /// The consumer did not keep up. The change is handed back.
    Full(StepChanged),
    /// The change belongs to a channel this outbox does not serve.
    WrongChannel(StepChanged),
}

/// Storage of pending changes of both channels.
///
/// Each channel can hold up to `N - 1` pending changes.
pub struct Mailbox<const N: usize> {
    queues: [Queue<StepChanged, N>; 2],
}

/// Sending side of a single channel, meant to be owned by its interrupt.
pub struct Outbox<'a, const N: usize> {
    channel: Channel,
    producer: Producer<'a, StepChanged, N>,
}

/// Receiving side of both channels, meant to be owned by the control loop.
pub struct Inbox<'a, const N: usize> {
    consumers: [Consumer<'a, StepChanged, N>; 2],
    next: usize,
}

impl<const N: usize> Mailbox<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queues: [Queue::new(), Queue::new()],
        }
    }

    /// Returns outboxes of channels A and B, and the shared inbox.
    pub fn split(&mut self) -> (Outbox<'_, N>, Outbox<'_, N>, Inbox<'_, N>) {
        let [queue_a, queue_b] = &mut self.queues;
        let (producer_a, consumer_a) = queue_a.split();
        let (producer_b, consumer_b) = queue_b.split();
        (
            Outbox {
                channel: Channel::A,
                producer: producer_a,
            },
            Outbox {
                channel: Channel::B,
                producer: producer_b,
            },
            Inbox {
                consumers: [consumer_a, consumer_b],
                next: 0,
            },
        )
    }
}

impl<const N: usize> Default for Mailbox<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> Outbox<'a, N> {
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Enqueue the change without blocking.
    ///
    /// # Errors
    ///
    /// Fails with `PostError::Full` when the queue of the channel is full,
    /// and with `PostError::WrongChannel` when the change belongs to the
    /// other channel. In both cases the change is handed back.
    pub fn post(&mut self, change: StepChanged) -> Result<(), PostError> {
        if change.channel != self.channel {
            return Err(PostError::WrongChannel(change));
        }
        self.producer.enqueue(change).map_err(|change| {
            log::debug!("Outbox of channel {} is full", change.channel);
            PostError::Full(change)
        })
    }
}

impl<'a, const N: usize> Inbox<'a, N> {
    /// Dequeue the next pending change without blocking.
    ///
    /// Channels take turns, so a busy channel cannot starve the other one.
    pub fn receive(&mut self) -> Option<StepChanged> {
        for _ in 0..self.consumers.len() {
            let i = self.next;
            self.next = (self.next + 1) % self.consumers.len();
            if let Some(change) = self.consumers[i].dequeue() {
                return Some(change);
            }
        }
        None
    }

    /// Drop all pending changes.
    pub fn discard(&mut self) {
        while self.receive().is_some() {}
    }
}
