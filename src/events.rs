//! Interrupt-driven event system.
//!
//! Events are produced by:
//! - the UART RX path (probe bytes waiting)
//! - timer callbacks (control tick, data-log tick)
//! - the keypad scanner
//!
//! and consumed by the main loop, which drains them in FIFO order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ UART RX     │────▶│              │     │              │
//! │ Timer       │────▶│  EventQueue  │────▶│  Main Loop   │
//! │ Keypad      │────▶│  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of slots; one is always left empty.
const EVENT_QUEUE_CAP: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Bytes are waiting on the probe UART.
    ProbeDataAvailable,
    /// Control loop tick.
    ControlTick,
    /// Data-log timer fired.
    DataLogTick,
    /// Raw keypad character (`0-9`, `*`, `#`, `A-D`).
    KeyPressed(char),
}

impl Event {
    fn encode(self) -> Option<u8> {
        match self {
            Self::ProbeDataAvailable => Some(1),
            Self::ControlTick => Some(2),
            Self::DataLogTick => Some(3),
            // Keypad characters are printable ASCII, well clear of 1..=3.
            Self::KeyPressed(c) if c.is_ascii_graphic() => Some(c as u8),
            Self::KeyPressed(_) => None,
        }
    }

    fn decode(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::ProbeDataAvailable),
            2 => Some(Self::ControlTick),
            3 => Some(Self::DataLogTick),
            c if c.is_ascii_graphic() => Some(Self::KeyPressed(char::from(c))),
            _ => None,
        }
    }
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// One producer (ISR / timer task), one consumer (main loop).  Slots are
// atomics so the buffer needs no `static mut`.

pub struct EventQueue {
    head: AtomicU8,
    tail: AtomicU8,
    slots: [AtomicU8; EVENT_QUEUE_CAP],
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
            slots: [const { AtomicU8::new(0) }; EVENT_QUEUE_CAP],
        }
    }

    /// Push an event.  Safe from ISR context.
    /// Returns `false` if the queue is full or the event cannot be encoded.
    pub fn push(&self, event: Event) -> bool {
        let Some(raw) = event.encode() else {
            return false;
        };
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

        if next_head == tail {
            return false; // Full, drop.
        }

        self.slots[head as usize].store(raw, Ordering::Relaxed);
        self.head.store(next_head, Ordering::Release);
        true
    }

    /// Pop the oldest event.  Single consumer only.
    pub fn pop(&self) -> Option<Event> {
        loop {
            let tail = self.tail.load(Ordering::Relaxed);
            let head = self.head.load(Ordering::Acquire);
            if tail == head {
                return None;
            }
            let raw = self.slots[tail as usize].load(Ordering::Relaxed);
            self.tail
                .store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);
            if let Some(event) = Event::decode(raw) {
                return Some(event);
            }
        }
    }

    /// Drain all pending events into a callback, FIFO.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tail.load(Ordering::Relaxed) == self.head.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed) as usize;
        let tail = self.tail.load(Ordering::Relaxed) as usize;
        (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide queue shared by the ISRs and the main loop.
pub static EVENTS: EventQueue = EventQueue::new();

/// Push onto [`EVENTS`].
pub fn push_event(event: Event) -> bool {
    EVENTS.push(event)
}

/// Drain [`EVENTS`].
pub fn drain_events(handler: impl FnMut(Event)) {
    EVENTS.drain(handler);
}
