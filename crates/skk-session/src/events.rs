//! Multi-subscriber output streams.
//!
//! Each subscriber gets its own `mpsc` channel. Sending never blocks the
//! state machine; subscribers whose receiver was dropped are forgotten on
//! the next send.

use std::sync::mpsc;

pub(crate) struct EventStream<T> {
    senders: Vec<mpsc::Sender<T>>,
    /// Last value sent, kept only for streams that drop repeats.
    last: Option<T>,
    dedup: bool,
}

impl<T: Clone + PartialEq> EventStream<T> {
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
            last: None,
            dedup: false,
        }
    }

    /// A stream that suppresses a value equal to the previous one.
    pub fn deduplicated() -> Self {
        Self {
            dedup: true,
            ..Self::new()
        }
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<T> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    pub fn send(&mut self, value: T) {
        if self.dedup {
            if self.last.as_ref() == Some(&value) {
                return;
            }
            self.last = Some(value.clone());
        }
        self.senders.retain(|tx| tx.send(value.clone()).is_ok());
    }
}
