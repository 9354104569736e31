//! Event plumbing for the TUI.
//!
//! Terminal input is polled on a dedicated thread and forwarded over an
//! mpsc channel. API worker threads send their completions over the same
//! channel, so the main loop consumes exactly one stream of events and
//! stays the only place that touches application state.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tuido_core::ApiEvent;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Periodic tick while the terminal is idle
    Tick,
    /// A finished API round-trip
    Api(ApiEvent),
}

/// Owns the channel and the input-polling thread.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
}

impl EventHandler {
    /// Start the input thread with the given tick rate in milliseconds.
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        match evt {
                            CrosstermEvent::Key(key) => {
                                // Only key presses, not releases.
                                if key.kind == KeyEventKind::Press
                                    && tx_clone.send(Event::Key(key)).is_err()
                                {
                                    break;
                                }
                            }
                            CrosstermEvent::Resize(w, h) => {
                                if tx_clone.send(Event::Resize(w, h)).is_err() {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                } else if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// A sender for API worker threads to post completions through.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    /// Receive the next event (blocking).
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
