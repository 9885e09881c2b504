use std::sync::mpsc;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{self, Event, KeyEvent};
use tracing::debug;

use crate::countdown::Ticker;

/// How long to wait for input once the ticker has been cancelled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Events consumed by the TUI main loop.
pub enum AppEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize,
    /// The countdown ticker is due.
    Tick,
}

/// Polls crossterm events and sends them to the main render loop.
///
/// Runs in a background thread. Key and Resize events are forwarded as they
/// arrive; a Tick is sent whenever the ticker is due. Cancelling the
/// ticker's handle stops ticks while keys keep flowing.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _handle: std::thread::JoinHandle<()>,
}

impl EventHandler {
    /// Start the event polling thread, driven by `ticker`.
    pub fn new(mut ticker: Ticker) -> Self {
        let (tx, rx) = mpsc::channel();
        debug!(period_ms = ticker.period().as_millis() as u64, "starting event thread");

        let handle = std::thread::spawn(move || loop {
            let timeout = ticker.time_until_due(Instant::now()).unwrap_or(IDLE_POLL);

            if event::poll(timeout).unwrap_or(false) {
                let sent = match event::read() {
                    Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                    Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize),
                    _ => Ok(()),
                };
                if sent.is_err() {
                    return;
                }
            }

            if ticker.poll(Instant::now()) && tx.send(AppEvent::Tick).is_err() {
                return;
            }
        });

        Self {
            rx,
            _handle: handle,
        }
    }

    /// Receive the next event, blocking until one is available.
    pub fn next(&self) -> Result<AppEvent, mpsc::RecvError> {
        self.rx.recv()
    }
}
