use crossterm::event::{self, Event, KeyEvent};
use image::RgbaImage;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::ui::meme::MemeIntent;

/// How often the input thread checks whether the UI loop is still alive.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    /// The terminal changed size; the next draw lays out for it.
    Resize,
    /// Result of a worker command, ready for the widget reducer.
    Widget(MemeIntent),
    /// Image for `generation` finished decoding.
    ImageDecoded {
        generation: u64,
        pixels: Arc<RgbaImage>,
    },
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    /// Starts the terminal input thread.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || loop {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {
                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => event_tx.send(AppEvent::Key(key)),
                        Ok(Event::Paste(text)) => event_tx.send(AppEvent::Paste(text)),
                        Ok(Event::Resize(..)) => event_tx.send(AppEvent::Resize),
                        Ok(_) => Ok(()),
                        Err(err) => {
                            tracing::error!(error = %err, "Terminal read failed");
                            break;
                        }
                    };
                    if forwarded.is_err() {
                        break;
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::error!(error = %err, "Terminal poll failed");
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Next event, or `Timeout` after `timeout` so the caller can redraw.
    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
