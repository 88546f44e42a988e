use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, Interval};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Merges crossterm's async event stream with a periodic tick.
pub struct EventHandler {
    stream: EventStream,
    ticker: Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            stream: EventStream::new(),
            ticker: interval(tick_rate),
        }
    }

    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                maybe_event = self.stream.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => {
                            // Windows terminals emit Release events too
                            if key.kind == KeyEventKind::Press {
                                return Some(Event::Key(key));
                            }
                        }
                        Some(Ok(CrosstermEvent::Resize(_, _))) => return Some(Event::Resize),
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => return None,
                    }
                }
                _ = self.ticker.tick() => return Some(Event::Tick),
            }
        }
    }
}
