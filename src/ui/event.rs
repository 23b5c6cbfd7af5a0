use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

/// `timeout` 동안 이벤트를 기다린다. 이벤트가 없으면 `None`.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}
