use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Time to take the next usage sample.
    Sample,
    Resize,
}

/// Interval for usage sampling. The first tick lands one full period after
/// creation, so every reading covers a whole interval.
pub fn sample_ticks(period: Duration) -> Interval {
    let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks
}

/// Merges terminal input and sampling ticks into one channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(sample_period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let task = tokio::spawn(forward_events(tx, sample_period));
        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

async fn forward_events(tx: mpsc::UnboundedSender<Event>, sample_period: Duration) {
    let mut input = EventStream::new();
    let mut ticks = sample_ticks(sample_period);

    loop {
        let event = tokio::select! {
            _ = ticks.tick() => Event::Sample,
            next = input.next() => match next {
                Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                Some(Ok(CrosstermEvent::Resize(_, _))) => Event::Resize,
                Some(Ok(_)) => continue,
                // Input is gone; the receiver sees the channel close
                Some(Err(_)) | None => return,
            },
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_sample_tick_waits_a_full_period() {
        let period = Duration::from_millis(30);
        let start = Instant::now();
        let mut ticks = sample_ticks(period);
        ticks.tick().await;
        assert!(start.elapsed() >= period);
    }
}
