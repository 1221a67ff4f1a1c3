use std::sync::mpsc::{self, Receiver, TryRecvError};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize)
pub trait EventSource: Send + 'static {
    /// Block until the next event. `None` once the source has shut down.
    fn next_event(&self) -> Option<GameEvent>;

    /// An event that is already queued, without waiting
    fn queued_event(&self) -> Option<GameEvent>;
}

fn queued(rx: &Receiver<GameEvent>) -> Option<GameEvent> {
    match rx.try_recv() {
        Ok(ev) => Some(ev),
        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
    }
}

/// Production event source: a reader thread forwarding crossterm events
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // windows reports releases too
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => GameEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => GameEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    log::error!("terminal input closed: {}", e);
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn next_event(&self) -> Option<GameEvent> {
        self.rx.recv().ok()
    }

    fn queued_event(&self) -> Option<GameEvent> {
        queued(&self.rx)
    }
}

/// Channel-fed event source for headless tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn next_event(&self) -> Option<GameEvent> {
        self.rx.recv().ok()
    }

    fn queued_event(&self) -> Option<GameEvent> {
        queued(&self.rx)
    }
}

/// Pulls input in batches so a burst of keys costs one redraw
pub struct Runner<E: EventSource> {
    event_source: E,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Waits for input, then takes everything else already queued.
    /// `None` when the source is gone and the app should stop.
    pub fn next_batch(&self) -> Option<Vec<GameEvent>> {
        let first = self.event_source.next_event()?;
        let mut batch = vec![first];
        while let Some(ev) = self.event_source.queued_event() {
            batch.push(ev);
        }
        Some(batch)
    }

    /// Queued events only; never blocks
    pub fn pending(&self) -> Vec<GameEvent> {
        std::iter::from_fn(|| self.event_source.queued_event()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> GameEvent {
        GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn batch_collects_everything_queued() {
        let (tx, rx) = mpsc::channel();
        tx.send(key(KeyCode::Right)).unwrap();
        tx.send(GameEvent::Resize).unwrap();
        tx.send(key(KeyCode::Enter)).unwrap();
        let runner = Runner::new(TestEventSource::new(rx));

        let batch = runner.next_batch().unwrap();
        assert_eq!(batch.len(), 3);
        match &batch[2] {
            GameEvent::Key(k) => assert_eq!(k.code, KeyCode::Enter),
            other => panic!("expected key event, got {:?}", other),
        }
        assert!(runner.pending().is_empty());
    }

    #[test]
    fn batch_waits_for_a_late_event() {
        let (tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx));
        let sender = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(20));
            tx.send(key(KeyCode::Char(' '))).unwrap();
        });

        let batch = runner.next_batch().unwrap();
        assert_eq!(batch.len(), 1);
        sender.join().unwrap();
    }

    #[test]
    fn closed_source_ends_the_loop() {
        let (tx, rx) = mpsc::channel::<GameEvent>();
        tx.send(GameEvent::Resize).unwrap();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));
        assert_eq!(runner.next_batch().map(|b| b.len()), Some(1));
        assert!(runner.next_batch().is_none());
    }

    #[test]
    fn pending_does_not_block_on_an_empty_source() {
        let (_tx, rx) = mpsc::channel::<GameEvent>();
        let runner = Runner::new(TestEventSource::new(rx));
        assert!(runner.pending().is_empty());
    }
}
