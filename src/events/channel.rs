//! Event channel implementation using crossbeam-channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sends events from the library to whoever is listening.
///
/// Cloneable and `Send`, so a front end can move the receiving side to
/// another thread.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Wrap a raw crossbeam sender
    pub fn new(sender: Sender<Event>) -> Self {
        Self { inner: sender }
    }

    /// Send an event.
    ///
    /// If the receiver is gone the event is dropped; progress reporting is
    /// optional and never fails a run.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receives events emitted during a run
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event, or `None` once every sender is dropped
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Next event if one is already queued
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Iterate until every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Creates connected sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Create a new unbounded event channel
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender nobody listens to, for runs without progress reporting
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{LoadEvent, PipelineEvent};
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn events_can_be_sent_across_threads() {
        let (sender, receiver) = EventChannel::new();

        let handle = thread::spawn(move || {
            sender.send(Event::Load(LoadEvent::Skipped {
                path: PathBuf::from("/photos/broken.jpg"),
                reason: "truncated".to_string(),
            }));
        });

        handle.join().unwrap();

        match receiver.recv().unwrap() {
            Event::Load(LoadEvent::Skipped { path, .. }) => {
                assert!(path.ends_with("broken.jpg"));
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn null_sender_does_not_panic() {
        let sender = null_sender();
        sender.send(Event::Pipeline(PipelineEvent::Started));
    }

    #[test]
    fn receiver_ends_when_senders_drop() {
        let (sender, receiver) = EventChannel::new();
        sender.send(Event::Pipeline(PipelineEvent::Started));
        drop(sender);

        assert_eq!(receiver.iter().count(), 1);
        assert!(receiver.try_recv().is_none());
    }
}
