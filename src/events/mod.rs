//! # Events Module
//!
//! Progress reporting that any front end can subscribe to.
//!
//! The library emits events through a channel while it lists, decodes and
//! compares images; the CLI turns them into a progress bar, a GUI could
//! turn them into anything else.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Load(LoadEvent::Skipped { path, .. }) = event {
//!             eprintln!("skipped {}", path.display());
//!         }
//!     }
//! });
//!
//! comparison.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
