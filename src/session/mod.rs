//! Client-side browsing session.
//!
//! [`Session`] holds the state of one browsing or search context and moves
//! between states through plain methods. [`SessionController`] feeds it UI
//! events, debounced search input and fetch completions from a
//! [`MediaSource`], and publishes a [`SessionView`] after every step.
//!
//! ```ignore
//! let controller = SessionController::new(RelayClient::new(url)?, SEARCH_DEBOUNCE);
//! let mut view = controller.subscribe();
//! let (events, rx) = tokio::sync::mpsc::channel(32);
//! tokio::spawn(controller.run(rx));
//! events.send(UiEvent::Input("cats".into())).await?;
//! ```

pub mod controller;
pub mod debounce;
pub mod source;
pub mod state;

pub use controller::{SessionController, SessionView, UiEvent};
pub use debounce::{Debouncer, Settled};
pub use source::{ClientError, MediaSource, RelayClient};
pub use state::{Applied, Mode, PageRequest, Selection, Session};
