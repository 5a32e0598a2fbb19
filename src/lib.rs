//! rssline: a live-updating RSS aggregator for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//!  ┌───────────┐ AppEvent  ┌──────────────────┐ notify ┌─────────┐  draw() ┌────────┐
//!  │ ingest /  │ ────────► │ app.rs           │ ─────► │ view.rs │ ──────► │ ui.rs  │
//!  │ refresh   │ (channel) │  store.rs (state)│        │(Surface)│         │(render)│
//!  │ (tasks)   │ ◄──────── │                  │        └─────────┘         └────────┘
//!  └───────────┘  feed ids └──────────────────┘
//!                                 ▲
//!                                 │ handle_key_event()
//!                            ┌──────────┐
//!                            │ input.rs │
//!                            └──────────┘
//! ```
//!
//! * **`source/`**: the `Fetcher` trait, the HTTP fetcher, proxy URLs and
//!   the RSS parser.
//! * **`store`**: the state tree and path-keyed change notification.
//! * **`view`**: renderers subscribed to state paths, writing the `Surface`.
//! * **`ingest`**: the add-a-feed state machine.
//! * **`refresh`**: the background loop re-fetching every feed.
//! * **`app`**: owns the store, spawns tasks, applies their results.
//! * **`ui`**: pure rendering of the `Surface`.
//! * **`input`**: maps key events to `App` actions.
//! * **`config`**: command-line options.
//!
//! The binary (`main.rs`) wires everything together: parse args, set up
//! logging and the terminal, and run the event loop.

pub mod app;
pub mod config;
pub mod i18n;
pub mod ingest;
pub mod input;
pub mod refresh;
pub mod source;
pub mod store;
pub mod surface;
pub mod ui;
pub mod validate;
pub mod view;
