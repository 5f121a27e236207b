//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** — application state, keyboard event loop, widget focus,
//!   worker-thread channel, flash and toast timing
//! - **[`results`]** — the result list model: a fixed header plus
//!   collapsible rows, newest first
//! - **[`panes`]** — stateless render functions for each widget (pack
//!   selector, expression field, result list, status bar, toast)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`PackClient`] and call [`App::run`] to start the event loop.
//!
//! [`PackClient`]: crate::client::PackClient
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod results;
pub mod theme;

pub use app::App;
