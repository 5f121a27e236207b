//! # Introduction
//!
//! Rolldeck is a terminal client for table-pack expression evaluation
//! servers.  It fetches the list of available packs, lets the user pick one
//! and type an expression, submits the pair to the server's eval endpoint,
//! and collects each outcome as a collapsible row in a result list built
//! with [ratatui](https://docs.rs/ratatui).
//!
//! ## Request pipeline
//!
//! ```text
//! Keyboard → Form → Validator → PackClient (worker thread) → Outcome → Row
//! ```
//!
//! 1. [`model`] — the wire types: packs, eval requests, and the tagged
//!    [`model::EvalOutcome`] every response decodes into.
//! 2. [`form`] — submission validation and expression normalization
//!    (expressions are wrapped in braces unless already delimited).
//! 3. [`client`] — blocking HTTP client for the `pack` and `eval`
//!    endpoints, session cookie included.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! Evaluations run on worker threads and report back over a channel, so the
//! UI never blocks on the network.  Requests in flight are not cancelled;
//! their rows land in arrival order.

pub mod client;
pub mod form;
pub mod model;
pub mod ui;
