//! Wire types shared by the client and the UI.
//!
//! The eval endpoint reports exactly one of three things per response:
//! a result value, a compile error, or a runtime error.  Rather than
//! checking optional fields at every call site, responses decode into the
//! tagged [`EvalOutcome`], with [`EvalOutcome::TransportError`] covering
//! the network and decode failures the endpoint itself cannot report.

pub mod outcome;
pub mod pack;

pub use outcome::{EvalOutcome, EvalRequest, EvalResponse};
pub use pack::{sort_packs, Pack};
