//! Capture call-site locations and prune framework noise out of stack traces.
//!
//! The two entry points are [`capture`], which reports where in the source
//! code a function was called from, and [`prune`], which strips a textual
//! stack trace down to the frames that belong to the code under test.
//!
//! Both operations count their own frame as part of the stack. `capture(0)`
//! and `prune(trace, 0)` already skip the frame of the function doing the
//! capturing or pruning, so `skip` only needs to count any *additional*
//! helper frames between that function and the frame of interest.

mod capture;
mod denylist;
mod error;
mod location;
mod prune;
mod trace;

pub use capture::*;
pub use denylist::*;
pub use error::*;
pub use location::*;
pub use prune::*;
pub use trace::*;
