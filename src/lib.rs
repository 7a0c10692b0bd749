//! Output-sensitive interval stabbing over a bounded integer domain.
//!
//! An [`IntervalStabber`] indexes a fixed set of closed intervals over `u16`
//! coordinates and answers "which intervals contain the point `q`?" in time
//! proportional to the number of matches, rather than the number of
//! intervals indexed.
//!
//! ```
//! use intstab::{Interval, IntervalStabber};
//!
//! let t = IntervalStabber::new([
//!     Interval::new(4, 15, "First"),
//!     Interval::new(50, 72, "Second"),
//!     Interval::new(34, 90, "Third"),
//!     Interval::new(34, 45, "Fourth"),
//!     Interval::new(34, 45, "Fifth"),
//! ])?;
//!
//! let got = t.stab(42)?.into_iter().map(|v| *v.tag()).collect::<Vec<_>>();
//! assert_eq!(got, ["Fourth", "Fifth", "Third"]);
//! # Ok::<_, intstab::Error>(())
//! ```
//!
//! # Implementation
//!
//! The index is built with a single sweep over the coordinate domain, linking
//! intervals into an implicit tree of parent, left sibling and "smaller" chain
//! pointers, held in an arena and addressed by input position. A table of the
//! innermost open interval at every coordinate provides the starting point of
//! each query, which then walks these links, terminating each walk at the
//! first interval that does not contain the query point.
//!
//! The memory cost of the index is one slot per coordinate in the domain (see
//! [`Config::with_domain_max()`]) plus one arena record per interval.

#![deny(missing_debug_implementations)]

mod build;
mod config;
mod error;
mod interval;
mod node;
mod pool;
mod stabber;

#[cfg(test)]
mod test_utils;

pub use config::*;
pub use error::*;
pub use interval::*;
pub use stabber::*;
