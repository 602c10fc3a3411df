//! Testing utilities for the harness.
//!
//! - **mocks**: an in-memory [`TypeChecker`](snip_check::TypeChecker) that
//!   flags fixed substrings, so runner behavior can be tested without `tsc`
//!
//! # Usage
//!
//! ```ignore
//! use snipc::testing::MockChecker;
//!
//! let checker = MockChecker::new()
//!     .flag("ab12: AB12 = ab", "Type 'AB' is not assignable to type 'AB12'.");
//! ```

pub mod mocks;

pub use mocks::{snippet, MockChecker};
