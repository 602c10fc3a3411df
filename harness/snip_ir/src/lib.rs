//! Shared data model for snippet verification.
//!
//! Everything that flows between the source preprocessor, the checker
//! invoker and the matcher lives here:
//!
//! ```text
//! Snippet (loaded once, immutable)
//!     │
//!     ▼
//! compilable text + LineMap ──► Vec<Expectation>
//! ```
//!
//! Columns and lines are 1-based throughout, matching what type checkers
//! print and what a reader sees in an editor.

mod column;
mod expectation;
mod line_map;
mod overlay;
mod snippet;

pub use column::ColumnRange;
pub use expectation::Expectation;
pub use line_map::LineMap;
pub use overlay::{OptionValue, Overlay};
pub use snippet::{Snippet, SnippetId};
