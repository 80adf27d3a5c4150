//! Journal record model shared by every keepsake tool.
//!
//! # Responsibility
//! - Define the record variants persisted by each tool.
//! - Define the `Record` contract the store and aggregations rely on.
//!
//! # Invariants
//! - Records are immutable once created; stores only append or clear.
//! - Every record carries a UTC creation timestamp assigned at creation.
//!
//! # See also
//! - `store` for persistence, `stats` for read-only aggregations.

pub mod commit;
pub mod jar;
pub mod lenient;
pub mod record;
