//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod aggregation;
pub mod error;
pub mod form;
pub mod hit;
pub mod identifiers;
pub mod key_action;
pub mod mode;

// Re-export for convenience
pub use aggregation::{AggregationBucket, Aggregations, BucketSource, TimeBucket};
pub use error::{AppError, ExportError, SearchError};
pub use form::SearchForm;
pub use hit::{Column, Hit, ResultSet, NOT_AVAILABLE};
pub use identifiers::{HitId, InvalidHitId};
pub use key_action::KeyAction;
pub use mode::{FormField, SearchMode, UnknownSearchMode};
