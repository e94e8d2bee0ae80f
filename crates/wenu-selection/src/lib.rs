//! WenuFilter Selection
//!
//! Per-event selection of single-electron W→eν candidates.
//!
//! The selection runs in three layers:
//! - [`CandidateClassifier`]: assigns the barrel/endcap region tag
//! - [`EventSelector`]: validates inputs, applies the momentum threshold and
//!   the second-electron veto, and builds the output record
//! - [`SelectionPipeline`]: drives the selector over an event stream and
//!   writes accepted records to a sink
//!
//! Isolation and shower-shape variables are recorded but never cut on.

pub mod classifier;
pub mod config;
pub mod pipeline;
pub mod selector;

pub use classifier::CandidateClassifier;
pub use config::FilterConfig;
pub use pipeline::{PipelineConfig, RunSummary, SelectionPipeline};
pub use selector::{Decision, EventSelector, RejectReason, SelectorConfig, VETO_PT};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::CandidateClassifier;
    pub use crate::config::FilterConfig;
    pub use crate::pipeline::{PipelineConfig, RunSummary, SelectionPipeline};
    pub use crate::selector::{Decision, EventSelector, RejectReason, SelectorConfig};
}
