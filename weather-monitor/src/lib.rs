pub mod alert;
pub mod config;
pub mod display;
pub mod metrics_server;
pub mod observability;
pub mod pipeline;
pub mod scheduler;
pub mod sinks;
pub mod shutdown;
pub mod sources;
pub mod transform;
pub mod visualize;

pub use pipeline::{CycleReport, Pipeline, PipelineError};
