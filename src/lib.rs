//! Workflow orchestration engine for a federal proposal pipeline.
//!
//! The crate covers the deterministic core of the pipeline: the seven-factor
//! bid/no-bid scoring engine, the Pink Team and Gold Team approval gates, and
//! the stage orchestrator that drives an opportunity from screening through
//! submission with bounded rework at each gate. Document parsing, retrieval,
//! LLM prompting, and persistence live behind the collaborator traits in
//! [`workflows::pipeline::collaborators`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
