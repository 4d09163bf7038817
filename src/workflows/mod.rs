pub mod approvals;
pub mod pipeline;
pub mod scoring;
