//! Port traits at the I/O boundaries of the pipeline.

pub mod history_port;
pub mod report_port;
pub mod settings_port;
