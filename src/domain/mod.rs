//! Core domain types and logic.

pub mod catalog;
pub mod code;
pub mod dataset;
pub mod error;
pub mod eval_date;
pub mod history;
pub mod pipeline;
pub mod report;
pub mod selector;
