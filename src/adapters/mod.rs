//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_settings_adapter;
pub mod json_selector_adapter;
pub mod report_adapter;
pub mod stocklist_adapter;
