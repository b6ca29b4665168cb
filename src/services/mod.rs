//! Core services for scanning, aggregation, browsing and file operations

pub mod aggregate;
pub mod browse;
pub mod classify;
pub mod format;
pub mod fs;
pub mod index;
pub mod ops;
pub mod quick_filter;
pub mod traverse;
pub mod volume;
