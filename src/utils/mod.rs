//! Utility functions shared across the codebase

pub mod json;
