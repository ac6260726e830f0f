//! Core data types for the Tonelift promotion platform

pub mod quote;
pub mod service;
pub mod tier;
