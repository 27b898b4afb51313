//! Console output for relpack

pub mod log;
