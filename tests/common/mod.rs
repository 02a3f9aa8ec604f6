//! Common test utilities for datasync integration tests

#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod local;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use local::*;
