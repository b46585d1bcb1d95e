// Common test utilities

pub mod fixtures;
pub mod harness;

pub use harness::TestHarness;
