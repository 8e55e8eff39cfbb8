pub mod classify;
pub mod dataset;
pub mod evaluation;
pub mod geometry;
pub mod plot;
pub mod tasks;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
