//! Wiring between the screen pipeline and the console.
//!
//! Provider construction and progress reporting for the fetch stage.

pub(crate) mod data_pipeline;
