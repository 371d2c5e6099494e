//! Research-paper metadata explorer.
//!
//! The [`data`] layer loads and cleans a metadata file into an immutable
//! record store; [`pipeline`] filters, samples and aggregates it per request;
//! [`app`] renders the result with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod state;
pub mod ui;
