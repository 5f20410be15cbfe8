//! Structs and helpers which are shared across the loading and routing
//! modules

pub mod bbox;
pub mod config;
pub mod destinations;
pub mod error;
pub mod graph_data;
