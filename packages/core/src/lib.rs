//! Organogram Core Business Logic Layer
//!
//! This crate provides the data model, tree operations, layout and
//! persistence behind the HR organogram: a hierarchy of positions (filled,
//! vacant or separating) rendered as a top-down chart.
//!
//! # Architecture
//!
//! - **Owned tree**: Each position owns its direct reports; mutations go
//!   through one service holding the canonical tree
//! - **Pure projections**: Filtering, grade sorting and layout derive new
//!   values and never touch the canonical tree
//! - **Versioned snapshots**: The chart persists as a JSON envelope behind a
//!   key/value seam, with tolerant decoding
//!
//! # Modules
//!
//! - [`models`] - Data structures (PositionNode, ReferenceData, form input, filters)
//! - [`services`] - Tree operations, node factory, projection and the `OrgChartService`
//! - [`layout`] - Tidy top-down layout, connectors and viewport transform
//! - [`db`] - Snapshot codec and storage backends

pub mod db;
pub mod layout;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use db::*;
pub use layout::*;
pub use models::*;
pub use services::*;
