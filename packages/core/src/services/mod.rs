//! Business Services
//!
//! This module contains the organogram business logic:
//!
//! - `tree_store` - Structural queries and mutations on the owned tree
//! - `node_factory` - Turning form submissions into nodes and patches
//! - `filter` - Projecting the visible tree (status, search, grade sort)
//! - `org_paths` - Hierarchy paths for org-level pickers
//! - `OrgChartService` - The facade owning the canonical chart
//!
//! Everything except `OrgChartService` is a pure function over borrowed or
//! owned trees; the service adds persistence and bookkeeping on top.

pub mod error;
pub mod filter;
pub mod node_factory;
pub mod org_chart_service;
pub mod org_paths;
pub mod tree_store;

pub use error::OrgTreeError;
pub use filter::project;
pub use node_factory::{build_inserted_nodes, build_patch};
pub use org_chart_service::{OrgChartConfig, OrgChartService, RestorePolicy, DEFAULT_STORAGE_KEY};
pub use org_paths::{fallback_org_levels, org_level_paths, OrgLevelPath};
