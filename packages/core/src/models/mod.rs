//! Data Models
//!
//! This module contains the data structures of the organogram:
//!
//! - `PositionNode` - One position in the chart, owning its direct reports
//! - `NodePatch` - Partial update applied when a position is edited
//! - `ReferenceData` / `MasterEmployee` - Immutable master data lookups
//! - `NodeFormValues` / `FormAnchor` - Transient add/edit form input
//! - `OrgFilters` - Display filter settings

mod filters;
mod form;
mod position_node;
mod reference_data;

pub use filters::{Highlight, OrgFilters};
pub use form::{Assignment, FormAnchor, FormMode, NodeFormValues};
pub use position_node::{
    AssignMode, DeptKey, Grade, NodePatch, NodeStatus, PositionNode, ValidationError,
    MAX_TREE_DEPTH, ROOT_NODE_ID,
};
pub use reference_data::{MasterEmployee, ReferenceData, SelectOption};
