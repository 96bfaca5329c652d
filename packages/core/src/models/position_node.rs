//! Position Node Data Structures
//!
//! This module defines the `PositionNode` struct and the small value types it
//! is built from. A position node is one box in the organogram: an
//! unconfigured placeholder, a filled position, an open (vacant) position or a
//! position marked for separation.
//!
//! # Architecture
//!
//! - **Owned Tree**: Each node exclusively owns its ordered `children`
//! - **Stable Identity**: `id` is assigned once at creation and never reused
//! - **One Employee Per Node**: Several employees in the same position are
//!   modelled as sibling nodes, never as a multi-employee node
//!
//! # Examples
//!
//! ```rust
//! use organogram_core::models::{NodeStatus, PositionNode};
//!
//! let root = PositionNode::new_root();
//! assert_eq!(root.status, NodeStatus::Empty);
//! assert!(root.children.is_empty());
//! assert!(root.validate_tree().is_ok());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Id of the synthetic root created for a fresh chart
pub const ROOT_NODE_ID: &str = "root-1";

/// Maximum number of levels in a chart, root included
///
/// Each level nests two JSON values (node object plus `children` array), so a
/// chart within this bound always stays under `serde_json`'s parser recursion
/// limit of 128 and can be read back from its snapshot.
pub const MAX_TREE_DEPTH: usize = 50;

/// Validation errors for position nodes and whole trees
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Empty placeholder '{0}' must not carry position or employee fields")]
    EmptyNodeHasFields(String),

    #[error("Empty placeholder '{0}' is only allowed at the root")]
    EmptyBelowRoot(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Node '{0}' would exceed the maximum chart depth")]
    TooDeep(String),
}

/// Lifecycle status of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Unconfigured synthetic root
    Empty,
    /// Position filled by an employee
    Active,
    /// Open position with nobody bound to it
    Vacant,
    /// Employee is leaving the position
    Separation,
}

impl FromStr for NodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(Self::Empty),
            "active" => Ok(Self::Active),
            "vacant" => Ok(Self::Vacant),
            "separation" => Ok(Self::Separation),
            _ => Err(format!("Invalid node status: {}", s)),
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Active => write!(f, "active"),
            Self::Vacant => write!(f, "vacant"),
            Self::Separation => write!(f, "separation"),
        }
    }
}

/// How a node was populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignMode {
    /// Department + designation, with zero or more roster employees
    Designation,
    /// One specific named employee
    Employee,
}

/// Ordinal seniority band, G1 lowest to G9 highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    G7,
    G8,
    G9,
}

impl Grade {
    /// All grades from highest to lowest; this is also the grade-band row order
    pub const DESCENDING: [Grade; 9] = [
        Grade::G9,
        Grade::G8,
        Grade::G7,
        Grade::G6,
        Grade::G5,
        Grade::G4,
        Grade::G3,
        Grade::G2,
        Grade::G1,
    ];

    /// Numeric rank, 1 for G1 through 9 for G9
    pub fn rank(self) -> u8 {
        match self {
            Grade::G1 => 1,
            Grade::G2 => 2,
            Grade::G3 => 3,
            Grade::G4 => 4,
            Grade::G5 => 5,
            Grade::G6 => 6,
            Grade::G7 => 7,
            Grade::G8 => 8,
            Grade::G9 => 9,
        }
    }

    /// Row index in grade-banded layout (G9 at row 0, G1 at row 8)
    pub fn band_row(self) -> usize {
        9 - self.rank() as usize
    }

    pub fn label(self) -> String {
        format!("Grade {}", self.rank())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.rank())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::DESCENDING
            .iter()
            .copied()
            .find(|grade| grade.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid grade: {}", s))
    }
}

/// Department key such as `flight_ops`
///
/// Labels and valid designations for a key come from
/// [`ReferenceData`](crate::models::ReferenceData).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeptKey(String);

impl DeptKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeptKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for DeptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One position in the organogram tree.
///
/// # Fields
///
/// - `id`: Unique, stable identifier (`root-1` for the synthetic root,
///   `node-{uuid}` for everything created afterwards)
/// - `status`: Empty / Active / Vacant / Separation
/// - `assign_mode`: How the node was populated (absent while Empty)
/// - `department`, `department_label`, `designation`, `grade`: Position metadata
/// - `employee_id`, `name`: Bound employee, if any
/// - `children`: Ordered direct reports, exclusively owned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionNode {
    pub id: String,

    pub status: NodeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign_mode: Option<AssignMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DeptKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PositionNode>,
}

impl PositionNode {
    /// Create the unconfigured root placeholder of a fresh chart
    pub fn new_root() -> Self {
        Self::new_with_id(ROOT_NODE_ID.to_string(), NodeStatus::Empty)
    }

    /// Create a node with a freshly generated id
    pub fn new(status: NodeStatus) -> Self {
        Self::new_with_id(Self::generate_id(), status)
    }

    /// Create a node with an explicit id and no metadata
    pub fn new_with_id(id: String, status: NodeStatus) -> Self {
        Self {
            id,
            status,
            assign_mode: None,
            department: None,
            department_label: None,
            designation: None,
            grade: None,
            employee_id: None,
            name: None,
            children: Vec::new(),
        }
    }

    /// Generate a new node id
    ///
    /// Ids come from a random UUID so nodes built in the same batch never
    /// collide.
    pub fn generate_id() -> String {
        format!("node-{}", Uuid::new_v4())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_empty_placeholder(&self) -> bool {
        self.status == NodeStatus::Empty
    }

    fn has_position_fields(&self) -> bool {
        self.assign_mode.is_some()
            || self.department.is_some()
            || self.department_label.is_some()
            || self.designation.is_some()
            || self.grade.is_some()
            || self.employee_id.is_some()
            || self.name.is_some()
    }

    /// Validate this node's own fields (children are not visited)
    ///
    /// # Errors
    ///
    /// - `MissingField` if `id` is blank
    /// - `EmptyNodeHasFields` if an Empty placeholder carries metadata
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }

        if self.is_empty_placeholder() && self.has_position_fields() {
            return Err(ValidationError::EmptyNodeHasFields(self.id.clone()));
        }

        Ok(())
    }

    /// Validate the whole tree rooted at `self`
    ///
    /// Checks every node with [`validate`](Self::validate), that ids are
    /// pairwise distinct, that Empty placeholders only occur at the root and
    /// that no path is longer than [`MAX_TREE_DEPTH`] levels.
    pub fn validate_tree(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        self.validate_subtree(0, &mut seen)
    }

    /// Number of levels in the subtree rooted here (a leaf is 1)
    pub fn height(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PositionNode::height)
            .max()
            .unwrap_or(0)
    }

    fn validate_subtree<'a>(
        &'a self,
        depth: usize,
        seen: &mut HashSet<&'a str>,
    ) -> Result<(), ValidationError> {
        self.validate()?;

        if depth >= MAX_TREE_DEPTH {
            return Err(ValidationError::TooDeep(self.id.clone()));
        }

        if depth > 0 && self.is_empty_placeholder() {
            return Err(ValidationError::EmptyBelowRoot(self.id.clone()));
        }

        if !seen.insert(self.id.as_str()) {
            return Err(ValidationError::DuplicateId(self.id.clone()));
        }

        for child in &self.children {
            child.validate_subtree(depth + 1, seen)?;
        }

        Ok(())
    }

    /// Shallow-merge a patch into this node's scalar fields
    ///
    /// `id` and `children` are never touched.
    pub fn apply_patch(&mut self, patch: &NodePatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assign_mode) = &patch.assign_mode {
            self.assign_mode = *assign_mode;
        }
        if let Some(department) = &patch.department {
            self.department = department.clone();
        }
        if let Some(department_label) = &patch.department_label {
            self.department_label = department_label.clone();
        }
        if let Some(designation) = &patch.designation {
            self.designation = designation.clone();
        }
        if let Some(grade) = &patch.grade {
            self.grade = *grade;
        }
        if let Some(employee_id) = &patch.employee_id {
            self.employee_id = employee_id.clone();
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
    }
}

/// Accept both plain values and `null` for double-Option patch fields
///
/// - Missing field → None (don't update)
/// - null → Some(None) (clear the field)
/// - "value" → Some(Some("value")) (set the field)
fn deserialize_optional_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Partial node update for edit operations
///
/// Nullable fields use the double-`Option` pattern:
///
/// - `None`: Don't change this field
/// - `Some(None)`: Clear the field
/// - `Some(Some(value))`: Set the field
///
/// There are deliberately no `id` or `children` fields, so a patch can never
/// re-parent or re-identify a node.
///
/// # Examples
///
/// ```rust
/// # use organogram_core::models::{NodePatch, NodeStatus};
/// let patch = NodePatch {
///     status: Some(NodeStatus::Separation),
///     ..Default::default()
/// };
/// assert!(!patch.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub assign_mode: Option<Option<AssignMode>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub department: Option<Option<DeptKey>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub department_label: Option<Option<String>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub designation: Option<Option<String>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub grade: Option<Option<Grade>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub employee_id: Option<Option<String>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub name: Option<Option<String>>,
}

impl NodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check if the patch contains any changes
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.assign_mode.is_none()
            && self.department.is_none()
            && self.department_label.is_none()
            && self.designation.is_none()
            && self.grade.is_none()
            && self.employee_id.is_none()
            && self.name.is_none()
    }
}
