//! Node Form Input
//!
//! Transient values submitted by the add/edit position form. They are built by
//! the UI, consumed once by the node factory and then discarded.

use crate::models::DeptKey;
use serde::{Deserialize, Serialize};

/// How the submitted form populates a position
///
/// Each variant only carries the fields that mode uses, so a designation
/// batch can never also name a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "assignMode", rename_all = "camelCase")]
pub enum Assignment {
    /// Department + designation, with zero or more roster employees
    #[serde(rename_all = "camelCase")]
    Designation {
        #[serde(default)]
        department: Option<DeptKey>,
        #[serde(default)]
        designation: Option<String>,
        #[serde(default)]
        employee_ids: Vec<String>,
    },
    /// One specific named employee
    #[serde(rename_all = "camelCase")]
    Employee { employee_id: String },
}

/// Submitted form values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFormValues {
    #[serde(flatten)]
    pub assignment: Assignment,

    /// Node the new position reports to (add mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_to: Option<String>,
}

impl NodeFormValues {
    pub fn by_employee(employee_id: impl Into<String>) -> Self {
        Self {
            assignment: Assignment::Employee {
                employee_id: employee_id.into(),
            },
            reporting_to: None,
        }
    }

    pub fn by_designation(
        department: impl Into<DeptKey>,
        designation: impl Into<String>,
        employee_ids: Vec<String>,
    ) -> Self {
        Self {
            assignment: Assignment::Designation {
                department: Some(department.into()),
                designation: Some(designation.into()),
                employee_ids,
            },
            reporting_to: None,
        }
    }

    pub fn reporting_to(mut self, node_id: impl Into<String>) -> Self {
        self.reporting_to = Some(node_id.into());
        self
    }
}

/// Whether the floating form adds a direct report or edits a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Add,
    Edit,
}

/// Where and for what the floating node form was opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnchor {
    pub mode: FormMode,
    /// Parent id in add mode, the node's own id in edit mode
    pub node_id: String,
    /// Default "reporting to" display name
    pub parent_name: Option<String>,
    pub viewport_x: f64,
    pub viewport_y: f64,
}
