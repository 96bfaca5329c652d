//! Reference Data
//!
//! Static lookup tables the organogram consumes but never mutates: the
//! department key → label table, the department key → designations table and
//! the master employee roster. They are supplied by the host at construction
//! time (typically loaded from JSON) and shared behind an `Arc`.

use crate::models::{DeptKey, Grade};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable employee record owned by the HR master data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterEmployee {
    /// Employee number, e.g. `TN-99356`
    pub id: String,
    pub name: String,
    pub department: DeptKey,
    pub designation: String,
    pub grade: Grade,
}

impl MasterEmployee {
    /// Dropdown label: `"Full Name (TN-XXXXX)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// A `{value, label}` pair for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Department, designation and employee tables
///
/// `BTreeMap` keeps option lists in a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    #[serde(default)]
    pub department_labels: BTreeMap<DeptKey, String>,

    #[serde(default)]
    pub department_designations: BTreeMap<DeptKey, Vec<String>>,

    #[serde(default)]
    pub employees: Vec<MasterEmployee>,
}

impl ReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(
        mut self,
        key: impl Into<DeptKey>,
        label: impl Into<String>,
        designations: &[&str],
    ) -> Self {
        let key = key.into();
        self.department_labels.insert(key.clone(), label.into());
        self.department_designations.insert(
            key,
            designations.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    pub fn with_employee(mut self, employee: MasterEmployee) -> Self {
        self.employees.push(employee);
        self
    }

    /// Display label for a department, falling back to the raw key
    pub fn department_label(&self, key: &DeptKey) -> String {
        self.department_labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn employee(&self, id: &str) -> Option<&MasterEmployee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn department_options(&self) -> Vec<SelectOption> {
        self.department_labels
            .iter()
            .map(|(key, label)| SelectOption::new(key.as_str(), label.as_str()))
            .collect()
    }

    /// Valid designations for a department (empty for unknown keys)
    pub fn designation_options(&self, department: &DeptKey) -> Vec<SelectOption> {
        self.department_designations
            .get(department)
            .map(|designations| {
                designations
                    .iter()
                    .map(|d| SelectOption::new(d.as_str(), d.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Roster entries matching both department and designation
    pub fn designation_employees(
        &self,
        department: &DeptKey,
        designation: &str,
    ) -> Vec<SelectOption> {
        if designation.is_empty() {
            return Vec::new();
        }
        self.employees
            .iter()
            .filter(|e| &e.department == department && e.designation == designation)
            .map(|e| SelectOption::new(e.id.as_str(), e.label()))
            .collect()
    }

    /// Number of roster entries holding a department + designation
    pub fn headcount(&self, department: &DeptKey, designation: &str) -> usize {
        self.employees
            .iter()
            .filter(|e| &e.department == department && e.designation == designation)
            .count()
    }
}
