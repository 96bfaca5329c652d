//! Display Filters
//!
//! User-selected settings that shape the visible organogram without touching
//! the canonical tree.

use crate::models::{DeptKey, PositionNode};
use serde::{Deserialize, Serialize};

/// Filter settings for the visible chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrgFilters {
    /// Case-insensitive substring matched against name, designation and
    /// department label
    pub search: String,
    /// Department to highlight (others are dimmed, nothing is removed)
    pub department: Option<DeptKey>,
    pub show_vacant: bool,
    pub show_separation: bool,
    /// Presentation only
    pub dark_mode: bool,
    /// Sort siblings by grade and lay rows out by grade band
    pub grade_sort: bool,
}

impl Default for OrgFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            department: None,
            show_vacant: true,
            show_separation: true,
            dark_mode: false,
            grade_sort: false,
        }
    }
}

/// How a card should be emphasised for the department highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Normal,
    Highlighted,
    Dimmed,
}

impl OrgFilters {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_grade_sort(mut self, grade_sort: bool) -> Self {
        self.grade_sort = grade_sort;
        self
    }

    /// Highlight state of a node for the selected department
    ///
    /// Nodes without a department (the Empty root) are never dimmed.
    pub fn highlight_for(&self, node: &PositionNode) -> Highlight {
        match (&self.department, &node.department) {
            (Some(selected), Some(own)) if selected == own => Highlight::Highlighted,
            (Some(_), Some(_)) => Highlight::Dimmed,
            _ => Highlight::Normal,
        }
    }
}
