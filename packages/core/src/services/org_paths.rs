//! Org-Level Paths
//!
//! Flattens the chart into selectable hierarchy paths such as
//! `CEO > CTO > Developer`, used by headcount and requisition pickers.

use crate::models::{DeptKey, NodeStatus, PositionNode, ReferenceData};
use serde::{Deserialize, Serialize};

/// One selectable org level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgLevelPath {
    /// Node id, or a synthetic key for master-data fallback rows
    pub id: String,
    pub label: String,
    /// Ancestor labels joined with ` > `
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DeptKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_label: Option<String>,
    /// Designation, else the employee name
    pub designation: String,
    /// Approximate current headcount
    pub headcount: usize,
    pub is_leaf: bool,
    /// Department grouping rows in the fallback listing cannot be picked
    pub selectable: bool,
}

/// Pre-order org levels of every configured node
///
/// The unconfigured root contributes no entry of its own; its children start
/// fresh paths.
pub fn org_level_paths(tree: &PositionNode, reference: &ReferenceData) -> Vec<OrgLevelPath> {
    let mut out = Vec::new();
    collect_paths(tree, None, reference, &mut out);
    out
}

fn collect_paths(
    node: &PositionNode,
    parent_path: Option<&str>,
    reference: &ReferenceData,
    out: &mut Vec<OrgLevelPath>,
) {
    if node.is_empty_placeholder() {
        for child in &node.children {
            collect_paths(child, None, reference, out);
        }
        return;
    }

    let label = node
        .designation
        .as_deref()
        .or(node.name.as_deref())
        .unwrap_or("Unknown Position")
        .to_string();
    let path = match parent_path {
        Some(parent) => format!("{} > {}", parent, label),
        None => label.clone(),
    };
    let headcount = match (&node.department, &node.designation) {
        (Some(department), Some(designation)) => reference.headcount(department, designation),
        _ if node.status == NodeStatus::Active => 1,
        _ => 0,
    };

    out.push(OrgLevelPath {
        id: node.id.clone(),
        label,
        path: path.clone(),
        department: node.department.clone(),
        department_label: node.department_label.clone(),
        designation: node
            .designation
            .clone()
            .or_else(|| node.name.clone())
            .unwrap_or_default(),
        headcount,
        is_leaf: node.is_leaf(),
        selectable: true,
    });

    for child in &node.children {
        collect_paths(child, Some(path.as_str()), reference, out);
    }
}

/// Department → designation listing from master data
///
/// Used when no chart has been configured yet. Each department row is
/// followed by its designations.
pub fn fallback_org_levels(reference: &ReferenceData) -> Vec<OrgLevelPath> {
    let mut out = Vec::new();
    for (key, department_label) in &reference.department_labels {
        let designations = reference
            .department_designations
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default();

        out.push(OrgLevelPath {
            id: key.to_string(),
            label: department_label.clone(),
            path: department_label.clone(),
            department: Some(key.clone()),
            department_label: Some(department_label.clone()),
            designation: String::new(),
            headcount: 0,
            is_leaf: designations.is_empty(),
            selectable: false,
        });

        for designation in designations {
            out.push(OrgLevelPath {
                id: format!("{}||{}", key, designation),
                label: designation.clone(),
                path: format!("{} > {}", department_label, designation),
                department: Some(key.clone()),
                department_label: Some(department_label.clone()),
                designation: designation.clone(),
                headcount: reference.headcount(key, designation),
                is_leaf: true,
                selectable: true,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Grade, MasterEmployee};

    fn reference() -> ReferenceData {
        let employee = |id: &str, designation: &str| MasterEmployee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            department: DeptKey::from("it"),
            designation: designation.to_string(),
            grade: Grade::G4,
        };
        ReferenceData::new()
            .with_department("it", "Information Technology", &["Manager", "Developer"])
            .with_department("hr", "Human Resources", &[])
            .with_employee(employee("E1", "Developer"))
            .with_employee(employee("E2", "Developer"))
            .with_employee(employee("E3", "Manager"))
    }

    fn position(id: &str, designation: Option<&str>, name: Option<&str>) -> PositionNode {
        let mut node = PositionNode::new_with_id(id.to_string(), NodeStatus::Active);
        node.department = Some(DeptKey::from("it"));
        node.department_label = Some("Information Technology".to_string());
        node.designation = designation.map(str::to_string);
        node.name = name.map(str::to_string);
        node
    }

    #[test]
    fn test_paths_skip_empty_root_and_join_labels() {
        let mut manager = position("m", Some("Manager"), Some("Mia"));
        manager
            .children
            .push(position("d", Some("Developer"), Some("Dan")));
        let mut root = PositionNode::new_root();
        root.children.push(manager);

        let paths = org_level_paths(&root, &reference());
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].path, "Manager");
        assert!(!paths[0].is_leaf);
        assert_eq!(paths[0].headcount, 1);
        assert_eq!(paths[1].path, "Manager > Developer");
        assert!(paths[1].is_leaf);
        assert_eq!(paths[1].headcount, 2);
    }

    #[test]
    fn test_label_falls_back_to_name_then_unknown() {
        let mut root = PositionNode::new_root();
        root.children.push(position("a", None, Some("Ann")));
        let mut vacant = PositionNode::new_with_id("b".to_string(), NodeStatus::Vacant);
        vacant.department = Some(DeptKey::from("it"));
        root.children.push(vacant);

        let paths = org_level_paths(&root, &reference());
        assert_eq!(paths[0].label, "Ann");
        assert_eq!(paths[0].designation, "Ann");
        assert_eq!(paths[0].headcount, 1);
        assert_eq!(paths[1].label, "Unknown Position");
        assert_eq!(paths[1].headcount, 0);
    }

    #[test]
    fn test_fresh_chart_has_no_paths() {
        assert!(org_level_paths(&PositionNode::new_root(), &reference()).is_empty());
    }

    #[test]
    fn test_fallback_lists_departments_then_designations() {
        let levels = fallback_org_levels(&reference());
        let ids: Vec<&str> = levels.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["hr", "it", "it||Manager", "it||Developer"]);

        assert!(!levels[0].selectable);
        assert!(levels[0].is_leaf);
        assert_eq!(levels[3].path, "Information Technology > Developer");
        assert_eq!(levels[3].headcount, 2);
        assert_eq!(levels[2].headcount, 1);
    }
}
