//! Node Factory
//!
//! Turns submitted form values into new position nodes (add) or into a merge
//! patch for an existing position (edit). Department labels, grades and names
//! are always derived from [`ReferenceData`], never taken from the form.

use crate::models::{
    AssignMode, Assignment, DeptKey, MasterEmployee, NodeFormValues, NodePatch, NodeStatus,
    PositionNode, ReferenceData,
};

fn node_for_employee(employee: Option<&MasterEmployee>, reference: &ReferenceData) -> PositionNode {
    let mut node = PositionNode::new(NodeStatus::Active);
    node.assign_mode = Some(AssignMode::Employee);
    if let Some(employee) = employee {
        node.department = Some(employee.department.clone());
        node.department_label = Some(reference.department_label(&employee.department));
        node.designation = Some(employee.designation.clone());
        node.grade = Some(employee.grade);
        node.employee_id = Some(employee.id.clone());
        node.name = Some(employee.name.clone());
    }
    node
}

fn designation_node(
    status: NodeStatus,
    department: Option<&DeptKey>,
    designation: Option<&String>,
    reference: &ReferenceData,
) -> PositionNode {
    let mut node = PositionNode::new(status);
    node.assign_mode = Some(AssignMode::Designation);
    node.department = department.cloned();
    node.department_label = department.map(|key| reference.department_label(key));
    node.designation = designation.cloned();
    node
}

/// Build the nodes created by an "add direct report" submission
///
/// - Employee mode: one Active node bound to the roster employee
/// - Designation mode, no employees: one Vacant placeholder
/// - Designation mode, N employees: N Active siblings, one per employee,
///   each with its own freshly generated id
///
/// An employee id that is not on the roster still yields a node, with the
/// employee fields left unset.
pub fn build_inserted_nodes(values: &NodeFormValues, reference: &ReferenceData) -> Vec<PositionNode> {
    match &values.assignment {
        Assignment::Employee { employee_id } => {
            vec![node_for_employee(reference.employee(employee_id), reference)]
        }
        Assignment::Designation {
            department,
            designation,
            employee_ids,
        } if employee_ids.is_empty() => vec![designation_node(
            NodeStatus::Vacant,
            department.as_ref(),
            designation.as_ref(),
            reference,
        )],
        Assignment::Designation {
            department,
            designation,
            employee_ids,
        } => employee_ids
            .iter()
            .map(|employee_id| {
                let mut node = designation_node(
                    NodeStatus::Active,
                    department.as_ref(),
                    designation.as_ref(),
                    reference,
                );
                if let Some(employee) = reference.employee(employee_id) {
                    node.grade = Some(employee.grade);
                    node.employee_id = Some(employee.id.clone());
                    node.name = Some(employee.name.clone());
                }
                node
            })
            .collect(),
    }
}

/// Build the merge patch for an "edit position" submission
///
/// Every position field is written; values the submission does not supply are
/// cleared. Under designation mode the first selected employee is the
/// representative, and the status is Active when any employee is attached.
pub fn build_patch(values: &NodeFormValues, reference: &ReferenceData) -> NodePatch {
    match &values.assignment {
        Assignment::Employee { employee_id } => {
            let employee = reference.employee(employee_id);
            NodePatch {
                status: Some(NodeStatus::Active),
                assign_mode: Some(Some(AssignMode::Employee)),
                department: Some(employee.map(|e| e.department.clone())),
                department_label: Some(employee.map(|e| reference.department_label(&e.department))),
                designation: Some(employee.map(|e| e.designation.clone())),
                grade: Some(employee.map(|e| e.grade)),
                employee_id: Some(employee.map(|e| e.id.clone())),
                name: Some(employee.map(|e| e.name.clone())),
            }
        }
        Assignment::Designation {
            department,
            designation,
            employee_ids,
        } => {
            let representative = employee_ids
                .first()
                .and_then(|employee_id| reference.employee(employee_id));
            let status = if employee_ids.is_empty() {
                NodeStatus::Vacant
            } else {
                NodeStatus::Active
            };
            NodePatch {
                status: Some(status),
                assign_mode: Some(Some(AssignMode::Designation)),
                department: Some(department.clone()),
                department_label: Some(department.as_ref().map(|key| reference.department_label(key))),
                designation: Some(designation.clone()),
                grade: Some(representative.map(|e| e.grade)),
                employee_id: Some(representative.map(|e| e.id.clone())),
                name: Some(representative.map(|e| e.name.clone())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;
    use std::collections::HashSet;

    fn reference() -> ReferenceData {
        ReferenceData::new()
            .with_department("eng", "Engineering", &["SWE"])
            .with_department("sales", "Sales", &["Rep"])
            .with_employee(MasterEmployee {
                id: "E1".to_string(),
                name: "Ann".to_string(),
                department: DeptKey::from("eng"),
                designation: "SWE".to_string(),
                grade: Grade::G3,
            })
            .with_employee(MasterEmployee {
                id: "E2".to_string(),
                name: "Bob".to_string(),
                department: DeptKey::from("sales"),
                designation: "Rep".to_string(),
                grade: Grade::G2,
            })
            .with_employee(MasterEmployee {
                id: "E3".to_string(),
                name: "Cid".to_string(),
                department: DeptKey::from("sales"),
                designation: "Rep".to_string(),
                grade: Grade::G4,
            })
    }

    #[test]
    fn test_employee_mode_binds_roster_fields() {
        let nodes = build_inserted_nodes(&NodeFormValues::by_employee("E1"), &reference());
        assert_eq!(nodes.len(), 1);

        let node = &nodes[0];
        assert_eq!(node.status, NodeStatus::Active);
        assert_eq!(node.assign_mode, Some(AssignMode::Employee));
        assert_eq!(node.department, Some(DeptKey::from("eng")));
        assert_eq!(node.department_label.as_deref(), Some("Engineering"));
        assert_eq!(node.designation.as_deref(), Some("SWE"));
        assert_eq!(node.grade, Some(Grade::G3));
        assert_eq!(node.employee_id.as_deref(), Some("E1"));
        assert_eq!(node.name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_designation_mode_without_employees_is_vacant() {
        let values = NodeFormValues::by_designation("sales", "Rep", Vec::new());
        let nodes = build_inserted_nodes(&values, &reference());
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].status, NodeStatus::Vacant);
        assert_eq!(nodes[0].department_label.as_deref(), Some("Sales"));
        assert_eq!(nodes[0].designation.as_deref(), Some("Rep"));
        assert!(nodes[0].employee_id.is_none());
        assert!(nodes[0].grade.is_none());
    }

    #[test]
    fn test_designation_batch_creates_one_sibling_per_employee() {
        let values = NodeFormValues::by_designation(
            "sales",
            "Rep",
            vec!["E2".to_string(), "E3".to_string()],
        );
        let nodes = build_inserted_nodes(&values, &reference());
        assert_eq!(nodes.len(), 2);

        let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), 2);

        for node in &nodes {
            assert_eq!(node.status, NodeStatus::Active);
            assert_eq!(node.department, Some(DeptKey::from("sales")));
            assert_eq!(node.designation.as_deref(), Some("Rep"));
        }
        assert_eq!(nodes[0].grade, Some(Grade::G2));
        assert_eq!(nodes[1].grade, Some(Grade::G4));
        assert_eq!(nodes[1].name.as_deref(), Some("Cid"));
    }

    #[test]
    fn test_unknown_department_label_falls_back_to_key() {
        let values = NodeFormValues::by_designation("legal", "Counsel", Vec::new());
        let nodes = build_inserted_nodes(&values, &reference());
        assert_eq!(nodes[0].department_label.as_deref(), Some("legal"));
    }

    #[test]
    fn test_unknown_employee_leaves_binding_unset() {
        let nodes = build_inserted_nodes(&NodeFormValues::by_employee("E404"), &reference());
        assert_eq!(nodes[0].status, NodeStatus::Active);
        assert!(nodes[0].employee_id.is_none());
        assert!(nodes[0].department.is_none());
    }

    #[test]
    fn test_build_patch_designation_uses_first_employee() {
        let values = NodeFormValues::by_designation(
            "sales",
            "Rep",
            vec!["E3".to_string(), "E2".to_string()],
        );
        let patch = build_patch(&values, &reference());
        assert_eq!(patch.status, Some(NodeStatus::Active));
        assert_eq!(patch.employee_id, Some(Some("E3".to_string())));
        assert_eq!(patch.grade, Some(Some(Grade::G4)));
        assert_eq!(patch.department_label, Some(Some("Sales".to_string())));
    }

    #[test]
    fn test_build_patch_without_employees_clears_binding() {
        let values = NodeFormValues::by_designation("sales", "Rep", Vec::new());
        let patch = build_patch(&values, &reference());
        assert_eq!(patch.status, Some(NodeStatus::Vacant));
        assert_eq!(patch.employee_id, Some(None));
        assert_eq!(patch.name, Some(None));
        assert_eq!(patch.grade, Some(None));
    }

    #[test]
    fn test_build_patch_employee_mode() {
        let patch = build_patch(&NodeFormValues::by_employee("E2"), &reference());
        assert_eq!(patch.status, Some(NodeStatus::Active));
        assert_eq!(patch.assign_mode, Some(Some(AssignMode::Employee)));
        assert_eq!(patch.name, Some(Some("Bob".to_string())));
        assert_eq!(patch.designation, Some(Some("Rep".to_string())));
    }
}
