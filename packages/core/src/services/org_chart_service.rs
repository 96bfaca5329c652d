//! Org Chart Service
//!
//! Owns the canonical organogram and coordinates every operation on it:
//!
//! - Queries for the sidebar, forms and pickers
//! - Mutations driven by the add/edit position form
//! - Projection and layout of the visible chart
//! - Best-effort persistence after each successful mutation
//!
//! The service is synchronous and takes `&mut self` for every mutation, so
//! edits are applied one at a time. `revision` increases with each accepted
//! mutation; callers can key cached layouts on it.

use crate::db::{decode_envelope, encode_snapshot, SnapshotStore};
use crate::layout::{FormPlacement, LayoutConfig, LayoutMode, OrgLayout, Point};
use crate::models::{
    FormAnchor, FormMode, NodeFormValues, NodeStatus, OrgFilters, PositionNode, ReferenceData,
    SelectOption,
};
use crate::services::error::OrgTreeError;
use crate::services::filter::project;
use crate::services::node_factory::{build_inserted_nodes, build_patch};
use crate::services::org_paths::{fallback_org_levels, org_level_paths, OrgLevelPath};
use crate::services::tree_store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key the chart is saved under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "hrm_org_tree";

/// What happens to a previously saved chart on startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestorePolicy {
    /// Always begin from an unconfigured root (saved data is overwritten on
    /// the first edit)
    #[default]
    StartFresh,
    /// Decode the saved snapshot, falling back to a fresh root if it is
    /// missing or unreadable
    RestoreSaved,
}

/// Configuration for [`OrgChartService`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrgChartConfig {
    pub storage_key: String,
    pub restore_policy: RestorePolicy,
    pub layout: LayoutConfig,
    pub form: FormPlacement,
}

impl Default for OrgChartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            restore_policy: RestorePolicy::StartFresh,
            layout: LayoutConfig::default(),
            form: FormPlacement::default(),
        }
    }
}

impl OrgChartConfig {
    pub fn with_restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_policy = policy;
        self
    }
}

/// Canonical organogram plus the seams it depends on
pub struct OrgChartService {
    tree: PositionNode,
    reference: Arc<ReferenceData>,
    store: Arc<dyn SnapshotStore>,
    config: OrgChartConfig,
    revision: u64,
}

impl OrgChartService {
    /// Create the service, restoring a saved chart when the policy asks for it
    pub fn new(
        reference: Arc<ReferenceData>,
        store: Arc<dyn SnapshotStore>,
        config: OrgChartConfig,
    ) -> Self {
        let tree = match config.restore_policy {
            RestorePolicy::StartFresh => PositionNode::new_root(),
            RestorePolicy::RestoreSaved => Self::restore(store.as_ref(), &config.storage_key),
        };
        Self {
            tree,
            reference,
            store,
            config,
            revision: 0,
        }
    }

    fn restore(store: &dyn SnapshotStore, key: &str) -> PositionNode {
        let payload = match store.load(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("No saved chart under '{}', starting fresh", key);
                return PositionNode::new_root();
            }
            Err(e) => {
                warn!("Failed to load saved chart '{}': {:#}", key, e);
                return PositionNode::new_root();
            }
        };

        match decode_envelope(&payload) {
            Ok(snapshot) => {
                info!(
                    "Restored chart '{}' (root {}, saved at {:?})",
                    key, snapshot.tree.id, snapshot.saved_at
                );
                snapshot.tree
            }
            Err(e) => {
                warn!("Discarding saved chart '{}': {}", key, e);
                PositionNode::new_root()
            }
        }
    }

    fn persist(&self) {
        let payload = match encode_snapshot(&self.tree) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to encode chart snapshot: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(&self.config.storage_key, &payload) {
            warn!(
                "Failed to save chart '{}': {:#}",
                self.config.storage_key, e
            );
        }
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.persist();
    }

    pub fn tree(&self) -> &PositionNode {
        &self.tree
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &OrgChartConfig {
        &self.config
    }

    pub fn find_node(&self, id: &str) -> Option<&PositionNode> {
        tree_store::find_node(&self.tree, id)
    }

    pub fn find_parent_of(&self, id: &str) -> Option<&PositionNode> {
        tree_store::find_parent_of(&self.tree, id)
    }

    pub fn can_add_child(&self, id: &str) -> bool {
        tree_store::can_add_child(&self.tree, id)
    }

    /// Nodes a position may report to
    ///
    /// Passing the node being edited excludes it and its whole subtree.
    pub fn reporting_to_options(&self, exclude_node: Option<&str>) -> Vec<SelectOption> {
        let exclude = match exclude_node.and_then(|id| self.find_node(id)) {
            Some(node) => {
                let mut ids = tree_store::collect_descendant_ids(node);
                ids.insert(node.id.clone());
                ids
            }
            None => exclude_node.map(str::to_string).into_iter().collect(),
        };
        tree_store::collect_eligible_targets(&self.tree, &exclude)
    }

    /// Active positions
    pub fn employee_count(&self) -> usize {
        tree_store::count_by_status(&self.tree, NodeStatus::Active)
    }

    /// Vacant positions
    pub fn vacant_count(&self) -> usize {
        tree_store::count_by_status(&self.tree, NodeStatus::Vacant)
    }

    pub fn visible_tree(&self, filters: &OrgFilters) -> Option<PositionNode> {
        project(&self.tree, filters)
    }

    /// Project and lay out the chart; grade sort also switches to grade rows
    pub fn layout(&self, filters: &OrgFilters) -> Option<OrgLayout> {
        let mode = if filters.grade_sort {
            LayoutMode::Grade
        } else {
            LayoutMode::Depth
        };
        self.visible_tree(filters)
            .map(|visible| OrgLayout::compute(visible, mode, &self.config.layout))
    }

    /// Selectable org levels, or the master-data listing for an unconfigured
    /// chart
    pub fn org_level_paths(&self) -> Vec<OrgLevelPath> {
        let paths = org_level_paths(&self.tree, &self.reference);
        if paths.is_empty() {
            fallback_org_levels(&self.reference)
        } else {
            paths
        }
    }

    /// Add the positions described by `values` under `parent_id`
    ///
    /// Returns the ids of the inserted nodes.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if the parent does not exist
    /// - `CannotAddChild` if the parent is still the unconfigured root
    pub fn add_children(
        &mut self,
        parent_id: &str,
        values: &NodeFormValues,
    ) -> Result<Vec<String>, OrgTreeError> {
        let parent = self
            .find_node(parent_id)
            .ok_or_else(|| OrgTreeError::node_not_found(parent_id))?;
        if parent.is_empty_placeholder() {
            return Err(OrgTreeError::cannot_add_child(parent_id));
        }

        let nodes = build_inserted_nodes(values, &self.reference);
        let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
        tree_store::insert_children(&mut self.tree, parent_id, nodes)?;

        debug!("Inserted {} node(s) under {}", ids.len(), parent_id);
        self.commit();
        Ok(ids)
    }

    /// Overwrite a position's fields from `values`
    ///
    /// The node keeps its id and place in the tree; `reporting_to` is ignored.
    pub fn edit_node(&mut self, id: &str, values: &NodeFormValues) -> Result<(), OrgTreeError> {
        let patch = build_patch(values, &self.reference);
        tree_store::patch_node(&mut self.tree, id, &patch)?;

        debug!("Updated node {} (status {:?})", id, patch.status);
        self.commit();
        Ok(())
    }

    /// Anchor for the "add direct report" form
    ///
    /// `None` when the parent is missing or unconfigured.
    pub fn open_add_form(&self, parent_id: &str, viewport_x: f64, viewport_y: f64) -> Option<FormAnchor> {
        let parent = self.find_node(parent_id)?;
        if parent.is_empty_placeholder() {
            return None;
        }
        Some(FormAnchor {
            mode: FormMode::Add,
            node_id: parent_id.to_string(),
            parent_name: Some(tree_store::display_name(parent)),
            viewport_x,
            viewport_y,
        })
    }

    /// Anchor for the "edit position" form
    pub fn open_edit_form(&self, node_id: &str, viewport_x: f64, viewport_y: f64) -> Option<FormAnchor> {
        self.find_node(node_id)?;
        Some(FormAnchor {
            mode: FormMode::Edit,
            node_id: node_id.to_string(),
            parent_name: self.find_parent_of(node_id).map(tree_store::display_name),
            viewport_x,
            viewport_y,
        })
    }

    /// Where the floating form should be drawn for an anchor
    pub fn form_position(&self, anchor: &FormAnchor, viewport_width: f64, viewport_height: f64) -> Point {
        self.config.form.clamp(
            Point::new(anchor.viewport_x, anchor.viewport_y),
            viewport_width,
            viewport_height,
        )
    }

    /// Apply a submitted form
    ///
    /// Edit patches the anchored node. Add inserts under `reporting_to` when
    /// given, otherwise under the anchored parent. Returns the affected ids.
    pub fn save_form(
        &mut self,
        anchor: &FormAnchor,
        values: &NodeFormValues,
    ) -> Result<Vec<String>, OrgTreeError> {
        match anchor.mode {
            FormMode::Edit => {
                self.edit_node(&anchor.node_id, values)?;
                Ok(vec![anchor.node_id.clone()])
            }
            FormMode::Add => {
                let target = values.reporting_to.as_deref().unwrap_or(&anchor.node_id);
                self.add_children(target, values)
            }
        }
    }
}

#[cfg(test)]
#[path = "org_chart_service_test.rs"]
mod org_chart_service_test;
