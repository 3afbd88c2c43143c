// ============================================================================
// OmniCore Core - Menu Tree Store
// File: crates/omni-core/src/navigation/tree.rs
// Description: Ordered forest of menu items with traversal and CRUD
// ============================================================================

use std::collections::HashSet;

use omni_shared::{new_id, EntityId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use crate::domain::{MenuDraft, MenuItem};
use crate::error::DomainError;

/// Canonical navigation forest.
///
/// Invariants: ids are unique, every child's `parent_id` names its owner, and
/// roots have no parent. Ownership makes cycles unrepresentable; `reparent`
/// rejects moves that would need one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuTree {
    roots: Vec<MenuItem>,
}

/// Node yielded by [`Visit`], with its depth below the traversal start.
#[derive(Debug, Clone, Copy)]
pub struct Visited<'a> {
    pub depth: usize,
    pub node: &'a MenuItem,
}

/// Depth-first, parent-before-children traversal preserving sibling order.
pub struct Visit<'a> {
    stack: Vec<(usize, &'a MenuItem)>,
}

impl<'a> Visit<'a> {
    fn over(items: &'a [MenuItem]) -> Self {
        Self {
            stack: items.iter().rev().map(|item| (0, item)).collect(),
        }
    }

    /// Traversal of the subtree rooted at `node`.
    pub fn from_node(node: &'a MenuItem) -> Self {
        Self { stack: vec![(0, node)] }
    }
}

impl<'a> Iterator for Visit<'a> {
    type Item = Visited<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some(Visited { depth, node })
    }
}

/// Flattened entry used by parent pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatMenuEntry {
    pub id: EntityId,
    pub label: String,
    pub depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Up,
    Down,
}

impl MenuTree {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a tree from root items, checking every invariant.
    pub fn new(roots: Vec<MenuItem>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        check_level(&roots, None, &mut seen)?;
        Ok(Self { roots })
    }

    pub fn roots(&self) -> &[MenuItem] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<MenuItem> {
        self.roots
    }

    pub fn len(&self) -> usize {
        self.visit().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn visit(&self) -> Visit<'_> {
        Visit::over(&self.roots)
    }

    /// Traversal of one subtree; `None` when `id` is unknown.
    pub fn visit_from(&self, id: &str) -> Option<Visit<'_>> {
        self.find(id).map(Visit::from_node)
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.visit().map(|v| v.node).find(|node| node.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn flatten(&self) -> Vec<FlatMenuEntry> {
        self.visit()
            .map(|v| FlatMenuEntry {
                id: v.node.id.clone(),
                label: v.node.label.clone(),
                depth: v.depth,
            })
            .collect()
    }

    /// `id` followed by every descendant id, in traversal order.
    /// Empty when `id` is unknown.
    pub fn subtree_ids(&self, id: &str) -> Vec<EntityId> {
        self.visit_from(id)
            .map(|visit| visit.map(|v| v.node.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Appends a new item under `draft.parent_id`, or as a root.
    pub fn add(&mut self, draft: MenuDraft) -> Result<EntityId, DomainError> {
        let draft = draft.normalized()?;

        let id = new_id();
        let item = MenuItem {
            id: id.clone(),
            label: draft.label,
            path: draft.path,
            icon: draft.icon,
            is_visible: draft.is_visible,
            parent_id: draft.parent_id,
            children: Vec::new(),
        };

        let parent_id = item.parent_id.clone();
        let siblings = self.siblings_mut(parent_id.as_deref())?;
        siblings.push(item);

        info!("Menu item added: {} (parent: {:?})", id, parent_id);
        Ok(id)
    }

    /// Rewrites label, path, icon and visibility. A changed parent moves the
    /// item (with its subtree) to the end of the new parent's children.
    pub fn update(&mut self, id: &str, draft: MenuDraft) -> Result<(), DomainError> {
        let draft = draft.normalized()?;

        let current_parent = self
            .find(id)
            .ok_or_else(|| DomainError::MenuNotFound(id.to_string()))?
            .parent_id
            .clone();

        if current_parent != draft.parent_id {
            self.reparent(id, draft.parent_id.as_deref())?;
        }

        let item = self
            .find_mut(id)
            .ok_or_else(|| DomainError::MenuNotFound(id.to_string()))?;
        item.label = draft.label;
        item.path = draft.path;
        item.icon = draft.icon;
        item.is_visible = draft.is_visible;

        info!("Menu item updated: {}", id);
        Ok(())
    }

    /// Detaches a single item. Its children are not deleted: they take its
    /// place under its former parent, in their existing order.
    pub fn remove(&mut self, id: &str) -> Result<MenuItem, DomainError> {
        let (mut item, position) = detach(&mut self.roots, id)
            .ok_or_else(|| DomainError::MenuNotFound(id.to_string()))?;

        let mut orphans = std::mem::take(&mut item.children);
        for orphan in orphans.iter_mut() {
            orphan.parent_id = item.parent_id.clone();
        }
        let promoted = orphans.len();

        let siblings = self.siblings_mut(item.parent_id.as_deref())?;
        for (offset, orphan) in orphans.into_iter().enumerate() {
            siblings.insert(position + offset, orphan);
        }

        info!("Menu item removed: {} ({} children promoted)", id, promoted);
        Ok(item)
    }

    /// Moves an item and its subtree under `new_parent` (or to the root level).
    pub fn reparent(&mut self, id: &str, new_parent: Option<&str>) -> Result<(), DomainError> {
        let current_parent = self
            .find(id)
            .ok_or_else(|| DomainError::MenuNotFound(id.to_string()))?
            .parent_id
            .clone();

        if let Some(parent_id) = new_parent {
            if !self.contains(parent_id) {
                return Err(DomainError::MenuNotFound(parent_id.to_string()));
            }
            if self.subtree_ids(id).iter().any(|sub| sub == parent_id) {
                return Err(DomainError::CycleDetected {
                    id: id.to_string(),
                    parent_id: parent_id.to_string(),
                });
            }
        }

        if current_parent.as_deref() == new_parent {
            return Ok(());
        }

        let (mut item, _) = detach(&mut self.roots, id)
            .ok_or_else(|| DomainError::MenuNotFound(id.to_string()))?;
        item.parent_id = new_parent.map(str::to_string);
        self.siblings_mut(new_parent)?.push(item);

        debug!("Menu item {} moved from {:?} to {:?}", id, current_parent, new_parent);
        Ok(())
    }

    /// Flips visibility and returns the new value.
    pub fn toggle_visibility(&mut self, id: &str) -> Result<bool, DomainError> {
        let item = self
            .find_mut(id)
            .ok_or_else(|| DomainError::MenuNotFound(id.to_string()))?;
        item.is_visible = !item.is_visible;
        Ok(item.is_visible)
    }

    /// Swaps an item with its previous or next sibling. No-op at either edge.
    pub fn shift(&mut self, id: &str, direction: ShiftDirection) -> Result<(), DomainError> {
        let parent_id = self
            .find(id)
            .ok_or_else(|| DomainError::MenuNotFound(id.to_string()))?
            .parent_id
            .clone();

        let siblings = self.siblings_mut(parent_id.as_deref())?;
        let position = siblings
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| DomainError::MenuNotFound(id.to_string()))?;

        match direction {
            ShiftDirection::Up if position > 0 => siblings.swap(position, position - 1),
            ShiftDirection::Down if position + 1 < siblings.len() => siblings.swap(position, position + 1),
            _ => {}
        }
        Ok(())
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        find_in_mut(&mut self.roots, id)
    }

    fn siblings_mut(&mut self, parent_id: Option<&str>) -> Result<&mut Vec<MenuItem>, DomainError> {
        match parent_id {
            None => Ok(&mut self.roots),
            Some(parent_id) => self
                .find_mut(parent_id)
                .map(|parent| &mut parent.children)
                .ok_or_else(|| DomainError::MenuNotFound(parent_id.to_string())),
        }
    }
}

fn check_level(
    items: &[MenuItem],
    parent_id: Option<&str>,
    seen: &mut HashSet<EntityId>,
) -> Result<(), DomainError> {
    for item in items {
        item.validate()?;
        if !seen.insert(item.id.clone()) {
            return Err(DomainError::DuplicateMenuId(item.id.clone()));
        }
        if item.parent_id.as_deref() != parent_id {
            return Err(DomainError::ParentMismatch {
                id: item.id.clone(),
                declared: item.parent_id.clone(),
                actual: parent_id.map(str::to_string),
            });
        }
        check_level(&item.children, Some(&item.id), seen)?;
    }
    Ok(())
}

fn find_in_mut<'a>(items: &'a mut [MenuItem], id: &str) -> Option<&'a mut MenuItem> {
    for item in items.iter_mut() {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_in_mut(&mut item.children, id) {
            return Some(found);
        }
    }
    None
}

fn detach(items: &mut Vec<MenuItem>, id: &str) -> Option<(MenuItem, usize)> {
    if let Some(position) = items.iter().position(|item| item.id == id) {
        return Some((items.remove(position), position));
    }
    for item in items.iter_mut() {
        if let Some(found) = detach(&mut item.children, id) {
            return Some(found);
        }
    }
    None
}
