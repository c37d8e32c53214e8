// ABOUTME: Arena-style tree helpers for self-referential taxonomies
// ABOUTME: Builds nested trees, collects subtrees and rejects reparenting that would form a cycle

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::entities::{equipment_category, measurement_type};
use crate::error::{Error, Result};

/// A row of a table whose rows point at a parent row of the same table.
pub trait TreeRow {
    const KIND: &'static str;

    fn id(&self) -> Uuid;
    fn parent_id(&self) -> Option<Uuid>;
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
}

impl TreeRow for equipment_category::Model {
    const KIND: &'static str = "equipment category";

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl TreeRow for measurement_type::Model {
    const KIND: &'static str = "measurement type";

    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.name == name)
    }
}

pub fn count_nodes(forest: &[TreeNode]) -> usize {
    forest.iter().map(TreeNode::count).sum()
}

struct Arena<'a, T> {
    by_id: HashMap<Uuid, &'a T>,
    children: HashMap<Option<Uuid>, Vec<&'a T>>,
}

impl<'a, T: TreeRow> Arena<'a, T> {
    fn new(rows: &'a [T]) -> Self {
        let mut by_id = HashMap::with_capacity(rows.len());
        let mut children: HashMap<Option<Uuid>, Vec<&'a T>> = HashMap::new();
        for row in rows {
            by_id.insert(row.id(), row);
            children.entry(row.parent_id()).or_default().push(row);
        }
        for siblings in children.values_mut() {
            siblings.sort_by(|a, b| a.name().cmp(b.name()));
        }
        Self { by_id, children }
    }

    fn build(&self, row: &T, seen: &mut HashSet<Uuid>) -> TreeNode {
        seen.insert(row.id());
        let children = self
            .children
            .get(&Some(row.id()))
            .map(|kids| {
                kids.iter()
                    .filter_map(|kid| {
                        if seen.contains(&kid.id()) {
                            None
                        } else {
                            Some(self.build(kid, seen))
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        TreeNode {
            id: row.id(),
            name: row.name().to_string(),
            description: row.description().map(str::to_string),
            children,
        }
    }
}

/// The subtree under `root`, or the forest of all parentless rows.
pub fn build_forest<T: TreeRow>(rows: &[T], root: Option<Uuid>) -> Result<Vec<TreeNode>> {
    let arena = Arena::new(rows);
    let mut seen = HashSet::new();

    match root {
        Some(id) => {
            let row = arena
                .by_id
                .get(&id)
                .ok_or_else(|| Error::NotFound(format!("{} {}", T::KIND, id)))?;
            Ok(vec![arena.build(row, &mut seen)])
        }
        None => Ok(arena
            .children
            .get(&None)
            .map(|roots| roots.iter().map(|row| arena.build(row, &mut seen)).collect())
            .unwrap_or_default()),
    }
}

/// Ids of `id` and everything below it.
pub fn subtree_ids<T: TreeRow>(rows: &[T], id: Uuid) -> Vec<Uuid> {
    let arena = Arena::new(rows);
    let mut collected = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![id];

    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        collected.push(current);
        if let Some(kids) = arena.children.get(&Some(current)) {
            stack.extend(kids.iter().map(|kid| kid.id()));
        }
    }
    collected
}

/// Fails with `Cycle` when `new_parent` is `node` or lies below it.
pub fn check_reparent<T: TreeRow>(rows: &[T], node: Uuid, new_parent: Option<Uuid>) -> Result<()> {
    let Some(parent) = new_parent else {
        return Ok(());
    };

    let arena = Arena::new(rows);
    if !arena.by_id.contains_key(&parent) {
        return Err(Error::NotFound(format!("{} {}", T::KIND, parent)));
    }

    let mut walked = HashSet::new();
    let mut cursor = Some(parent);
    while let Some(current) = cursor {
        if current == node {
            return Err(Error::Cycle { node, parent });
        }
        if !walked.insert(current) {
            break;
        }
        cursor = arena.by_id.get(&current).and_then(|row| row.parent_id());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, parent: Option<Uuid>) -> equipment_category::Model {
        equipment_category::Model {
            id: Uuid::new_v4(),
            parent_id: parent,
            name: name.to_string(),
            description: None,
            session_id: Uuid::nil(),
            created_at: 0,
        }
    }

    fn chain() -> Vec<equipment_category::Model> {
        let a = category("A", None);
        let b = category("B", Some(a.id));
        let c = category("C", Some(b.id));
        vec![c, a, b]
    }

    #[test]
    fn test_forest_nests_children() {
        let rows = chain();
        let forest = build_forest(&rows, None).unwrap();

        assert_eq!(forest.len(), 1);
        let a = &forest[0];
        assert_eq!(a.name, "A");
        let b = a.child("B").unwrap();
        assert!(b.child("C").is_some());
        assert_eq!(count_nodes(&forest), 3);
    }

    #[test]
    fn test_subtree_from_inner_root() {
        let rows = chain();
        let b_id = rows.iter().find(|row| row.name == "B").unwrap().id;
        let forest = build_forest(&rows, Some(b_id)).unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "B");
        assert_eq!(forest[0].count(), 2);
    }

    #[test]
    fn test_unknown_root_is_not_found() {
        let rows = chain();
        let result = build_forest(&rows, Some(Uuid::new_v4()));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_siblings_sorted_by_name() {
        let root = category("Instruments", None);
        let rows = vec![
            category("Spectrometers", Some(root.id)),
            category("Lasers", Some(root.id)),
            category("Detectors", Some(root.id)),
            root,
        ];
        let forest = build_forest(&rows, None).unwrap();
        let names: Vec<&str> = forest[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Detectors", "Lasers", "Spectrometers"]);
    }

    #[test]
    fn test_subtree_ids_include_all_descendants() {
        let rows = chain();
        let a_id = rows.iter().find(|row| row.name == "A").unwrap().id;
        let c_id = rows.iter().find(|row| row.name == "C").unwrap().id;

        assert_eq!(subtree_ids(&rows, a_id).len(), 3);
        assert_eq!(subtree_ids(&rows, c_id), vec![c_id]);
    }

    #[test]
    fn test_reparent_under_descendant_is_cycle() {
        let rows = chain();
        let a_id = rows.iter().find(|row| row.name == "A").unwrap().id;
        let c_id = rows.iter().find(|row| row.name == "C").unwrap().id;

        assert!(matches!(
            check_reparent(&rows, a_id, Some(c_id)),
            Err(Error::Cycle { .. })
        ));
        assert!(matches!(
            check_reparent(&rows, a_id, Some(a_id)),
            Err(Error::Cycle { .. })
        ));
    }

    #[test]
    fn test_reparent_elsewhere_is_allowed() {
        let mut rows = chain();
        let other = category("Other", None);
        let other_id = other.id;
        rows.push(other);
        let b_id = rows.iter().find(|row| row.name == "B").unwrap().id;

        assert!(check_reparent(&rows, b_id, Some(other_id)).is_ok());
        assert!(check_reparent(&rows, b_id, None).is_ok());
    }
}
