//! Union-find (disjoint set union) keyed by node id.
//!
//! The step generator processes edges in non-decreasing weight order and uses
//! this structure to decide whether an edge would close a cycle. Node ids are
//! mapped to dense indices once; `find` compresses paths iteratively and
//! `union` attaches by rank.

use std::collections::HashMap;

use crate::{error::StepperError, graph::NodeId};

/// Disjoint sets over a fixed collection of node ids.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    parent: Vec<usize>,
    rank: Vec<u32>,
    components: usize,
}

impl DisjointSet {
    /// Creates one singleton set of rank 0 per distinct node id.
    ///
    /// Repeated ids keep their first position.
    ///
    /// # Errors
    /// Returns [`StepperError::InvalidGraph`] when `node_ids` is empty.
    ///
    /// # Examples
    /// ```
    /// use spanstep_core::DisjointSet;
    ///
    /// let mut dsu = DisjointSet::new(["A", "B", "C"]).expect("nodes are present");
    /// assert!(dsu.union("A", "B").expect("known nodes"));
    /// assert!(!dsu.union("B", "A").expect("known nodes"));
    /// assert_eq!(dsu.component_count(), 2);
    /// ```
    pub fn new<I>(node_ids: I) -> Result<Self, StepperError>
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        let mut ids = Vec::new();
        let mut index = HashMap::new();
        for raw in node_ids {
            let id = raw.into();
            if index.contains_key(&id) {
                continue;
            }
            index.insert(id.clone(), ids.len());
            ids.push(id);
        }

        if ids.is_empty() {
            return Err(StepperError::InvalidGraph);
        }

        let len = ids.len();
        Ok(Self {
            ids,
            index,
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        })
    }

    /// Returns the number of tracked nodes.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.ids.len() }

    /// Returns `true` when no nodes are tracked.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Returns the number of disjoint sets.
    #[must_use]
    #[rustfmt::skip]
    pub const fn component_count(&self) -> usize { self.components }

    /// Returns the representative of `node`'s set, compressing the path.
    ///
    /// # Errors
    /// Returns [`StepperError::UnknownNode`] when `node` is not tracked.
    pub fn find(&mut self, node: &str) -> Result<NodeId, StepperError> {
        let position = self.position(node)?;
        let root = self.find_index(position);
        Ok(self.ids[root].clone())
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `false` without touching the structure when both already share
    /// a root. On a rank tie `right`'s root is attached under `left`'s root.
    ///
    /// # Errors
    /// Returns [`StepperError::UnknownNode`] when either id is not tracked.
    pub fn union(&mut self, left: &str, right: &str) -> Result<bool, StepperError> {
        let left_pos = self.position(left)?;
        let right_pos = self.position(right)?;
        let mut left_root = self.find_index(left_pos);
        let mut right_root = self.find_index(right_pos);
        if left_root == right_root {
            return Ok(false);
        }

        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        if left_rank < right_rank {
            std::mem::swap(&mut left_root, &mut right_root);
        }
        self.parent[right_root] = left_root;
        if left_rank == right_rank {
            self.rank[left_root] = left_rank.saturating_add(1);
        }
        self.components = self.components.saturating_sub(1);
        Ok(true)
    }

    /// Returns `true` when both nodes currently share a representative.
    ///
    /// # Errors
    /// Returns [`StepperError::UnknownNode`] when either id is not tracked.
    pub fn connected(&mut self, left: &str, right: &str) -> Result<bool, StepperError> {
        let left_pos = self.position(left)?;
        let right_pos = self.position(right)?;
        Ok(self.find_index(left_pos) == self.find_index(right_pos))
    }

    /// Copies the current parent and rank of every node, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> DsuSnapshot {
        let entries = self
            .ids
            .iter()
            .zip(self.parent.iter().zip(&self.rank))
            .map(|(node, (&parent, &rank))| DsuEntry {
                node: node.clone(),
                parent: self.ids[parent].clone(),
                rank,
            })
            .collect();
        DsuSnapshot { entries }
    }

    fn position(&self, node: &str) -> Result<usize, StepperError> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| StepperError::UnknownNode {
                node: NodeId::from(node),
            })
    }

    fn find_index(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }
}

/// Parent and rank of a single node at the time a snapshot was taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DsuEntry {
    node: NodeId,
    parent: NodeId,
    rank: u32,
}

impl DsuEntry {
    /// Returns the node this entry describes.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node(&self) -> &NodeId { &self.node }

    /// Returns the node's parent pointer.
    #[must_use]
    #[rustfmt::skip]
    pub const fn parent(&self) -> &NodeId { &self.parent }

    /// Returns the node's rank.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rank(&self) -> u32 { self.rank }
}

/// Independent copy of a [`DisjointSet`]'s parent and rank mappings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DsuSnapshot {
    entries: Vec<DsuEntry>,
}

impl DsuSnapshot {
    /// Returns every entry in node insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn entries(&self) -> &[DsuEntry] { &self.entries }

    /// Returns the recorded parent of `node`.
    #[must_use]
    pub fn parent_of(&self, node: &str) -> Option<&NodeId> {
        self.entry(node).map(DsuEntry::parent)
    }

    /// Returns the recorded rank of `node`.
    #[must_use]
    pub fn rank_of(&self, node: &str) -> Option<u32> {
        self.entry(node).map(DsuEntry::rank)
    }

    /// Renders the parents as `A->A, B->A, ...` in insertion order.
    ///
    /// # Examples
    /// ```
    /// use spanstep_core::DisjointSet;
    ///
    /// let mut dsu = DisjointSet::new(["A", "B"]).expect("nodes are present");
    /// dsu.union("A", "B").expect("known nodes");
    /// assert_eq!(dsu.snapshot().compact(), "A->A, B->A");
    /// ```
    #[must_use]
    pub fn compact(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}->{}", entry.node, entry.parent))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn entry(&self, node: &str) -> Option<&DsuEntry> {
        self.entries
            .iter()
            .find(|entry| entry.node.as_str() == node)
    }
}
