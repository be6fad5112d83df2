//! Reference-counted node storage.
//!
//! Nodes live in a slot arena: a `Vec<Option<Slot>>` plus a free list of
//! recycled indices. Every slot carries an explicit reference count; a node
//! is destroyed exactly when its count reaches zero, and vacant slots must
//! never be touched again. Count bookkeeping mistakes are broken invariants
//! on the handle layer, so they fail loudly instead of being papered over.

use crate::node::{Node, object_map_with_capacity};

/// Handle to a slot in the node store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

struct Slot {
    node: Node,
    refs: u32,
}

pub struct NodeStore {
    slots: Vec<Option<Slot>>,
    free_list: Vec<usize>,
    live: usize,
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(64),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Allocate a node with a reference count of one. The caller owns that
    /// single reference and must hand it to a handle or `decref` it.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        let slot = Slot { node, refs: 1 };
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(slot);
            NodeId(idx)
        } else {
            let idx = self.slots.len();
            self.slots.push(Some(slot));
            NodeId(idx)
        }
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.slots[id.0]
            .as_ref()
            .expect("node was already released")
            .node
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id.0]
            .as_mut()
            .expect("node was already released")
            .node
    }

    /// Current reference count, mostly useful in tests and assertions.
    pub fn refs(&self, id: NodeId) -> u32 {
        self.slots[id.0]
            .as_ref()
            .expect("node was already released")
            .refs
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn incref(&mut self, id: NodeId) {
        let slot = self.slots[id.0]
            .as_mut()
            .expect("incref on a released node");
        slot.refs += 1;
    }

    /// Drop one reference. When a slot hits zero it is vacated and every
    /// child it referenced is decref'd in turn. Uses a worklist instead of
    /// recursion so arbitrarily deep trees cannot blow the stack.
    pub fn decref(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let slot = self.slots[id.0]
                .as_mut()
                .expect("decref on a released node");
            assert!(slot.refs > 0, "decref underflow on node {}", id.0);
            slot.refs -= 1;
            if slot.refs > 0 {
                continue;
            }
            let slot = self.slots[id.0].take().expect("slot vanished mid-decref");
            self.free_list.push(id.0);
            self.live -= 1;
            match slot.node {
                Node::Object(map) => pending.extend(map.into_values()),
                Node::Array(items) => pending.extend(items),
                _ => {}
            }
        }
    }

    /// Structural equality. Integer and real never compare equal, even for
    /// the same mathematical value.
    pub fn deep_equal(&self, a: NodeId, b: NodeId) -> bool {
        let mut pending = vec![(a, b)];
        while let Some((a, b)) = pending.pop() {
            if a == b {
                continue;
            }
            match (self.get(a), self.get(b)) {
                (Node::Object(x), Node::Object(y)) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    for (key, &va) in x {
                        match y.get(key) {
                            Some(&vb) => pending.push((va, vb)),
                            None => return false,
                        }
                    }
                }
                (Node::Array(x), Node::Array(y)) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    pending.extend(x.iter().copied().zip(y.iter().copied()));
                }
                (Node::String(x), Node::String(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Node::Integer(x), Node::Integer(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Node::Real(x), Node::Real(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Node::Bool(x), Node::Bool(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Node::Null, Node::Null) => {}
                _ => return false,
            }
        }
        true
    }

    /// Shallow copy: one level is cloned, nested containers are shared and
    /// gain one reference each. Returns an owned (refs = 1) node.
    pub fn copy(&mut self, id: NodeId) -> NodeId {
        let node = self.get(id).clone();
        match &node {
            Node::Object(map) => {
                let children: Vec<NodeId> = map.values().copied().collect();
                for child in children {
                    self.incref(child);
                }
            }
            Node::Array(items) => {
                let children = items.clone();
                for child in children {
                    self.incref(child);
                }
            }
            _ => {}
        }
        self.alloc(node)
    }

    /// Deep copy: the whole reachable tree is cloned, nothing is shared with
    /// the source. Returns an owned (refs = 1) node. Walks on an explicit
    /// stack like `decref`, so tree depth is not bounded by the call stack:
    /// containers are visited, their children copied in order, and the
    /// container assembled from the finished copies afterwards.
    pub fn deep_copy(&mut self, id: NodeId) -> NodeId {
        enum Step {
            Visit(NodeId),
            Assemble(NodeId),
        }
        let mut steps = vec![Step::Visit(id)];
        let mut built: Vec<NodeId> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(id) => match self.get(id) {
                    Node::Object(map) => {
                        let children: Vec<NodeId> = map.values().copied().collect();
                        steps.push(Step::Assemble(id));
                        steps.extend(children.into_iter().rev().map(Step::Visit));
                    }
                    Node::Array(items) => {
                        let children = items.clone();
                        steps.push(Step::Assemble(id));
                        steps.extend(children.into_iter().rev().map(Step::Visit));
                    }
                    other => {
                        let node = other.clone();
                        let copy = self.alloc(node);
                        built.push(copy);
                    }
                },
                Step::Assemble(id) => {
                    let node = match self.get(id) {
                        Node::Object(map) => {
                            let keys: Vec<String> = map.keys().cloned().collect();
                            let copies = built.split_off(built.len() - keys.len());
                            let mut out = object_map_with_capacity(keys.len());
                            for (key, copy) in keys.into_iter().zip(copies) {
                                out.insert(key, copy);
                            }
                            Node::Object(out)
                        }
                        Node::Array(items) => {
                            let copies = built.split_off(built.len() - items.len());
                            Node::Array(copies)
                        }
                        _ => unreachable!("only containers are assembled"),
                    };
                    let copy = self.alloc(node);
                    built.push(copy);
                }
            }
        }
        built.pop().expect("copy produces exactly one root")
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}
