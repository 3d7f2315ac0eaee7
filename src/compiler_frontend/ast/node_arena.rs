//! Storage for every node of an orchestra tree.
//!
//! Nodes are addressed by [`NodeId`], an index plus a generation. Taking or
//! releasing a node bumps its slot's generation, so an id that outlived its
//! node can never resolve to whatever is stored in that slot later.

use crate::compiler_frontend::ast::ast_nodes::Node;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::return_compiler_error;
use crate::settings::NODE_ARENA_INITIAL_CAPACITY;
use serde::Serialize;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Clone)]
pub struct NodeArena {
    slots: Vec<Slot>,

    // Vacant slot indices ready for reuse
    free: Vec<u32>,
    live: usize,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::with_capacity(NODE_ARENA_INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Store a node and return its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });

        NodeId {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Detach a node from the arena and hand back its contents.
    /// Its children are not touched, the caller now owns them through the returned node.
    pub fn take(&mut self, id: NodeId) -> Node {
        let Some(node) = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.take())
        else {
            panic!("{id} was taken from the arena after it had already been released");
        };

        let slot = &mut self.slots[id.index()];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;

        node
    }

    /// Release a node and everything reachable from it.
    pub fn release_tree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let node = self.take(next);
            pending.extend(node.children());
        }
    }

    /// Number of nodes currently stored.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Walk every node reachable from `roots` and count them.
    ///
    /// Fails if any reachable id has been released or is reachable twice,
    /// which would mean a pass broke the single-owner discipline.
    pub fn count_reachable(&self, roots: &[NodeId]) -> Result<usize, CompilerError> {
        let mut visited = vec![false; self.slots.len()];
        let mut pending: Vec<NodeId> = roots.to_vec();
        let mut count = 0;

        while let Some(id) = pending.pop() {
            let Some(node) = self.get(id) else {
                return_compiler_error!(format!("{id} is reachable after being released") ; {
                    CompilationStage => "Optimizer",
                });
            };

            if visited[id.index()] {
                return_compiler_error!(format!("{id} is owned by more than one parent") ; {
                    CompilationStage => "Optimizer",
                });
            }

            visited[id.index()] = true;
            count += 1;
            pending.extend(node.children());
        }

        Ok(count)
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("{id} was used after being released"),
        }
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("{id} was used after being released"),
        }
    }
}
