use alloc::vec::Vec;

/// Stable handle to a node slot in the container's arena.
pub(crate) type NodeId = usize;

/// A fixed-capacity storage segment in the node chain.
///
/// Elements occupy `elems[0..count]` contiguously; the node never holds more
/// than the container's per-node capacity. The `next` link is the owning
/// direction of the chain; `prev` is a back-reference used only for local
/// relinking during split, merge, and erase.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) elems: Vec<T>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            elems: Vec::with_capacity(capacity),
            prev: None,
            next: None,
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.elems.len()
    }
}
