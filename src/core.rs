use core::mem;

use alloc::vec::Vec;

use crate::error::ChunkListError;
use crate::node::{Node, NodeId};

/// An indexable sequence container backed by a chain of fixed-capacity nodes.
///
/// `N` is the per-node capacity, fixed for the container's lifetime. Nodes
/// live in an arena owned by the container and are addressed by stable slot
/// handles; the chain links (`next` owning, `prev` non-owning) thread through
/// the arena. Emptied slots are recycled through a free list.
#[derive(Debug, Clone)]
pub struct ChunkList<T, const N: usize> {
    pub(crate) arena: Vec<Node<T>>,
    free: Vec<NodeId>,
    pub(crate) head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
    node_count: usize,
}

impl<T, const N: usize> Default for ChunkList<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> ChunkList<T, N> {
    /// Creates an empty `ChunkList`.
    ///
    /// The per-node capacity `N` must be at least 1; this is checked at
    /// compile time.
    #[must_use]
    pub fn new() -> Self {
        const { assert!(N > 0, "per-node capacity must be at least 1") };
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            node_count: 0,
        }
    }

    /// Total number of elements (not nodes) in the list. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes currently in the chain. Diagnostic.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// The fixed per-node capacity `N`.
    #[must_use]
    pub const fn capacity_per_node(&self) -> usize {
        N
    }

    /// Inserts `value` before position `index`, shifting later elements right.
    ///
    /// `index == len()` appends; `index == 0` prepends. If the target node is
    /// full it is split first and the offset re-resolved against the halves.
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::IndexOutOfBounds` if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ChunkListError> {
        if index > self.len {
            return Err(ChunkListError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        if index == self.len {
            self.push_back(value);
            return Ok(());
        }
        if index == 0 {
            self.push_front(value);
            return Ok(());
        }

        let (mut id, mut offset) = self.locate(index)?;
        if self.arena[id].count() == N {
            let right = self.split_node(id);
            let lower = self.arena[id].count();
            if offset > lower {
                id = right;
                offset -= lower;
            }
        }
        self.arena[id].elems.insert(offset, value);
        self.len += 1;
        Ok(())
    }

    /// Appends `value` at the end of the sequence. O(1) amortized.
    pub fn push_back(&mut self, value: T) {
        let tail = match self.tail {
            None => self.bootstrap(),
            Some(t) if self.arena[t].count() == N => {
                if N == 1 {
                    // Splitting a capacity-1 node leaves both halves with no
                    // free slot, so link a fresh node instead.
                    let fresh = self.alloc_node();
                    self.link_after(t, fresh);
                    fresh
                } else {
                    self.split_node(t)
                }
            }
            Some(t) => t,
        };
        self.arena[tail].elems.push(value);
        self.len += 1;
    }

    /// Prepends `value` at the front of the sequence. O(1) amortized.
    pub fn push_front(&mut self, value: T) {
        let head = match self.head {
            None => self.bootstrap(),
            Some(h) if self.arena[h].count() == N => {
                // The head keeps the lower half; the upper half moves to the
                // new successor. Tail is retargeted when head was also tail.
                self.split_node(h);
                h
            }
            Some(h) => h,
        };
        self.arena[head].elems.insert(0, value);
        self.len += 1;
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// left. Nodes emptied by the removal are freed; nodes left under the
    /// occupancy minimum are rebalanced against a neighbor.
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::IndexOutOfBounds` if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T, ChunkListError> {
        if index >= self.len {
            return Err(ChunkListError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        let (id, offset) = self.locate(index)?;
        let value = self.arena[id].elems.remove(offset);
        self.len -= 1;
        self.settle_after_removal(id);
        Ok(value)
    }

    /// Removes and returns the last element. O(1) amortized.
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::Empty` if the list has no elements.
    pub fn pop_back(&mut self) -> Result<T, ChunkListError> {
        let tail = self.tail.ok_or(ChunkListError::Empty {
            operation: "pop_back",
        })?;
        let value = self.arena[tail]
            .elems
            .pop()
            .ok_or(ChunkListError::CorruptChain {
                reason: "tail node holds no elements",
            })?;
        self.len -= 1;
        self.settle_after_removal(tail);
        Ok(value)
    }

    /// Removes and returns the first element. O(1) amortized.
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::Empty` if the list has no elements.
    pub fn pop_front(&mut self) -> Result<T, ChunkListError> {
        let head = self.head.ok_or(ChunkListError::Empty {
            operation: "pop_front",
        })?;
        if self.arena[head].elems.is_empty() {
            return Err(ChunkListError::CorruptChain {
                reason: "head node holds no elements",
            });
        }
        let value = self.arena[head].elems.remove(0);
        self.len -= 1;
        self.settle_after_removal(head);
        Ok(value)
    }

    /// Gets a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::IndexOutOfBounds` if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, ChunkListError> {
        if index >= self.len {
            return Err(ChunkListError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        let (id, offset) = self.locate(index)?;
        Ok(&self.arena[id].elems[offset])
    }

    /// Gets a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::IndexOutOfBounds` if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ChunkListError> {
        if index >= self.len {
            return Err(ChunkListError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        let (id, offset) = self.locate(index)?;
        Ok(&mut self.arena[id].elems[offset])
    }

    /// Reference to the first element. O(1).
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::Empty` if the list has no elements.
    pub fn front(&self) -> Result<&T, ChunkListError> {
        let head = self.head.ok_or(ChunkListError::Empty { operation: "front" })?;
        self.arena[head]
            .elems
            .first()
            .ok_or(ChunkListError::CorruptChain {
                reason: "head node holds no elements",
            })
    }

    /// Mutable reference to the first element. O(1).
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::Empty` if the list has no elements.
    pub fn front_mut(&mut self) -> Result<&mut T, ChunkListError> {
        let head = self.head.ok_or(ChunkListError::Empty { operation: "front" })?;
        self.arena[head]
            .elems
            .first_mut()
            .ok_or(ChunkListError::CorruptChain {
                reason: "head node holds no elements",
            })
    }

    /// Reference to the last element. O(1).
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::Empty` if the list has no elements.
    pub fn back(&self) -> Result<&T, ChunkListError> {
        let tail = self.tail.ok_or(ChunkListError::Empty { operation: "back" })?;
        self.arena[tail]
            .elems
            .last()
            .ok_or(ChunkListError::CorruptChain {
                reason: "tail node holds no elements",
            })
    }

    /// Mutable reference to the last element. O(1).
    ///
    /// # Errors
    ///
    /// Returns `ChunkListError::Empty` if the list has no elements.
    pub fn back_mut(&mut self) -> Result<&mut T, ChunkListError> {
        let tail = self.tail.ok_or(ChunkListError::Empty { operation: "back" })?;
        self.arena[tail]
            .elems
            .last_mut()
            .ok_or(ChunkListError::CorruptChain {
                reason: "tail node holds no elements",
            })
    }

    /// Removes every element and node, restoring the empty state.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.node_count = 0;
    }

    /// Reflows all elements toward the head so that every node except
    /// possibly the last holds exactly `N` elements, freeing nodes emptied by
    /// the reflow. The logical sequence is unchanged. Idempotent.
    pub fn compact(&mut self) {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            while self.arena[id].count() < N {
                let Some(next) = self.arena[id].next else {
                    break;
                };
                let room = N - self.arena[id].count();
                let mut donor = mem::take(&mut self.arena[next].elems);
                let moved = room.min(donor.len());
                self.arena[id].elems.extend(donor.drain(..moved));
                self.arena[next].elems = donor;
                if self.arena[next].elems.is_empty() {
                    self.unlink(next);
                    self.free_node(next);
                }
            }
            cursor = self.arena[id].next;
        }
    }

    // --- locator ---

    /// Maps a global index to (node, local offset) by walking the chain and
    /// accumulating real per-node counts. Splits and merges leave nodes with
    /// unequal counts, so a stride-division shortcut over the nominal
    /// capacity would resolve the wrong node.
    fn locate(&self, index: usize) -> Result<(NodeId, usize), ChunkListError> {
        debug_assert!(index < self.len);
        let mut cumulative = 0;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let count = self.arena[id].count();
            if index < cumulative + count {
                return Ok((id, index - cumulative));
            }
            cumulative += count;
            cursor = self.arena[id].next;
        }
        Err(ChunkListError::CorruptChain {
            reason: "cached length disagrees with chain contents",
        })
    }

    // --- chain surgery ---

    /// Allocates a node slot, reusing a freed one when available.
    fn alloc_node(&mut self) -> NodeId {
        self.node_count += 1;
        if let Some(id) = self.free.pop() {
            id
        } else {
            self.arena.push(Node::with_capacity(N));
            self.arena.len() - 1
        }
    }

    /// Returns an unlinked, emptied node slot to the free list.
    fn free_node(&mut self, id: NodeId) {
        debug_assert!(self.arena[id].elems.is_empty());
        self.arena[id].prev = None;
        self.arena[id].next = None;
        self.node_count -= 1;
        self.free.push(id);
    }

    /// Creates the first node of an empty chain.
    fn bootstrap(&mut self) -> NodeId {
        let id = self.alloc_node();
        self.head = Some(id);
        self.tail = Some(id);
        id
    }

    /// Links `new_id` into the chain immediately after `id`, fixing the old
    /// successor's back-reference or retargeting the tail.
    fn link_after(&mut self, id: NodeId, new_id: NodeId) {
        let old_next = self.arena[id].next;
        self.arena[new_id].prev = Some(id);
        self.arena[new_id].next = old_next;
        self.arena[id].next = Some(new_id);
        match old_next {
            Some(n) => self.arena[n].prev = Some(new_id),
            None => self.tail = Some(new_id),
        }
    }

    /// Detaches `id` from the chain, updating head/tail as needed. The slot
    /// itself is not freed.
    fn unlink(&mut self, id: NodeId) {
        let prev = self.arena[id].prev;
        let next = self.arena[id].next;
        match prev {
            Some(p) => self.arena[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.arena[n].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Relieves a full node: a new successor receives the upper
    /// `N - N / 2` elements, order preserved. Returns the new node.
    fn split_node(&mut self, id: NodeId) -> NodeId {
        debug_assert_eq!(self.arena[id].count(), N);
        let new_id = self.alloc_node();
        self.link_after(id, new_id);
        let upper = self.arena[id].elems.split_off(N / 2);
        self.arena[new_id].elems = upper;
        new_id
    }

    /// Frees the node if the removal emptied it, otherwise restores the
    /// occupancy invariant.
    fn settle_after_removal(&mut self, id: NodeId) {
        if self.arena[id].elems.is_empty() {
            self.unlink(id);
            self.free_node(id);
        } else {
            self.rebalance(id);
        }
    }

    /// Restores occupancy after a removal left `id` under the minimum
    /// (`N / 2`; the sole remaining node is exempt). Merges with a neighbor
    /// when the combined count fits in one node, otherwise borrows a single
    /// element from the fuller neighbor. Two adjacent nodes whose combined
    /// count fits in one node are never both left underfull.
    fn rebalance(&mut self, id: NodeId) {
        let count = self.arena[id].count();
        if count >= N / 2 {
            return;
        }
        let prev = self.arena[id].prev;
        let next = self.arena[id].next;

        if let Some(n) = next {
            if count + self.arena[n].count() <= N {
                self.merge_into(id, n);
                return;
            }
        }
        if let Some(p) = prev {
            if self.arena[p].count() + count <= N {
                self.merge_into(p, id);
                return;
            }
        }
        // Both neighbors too full to merge with; take one element from the
        // fuller side. The donor stays at or above the minimum because the
        // merge check already failed against it.
        match (prev, next) {
            (Some(p), Some(n)) => {
                if self.arena[p].count() >= self.arena[n].count() {
                    self.borrow_from_prev(id, p);
                } else {
                    self.borrow_from_next(id, n);
                }
            }
            (Some(p), None) => self.borrow_from_prev(id, p),
            (None, Some(n)) => self.borrow_from_next(id, n),
            (None, None) => {} // sole node, exempt from the minimum
        }
    }

    /// Appends all of `src`'s elements to `dst` (which precedes it in the
    /// chain), then unlinks and frees `src`.
    fn merge_into(&mut self, dst: NodeId, src: NodeId) {
        debug_assert_eq!(self.arena[dst].next, Some(src));
        debug_assert!(self.arena[dst].count() + self.arena[src].count() <= N);
        let mut moved = mem::take(&mut self.arena[src].elems);
        self.arena[dst].elems.append(&mut moved);
        self.arena[src].elems = moved;
        self.unlink(src);
        self.free_node(src);
    }

    fn borrow_from_prev(&mut self, id: NodeId, donor: NodeId) {
        if let Some(value) = self.arena[donor].elems.pop() {
            self.arena[id].elems.insert(0, value);
        }
    }

    fn borrow_from_next(&mut self, id: NodeId, donor: NodeId) {
        if self.arena[donor].elems.is_empty() {
            return;
        }
        let value = self.arena[donor].elems.remove(0);
        self.arena[id].elems.push(value);
    }
}

impl<T: PartialEq, const N: usize> ChunkList<T, N> {
    /// Returns the global index of the first element equal to `value`, or
    /// `len()` when there is no match. The sentinel is an "absent" result,
    /// not an error.
    #[must_use]
    pub fn find(&self, value: &T) -> usize {
        let mut index = 0;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            for (offset, elem) in self.arena[id].elems.iter().enumerate() {
                if elem == value {
                    return index + offset;
                }
            }
            index += self.arena[id].count();
            cursor = self.arena[id].next;
        }
        self.len
    }
}

impl<T, const N: usize> core::ops::Index<usize> for ChunkList<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(_) => panic!(
                "Index {} out of bounds for list of length {}",
                index, self.len
            ),
        }
    }
}

impl<T, const N: usize> core::ops::IndexMut<usize> for ChunkList<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let length = self.len;
        match self.get_mut(index) {
            Ok(value) => value,
            Err(_) => panic!("Index {} out of bounds for list of length {}", index, length),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    /// Walks the chain and checks every invariant the public operations must
    /// restore before returning.
    fn check_invariants<T, const N: usize>(list: &ChunkList<T, N>) {
        assert_eq!(list.head.is_none(), list.tail.is_none());
        assert_eq!(list.head.is_none(), list.len == 0);

        let mut total = 0;
        let mut nodes = 0;
        let mut prev: Option<NodeId> = None;
        let mut cursor = list.head;
        while let Some(id) = cursor {
            let node = &list.arena[id];
            assert_eq!(node.prev, prev, "prev link out of sync");
            assert!(node.count() >= 1, "empty node left in chain");
            assert!(node.count() <= N, "node over capacity");
            total += node.count();
            nodes += 1;
            assert!(nodes <= list.arena.len(), "cycle in chain");
            prev = Some(id);
            cursor = node.next;
        }
        assert_eq!(prev, list.tail);
        assert_eq!(total, list.len, "cached length out of sync");
        assert_eq!(nodes, list.node_count, "cached node count out of sync");
    }

    fn contents<const N: usize>(list: &ChunkList<u32, N>) -> Vec<u32> {
        (0..list.len()).map(|i| list[i]).collect()
    }

    #[test]
    fn push_back_splits_full_tail() {
        let mut list: ChunkList<u32, 4> = ChunkList::new();
        for v in 0..9 {
            list.push_back(v);
            check_invariants(&list);
        }
        assert_eq!(contents(&list), (0..9).collect::<Vec<_>>());
        assert!(list.node_count() >= 3);
    }

    #[test]
    fn push_front_keeps_lower_half_in_head() {
        let mut list: ChunkList<u32, 4> = ChunkList::new();
        for v in 0..8 {
            list.push_front(v);
            check_invariants(&list);
        }
        assert_eq!(contents(&list), vec![7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn insert_into_full_node_resolves_half() {
        let mut list: ChunkList<u32, 4> = ChunkList::new();
        for v in [0, 1, 2, 3] {
            list.push_back(v);
        }
        // Offsets on both sides of the split boundary of a full node.
        list.insert(1, 10).unwrap();
        check_invariants(&list);
        list.insert(4, 11).unwrap();
        check_invariants(&list);
        assert_eq!(contents(&list), vec![0, 10, 1, 2, 11, 3]);
    }

    #[test]
    fn remove_merges_underfull_neighbors() {
        let mut list: ChunkList<u32, 4> = ChunkList::new();
        for v in 0..8 {
            list.push_back(v);
        }
        for _ in 0..6 {
            list.remove(1).unwrap();
            check_invariants(&list);
        }
        assert_eq!(contents(&list), vec![0, 7]);
        assert_eq!(list.node_count(), 1);
    }

    #[test]
    fn rebalance_borrows_when_merge_does_not_fit() {
        let mut list: ChunkList<u32, 6> = ChunkList::new();
        for v in 0..18 {
            list.push_back(v);
        }
        list.compact();
        // Middle node shrinks below the minimum while both neighbors stay
        // full, forcing the borrow path.
        for _ in 0..5 {
            list.remove(6).unwrap();
            check_invariants(&list);
        }
        assert_eq!(
            contents(&list),
            vec![0, 1, 2, 3, 4, 5, 11, 12, 13, 14, 15, 16, 17]
        );
    }

    #[test]
    fn capacity_one_chain() {
        let mut list: ChunkList<u32, 1> = ChunkList::new();
        for v in 0..5 {
            list.push_back(v);
            check_invariants(&list);
        }
        list.push_front(100);
        check_invariants(&list);
        list.insert(3, 200).unwrap();
        check_invariants(&list);
        assert_eq!(contents(&list), vec![100, 0, 1, 200, 2, 3, 4]);
        assert_eq!(list.node_count(), 7);
        while !list.is_empty() {
            list.pop_back().unwrap();
            check_invariants(&list);
        }
        assert_eq!(list.node_count(), 0);
    }

    #[test]
    fn compact_packs_all_but_last_node() {
        let mut list: ChunkList<u32, 4> = ChunkList::new();
        for v in 0..16 {
            list.push_back(v);
        }
        // Fragment the chain.
        for i in (0..16).step_by(3).rev() {
            list.remove(i).unwrap();
        }
        let before = contents(&list);
        list.compact();
        check_invariants(&list);
        assert_eq!(contents(&list), before);

        let mut cursor = list.head;
        while let Some(id) = cursor {
            let node = &list.arena[id];
            if node.next.is_some() {
                assert_eq!(node.count(), 4);
            }
            cursor = node.next;
        }

        let shape = list.node_count();
        list.compact();
        check_invariants(&list);
        assert_eq!(list.node_count(), shape);
        assert_eq!(contents(&list), before);
    }

    #[test]
    fn freed_slots_are_recycled() {
        let mut list: ChunkList<u32, 4> = ChunkList::new();
        for v in 0..12 {
            list.push_back(v);
        }
        let slots = list.arena.len();
        while list.len() > 1 {
            list.pop_back().unwrap();
        }
        for v in 0..11 {
            list.push_back(v);
        }
        check_invariants(&list);
        assert_eq!(list.arena.len(), slots);
    }
}
