use core::fmt;

use crate::core::ChunkList;

/// Diagnostic chain dump: each node's element count and contents in chain
/// order, with running global indices. For debugging; the format is not part
/// of the data contract.
impl<T: fmt::Display, const N: usize> fmt::Display for ChunkList<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut index = 0;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = &self.arena[id];
            writeln!(f, "node (count {})", node.count())?;
            for elem in &node.elems {
                writeln!(f, "{index} -> {elem}")?;
                index += 1;
            }
            writeln!(f, "-----------")?;
            cursor = node.next;
        }
        Ok(())
    }
}
