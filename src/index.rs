//! Generational node indices.
//!
//! Links between nodes are indices into an [`Arena`](crate::arena::Arena)
//! rather than pointers. Each index carries the generation of its slot at
//! insertion time, so an index held past its node's removal misses cleanly
//! instead of aliasing whatever reuses the slot.

/// Index of a node in an arena, tagged with its slot's generation.
///
/// `NodeId::NONE` is the sentinel for "no node" (empty link, empty list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId {
    slot: u32,
    generation: u32,
}

impl NodeId {
    /// Sentinel value representing "no node".
    pub(crate) const NONE: NodeId = NodeId {
        slot: u32::MAX,
        generation: 0,
    };

    #[inline]
    pub(crate) fn new(slot: usize, generation: u32) -> Self {
        debug_assert!(slot < u32::MAX as usize, "arena slot exceeds u32 range");
        NodeId {
            slot: slot as u32,
            generation,
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.slot as usize
    }

    #[inline]
    pub(crate) fn generation(self) -> u32 {
        self.generation
    }

    /// Returns `true` if this is the sentinel value.
    #[inline]
    pub(crate) fn is_none(self) -> bool {
        self.slot == u32::MAX
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    pub(crate) fn is_some(self) -> bool {
        !self.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());

        let id = NodeId::new(3, 7);
        assert!(id.is_some());
        assert_eq!(id.slot(), 3);
        assert_eq!(id.generation(), 7);
    }
}
