use crate::interval::Interval;

/// The stable identity of an interval: its position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// The sentinel parent of all top-level intervals.
    ///
    /// Never addresses a [`Node`] and never appears in query results.
    pub(crate) const ROOT: Self = Self(u32::MAX);

    /// The number of ids that can address a [`Node`].
    pub(crate) const MAX_NODES: usize = u32::MAX as usize;

    pub(crate) fn new(idx: usize) -> Self {
        debug_assert!(idx < Self::MAX_NODES);
        Self(idx as u32)
    }

    pub(crate) fn is_root(self) -> bool {
        self == Self::ROOT
    }

    pub(crate) fn idx(self) -> usize {
        debug_assert!(!self.is_root());
        self.0 as usize
    }
}

/// An arena record wrapping a single input [`Interval`] and the links
/// established when the index is built.
///
/// Links are written once during the build and are read-only afterwards.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    interval: Interval<T>,

    /// The nearest enclosing interval still open when this interval closed,
    /// or [`NodeId::ROOT`].
    ///
    /// [`None`] for intervals held only in a smaller chain.
    pub(crate) parent: Option<NodeId>,

    /// The child of `parent` closed immediately before this interval.
    pub(crate) left_sibling: Option<NodeId>,

    /// The most recently closed child of this interval.
    pub(crate) last_child: Option<NodeId>,

    /// The next interval sharing this start bound, by non-increasing end.
    pub(crate) next_smaller: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(interval: Interval<T>) -> Self {
        Self {
            interval,
            parent: None,
            left_sibling: None,
            last_child: None,
            next_smaller: None,
        }
    }

    pub(crate) fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    pub(crate) fn start(&self) -> u16 {
        self.interval.start()
    }

    pub(crate) fn end(&self) -> u16 {
        self.interval.end()
    }

    pub(crate) fn stabs(&self, q: u16) -> bool {
        self.interval.stabs(q)
    }
}
