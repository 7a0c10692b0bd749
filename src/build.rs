use std::cmp::Reverse;

use log::debug;

use crate::{
    error::{Error, Result},
    interval::{Interval, Tag},
    node::{Node, NodeId},
};

/// The linked interval arena and per-coordinate start table produced by a
/// single sweep over the domain.
#[derive(Debug)]
pub(crate) struct Tree<T> {
    /// All input intervals, indexed by [`NodeId`] (their input position).
    pub(crate) nodes: Vec<Node<T>>,

    /// The innermost open interval at each coordinate in `0..=domain_max`.
    pub(crate) starts: Vec<Option<NodeId>>,
}

/// Validate `intervals` and build the [`Tree`] over `0..=domain_max`.
///
/// The first invalid interval aborts the build.
pub(crate) fn build<T, I>(intervals: I, domain_max: u16) -> Result<Tree<T>>
where
    T: Tag,
    I: IntoIterator<Item = Interval<T>>,
{
    let intervals = intervals.into_iter();
    let mut nodes = Vec::with_capacity(intervals.size_hint().0);

    for (idx, interval) in intervals.enumerate() {
        if idx >= NodeId::MAX_NODES {
            return Err(Error::TooManyIntervals(idx + 1));
        }

        interval.validate().inspect_err(|e| {
            debug!("rejecting interval at input position {idx}: {e}");
        })?;

        if interval.end() > domain_max {
            debug!("rejecting interval at input position {idx}: outside domain");
            return Err(Error::OutsideDomain {
                end: interval.end(),
                domain_max,
            });
        }

        nodes.push(Node::new(interval));
    }

    let representatives = link_smaller(&mut nodes);
    let (starts, depth) = sweep(&mut nodes, &representatives, domain_max);

    debug!(
        "built interval tree: {} intervals, {} representatives, max nesting {}, domain 0..={}",
        nodes.len(),
        representatives.len(),
        depth,
        domain_max,
    );

    Ok(Tree { nodes, starts })
}

/// Group intervals by start bound, linking all but the longest of each group
/// into a smaller chain hanging off the longest.
///
/// Chains are ordered by descending end, tie-broken by descending input
/// position. Returns the representative (longest) interval of each group,
/// ordered by ascending start.
fn link_smaller<T>(nodes: &mut [Node<T>]) -> Vec<NodeId> {
    let mut order = (0..nodes.len()).map(NodeId::new).collect::<Vec<_>>();
    order.sort_unstable_by_key(|&id| {
        let n = &nodes[id.idx()];
        (n.start(), Reverse(n.end()), Reverse(id))
    });

    let mut representatives = Vec::new();
    let mut prev: Option<NodeId> = None;

    for id in order {
        match prev {
            Some(p) if nodes[p.idx()].start() == nodes[id.idx()].start() => {
                nodes[p.idx()].next_smaller = Some(id);
            }
            _ => representatives.push(id),
        }
        prev = Some(id);
    }

    representatives
}

/// Sweep `0..=domain_max` once, opening and closing each representative
/// interval to assign its parent and left sibling, and recording the
/// innermost open interval at every coordinate.
///
/// Returns the start table and the maximum number of simultaneously open
/// representatives.
fn sweep<T>(
    nodes: &mut [Node<T>],
    representatives: &[NodeId],
    domain_max: u16,
) -> (Vec<Option<NodeId>>, usize) {
    let slots = domain_max as usize + 1;

    // At most one representative opens at any coordinate.
    let mut opens = vec![None; slots];

    // Representatives closing at each coordinate, as a singly linked list
    // ordered by descending start (innermost first).
    let mut close_head = vec![None; slots];
    let mut close_next = vec![None; nodes.len()];

    for &id in representatives {
        let n = &nodes[id.idx()];
        debug_assert!(opens[n.start() as usize].is_none());
        opens[n.start() as usize] = Some(id);
        close_next[id.idx()] = close_head[n.end() as usize].replace(id);
    }

    let mut starts = vec![None; slots];
    let mut open = OpenList::new(nodes.len());
    let mut root_last_child = None;
    let mut depth = 0;

    for q in 0..=domain_max {
        let slot = q as usize;

        starts[slot] = open.back();

        if let Some(id) = opens[slot] {
            open.push_back(id);
            starts[slot] = Some(id);
            depth = depth.max(open.len());
        }

        // Close innermost first, so each closing interval's enclosing
        // intervals are still open.
        let mut cursor = close_head[slot];
        while let Some(id) = cursor {
            cursor = close_next[id.idx()];

            let parent = open.remove(id).unwrap_or(NodeId::ROOT);
            let last_child = if parent.is_root() {
                &mut root_last_child
            } else {
                &mut nodes[parent.idx()].last_child
            };
            let left_sibling = last_child.replace(id);

            let node = &mut nodes[id.idx()];
            node.parent = Some(parent);
            node.left_sibling = left_sibling;
        }
    }

    // Every representative ends within the domain.
    debug_assert_eq!(open.len(), 0);

    (starts, depth)
}

/// The currently open intervals, ordered by the time they were opened.
///
/// A doubly linked list threaded through per-[`NodeId`] slots, allowing O(1)
/// removal of any element.
#[derive(Debug)]
struct OpenList {
    prev: Vec<Option<NodeId>>,
    next: Vec<Option<NodeId>>,
    back: Option<NodeId>,
    len: usize,
}

impl OpenList {
    fn new(n: usize) -> Self {
        Self {
            prev: vec![None; n],
            next: vec![None; n],
            back: None,
            len: 0,
        }
    }

    fn back(&self) -> Option<NodeId> {
        self.back
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push_back(&mut self, id: NodeId) {
        if let Some(back) = self.back {
            self.next[back.idx()] = Some(id);
        }
        self.prev[id.idx()] = self.back;
        self.next[id.idx()] = None;
        self.back = Some(id);
        self.len += 1;
    }

    /// Unlink `id`, returning the element opened immediately before it, if
    /// any.
    fn remove(&mut self, id: NodeId) -> Option<NodeId> {
        let prev = self.prev[id.idx()].take();
        let next = self.next[id.idx()].take();

        if let Some(p) = prev {
            self.next[p.idx()] = next;
        }

        match next {
            Some(n) => self.prev[n.idx()] = prev,
            None => {
                debug_assert_eq!(self.back, Some(id));
                self.back = prev;
            }
        }

        self.len -= 1;
        prev
    }
}
