use log::trace;

use crate::{
    build::{build, Tree},
    config::Config,
    error::{Error, Result},
    interval::{Interval, Tag},
    node::{Node, NodeId},
    pool::{BufferPool, Stack},
};

/// An immutable index answering stabbing queries: "which intervals contain
/// this point?".
///
/// The index is built once from a fixed set of intervals, after which queries
/// cost time proportional to the number of matching intervals (plus the
/// nesting depth), independent of the total number of intervals indexed.
///
/// ```
/// use intstab::{Interval, IntervalStabber};
///
/// let t = IntervalStabber::new([
///     Interval::new(4, 15, "First"),
///     Interval::new(34, 72, "Second"),
/// ])?;
///
/// let got = t.stab(45)?.into_iter().map(|v| *v.tag()).collect::<Vec<_>>();
/// assert_eq!(got, ["Second"]);
/// # Ok::<_, intstab::Error>(())
/// ```
///
/// Queries are `&self` and may run concurrently from many threads; each
/// query draws its working buffers from a shared bounded pool to avoid
/// allocating on every call.
///
/// A [`Default`] stabber contains no index, and returns
/// [`Error::NotInitialized`] from every query.
#[derive(Debug)]
pub struct IntervalStabber<T> {
    nodes: Vec<Node<T>>,

    /// The innermost open interval at each coordinate.
    ///
    /// Empty only when the stabber was never built.
    starts: Vec<Option<NodeId>>,

    pool: BufferPool<NodeId>,
    config: Config,
}

impl<T> Default for IntervalStabber<T> {
    fn default() -> Self {
        let config = Config::default();
        Self {
            nodes: Vec::new(),
            starts: Vec::new(),
            pool: BufferPool::new(config.pool_capacity(), config.buffer_capacity()),
            config,
        }
    }
}

impl<T> IntervalStabber<T>
where
    T: Tag,
{
    /// Build an index over `intervals` covering the full `u16` domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::InvalidRange`] or [`Error::MissingTag`]
    /// encountered, in input order.
    pub fn new<I>(intervals: I) -> Result<Self>
    where
        I: IntoIterator<Item = Interval<T>>,
    {
        Self::with_config(Config::default(), intervals)
    }

    /// Build an index over `intervals` using the provided [`Config`].
    ///
    /// # Errors
    ///
    /// In addition to the validation errors of [`IntervalStabber::new()`],
    /// any interval ending beyond [`Config::domain_max()`] is rejected with
    /// [`Error::OutsideDomain`].
    pub fn with_config<I>(config: Config, intervals: I) -> Result<Self>
    where
        I: IntoIterator<Item = Interval<T>>,
    {
        let Tree { nodes, starts } = build(intervals, config.domain_max())?;

        Ok(Self {
            nodes,
            starts,
            pool: BufferPool::new(config.pool_capacity(), config.buffer_capacity()),
            config,
        })
    }
}

impl<T> IntervalStabber<T> {
    /// Return all intervals containing `q`.
    ///
    /// Intervals with identical bounds are returned in input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] for an unbuilt stabber, and
    /// [`Error::OutOfRange`] if `q` exceeds [`Config::domain_max()`].
    pub fn stab(&self, q: u16) -> Result<Vec<&Interval<T>>> {
        let mut out = Vec::new();
        self.stab_into(q, &mut out)?;
        Ok(out)
    }

    /// Append all intervals containing `q` to `out`, in the same order as
    /// [`IntervalStabber::stab()`].
    ///
    /// Reusing `out` across calls avoids allocating the result.
    pub fn stab_into<'a>(&'a self, q: u16, out: &mut Vec<&'a Interval<T>>) -> Result<()> {
        if self.starts.is_empty() {
            return Err(Error::NotInitialized);
        }

        let domain_max = self.config.domain_max();
        if q > domain_max {
            return Err(Error::OutOfRange { query: q, domain_max });
        }

        let Some(mut x) = self.starts[q as usize] else {
            return Ok(());
        };

        let mut found = self.pool.stack();
        let mut pending = self.pool.stack();

        // Walk from the innermost open interval up to the root.
        loop {
            self.traverse(x, q, &mut pending, &mut found);

            x = match self.node(x).parent {
                Some(p) if !p.is_root() => p,
                _ => break,
            };
        }

        trace!("stabbing query {q} matched {} intervals", found.len());

        out.reserve(found.len());
        while let Some(id) = found.pop() {
            out.push(self.node(id).interval());
        }

        Ok(())
    }

    /// Push `v` and every other stabbed interval reachable from it through
    /// smaller chains and left siblings onto `found`.
    ///
    /// Intervals reached through a left sibling are additionally descended
    /// into through their last child; `v` itself is not, as the walk up from
    /// the innermost open interval already passes through its stabbed
    /// children.
    fn traverse(
        &self,
        v: NodeId,
        q: u16,
        pending: &mut Stack<'_, NodeId>,
        found: &mut Stack<'_, NodeId>,
    ) {
        debug_assert!(pending.is_empty());

        let n = self.visit(v, q, found);
        if let Some(sib) = self.stabbed(n.left_sibling, q) {
            pending.push(sib);
        }

        while let Some(u) = pending.pop() {
            let n = self.visit(u, q, found);

            // The left sibling is pushed last so that it (and everything
            // reachable from it) is visited before the last child.
            if let Some(child) = self.stabbed(n.last_child, q) {
                pending.push(child);
            }
            if let Some(sib) = self.stabbed(n.left_sibling, q) {
                pending.push(sib);
            }
        }
    }

    /// Push `v` onto `found`, followed by every interval in its smaller chain
    /// that contains `q`.
    fn visit(&self, v: NodeId, q: u16, found: &mut Stack<'_, NodeId>) -> &Node<T> {
        let n = self.node(v);
        debug_assert!(n.stabs(q));
        found.push(v);

        // The chain shares the start bound of v and is ordered by descending
        // end, so the first interval ending before q terminates the walk.
        let mut ptr = n.next_smaller;
        while let Some(w) = ptr {
            let m = self.node(w);
            if m.end() < q {
                break;
            }
            found.push(w);
            ptr = m.next_smaller;
        }

        n
    }

    fn stabbed(&self, id: Option<NodeId>, q: u16) -> Option<NodeId> {
        id.filter(|&v| self.node(v).stabs(q))
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.idx()]
    }

    /// Iterate over all indexed intervals in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval<T>> {
        self.nodes.iter().map(Node::interval)
    }

    /// The number of indexed intervals.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the index has been built and can be queried.
    pub fn is_initialized(&self) -> bool {
        !self.starts.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The number of query buffers allocated because none were available for
    /// reuse.
    ///
    /// This stops growing once the pool holds enough buffers to serve the
    /// query concurrency.
    pub fn buffer_allocations(&self) -> usize {
        self.pool.allocations()
    }
}
