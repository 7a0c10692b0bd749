use std::{
    fmt::{Display, Write},
    ops::Range,
};

use proptest::prelude::*;

use crate::{build::Tree, interval::Interval, node::NodeId};

/// The largest coordinate of the narrow domain used by most property tests.
///
/// A small domain encourages intervals to share bounds and to nest.
pub(crate) const RANGE_MAX: u16 = 20;

/// Generate arbitrary (potentially inverted!) bounds from [0..[`RANGE_MAX`]).
pub(crate) fn arbitrary_bounds() -> impl Strategy<Value = (u16, u16)> {
    (0..RANGE_MAX, 0..RANGE_MAX)
}

/// Generate valid bounds within `0..=domain_max`.
pub(crate) fn valid_bounds(domain_max: u16) -> impl Strategy<Value = (u16, u16)> {
    (0..=domain_max, 0..=domain_max).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

/// Generate a set of valid intervals within `0..=domain_max`, each tagged
/// with its input position.
pub(crate) fn arbitrary_intervals(
    domain_max: u16,
    n: Range<usize>,
) -> impl Strategy<Value = Vec<Interval<usize>>> {
    prop::collection::vec(valid_bounds(domain_max), n).prop_map(|bounds| {
        bounds
            .into_iter()
            .enumerate()
            .map(|(idx, (start, end))| Interval::new(start, end, idx))
            .collect()
    })
}

/// Return the tags of all `intervals` stabbed by `q`, in input order.
pub(crate) fn brute_force<T>(intervals: &[Interval<T>], q: u16) -> Vec<&T> {
    intervals
        .iter()
        .filter(|v| v.stabs(q))
        .map(|v| v.tag())
        .collect()
}

/// Render the links of `t` in graphviz dot format.
///
/// Solid edges point from a child to its parent, dashed edges to a left
/// sibling and dotted edges along a smaller chain.
pub(crate) fn print_dot<T>(t: &Tree<T>) -> String
where
    T: Display,
{
    let mut buf = String::new();

    let name = |id: NodeId| -> String {
        if id.is_root() {
            "root".to_string()
        } else {
            t.nodes[id.idx()].interval().tag().to_string()
        }
    };

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(buf, r#""root" [shape = point;];"#).unwrap();

    for (idx, n) in t.nodes.iter().enumerate() {
        let this = name(NodeId::new(idx));
        let i = n.interval();

        writeln!(
            buf,
            r#""{this}" [label="{this} | [{}, {}]"; shape = record;];"#,
            i.start(),
            i.end()
        )
        .unwrap();

        if let Some(p) = n.parent {
            writeln!(buf, r#""{this}" -> "{}";"#, name(p)).unwrap();
        }
        if let Some(s) = n.left_sibling {
            writeln!(buf, r#""{this}" -> "{}" [style = dashed;];"#, name(s)).unwrap();
        }
        if let Some(s) = n.next_smaller {
            writeln!(buf, r#""{this}" -> "{}" [style = dotted;];"#, name(s)).unwrap();
        }
    }

    writeln!(buf, "}}").unwrap();

    buf
}
