use std::{borrow::Cow, cmp::Ordering, rc::Rc, sync::Arc};

use crate::error::{Error, Result};

/// A closed interval `[start, end]` over the `u16` domain, labelled with an
/// opaque tag.
///
/// An [`Interval`] is ordered by its lower bound, and tie-braked with the
/// upper bound (see [`Interval::cmp_range()`]). The tag does not participate
/// in the ordering.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Interval<T> {
    start: u16,
    end: u16,
    tag: T,
}

impl<T> Interval<T> {
    /// Construct a new interval.
    ///
    /// No validation is performed here - an inverted or tag-less interval is
    /// rejected when building an [`IntervalStabber`](crate::IntervalStabber).
    pub const fn new(start: u16, end: u16, tag: T) -> Self {
        Self { start, end, tag }
    }

    /// The inclusive lower bound.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// The inclusive upper bound.
    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn tag(&self) -> &T {
        &self.tag
    }

    pub fn into_tag(self) -> T {
        self.tag
    }

    /// Returns true if `q` lies within `[start, end]`.
    pub fn stabs(&self, q: u16) -> bool {
        self.start <= q && q <= self.end
    }

    /// Order `self` and `other` by their lower bounds, falling back to the
    /// upper bounds when the lower bounds are equal.
    pub fn cmp_range<U>(&self, other: &Interval<U>) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            v => v,
        }
    }

    /// Returns true if `self` is ordered at or before `other`.
    ///
    /// Intervals with identical bounds precede each other.
    pub fn precedes<U>(&self, other: &Interval<U>) -> bool {
        self.cmp_range(other) != Ordering::Greater
    }
}

impl<T> Interval<T>
where
    T: Tag,
{
    /// Check the interval bounds are not inverted and the tag is present.
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(Error::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }

        if !self.tag.is_present() {
            return Err(Error::MissingTag);
        }

        Ok(())
    }
}

impl<T> From<(u16, u16, T)> for Interval<T> {
    fn from((start, end, tag): (u16, u16, T)) -> Self {
        Self::new(start, end, tag)
    }
}

/// The label attached to an [`Interval`].
///
/// Every interval admitted to an index must carry a tag. Types that can
/// represent "no tag" (an empty string, [`None`]) report it through
/// [`Tag::is_present()`]; all other types are always present and can opt in
/// with an empty impl:
///
/// ```
/// #[derive(Debug)]
/// struct Feature(u64);
///
/// impl intstab::Tag for Feature {}
/// ```
pub trait Tag {
    fn is_present(&self) -> bool {
        true
    }
}

impl<T> Tag for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl Tag for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Tag for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Tag for Cow<'_, str> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Tag for &T
where
    T: Tag + ?Sized,
{
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

macro_rules! forward_tag {
    ($($ptr:ident),*) => {
        $(
            impl<T> Tag for $ptr<T>
            where
                T: Tag + ?Sized,
            {
                fn is_present(&self) -> bool {
                    (**self).is_present()
                }
            }
        )*
    };
}

forward_tag!(Box, Rc, Arc);

macro_rules! always_present {
    ($($ty:ty),*) => {
        $(impl Tag for $ty {})*
    };
}

always_present!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool);
