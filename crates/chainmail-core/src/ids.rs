#![forbid(unsafe_code)]

//! Ring identifier generation.
//!
//! [`RingIdGenerator`] hands out ids of the form `ring-<n>` with `n`
//! strictly increasing. The counter belongs to the generator instance, not
//! to the process, and is re-seeded explicitly whenever a ring collection is
//! loaded:
//!
//! ```text
//! counter = max(counter, largest n among loaded "ring-<n>" ids)
//! ```
//!
//! so a later `next_id` can never collide with a loaded id and never reuses
//! an id this generator already produced. Ids outside the `ring-<n>` pattern
//! are valid opaque identifiers; they just do not move the counter.
//!
//! Once the counter reaches `u64::MAX` the pattern is exhausted, and
//! [`RingIdGenerator::next_unused_id`] falls back to `ring-<u64::MAX>-<k>`
//! ids checked against the live collection.

/// Prefix shared by every generated id.
pub const RING_ID_PREFIX: &str = "ring-";

/// Monotonic `ring-<n>` id source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RingIdGenerator {
    counter: u64,
    spill: u64,
}

impl RingIdGenerator {
    /// A generator whose first id is `ring-1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0, spill: 0 }
    }

    /// A generator already seeded past `ids`.
    #[must_use]
    pub fn seeded_from<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut generator = Self::new();
        generator.reseed(ids);
        generator
    }

    /// Advance the counter past every `ring-<n>` id in `ids`.
    ///
    /// Never moves the counter backwards.
    pub fn reseed<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let highest = ids
            .into_iter()
            .filter_map(parse_ring_number)
            .max()
            .unwrap_or(0);
        self.counter = self.counter.max(highest);
    }

    /// Produce the next id.
    ///
    /// The counter saturates at `u64::MAX`, after which this keeps returning
    /// `ring-18446744073709551615`. Use [`next_unused_id`](Self::next_unused_id)
    /// when the id must not collide with a live collection.
    pub fn next_id(&mut self) -> String {
        self.counter = self.counter.saturating_add(1);
        format!("{RING_ID_PREFIX}{}", self.counter)
    }

    /// Produce the next id for which `in_use` is false.
    ///
    /// Identical to [`next_id`](Self::next_id) until the counter saturates;
    /// from then on ids get a `-<k>` suffix with `k` strictly increasing.
    pub fn next_unused_id<F>(&mut self, in_use: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let id = self.next_id();
        if !in_use(&id) {
            return id;
        }
        let start = self.spill.saturating_add(1);
        match (start..=u64::MAX).find(|k| !in_use(&format!("{id}-{k}"))) {
            Some(k) => {
                self.spill = k;
                format!("{id}-{k}")
            }
            None => id,
        }
    }

    /// The numeric suffix of the most recently issued (or seeded) id.
    #[must_use]
    pub const fn counter(&self) -> u64 {
        self.counter
    }
}

/// Numeric suffix of an id that is exactly `ring-<digits>`.
///
/// Suffixes too large for a `u64` yield `None`.
#[must_use]
pub fn parse_ring_number(id: &str) -> Option<u64> {
    let digits = id.strip_prefix(RING_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
