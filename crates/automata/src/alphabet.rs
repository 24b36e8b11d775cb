//! The alphabet partitioning of §4.3: turning a handful of (possibly
//! overlapping) byte ranges into a minimal set of pairwise-disjoint atomic
//! ranges that refine every one of them.
//!
//! `spec.md` describes an "alphabet set" tagged over `{None, Any, Value,
//! Range, Multiple}`. Since every range this crate ever deals with is
//! already a single contiguous `[lo, hi]` (transitions never carry
//! multi-range sets — see `crate::transition`), the only representation
//! that matters in practice is a bag of such ranges, which is exactly what
//! [`Alphabet`] is.

/// A collection of (possibly overlapping) byte ranges, gathered from the
/// outgoing non-epsilon transitions of an NFA state set.
#[derive(Debug, Default, Clone)]
pub struct Alphabet {
	ranges: Vec<(u8, u8)>,
}

impl Alphabet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one contiguous range to the alphabet.
	pub fn push(&mut self, lo: u8, hi: u8) {
		debug_assert!(lo <= hi);
		self.ranges.push((lo, hi));
	}

	pub fn is_empty(&self) -> bool {
		self.ranges.is_empty()
	}

	/// `overlay(a, b)`: combines two alphabets. The result still covers
	/// exactly what `a` and `b` covered; it is deliberately not yet reduced
	/// to a disjoint partition (that's [`Alphabet::partition`]'s job).
	pub fn overlay(mut self, other: Alphabet) -> Self {
		self.ranges.extend(other.ranges);
		self
	}

	/// `partition(a)`: enumerates this alphabet as a list of
	/// pairwise-disjoint atomic `[lo, hi]` ranges. Every input range is
	/// exactly the union of some contiguous run of output atoms, so each
	/// atom is always a subset of (or disjoint from) every input range —
	/// the "subset-or-disjoint" guarantee §4.3 relies on for `matches?`.
	///
	/// Atoms are returned in ascending order, satisfying the "iteration
	/// order over atoms must be deterministic" requirement of §4.3.
	pub fn partition(&self) -> Vec<(u8, u8)> {
		if self.ranges.is_empty() {
			return Vec::new();
		}

		// Breakpoint sweep: every range [lo, hi] contributes a cut at `lo`
		// and a cut just past `hi`. The atoms are the gaps between
		// consecutive sorted cuts that some input range actually covers.
		let mut cuts: Vec<u16> = Vec::with_capacity(self.ranges.len() * 2);
		for &(lo, hi) in &self.ranges {
			cuts.push(lo as u16);
			cuts.push(hi as u16 + 1);
		}
		cuts.sort_unstable();
		cuts.dedup();

		let mut atoms = Vec::with_capacity(cuts.len().saturating_sub(1));
		for window in cuts.windows(2) {
			let (start, end) = (window[0], window[1]);
			// [start, end) is covered iff some input range contains `start`.
			let covered = self
				.ranges
				.iter()
				.any(|&(lo, hi)| lo as u16 <= start && end - 1 <= hi as u16);
			if covered {
				atoms.push((start as u8, (end - 1) as u8));
			}
		}
		atoms
	}
}

impl FromIterator<(u8, u8)> for Alphabet {
	fn from_iter<I: IntoIterator<Item = (u8, u8)>>(iter: I) -> Self {
		Alphabet {
			ranges: iter.into_iter().collect(),
		}
	}
}
