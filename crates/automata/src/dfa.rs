//! The deterministic automaton of §4.3: one outgoing transition per byte,
//! built by whole-construction subset determinization (see
//! [`crate::determinize`]) and then reduced with the `Mask` specialization.
//!
//! Unlike [`crate::nfa::Nfa`], a [`Dfa`]'s states never carry
//! [`Transition::Epsilon`] edges, and the per-state transition list is
//! always over pairwise-disjoint atoms — stepping is a single linear scan,
//! never a search.

use crate::transition::Transition;

pub type DfaStateId = u32;

/// A deterministic automaton over the byte alphabet.
#[derive(Debug, Clone)]
pub struct Dfa {
	pub(crate) states: Vec<Vec<(Transition, DfaStateId)>>,
	pub(crate) accepting: Vec<bool>,
	pub(crate) initial: DfaStateId,
}

impl Dfa {
	pub fn initial(&self) -> DfaStateId {
		self.initial
	}

	pub fn state_count(&self) -> usize {
		self.states.len()
	}

	pub fn is_accepting(&self, q: DfaStateId) -> bool {
		self.accepting[q as usize]
	}

	/// Follows the single transition out of `q` matching `byte`, or `None`
	/// if `byte` isn't accepted from `q` (the dead state, implicit).
	pub fn step(&self, q: DfaStateId, byte: u8) -> Option<DfaStateId> {
		self.states[q as usize]
			.iter()
			.find(|(t, _)| t.matches(byte))
			.map(|&(_, to)| to)
	}

	pub fn transitions(&self, q: DfaStateId) -> impl Iterator<Item = (Transition, DfaStateId)> + '_ {
		self.states[q as usize].iter().copied()
	}
}

/// Merges adjacent same-target atoms in `raw` (sorted by lower bound) into
/// the fewest transitions, specializing each merged range to
/// [`Transition::Mask`] whenever it qualifies (§4.3).
pub(crate) fn coalesce(mut raw: Vec<(u8, u8, DfaStateId)>) -> Vec<(Transition, DfaStateId)> {
	raw.sort_by_key(|&(lo, _, to)| (lo, to));
	let mut merged: Vec<(u8, u8, DfaStateId)> = Vec::new();
	for (lo, hi, to) in raw {
		if let Some(last) = merged.last_mut() {
			if last.2 == to && (last.1 as u16) + 1 == lo as u16 {
				last.1 = hi;
				continue;
			}
		}
		merged.push((lo, hi, to));
	}
	merged.into_iter().map(|(lo, hi, to)| (specialize(lo, hi), to)).collect()
}

fn specialize(lo: u8, hi: u8) -> Transition {
	let base = Transition::range(lo, hi);
	if let Transition::Range(lo, hi) = base {
		let (mask_lo, mask_hi) = Transition::mask_bounds(lo);
		if mask_lo == lo && mask_hi == hi {
			return Transition::Mask(lo);
		}
	}
	base
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn coalesce_merges_adjacent_same_target_atoms() {
		let merged = coalesce(vec![(0x00, 0x3f, 1), (0x40, 0x7f, 1), (0x80, 0xbf, 2)]);
		assert_eq!(merged, vec![(Transition::range(0x00, 0x7f), 1), (Transition::range(0x80, 0xbf), 2)]);
	}

	#[test]
	fn coalesce_specializes_to_mask() {
		// 0b1000_0000..=0b1111_1111 qualifies for Mask(0x80).
		let merged = coalesce(vec![(0x80, 0xff, 5)]);
		assert_eq!(merged, vec![(Transition::Mask(0x80), 5)]);
	}

	#[test]
	fn coalesce_leaves_non_mask_ranges_alone() {
		let merged = coalesce(vec![(0x41, 0x5a, 3)]);
		assert_eq!(merged, vec![(Transition::Range(0x41, 0x5a), 3)]);
	}
}
