//! The lazy (on-the-fly) matcher of §4.4: subset construction performed
//! one byte at a time, memoizing each `(subset, byte) -> subset` step the
//! first time it's seen.
//!
//! Where [`crate::determinize`] explores every reachable subset up front,
//! [`Lazy`] only ever computes the subsets a given input actually visits —
//! useful when most patterns in a workload never come close to exercising
//! their automaton's full reachable state space.

use crate::nfa::{Nfa, StateId};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

type Subset = BTreeSet<StateId>;

pub struct Lazy<'a> {
	nfa: &'a Nfa,
	cache: RefCell<HashMap<(Subset, u8), Subset>>,
}

impl<'a> Lazy<'a> {
	pub fn new(nfa: &'a Nfa) -> Self {
		Lazy { nfa, cache: RefCell::new(HashMap::new()) }
	}

	pub fn initial(&self) -> Subset {
		self.nfa.epsilon_closure([self.nfa.initial()])
	}

	pub fn is_accepting(&self, subset: &Subset) -> bool {
		subset.contains(&self.nfa.accept())
	}

	/// The subset reached from `subset` on `byte`, computing and caching
	/// it on first use.
	pub fn step(&self, subset: &Subset, byte: u8) -> Subset {
		let key = (subset.clone(), byte);
		if let Some(hit) = self.cache.borrow().get(&key) {
			return hit.clone();
		}

		let mut targets = BTreeSet::new();
		for &q in subset {
			for (t, target) in self.nfa.successors(q) {
				if !t.is_epsilon() && t.matches(byte) {
					targets.insert(target);
				}
			}
		}
		let closure = self.nfa.epsilon_closure(targets);
		self.cache.borrow_mut().insert(key, closure.clone());
		closure
	}
}

/// Whether some prefix of `input` is accepted by `nfa` (anchored at the
/// start only), via lazily memoized subset construction. Same accept
/// semantics as [`crate::matcher::deterministic::is_match`]: accept as
/// soon as a step's destination subset is accepting, and on a dead
/// (empty) subset return whether the subset reached so far is accepting.
pub fn is_match(nfa: &Nfa, input: &[u8]) -> bool {
	let lazy = Lazy::new(nfa);
	let mut state = lazy.initial();
	if lazy.is_accepting(&state) {
		return true;
	}
	for &byte in input {
		if state.is_empty() {
			return lazy.is_accepting(&state);
		}
		state = lazy.step(&state, byte);
		if lazy.is_accepting(&state) {
			return true;
		}
	}
	false
}
