//! Whole-construction subset determinization of §4.3: turns an [`Nfa`] into
//! an equivalent [`Dfa`] eagerly, by exploring every reachable subset of
//! NFA states up front.
//!
//! A work list (never recursive) drives the subset exploration; the
//! per-state alphabet partitioning of [`crate::alphabet::Alphabet`] keeps
//! each DFA transition an atom that's always a subset of (or disjoint
//! from) every NFA transition it was built from.

use crate::alphabet::Alphabet;
use crate::dfa::{self, Dfa, DfaStateId};
use crate::nfa::{Nfa, StateId};
use std::collections::{BTreeMap, BTreeSet};

type Subset = BTreeSet<StateId>;

struct Builder<'a> {
	nfa: &'a Nfa,
	index: BTreeMap<Subset, DfaStateId>,
	subsets: Vec<Subset>,
	raw_transitions: Vec<Vec<(u8, u8, DfaStateId)>>,
}

impl<'a> Builder<'a> {
	fn new(nfa: &'a Nfa) -> Self {
		Builder {
			nfa,
			index: BTreeMap::new(),
			subsets: Vec::new(),
			raw_transitions: Vec::new(),
		}
	}

	fn intern(&mut self, subset: Subset) -> DfaStateId {
		if let Some(&id) = self.index.get(&subset) {
			return id;
		}
		let id = self.subsets.len() as DfaStateId;
		crate::trace!("determinize: new dfa state {id} for nfa subset {subset:?}");
		self.index.insert(subset.clone(), id);
		self.subsets.push(subset);
		self.raw_transitions.push(Vec::new());
		id
	}

	fn alphabet_of(&self, subset: &Subset) -> Alphabet {
		let mut alphabet = Alphabet::new();
		for &q in subset {
			for (t, _) in self.nfa.successors(q) {
				if let Some((lo, hi)) = t.bounds() {
					alphabet.push(lo, hi);
				}
			}
		}
		alphabet
	}

	/// The subset reached from `subset` by consuming one byte in `[lo, hi]`
	/// (an atom, so every byte in the range lands on the same successor
	/// subset), epsilon-closed.
	fn step(&self, subset: &Subset, lo: u8, hi: u8) -> Subset {
		let mut targets = BTreeSet::new();
		for &q in subset {
			for (t, target) in self.nfa.successors(q) {
				if !t.is_epsilon() && t.accepts_atom(lo, hi) {
					targets.insert(target);
				}
			}
		}
		self.nfa.epsilon_closure(targets)
	}

	fn build(mut self) -> Dfa {
		let start = self.nfa.epsilon_closure([self.nfa.initial()]);
		let initial = self.intern(start);
		let mut work = vec![initial];
		let mut seen = BTreeSet::from([initial]);

		while let Some(q) = work.pop() {
			let subset = self.subsets[q as usize].clone();
			let atoms = self.alphabet_of(&subset).partition();
			for (lo, hi) in atoms {
				let target_subset = self.step(&subset, lo, hi);
				let target = self.intern(target_subset);
				self.raw_transitions[q as usize].push((lo, hi, target));
				if seen.insert(target) {
					work.push(target);
				}
			}
		}

		let accept = self.nfa.accept();
		let accepting = self.subsets.iter().map(|s| s.contains(&accept)).collect();
		let states = self.raw_transitions.into_iter().map(dfa::coalesce).collect();
		Dfa { states, accepting, initial }
	}
}

/// Builds the minimal-atom, mask-specialized [`Dfa`] equivalent to `nfa`.
pub fn determinize(nfa: &Nfa) -> Dfa {
	Builder::new(nfa).build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ast::Ast;
	use crate::thompson;
	use crate::unicode::BuiltinOracle;

	fn dfa_for(ast: &Ast) -> Dfa {
		let nfa = thompson::build(ast, &BuiltinOracle).unwrap();
		determinize(&nfa)
	}

	fn run(dfa: &Dfa, input: &[u8]) -> bool {
		let mut state = dfa.initial();
		for &b in input {
			match dfa.step(state, b) {
				Some(next) => state = next,
				None => return false,
			}
		}
		dfa.is_accepting(state)
	}

	#[test]
	fn matches_literal() {
		let dfa = dfa_for(&Ast::literal("abc"));
		assert!(run(&dfa, b"abc"));
		assert!(!run(&dfa, b"abd"));
	}

	#[test]
	fn has_no_epsilon_bearing_dead_ends() {
		let dfa = dfa_for(&Ast::literal("a"));
		// Every state's transitions are concrete byte ranges only.
		for q in 0..dfa.state_count() as DfaStateId {
			for (t, _) in dfa.transitions(q) {
				assert!(!matches!(t, crate::transition::Transition::Epsilon));
			}
		}
	}

	#[test]
	fn deterministic_step_is_unambiguous() {
		use crate::ast::{CharClass, Quantifier};
		let ast = Ast::Quantified(Box::new(Ast::MatchClass(CharClass::Digit)), Quantifier::Plus);
		let dfa = dfa_for(&ast);
		assert!(run(&dfa, b"42"));
		assert!(!run(&dfa, b"4a"));
	}
}
