//! The nondeterministic automaton of §3: states identified by dense `u32`
//! indices into an arena, and an ordered transition list per state.
//!
//! Order is significant (§3 Invariants): transitions inserted by
//! [`Nfa::prepend`] are tried before transitions already present, modeling
//! greedy/eager preference; [`Nfa::append`] models the non-preferred
//! fallback (the `Epsilon` "give up and move on" edge of a quantifier).

use crate::error::BuildError;
use crate::transition::Transition;
use std::collections::{BTreeSet, VecDeque};

/// A state identifier, dense within one [`Nfa`]'s arena.
pub type StateId = u32;

/// Allocates fresh state identifiers for a growing [`Nfa`].
///
/// Mirrors the state-builder split the teacher workspace used: construction
/// code asks for states through this trait instead of touching a counter
/// directly, so callers can swap in their own identifier scheme (or a
/// bounded one, via [`BuildError::TooManyStates`]).
pub trait StateBuilder {
	fn fresh(&mut self, nfa: &mut Nfa) -> Result<StateId, BuildError>;
}

/// The default [`StateBuilder`]: dense `u32` counter, bounded by `u32::MAX`.
#[derive(Debug, Default)]
pub struct DenseStateBuilder {
	limit: Option<u32>,
}

impl DenseStateBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Caps the number of states this builder will allocate. Useful to
	/// bound compilation of pathological patterns (huge bounded
	/// quantifiers) instead of exhausting memory.
	pub fn with_limit(limit: u32) -> Self {
		DenseStateBuilder { limit: Some(limit) }
	}
}

impl StateBuilder for DenseStateBuilder {
	fn fresh(&mut self, nfa: &mut Nfa) -> Result<StateId, BuildError> {
		if let Some(limit) = self.limit {
			if nfa.states.len() as u32 >= limit {
				return Err(BuildError::TooManyStates);
			}
		}
		Ok(nfa.new_state())
	}
}

/// A nondeterministic finite automaton over the byte alphabet.
///
/// Built with a single initial state and a single accepting state, per the
/// Thompson construction of §4.2 — every AST node lowers to a fragment with
/// exactly one entry and one exit.
#[derive(Debug, Clone)]
pub struct Nfa {
	states: Vec<Vec<(Transition, StateId)>>,
	initial: StateId,
	accept: StateId,
}

impl Default for Nfa {
	fn default() -> Self {
		// A fresh Nfa always has at least states 0 (initial) and 1 (accept),
		// disconnected, matching an empty (never-matching) language until
		// the builder wires them together.
		Nfa {
			states: vec![Vec::new(), Vec::new()],
			initial: 0,
			accept: 1,
		}
	}
}

impl Nfa {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn initial(&self) -> StateId {
		self.initial
	}

	pub fn accept(&self) -> StateId {
		self.accept
	}

	pub fn set_initial(&mut self, q: StateId) {
		self.initial = q;
	}

	pub fn set_accept(&mut self, q: StateId) {
		self.accept = q;
	}

	pub fn state_count(&self) -> usize {
		self.states.len()
	}

	/// Allocates a fresh, transition-less state.
	pub fn new_state(&mut self) -> StateId {
		self.states.push(Vec::new());
		(self.states.len() - 1) as StateId
	}

	/// Appends a transition to `from`'s list: tried last (§3 invariant).
	pub fn append(&mut self, from: StateId, t: Transition, to: StateId) {
		self.states[from as usize].push((t, to));
	}

	/// Prepends a transition to `from`'s list: tried first (§3 invariant).
	pub fn prepend(&mut self, from: StateId, t: Transition, to: StateId) {
		self.states[from as usize].insert(0, (t, to));
	}

	/// The ordered list of outgoing transitions of `q`, in try-order.
	pub fn successors(&self, q: StateId) -> impl Iterator<Item = (Transition, StateId)> + '_ {
		self.states[q as usize].iter().copied()
	}

	pub fn is_accepting(&self, q: StateId) -> bool {
		q == self.accept
	}

	/// The least fixed point of following [`Transition::Epsilon`] edges
	/// from every state in `from`.
	pub fn epsilon_closure(&self, from: impl IntoIterator<Item = StateId>) -> BTreeSet<StateId> {
		let mut closure: BTreeSet<StateId> = BTreeSet::new();
		let mut queue: VecDeque<StateId> = from.into_iter().collect();
		for &q in &queue {
			closure.insert(q);
		}
		while let Some(q) = queue.pop_front() {
			for (t, target) in self.successors(q) {
				if t.is_epsilon() && closure.insert(target) {
					queue.push_back(target);
				}
			}
		}
		closure
	}
}
