//! `rexa`: compiles a [`rexa_automata::Ast`] into a [`Pattern`] that can be
//! matched against a byte string with any of the four strategies
//! `rexa-automata` implements (`spec.md` §4.4).
//!
//! Parsing pattern *text* into an [`Ast`] is out of scope here, same as in
//! `rexa-automata` itself — this crate only wires the automata and syntax
//! crates together behind one entry point.

use rexa_automata::ast::Ast;
use rexa_automata::dfa::Dfa;
use rexa_automata::nfa::Nfa;
use rexa_automata::unicode::BuiltinOracle;
use rexa_automata::{bytecode, determinize, matcher, thompson};

pub use rexa_automata::ast;
pub use rexa_automata::error::BuildError;

/// Which of the four `spec.md` §4.4 strategies [`Pattern::is_match`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	/// Depth-first search over the NFA's ordered transitions.
	Backtrack,
	/// A single scan over an eagerly-built DFA.
	Deterministic,
	/// Subset construction performed one byte at a time, memoized.
	Lazy,
	/// The bytecode interpreter, a Thompson/Pike thread-list simulation.
	Bytecode,
}

/// Compile-time configuration. The only open choice `spec.md` leaves
/// (§6.4, §9): whether to widen the pattern to an unanchored search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
	/// Auto-prefix the pattern with `.*` so `is_match` finds it anywhere
	/// in the input rather than requiring a match from the first byte.
	/// Default `true`: there's no anchor syntax to collide with (`spec.md`
	/// treats anchors as an unimplemented extension), so prefixing is
	/// always safe.
	pub unanchored: bool,
	/// Which strategy [`Pattern::is_match`] runs.
	pub strategy: Strategy,
}

impl Default for Options {
	fn default() -> Self {
		Options {
			unanchored: true,
			strategy: Strategy::Deterministic,
		}
	}
}

/// A compiled pattern: one NFA, built once, plus whichever derived
/// representations (`Dfa`, bytecode [`bytecode::Program`]) its strategies
/// need, all computed up front so repeated matching never re-derives them.
pub struct Pattern {
	nfa: Nfa,
	dfa: Dfa,
	program: bytecode::Program,
	strategy: Strategy,
}

impl Pattern {
	/// Lowers `ast` into a [`Pattern`], per `options`.
	pub fn compile(mut ast: Ast, options: Options) -> Result<Self, BuildError> {
		if options.unanchored {
			rexa_syntax::make_unanchored(&mut ast);
		}
		let nfa = thompson::build(&ast, &BuiltinOracle)?;
		let dfa = determinize::determinize(&nfa);
		let program = bytecode::compile(&nfa);
		Ok(Pattern {
			nfa,
			dfa,
			program,
			strategy: options.strategy,
		})
	}

	/// Convenience over [`Pattern::compile`] with [`Options::default`].
	pub fn new(ast: Ast) -> Result<Self, BuildError> {
		Self::compile(ast, Options::default())
	}

	/// Whether the compiled pattern matches `input`, per §7: never fails —
	/// a non-match is a successful `false`, not an error.
	pub fn is_match(&self, input: &[u8]) -> bool {
		match self.strategy {
			Strategy::Backtrack => matcher::backtrack::is_match(&self.nfa, input),
			Strategy::Deterministic => matcher::deterministic::is_match(&self.dfa, input),
			Strategy::Lazy => matcher::lazy::is_match(&self.nfa, input),
			Strategy::Bytecode => bytecode::is_match(&self.program, input),
		}
	}

	/// Matches using a strategy other than the one `self` was compiled
	/// with. Useful for the cross-strategy equivalence tests in `tests/`.
	pub fn is_match_via(&self, strategy: Strategy, input: &[u8]) -> bool {
		match strategy {
			Strategy::Backtrack => matcher::backtrack::is_match(&self.nfa, input),
			Strategy::Deterministic => matcher::deterministic::is_match(&self.dfa, input),
			Strategy::Lazy => matcher::lazy::is_match(&self.nfa, input),
			Strategy::Bytecode => bytecode::is_match(&self.program, input),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unanchored_by_default_finds_pattern_anywhere() {
		let pattern = Pattern::new(Ast::literal("cat")).unwrap();
		assert!(pattern.is_match(b"a cat"));
		assert!(pattern.is_match(b"cat"));
		assert!(!pattern.is_match(b"dog"));
	}

	#[test]
	fn anchored_requires_the_match_to_start_at_the_beginning() {
		let pattern = Pattern::compile(
			Ast::literal("cat"),
			Options {
				unanchored: false,
				strategy: Strategy::Deterministic,
			},
		)
		.unwrap();
		assert!(pattern.is_match(b"cat"));
		assert!(pattern.is_match(b"cats")); // "cat" matches as a prefix; trailing content is fine
		assert!(!pattern.is_match(b"a cat")); // the match itself must start at position 0
	}

	#[test]
	fn all_four_strategies_agree() {
		let pattern = Pattern::new(Ast::literal("needle")).unwrap();
		for &strategy in &[Strategy::Backtrack, Strategy::Deterministic, Strategy::Lazy, Strategy::Bytecode] {
			assert!(pattern.is_match_via(strategy, b"a needle in a haystack"));
			assert!(!pattern.is_match_via(strategy, b"haystack only"));
		}
	}
}
