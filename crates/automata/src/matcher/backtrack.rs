//! The backtracking matcher of §4.4: a depth-first search of the NFA's
//! ordered transitions, trying earlier transitions before later ones.
//!
//! Driven by an explicit stack of frames rather than recursive calls, so a
//! long input or a deeply chained pattern can't exhaust the call stack. A
//! memo of visited `(state, position)` pairs turns what would otherwise be
//! exponential backtracking into a search that's linear in
//! `states * input length`: a configuration's outcome depends only on the
//! pair, so it's safe (and correct) to never explore it twice.

use crate::nfa::{Nfa, StateId};
use crate::transition::Transition;
use std::collections::HashSet;

struct Frame {
	pos: usize,
	successors: std::vec::IntoIter<(Transition, StateId)>,
}

/// Whether some prefix of `input` is accepted by `nfa` (anchored at the
/// start only). Returns true as soon as any reachable state, at any
/// position, is accepting — trailing input beyond that point is never
/// examined.
pub fn is_match(nfa: &Nfa, input: &[u8]) -> bool {
	let start = nfa.initial();
	if nfa.is_accepting(start) {
		return true;
	}

	let mut memo: HashSet<(StateId, usize)> = HashSet::from([(start, 0)]);
	let mut stack = vec![Frame {
		pos: 0,
		successors: nfa.successors(start).collect::<Vec<_>>().into_iter(),
	}];

	while let Some(frame) = stack.last_mut() {
		match frame.successors.next() {
			Some((t, target)) => {
				let pos = frame.pos;
				let next_pos = if t.is_epsilon() {
					Some(pos)
				} else if pos < input.len() && t.matches(input[pos]) {
					Some(pos + 1)
				} else {
					None
				};
				if let Some(next_pos) = next_pos {
					if memo.insert((target, next_pos)) {
						if nfa.is_accepting(target) {
							return true;
						}
						stack.push(Frame {
							pos: next_pos,
							successors: nfa.successors(target).collect::<Vec<_>>().into_iter(),
						});
					}
				}
			}
			None => {
				stack.pop();
			}
		}
	}

	false
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ast::Ast;
	use crate::thompson;
	use crate::unicode::BuiltinOracle;

	fn nfa_for(ast: &Ast) -> Nfa {
		thompson::build(ast, &BuiltinOracle).unwrap()
	}

	#[test]
	fn matches_literal_exactly() {
		let nfa = nfa_for(&Ast::literal("needle"));
		assert!(is_match(&nfa, b"needle"));
		assert!(is_match(&nfa, b"needles")); // "needle" matches as a prefix
		assert!(!is_match(&nfa, b"need")); // too short, no accepting prefix
	}

	#[test]
	fn terminates_on_epsilon_cycles() {
		use crate::ast::Quantifier;
		// (a*)* exercises a nested epsilon loop through the outer Star. It
		// accepts zero repetitions, so every input has a matching (empty)
		// prefix; what this test actually exercises is that the search
		// terminates at all rather than looping forever on the cycle.
		let inner = Ast::Quantified(Box::new(Ast::MatchCharacter('a')), Quantifier::Star);
		let ast = Ast::Quantified(Box::new(inner), Quantifier::Star);
		let nfa = nfa_for(&ast);
		assert!(is_match(&nfa, b""));
		assert!(is_match(&nfa, b"aaaa"));
		assert!(is_match(&nfa, b"aaab"));
	}

	#[test]
	fn alternation_tries_branches_in_order() {
		let ast = Ast::Pattern(vec![Ast::literal("a"), Ast::literal("ab")]);
		let nfa = nfa_for(&ast);
		// Both must still be reachable even though the first branch is
		// tried first and is a prefix of the second.
		assert!(is_match(&nfa, b"a"));
		assert!(is_match(&nfa, b"ab"));
	}
}
