//! The deterministic matcher of §4.4: a single linear scan over a
//! pre-built [`Dfa`], one transition lookup per input byte.

use crate::dfa::Dfa;

/// Whether some prefix of `input` is accepted by `dfa` (anchored at the
/// start only). Accepts as soon as the destination of a step is an
/// accepting state; on a dead transition, returns whether the state
/// reached so far is accepting rather than failing outright.
pub fn is_match(dfa: &Dfa, input: &[u8]) -> bool {
	let mut state = dfa.initial();
	if dfa.is_accepting(state) {
		return true;
	}
	for &byte in input {
		match dfa.step(state, byte) {
			Some(next) => {
				state = next;
				if dfa.is_accepting(state) {
					return true;
				}
			}
			None => return dfa.is_accepting(state),
		}
	}
	false
}
