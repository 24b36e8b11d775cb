//! Byte-level finite automata: build an [`Nfa`] from an [`ast::Ast`] via
//! Thompson construction ([`thompson`]), then match it directly
//! ([`matcher::backtrack`]), determinize it eagerly ([`determinize`]) or
//! lazily ([`matcher::lazy`]) into a [`dfa::Dfa`], or compile it to a
//! [`bytecode::Program`] and run that.
//!
//! Enable the `logging` feature to get `trace`-level [`log`] records from
//! construction, determinization and bytecode emission, plus `debug`-level
//! records when the builder rejects an unimplemented construct or an
//! unknown property name; off by default so the dependency stays optional
//! for callers that don't use the `log` ecosystem.

pub use btree_range_map::RangeSet;

pub mod alphabet;
pub mod ast;
pub mod bytecode;
pub mod determinize;
pub mod dfa;
pub mod error;
pub mod matcher;
pub mod nfa;
pub mod thompson;
pub mod transition;
pub mod unicode;
pub mod utf8;

pub use ast::Ast;
pub use dfa::Dfa;
pub use error::BuildError;
pub use nfa::Nfa;
pub use transition::Transition;

/// The set of all valid Unicode scalar values (every `char`, which by
/// construction already excludes the UTF-16 surrogate gap
/// `U+D800..=U+DFFF`) as a [`RangeSet`]. `.` (`Ast::MatchAny`) is defined
/// to match exactly the UTF-8 encoding of one value from this set.
pub fn any_char() -> RangeSet<char> {
	let mut set = RangeSet::new();
	set.insert('\u{0}'..='\u{d7ff}');
	set.insert('\u{e000}'..='\u{10ffff}');
	set
}

#[cfg(feature = "logging")]
macro_rules! trace {
	($($arg:tt)*) => { log::trace!($($arg)*) };
}
#[cfg(not(feature = "logging"))]
macro_rules! trace {
	($($arg:tt)*) => {};
}
pub(crate) use trace;

#[cfg(feature = "logging")]
macro_rules! debug {
	($($arg:tt)*) => { log::debug!($($arg)*) };
}
#[cfg(not(feature = "logging"))]
macro_rules! debug {
	($($arg:tt)*) => {};
}
pub(crate) use debug;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn any_char_excludes_surrogates() {
		let set = any_char();
		assert!(set.contains('a'));
		assert!(set.contains('\u{10ffff}'));
		assert!(!set.contains('\u{d800}'));
	}
}
