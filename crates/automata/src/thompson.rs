//! The NFA builder of §4.2: an iterative, work-list-driven Thompson
//! construction from an [`Ast`] to an [`Nfa`].
//!
//! Never recursive — a work list of `(node, entry, exit)` obligations plays
//! the role recursive descent would otherwise play, so deeply nested
//! patterns or huge bounded quantifiers can't exhaust the call stack.
//!
//! Greedy priority falls entirely out of [`Nfa::prepend`] vs.
//! [`Nfa::append`]: every leaf that actually consumes a byte (via
//! [`crate::utf8`]) prepends its transitions, while every "give up and
//! fall through" epsilon a quantifier adds is appended. Because `prepend`
//! always inserts at the front regardless of when it runs, and epsilon
//! edges are appended *before* their sibling obligation is popped off the
//! stack, the byte-consuming path always ends up ahead of the epsilon
//! fallback in the final transition list — independent of work-list
//! scheduling order.

use crate::ast::{Ast, CharClass, PosixClass, Quantifier};
use crate::error::BuildError;
use crate::nfa::{Nfa, StateId};
use crate::transition::Transition;
use crate::unicode::PropertyOracle;
use crate::utf8;

/// Lowers `ast` into a fresh [`Nfa`] with a single initial and single
/// accepting state.
pub fn build(ast: &Ast, oracle: &dyn PropertyOracle) -> Result<Nfa, BuildError> {
	let mut nfa = Nfa::new();
	let entry = nfa.initial();
	let exit = nfa.accept();

	let mut work: Vec<(&Ast, StateId, StateId)> = vec![(ast, entry, exit)];
	while let Some((node, entry, exit)) = work.pop() {
		step(&mut nfa, &mut work, node, entry, exit, oracle)?;
	}

	crate::trace!("built nfa with {} states", nfa.state_count());
	Ok(nfa)
}

fn step<'a>(
	nfa: &mut Nfa,
	work: &mut Vec<(&'a Ast, StateId, StateId)>,
	node: &'a Ast,
	entry: StateId,
	exit: StateId,
	oracle: &dyn PropertyOracle,
) -> Result<(), BuildError> {
	match node {
		Ast::Pattern(alts) | Ast::Group(alts) => {
			for alt in alts {
				work.push((alt, entry, exit));
			}
		}
		Ast::Expression(items) => {
			if items.is_empty() {
				nfa.prepend(entry, Transition::Epsilon, exit);
			} else {
				let mut states = Vec::with_capacity(items.len() + 1);
				states.push(entry);
				for _ in 1..items.len() {
					states.push(nfa.new_state());
				}
				states.push(exit);
				for (i, item) in items.iter().enumerate() {
					work.push((item, states[i], states[i + 1]));
				}
			}
		}
		Ast::MatchAny => utf8::connect_any(nfa, entry, exit),
		Ast::MatchCharacter(c) => utf8::connect_value(nfa, entry, exit, *c),
		Ast::MatchRange(lo, hi) => utf8::connect_range(nfa, entry, exit, *lo, *hi),
		Ast::MatchSet(items, inverted) => {
			if *inverted {
				crate::debug!("rejecting unimplemented construct: character set inversion");
				return Err(BuildError::Unimplemented("character set inversion"));
			}
			for item in items {
				work.push((item, entry, exit));
			}
		}
		Ast::MatchClass(class) => expand_class(nfa, entry, exit, *class, oracle)?,
		Ast::POSIXClass(class) => expand_posix(nfa, entry, exit, *class, oracle)?,
		Ast::MatchProperty(name) => connect_properties(nfa, entry, exit, oracle, &[name.as_str()])?,
		Ast::Quantified(item, quantifier) => build_quantified(nfa, work, item, *quantifier, entry, exit),
	}
	Ok(())
}

fn build_quantified<'a>(
	nfa: &mut Nfa,
	work: &mut Vec<(&'a Ast, StateId, StateId)>,
	item: &'a Ast,
	quantifier: Quantifier,
	entry: StateId,
	exit: StateId,
) {
	match quantifier {
		Quantifier::Optional => {
			work.push((item, entry, exit));
			nfa.append(entry, Transition::Epsilon, exit);
		}
		Quantifier::Star => {
			work.push((item, entry, entry));
			nfa.append(entry, Transition::Epsilon, exit);
		}
		Quantifier::Plus => {
			work.push((item, entry, exit));
			nfa.append(exit, Transition::Epsilon, entry);
		}
		Quantifier::Range { min: 0, max: None } => {
			// {0,} is exactly `*`.
			work.push((item, entry, entry));
			nfa.append(entry, Transition::Epsilon, exit);
		}
		Quantifier::Range { min, max: None } => {
			let chain = allocate_chain(nfa, entry, exit, min);
			for i in 0..min as usize {
				work.push((item, chain[i], chain[i + 1]));
			}
			// The unbounded tail: loop the last mandatory segment.
			nfa.append(exit, Transition::Epsilon, chain[chain.len() - 2]);
		}
		Quantifier::Range { min: _, max: Some(0) } => {
			// {0,0}: matches only the empty string.
			nfa.append(entry, Transition::Epsilon, exit);
		}
		Quantifier::Range { min, max: Some(max) } => {
			let chain = allocate_chain(nfa, entry, exit, max);
			for i in 0..max as usize {
				work.push((item, chain[i], chain[i + 1]));
			}
			// Optional tail after each repetition count in [min, max).
			for i in min..max {
				nfa.append(chain[i as usize], Transition::Epsilon, exit);
			}
		}
	}
}

/// Builds a chain of `count` edges from `entry` to `exit`, allocating
/// `count - 1` fresh intermediate states, and returns the `count + 1`
/// states in order (`chain[0] == entry`, `chain[count] == exit`).
fn allocate_chain(nfa: &mut Nfa, entry: StateId, exit: StateId, count: u32) -> Vec<StateId> {
	debug_assert!(count >= 1);
	let mut chain = Vec::with_capacity(count as usize + 1);
	chain.push(entry);
	for _ in 1..count {
		chain.push(nfa.new_state());
	}
	chain.push(exit);
	chain
}

fn expand_class(
	nfa: &mut Nfa,
	entry: StateId,
	exit: StateId,
	class: CharClass,
	oracle: &dyn PropertyOracle,
) -> Result<(), BuildError> {
	match class {
		CharClass::Digit => connect_properties(nfa, entry, exit, oracle, &["decimal_number"]),
		CharClass::Hex => {
			connect_literal_ranges(nfa, entry, exit, &[('0', '9'), ('A', 'F'), ('a', 'f')]);
			Ok(())
		}
		CharClass::Space => {
			connect_literal_ranges(nfa, entry, exit, &[('\t', '\r'), (' ', ' ')]);
			Ok(())
		}
		CharClass::Word => {
			connect_literal_ranges(nfa, entry, exit, &[('0', '9'), ('_', '_'), ('A', 'Z'), ('a', 'z')]);
			Ok(())
		}
	}
}

fn expand_posix(
	nfa: &mut Nfa,
	entry: StateId,
	exit: StateId,
	class: PosixClass,
	oracle: &dyn PropertyOracle,
) -> Result<(), BuildError> {
	match class {
		PosixClass::Alnum => connect_properties(nfa, entry, exit, oracle, &["letter", "mark", "decimal_number"]),
		PosixClass::Alpha => connect_properties(nfa, entry, exit, oracle, &["letter", "mark"]),
		PosixClass::Ascii => connect_properties(nfa, entry, exit, oracle, &["ascii"]),
		PosixClass::Blank => {
			connect_properties(nfa, entry, exit, oracle, &["space_separator"])?;
			connect_literal_ranges(nfa, entry, exit, &[('\t', '\t')]);
			Ok(())
		}
		PosixClass::Cntrl => connect_properties(
			nfa,
			entry,
			exit,
			oracle,
			&["control", "format", "unassigned", "private_use", "surrogate"],
		),
		PosixClass::Digit => connect_properties(nfa, entry, exit, oracle, &["decimal_number"]),
		PosixClass::Lower => connect_properties(nfa, entry, exit, oracle, &["lowercase_letter"]),
		PosixClass::Upper => connect_properties(nfa, entry, exit, oracle, &["uppercase_letter"]),
		PosixClass::XDigit => {
			connect_literal_ranges(nfa, entry, exit, &[('0', '9'), ('A', 'F'), ('a', 'f')]);
			Ok(())
		}
		PosixClass::Punct => {
			connect_properties(
				nfa,
				entry,
				exit,
				oracle,
				&[
					"connector_punctuation",
					"dash_punctuation",
					"open_punctuation",
					"close_punctuation",
					"initial_punctuation",
					"final_punctuation",
					"other_punctuation",
				],
			)?;
			connect_literal_ranges(
				nfa,
				entry,
				exit,
				&[('$', '$'), ('+', '+'), ('<', '<'), ('=', '='), ('>', '>'), ('^', '^'), ('`', '`'), ('|', '|'), ('~', '~')],
			);
			Ok(())
		}
		PosixClass::Space => {
			connect_properties(nfa, entry, exit, oracle, &["space_separator", "line_separator", "paragraph_separator"])?;
			connect_literal_ranges(nfa, entry, exit, &[('\t', '\r'), ('\u{85}', '\u{85}')]);
			Ok(())
		}
		PosixClass::Word => connect_properties(nfa, entry, exit, oracle, &["letter", "mark", "decimal_number", "connector_punctuation"]),
		PosixClass::Graph => {
			crate::debug!("rejecting unimplemented construct: [:graph:]");
			Err(BuildError::Unimplemented("[:graph:]"))
		}
		PosixClass::Print => {
			crate::debug!("rejecting unimplemented construct: [:print:]");
			Err(BuildError::Unimplemented("[:print:]"))
		}
	}
}

fn connect_properties(
	nfa: &mut Nfa,
	entry: StateId,
	exit: StateId,
	oracle: &dyn PropertyOracle,
	names: &[&str],
) -> Result<(), BuildError> {
	for &name in names {
		let ranges = match oracle.query(name) {
			Ok(ranges) => ranges,
			Err(err) => {
				crate::debug!("rejecting unknown unicode property: {name}");
				return Err(err);
			}
		};
		for (lo, hi) in ranges {
			utf8::connect_range(nfa, entry, exit, lo, hi);
		}
	}
	Ok(())
}

fn connect_literal_ranges(nfa: &mut Nfa, entry: StateId, exit: StateId, ranges: &[(char, char)]) {
	for &(lo, hi) in ranges {
		utf8::connect_range(nfa, entry, exit, lo, hi);
	}
}
