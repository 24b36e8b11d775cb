//! Property-based check of §8's headline invariant: every matching
//! strategy agrees, for every input, on every pattern this crate can
//! build.

use proptest::prelude::*;
use rexa_automata::ast::{Ast, CharClass, Quantifier};
use rexa_automata::matcher::{backtrack, deterministic, lazy};
use rexa_automata::unicode::BuiltinOracle;
use rexa_automata::{bytecode, determinize, thompson};

fn sample_patterns() -> Vec<Ast> {
	vec![
		Ast::literal("abc"),
		Ast::Pattern(vec![Ast::literal("cat"), Ast::literal("dog")]),
		Ast::Quantified(Box::new(Ast::MatchCharacter('a')), Quantifier::Star),
		Ast::Quantified(Box::new(Ast::MatchCharacter('a')), Quantifier::Plus),
		Ast::Quantified(Box::new(Ast::MatchClass(CharClass::Digit)), Quantifier::Range { min: 2, max: Some(4) }),
		Ast::Expression(vec![
			Ast::Quantified(Box::new(Ast::MatchClass(CharClass::Word)), Quantifier::Star),
			Ast::MatchCharacter('!'),
		]),
	]
}

proptest! {
	#[test]
	fn every_strategy_agrees_on_every_pattern(input in proptest::collection::vec(any::<u8>(), 0..12)) {
		for ast in sample_patterns() {
			let nfa = thompson::build(&ast, &BuiltinOracle).unwrap();
			let dfa = determinize::determinize(&nfa);
			let program = bytecode::compile(&nfa);

			let b = backtrack::is_match(&nfa, &input);
			let d = deterministic::is_match(&dfa, &input);
			let l = lazy::is_match(&nfa, &input);
			let p = bytecode::is_match(&program, &input);

			prop_assert_eq!(b, d, "backtrack vs deterministic diverged on {:?}", input);
			prop_assert_eq!(d, l, "deterministic vs lazy diverged on {:?}", input);
			prop_assert_eq!(l, p, "lazy vs bytecode diverged on {:?}", input);
		}
	}
}
