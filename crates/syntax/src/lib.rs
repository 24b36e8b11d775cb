//! Common syntax transforms sitting between a concrete-syntax parser and
//! `rexa-automata`'s Thompson construction.
//!
//! Currently just one: making a pattern unanchored (§4.4/§6.4).

use rexa_automata::ast::{Ast, Quantifier};

/// Rewrites `ast` in place into `.* ast`, so that matching the result
/// against an input amounts to finding `ast` anywhere in that input
/// rather than requiring it to match from the very first byte.
///
/// Anchors (`^`, `$`) aren't part of the node set this crate's builder
/// understands (`spec.md` §7 rejects them as unimplemented), so there's no
/// existing anchor to collide with by always prefixing.
pub fn make_unanchored(ast: &mut Ast) {
	replace_with::replace_with_or_abort(ast, |ast| {
		Ast::Expression(vec![Ast::Quantified(Box::new(Ast::MatchAny), Quantifier::Star), ast])
	});
}
