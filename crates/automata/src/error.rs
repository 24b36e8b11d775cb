use thiserror::Error;

/// Errors raised while lowering an [`crate::ast::Ast`] into an [`crate::nfa::Nfa`].
///
/// Per `spec.md` §7, these are the only two fatal conditions the builder can
/// hit; anything else (an internal invariant violation during subset
/// construction) is a compiler bug and panics instead of returning an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
	/// A construct named by the AST but intentionally left unimplemented:
	/// `[:graph:]`, `[:print:]`, set inversion, anchors.
	#[error("unimplemented construct: {0}")]
	Unimplemented(&'static str),

	/// `MatchProperty` named a property the Unicode oracle doesn't know.
	#[error("unknown unicode property: {0}")]
	UnknownProperty(String),

	/// The state builder ran out of state identifiers.
	#[error("automaton exceeded the maximum number of states")]
	TooManyStates,
}
