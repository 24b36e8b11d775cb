//! The four matching strategies of §4.4, each consuming the automaton
//! representation it needs and agreeing on one contract: `is_match`
//! returns whether the *entire* input byte string is accepted.
//!
//! Unanchored ("find anywhere") search is layered on top by prefixing the
//! pattern with an eager `.*`, not by these matchers themselves — see
//! `rexa-syntax`.

pub mod backtrack;
pub mod deterministic;
pub mod lazy;
