//! Encoder correctness (§8): `connect_value`/`connect_range` must accept
//! exactly the UTF-8 encoding of the codepoints they were built from.
//! Exercised at the boundaries the encoder itself treats specially (ASCII
//! edge, each encoded-width edge, the surrogate gap) rather than as an
//! exhaustive sweep of all 1.1M scalar values.

use rexa_automata::matcher::backtrack::is_match;
use rexa_automata::nfa::Nfa;
use rexa_automata::utf8::{connect_any, connect_range, connect_value};

fn boundary_codepoints() -> Vec<char> {
	[
		0x00, 0x01, 0x7f, // ASCII edges
		0x80, 0x7ff, // two-byte edges
		0x800, 0xd7ff, 0xe000, 0xffff, // three-byte edges either side of the surrogate gap
		0x10000, 0x10ffff, // four-byte edges
		0x3b1, 0x4e2d, // arbitrary interior values (Greek alpha, CJK)
	]
	.into_iter()
	.map(|cp| char::from_u32(cp).unwrap())
	.collect()
}

#[test]
fn connect_value_accepts_exactly_its_own_encoding() {
	for cp in boundary_codepoints() {
		let mut nfa = Nfa::new();
		let (a, b) = (nfa.initial(), nfa.accept());
		connect_value(&mut nfa, a, b, cp);

		let mut buf = [0u8; 4];
		let encoded = cp.encode_utf8(&mut buf).as_bytes();
		assert!(is_match(&nfa, encoded), "should accept utf8({cp:?})");

		// A different codepoint's encoding must not also be accepted,
		// unless it happens to share the same byte length and we got
		// unlucky — so pick something far away with a different width
		// where possible.
		let other = if cp as u32 == 0 { '\u{10ffff}' } else { '\u{0}' };
		let mut other_buf = [0u8; 4];
		let other_encoded = other.encode_utf8(&mut other_buf).as_bytes();
		if other_encoded != encoded {
			assert!(!is_match(&nfa, other_encoded), "should reject utf8({other:?})");
		}
	}
}

#[test]
fn connect_range_accepts_every_member_and_only_members() {
	// A range spanning a width boundary (two-byte into three-byte).
	let (lo, hi) = ('\u{700}', '\u{1000}');
	let mut nfa = Nfa::new();
	let (a, b) = (nfa.initial(), nfa.accept());
	connect_range(&mut nfa, a, b, lo, hi);

	for cp in ['\u{700}', '\u{7ff}', '\u{800}', '\u{900}', '\u{1000}'] {
		let mut buf = [0u8; 4];
		let encoded = cp.encode_utf8(&mut buf).as_bytes();
		assert!(is_match(&nfa, encoded), "{cp:?} should be in [{lo:?}, {hi:?}]");
	}
	for cp in ['\u{6ff}', '\u{1001}'] {
		let mut buf = [0u8; 4];
		let encoded = cp.encode_utf8(&mut buf).as_bytes();
		assert!(!is_match(&nfa, encoded), "{cp:?} should be outside [{lo:?}, {hi:?}]");
	}
}

#[test]
fn connect_any_accepts_one_to_four_byte_sequences() {
	let mut nfa = Nfa::new();
	let (a, b) = (nfa.initial(), nfa.accept());
	connect_any(&mut nfa, a, b);

	for cp in ['a', '\u{7ff}', '\u{ffff}', '\u{10ffff}'] {
		let mut buf = [0u8; 4];
		let encoded = cp.encode_utf8(&mut buf).as_bytes();
		assert!(is_match(&nfa, encoded));
	}
}
