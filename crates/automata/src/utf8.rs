//! The UTF-8 encoder of §4.1: lowers a codepoint or a codepoint range into
//! one or more sequences of per-byte ranges, each sequence encoding exactly
//! the UTF-8 byte representations of a contiguous slice of that range.
//!
//! A range of scalar values generally cannot be expressed as a single
//! sequence of byte ranges once it crosses an encoded-length boundary (e.g.
//! `U+0700..=U+1000` spans both two-byte and three-byte encodings) or a
//! leading-byte boundary within one length (`U+0700..=U+1000` needs more
//! than one three-byte sequence once the second byte's range would
//! otherwise have to vary per leading byte). [`Utf8Sequences`] produces the
//! minimal set of such sequences.

use crate::nfa::Nfa;
use crate::transition::Transition;

const MAX_UTF8_BYTES: usize = 4;

/// One inclusive range of bytes, used as a single position within a
/// [`Utf8Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Range {
	pub start: u8,
	pub end: u8,
}

impl Utf8Range {
	fn new(start: u8, end: u8) -> Self {
		Utf8Range { start, end }
	}
}

/// A sequence of one to four successive byte ranges. A byte string matches
/// the sequence iff it has the same length and each byte falls in the
/// corresponding range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utf8Sequence {
	One([Utf8Range; 1]),
	Two([Utf8Range; 2]),
	Three([Utf8Range; 3]),
	Four([Utf8Range; 4]),
}

impl Utf8Sequence {
	fn from_encoded_range(start: &[u8], end: &[u8]) -> Self {
		assert_eq!(start.len(), end.len());
		match start.len() {
			1 => Utf8Sequence::One([Utf8Range::new(start[0], end[0])]),
			2 => Utf8Sequence::Two([
				Utf8Range::new(start[0], end[0]),
				Utf8Range::new(start[1], end[1]),
			]),
			3 => Utf8Sequence::Three([
				Utf8Range::new(start[0], end[0]),
				Utf8Range::new(start[1], end[1]),
				Utf8Range::new(start[2], end[2]),
			]),
			4 => Utf8Sequence::Four([
				Utf8Range::new(start[0], end[0]),
				Utf8Range::new(start[1], end[1]),
				Utf8Range::new(start[2], end[2]),
				Utf8Range::new(start[3], end[3]),
			]),
			n => unreachable!("invalid encoded length: {n}"),
		}
	}

	pub fn as_slice(&self) -> &[Utf8Range] {
		match self {
			Utf8Sequence::One(r) => r,
			Utf8Sequence::Two(r) => r,
			Utf8Sequence::Three(r) => r,
			Utf8Sequence::Four(r) => r,
		}
	}
}

/// An iterator over the minimal set of [`Utf8Sequence`]s covering a range of
/// Unicode scalar values. Internally a worklist (never recursive), so
/// arbitrarily large ranges (e.g. the whole of `U+0000..=U+10FFFF`) don't
/// recurse through the call stack.
#[derive(Debug)]
pub struct Utf8Sequences {
	stack: Vec<ScalarRange>,
}

impl Utf8Sequences {
	pub fn new(start: u32, end: u32) -> Self {
		Utf8Sequences {
			stack: vec![ScalarRange { start, end }],
		}
	}
}

#[derive(Debug, Clone, Copy)]
struct ScalarRange {
	start: u32,
	end: u32,
}

impl ScalarRange {
	/// Splits this range in two if it straddles the surrogate gap
	/// `U+D800..=U+DFFF`, which has no UTF-8 encoding.
	fn split_at_surrogates(&self) -> Option<(ScalarRange, ScalarRange)> {
		if self.start < 0xe000 && self.end > 0xd7ff {
			Some((
				ScalarRange { start: self.start, end: 0xd7ff },
				ScalarRange { start: 0xe000, end: self.end },
			))
		} else {
			None
		}
	}

	fn is_valid(&self) -> bool {
		self.start <= self.end
	}

	fn is_ascii(&self) -> bool {
		self.is_valid() && self.end <= 0x7f
	}

	fn as_ascii(&self) -> Option<Utf8Range> {
		self.is_ascii()
			.then(|| Utf8Range::new(self.start as u8, self.end as u8))
	}

	fn encode(&self, start_buf: &mut [u8; MAX_UTF8_BYTES], end_buf: &mut [u8; MAX_UTF8_BYTES]) -> usize {
		let cs = char::from_u32(self.start).expect("valid scalar value");
		let ce = char::from_u32(self.end).expect("valid scalar value");
		let a = cs.encode_utf8(start_buf).len();
		let b = ce.encode_utf8(end_buf).len();
		assert_eq!(a, b, "start and end of a UTF-8 sequence must share a width");
		a
	}
}

fn max_scalar_value_for_width(width: usize) -> u32 {
	match width {
		1 => 0x007f,
		2 => 0x07ff,
		3 => 0xffff,
		4 => 0x10ffff,
		_ => unreachable!("invalid UTF-8 byte sequence width"),
	}
}

impl Iterator for Utf8Sequences {
	type Item = Utf8Sequence;

	fn next(&mut self) -> Option<Self::Item> {
		'outer: while let Some(mut r) = self.stack.pop() {
			loop {
				if let Some((lo, hi)) = r.split_at_surrogates() {
					self.stack.push(hi);
					r = lo;
					continue;
				}
				if !r.is_valid() {
					continue 'outer;
				}

				// Split at encoded-width boundaries so every remaining
				// range stays within one width bucket (§4.1 table).
				let mut split = false;
				for width in 1..MAX_UTF8_BYTES {
					let max = max_scalar_value_for_width(width);
					if r.start <= max && max < r.end {
						self.stack.push(ScalarRange { start: max + 1, end: r.end });
						r.end = max;
						split = true;
						break;
					}
				}
				if split {
					continue;
				}

				if let Some(ascii) = r.as_ascii() {
					return Some(Utf8Sequence::One([ascii]));
				}

				// Split at continuation-byte boundaries (1<<6 steps),
				// recursing finer whenever the leading bytes of `start`
				// and `end` would otherwise differ within one sequence —
				// per §4.1, width 2 splits at 1<<6, width 3 at 1<<12 then
				// 1<<6, width 4 at 1<<18, 1<<12, then 1<<6.
				let mut refined = false;
				for width in 1..MAX_UTF8_BYTES {
					let mask = (1u32 << (6 * width)) - 1;
					if (r.start & !mask) != (r.end & !mask) {
						if (r.start & mask) != 0 {
							self.stack.push(ScalarRange { start: (r.start | mask) + 1, end: r.end });
							r.end = r.start | mask;
							refined = true;
							break;
						}
						if (r.end & mask) != mask {
							self.stack.push(ScalarRange { start: r.end & !mask, end: r.end });
							r.end = (r.end & !mask) - 1;
							refined = true;
							break;
						}
					}
				}
				if refined {
					continue;
				}

				let mut start_buf = [0u8; MAX_UTF8_BYTES];
				let mut end_buf = [0u8; MAX_UTF8_BYTES];
				let width = r.encode(&mut start_buf, &mut end_buf);
				return Some(Utf8Sequence::from_encoded_range(&start_buf[..width], &end_buf[..width]));
			}
		}
		None
	}
}

/// Inserts fresh intermediate states and per-byte transitions between
/// `from` and `to` so that the resulting path accepts exactly the byte
/// strings matching `seq`. Per §4.1's fragment emission contract,
/// transitions are *prepended* to each source state's list (content paths
/// are eager/greedy).
fn emit(nfa: &mut Nfa, from: u32, to: u32, seq: &Utf8Sequence) {
	let ranges = seq.as_slice();
	let mut state = from;
	for (i, r) in ranges.iter().enumerate() {
		let target = if i + 1 == ranges.len() {
			to
		} else {
			nfa.new_state()
		};
		nfa.prepend(state, Transition::range(r.start, r.end), target);
		state = target;
	}
}

/// `connect_value`: encodes a single codepoint as a path of `Character`
/// transitions from `from` to `to`.
pub fn connect_value(nfa: &mut Nfa, from: u32, to: u32, codepoint: char) {
	let cp = codepoint as u32;
	for seq in Utf8Sequences::new(cp, cp) {
		emit(nfa, from, to, &seq);
	}
}

/// `connect_range`: encodes every codepoint in `lo..=hi` as a set of
/// alternative paths from `from` to `to`, one per [`Utf8Sequence`] the
/// encoder decomposes the range into.
pub fn connect_range(nfa: &mut Nfa, from: u32, to: u32, lo: char, hi: char) {
	for seq in Utf8Sequences::new(lo as u32, hi as u32) {
		emit(nfa, from, to, &seq);
	}
}

/// `connect_any`: equivalent to `connect_range(from, to, 0..=0x10FFFF)`.
pub fn connect_any(nfa: &mut Nfa, from: u32, to: u32) {
	connect_range(nfa, from, to, '\u{0}', '\u{10ffff}');
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sequences(lo: u32, hi: u32) -> Vec<Utf8Sequence> {
		Utf8Sequences::new(lo, hi).collect()
	}

	#[test]
	fn single_codepoint_is_one_sequence() {
		for cp in [0x41u32, 0x3b1, 0x1f600] {
			assert_eq!(sequences(cp, cp).len(), 1);
		}
	}

	#[test]
	fn ascii_range_is_one_byte_sequence() {
		let seqs = sequences(0x00, 0x7f);
		assert_eq!(seqs.len(), 1);
		match &seqs[0] {
			Utf8Sequence::One([r]) => assert_eq!((r.start, r.end), (0x00, 0x7f)),
			_ => panic!("expected a one-byte sequence"),
		}
	}

	#[test]
	fn never_covers_surrogates() {
		fn encode_surrogate(cp: u32) -> [u8; 3] {
			// Surrogates have no valid UTF-8 encoding; hand-encode the
			// (invalid) three-byte shape to check no sequence matches it.
			[
				0xe0 | ((cp >> 12) as u8 & 0x0f),
				0x80 | ((cp >> 6) as u8 & 0x3f),
				0x80 | (cp as u8 & 0x3f),
			]
		}
		for cp in 0xd800..0xe000 {
			let buf = encode_surrogate(cp);
			for seq in sequences(0, 0x10ffff) {
				let ranges = seq.as_slice();
				if ranges.len() == buf.len()
					&& ranges.iter().zip(buf.iter()).all(|(r, &b)| r.start <= b && b <= r.end)
				{
					panic!("sequence matched surrogate {cp:x}");
				}
			}
		}
	}

	#[test]
	fn bmp_matches_known_shape() {
		let seqs = sequences(0x0, 0xffff);
		// [0-7F], [C2-DF][80-BF], [E0][A0-BF][80-BF], [E1-EC][80-BF][80-BF],
		// [ED][80-9F][80-BF], [EE-EF][80-BF][80-BF]
		assert_eq!(seqs.len(), 6);
	}

	#[test]
	fn connect_value_produces_utf8_path() {
		let mut nfa = Nfa::new();
		let (a, b) = (nfa.new_state(), nfa.new_state());
		connect_value(&mut nfa, a, b, 'α'); // U+03B1, encodes to 0xCE 0xB1
		let mid = nfa.successors(a).next().unwrap().1;
		assert!(nfa.successors(a).any(|(t, _)| t == Transition::Character(0xce)));
		assert!(nfa.successors(mid).any(|(t, target)| t == Transition::Character(0xb1) && target == b));
	}

	#[test]
	fn connect_any_covers_ascii_and_multibyte() {
		let mut nfa = Nfa::new();
		let (a, b) = (nfa.new_state(), nfa.new_state());
		connect_any(&mut nfa, a, b);
		// At least one direct one-byte path (ASCII) and one multi-byte
		// leading-byte path must exist from `a`.
		assert!(nfa.successors(a).any(|(t, target)| target == b && matches!(t, Transition::Range(_, _) | Transition::Character(_))));
		assert!(nfa.successors(a).any(|(_, target)| target != b));
	}
}
