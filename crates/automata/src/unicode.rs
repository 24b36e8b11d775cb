//! The Unicode property oracle of §6.3: a read-only `query(name) -> ranges`
//! lookup, backed by a lazily populated, append-only, process-wide cache
//! (§5).
//!
//! Full UCD table generation is an external collaborator per `spec.md` §1 —
//! this module ships a hand-maintained table covering exactly the classes
//! §6.2 names (general categories, a handful of scripts, and the `ascii`
//! binary property), behind the same [`PropertyOracle`] trait a generated,
//! complete table could implement instead.

use crate::error::BuildError;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// A read-only Unicode property lookup.
///
/// `query` accepts both `key=value` (e.g. `general_category=letter`) and a
/// bare `key` tried in the order §6.3 specifies: core property, general
/// category, miscellaneous/binary property, script extension, script.
pub trait PropertyOracle {
	fn query(&self, name: &str) -> Result<Vec<(char, char)>, BuildError>;
}

/// The default, built-in oracle. Caches each resolved query process-wide
/// the first time it's asked for; the cache only ever grows (§5), so reads
/// after the first are lock-free in spirit (a `RwLock` read guard here,
/// since std has no lock-free map, but writers never block a steady-state
/// reader population).
#[derive(Debug, Default)]
pub struct BuiltinOracle;

fn cache() -> &'static RwLock<HashMap<String, Vec<(char, char)>>> {
	static CACHE: OnceLock<RwLock<HashMap<String, Vec<(char, char)>>>> = OnceLock::new();
	CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

impl PropertyOracle for BuiltinOracle {
	fn query(&self, name: &str) -> Result<Vec<(char, char)>, BuildError> {
		if let Some(hit) = cache().read().unwrap().get(name) {
			return Ok(hit.clone());
		}

		let resolved = resolve(name)?;
		cache().write().unwrap().insert(name.to_string(), resolved.clone());
		Ok(resolved)
	}
}

fn resolve(name: &str) -> Result<Vec<(char, char)>, BuildError> {
	let (key, value) = match name.split_once('=') {
		Some((k, v)) => (k.trim(), Some(v.trim())),
		None => (name.trim(), None),
	};
	let key = key.to_ascii_lowercase();
	let bare = value.unwrap_or(&key);

	// 1. core properties (handled directly by the engine: none beyond what
	//    general categories already cover in this minimal table).
	// 2. general_category=value, or a bare general-category name.
	if key == "general_category" || key == "gc" {
		if let Some(v) = value {
			return general_category(v).ok_or_else(|| BuildError::UnknownProperty(name.to_string()));
		}
	}
	if let Some(ranges) = general_category(bare) {
		return Ok(ranges);
	}

	// 3. miscellaneous / binary properties.
	if key == "ascii" || bare.eq_ignore_ascii_case("ascii") {
		return Ok(vec![('\u{0}', '\u{7f}')]);
	}

	// 4/5. script (and script extension, treated identically here).
	if key == "script" || key == "scx" || key == "sc" {
		if let Some(v) = value {
			return script(v).ok_or_else(|| BuildError::UnknownProperty(name.to_string()));
		}
	}
	if let Some(ranges) = script(bare) {
		return Ok(ranges);
	}

	Err(BuildError::UnknownProperty(name.to_string()))
}

/// General categories, and the `letter`/`mark` aggregates §6.3 calls out by
/// name. Ranges are a practical, not exhaustive, approximation — see the
/// module docs.
fn general_category(name: &str) -> Option<Vec<(char, char)>> {
	let name = name.to_ascii_lowercase().replace([' ', '-'], "_");
	Some(match name.as_str() {
		"decimal_number" | "nd" | "digit" => vec![
			('0', '9'),
			('\u{0660}', '\u{0669}'), // Arabic-Indic digits
			('\u{06f0}', '\u{06f9}'), // Extended Arabic-Indic digits
			('\u{0966}', '\u{096f}'), // Devanagari digits
			('\u{ff10}', '\u{ff19}'), // Fullwidth digits
		],
		"lowercase_letter" | "ll" => vec![
			('a', 'z'),
			('\u{00df}', '\u{00f6}'),
			('\u{00f8}', '\u{00ff}'),
			('\u{0430}', '\u{044f}'), // Cyrillic lowercase
		],
		"uppercase_letter" | "lu" => vec![
			('A', 'Z'),
			('\u{00c0}', '\u{00d6}'),
			('\u{00d8}', '\u{00de}'),
			('\u{0410}', '\u{042f}'), // Cyrillic uppercase
		],
		"titlecase_letter" | "lt" => vec![('\u{01c5}', '\u{01c5}'), ('\u{01c8}', '\u{01c8}')],
		"modifier_letter" | "lm" => vec![('\u{02b0}', '\u{02c1}')],
		"other_letter" | "lo" => vec![
			('\u{4e00}', '\u{9fff}'), // CJK Unified Ideographs
			('\u{3040}', '\u{309f}'), // Hiragana
			('\u{30a0}', '\u{30ff}'), // Katakana
			('\u{ac00}', '\u{d7a3}'), // Hangul syllables
		],
		"letter" | "l" => {
			let mut v = general_category("lowercase_letter").unwrap();
			v.extend(general_category("uppercase_letter").unwrap());
			v.extend(general_category("titlecase_letter").unwrap());
			v.extend(general_category("modifier_letter").unwrap());
			v.extend(general_category("other_letter").unwrap());
			v
		}
		"nonspacing_mark" | "mn" => vec![('\u{0300}', '\u{036f}')],
		"spacing_mark" | "mc" => vec![('\u{0903}', '\u{0903}')],
		"enclosing_mark" | "me" => vec![('\u{0488}', '\u{0489}')],
		"mark" | "m" => {
			let mut v = general_category("nonspacing_mark").unwrap();
			v.extend(general_category("spacing_mark").unwrap());
			v.extend(general_category("enclosing_mark").unwrap());
			v
		}
		"control" | "cc" => vec![('\u{0}', '\u{1f}'), ('\u{7f}', '\u{9f}')],
		"format" | "cf" => vec![
			('\u{00ad}', '\u{00ad}'),
			('\u{200b}', '\u{200f}'),
			('\u{202a}', '\u{202e}'),
			('\u{feff}', '\u{feff}'),
		],
		"private_use" | "co" => vec![
			('\u{e000}', '\u{f8ff}'),
			('\u{f0000}', '\u{ffffd}'),
			('\u{100000}', '\u{10fffd}'),
		],
		"surrogate" | "cs" => vec![('\u{d800}', '\u{dfff}')],
		// Exact "unassigned" requires a complete UCD table (out of scope,
		// §1); this minimal oracle reports none.
		"unassigned" | "cn" => vec![],
		"connector_punctuation" | "pc" => vec![('_', '_'), ('\u{203f}', '\u{2040}')],
		"dash_punctuation" | "pd" => vec![('-', '-'), ('\u{2010}', '\u{2015}')],
		"open_punctuation" | "ps" => vec![('(', '('), ('[', '['), ('{', '{')],
		"close_punctuation" | "pe" => vec![(')', ')'), (']', ']'), ('}', '}')],
		"initial_punctuation" | "pi" => vec![('\u{2018}', '\u{2018}'), ('\u{201c}', '\u{201c}')],
		"final_punctuation" | "pf" => vec![('\u{2019}', '\u{2019}'), ('\u{201d}', '\u{201d}')],
		"other_punctuation" | "po" => vec![
			('!', '!'),
			('"', '"'),
			('#', '#'),
			('%', '%'),
			('&', '&'),
			('\'', '\''),
			('*', '*'),
			(',', ','),
			('.', '.'),
			('/', '/'),
			(':', ':'),
			(';', ';'),
			('?', '?'),
			('@', '@'),
			('\\', '\\'),
		],
		"space_separator" | "zs" => vec![(' ', ' '), ('\u{00a0}', '\u{00a0}')],
		"line_separator" | "zl" => vec![('\u{2028}', '\u{2028}')],
		"paragraph_separator" | "zp" => vec![('\u{2029}', '\u{2029}')],
		_ => return None,
	})
}

fn script(name: &str) -> Option<Vec<(char, char)>> {
	let name = name.to_ascii_lowercase();
	Some(match name.as_str() {
		"latin" => vec![('A', 'Z'), ('a', 'z'), ('\u{00c0}', '\u{024f}')],
		"greek" => vec![('\u{0370}', '\u{03ff}')],
		"cyrillic" => vec![('\u{0400}', '\u{04ff}')],
		"han" => vec![('\u{4e00}', '\u{9fff}')],
		"hiragana" => vec![('\u{3040}', '\u{309f}')],
		"katakana" => vec![('\u{30a0}', '\u{30ff}')],
		"common" => vec![('\u{0}', '\u{40}')],
		_ => return None,
	})
}
