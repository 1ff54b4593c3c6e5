//! Character reference decoding.
//!
//! Only a narrow, stable subset is decoded: the named references the
//! serializer itself produces plus a handful of common ones, and
//! semicolon-terminated numeric references. Anything else is left as
//! written.

use std::borrow::Cow;

const NAMED: &[(&str, char)] = &[
	("amp", '&'),
	("lt", '<'),
	("gt", '>'),
	("quot", '"'),
	("apos", '\''),
	("nbsp", '\u{a0}'),
	("copy", '\u{a9}'),
	("reg", '\u{ae}'),
	("hellip", '\u{2026}'),
	("mdash", '\u{2014}'),
	("ndash", '\u{2013}'),
	("laquo", '\u{ab}'),
	("raquo", '\u{bb}'),
];

const MAX_HEX_DIGITS: usize = 6;
const MAX_DEC_DIGITS: usize = 7;

/// Decodes character references in `s`.
///
/// Returns the input unchanged (borrowed) when it contains no `&`.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
	if !s.contains('&') {
		return Cow::Borrowed(s);
	}

	let mut out = String::with_capacity(s.len());
	let mut rest = s;
	while let Some(amp) = rest.find('&') {
		out.push_str(&rest[..amp]);
		let after = &rest[amp + 1..];
		match decode_one(after) {
			Some((ch, consumed)) => {
				out.push(ch);
				rest = &after[consumed..];
			}
			None => {
				out.push('&');
				rest = after;
			}
		}
	}
	out.push_str(rest);
	Cow::Owned(out)
}

/// Decodes a single reference at the start of `s` (just past the `&`).
///
/// Returns the character and the number of bytes consumed, including `;`.
fn decode_one(s: &str) -> Option<(char, usize)> {
	if let Some(numeric) = s.strip_prefix('#') {
		let (digits, radix, prefix) = match numeric.strip_prefix(['x', 'X']) {
			Some(hex) => (hex, 16, 2),
			None => (numeric, 10, 1),
		};
		let max = if radix == 16 {
			MAX_HEX_DIGITS
		} else {
			MAX_DEC_DIGITS
		};
		let end = digits.find(';')?;
		if end == 0 || end > max {
			return None;
		}
		let code = u32::from_str_radix(&digits[..end], radix).ok()?;
		let ch = char::from_u32(code)?;
		return Some((ch, prefix + end + 1));
	}

	let end = s.find(';')?;
	let name = &s[..end];
	NAMED
		.iter()
		.find(|(n, _)| *n == name)
		.map(|(_, ch)| (*ch, end + 1))
}
