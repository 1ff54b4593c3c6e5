//! Markup checksums.
//!
//! The server appends `data-rh-checksum="<adler32>"` as the last attribute
//! of the root tag. The checksum covers the markup exactly as emitted
//! without that attribute, so [`validate`] strips it and recomputes.

use super::markers::HYDRATION_ATTR_CHECKSUM;

const MOD_ADLER: u32 = 65_521;

// Largest n such that 255n(n+1)/2 + (n+1)(MOD_ADLER-1) fits in a u32.
const NMAX: usize = 5_552;

/// Adler-32 of `bytes`.
pub fn adler32(bytes: &[u8]) -> u32 {
	let mut a: u32 = 1;
	let mut b: u32 = 0;
	for chunk in bytes.chunks(NMAX) {
		for &byte in chunk {
			a += u32::from(byte);
			b += a;
		}
		a %= MOD_ADLER;
		b %= MOD_ADLER;
	}
	(b << 16) | a
}

/// Byte range of the first tag's closing `>` or `/>`.
///
/// `None` unless `markup` starts with an element.
fn first_tag_end(markup: &str) -> Option<usize> {
	let rest = markup.strip_prefix('<')?;
	if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
		return None;
	}
	let mut quote = None;
	for (i, c) in markup.char_indices() {
		match (quote, c) {
			(Some(q), c) if c == q => quote = None,
			(Some(_), _) => {}
			(None, '"' | '\'') => quote = Some(c),
			(None, '>') => {
				let self_closing = i > 0 && markup.as_bytes()[i - 1] == b'/';
				return Some(if self_closing { i - 1 } else { i });
			}
			(None, _) => {}
		}
	}
	None
}

/// Appends the checksum attribute to the root tag of `markup`.
///
/// Markup that does not start with an element (a root that rendered
/// nothing) is returned unchanged.
pub fn add_checksum(markup: &str) -> String {
	let Some(end) = first_tag_end(markup) else {
		return markup.to_string();
	};
	let checksum = adler32(markup.as_bytes());
	let attribute = format!(" {}=\"{}\"", HYDRATION_ATTR_CHECKSUM, checksum);
	let mut out = String::with_capacity(markup.len() + attribute.len());
	out.push_str(&markup[..end]);
	out.push_str(&attribute);
	out.push_str(&markup[end..]);
	out
}

/// Splits the checksum attribute off the root tag.
///
/// Returns the checksum and the markup without the attribute, or `None` if
/// the root tag carries no parseable checksum.
pub fn extract_checksum(markup: &str) -> Option<(u32, String)> {
	let end = first_tag_end(markup)?;
	let needle = format!(" {}=\"", HYDRATION_ATTR_CHECKSUM);
	let start = markup[..end].rfind(&needle)?;
	let digits_start = start + needle.len();
	let digits_len = markup[digits_start..end].find('"')?;
	let checksum = markup[digits_start..digits_start + digits_len].parse().ok()?;
	let attribute_end = digits_start + digits_len + 1;

	let mut stripped = String::with_capacity(markup.len());
	stripped.push_str(&markup[..start]);
	stripped.push_str(&markup[attribute_end..]);
	Some((checksum, stripped))
}

/// Whether the checksum carried by `markup` matches its content.
///
/// Markup without a checksum is not valid.
pub fn validate(markup: &str) -> bool {
	match extract_checksum(markup) {
		Some((expected, stripped)) => adler32(stripped.as_bytes()) == expected,
		None => false,
	}
}
