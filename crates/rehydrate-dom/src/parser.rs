//! Lenient markup parser.
//!
//! The parser is a single forward scan that builds nodes directly into a
//! [`Document`]. It understands exactly what the server renderer emits and
//! tolerates common hand-written markup:
//!
//! - tag and attribute names keep their case; the first duplicate attribute wins
//! - void elements and `/>` close immediately
//! - comments are kept, doctypes and other `<!` constructs are skipped
//! - `script` and `style` hold raw text, `textarea` and `title` hold escapable raw text
//! - one leading newline is dropped inside `pre`, `textarea` and `listing`
//! - `svg` and `math` switch namespace until their end tag
//!
//! There are no implied end tags: an end tag closes the nearest open element
//! with the same name and stray end tags are ignored.
//!
//! Every element remembers the byte range of `markup` it was parsed from, so
//! the exact received text stays available through [`Document::source_markup`].
//! An element closed implicitly by an ancestor's end tag ends where that end
//! tag ends. One left open at the end of input runs to the end.

use crate::document::Document;
use crate::entities::decode_entities;
use crate::node::{Namespace, NodeId};
use crate::serialize::{is_raw_text_element, is_void_element, needs_leading_newline};
use std::rc::Rc;

/// Parses `markup` and appends the resulting nodes to `parent`.
pub fn parse_fragment(doc: &mut Document, parent: NodeId, markup: &str) {
	let mut parser = Parser {
		doc,
		input: markup,
		source: Rc::from(markup),
		pos: 0,
		stack: vec![Open {
			node: parent,
			start: 0,
		}],
		text: String::new(),
	};
	parser.run();
}

struct Parser<'a, 'd> {
	doc: &'d mut Document,
	input: &'a str,
	source: Rc<str>,
	pos: usize,
	stack: Vec<Open>,
	text: String,
}

/// An element whose end tag has not been seen yet.
struct Open {
	node: NodeId,
	start: usize,
}

struct StartTag {
	name: String,
	attributes: Vec<(String, String)>,
	self_closing: bool,
}

impl<'a, 'd> Parser<'a, 'd> {
	fn rest(&self) -> &'a str {
		&self.input[self.pos..]
	}

	fn current(&self) -> NodeId {
		// the stack never pops its first entry
		self.stack[self.stack.len() - 1].node
	}

	fn close(&mut self, node: NodeId, start: usize) {
		self.doc
			.record_source(node, Rc::clone(&self.source), start..self.pos);
	}

	/// Pops every open element above `depth`, recording each one's source.
	fn close_to(&mut self, depth: usize) {
		while self.stack.len() > depth {
			if let Some(open) = self.stack.pop() {
				self.close(open.node, open.start);
			}
		}
	}

	fn current_context(&self) -> (Namespace, String) {
		let node = self.current();
		match self.doc.element(node) {
			Some(el) => (el.namespace(), el.tag().to_string()),
			None => (Namespace::Html, String::new()),
		}
	}

	fn run(&mut self) {
		while self.pos < self.input.len() {
			let rest = self.rest();
			if rest.starts_with("<!--") {
				self.flush_text();
				self.comment();
			} else if rest.starts_with("<!") || rest.starts_with("<?") {
				self.flush_text();
				self.skip_declaration();
			} else if rest.starts_with("</") && starts_with_alpha(&rest[2..]) {
				self.flush_text();
				self.end_tag();
			} else if rest.starts_with('<') && starts_with_alpha(&rest[1..]) {
				self.flush_text();
				self.start_tag();
			} else {
				self.text_run();
			}
		}
		self.flush_text();
		if self.stack.len() > 1 {
			tracing::debug!(open = self.stack.len() - 1, "markup ended with unclosed elements");
			self.close_to(1);
		}
	}

	fn text_run(&mut self) {
		let rest = self.rest();
		// a '<' that does not start markup is literal text
		let skip = usize::from(rest.starts_with('<'));
		let end = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
		self.text.push_str(&rest[..end]);
		self.pos += end;
	}

	fn flush_text(&mut self) {
		if self.text.is_empty() {
			return;
		}
		let raw = std::mem::take(&mut self.text);
		let decoded = decode_entities(&raw);
		let node = self.doc.create_text(&decoded);
		let parent = self.current();
		self.doc.append_child(parent, node);
	}

	fn comment(&mut self) {
		let body = &self.rest()[4..];
		let (data, consumed) = match body.find("-->") {
			Some(end) => (&body[..end], 4 + end + 3),
			None => (body, 4 + body.len()),
		};
		let node = self.doc.create_comment(data);
		let parent = self.current();
		self.doc.append_child(parent, node);
		self.pos += consumed;
	}

	fn skip_declaration(&mut self) {
		let rest = self.rest();
		self.pos += rest.find('>').map_or(rest.len(), |i| i + 1);
	}

	fn end_tag(&mut self) {
		let rest = self.rest();
		let name_len = tag_name_len(&rest[2..]);
		let name = &rest[2..2 + name_len];
		self.pos += rest.find('>').map_or(rest.len(), |i| i + 1);

		let matched = self.stack.iter().skip(1).rposition(|open| {
			self.doc
				.tag_name(open.node)
				.is_some_and(|t| t.eq_ignore_ascii_case(name))
		});
		match matched {
			Some(i) => self.close_to(i + 1),
			None => tracing::debug!(tag = name, "ignoring stray end tag"),
		}
	}

	fn start_tag(&mut self) {
		let start = self.pos;
		let tag = self.read_start_tag();
		let (parent_ns, parent_tag) = self.current_context();
		let namespace = parent_ns.for_child(&parent_tag, &tag.name);
		let node = self.doc.create_element_ns(&tag.name, namespace);
		for (name, value) in &tag.attributes {
			if !self.doc.has_attribute(node, name) {
				self.doc.set_attribute(node, name, value);
			}
		}
		let parent = self.current();
		self.doc.append_child(parent, node);

		let html = namespace == Namespace::Html;
		if (html && is_void_element(&tag.name)) || (tag.self_closing && !html) {
			self.close(node, start);
			return;
		}
		if html && is_raw_text_element(&tag.name) {
			let text = self.raw_text(&tag.name);
			if !text.is_empty() {
				let child = self.doc.create_text(text);
				self.doc.append_child(node, child);
			}
			self.close(node, start);
			return;
		}
		if html
			&& (tag.name.eq_ignore_ascii_case("textarea") || tag.name.eq_ignore_ascii_case("title"))
		{
			let raw = self.raw_text(&tag.name);
			let raw = if tag.name.eq_ignore_ascii_case("textarea") {
				strip_leading_newline(raw)
			} else {
				raw
			};
			let text = decode_entities(raw);
			if !text.is_empty() {
				let child = self.doc.create_text(&text);
				self.doc.append_child(node, child);
			}
			self.close(node, start);
			return;
		}
		self.stack.push(Open { node, start });
		if html && needs_leading_newline(&tag.name) {
			if self.rest().starts_with("\r\n") {
				self.pos += 2;
			} else if self.rest().starts_with('\n') {
				self.pos += 1;
			}
		}
	}

	/// Consumes content up to and including `</name>` and returns the content.
	fn raw_text(&mut self, name: &str) -> &'a str {
		let rest = self.rest();
		let mut search = 0;
		while let Some(found) = rest[search..].find("</") {
			let at = search + found;
			let candidate = &rest[at + 2..];
			let len = tag_name_len(candidate);
			if candidate[..len].eq_ignore_ascii_case(name) {
				let close = candidate.find('>').map_or(rest.len(), |i| at + 2 + i + 1);
				self.pos += close;
				return &rest[..at];
			}
			search = at + 2;
		}
		self.pos += rest.len();
		rest
	}

	fn read_start_tag(&mut self) -> StartTag {
		let rest = self.rest();
		let name_len = tag_name_len(&rest[1..]);
		let name = rest[1..1 + name_len].to_string();
		let bytes = rest.as_bytes();
		let mut i = 1 + name_len;
		let mut attributes = Vec::new();
		let mut self_closing = false;

		loop {
			while i < bytes.len() && bytes[i].is_ascii_whitespace() {
				i += 1;
			}
			if i >= bytes.len() {
				break;
			}
			match bytes[i] {
				b'>' => {
					i += 1;
					break;
				}
				b'/' => {
					if bytes.get(i + 1) == Some(&b'>') {
						self_closing = true;
						i += 2;
						break;
					}
					i += 1;
				}
				_ => {
					let start = i;
					while i < bytes.len()
						&& !bytes[i].is_ascii_whitespace()
						&& !matches!(bytes[i], b'=' | b'>' | b'/')
					{
						i += 1;
					}
					if i == start {
						// a lone '=' cannot start a name
						i += 1;
						continue;
					}
					let attr_name = rest[start..i].to_string();
					let mut j = i;
					while j < bytes.len() && bytes[j].is_ascii_whitespace() {
						j += 1;
					}
					let mut value = String::new();
					if bytes.get(j) == Some(&b'=') {
						j += 1;
						while j < bytes.len() && bytes[j].is_ascii_whitespace() {
							j += 1;
						}
						match bytes.get(j) {
							Some(&q) if q == b'"' || q == b'\'' => {
								let body = &rest[j + 1..];
								let end = body.find(q as char).unwrap_or(body.len());
								value = decode_entities(&body[..end]).into_owned();
								j = (j + 1 + end + 1).min(bytes.len());
							}
							_ => {
								let start_value = j;
								while j < bytes.len()
									&& !bytes[j].is_ascii_whitespace()
									&& bytes[j] != b'>'
								{
									j += 1;
								}
								value = decode_entities(&rest[start_value..j]).into_owned();
							}
						}
						i = j;
					}
					attributes.push((attr_name, value));
				}
			}
		}

		self.pos += i;
		StartTag {
			name,
			attributes,
			self_closing,
		}
	}
}

fn starts_with_alpha(s: &str) -> bool {
	s.as_bytes().first().is_some_and(u8::is_ascii_alphabetic)
}

fn tag_name_len(s: &str) -> usize {
	s.bytes()
		.take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.'))
		.count()
}

fn strip_leading_newline(s: &str) -> &str {
	s.strip_prefix("\r\n")
		.or_else(|| s.strip_prefix('\n'))
		.unwrap_or(s)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::NodeData;
	use rstest::rstest;

	fn parse(markup: &str) -> (Document, NodeId) {
		let mut doc = Document::new();
		let root = doc.create_element("div");
		parse_fragment(&mut doc, root, markup);
		(doc, root)
	}

	#[test]
	fn test_parse_nested_elements_and_attributes() {
		let (doc, root) = parse("<ul class=\"list\"><li data-x='1'>a</li><li>b</li></ul>");
		let ul = doc.children(root)[0];
		assert_eq!(doc.tag_name(ul), Some("ul"));
		assert_eq!(doc.attribute(ul, "class"), Some("list"));
		let items = doc.children(ul);
		assert_eq!(items.len(), 2);
		assert_eq!(doc.attribute(items[0], "data-x"), Some("1"));
		assert_eq!(doc.text_content(items[1]), "b");
	}

	#[test]
	fn test_parse_preserves_case() {
		let (doc, root) = parse("<svg viewBox=\"0 0 1 1\"><foreignObject><Div></Div></foreignObject></svg>");
		let svg = doc.children(root)[0];
		assert_eq!(doc.namespace(svg), Some(Namespace::Svg));
		assert_eq!(doc.attribute(svg, "viewBox"), Some("0 0 1 1"));
		let foreign = doc.children(svg)[0];
		assert_eq!(doc.tag_name(foreign), Some("foreignObject"));
		assert_eq!(doc.namespace(foreign), Some(Namespace::Svg));
		let inner = doc.children(foreign)[0];
		assert_eq!(doc.tag_name(inner), Some("Div"));
		assert_eq!(doc.namespace(inner), Some(Namespace::Html));
	}

	#[rstest]
	#[case("<input value=\"a\"/><span></span>")]
	#[case("<input value=\"a\"><span></span>")]
	#[case("<br/><span></span>")]
	fn test_void_elements_close_immediately(#[case] markup: &str) {
		let (doc, root) = parse(markup);
		assert_eq!(doc.children(root).len(), 2);
		assert!(doc.children(doc.children(root)[0]).is_empty());
	}

	#[test]
	fn test_self_closing_foreign_element() {
		let (doc, root) = parse("<svg><circle r=\"1\"/><rect/></svg>");
		let svg = doc.children(root)[0];
		assert_eq!(doc.children(svg).len(), 2);
	}

	#[test]
	fn test_comments_are_kept() {
		let (doc, root) = parse("<!--rh-text:1.0-->hi<!--/rh-text-->");
		let children = doc.children(root);
		assert_eq!(children.len(), 3);
		assert_eq!(doc.data(children[0]).as_comment(), Some("rh-text:1.0"));
		assert_eq!(doc.data(children[1]).as_text(), Some("hi"));
		assert_eq!(doc.data(children[2]).as_comment(), Some("/rh-text"));
	}

	#[test]
	fn test_doctype_is_skipped() {
		let (doc, root) = parse("<!DOCTYPE html><p>x</p>");
		assert_eq!(doc.children(root).len(), 1);
	}

	#[test]
	fn test_entities_are_decoded() {
		let (doc, root) = parse("<a title=\"&quot;q&quot;\">&lt;b&gt; &amp; c</a>");
		let a = doc.children(root)[0];
		assert_eq!(doc.attribute(a, "title"), Some("\"q\""));
		assert_eq!(doc.text_content(a), "<b> & c");
	}

	#[test]
	fn test_literal_less_than_is_text() {
		let (doc, root) = parse("a < b");
		assert_eq!(doc.children(root).len(), 1);
		assert_eq!(doc.text_content(root), "a < b");
	}

	#[test]
	fn test_script_is_raw_text() {
		let (doc, root) = parse("<script>if (a < b && c) {}</script><p></p>");
		let script = doc.children(root)[0];
		assert_eq!(doc.text_content(script), "if (a < b && c) {}");
		assert_eq!(doc.children(root).len(), 2);
	}

	#[rstest]
	#[case("<pre>\nline</pre>", "line")]
	#[case("<pre>\n\nline</pre>", "\nline")]
	#[case("<textarea>\nvalue</textarea>", "value")]
	#[case("<textarea>&lt;b&gt;</textarea>", "<b>")]
	#[case("<textarea><b>x</b></textarea>", "<b>x</b>")]
	fn test_leading_newline_and_rcdata(#[case] markup: &str, #[case] expected: &str) {
		let (doc, root) = parse(markup);
		assert_eq!(doc.text_content(doc.children(root)[0]), expected);
	}

	#[test]
	fn test_stray_end_tag_is_ignored() {
		let (doc, root) = parse("<p>a</span>b</p>");
		let p = doc.children(root)[0];
		assert_eq!(doc.text_content(p), "ab");
	}

	#[test]
	fn test_end_tag_closes_nearest_match() {
		let (doc, root) = parse("<div><span>a</div>b");
		assert_eq!(doc.children(root).len(), 2);
		assert!(matches!(doc.data(doc.children(root)[1]), NodeData::Text(t) if t == "b"));
	}

	#[test]
	fn test_duplicate_attribute_first_wins() {
		let (doc, root) = parse("<p id=\"a\" id=\"b\"></p>");
		assert_eq!(doc.attribute(doc.children(root)[0], "id"), Some("a"));
	}

	#[test]
	fn test_unquoted_and_bare_attributes() {
		let (doc, root) = parse("<input type=checkbox checked disabled=\"\">");
		let input = doc.children(root)[0];
		assert_eq!(doc.attribute(input, "type"), Some("checkbox"));
		assert_eq!(doc.attribute(input, "checked"), Some(""));
		assert_eq!(doc.attribute(input, "disabled"), Some(""));
	}

	#[rstest]
	#[case("<p\tclass=\"a\">x<br >y</p>")]
	#[case("<ul><li>a<li>b</ul>")]
	#[case("<svg><circle r=\"1\"/></svg>")]
	#[case("<textarea>\nraw &amp; text</textarea>")]
	fn test_source_markup_is_the_received_text(#[case] markup: &str) {
		let (doc, root) = parse(&format!("{markup}<i>after</i>"));
		let children = doc.children(root);
		assert_eq!(doc.source_markup(children[0]), Some(markup));
		assert_eq!(doc.source_markup(children[1]), Some("<i>after</i>"));
	}

	#[test]
	fn test_source_markup_of_nested_and_unclosed_elements() {
		let (doc, root) = parse("<div><span>a</div><p>open");
		let div = doc.children(root)[0];
		let span = doc.children(div)[0];
		let p = doc.children(root)[1];
		assert_eq!(doc.source_markup(span), Some("<span>a</div>"));
		assert_eq!(doc.source_markup(div), Some("<div><span>a</div>"));
		assert_eq!(doc.source_markup(p), Some("<p>open"));
		assert_eq!(doc.source_markup(root), None);
	}

	#[rstest]
	#[case("<div data-rh-root=\"\" data-rh-id=\"1\"><!--rh-text:1.0-->a<!--/rh-text--><span data-rh-id=\"1.1\">b</span></div>")]
	#[case("<pre data-rh-id=\"1\">\n\nx</pre>")]
	#[case("<textarea>\n\nx &amp; y</textarea>")]
	#[case("<svg viewBox=\"0 0 2 2\"><circle r=\"1\"></circle></svg>")]
	#[case("<p title=\"&quot;&lt;&amp;\">&lt;&gt;&amp;</p>")]
	#[case("<img src=\"a.png\" alt=\"\"/>")]
	#[case("<!--rh-empty:1-->")]
	fn test_canonical_markup_round_trips(#[case] markup: &str) {
		let (doc, root) = parse(markup);
		assert_eq!(doc.inner_html(root), markup);
	}
}
