//! HTML element constructors.

use crate::element::Element;

/// Macro for defining HTML element creation functions
macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		pub fn $name() -> Element {
			Element::new($tag)
		}
	};
}

define_element!(
	/// Create a `<div>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let container = div()
	///     .attr("className", "container")
	///     .child(p().child("Content"));
	/// ```
	div, "div"
);

define_element!(
	/// Create a `<span>` element
	span, "span"
);

define_element!(
	/// Create a `<p>` element (paragraph)
	p, "p"
);

define_element!(
	/// Create an `<a>` element (anchor)
	///
	/// ## Example
	///
	/// ```ignore
	/// let link = a().attr("href", "/docs").child("Docs");
	/// ```
	a, "a"
);

define_element!(
	/// Create a `<button>` element
	button, "button"
);

define_element!(
	/// Create a `<ul>` element (unordered list)
	ul, "ul"
);

define_element!(
	/// Create an `<li>` element (list item)
	li, "li"
);

define_element!(
	/// Create an `<h1>` element
	h1, "h1"
);

define_element!(
	/// Create a `<pre>` element
	pre, "pre"
);

define_element!(
	/// Create an `<img>` element
	img, "img"
);

define_element!(
	/// Create a `<br>` element
	br, "br"
);

define_element!(
	/// Create a `<form>` element
	form, "form"
);

define_element!(
	/// Create a `<label>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let l = label().attr("htmlFor", "email").child("Email");
	/// ```
	label, "label"
);

define_element!(
	/// Create an `<input>` element
	///
	/// ## Example
	///
	/// ```ignore
	/// let field = input()
	///     .attr("type", "text")
	///     .attr("defaultValue", "hello");
	/// ```
	input, "input"
);

define_element!(
	/// Create a `<textarea>` element
	textarea, "textarea"
);

define_element!(
	/// Create a `<select>` element
	select, "select"
);

define_element!(
	/// Create an `<option>` element
	option, "option"
);

define_element!(
	/// Create an `<svg>` element
	svg, "svg"
);

define_element!(
	/// Create a `<script>` element
	script, "script"
);
