//! Property-to-attribute serialization.
//!
//! Element properties are looked up in a fixed table that maps property
//! names (camel case, as written in description trees) and attribute names
//! to the attribute written in markup and a [`PropertyKind`] deciding how
//! values are stringified.
//!
//! | property            | markup                          |
//! |---------------------|---------------------------------|
//! | `className: "a"`    | `class="a"`                     |
//! | `disabled: true`    | `disabled=""`                   |
//! | `disabled: false`   | omitted                         |
//! | `download: true`    | `download=""`                   |
//! | `download: "f.txt"` | `download="f.txt"`              |
//! | `data-id: 7`        | `data-id="7"`                   |
//! | `style: {…}`        | `style="font-size:12px;"`       |

use rehydrate_core::value::{is_truthy, to_display_string};
use rehydrate_core::{Element, dom::Namespace};
use serde_json::Value;

/// How a property value becomes an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
	/// Stringified; omitted only when `null`.
	Plain,
	/// Present as `=""` when truthy, omitted otherwise.
	Boolean,
	/// `true` writes `=""`, falsy values are omitted, anything else is stringified.
	OverloadedBoolean,
}

/// Table entry for a known property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
	/// Property name as written in description trees.
	pub property: &'static str,
	/// Attribute name written in markup.
	pub attribute: &'static str,
	/// Value rules.
	pub kind: PropertyKind,
}

use PropertyKind::{Boolean, OverloadedBoolean, Plain};

const HTML_PROPERTIES: &[(&str, &str, PropertyKind)] = &[
	("accept", "accept", Plain),
	("acceptCharset", "accept-charset", Plain),
	("accessKey", "accesskey", Plain),
	("action", "action", Plain),
	("allowFullScreen", "allowfullscreen", Boolean),
	("alt", "alt", Plain),
	("async", "async", Boolean),
	("autoComplete", "autocomplete", Plain),
	("autoFocus", "autofocus", Boolean),
	("autoPlay", "autoplay", Boolean),
	("capture", "capture", OverloadedBoolean),
	("cellPadding", "cellpadding", Plain),
	("cellSpacing", "cellspacing", Plain),
	("charSet", "charset", Plain),
	("checked", "checked", Boolean),
	("cite", "cite", Plain),
	("className", "class", Plain),
	("cols", "cols", Plain),
	("colSpan", "colspan", Plain),
	("content", "content", Plain),
	("contentEditable", "contenteditable", Plain),
	("contextMenu", "contextmenu", Plain),
	("controls", "controls", Boolean),
	("coords", "coords", Plain),
	("crossOrigin", "crossorigin", Plain),
	("data", "data", Plain),
	("dateTime", "datetime", Plain),
	("default", "default", Boolean),
	("defer", "defer", Boolean),
	("dir", "dir", Plain),
	("disabled", "disabled", Boolean),
	("download", "download", OverloadedBoolean),
	("draggable", "draggable", Plain),
	("encType", "enctype", Plain),
	("form", "form", Plain),
	("formAction", "formaction", Plain),
	("formEncType", "formenctype", Plain),
	("formMethod", "formmethod", Plain),
	("formNoValidate", "formnovalidate", Boolean),
	("formTarget", "formtarget", Plain),
	("frameBorder", "frameborder", Plain),
	("headers", "headers", Plain),
	("height", "height", Plain),
	("hidden", "hidden", Boolean),
	("high", "high", Plain),
	("href", "href", Plain),
	("hrefLang", "hreflang", Plain),
	("htmlFor", "for", Plain),
	("httpEquiv", "http-equiv", Plain),
	("icon", "icon", Plain),
	("id", "id", Plain),
	("inputMode", "inputmode", Plain),
	("integrity", "integrity", Plain),
	("is", "is", Plain),
	("itemProp", "itemprop", Plain),
	("itemScope", "itemscope", Boolean),
	("itemType", "itemtype", Plain),
	("kind", "kind", Plain),
	("label", "label", Plain),
	("lang", "lang", Plain),
	("list", "list", Plain),
	("loop", "loop", Boolean),
	("low", "low", Plain),
	("manifest", "manifest", Plain),
	("max", "max", Plain),
	("maxLength", "maxlength", Plain),
	("media", "media", Plain),
	("method", "method", Plain),
	("min", "min", Plain),
	("minLength", "minlength", Plain),
	("multiple", "multiple", Boolean),
	("muted", "muted", Boolean),
	("name", "name", Plain),
	("nonce", "nonce", Plain),
	("noValidate", "novalidate", Boolean),
	("open", "open", Boolean),
	("optimum", "optimum", Plain),
	("pattern", "pattern", Plain),
	("placeholder", "placeholder", Plain),
	("playsInline", "playsinline", Boolean),
	("poster", "poster", Plain),
	("preload", "preload", Plain),
	("readOnly", "readonly", Boolean),
	("referrerPolicy", "referrerpolicy", Plain),
	("rel", "rel", Plain),
	("required", "required", Boolean),
	("reversed", "reversed", Boolean),
	("role", "role", Plain),
	("rows", "rows", Plain),
	("rowSpan", "rowspan", Plain),
	("sandbox", "sandbox", Plain),
	("scope", "scope", Plain),
	("scoped", "scoped", Boolean),
	("scrolling", "scrolling", Plain),
	("seamless", "seamless", Boolean),
	("selected", "selected", Boolean),
	("shape", "shape", Plain),
	("size", "size", Plain),
	("sizes", "sizes", Plain),
	("span", "span", Plain),
	("spellCheck", "spellcheck", Plain),
	("src", "src", Plain),
	("srcDoc", "srcdoc", Plain),
	("srcLang", "srclang", Plain),
	("srcSet", "srcset", Plain),
	("start", "start", Plain),
	("step", "step", Plain),
	("style", "style", Plain),
	("summary", "summary", Plain),
	("tabIndex", "tabindex", Plain),
	("target", "target", Plain),
	("title", "title", Plain),
	("type", "type", Plain),
	("useMap", "usemap", Plain),
	("value", "value", Plain),
	("width", "width", Plain),
	("wrap", "wrap", Plain),
];

const SVG_PROPERTIES: &[(&str, &str, PropertyKind)] = &[
	("clipPath", "clip-path", Plain),
	("clipRule", "clip-rule", Plain),
	("fillOpacity", "fill-opacity", Plain),
	("fillRule", "fill-rule", Plain),
	("fontFamily", "font-family", Plain),
	("fontSize", "font-size", Plain),
	("fontWeight", "font-weight", Plain),
	("markerEnd", "marker-end", Plain),
	("markerMid", "marker-mid", Plain),
	("markerStart", "marker-start", Plain),
	("stopColor", "stop-color", Plain),
	("stopOpacity", "stop-opacity", Plain),
	("strokeDasharray", "stroke-dasharray", Plain),
	("strokeDashoffset", "stroke-dashoffset", Plain),
	("strokeLinecap", "stroke-linecap", Plain),
	("strokeLinejoin", "stroke-linejoin", Plain),
	("strokeMiterlimit", "stroke-miterlimit", Plain),
	("strokeOpacity", "stroke-opacity", Plain),
	("strokeWidth", "stroke-width", Plain),
	("textAnchor", "text-anchor", Plain),
	("xlinkHref", "xlink:href", Plain),
	("xmlLang", "xml:lang", Plain),
	("xmlSpace", "xml:space", Plain),
	("xmlnsXlink", "xmlns:xlink", Plain),
];

/// Properties that configure rendering and are never written as attributes.
pub const RESERVED_PROPS: &[&str] = &["key", "ref", "children", "dangerouslySetInnerHTML"];

/// CSS properties whose numeric values are written without a unit.
const UNITLESS_STYLES: &[&str] = &[
	"animationIterationCount",
	"columnCount",
	"flex",
	"flexGrow",
	"flexShrink",
	"fontWeight",
	"lineClamp",
	"lineHeight",
	"opacity",
	"order",
	"orphans",
	"tabSize",
	"widows",
	"zIndex",
	"zoom",
	"fillOpacity",
	"strokeOpacity",
	"strokeWidth",
];

fn lookup(table: &[(&'static str, &'static str, PropertyKind)], name: &str) -> Option<PropertyInfo> {
	table
		.iter()
		.find(|(property, attribute, _)| *property == name || *attribute == name)
		.map(|&(property, attribute, kind)| PropertyInfo {
			property,
			attribute,
			kind,
		})
}

/// Looks up a property by property or attribute name.
///
/// SVG presentation attributes are only known inside the SVG namespace.
pub fn property_info(name: &str, namespace: Namespace) -> Option<PropertyInfo> {
	if namespace == Namespace::Svg
		&& let Some(info) = lookup(SVG_PROPERTIES, name)
	{
		return Some(info);
	}
	lookup(HTML_PROPERTIES, name)
}

/// Whether `name` is passed through verbatim on any element.
pub fn is_passthrough(name: &str) -> bool {
	name.starts_with("data-") || name.starts_with("aria-")
}

/// Whether `name` looks like an event handler property (`onClick`).
pub fn is_event_property(name: &str) -> bool {
	name.len() > 2
		&& name.starts_with("on")
		&& name.as_bytes()[2].is_ascii_uppercase()
}

/// Whether `tag` names a custom element, which accepts any attribute.
pub fn is_custom_element(el: &Element) -> bool {
	el.tag_name().contains('-') || el.has_prop("is")
}

/// Stringifies `value` according to `kind`; `None` means omit the attribute.
pub fn serialize_value(kind: PropertyKind, value: &Value) -> Option<String> {
	match kind {
		PropertyKind::Boolean => is_truthy(value).then(String::new),
		PropertyKind::OverloadedBoolean => match value {
			Value::Bool(true) => Some(String::new()),
			v if !is_truthy(v) => None,
			v => Some(to_display_string(v)),
		},
		PropertyKind::Plain => (!value.is_null()).then(|| to_display_string(value)),
	}
}

/// Serializes a `style` value: strings pass through, objects become CSS.
pub fn style_value(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::Object(map) => {
			let mut css = String::new();
			for (name, v) in map {
				let rendered = match v {
					Value::Null | Value::Bool(_) => continue,
					Value::String(s) if s.is_empty() => continue,
					Value::Number(n) => {
						let s = to_display_string(v);
						let zero = n.as_f64() == Some(0.0);
						if zero || UNITLESS_STYLES.contains(&name.as_str()) {
							s
						} else {
							format!("{}px", s)
						}
					}
					other => to_display_string(other),
				};
				css.push_str(&hyphenate_style_name(name));
				css.push(':');
				css.push_str(rendered.trim());
				css.push(';');
			}
			(!css.is_empty()).then_some(css)
		}
		other => Some(to_display_string(other)),
	}
}

fn hyphenate_style_name(name: &str) -> String {
	let mut out = String::with_capacity(name.len() + 4);
	for c in name.chars() {
		if c.is_ascii_uppercase() {
			out.push('-');
			out.push(c.to_ascii_lowercase());
		} else {
			out.push(c);
		}
	}
	// `msTransition` keeps its leading dash like the other vendor prefixes
	if out.starts_with("ms-") {
		out.insert(0, '-');
	}
	out
}

/// Appends `name=value`, replacing an earlier attribute with the same name.
pub(crate) fn push_attribute(out: &mut Vec<(String, String)>, name: &str, value: String) {
	match out.iter_mut().find(|(n, _)| n == name) {
		Some(slot) => slot.1 = value,
		None => out.push((name.to_string(), value)),
	}
}

/// Serializes the generic properties of `el`.
///
/// `skip` lists properties handled elsewhere (form-control values).
/// `on_unknown` is called with every property dropped because it is not
/// known for a standard HTML element.
pub(crate) fn element_attributes(
	el: &Element,
	namespace: Namespace,
	skip: &[&str],
	on_unknown: &mut dyn FnMut(&str),
) -> Vec<(String, String)> {
	let custom = is_custom_element(el);
	let mut out = Vec::with_capacity(el.props().len());

	for (name, value) in el.props() {
		let name = name.as_ref();
		if RESERVED_PROPS.contains(&name) || skip.contains(&name) || is_event_property(name) {
			continue;
		}
		if matches!(name, "defaultValue" | "defaultChecked") {
			continue;
		}
		if name == "style" || (name == "className" && custom) {
			let rendered = if name == "style" {
				style_value(value)
			} else {
				serialize_value(Plain, value)
			};
			if let Some(v) = rendered {
				push_attribute(&mut out, if name == "style" { "style" } else { "class" }, v);
			}
			continue;
		}
		if is_passthrough(name) {
			if let Some(v) = serialize_value(Plain, value) {
				push_attribute(&mut out, name, v);
			}
			continue;
		}
		match property_info(name, namespace) {
			Some(info) => {
				if let Some(v) = serialize_value(info.kind, value) {
					push_attribute(&mut out, info.attribute, v);
				}
			}
			None if custom || namespace != Namespace::Html => {
				if let Some(v) = serialize_value(Plain, value) {
					push_attribute(&mut out, name, v);
				}
			}
			None => on_unknown(name),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn attrs(el: &Element, namespace: Namespace) -> (Vec<(String, String)>, Vec<String>) {
		let mut unknown = Vec::new();
		let out = element_attributes(el, namespace, &[], &mut |n| unknown.push(n.to_string()));
		(out, unknown)
	}

	#[rstest]
	#[case("className", "class")]
	#[case("class", "class")]
	#[case("htmlFor", "for")]
	#[case("tabIndex", "tabindex")]
	#[case("readOnly", "readonly")]
	#[case("readonly", "readonly")]
	fn test_property_names(#[case] name: &str, #[case] attribute: &str) {
		assert_eq!(property_info(name, Namespace::Html).unwrap().attribute, attribute);
	}

	#[test]
	fn test_svg_names_only_in_svg() {
		assert_eq!(
			property_info("strokeWidth", Namespace::Svg).unwrap().attribute,
			"stroke-width"
		);
		assert!(property_info("strokeWidth", Namespace::Html).is_none());
	}

	#[rstest]
	#[case(Boolean, json!(true), Some(""))]
	#[case(Boolean, json!("yes"), Some(""))]
	#[case(Boolean, json!(false), None)]
	#[case(Boolean, json!(0), None)]
	#[case(Boolean, json!(""), None)]
	#[case(Boolean, json!(null), None)]
	#[case(OverloadedBoolean, json!(true), Some(""))]
	#[case(OverloadedBoolean, json!("file.txt"), Some("file.txt"))]
	#[case(OverloadedBoolean, json!(false), None)]
	#[case(Plain, json!(false), Some("false"))]
	#[case(Plain, json!(0), Some("0"))]
	#[case(Plain, json!(null), None)]
	fn test_serialize_value(
		#[case] kind: PropertyKind,
		#[case] value: Value,
		#[case] expected: Option<&str>,
	) {
		assert_eq!(serialize_value(kind, &value).as_deref(), expected);
	}

	#[test]
	fn test_style_object() {
		let css = style_value(&json!({
			"fontSize": 12,
			"opacity": 0.5,
			"margin": 0,
			"color": "red",
			"display": null,
			"WebkitTransition": "none"
		}));
		assert_eq!(
			css.as_deref(),
			Some("-webkit-transition:none;color:red;font-size:12px;margin:0;opacity:0.5;")
		);
	}

	#[test]
	fn test_element_attributes() {
		let el = Element::new("div")
			.attr("className", "a")
			.attr("hidden", false)
			.attr("data-count", 3)
			.attr("aria-label", "x")
			.attr("key", "k")
			.attr("onClick", true)
			.attr("fooBar", "drop")
			.attr("title", "t");

		let (out, unknown) = attrs(&el, Namespace::Html);
		assert_eq!(
			out,
			vec![
				("class".to_string(), "a".to_string()),
				("data-count".to_string(), "3".to_string()),
				("aria-label".to_string(), "x".to_string()),
				("title".to_string(), "t".to_string()),
			]
		);
		assert_eq!(unknown, vec!["fooBar".to_string()]);
	}

	#[test]
	fn test_custom_elements_pass_everything() {
		let el = Element::new("my-widget")
			.attr("fooBar", "kept")
			.attr("className", "c");
		let (out, unknown) = attrs(&el, Namespace::Html);
		assert_eq!(
			out,
			vec![
				("fooBar".to_string(), "kept".to_string()),
				("class".to_string(), "c".to_string()),
			]
		);
		assert!(unknown.is_empty());
	}

	#[test]
	fn test_duplicate_attribute_forms_collapse() {
		let el = Element::new("label")
			.attr("for", "a")
			.attr("htmlFor", "b");
		let (out, _) = attrs(&el, Namespace::Html);
		assert_eq!(out, vec![("for".to_string(), "b".to_string())]);
	}

	#[test]
	fn test_svg_attributes() {
		let el = Element::new("path")
			.attr("d", "M0 0")
			.attr("strokeWidth", 2)
			.attr("viewBox", "0 0 1 1");
		let (out, unknown) = attrs(&el, Namespace::Svg);
		assert_eq!(
			out,
			vec![
				("d".to_string(), "M0 0".to_string()),
				("stroke-width".to_string(), "2".to_string()),
				("viewBox".to_string(), "0 0 1 1".to_string()),
			]
		);
		assert!(unknown.is_empty());
	}
}
