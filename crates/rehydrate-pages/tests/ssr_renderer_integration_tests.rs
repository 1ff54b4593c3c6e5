//! SSR Renderer Integration Tests
//!
//! Test Categories:
//! 1. Basic Rendering - description trees to hydratable and static markup
//! 2. Attribute Table - property names, boolean rules, styles and unknown properties
//! 3. Escape Handling - text and attribute escaping
//! 4. Hydration Markers - identities, text frames, empty slots and the checksum
//! 5. Full Page Rendering - document wrapper
//! 6. Error Handling - fatal usage errors produce no output

use rehydrate_core::builder::html::{br, button, div, input, p, pre, script, span, svg};
use rehydrate_core::{
	Component, ComponentType, Diagnostic, Diagnostics, Element, IntoNode, Node, RenderContext,
	RenderError,
};
use rehydrate_pages::ssr::{extract_checksum, validate};
use rehydrate_pages::{RenderOptions, SsrRenderer, render_to_static_markup, render_to_string};
use rstest::rstest;
use serde_json::{Value, json};

// ============================================================================
// Test Components
// ============================================================================

/// Counter showing a fixed count
#[derive(Default)]
struct Counter;

impl Component for Counter {
	fn render(&self, cx: &RenderContext<'_>) -> Node {
		let count = cx.props().get_i64("count").unwrap_or(0);
		div()
			.attr("className", "counter")
			.child(
				span()
					.attr("data-count", count)
					.child(format!("Count: {}", count)),
			)
			.child(button().attr("type", "button").child("Increment"))
			.into_node()
	}
}

fn counter(count: i64) -> Node {
	ComponentType::class::<Counter>()
		.with_prop("count", count)
		.into_node()
}

fn without_checksum(markup: &str) -> String {
	extract_checksum(markup)
		.map(|(_, stripped)| stripped)
		.unwrap_or_else(|| markup.to_string())
}

// ============================================================================
// Basic Rendering
// ============================================================================

#[test]
fn test_counter_hydratable_markup() {
	let html = render_to_string(counter(3)).unwrap();

	insta::assert_snapshot!(html, @r#"<div class="counter" data-rh-root="" data-rh-id="1" data-rh-checksum="1201092472"><span data-count="3" data-rh-id="1.0">Count: 3</span><button type="button" data-rh-id="1.1">Increment</button></div>"#);
	assert!(validate(&html));
}

#[test]
fn test_counter_static_markup() {
	let html = render_to_static_markup(counter(3)).unwrap();

	insta::assert_snapshot!(html, @r#"<div class="counter"><span data-count="3">Count: 3</span><button type="button">Increment</button></div>"#);
	assert!(!html.contains("data-rh-"));
	assert!(!html.contains("<!--"));
}

#[test]
fn test_rendering_is_deterministic() {
	assert_eq!(
		render_to_string(counter(7)).unwrap(),
		render_to_string(counter(7)).unwrap()
	);
}

#[test]
fn test_void_root_carries_checksum_before_self_close() {
	let html = render_to_string(br()).unwrap();

	assert_eq!(
		html,
		r#"<br data-rh-root="" data-rh-id="1" data-rh-checksum="3678079774"/>"#
	);
	assert!(validate(&html));
}

#[test]
fn test_nested_components_share_identity_with_their_output() {
	let card = ComponentType::stateless("Card", |cx| {
		div()
			.attr("className", "card")
			.child(cx.children())
			.into_node()
	});
	let tree = card.with_prop("unused", true).child(counter(1)).child(p().child("tail"));

	let html = without_checksum(&render_to_string(tree).unwrap());

	assert!(html.starts_with(r#"<div class="card" data-rh-root="" data-rh-id="1">"#));
	assert!(html.contains(r#"<div class="counter" data-rh-id="1.0">"#));
	assert!(html.contains(r#"<span data-count="1" data-rh-id="1.0.0">"#));
	assert!(html.contains(r#"<p data-rh-id="1.1">tail</p>"#));
}

// ============================================================================
// Attribute Table
// ============================================================================

#[rstest]
#[case(Element::new("div").attr("hidden", true), "<div hidden=\"\"></div>")]
#[case(Element::new("div").attr("hidden", false), "<div></div>")]
#[case(Element::new("div").flag("hidden"), "<div hidden=\"\"></div>")]
#[case(Element::new("div").attr("hidden", "hidden"), "<div hidden=\"\"></div>")]
#[case(Element::new("div").attr("hidden", ""), "<div></div>")]
#[case(Element::new("div").attr("hidden", "foo"), "<div hidden=\"\"></div>")]
#[case(Element::new("div").attr("hidden", 0), "<div></div>")]
#[case(Element::new("div").attr("hidden", 10), "<div hidden=\"\"></div>")]
#[case(Element::new("div").attr("hidden", Value::Null), "<div></div>")]
fn test_boolean_attribute_rules(#[case] el: Element, #[case] expected: &str) {
	assert_eq!(render_to_static_markup(el).unwrap(), expected);
}

#[rstest]
#[case(Element::new("a").attr("download", true), "<a download=\"\"></a>")]
#[case(Element::new("a").attr("download", false), "<a></a>")]
#[case(Element::new("a").attr("download", "report.pdf"), "<a download=\"report.pdf\"></a>")]
#[case(Element::new("label").attr("htmlFor", "q"), "<label for=\"q\"></label>")]
#[case(Element::new("div").attr("tabIndex", 2), "<div tabindex=\"2\"></div>")]
#[case(Element::new("div").attr("data-user-id", 7), "<div data-user-id=\"7\"></div>")]
#[case(Element::new("div").attr("aria-label", "Close"), "<div aria-label=\"Close\"></div>")]
#[case(Element::new("div").attr("title", Value::Null), "<div></div>")]
fn test_attribute_names_and_values(#[case] el: Element, #[case] expected: &str) {
	assert_eq!(render_to_static_markup(el).unwrap(), expected);
}

#[test]
fn test_style_object_becomes_css() {
	let el = div().attr(
		"style",
		json!({"fontSize": 12, "display": "none", "opacity": 0.5, "margin": 0, "color": null}),
	);

	insta::assert_snapshot!(
		render_to_static_markup(el).unwrap(),
		@r#"<div style="display:none;font-size:12px;margin:0;opacity:0.5;"></div>"#
	);
}

#[test]
fn test_unknown_property_is_dropped_and_reported_once() {
	let diagnostics = Diagnostics::new();
	let renderer = SsrRenderer::new().with_diagnostics(diagnostics.clone());
	let tree = div()
		.attr("fooBar", 1)
		.child(div().attr("fooBar", 2))
		.child(span().attr("fooBar", 3));

	let html = renderer.render_to_static_markup(tree).unwrap();

	assert_eq!(html, "<div><div></div><span></span></div>");
	assert_eq!(
		diagnostics.entries(),
		vec![
			Diagnostic::UnknownProperty {
				tag: "div".to_string(),
				name: "fooBar".to_string(),
			},
			Diagnostic::UnknownProperty {
				tag: "span".to_string(),
				name: "fooBar".to_string(),
			},
		]
	);
}

#[test]
fn test_unknown_property_reporting_can_be_silenced() {
	let diagnostics = Diagnostics::new();
	let renderer = SsrRenderer::with_options(RenderOptions::new().quiet_unknown_properties())
		.with_diagnostics(diagnostics.clone());

	renderer.render_to_string(div().attr("fooBar", 1)).unwrap();

	assert!(diagnostics.is_empty());
}

#[rstest]
#[case(Element::new("my-widget").attr("fooBar", "x").attr("className", "c"), "<my-widget fooBar=\"x\" class=\"c\"></my-widget>")]
#[case(Element::new("div").attr("is", "fancy-div").attr("fooBar", "x"), "<div is=\"fancy-div\" fooBar=\"x\"></div>")]
fn test_custom_elements_pass_properties_through(#[case] el: Element, #[case] expected: &str) {
	let diagnostics = Diagnostics::new();
	let renderer = SsrRenderer::new().with_diagnostics(diagnostics.clone());

	assert_eq!(renderer.render_to_static_markup(el).unwrap(), expected);
	assert!(diagnostics.is_empty());
}

#[test]
fn test_svg_attributes() {
	let icon = svg()
		.attr("viewBox", "0 0 10 10")
		.child(Element::new("path").attr("strokeWidth", 2).attr("d", "M0 0"));

	insta::assert_snapshot!(
		render_to_static_markup(icon).unwrap(),
		@r#"<svg viewBox="0 0 10 10"><path stroke-width="2" d="M0 0"></path></svg>"#
	);
}

#[test]
fn test_event_handlers_and_reserved_props_are_not_written() {
	let tree = button()
		.on("click", rehydrate_core::Callback::new(|_| {}))
		.attr("onClick", "alert(1)")
		.key("k")
		.child("Go");

	assert_eq!(render_to_static_markup(tree).unwrap(), "<button>Go</button>");
}

// ============================================================================
// Escape Handling
// ============================================================================

#[test]
fn test_text_is_escaped() {
	let html = render_to_static_markup(p().child("<script>alert(\"x\")</script> & more")).unwrap();

	assert_eq!(
		html,
		"<p>&lt;script&gt;alert(\"x\")&lt;/script&gt; &amp; more</p>"
	);
}

#[test]
fn test_attribute_values_are_escaped() {
	let html = render_to_static_markup(div().attr("title", "say \"hi\" & <go>")).unwrap();

	assert_eq!(html, "<div title=\"say &quot;hi&quot; &amp; &lt;go&gt;\"></div>");
}

#[test]
fn test_raw_html_is_written_verbatim_in_static_mode() {
	let html = render_to_static_markup(div().inner_html("<b>bold</b><i>it")).unwrap();

	assert_eq!(html, "<div><b>bold</b><i>it</div>");
}

#[test]
fn test_raw_html_is_canonical_in_hydratable_mode() {
	let html = render_to_string(
		div().attr("dangerouslySetInnerHTML", json!({"__html": "<b>bold</b><i>it"})),
	)
	.unwrap();

	assert!(html.ends_with("><b>bold</b><i>it</i></div>"));
	assert!(validate(&html));
}

#[test]
fn test_script_content_is_not_escaped_twice() {
	let html = render_to_static_markup(script().inner_html("if (a < b) { run(); }")).unwrap();

	assert_eq!(html, "<script>if (a < b) { run(); }</script>");
}

#[test]
fn test_pre_keeps_leading_newline() {
	let html = render_to_static_markup(pre().child("\ncode")).unwrap();

	assert_eq!(html, "<pre>\n\ncode</pre>");
}

// ============================================================================
// Hydration Markers
// ============================================================================

#[test]
fn test_adjacent_text_runs_are_framed() {
	let html = render_to_string(p().child("Hello ").child(Node::Number(3.0)).child("!")).unwrap();

	insta::assert_snapshot!(
		without_checksum(&html),
		@r#"<p data-rh-root="" data-rh-id="1"><!--rh-text:1.0-->Hello <!--/rh-text--><!--rh-text:1.1-->3<!--/rh-text--><!--rh-text:1.2-->!<!--/rh-text--></p>"#
	);
}

#[test]
fn test_single_text_child_is_inline() {
	let html = render_to_string(p().child("only")).unwrap();

	assert_eq!(
		without_checksum(&html),
		r#"<p data-rh-root="" data-rh-id="1">only</p>"#
	);
}

#[test]
fn test_empty_component_leaves_marker() {
	let nothing = ComponentType::stateless("Nothing", |_| Node::Null);
	let tree = div().child(nothing.clone()).child(span().child("x"));

	assert_eq!(
		without_checksum(&render_to_string(tree.clone()).unwrap()),
		r#"<div data-rh-root="" data-rh-id="1"><!--rh-empty:1.0--><span data-rh-id="1.1">x</span></div>"#
	);
	assert_eq!(
		render_to_static_markup(tree).unwrap(),
		"<div><span>x</span></div>"
	);
}

#[test]
fn test_empty_root_has_no_checksum() {
	let nothing = ComponentType::stateless("Nothing", |_| Node::Bool(false));

	assert_eq!(render_to_string(nothing.clone()).unwrap(), "<!--rh-empty:1-->");
	assert_eq!(render_to_static_markup(nothing).unwrap(), "");
}

#[test]
fn test_holes_do_not_take_positions() {
	let tree = div()
		.child(Node::Null)
		.child(span())
		.child(false)
		.child(vec![span(), span()]);

	assert_eq!(
		without_checksum(&render_to_string(tree).unwrap()),
		r#"<div data-rh-root="" data-rh-id="1"><span data-rh-id="1.0"></span><span data-rh-id="1.1"></span><span data-rh-id="1.2"></span></div>"#
	);
}

#[test]
fn test_form_control_attributes_follow_generic_ones() {
	let html = render_to_static_markup(
		input()
			.attr("name", "q")
			.attr("defaultValue", "rust")
			.attr("placeholder", "Search"),
	)
	.unwrap();

	assert_eq!(html, "<input name=\"q\" placeholder=\"Search\" value=\"rust\"/>");
}

// ============================================================================
// Full Page Rendering
// ============================================================================

#[test]
fn test_render_page_wraps_markup() {
	let renderer = SsrRenderer::with_options(RenderOptions::new().lang("ja").title("Counter <demo>"));

	let page = renderer.render_page(counter(0)).unwrap();

	assert!(page.starts_with("<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n"));
	assert!(page.contains("<meta charset=\"UTF-8\">"));
	assert!(page.contains("<title>Counter &lt;demo&gt;</title>"));
	assert!(page.contains("<div id=\"app\"><div class=\"counter\" data-rh-root=\"\""));
	assert!(page.ends_with("</div>\n</body>\n</html>"));
}

#[test]
fn test_render_page_without_title() {
	let page = SsrRenderer::new().render_page(div()).unwrap();

	assert!(page.contains("<html lang=\"en\">"));
	assert!(!page.contains("<title>"));
}

// ============================================================================
// Error Handling
// ============================================================================

#[rstest]
#[case(Node::text("loose text"), RenderError::InvalidRoot { kind: "text" })]
#[case(Node::Null, RenderError::InvalidRoot { kind: "null" })]
#[case(Node::fragment(vec![div(), div()]), RenderError::InvalidRoot { kind: "fragment" })]
#[case(
	div().inner_html("<b>x</b>").child("y").into_node(),
	RenderError::ConflictingContent { tag: "div".to_string() }
)]
#[case(
	br().child("x").into_node(),
	RenderError::VoidElementContent { tag: "br".to_string() }
)]
#[case(
	div().attr("dangerouslySetInnerHTML", "<b>").into_node(),
	RenderError::InvalidInnerHtml { tag: "div".to_string() }
)]
fn test_usage_errors(#[case] tree: Node, #[case] expected: RenderError) {
	assert_eq!(render_to_string(tree.clone()).unwrap_err(), expected);
	assert_eq!(render_to_static_markup(tree).unwrap_err(), expected);
}

#[test]
fn test_text_returned_from_render_is_rejected() {
	let chatty = ComponentType::stateless("Chatty", |_| Node::text("hi"));

	assert_eq!(
		render_to_string(div().child(chatty)).unwrap_err(),
		RenderError::InvalidRenderOutput {
			component: "Chatty".to_string(),
			kind: "text",
		}
	);
}

#[test]
fn test_depth_limit() {
	let mut tree = span().into_node();
	for _ in 0..20 {
		tree = div().child(tree).into_node();
	}
	let renderer = SsrRenderer::with_options(RenderOptions::new().max_depth(8));

	assert_eq!(
		renderer.render_to_string(tree).unwrap_err(),
		RenderError::DepthLimitExceeded { limit: 8 }
	);
}
