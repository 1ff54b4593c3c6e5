//! SSR + Hydration Integration Tests
//!
//! Renders description trees on the "server", loads the markup into a
//! document the way a browser would and hydrates the same tree against it.
//!
//! Test Categories:
//! 1. Round Trips - identical trees adopt every node and report nothing
//! 2. Checksum - tampered markup is discarded before matching
//! 3. Mismatches - differences are repaired locally and reported once
//! 4. Containers - empty, foreign and missing containers
//! 5. Wiring - node refs, event listeners, did-mount order and completion

use rehydrate_core::builder::html::{br, button, div, h1, li, p, span, ul};
use rehydrate_core::{
	Callback, Component, ComponentType, Diagnostic, Diagnostics, IntoNode, Node, NodeRef, Props,
	RenderContext, RenderError, Updater,
};
use rehydrate_dom::{Document, NodeId};
use rehydrate_pages::ssr::extract_checksum;
use rehydrate_pages::{
	ChecksumStatus, HydrateOptions, Hydrator, Outcome, RenderOptions, SsrRenderer, hydrate,
	hydrate_root, render_to_static_markup, render_to_string,
};
use rstest::rstest;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ============================================================================
// Fixtures
// ============================================================================

fn app_view(name: &'static str) -> Node {
	div()
		.attr("className", "app")
		.child(h1().child("Title"))
		.child(p().child("Hello ").child(name))
		.child(ul().children(["a", "b"].map(|t| li().child(t))))
		.into_node()
}

/// Loads `markup` into a fresh `<div id="app">` attached to the body.
fn mount(markup: &str) -> (Document, NodeId) {
	let mut doc = Document::new();
	let app = doc.create_element("div");
	doc.set_attribute(app, "id", "app");
	let body = doc.body();
	doc.append_child(body, app);
	doc.set_inner_html(app, markup);
	(doc, app)
}

fn hydrator() -> (Hydrator, Diagnostics) {
	let diagnostics = Diagnostics::new();
	(Hydrator::new().with_diagnostics(diagnostics.clone()), diagnostics)
}

fn hydration_mismatches(diagnostics: &Diagnostics) -> Vec<Diagnostic> {
	diagnostics
		.entries()
		.into_iter()
		.filter(|d| matches!(d, Diagnostic::HydrationMismatch { .. }))
		.collect()
}

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn test_round_trip_adopts_every_node() {
	let html = render_to_string(app_view("world")).unwrap();
	let (mut doc, app) = mount(&html);
	let root_before = doc.first_child(app);
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(app_view("world"), &mut doc, app, |_| {}).unwrap();

	assert!(report.is_clean());
	assert_eq!(report.checksum(), ChecksumStatus::Valid);
	assert_eq!(report.adopted_count(), 8);
	assert_eq!(report.replaced_count(), 0);
	assert_eq!(report.created_count(), 0);
	assert!(diagnostics.is_empty());
	assert_eq!(report.node("1"), root_before);
	assert_eq!(doc.inner_html(app), html);
}

#[test]
fn test_round_trip_keeps_text_nodes() {
	let html = render_to_string(app_view("world")).unwrap();
	let (mut doc, app) = mount(&html);

	let report = hydrate(app_view("world"), &mut doc, app, |_| {}).unwrap();

	let text = report.node("1.1.1").unwrap();
	assert_eq!(doc.text(text), Some("world"));
	assert_eq!(report.outcome("1.1.0"), Some(Outcome::Adopted));
}

#[test]
fn test_markup_without_checksum_is_still_adopted() {
	let html = render_to_string(app_view("world")).unwrap();
	let (_, stripped) = extract_checksum(&html).unwrap();
	let (mut doc, app) = mount(&stripped);

	let report = hydrate(app_view("world"), &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.checksum(), ChecksumStatus::Absent);
	assert!(report.is_clean());
}

#[test]
fn test_empty_root_component_round_trip() {
	let nothing = ComponentType::stateless("Nothing", |_| Node::Null);
	let html = render_to_string(nothing.clone()).unwrap();
	let (mut doc, app) = mount(&html);
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(nothing, &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.outcome("1"), Some(Outcome::Adopted));
	assert!(report.is_clean());
	assert!(diagnostics.is_empty());
}

#[test]
fn test_attribute_differences_are_patched_silently() {
	let html = render_to_string(div().attr("className", "old").attr("title", "t")).unwrap();
	let (mut doc, app) = mount(&html);
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator
		.hydrate(div().attr("className", "new"), &mut doc, app, |_| {})
		.unwrap();

	let root = report.node("1").unwrap();
	assert_eq!(report.outcome("1"), Some(Outcome::Adopted));
	assert_eq!(doc.attribute(root, "class"), Some("new"));
	assert_eq!(doc.attribute(root, "title"), None);
	assert_eq!(doc.attribute(root, "data-rh-id"), Some("1"));
	assert!(diagnostics.is_empty());
}

#[test]
fn test_page_round_trip_through_hydrate_root() {
	let renderer = SsrRenderer::with_options(RenderOptions::new().title("Demo"));
	let page = renderer.render_page(app_view("world")).unwrap();
	let mut doc = Document::new();
	let body = doc.body();
	doc.set_inner_html(body, &page);

	let report = hydrate_root(&mut doc, app_view("world"), "app").unwrap();

	assert!(report.is_clean());
	assert_eq!(report.checksum(), ChecksumStatus::Valid);
}

// ============================================================================
// Checksum
// ============================================================================

#[test]
fn test_tampered_markup_is_replaced_wholesale() {
	let html = render_to_string(app_view("world")).unwrap();
	let (mut doc, app) = mount(&html.replace("Hello ", "Hallo "));
	let root_before = doc.first_child(app);
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(app_view("world"), &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.checksum(), ChecksumStatus::Invalid);
	assert_eq!(report.outcome("1"), Some(Outcome::Replaced));
	assert_eq!(report.outcome("1.1.0"), Some(Outcome::Created));
	assert_eq!(report.adopted_count(), 0);
	assert_ne!(report.node("1"), root_before);
	assert_eq!(doc.text_content(app), "TitleHello worldab");

	let entries = diagnostics.entries();
	assert_eq!(entries.len(), 1);
	assert!(matches!(entries[0], Diagnostic::ChecksumMismatch { .. }));
}

fn line_break_view() -> Node {
	p().child("a").child(br()).into_node()
}

/// Edits the parser normalizes away still change the received bytes.
#[rstest]
#[case::tab_after_tag_name("<p ", "<p\t")]
#[case::void_without_slash("/>", " >")]
#[case::single_quoted_attribute("data-rh-id=\"1.1\"", "data-rh-id='1.1'")]
#[case::uppercase_tag("<br", "<BR")]
fn test_normalized_tampering_is_still_detected(#[case] from: &str, #[case] to: &str) {
	let html = render_to_string(line_break_view()).unwrap();
	assert!(html.contains(from));
	let (mut doc, app) = mount(&html.replacen(from, to, 1));
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(line_break_view(), &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.checksum(), ChecksumStatus::Invalid);
	assert_eq!(report.outcome("1"), Some(Outcome::Replaced));
	assert_eq!(report.adopted_count(), 0);
	let entries = diagnostics.entries();
	assert_eq!(entries.len(), 1);
	assert!(matches!(entries[0], Diagnostic::ChecksumMismatch { .. }));
}

#[test]
fn test_checksum_verification_can_be_skipped() {
	let html = render_to_string(app_view("world")).unwrap();
	let (mut doc, app) = mount(&html.replace("Hello ", "Hallo "));
	let diagnostics = Diagnostics::new();
	let hydrator = Hydrator::with_options(HydrateOptions::new().skip_checksum())
		.with_diagnostics(diagnostics.clone());

	let report = hydrator.hydrate(app_view("world"), &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.checksum(), ChecksumStatus::Skipped);
	assert_eq!(report.outcome("1"), Some(Outcome::Adopted));
	assert_eq!(report.mismatch_count(), 1);
	assert_eq!(doc.text_content(app), "TitleHello worldab");
	assert_eq!(hydration_mismatches(&diagnostics).len(), 1);
}

// ============================================================================
// Mismatches
// ============================================================================

#[test]
fn test_text_mismatch_is_corrected_in_place() {
	let html = render_to_string(app_view("world")).unwrap();
	let (mut doc, app) = mount(&html);
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(app_view("there"), &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.outcome("1.1.1"), Some(Outcome::Adopted));
	assert_eq!(report.replaced_count(), 0);
	assert_eq!(doc.text_content(app), "TitleHello thereab");
	assert_eq!(
		hydration_mismatches(&diagnostics),
		vec![Diagnostic::HydrationMismatch {
			identity: "1.1.1".to_string(),
			expected: "text \"there\"".to_string(),
			found: "text \"world\"".to_string(),
			total: 1,
		}]
	);
}

#[test]
fn test_many_mismatches_produce_one_diagnostic() {
	let letters = ["a", "b", "c", "d", "e"];
	let server = ul().children(letters.map(|t| li().child(t)));
	let client = ul().children(letters.map(|t| span().child(t)));
	let (mut doc, app) = mount(&render_to_string(server).unwrap());
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(client, &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.outcome("1"), Some(Outcome::Adopted));
	assert_eq!(report.replaced_count(), 5);
	assert_eq!(report.mismatch_count(), 5);
	assert_eq!(
		hydration_mismatches(&diagnostics),
		vec![Diagnostic::HydrationMismatch {
			identity: "1.0".to_string(),
			expected: "<span>".to_string(),
			found: "<li>".to_string(),
			total: 5,
		}]
	);
	assert_eq!(diagnostics.len(), 1);
	let root = report.node("1").unwrap();
	assert!(
		doc.children(root)
			.iter()
			.all(|&c| doc.tag_name(c) == Some("span"))
	);
}

#[test]
fn test_child_count_difference_replaces_parent_only() {
	let server = div()
		.child(h1().child("Title"))
		.child(ul().children(["a", "b", "c"].map(|t| li().child(t))));
	let client = div()
		.child(h1().child("Title"))
		.child(ul().children(["a", "b"].map(|t| li().child(t))));
	let (mut doc, app) = mount(&render_to_string(server).unwrap());

	let report = hydrate(client, &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.outcome("1"), Some(Outcome::Adopted));
	assert_eq!(report.outcome("1.0"), Some(Outcome::Adopted));
	assert_eq!(report.outcome("1.1"), Some(Outcome::Replaced));
	assert_eq!(report.outcome("1.1.0"), Some(Outcome::Created));
	assert_eq!(doc.text_content(app), "Titleab");
}

#[test]
fn test_replaced_subtree_has_no_identity_attributes() {
	let (mut doc, app) = mount(&render_to_string(div().child(p().child("x"))).unwrap());

	let report = hydrate(div().child(span().child("x")), &mut doc, app, |_| {}).unwrap();

	let replaced = report.node("1.0").unwrap();
	assert_eq!(doc.tag_name(replaced), Some("span"));
	assert!(!doc.has_attribute(replaced, "data-rh-id"));
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn test_empty_container_is_built_from_scratch() {
	let (mut doc, app) = mount("");
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(app_view("world"), &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.checksum(), ChecksumStatus::Absent);
	assert_eq!(report.outcome("1"), Some(Outcome::Created));
	assert_eq!(report.created_count(), 8);
	assert_eq!(doc.text_content(app), "TitleHello worldab");
	assert!(diagnostics.is_empty());
}

#[test]
fn test_foreign_content_is_unhydratable() {
	let (mut doc, app) = mount("<p>Loading…</p>");
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(app_view("world"), &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.outcome("1"), Some(Outcome::Replaced));
	assert_eq!(diagnostics.entries(), vec![Diagnostic::UnhydratableContainer]);
	assert_eq!(doc.text_content(app), "TitleHello worldab");
}

#[test]
fn test_static_markup_is_unhydratable() {
	let (mut doc, app) = mount(&render_to_static_markup(app_view("world")).unwrap());
	let (hydrator, diagnostics) = hydrator();

	let report = hydrator.hydrate(app_view("world"), &mut doc, app, |_| {}).unwrap();

	assert_eq!(report.outcome("1"), Some(Outcome::Replaced));
	assert_eq!(diagnostics.entries(), vec![Diagnostic::UnhydratableContainer]);
}

#[test]
fn test_invalid_containers() {
	let (mut doc, app) = mount("text only");
	let text = doc.first_child(app).unwrap();

	assert!(matches!(
		hydrate(div(), &mut doc, text, |_| {}),
		Err(RenderError::InvalidContainer { .. })
	));
	assert_eq!(
		hydrate_root(&mut doc, div(), "missing").unwrap_err(),
		RenderError::InvalidContainer {
			container: "#missing".to_string()
		}
	);
}

#[test]
fn test_usage_errors_leave_document_untouched() {
	let html = render_to_string(app_view("world")).unwrap();
	let (mut doc, app) = mount(&html);

	let result = hydrate(Node::text("loose"), &mut doc, app, |_| {});

	assert_eq!(result.unwrap_err(), RenderError::InvalidRoot { kind: "text" });
	assert_eq!(doc.inner_html(app), html);
}

// ============================================================================
// Wiring
// ============================================================================

#[test]
fn test_refs_and_listeners_are_attached() {
	let clicks = Rc::new(Cell::new(0));
	let view = |clicks: Rc<Cell<u32>>, node_ref: NodeRef| {
		div().child(
			button()
				.node_ref(node_ref)
				.on("click", Callback::new(move |_| clicks.set(clicks.get() + 1)))
				.child("Go"),
		)
	};
	let (mut doc, app) =
		mount(&render_to_string(view(Rc::clone(&clicks), NodeRef::new())).unwrap());
	let node_ref = NodeRef::new();

	let report = hydrate(view(Rc::clone(&clicks), node_ref.clone()), &mut doc, app, |_| {}).unwrap();

	let button = report.node("1.0").unwrap();
	assert_eq!(node_ref.get(), Some(button));
	assert_eq!(report.events().events_for("1.0"), vec!["click"]);
	assert_eq!(doc.dispatch(button, "click"), 1);
	assert_eq!(doc.dispatch(button, "click"), 1);
	assert_eq!(clicks.get(), 2);
}

#[test]
fn test_listeners_are_attached_to_replaced_nodes() {
	let clicks = Rc::new(Cell::new(0));
	let counter = Rc::clone(&clicks);
	let (mut doc, app) = mount(&render_to_string(div().child(span())).unwrap());

	let client = div().child(
		button().on("click", Callback::new(move |_| counter.set(counter.get() + 1))),
	);
	let report = hydrate(client, &mut doc, app, |_| {}).unwrap();

	let button = report.node("1.0").unwrap();
	assert_eq!(report.outcome("1.0"), Some(Outcome::Replaced));
	doc.dispatch(button, "click");
	assert_eq!(clicks.get(), 1);
}

type Log = Rc<RefCell<Vec<String>>>;

struct Logged {
	name: &'static str,
	log: Log,
	inner: Option<ComponentType>,
}

impl Component for Logged {
	fn render(&self, _cx: &RenderContext<'_>) -> Node {
		self.log.borrow_mut().push(format!("{}:render", self.name));
		match &self.inner {
			Some(inner) => div().child(inner.clone()).into_node(),
			None => span().into_node(),
		}
	}

	fn name(&self) -> &str {
		self.name
	}

	fn component_did_mount(&mut self, _updater: &Updater) {
		self.log.borrow_mut().push(format!("{}:did_mount", self.name));
	}
}

fn logged(name: &'static str, log: &Log, inner: Option<ComponentType>) -> ComponentType {
	let log = Rc::clone(log);
	ComponentType::factory(name, move |_: &Props| {
		Box::new(Logged {
			name,
			log: Rc::clone(&log),
			inner: inner.clone(),
		}) as Box<dyn Component>
	})
}

#[test]
fn test_did_mount_runs_children_first_then_completes() {
	let log: Log = Rc::default();
	let tree = || {
		let inner = logged("Inner", &log, None);
		logged("Outer", &log, Some(inner))
	};
	let (mut doc, app) = mount(&render_to_string(tree()).unwrap());
	assert_eq!(*log.borrow(), vec!["Outer:render", "Inner:render"]);
	log.borrow_mut().clear();

	let completed = Rc::clone(&log);
	hydrate(tree(), &mut doc, app, move |report| {
		completed
			.borrow_mut()
			.push(format!("complete:{}", report.adopted_count()));
	})
	.unwrap();

	assert_eq!(
		*log.borrow(),
		vec![
			"Outer:render",
			"Inner:render",
			"Inner:did_mount",
			"Outer:did_mount",
			"complete:2",
		]
	);
}
