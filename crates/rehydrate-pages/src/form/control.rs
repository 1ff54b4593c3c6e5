//! Form-control classification and reconciliation.
//!
//! `input`, `textarea` and `select` elements carry a value the user can
//! change. A control is *controlled* when it declares its current value
//! (`value`, or `checked` for checkboxes and radios) and *uncontrolled* when
//! it only declares a default (`defaultValue`, `defaultChecked`). Either way
//! the server writes the resolved value into markup, and hydration never
//! overwrites what the user has typed into the live control.

use crate::tree::NodeIdentity;
use rehydrate_core::value::{is_truthy, to_display_string};
use rehydrate_core::{Diagnostic, Diagnostics, Element, Node};
use rehydrate_dom::{Document, NodeId};
use serde_json::Value;

/// Kind of form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
	/// An `<input>` holding a text-like value.
	TextInput,
	/// An `<input type="checkbox">` or `<input type="radio">`.
	Checkable,
	/// A `<textarea>`.
	TextArea,
	/// A `<select>`.
	Select,
}

/// Who owns the value of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
	/// The description tree declares the current value.
	Controlled,
	/// The description tree declares only a default.
	Uncontrolled,
}

/// Resolved form-control properties of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlProps {
	/// Control kind.
	pub kind: ControlKind,
	/// Value ownership.
	pub ownership: Ownership,
	/// Current value, falling back to the default. For checkables this is
	/// the submitted `value` attribute.
	pub value: Option<Value>,
	/// Current checkedness, falling back to the default. Checkables only.
	pub checked: bool,
	/// Lowercased `type` of an `<input>`; `text` when absent.
	pub input_type: Option<String>,
	/// Whether a `<select>` allows several selections.
	pub multiple: bool,
}

/// Input types whose value cannot be edited, so a missing change handler is fine.
const READ_ONLY_VALUE_TYPES: &[&str] = &["button", "checkbox", "hidden", "image", "radio", "reset", "submit"];

fn prop<'a>(el: &'a Element, name: &str) -> Option<&'a Value> {
	el.prop(name).filter(|v| !v.is_null())
}

impl ControlProps {
	/// Classifies `el` and reports misuse to `diagnostics`.
	///
	/// Returns `None` for elements that are not form controls.
	pub fn inspect(el: &Element, diagnostics: &Diagnostics) -> Option<Self> {
		let tag = el.tag_name();
		let input_type = tag.eq_ignore_ascii_case("input").then(|| {
			prop(el, "type")
				.map(to_display_string)
				.unwrap_or_else(|| "text".to_string())
				.to_ascii_lowercase()
		});
		let kind = match tag.to_ascii_lowercase().as_str() {
			"input" if matches!(input_type.as_deref(), Some("checkbox" | "radio")) => {
				ControlKind::Checkable
			}
			"input" => ControlKind::TextInput,
			"textarea" => ControlKind::TextArea,
			"select" => ControlKind::Select,
			_ => return None,
		};

		let (current, default) = match kind {
			ControlKind::Checkable => ("checked", "defaultChecked"),
			_ => ("value", "defaultValue"),
		};
		let controlled = prop(el, current).is_some();
		let has_default = prop(el, default).is_some();

		if controlled && has_default {
			diagnostics.emit(Diagnostic::ValueAndDefaultValue {
				tag: tag.to_string(),
				prop: current.to_string(),
				default_prop: default.to_string(),
			});
		}
		if controlled {
			let read_only_type = kind != ControlKind::Checkable
				&& input_type
					.as_deref()
					.is_some_and(|t| READ_ONLY_VALUE_TYPES.contains(&t));
			let handled = el.has_handler("change")
				|| el.has_handler("input")
				|| ["readOnly", "readonly", "disabled"]
					.iter()
					.any(|p| prop(el, p).is_some_and(is_truthy));
			if !handled && !read_only_type {
				diagnostics.emit(Diagnostic::ControlledWithoutHandler {
					tag: tag.to_string(),
					prop: current.to_string(),
				});
			}
		}

		let value = prop(el, "value").or_else(|| prop(el, "defaultValue")).cloned();
		let checked = match kind {
			ControlKind::Checkable => prop(el, "checked")
				.or_else(|| prop(el, "defaultChecked"))
				.is_some_and(is_truthy),
			_ => false,
		};
		let multiple = kind == ControlKind::Select && prop(el, "multiple").is_some_and(is_truthy);

		Some(Self {
			kind,
			ownership: if controlled {
				Ownership::Controlled
			} else {
				Ownership::Uncontrolled
			},
			value,
			checked,
			input_type,
			multiple,
		})
	}

	/// Properties consumed by the control instead of the attribute table.
	pub fn consumed_props(&self) -> &'static [&'static str] {
		match self.kind {
			ControlKind::TextInput | ControlKind::Checkable => &["value", "checked"],
			ControlKind::TextArea | ControlKind::Select => &["value"],
		}
	}

	/// Attributes carrying the resolved value, appended after the generic ones.
	pub fn attributes(&self) -> Vec<(&'static str, String)> {
		let mut out = Vec::new();
		match self.kind {
			ControlKind::TextInput | ControlKind::Checkable => {
				if let Some(v) = &self.value {
					out.push(("value", to_display_string(v)));
				}
				if self.checked {
					out.push(("checked", String::new()));
				}
			}
			ControlKind::TextArea | ControlKind::Select => {}
		}
		out
	}

	/// Text content of a `<textarea>`: its value, else its text children.
	///
	/// Children are accepted for compatibility and reported.
	pub fn textarea_content(&self, children: &[Node], diagnostics: &Diagnostics) -> String {
		if !children.is_empty() {
			diagnostics.emit(Diagnostic::TextareaChildren);
		}
		match &self.value {
			Some(v) => to_display_string(v),
			None => flatten_text(children),
		}
	}

	/// Values selected by a `<select>`, or `None` if it declares none.
	pub fn selected_values(&self) -> Option<Vec<String>> {
		if self.kind != ControlKind::Select {
			return None;
		}
		match self.value.as_ref()? {
			Value::Array(items) if self.multiple => {
				Some(items.iter().map(to_display_string).collect())
			}
			v => Some(vec![to_display_string(v)]),
		}
	}
}

/// Concatenated text of text and number children, descending into fragments.
pub fn flatten_text(children: &[Node]) -> String {
	let mut out = String::new();
	for child in children {
		match child {
			Node::Text(t) => out.push_str(t),
			Node::Number(n) => out.push_str(&rehydrate_core::value::format_number(*n)),
			Node::Fragment(nodes) => out.push_str(&flatten_text(nodes)),
			_ => {}
		}
	}
	out
}

/// Whether a live control can be adopted for `control`.
///
/// An `<input>` of a different type or a `<select>` with a different
/// `multiple` setting behaves differently and must be rebuilt.
pub fn structurally_compatible(doc: &Document, dom: NodeId, control: &ControlProps) -> bool {
	match control.kind {
		ControlKind::TextInput | ControlKind::Checkable => {
			let live = doc
				.attribute(dom, "type")
				.map(str::to_ascii_lowercase)
				.unwrap_or_else(|| "text".to_string());
			control.input_type.as_deref() == Some(live.as_str())
		}
		ControlKind::Select => doc.has_attribute(dom, "multiple") == control.multiple,
		ControlKind::TextArea => true,
	}
}

/// A control whose live value was kept although it differs from the
/// value the client tree declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreservedValue {
	/// Identity of the control.
	pub identity: NodeIdentity,
	/// Live value kept.
	pub live: String,
	/// Value declared by the client tree.
	pub declared: String,
}

/// Reconciles an adopted control after its attributes were updated.
///
/// The live value always wins. If the user changed the control before
/// hydration and that value differs from the declared one, the divergence is
/// returned so it can be reported.
pub fn reconcile(
	doc: &Document,
	dom: NodeId,
	identity: &NodeIdentity,
	control: &ControlProps,
) -> Option<PreservedValue> {
	let (live, declared) = match control.kind {
		ControlKind::Checkable => {
			if !doc.is_dirty(dom) {
				return None;
			}
			(doc.checked(dom).to_string(), control.checked.to_string())
		}
		ControlKind::Select => {
			let dirty = doc.options(dom).into_iter().any(|o| doc.is_dirty(o));
			if !dirty {
				return None;
			}
			let declared = control.selected_values().unwrap_or_default().join(",");
			let live = doc
				.selected_options(dom)
				.into_iter()
				.map(|o| doc.value(o))
				.collect::<Vec<_>>()
				.join(",");
			(live, declared)
		}
		ControlKind::TextInput | ControlKind::TextArea => {
			if !doc.is_dirty(dom) {
				return None;
			}
			let declared = control
				.value
				.as_ref()
				.map(to_display_string)
				.unwrap_or_default();
			(doc.value(dom), declared)
		}
	};
	if live == declared {
		return None;
	}
	tracing::debug!(
		identity = %identity,
		ownership = ?control.ownership,
		live = %live,
		declared = %declared,
		"kept live form value"
	);
	Some(PreservedValue {
		identity: identity.clone(),
		live,
		declared,
	})
}
