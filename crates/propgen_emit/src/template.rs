//! Text templates for generated artifacts.
//!
//! A [`Template`] turns one owner's group, or the pooled aggregate, into
//! source text. Templates must be pure: identical input renders identical
//! bytes, which is what lets unchanged artifacts stay byte-identical across
//! passes.

use std::sync::Arc;

use propgen_extract::ItemFacts;
use propgen_foundation::{Error, OwnerKey, Result};
use propgen_pipeline::{GlobalAggregate, Group};

use crate::hint::HintName;

/// One owner's generated items.
pub type OwnerGroup = Group<OwnerKey, ItemFacts>;

/// Every event name raised by any generated member.
pub type EventAggregate = GlobalAggregate<Arc<str>>;

/// Renders artifact text.
pub trait Template: Send + Sync {
    /// Renders the artifact for one owner.
    ///
    /// # Errors
    /// Returns [`propgen_foundation::ErrorKind::Template`] if the group
    /// cannot be rendered.
    fn render_group(&self, group: &OwnerGroup) -> Result<String>;

    /// Renders the artifact for the pooled event names.
    ///
    /// # Errors
    /// Returns [`propgen_foundation::ErrorKind::Template`] if the aggregate
    /// cannot be rendered.
    fn render_aggregate(&self, aggregate: &EventAggregate) -> Result<String>;
}

// =============================================================================
// Default Template
// =============================================================================

/// Renders Rust accessors that raise change notifications.
///
/// For each item the owner gains a getter named after the property and a
/// `set_` method that compares, raises the before-change event, assigns,
/// then raises the after-change event and every follow-up notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObservableTemplate;

const HEADER: &str = "// <auto-generated/>\n// Generated by propgen. Do not edit.\n";

impl Template for ObservableTemplate {
    fn render_group(&self, group: &OwnerGroup) -> Result<String> {
        let owner = &group.key;
        let mut w = Writer::new();
        w.raw(HEADER);
        w.line(&format!("// Source: {owner}"));
        w.blank();
        w.line("#[allow(non_snake_case)]");
        w.open(&format!("impl{} {}{}", generics(owner), owner.simple_name(), generics(owner)));

        for (i, item) in group.items.iter().enumerate() {
            if item.property_name.is_empty() || item.suppressed {
                return Err(Error::template(
                    HintName::for_owner(owner).as_str(),
                    format!("item `{}` has no generated name", item.field_name),
                ));
            }
            if i > 0 {
                w.blank();
            }
            render_getter(&mut w, item);
            w.blank();
            render_setter(&mut w, item);
        }

        w.close();
        Ok(w.finish())
    }

    fn render_aggregate(&self, aggregate: &EventAggregate) -> Result<String> {
        let mut w = Writer::new();
        w.raw(HEADER);
        w.blank();
        w.line("/// Every change event raised by generated properties.");
        w.open("pub const KNOWN_EVENTS: &[&str] = &[");
        for event in aggregate.iter() {
            w.line(&format!("{event:?},"));
        }
        w.close_with("];");
        Ok(w.finish())
    }
}

fn generics(owner: &OwnerKey) -> String {
    if owner.arity == 0 {
        return String::new();
    }
    let params: Vec<String> = (0..owner.arity).map(|i| format!("T{i}")).collect();
    format!("<{}>", params.join(", "))
}

fn render_getter(w: &mut Writer, item: &ItemFacts) {
    let (ret, expr) = if item.is_value_type {
        (item.type_name.to_string(), format!("self.{}", item.field_name))
    } else {
        (format!("&{}", item.type_name), format!("&self.{}", item.field_name))
    };
    w.line(&format!(
        "/// Gets `{}`, backed by `{}`.",
        item.property_name, item.field_name
    ));
    w.open(&format!("pub fn {}(&self) -> {ret}", item.property_name));
    w.line(&expr);
    w.close();
}

fn render_setter(w: &mut Writer, item: &ItemFacts) {
    let field = &item.field_name;
    let prop = &item.property_name;

    w.line(&format!("/// Sets `{prop}` and raises change notifications."));
    w.open(&format!("pub fn set_{prop}(&mut self, value: {})", item.type_name));
    w.open(&format!("if self.{field} == value"));
    w.line("return;");
    w.close();
    if let Some(changing) = &item.changing_event {
        w.line(&format!("self.raise_{changing}({prop:?});"));
    }
    w.line(&format!("self.{field} = value;"));
    w.line(&format!("self.raise_{}({prop:?});", item.changed_event));
    for other in &item.also_notify {
        w.line(&format!("self.raise_{}({other:?});", item.changed_event));
    }
    for command in &item.notify_commands {
        w.line(&format!("self.{command}.notify_can_execute_changed();"));
    }
    if item.validates {
        w.line(&format!("self.validate_property({prop:?});"));
    }
    if item.broadcasts {
        w.line(&format!("self.broadcast({prop:?});"));
    }
    w.close();
}

/// Indenting line writer.
struct Writer {
    output: String,
    indent_level: usize,
}

impl Writer {
    const INDENT: &'static str = "    ";

    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn raw(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.output.push_str(Self::INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    fn open(&mut self, head: &str) {
        if head.ends_with('[') {
            self.line(head);
        } else {
            self.line(&format!("{head} {{"));
        }
        self.indent_level += 1;
    }

    fn close(&mut self) {
        self.close_with("}");
    }

    fn close_with(&mut self, tail: &str) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line(tail);
    }

    fn finish(self) -> String {
        self.output
    }
}
