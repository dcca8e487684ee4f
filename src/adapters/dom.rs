//! In-memory page: mounted forms with their input values, containers of
//! generated markup, and the alerts raised by submit handlers.

use crate::core::{ContainerElement, FormElement, FormFields, Page, SubmitEvent, SubmitHandler, SubmitOutcome};
use crate::domain::node::{Element, Node};
use std::collections::HashMap;

#[derive(Default)]
pub struct Form {
    inputs: HashMap<String, String>,
    listeners: Vec<SubmitHandler>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_input(name, value);
        self
    }

    pub fn set_input(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inputs.insert(name.into(), value.into());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl FormFields for Form {
    fn value(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }
}

impl FormElement for Form {
    fn add_submit_listener(&mut self, handler: SubmitHandler) {
        self.listeners.push(handler);
    }
}

#[derive(Debug, Default, Clone)]
pub struct Container {
    children: Vec<Node>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_html(&self) -> String {
        self.children.iter().map(Node::to_html).collect()
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// `value` of every checkbox input, in document order.
    pub fn checkbox_values(&self) -> Vec<String> {
        self.checkboxes(|_| true)
    }

    /// Values a form submission would carry: only the checked boxes.
    pub fn checked_values(&self) -> Vec<String> {
        self.checkboxes(|el| el.has_attr("checked"))
    }

    /// Ticks the checkbox whose value matches. Returns false when there is
    /// no such checkbox.
    pub fn set_checked(&mut self, value: &str) -> bool {
        let mut found = false;
        for node in &mut self.children {
            if let Node::Element(el) = node {
                el.visit_mut(&mut |el: &mut Element| {
                    if is_checkbox(el) && el.get_attr("value") == Some(value) {
                        el.set_attr("checked", "");
                        found = true;
                    }
                });
            }
        }
        found
    }

    fn checkboxes(&self, keep: impl Fn(&Element) -> bool) -> Vec<String> {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .flat_map(|el| el.descendants())
            .filter(|el| is_checkbox(el) && keep(el))
            .filter_map(|el| el.get_attr("value").map(str::to_string))
            .collect()
    }
}

fn is_checkbox(el: &Element) -> bool {
    el.tag == "input" && el.get_attr("type") == Some("checkbox")
}

impl ContainerElement for Container {
    fn clear(&mut self) {
        self.children.clear();
    }

    fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A page assembled in memory. Only the elements mounted on it exist.
#[derive(Default)]
pub struct Document {
    forms: HashMap<String, Form>,
    containers: HashMap<String, Container>,
    alerts: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form_id: impl Into<String>, form: Form) -> Self {
        self.forms.insert(form_id.into(), form);
        self
    }

    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.containers.insert(container_id.into(), Container::new());
        self
    }

    pub fn form(&self, form_id: &str) -> Option<&Form> {
        self.forms.get(form_id)
    }

    pub fn form_entry(&mut self, form_id: &str) -> Option<&mut Form> {
        self.forms.get_mut(form_id)
    }

    pub fn container(&self, container_id: &str) -> Option<&Container> {
        self.containers.get(container_id)
    }

    pub fn container_entry(&mut self, container_id: &str) -> Option<&mut Container> {
        self.containers.get_mut(container_id)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Dispatches a submit event through every listener on the form.
    /// `None` when the form is not mounted.
    pub fn submit(&mut self, form_id: &str) -> Option<SubmitOutcome> {
        let form = self.forms.get(form_id)?;
        let mut event = SubmitEvent::new(form);
        for listener in &form.listeners {
            listener(&mut event);
        }

        let prevented = event.default_prevented();
        let alerts = event.into_alerts();
        let outcome = if prevented {
            SubmitOutcome::blocked(alerts.last().cloned().unwrap_or_default())
        } else {
            SubmitOutcome::Proceed
        };
        self.alerts.extend(alerts);
        Some(outcome)
    }
}

impl Page for Document {
    fn form_mut(&mut self, form_id: &str) -> Option<&mut dyn FormElement> {
        self.forms
            .get_mut(form_id)
            .map(|form| form as &mut dyn FormElement)
    }

    fn container_mut(&mut self, container_id: &str) -> Option<&mut dyn ContainerElement> {
        self.containers
            .get_mut(container_id)
            .map(|c| c as &mut dyn ContainerElement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkbox(value: &str) -> Node {
        Element::new("label")
            .child(
                Element::new("input")
                    .attr("type", "checkbox")
                    .attr("value", value),
            )
            .into()
    }

    #[test]
    fn test_submit_without_listeners_proceeds() {
        let mut doc = Document::new().with_form("bandForm", Form::new());
        assert_eq!(doc.submit("bandForm"), Some(SubmitOutcome::Proceed));
        assert_eq!(doc.submit("memberForm"), None);
        assert!(doc.alerts().is_empty());
    }

    #[test]
    fn test_listener_can_cancel_submission() {
        let mut doc = Document::new().with_form("memberForm", Form::new().with_input("membername", ""));
        doc.form_mut("memberForm").unwrap().add_submit_listener(Box::new(|event: &mut SubmitEvent<'_>| {
            if event.field("membername").is_empty() {
                event.alert("nope");
                event.prevent_default();
            }
        }));

        assert_eq!(doc.submit("memberForm"), Some(SubmitOutcome::blocked("nope")));
        assert_eq!(doc.alerts(), &["nope".to_string()]);
    }

    #[test]
    fn test_checked_values_follow_set_checked() {
        let mut container = Container::new();
        container.append(checkbox("1"));
        container.append(checkbox("2"));

        assert_eq!(container.checkbox_values(), vec!["1", "2"]);
        assert!(container.checked_values().is_empty());
        container.append(Node::text(" end"));
        assert_eq!(container.text_content(), " end");
        assert!(container.set_checked("2"));
        assert!(!container.set_checked("9"));
        assert_eq!(container.checked_values(), vec!["2"]);
    }
}
