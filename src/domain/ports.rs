use crate::domain::model::{Band, YearPolicy};
use crate::domain::node::Node;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to a form's named inputs.
pub trait FormFields {
    fn value(&self, name: &str) -> Option<&str>;
}

/// A submit event in flight. Handlers may raise an alert and cancel the
/// default submission.
pub struct SubmitEvent<'a> {
    fields: &'a dyn FormFields,
    alerts: Vec<String>,
    default_prevented: bool,
}

impl<'a> SubmitEvent<'a> {
    pub fn new(fields: &'a dyn FormFields) -> Self {
        Self {
            fields,
            alerts: Vec::new(),
            default_prevented: false,
        }
    }

    /// Trimmed value of a named input; a missing input reads as empty.
    pub fn field(&self, name: &str) -> &str {
        self.fields.value(name).unwrap_or("").trim()
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn into_alerts(self) -> Vec<String> {
        self.alerts
    }
}

pub type SubmitHandler = Box<dyn Fn(&mut SubmitEvent<'_>) + Send + Sync>;

/// A mounted form that submit handlers can be attached to.
pub trait FormElement: FormFields + Send {
    fn add_submit_listener(&mut self, handler: SubmitHandler);
}

/// A mounted region the client writes generated markup into.
pub trait ContainerElement: Send {
    /// Drops all children, like assigning an empty `innerHTML`.
    fn clear(&mut self);
    fn append(&mut self, node: Node);
    fn children(&self) -> &[Node];
}

/// What is mounted on the current page. Every lookup is optional: an absent
/// element means the related behavior is simply not active.
pub trait Page: Send {
    fn form_mut(&mut self, form_id: &str) -> Option<&mut dyn FormElement>;
    fn container_mut(&mut self, container_id: &str) -> Option<&mut dyn ContainerElement>;
}

#[async_trait]
pub trait BandSource: Send + Sync {
    async fn fetch_bands(&self) -> Result<Vec<Band>>;
}

/// Supplies the current calendar year used by the year range rules.
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn bands_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn year_policy(&self) -> YearPolicy;

    fn bands_url(&self) -> String {
        format!("{}{}", self.base_url().trim_end_matches('/'), self.bands_path())
    }
}
