use crate::core::populator::{CheckboxPopulator, PopulateOutcome};
use crate::core::validator::FormValidator;
use crate::core::{BandSource, Page};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// One independent piece of page-load setup.
#[async_trait]
pub trait SetupStep: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self, page: &mut dyn Page) -> Result<()>;
}

/// Attaches form validation to whatever forms are mounted.
pub struct BindValidators {
    validator: Arc<FormValidator>,
}

impl BindValidators {
    pub fn new(validator: FormValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}

#[async_trait]
impl SetupStep for BindValidators {
    fn name(&self) -> &str {
        "bind-validators"
    }

    async fn run(&self, page: &mut dyn Page) -> Result<()> {
        let bound = self.validator.bind(page);
        if !bound.is_empty() {
            tracing::info!(
                "Validation active for {:?} ({:?} year checks)",
                bound,
                self.validator.policy()
            );
        }
        Ok(())
    }
}

/// Loads the band checkboxes when the container is mounted.
pub struct PopulateCheckboxes<S: BandSource> {
    populator: CheckboxPopulator<S>,
}

impl<S: BandSource> PopulateCheckboxes<S> {
    pub fn new(populator: CheckboxPopulator<S>) -> Self {
        Self { populator }
    }
}

#[async_trait]
impl<S: BandSource> SetupStep for PopulateCheckboxes<S> {
    fn name(&self) -> &str {
        "populate-checkboxes"
    }

    async fn run(&self, page: &mut dyn Page) -> Result<()> {
        match self.populator.populate(page).await {
            PopulateOutcome::NotMounted => tracing::debug!("No checkbox container on this page"),
            PopulateOutcome::Empty => tracing::info!("No bands to render"),
            PopulateOutcome::Rendered(n) => tracing::info!("Rendered {} band checkbox(es)", n),
            PopulateOutcome::Failed => tracing::warn!("Band list could not be loaded"),
        }
        Ok(())
    }
}

/// The single page-load routine: runs each registered step once, in order.
#[derive(Default)]
pub struct PageInit {
    steps: Vec<Box<dyn SetupStep>>,
}

impl PageInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: impl SetupStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Returns how many steps completed without error. A failing step is
    /// logged and does not stop the ones after it.
    pub async fn run(&self, page: &mut dyn Page) -> usize {
        tracing::debug!("Page init: {} step(s)", self.steps.len());
        let mut completed = 0;
        for step in &self.steps {
            match step.run(page).await {
                Ok(()) => completed += 1,
                Err(e) => tracing::error!("❌ Setup step '{}' failed: {}", step.name(), e),
            }
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::dom::{Document, Form};
    use crate::core::populator::CHECKBOX_CONTAINER_ID;
    use crate::core::{Band, YearPolicy};
    use crate::utils::error::ClientError;

    struct StaticBands(Vec<Band>);

    #[async_trait]
    impl BandSource for StaticBands {
        async fn fetch_bands(&self) -> Result<Vec<Band>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl SetupStep for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn run(&self, _page: &mut dyn Page) -> Result<()> {
            Err(ClientError::ConfigError {
                message: "boom".to_string(),
            })
        }
    }

    #[test]
    fn test_failing_step_does_not_stop_later_steps() {
        let mut page = Document::new()
            .with_form("bandForm", Form::new())
            .with_container(CHECKBOX_CONTAINER_ID);
        let init = PageInit::new()
            .with_step(Failing)
            .with_step(BindValidators::new(FormValidator::new(YearPolicy::Strict)))
            .with_step(PopulateCheckboxes::new(CheckboxPopulator::new(StaticBands(vec![
                Band::new(1, "A"),
            ]))));

        let completed = tokio_test::block_on(init.run(&mut page));

        assert_eq!(completed, 2);
        assert_eq!(page.form("bandForm").unwrap().listener_count(), 1);
        assert_eq!(
            page.container(CHECKBOX_CONTAINER_ID).unwrap().checkbox_values(),
            vec!["1"]
        );
    }
}
