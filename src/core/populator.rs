use crate::core::{BandSource, ContainerElement, Page};
use crate::domain::model::Band;
use crate::domain::node::{Element, Node};
use crate::utils::error::GENERIC_FETCH_ERROR;

pub const CHECKBOX_CONTAINER_ID: &str = "checkboxContainer";
pub const NO_BANDS_MESSAGE: &str = "No bands available.";
/// Form field name the album form submits checked bands under.
pub const BAND_CHECKBOX_NAME: &str = "bandid";

/// Result of one populate run, mostly for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopulateOutcome {
    /// The container is not mounted on this page.
    NotMounted,
    Empty,
    Rendered(usize),
    Failed,
}

/// Fills the band checkbox container from a [`BandSource`].
pub struct CheckboxPopulator<S: BandSource> {
    source: S,
}

impl<S: BandSource> CheckboxPopulator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn populate(&self, page: &mut dyn Page) -> PopulateOutcome {
        if page.container_mut(CHECKBOX_CONTAINER_ID).is_none() {
            return PopulateOutcome::NotMounted;
        }

        let fetched = self.source.fetch_bands().await;

        // 容器可能在等待期間被移除
        let Some(container) = page.container_mut(CHECKBOX_CONTAINER_ID) else {
            tracing::warn!("Container '{}' vanished while loading bands", CHECKBOX_CONTAINER_ID);
            return PopulateOutcome::NotMounted;
        };

        match fetched {
            Ok(bands) => render_bands(container, &bands),
            Err(e) => {
                tracing::error!("Error fetching bands ({:?}): {}", e.kind(), e);
                container.clear();
                container.append(message(GENERIC_FETCH_ERROR, "#d32f2f"));
                PopulateOutcome::Failed
            }
        }
    }
}

/// Replaces the container contents with one labeled checkbox per band, in
/// the order given.
pub fn render_bands(container: &mut dyn ContainerElement, bands: &[Band]) -> PopulateOutcome {
    container.clear();

    if bands.is_empty() {
        container.append(message(NO_BANDS_MESSAGE, "#999"));
        return PopulateOutcome::Empty;
    }

    for band in bands {
        container.append(band_checkbox(band).into());
        container.append(Element::new("br").into());
    }
    tracing::debug!("Rendered {} band checkbox(es)", bands.len());
    PopulateOutcome::Rendered(bands.len())
}

/// `<label for="band_<id>"><input type="checkbox" ...> name</label>`
pub fn band_checkbox(band: &Band) -> Element {
    let checkbox_id = band.id.checkbox_id();
    let input = Element::new("input")
        .attr("type", "checkbox")
        .attr("id", checkbox_id.clone())
        .attr("name", BAND_CHECKBOX_NAME)
        .attr("value", band.id.as_str());

    Element::new("label")
        .attr("for", checkbox_id)
        .child(input)
        .text(format!(" {}", band.name))
}

fn message(text: &str, color: &str) -> Node {
    Element::new("p")
        .attr("style", format!("color: {};", color))
        .text(text)
        .into()
}
