pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{
    dom::{Container, Document, Form},
    http::HttpBandSource,
};
pub use config::{toml_config::TomlConfig, ClientConfig};
pub use core::{
    page_init::{BindValidators, PageInit, PopulateCheckboxes, SetupStep},
    populator::{CheckboxPopulator, PopulateOutcome, CHECKBOX_CONTAINER_ID},
    validator::{FixedYear, FormValidator, SystemClock},
};
pub use domain::model::{Band, BandId, FormKind, SubmitOutcome, YearPolicy};
pub use utils::error::{ClientError, Result};
