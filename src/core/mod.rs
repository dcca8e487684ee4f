pub mod page_init;
pub mod populator;
pub mod validator;

pub use crate::domain::model::{Band, BandId, FormKind, SubmitOutcome, YearPolicy};
pub use crate::domain::ports::{
    BandSource, Clock, ConfigProvider, ContainerElement, FormElement, FormFields, Page,
    SubmitEvent, SubmitHandler,
};
pub use crate::utils::error::Result;
