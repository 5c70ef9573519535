pub mod entry;
pub mod error;
pub mod fortune;
pub mod request;

pub use entry::FortuneEntry;
pub use error::{
    ErrorClassifier, FortuneError, FortuneErrorKind, LuckyError, ProviderFailure, Result,
    ValidationError, ValidationErrorKind,
};
pub use fortune::{
    AiType, CalendarType, CityType, FortuneType, GenderType, PeriodType, PeriodValue, TimeType,
};
pub use request::{BirthInfo, FortuneOption, FortuneRequest, UNKNOWN_LABEL};
