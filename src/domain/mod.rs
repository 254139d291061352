//! Data collected by the intake wizard.

pub mod form_record;
pub mod keywords;

pub use form_record::{
    ChoiceOption, ComparisonPeriod, ContextNotes, FormPatch, FormRecord, LocalLanguage, Ota,
    RecentChanges, SocialLinks,
};
pub use keywords::KeywordChips;
