pub mod draft;
pub mod step;

pub use draft::ProfileDraft;
pub use step::WizardStep;
