//! Entity structs for the clinical-trial domain objects mirrored from the portal API.
//!
//! A [`Study`] exclusively owns its [`Site`]s and [`StudyFile`]s; nothing is
//! shared between studies. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON output and schema validation.

mod investigator;
mod site;
mod study;
mod study_file;

pub use investigator::PrincipalInvestigator;
pub use site::Site;
pub use study::Study;
pub use study_file::StudyFile;
