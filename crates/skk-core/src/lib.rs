pub mod candidate;
pub mod dict;
mod mode;
pub(crate) mod numeric;
pub mod romaji;
pub mod settings;
pub mod unicode;
pub mod user_dict;

pub use candidate::{Candidate, Original};
pub use dict::{Annotation, Dict, Dictionary, ReferOption, Word};
pub use mode::InputMode;
