// Veracity: authenticity risk scoring for social media profiles
//
// This is the library root. Each module corresponds to a major subsystem:
// the scoring engine and its collaborators (validation, advice, history,
// lookup) plus the presentation layers the CLI drives.

pub mod assistant;
pub mod config;
pub mod history;
pub mod lookup;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod recommendations;
pub mod scoring;
pub mod status;
