// Pipelines that drive the scoring engine over many profiles.

pub mod batch;
