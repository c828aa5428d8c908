pub mod pipelines;
pub mod runner;
