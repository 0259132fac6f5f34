pub mod orchestration;

pub use orchestration::{run, RunArgs, RunSummary};
