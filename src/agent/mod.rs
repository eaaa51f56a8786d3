pub mod prompt;
pub mod research;
pub mod writing;

#[cfg(test)]
pub(crate) mod testing;

pub use research::ResearchService;
pub use writing::{ArticleBrief, WritingService};
