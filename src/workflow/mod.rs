pub mod article;
pub mod save;
pub mod state;

pub use article::ArticleWorkflow;
pub use state::{ArticleRequest, WorkflowState};
