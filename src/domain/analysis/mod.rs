//! Analysis result value objects and the model prompt

mod prompt;
mod result;

pub use prompt::AnalysisPrompt;
pub use result::{AnalysisResult, ApiResponse, CoreElement, IconKey, StyleBreakdown};
