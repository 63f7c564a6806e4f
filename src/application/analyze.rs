//! Analyze submission use case

use thiserror::Error;

use crate::domain::analysis::AnalysisResult;
use crate::domain::audio::{validate_upload, AudioSubmission, IntakeError};

use super::ports::{AnalysisError, BeatAnalyzer};

/// Errors from the analyze use case
#[derive(Debug, Clone, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Validates a submission against the intake rules and hands it to the
/// configured analyzer strategy. At most one call is in flight per user
/// action; the caller enforces that discipline.
pub struct AnalyzeBeatUseCase<A: BeatAnalyzer> {
    analyzer: A,
}

impl<A: BeatAnalyzer> AnalyzeBeatUseCase<A> {
    /// Create a new use case around an analyzer strategy
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Validate and analyze one submission.
    ///
    /// Results are all-or-nothing: any failure leaves the caller in a
    /// retryable state with no partial output.
    pub async fn execute(
        &self,
        submission: &AudioSubmission,
    ) -> Result<AnalysisResult, AnalyzeError> {
        validate_upload(submission.size_bytes(), submission.mime_type())?;
        let result = self.analyzer.analyze(submission).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{CoreElement, StyleBreakdown};
    use async_trait::async_trait;

    struct MockAnalyzer;

    #[async_trait]
    impl BeatAnalyzer for MockAnalyzer {
        async fn analyze(
            &self,
            _audio: &AudioSubmission,
        ) -> Result<AnalysisResult, AnalysisError> {
            Ok(AnalysisResult {
                styles: vec![StyleBreakdown {
                    name: "Trap".to_string(),
                    percentage: 100,
                    description: "All trap".to_string(),
                }],
                bpm: 140,
                elements: vec![CoreElement {
                    name: "Drums".to_string(),
                    description: "Crisp".to_string(),
                    icon: "drum".to_string(),
                }],
                tags: vec!["808 heavy".to_string()],
                search_keywords: "trap".to_string(),
                summary: "A trap beat.".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn execute_returns_analysis() {
        let use_case = AnalyzeBeatUseCase::new(MockAnalyzer);
        let submission = AudioSubmission::new(vec![0u8; 1024], "audio/mpeg", "beat.mp3");

        let result = use_case.execute(&submission).await.unwrap();
        assert_eq!(result.bpm, 140);
        assert_eq!(result.styles.len(), 1);
    }

    #[tokio::test]
    async fn execute_rejects_oversized_submission() {
        let use_case = AnalyzeBeatUseCase::new(MockAnalyzer);
        let submission =
            AudioSubmission::new(vec![0u8; 21 * 1024 * 1024], "audio/wav", "huge.wav");

        let err = use_case.execute(&submission).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Intake(IntakeError::TooLarge)));
    }

    #[tokio::test]
    async fn execute_rejects_wrong_type() {
        let use_case = AnalyzeBeatUseCase::new(MockAnalyzer);
        let submission = AudioSubmission::new(vec![0u8; 16], "text/plain", "notes.txt");

        let err = use_case.execute(&submission).await.unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::Intake(IntakeError::UnsupportedType)
        ));
    }
}
