//! Analysis prompt value object

/// Instruction prompt sent to the model alongside the audio payload.
///
/// The schema section mirrors the wire shape of
/// [`AnalysisResult`](super::AnalysisResult); the parser still treats the
/// response as untrusted regardless of how firmly the prompt asks for bare
/// JSON.
const ANALYSIS_INSTRUCTION: &str = r#"You are an expert Hip-Hop music producer and audio analyst with deep knowledge of all sub-genres. Analyze the provided audio clip and return a JSON analysis.

Your response MUST be valid JSON matching this exact schema:
{
  "styles": [
    {"name": "string (Hip-Hop sub-genre)", "percentage": number (0-100), "description": "string (1 sentence explaining why)"}
  ],
  "bpm": number,
  "elements": [
    {"name": "string", "description": "string (1-2 sentences)", "icon": "string (one of: drum, music, bass, waves, mic, radio, headphones, volume-2, zap, sparkles)"}
  ],
  "tags": ["string (Hip-Hop slang/pro terminology)"],
  "searchKeywords": "string (comma-separated keywords for finding similar beats on YouTube/Bilibili)",
  "summary": "string (2-3 sentence summary of the beat's character, written like a producer talking to another producer)"
}

Rules:
- "styles" must have 3-6 entries. Percentages MUST sum to 100. Use real Hip-Hop sub-genres: Trap, Boom Bap, Lo-fi, Drill (UK/NY/Chicago), Phonk, Cloud Rap, G-Funk, Crunk, Chopped & Screwed, Jersey Club, Memphis Rap, Hyphy, Grime, Plugg, Rage, Detroit Type, etc.
- "bpm" should be your best estimate of the actual tempo from the audio
- "elements" must have 3-5 entries describing core sonic elements (drums, bass, melody, atmosphere, samples, vocal chops, etc.)
- "tags" must have 5-10 entries using authentic Hip-Hop producer slang (e.g., "808 heavy", "chopped samples", "trap rolls", "dusty loops", "dark melody")
- "searchKeywords" should be useful for searching beat marketplaces or YouTube
- "summary" should read like a knowledgeable producer describing the beat

Analyze the actual audio provided and return accurate results based on what you hear.

Return ONLY the JSON object. No markdown, no code fences, no extra text."#;

/// Value object wrapping the full instruction prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPrompt {
    content: String,
}

impl AnalysisPrompt {
    /// Build the standard beat-analysis prompt
    pub fn build() -> Self {
        Self {
            content: ANALYSIS_INSTRUCTION.to_string(),
        }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Default for AnalysisPrompt {
    fn default() -> Self {
        Self::build()
    }
}
