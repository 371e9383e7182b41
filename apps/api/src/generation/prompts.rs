// Prompt text for cover-letter generation.
// The composer interpolates these; nothing else builds prompt strings.

/// System message sent with every completion.
pub const COVER_LETTER_SYSTEM: &str = "You are a helpful assistant that writes cover letters.";

/// Lead-in before the pasted job requirements.
pub const JOB_REQUIREMENTS_INTRO: &str =
    "Write a cover letter for the following job requirements:";

/// Lead-in before the resume text.
pub const CV_INTRO: &str = "Use the following CV information:";
