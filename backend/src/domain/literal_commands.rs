//! Exact-phrase commands checked before the rule-based interpreter.

/// Command recognised from an exact phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralCommand {
    /// Send the user's stock as a text document.
    ExportStock,
    /// Send the static image.
    EasterEgg,
}

/// Default phrase for [`LiteralCommand::ExportStock`].
pub const DEFAULT_EXPORT_PHRASE: &str = "exportar stock";

/// Default phrase for [`LiteralCommand::EasterEgg`].
pub const DEFAULT_IMAGE_TRIGGER: &str = "sorpresa";

/// Matches whole messages against the configured phrases.
///
/// A message matches when, after trimming surrounding whitespace and
/// lowercasing, it equals a phrase exactly. Phrases are normalised the same
/// way when the matcher is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralCommands {
    export_phrase: String,
    image_trigger: String,
}

impl LiteralCommands {
    /// Build a matcher for the given phrases.
    pub fn new(export_phrase: &str, image_trigger: &str) -> Self {
        Self {
            export_phrase: normalise(export_phrase),
            image_trigger: normalise(image_trigger),
        }
    }

    /// Classify `message`, or `None` when it is not a literal command.
    pub fn recognise(&self, message: &str) -> Option<LiteralCommand> {
        let candidate = normalise(message);
        if candidate.is_empty() {
            None
        } else if candidate == self.export_phrase {
            Some(LiteralCommand::ExportStock)
        } else if candidate == self.image_trigger {
            Some(LiteralCommand::EasterEgg)
        } else {
            None
        }
    }
}

impl Default for LiteralCommands {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_PHRASE, DEFAULT_IMAGE_TRIGGER)
    }
}

fn normalise(text: &str) -> String {
    text.trim().to_lowercase()
}
