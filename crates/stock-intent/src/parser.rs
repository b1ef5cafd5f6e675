//! Regex-based extraction of `(action, quantity, product)` from free text.
//!
//! The pattern is `(?i)(<keywords>)\s*([0-9]+)?\s*(.*)` applied to the
//! lowercased message. It is not anchored: the first keyword occurrence
//! anywhere in the text wins and everything before it is ignored. The digit
//! group only accepts ASCII digits, so non-digit text after the keyword is
//! swallowed into the product capture instead of failing the match.

use regex::Regex;

use crate::error::IntentError;
use crate::synonyms::{ActionKind, SynonymTable};

/// Quantity applied when a command omits the digit run.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Result of matching one message against the command pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// No action keyword occurs in the message.
    NoMatch,
    /// A keyword occurred and the captures were extracted.
    Matched(Intent),
}

/// Raw captures of a matched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// Canonical action token after synonym resolution.
    pub action: String,
    /// Keyword exactly as it appeared (lowercased) in the message.
    pub keyword: String,
    /// Digit run following the keyword, if any.
    pub quantity_text: Option<String>,
    /// Remainder of the message after the keyword and quantity. May be empty.
    pub product: String,
}

impl Intent {
    /// Classify the canonical action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        ActionKind::from_canonical(&self.action)
    }

    /// Resolve the quantity, defaulting to [`DEFAULT_QUANTITY`].
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::InvalidQuantity`] when the digit run does not
    /// fit a `u32`.
    ///
    /// # Examples
    /// ```
    /// use stock_intent::{IntentParser, ParseOutcome};
    ///
    /// let parser = IntentParser::spanish().expect("parser builds");
    /// let ParseOutcome::Matched(intent) = parser.parse("agregar leche") else {
    ///     panic!("expected a match");
    /// };
    /// assert_eq!(intent.quantity(), Ok(1));
    /// ```
    pub fn quantity(&self) -> Result<u32, IntentError> {
        match self.quantity_text.as_deref() {
            None | Some("") => Ok(DEFAULT_QUANTITY),
            Some(text) => text
                .parse::<u32>()
                .map_err(|_| IntentError::InvalidQuantity {
                    text: text.to_owned(),
                }),
        }
    }
}

/// Fully resolved command ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Classified action.
    pub action: ActionKind,
    /// Resolved quantity (defaulted when omitted).
    pub quantity: u32,
    /// Product label exactly as captured.
    pub product: String,
}

/// Rule-based command interpreter.
///
/// Holds the compiled pattern and the synonym table it was derived from.
/// Construct once and share; matching is read-only.
#[derive(Debug, Clone)]
pub struct IntentParser {
    pattern: Regex,
    synonyms: SynonymTable,
}

impl IntentParser {
    /// Compile a parser whose keyword alternation covers every surface form
    /// in `synonyms`.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::EmptyVocabulary`] for an empty table and
    /// [`IntentError::Pattern`] if the generated pattern does not compile.
    pub fn new(synonyms: SynonymTable) -> Result<Self, IntentError> {
        let keywords = synonyms.keywords();
        if keywords.is_empty() {
            return Err(IntentError::EmptyVocabulary);
        }
        let alternation = keywords
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)({alternation})\s*([0-9]+)?\s*(.*)")).map_err(
            |err| IntentError::Pattern {
                message: err.to_string(),
            },
        )?;
        Ok(Self { pattern, synonyms })
    }

    /// Compile a parser over [`SynonymTable::spanish`].
    ///
    /// # Errors
    ///
    /// See [`IntentParser::new`].
    pub fn spanish() -> Result<Self, IntentError> {
        Self::new(SynonymTable::spanish())
    }

    /// Borrow the synonym table backing this parser.
    #[must_use]
    pub const fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Match `message` and extract raw captures.
    ///
    /// # Examples
    /// ```
    /// use stock_intent::{IntentParser, ParseOutcome};
    ///
    /// let parser = IntentParser::spanish().expect("parser builds");
    /// let ParseOutcome::Matched(intent) = parser.parse("Hola, agregar 3 Tomates") else {
    ///     panic!("expected a match");
    /// };
    /// assert_eq!(intent.action, "agregar");
    /// assert_eq!(intent.quantity_text.as_deref(), Some("3"));
    /// assert_eq!(intent.product, "tomates");
    /// assert_eq!(parser.parse("hola"), ParseOutcome::NoMatch);
    /// ```
    #[must_use]
    pub fn parse(&self, message: &str) -> ParseOutcome {
        let lowered = message.to_lowercase();
        let Some(captures) = self.pattern.captures(&lowered) else {
            return ParseOutcome::NoMatch;
        };

        let keyword = captures.get(1).map_or("", |m| m.as_str());
        let quantity_text = captures.get(2).map(|m| m.as_str().to_owned());
        let product = captures
            .get(3)
            .map_or_else(String::new, |m| m.as_str().to_owned());

        ParseOutcome::Matched(Intent {
            action: self.synonyms.normalize(keyword).to_owned(),
            keyword: keyword.to_owned(),
            quantity_text,
            product,
        })
    }

    /// Match `message` and resolve it into a [`Command`].
    ///
    /// Returns `Ok(None)` when no keyword matches.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::InvalidQuantity`] when the captured digit run
    /// cannot be represented.
    pub fn parse_command(&self, message: &str) -> Result<Option<Command>, IntentError> {
        match self.parse(message) {
            ParseOutcome::NoMatch => Ok(None),
            ParseOutcome::Matched(intent) => {
                let quantity = intent.quantity()?;
                Ok(Some(Command {
                    action: intent.kind(),
                    quantity,
                    product: intent.product,
                }))
            }
        }
    }
}
