//! Bounded recognition window over a document.

use once_cell::unsync::OnceCell;
use tracing::{debug, warn};

use super::{Entity, EntityLabel, EntityRecognizer};

/// Longest prefix of `text` holding at most `limit` characters.
pub fn char_prefix(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Entities of a document's leading characters, recognized at most once.
///
/// Both entity-based extractors read from the same window, so a document
/// costs a single recognizer call however many fields fall back to it.
pub struct EntityWindow<'a> {
    prefix: &'a str,
    recognizer: &'a dyn EntityRecognizer,
    outcome: OnceCell<Result<Vec<Entity>, String>>,
}

impl<'a> EntityWindow<'a> {
    pub fn new(text: &'a str, limit: usize, recognizer: &'a dyn EntityRecognizer) -> Self {
        Self {
            prefix: char_prefix(text, limit),
            recognizer,
            outcome: OnceCell::new(),
        }
    }

    /// The text handed to the recognizer.
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// Entities in document order. A recognizer failure yields no entities.
    pub fn entities(&self) -> &[Entity] {
        match self.outcome() {
            Ok(entities) => entities.as_slice(),
            Err(_) => &[],
        }
    }

    /// The recognizer error, if recognition failed.
    pub fn error(&self) -> Option<&str> {
        self.outcome.get().and_then(|o| o.as_ref().err()).map(String::as_str)
    }

    /// First entity, in document order, whose label satisfies `accept`.
    pub fn first(&self, accept: impl Fn(&EntityLabel) -> bool) -> Option<&Entity> {
        self.entities().iter().find(|e| accept(&e.label))
    }

    fn outcome(&self) -> &Result<Vec<Entity>, String> {
        self.outcome.get_or_init(|| {
            if self.prefix.trim().is_empty() {
                return Ok(Vec::new());
            }

            match self.recognizer.recognize(self.prefix) {
                Ok(mut entities) => {
                    entities.retain(|e| !e.text.trim().is_empty());
                    entities.sort_by_key(|e| e.start);
                    debug!(
                        "{} recognizer found {} entities in {} chars",
                        self.recognizer.name(),
                        entities.len(),
                        self.prefix.chars().count()
                    );
                    Ok(entities)
                }
                Err(e) => {
                    warn!("Entity recognition failed: {}", e);
                    Err(e.to_string())
                }
            }
        })
    }
}
