//! Joke domain model.
//!
//! A [`Joke`] is either a one-liner or a setup/delivery pair. The serde shape
//! matches the remote joke API (`type`, `joke`, `setup`, `delivery`, `category`,
//! `flags`) so the same type is used for remote results and for the locally
//! persisted sequence.

use serde::{Deserialize, Serialize};

use super::error::{JokeboxError, Result};

/// Category assigned to every locally authored joke.
pub const LOCAL_CATEGORY: &str = "Custom";

/// Shape of a joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JokeKind {
    #[default]
    Single,
    #[serde(rename = "twopart")]
    TwoPart,
}

impl JokeKind {
    /// Wire name used by the remote API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::TwoPart => "twopart",
        }
    }
}

/// Text content of a joke; exactly one shape is populated per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JokeContent {
    #[serde(rename = "single")]
    Single {
        #[serde(rename = "joke")]
        text: String,
    },
    #[serde(rename = "twopart")]
    TwoPart { setup: String, delivery: String },
}

impl JokeContent {
    #[must_use]
    pub const fn kind(&self) -> JokeKind {
        match self {
            Self::Single { .. } => JokeKind::Single,
            Self::TwoPart { .. } => JokeKind::TwoPart,
        }
    }

    /// Returns true when every field required by the shape is non-blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Single { text } => !text.trim().is_empty(),
            Self::TwoPart { setup, delivery } => {
                !setup.trim().is_empty() && !delivery.trim().is_empty()
            }
        }
    }
}

/// Sensitivity markers reported by the remote API. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentFlags {
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub religious: bool,
    #[serde(default)]
    pub political: bool,
    #[serde(default)]
    pub racist: bool,
    #[serde(default)]
    pub sexist: bool,
    #[serde(default)]
    pub explicit: bool,
}

impl ContentFlags {
    /// Flag names in the order the remote API's blacklist expects them.
    pub const ALL: [&'static str; 6] = [
        "nsfw",
        "religious",
        "political",
        "racist",
        "sexist",
        "explicit",
    ];
}

/// A displayable joke, either fetched remotely or authored locally.
///
/// # Examples
///
/// ```
/// use jokebox::domain::{Joke, JokeContent, LOCAL_CATEGORY};
///
/// let joke = Joke::local(42, JokeContent::Single { text: "A short one, really".into() });
/// assert_eq!(joke.category, LOCAL_CATEGORY);
/// assert!(joke.is_local());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: u64,
    #[serde(flatten)]
    pub content: JokeContent,
    pub category: String,
    #[serde(default)]
    pub flags: ContentFlags,
}

impl Joke {
    /// Builds a locally authored joke: category `Custom`, all flags cleared.
    #[must_use]
    pub fn local(id: u64, content: JokeContent) -> Self {
        Self {
            id,
            content,
            category: LOCAL_CATEGORY.to_string(),
            flags: ContentFlags::default(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> JokeKind {
        self.content.kind()
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.category == LOCAL_CATEGORY
    }
}

/// Which text field of a draft an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Text,
    Setup,
    Delivery,
}

/// In-progress joke text held by the submission dialog.
///
/// All three text fields are kept regardless of `kind` so switching modes does
/// not lose what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JokeDraft {
    pub kind: JokeKind,
    pub text: String,
    pub setup: String,
    pub delivery: String,
}

impl JokeDraft {
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            kind: JokeKind::Single,
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn two_part(setup: impl Into<String>, delivery: impl Into<String>) -> Self {
        Self {
            kind: JokeKind::TwoPart,
            setup: setup.into(),
            delivery: delivery.into(),
            ..Self::default()
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Text => self.text = value,
            DraftField::Setup => self.setup = value,
            DraftField::Delivery => self.delivery = value,
        }
    }

    /// Converts the draft into trimmed joke content for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`JokeboxError::InvalidDraft`] when a field required by the
    /// kind is blank.
    pub fn to_content(&self) -> Result<JokeContent> {
        let content = match self.kind {
            JokeKind::Single => JokeContent::Single {
                text: self.text.trim().to_string(),
            },
            JokeKind::TwoPart => JokeContent::TwoPart {
                setup: self.setup.trim().to_string(),
                delivery: self.delivery.trim().to_string(),
            },
        };

        if content.is_complete() {
            Ok(content)
        } else {
            Err(JokeboxError::InvalidDraft(format!(
                "{} joke is missing required text",
                self.kind.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_remote_two_part_joke() {
        let json = r#"{
            "category": "Programming",
            "type": "twopart",
            "setup": "Why do programmers prefer dark mode?",
            "delivery": "Because light attracts bugs.",
            "flags": {"nsfw": false, "religious": false, "political": false,
                      "racist": false, "sexist": false, "explicit": false},
            "id": 7,
            "safe": true,
            "lang": "en"
        }"#;

        let joke: Joke = serde_json::from_str(json).unwrap();
        assert_eq!(joke.id, 7);
        assert_eq!(joke.kind(), JokeKind::TwoPart);
        assert!(!joke.is_local());
    }

    #[test]
    fn single_joke_uses_joke_field_on_the_wire() {
        let joke = Joke::local(1, JokeContent::Single { text: "hello there".into() });
        let value = serde_json::to_value(&joke).unwrap();
        assert_eq!(value["type"], "single");
        assert_eq!(value["joke"], "hello there");
        assert_eq!(value["category"], "Custom");
    }

    #[test]
    fn draft_content_is_trimmed() {
        let draft = JokeDraft::two_part("  setup  ", " delivery ");
        assert_eq!(
            draft.to_content().unwrap(),
            JokeContent::TwoPart {
                setup: "setup".into(),
                delivery: "delivery".into(),
            }
        );
    }

    #[test]
    fn blank_draft_is_rejected() {
        let draft = JokeDraft::two_part("setup", "   ");
        assert!(matches!(draft.to_content(), Err(JokeboxError::InvalidDraft(_))));
    }
}
