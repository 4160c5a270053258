use serde::Serialize;

use crate::dict::{Annotation, Word};

/// The dictionary entry a rendered candidate came from.
///
/// Set for numeric candidates: `{ yomi: "だい#", word: "第#1" }` for the
/// rendered `第5`. Saving and deleting go through this entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Original {
    pub yomi: String,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Reading the candidate was looked up with.
    pub yomi: String,
    /// Display form.
    pub word: String,
    pub original: Option<Original>,
    /// Unique by text.
    pub annotations: Vec<Annotation>,
    /// False for generated candidates (dates) and dictionaries that opt out.
    pub save_to_user_dict: bool,
}

impl Candidate {
    pub fn new(yomi: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            yomi: yomi.into(),
            word: word.into(),
            original: None,
            annotations: Vec::new(),
            save_to_user_dict: true,
        }
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = Vec::new();
        self.append_annotations(annotations);
        self
    }

    pub fn with_original(mut self, original: Original) -> Self {
        self.original = Some(original);
        self
    }

    /// Reading to store under in a dictionary.
    pub fn midashi(&self) -> &str {
        self.original
            .as_ref()
            .map_or(self.yomi.as_str(), |o| o.yomi.as_str())
    }

    /// Word to store in a dictionary.
    pub fn candidate_string(&self) -> &str {
        self.original
            .as_ref()
            .map_or(self.word.as_str(), |o| o.word.as_str())
    }

    /// Append annotations whose text is not already present.
    pub fn append_annotations(&mut self, annotations: impl IntoIterator<Item = Annotation>) {
        for a in annotations {
            if !self.annotations.iter().any(|x| x.text == a.text) {
                self.annotations.push(a);
            }
        }
    }

    /// Dictionary word to save when this candidate is committed.
    pub fn to_word(&self) -> Word {
        Word {
            word: self.candidate_string().to_string(),
            annotation: self.annotations.first().cloned(),
        }
    }
}
