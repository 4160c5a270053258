use std::fmt;

/// Piece of the marked (uncommitted) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkedTextElement {
    Plain(String),
    /// The candidate currently selected.
    Emphasized(String),
    /// ▽
    MarkerCompose,
    /// ▼
    MarkerSelect,
    /// Caret position when it is not at the end.
    Cursor,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkedText {
    pub elements: Vec<MarkedTextElement>,
}

impl MarkedText {
    pub fn new(elements: Vec<MarkedTextElement>) -> Self {
        Self { elements }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append a plain run, skipping empty strings.
    pub(crate) fn push_plain(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.is_empty() {
            self.elements.push(MarkedTextElement::Plain(s));
        }
    }

    pub(crate) fn push(&mut self, element: MarkedTextElement) {
        self.elements.push(element);
    }

    pub(crate) fn extend(&mut self, other: MarkedText) {
        self.elements.extend(other.elements);
    }

    /// Character offset of the caret, if it is not at the end.
    pub fn cursor_offset(&self) -> Option<usize> {
        let mut offset = 0;
        for e in &self.elements {
            match e {
                MarkedTextElement::Cursor => return Some(offset),
                MarkedTextElement::Plain(s) | MarkedTextElement::Emphasized(s) => {
                    offset += s.chars().count();
                }
                MarkedTextElement::MarkerCompose | MarkedTextElement::MarkerSelect => offset += 1,
            }
        }
        None
    }
}

impl fmt::Display for MarkedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.elements {
            match e {
                MarkedTextElement::Plain(s) | MarkedTextElement::Emphasized(s) => f.write_str(s)?,
                MarkedTextElement::MarkerCompose => f.write_str("▽")?,
                MarkedTextElement::MarkerSelect => f.write_str("▼")?,
                MarkedTextElement::Cursor => {}
            }
        }
        Ok(())
    }
}
