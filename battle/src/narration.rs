//! Human-readable battle log lines with emphasis metadata
//!
//! Text is stored unescaped; renderers escape and style it for their medium.

use crate::types::Type;

/// Semantic category a renderer maps to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Emphasis {
    Plain,
    /// Colored like the given elemental type
    Type(Type),
    Danger,
    Info,
    Muted,
    /// Chat attribution, distinguishing the local player from the opponent
    Chat { own: bool },
}

/// A run of text sharing one emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
    pub strong: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
            strong: false,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Plain)
    }

    pub fn strong(mut self) -> Self {
        self.strong = true;
        self
    }
}

/// One line of battle narration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Narration {
    pub spans: Vec<Span>,
}

impl Narration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single unstyled line
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().push(Span::plain(text))
    }

    /// Single line in one emphasis
    pub fn styled(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self::new().push(Span::new(text, emphasis))
    }

    pub fn push(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    /// Mark every span strong
    pub fn strong(mut self) -> Self {
        for span in &mut self.spans {
            span.strong = true;
        }
        self
    }

    /// Concatenated text without styling
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Emphasis of the first span, which classifies single-span lines
    pub fn emphasis(&self) -> Emphasis {
        self.spans.first().map_or(Emphasis::Plain, |s| s.emphasis)
    }
}

impl std::fmt::Display for Narration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for span in &self.spans {
            write!(f, "{}", span.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_spans() {
        let line = Narration::plain("Pikachu used ")
            .push(Span::new("Thunderbolt", Emphasis::Type(Type::Electric)).strong())
            .push(Span::plain("!"));

        assert_eq!(line.text(), "Pikachu used Thunderbolt!");
        assert_eq!(line.to_string(), line.text());
        assert!(line.spans[1].strong);
        assert!(!line.spans[0].strong);
    }

    #[test]
    fn test_strong_marks_all() {
        let line = Narration::styled("Start of turn 1", Emphasis::Info).strong();
        assert!(line.spans.iter().all(|s| s.strong));
        assert_eq!(line.emphasis(), Emphasis::Info);
    }
}
