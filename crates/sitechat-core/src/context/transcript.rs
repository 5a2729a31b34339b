use serde::{Deserialize, Serialize};

/// One question/answer exchange. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    question: String,
    answer: String,
}

impl Turn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Append-only, chronological record of the turns in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(Turn::new(question, answer));
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Plain-text rendering used in outgoing mail, one "User:/{speaker}:"
    /// block per turn separated by a blank line.
    pub fn render_plain(&self, speaker: &str) -> String {
        self.turns
            .iter()
            .map(|t| format!("User: {}\n{}: {}", t.question, speaker, t.answer))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn estimate_tokens(&self) -> usize {
        self.turns
            .iter()
            .map(|t| (t.question.len() + 3) / 4 + (t.answer.len() + 3) / 4)
            .sum()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
