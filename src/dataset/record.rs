//! Question-answer records and their ordered answer choices.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Ordered mapping from choice letter to choice text.
///
/// Entries keep the order in which they were declared (the key order of the
/// JSON object they were read from). Inserting an existing letter replaces its
/// text in place.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Choices {
    entries: Vec<(String, String)>,
}

impl Choices {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a choice, keeping the position of an existing letter.
    pub fn insert(&mut self, letter: impl Into<String>, text: impl Into<String>) {
        let letter = letter.into();
        let text = text.into();
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| *l == letter) {
            entry.1 = text;
        } else {
            self.entries.push((letter, text));
        }
    }

    /// Iterate `(letter, text)` pairs in declared order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(letter, text)| (letter.as_str(), text.as_str()))
    }

    /// Iterate the choice letters in declared order.
    #[must_use]
    pub fn letters(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(letter, _)| letter.as_str())
    }

    /// Text for a letter, if present.
    #[must_use]
    pub fn get(&self, letter: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == letter)
            .map(|(_, text)| text.as_str())
    }

    /// Whether the letter is one of the choices.
    #[must_use]
    pub fn contains(&self, letter: &str) -> bool {
        self.get(letter).is_some()
    }

    /// Number of choices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no choices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L, T> FromIterator<(L, T)> for Choices
where
    L: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut choices = Self::new();
        for (letter, text) in iter {
            choices.insert(letter, text);
        }
        choices
    }
}

impl Serialize for Choices {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (letter, text) in &self.entries {
            map.serialize_entry(letter, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Choices {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ChoicesVisitor)
    }
}

struct ChoicesVisitor;

impl<'de> Visitor<'de> for ChoicesVisitor {
    type Value = Choices;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of choice letters to choice text")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut choices = Choices::new();
        while let Some((letter, value)) = access.next_entry::<String, Value>()? {
            choices.insert(letter, value_to_text(value));
        }
        Ok(choices)
    }
}

/// Coerce a JSON choice value to prompt text.
///
/// Strings are used verbatim; everything else is rendered as a Python
/// literal (`None`, `True`, `[1, 'x']`), which is how CosmosQA prompts print them.
fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => {
            let mut out = String::new();
            write_repr(&mut out, &other);
            out
        }
    }
}

fn write_repr(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::String(text) => write_quoted(out, text),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, key);
                out.push_str(": ");
                write_repr(out, item);
            }
            out.push('}');
        }
    }
}

/// Single-quoted unless the text holds a single quote and no double quote.
fn write_quoted(out: &mut String, text: &str) {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// One reading-comprehension question with its multiple-choice answers.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Declared record identifier.
    pub id: i64,
    /// Passage the question is about.
    pub context: String,
    /// Question text.
    pub question: String,
    /// Answer options keyed by letter.
    pub choices: Choices,
    /// Ground-truth choice letter.
    pub answer: String,
}

impl Record {
    /// Create a record.
    #[must_use]
    pub fn new(
        id: i64,
        context: impl Into<String>,
        question: impl Into<String>,
        choices: Choices,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            context: context.into(),
            question: question.into(),
            choices,
            answer: answer.into(),
        }
    }

    /// Whether the ground-truth answer is one of the record's own choices.
    #[must_use]
    pub fn answer_in_choices(&self) -> bool {
        self.choices.contains(&self.answer)
    }
}

/// Build a four-choice record whose texts mention its id.
#[cfg(test)]
pub(crate) fn sample_record(id: i64, answer: &str) -> Record {
    let choices = ["A", "B", "C", "D"]
        .into_iter()
        .map(|letter| (letter, format!("option {letter} of {id}")))
        .collect();
    Record::new(
        id,
        format!("context {id}"),
        format!("question {id}?"),
        choices,
        answer,
    )
}

/// Build `len` records with ids matching their positions.
#[cfg(test)]
pub(crate) fn sample_dataset(len: usize) -> Vec<Record> {
    let answers = ["A", "B", "C", "D"];
    (0..len)
        .map(|i| sample_record(i64::try_from(i).unwrap(), answers[i % answers.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_keep_declared_order() {
        let json = r#"{"D": "four", "B": "two", "A": "one", "C": "three"}"#;
        let choices: Choices = serde_json::from_str(json).unwrap();
        let letters: Vec<&str> = choices.letters().collect();
        assert_eq!(letters, vec!["D", "B", "A", "C"]);
        assert_eq!(choices.get("A"), Some("one"));
    }

    #[test]
    fn test_choices_coerce_non_string_values() {
        let json = r#"{"A": null, "B": true, "C": false, "D": [1, "x"], "E": 42, "F": "text"}"#;
        let choices: Choices = serde_json::from_str(json).unwrap();
        let pairs: Vec<(&str, &str)> = choices.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("A", "None"),
                ("B", "True"),
                ("C", "False"),
                ("D", "[1, 'x']"),
                ("E", "42"),
                ("F", "text"),
            ]
        );
    }

    #[test]
    fn test_nested_values_render_quoted() {
        let json = r#"{"A": {"k": [null, "it's"]}, "B": ["a\\b", 2.5]}"#;
        let choices: Choices = serde_json::from_str(json).unwrap();
        assert_eq!(choices.get("A"), Some(r#"{'k': [None, "it's"]}"#));
        assert_eq!(choices.get("B"), Some(r"['a\\b', 2.5]"));

        let choices: Choices = serde_json::from_str(r#"{"A": {"z": 1, "a": 2}}"#).unwrap();
        assert_eq!(choices.get("A"), Some("{'z': 1, 'a': 2}"));
    }

    #[test]
    fn test_duplicate_letter_replaces_in_place() {
        let mut choices = Choices::new();
        choices.insert("A", "first");
        choices.insert("B", "second");
        choices.insert("A", "replaced");
        let pairs: Vec<(&str, &str)> = choices.iter().collect();
        assert_eq!(pairs, vec![("A", "replaced"), ("B", "second")]);
    }

    #[test]
    fn test_record_deserialize() {
        let json = r#"{
            "id": 7,
            "context": "It rained.",
            "question": "Why was the ground wet?",
            "choices": {"A": "Rain", "B": "Snow"},
            "answer": "A"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.choices.len(), 2);
        assert!(record.answer_in_choices());
    }

    #[test]
    fn test_choices_serialize_in_order() {
        let choices: Choices = [("B", "bar"), ("A", "foo")].into_iter().collect();
        let json = serde_json::to_string(&choices).unwrap();
        assert_eq!(json, r#"{"B":"bar","A":"foo"}"#);
    }
}
