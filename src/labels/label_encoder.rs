//! Sort-and-rank encoding of answer letters to dense integer labels.
//!
//! The label space is the sorted set of distinct letters the encoder was
//! fitted on; each letter maps to its rank. Fitting the same set of letters
//! always yields the same mapping, whatever order they were seen in.

use std::collections::BTreeSet;

use crate::dataset::record::Record;
use crate::errors::{TransformError, TransformResult};

/// Bijection between answer letters and `[0, num_classes)`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelEncoder {
    classes: Option<Vec<String>>,
}

impl LabelEncoder {
    /// Create an unfitted encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self { classes: None }
    }

    /// Build an encoder over a canonical alphabet.
    #[must_use]
    pub fn from_alphabet<I, S>(letters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut encoder = Self::new();
        encoder.fit(letters);
        encoder
    }

    /// Fit the label space to the distinct letters given, replacing any previous fit.
    pub fn fit<I, S>(&mut self, letters: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let distinct: BTreeSet<String> = letters.into_iter().map(Into::into).collect();
        self.classes = Some(distinct.into_iter().collect());
    }

    /// Fit the label space to every choice letter across the records.
    pub fn fit_records(&mut self, records: &[Record]) {
        self.fit(records.iter().flat_map(|record| record.choices.letters()));
    }

    /// Whether `fit` has run.
    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        self.classes.is_some()
    }

    /// Sorted letters of the label space; empty before fitting.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        self.classes.as_deref().unwrap_or_default()
    }

    /// Size of the label space.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.classes().len()
    }

    /// Encode one letter.
    ///
    /// # Errors
    /// Returns an error if the encoder is unfitted or the letter is unknown.
    pub fn transform(&self, letter: &str) -> TransformResult<usize> {
        let classes = self
            .classes
            .as_ref()
            .ok_or(TransformError::EncoderNotFitted)?;
        classes
            .binary_search_by(|class| class.as_str().cmp(letter))
            .map_err(|_| TransformError::UnknownLabel(letter.to_string()))
    }

    /// Encode a sequence of letters, failing on the first unknown one.
    ///
    /// # Errors
    /// Returns an error if the encoder is unfitted or any letter is unknown.
    pub fn transform_all<'a, I>(&self, letters: I) -> TransformResult<Vec<usize>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        letters
            .into_iter()
            .map(|letter| self.transform(letter))
            .collect()
    }

    /// Decode a label back to its letter.
    ///
    /// # Errors
    /// Returns an error if the encoder is unfitted or the code is out of range.
    pub fn inverse_transform(&self, code: usize) -> TransformResult<&str> {
        let classes = self
            .classes
            .as_ref()
            .ok_or(TransformError::EncoderNotFitted)?;
        classes
            .get(code)
            .map(String::as_str)
            .ok_or(TransformError::UnknownCode(code))
    }
}
