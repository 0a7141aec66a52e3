//! Few-shot prompt transformer.
//!
//! Turns a dataset of multiple-choice records into aligned prompts and integer
//! labels. The label space is fitted over the whole dataset before any answer
//! is encoded, and the exemplar list is computed once and shared by every
//! prompt.

use tracing::{debug, info};

use crate::config::TransformConfig;
use crate::dataset::record::Record;
use crate::errors::TransformResult;
use crate::labels::label_encoder::LabelEncoder;
use crate::prompt::exemplars::select_exemplars;
use crate::prompt::prompt_builder::build_prompt;

/// Prompts and labels aligned with the input dataset.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TransformOutput {
    /// Prompt text per record.
    pub prompts: Vec<String>,
    /// Encoded answer per record.
    pub labels: Vec<usize>,
}

impl TransformOutput {
    /// Number of transformed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Whether no records were transformed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Iterate `(prompt, label)` pairs in dataset order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.prompts
            .iter()
            .map(String::as_str)
            .zip(self.labels.iter().copied())
    }
}

/// Builds few-shot prompts and labels for a dataset.
#[derive(Clone, Debug)]
pub struct PromptTransformer<'a> {
    data: &'a [Record],
    config: TransformConfig,
    label_encoder: LabelEncoder,
}

impl<'a> PromptTransformer<'a> {
    /// Create a transformer with the default configuration.
    #[must_use]
    pub fn new(data: &'a [Record]) -> Self {
        Self {
            data,
            config: TransformConfig::default(),
            label_encoder: LabelEncoder::new(),
        }
    }

    /// Create a transformer with a validated configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn with_config(data: &'a [Record], config: TransformConfig) -> TransformResult<Self> {
        config.validate()?;
        Ok(Self {
            data,
            config,
            label_encoder: LabelEncoder::new(),
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Encoder state; fitted after `transform_data` has run.
    #[must_use]
    pub const fn label_encoder(&self) -> &LabelEncoder {
        &self.label_encoder
    }

    /// Retrieve the configured few-shot exemplars.
    ///
    /// # Errors
    /// Returns an error if an exemplar cannot be found or its id does not
    /// match its configured position.
    pub fn fewshot_exemplars(&self) -> TransformResult<Vec<&'a Record>> {
        select_exemplars(self.data, &self.config.exemplars)
    }

    /// Build the prompt for one record using already selected exemplars.
    #[must_use]
    pub fn format_prompt(&self, target: &Record, exemplars: &[&Record]) -> String {
        build_prompt(target, exemplars, self.config.active_header())
    }

    /// Fit the label space to every choice letter in the dataset.
    pub fn fit_label_encoder(&mut self) {
        self.label_encoder.fit_records(self.data);
    }

    /// Fit the label space, then build a prompt and a label for every record.
    ///
    /// # Errors
    /// Returns an error if exemplar selection fails or an answer is outside
    /// the fitted label space. No partial output is produced.
    pub fn transform_data(&mut self) -> TransformResult<TransformOutput> {
        self.fit_label_encoder();
        self.encode_with(&self.label_encoder)
    }

    /// Build prompts and labels with a caller-provided label space.
    ///
    /// Use this when several datasets must agree on label integers.
    ///
    /// # Errors
    /// Returns an error if exemplar selection fails, the encoder is unfitted,
    /// or an answer is outside its label space.
    pub fn transform_with_encoder(&self, encoder: &LabelEncoder) -> TransformResult<TransformOutput> {
        self.encode_with(encoder)
    }

    fn encode_with(&self, encoder: &LabelEncoder) -> TransformResult<TransformOutput> {
        info!(
            records = self.data.len(),
            classes = encoder.num_classes(),
            "transforming dataset into few-shot prompts"
        );
        if !self.config.include_header {
            debug!("instruction header is configured but not prepended");
        }

        let exemplars = self.fewshot_exemplars()?;
        let mut output = TransformOutput {
            prompts: Vec::with_capacity(self.data.len()),
            labels: Vec::with_capacity(self.data.len()),
        };

        for record in self.data {
            if !record.answer_in_choices() {
                debug!(
                    id = record.id,
                    answer = %record.answer,
                    "answer is not among the record's choices"
                );
            }
            output.prompts.push(self.format_prompt(record, &exemplars));
            output.labels.push(encoder.transform(&record.answer)?);
        }

        info!(prompts = output.len(), "dataset transformed");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_HEADER, ExemplarSelection};
    use crate::dataset::record::{Choices, sample_dataset};
    use crate::errors::TransformError;
    use crate::prompt::prompt_builder::render_example;

    #[test]
    fn test_outputs_align_with_dataset() {
        let dataset = sample_dataset(25);
        let output = PromptTransformer::new(&dataset).transform_data().unwrap();
        assert_eq!(output.len(), dataset.len());
        assert_eq!(output.prompts.len(), output.labels.len());
    }

    #[test]
    fn test_labels_within_class_range() {
        let dataset = sample_dataset(12);
        let mut transformer = PromptTransformer::new(&dataset);
        let output = transformer.transform_data().unwrap();
        let k = transformer.label_encoder().num_classes();
        assert_eq!(k, 4);
        assert!(output.labels.iter().all(|label| *label < k));
        for (record, label) in dataset.iter().zip(&output.labels) {
            let letter = transformer.label_encoder().inverse_transform(*label).unwrap();
            assert_eq!(letter, record.answer);
        }
    }

    #[test]
    fn test_transform_is_deterministic() {
        let dataset = sample_dataset(10);
        let first = PromptTransformer::new(&dataset).transform_data().unwrap();
        let mut transformer = PromptTransformer::new(&dataset);
        let second = transformer.transform_data().unwrap();
        let third = transformer.transform_data().unwrap();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_prompts_hide_target_answer_and_show_exemplars() {
        let dataset = sample_dataset(10);
        let output = PromptTransformer::new(&dataset).transform_data().unwrap();
        let exemplar_ids = [1_usize, 3, 5, 7, 9];

        for (record, prompt) in dataset.iter().zip(&output.prompts) {
            assert!(prompt.ends_with("Answer:"));
            for id in exemplar_ids {
                let exemplar = &dataset[id];
                let block = format!(
                    "Context: {}\nQuestion: {}\nChoices:\n",
                    exemplar.context, exemplar.question
                );
                assert!(prompt.contains(&block));
                assert!(prompt.contains(&format!("Answer: {}\n", exemplar.answer)));
            }
            let mut target = String::new();
            render_example(&mut target, record, false);
            assert!(prompt.ends_with(&target));

            let tail = &prompt[prompt.rfind("Context: ").unwrap()..];
            assert!(!tail.contains(&format!("Answer: {}", record.answer)));
        }
    }

    #[test]
    fn test_exemplar_order_is_independent_of_dataset_size() {
        for size in [10, 11, 40] {
            let dataset = sample_dataset(size);
            let output = PromptTransformer::new(&dataset).transform_data().unwrap();
            let prompt = &output.prompts[size - 1];
            let positions: Vec<usize> = [1, 3, 5, 7, 9]
                .iter()
                .map(|id| prompt.find(&format!("Context: context {id}\n")).unwrap())
                .collect();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_two_letter_scenario() {
        let mut dataset: Vec<Record> = (0..10)
            .map(|id| {
                let choices: Choices = [("A", format!("a{id}")), ("B", format!("b{id}"))]
                    .into_iter()
                    .collect();
                Record::new(id, format!("ctx {id}"), format!("q {id}"), choices, "A")
            })
            .collect();
        dataset[0].choices = [("A", "foo"), ("B", "bar")].into_iter().collect();
        dataset[0].answer = "B".to_string();

        let output = PromptTransformer::new(&dataset).transform_data().unwrap();
        assert_eq!(output.labels[0], 1);
        assert!(output.labels[1..].iter().all(|label| *label == 0));

        let prompt = &output.prompts[0];
        assert!(prompt.starts_with("Context: ctx 1\nQuestion: q 1\nChoices:\nA. a1\nB. b1\nAnswer: A\n"));
        assert!(prompt.ends_with("Context: ctx 0\nQuestion: q 0\nChoices:\nA. foo\nB. bar\nAnswer:"));
    }

    #[test]
    fn test_misaligned_dataset_fails_without_output() {
        let mut dataset = sample_dataset(10);
        dataset[3].id = 4;
        let result = PromptTransformer::new(&dataset).transform_data();
        assert!(matches!(
            result,
            Err(TransformError::ExemplarIdMismatch { index: 3, found: 4 })
        ));
    }

    #[test]
    fn test_answer_outside_choices_is_unknown_label() {
        let mut dataset = sample_dataset(10);
        dataset[2].answer = "Z".to_string();
        let result = PromptTransformer::new(&dataset).transform_data();
        assert!(matches!(result, Err(TransformError::UnknownLabel(letter)) if letter == "Z"));
    }

    #[test]
    fn test_answer_outside_own_choices_still_encodes() {
        let mut dataset = sample_dataset(10);
        dataset[0].choices = [("A", "x"), ("B", "y")].into_iter().collect();
        dataset[0].answer = "D".to_string();
        assert!(!dataset[0].answer_in_choices());

        let output = PromptTransformer::new(&dataset).transform_data().unwrap();
        assert_eq!(output.labels[0], 3);
        assert!(output.prompts[0].ends_with("A. x\nB. y\nAnswer:"));
    }

    #[test]
    fn test_header_toggle() {
        let dataset = sample_dataset(10);
        let config = TransformConfig::new().with_include_header(true);
        let mut transformer = PromptTransformer::with_config(&dataset, config).unwrap();
        let output = transformer.transform_data().unwrap();
        assert!(output.prompts.iter().all(|p| p.starts_with(DEFAULT_HEADER)));
        assert_eq!(output.prompts[0].matches(DEFAULT_HEADER).count(), 1);

        let plain = PromptTransformer::new(&dataset).transform_data().unwrap();
        assert!(plain.prompts.iter().all(|p| p.starts_with("Context: ")));
    }

    #[test]
    fn test_by_id_exemplars_on_shuffled_dataset() {
        let mut dataset = sample_dataset(6);
        dataset.swap(0, 5);
        let config = TransformConfig::new().with_exemplars(ExemplarSelection::ById(vec![5, 2]));
        let mut transformer = PromptTransformer::with_config(&dataset, config).unwrap();
        let output = transformer.transform_data().unwrap();
        assert!(output.prompts[1].starts_with("Context: context 5\n"));
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let dataset = sample_dataset(10);
        let config = TransformConfig::new().with_exemplars(ExemplarSelection::ById(vec![1, 1]));
        assert!(PromptTransformer::with_config(&dataset, config).is_err());
    }

    #[test]
    fn test_shared_encoder_across_datasets() {
        let encoder = LabelEncoder::from_alphabet(["A", "B", "C", "D", "E"]);
        let mut dataset = sample_dataset(10);
        dataset[0].choices.insert("E", "extra");
        dataset[0].answer = "E".to_string();

        let output = PromptTransformer::new(&dataset)
            .transform_with_encoder(&encoder)
            .unwrap();
        assert_eq!(output.labels[0], 4);

        let unfitted = PromptTransformer::new(&dataset).transform_with_encoder(&LabelEncoder::new());
        assert!(matches!(unfitted, Err(TransformError::EncoderNotFitted)));
    }

    #[test]
    fn test_output_iter_pairs() {
        let dataset = sample_dataset(10);
        let output = PromptTransformer::new(&dataset).transform_data().unwrap();
        let pairs: Vec<(&str, usize)> = output.iter().collect();
        assert_eq!(pairs.len(), 10);
        assert_eq!(pairs[2].1, output.labels[2]);
    }
}
