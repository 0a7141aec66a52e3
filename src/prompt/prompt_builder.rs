//! Prompt builder for multiple-choice questions.

use crate::dataset::record::Record;

const CONTEXT_PREFIX: &str = "Context: ";
const QUESTION_PREFIX: &str = "Question: ";
const CHOICES_HEADING: &str = "\nChoices:\n";
const ANSWER_PREFIX: &str = "Answer:";

/// Append one rendered example to `out`.
///
/// With `include_answer` the ground-truth letter follows `Answer:` and ends
/// the line; without it the text stops right after `Answer:`.
pub fn render_example(out: &mut String, record: &Record, include_answer: bool) {
    out.push_str(CONTEXT_PREFIX);
    out.push_str(&record.context);
    out.push('\n');

    out.push_str(QUESTION_PREFIX);
    out.push_str(&record.question);
    out.push_str(CHOICES_HEADING);

    for (letter, text) in record.choices.iter() {
        out.push_str(letter);
        out.push_str(". ");
        out.push_str(text);
        out.push('\n');
    }

    out.push_str(ANSWER_PREFIX);
    if include_answer {
        out.push(' ');
        out.push_str(&record.answer);
        out.push('\n');
    }
}

/// Build a deterministic prompt: optional header, answered exemplars, then the
/// unanswered target.
#[must_use]
pub fn build_prompt(target: &Record, exemplars: &[&Record], header: Option<&str>) -> String {
    let capacity = header.map_or(0, str::len)
        + exemplars.iter().map(|r| estimate_len(r)).sum::<usize>()
        + estimate_len(target);
    let mut out = String::with_capacity(capacity);

    if let Some(header) = header {
        out.push_str(header);
    }

    for exemplar in exemplars {
        render_example(&mut out, exemplar, true);
    }

    render_example(&mut out, target, false);
    out
}

/// Approximate the rendered length of a record, answer included.
fn estimate_len(record: &Record) -> usize {
    let mut total = CONTEXT_PREFIX.len() + record.context.len() + 1;
    total += QUESTION_PREFIX.len() + record.question.len() + CHOICES_HEADING.len();
    for (letter, text) in record.choices.iter() {
        total += letter.len() + text.len() + 3;
    }
    total += ANSWER_PREFIX.len() + record.answer.len() + 2;
    total
}
