//! Prompt construction modules.

pub mod exemplars;
pub mod prompt_builder;

pub use exemplars::select_exemplars;
pub use prompt_builder::{build_prompt, render_example};
