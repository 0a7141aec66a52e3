//! Binary entrypoint that turns a CosmosQA-style dataset into few-shot prompts.

use std::process::ExitCode;

use cosmos_prompts::start_prompt_builder;

/// Transform the dataset named on the command line and print JSON lines.
fn main() -> ExitCode {
    start_prompt_builder::run()
}
