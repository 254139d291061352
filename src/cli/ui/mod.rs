pub mod formatting;
pub mod progress;
pub mod prompts;
pub mod test_mode;
