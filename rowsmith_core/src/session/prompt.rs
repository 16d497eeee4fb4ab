use crate::error::PromptError;

/// Source of operator answers.
///
/// Any method may return [`PromptError::Cancelled`]; the core treats that as
/// an abort of the current operation.
pub trait PromptSource {
    fn ask_text(&mut self, question: &str) -> Result<String, PromptError>;

    /// Index of the chosen entry in `choices`.
    fn select_one(&mut self, title: &str, choices: &[String]) -> Result<usize, PromptError>;

    /// Indices of the chosen entries; may be empty.
    fn select_many(&mut self, title: &str, choices: &[String]) -> Result<Vec<usize>, PromptError>;

    fn confirm(&mut self, question: &str) -> Result<bool, PromptError>;

    /// Informational text such as a statement preview.
    fn notice(&mut self, _message: &str) {}

    /// An input the core rejected before asking again.
    fn report(&mut self, _problem: &dyn std::error::Error) {}
}
