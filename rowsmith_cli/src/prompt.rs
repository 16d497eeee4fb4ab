//! Line-oriented prompts on the controlling terminal.
//!
//! Ctrl-C or Ctrl-D at any prompt cancels the current operation.

use rowsmith_core::error::PromptError;
use rowsmith_core::session::PromptSource;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub struct TerminalPrompts {
    editor: DefaultEditor,
}

impl TerminalPrompts {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(PromptError::Cancelled),
            Err(err) => Err(PromptError::Failed {
                reason: err.to_string(),
            }),
        }
    }

    fn print_choices(title: &str, choices: &[String]) {
        println!("{title}");
        for (i, choice) in choices.iter().enumerate() {
            println!("  {:>2}) {choice}", i + 1);
        }
    }
}

impl PromptSource for TerminalPrompts {
    fn ask_text(&mut self, question: &str) -> Result<String, PromptError> {
        self.read_line(&format!("{question} "))
    }

    fn select_one(&mut self, title: &str, choices: &[String]) -> Result<usize, PromptError> {
        Self::print_choices(title, choices);
        loop {
            let line = self.read_line(&format!("choose [1-{}]> ", choices.len()))?;
            match parse_choice(&line, choices.len()) {
                Some(idx) => return Ok(idx),
                None => println!("Enter a number between 1 and {}.", choices.len()),
            }
        }
    }

    fn select_many(&mut self, title: &str, choices: &[String]) -> Result<Vec<usize>, PromptError> {
        Self::print_choices(title, choices);
        println!("(numbers separated by spaces or commas, empty for none)");
        loop {
            let line = self.read_line("select> ")?;
            match parse_choices(&line, choices.len()) {
                Some(picked) => return Ok(picked),
                None => println!("Enter numbers between 1 and {}.", choices.len()),
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        loop {
            let line = self.read_line(&format!("{question} [y/n] "))?;
            match line.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Please answer y or n."),
            }
        }
    }

    fn notice(&mut self, message: &str) {
        println!("{message}");
    }

    fn report(&mut self, problem: &dyn std::error::Error) {
        println!("error: {problem}");
    }
}

/// One-based menu number -> index.
fn parse_choice(line: &str, len: usize) -> Option<usize> {
    let n: usize = line.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Distinct indices in the order given; `None` if any entry is invalid.
fn parse_choices(line: &str, len: usize) -> Option<Vec<usize>> {
    let mut picked: Vec<usize> = Vec::new();
    for part in line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
    {
        let idx = parse_choice(part, len)?;
        if !picked.contains(&idx) {
            picked.push(idx);
        }
    }
    Some(picked)
}
