//! Line-oriented menus for choosing a provider, a model, and follow-up actions.
//!
//! Generic over the input and output streams so the menus can be driven from
//! stdin/stdout or from in-memory buffers.

use std::io::{self, BufRead, Write};

use crate::error::Error;
use crate::router::{ModelOption, ProviderId};

const CHOICE_PROMPT: &str = "Enter your choice: ";
const QUERY_PROMPT: &str = "Enter search criteria: ";
const INVALID_RETRY: &str = "Invalid choice. Please try again.";
const INVALID_DEFAULT: &str = "Invalid choice. Defaulting to 1.";

/// Main-menu choice number that ends the session.
const EXIT_CHOICE: &str = "5";

/// Outcome of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Provider(ProviderId),
    Exit,
}

/// Outcome of the menu shown after each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Ask another question of the same provider and model
    Again,
    /// Return to the main menu
    MainMenu,
    /// Input ended
    Quit,
}

/// Menu renderer bound to an input and an output stream.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `text` without a newline and read one line.
    ///
    /// Returns `None` at end of input. The trailing line terminator is removed.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Show the provider menu until a valid choice is made.
    pub fn choose_provider(&mut self) -> io::Result<MainChoice> {
        loop {
            self.say("Choose an AI Router:")?;
            for (i, provider) in ProviderId::MENU_ORDER.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, provider.label())?;
            }
            writeln!(self.output, "{}. Exit", EXIT_CHOICE)?;

            let Some(choice) = self.prompt(CHOICE_PROMPT)? else {
                return Ok(MainChoice::Exit);
            };
            let choice = choice.trim();

            if choice == EXIT_CHOICE {
                return Ok(MainChoice::Exit);
            }
            match ProviderId::from_menu_choice(choice) {
                Some(provider) => {
                    tracing::debug!(provider = %provider, "Provider selected");
                    return Ok(MainChoice::Provider(provider));
                }
                None => self.say(INVALID_RETRY)?,
            }
        }
    }

    /// Show the model menu for `provider`.
    ///
    /// An unmatched choice falls back to the provider's first model.
    /// Returns `None` at end of input.
    pub fn choose_model(&mut self, provider: ProviderId) -> io::Result<Option<&'static ModelOption>> {
        self.say("Choose a model:")?;
        for (i, model) in provider.models().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, model.label)?;
        }

        let Some(choice) = self.prompt(CHOICE_PROMPT)? else {
            return Ok(None);
        };

        let model = match provider.model_by_choice(&choice) {
            Some(model) => model,
            None => {
                self.say(INVALID_DEFAULT)?;
                provider.default_model()
            }
        };

        writeln!(self.output, "Using model: {}", model.id)?;
        Ok(Some(model))
    }

    /// Read a free-text query. Returns `None` at end of input.
    pub fn read_query(&mut self) -> io::Result<Option<String>> {
        self.prompt(QUERY_PROMPT)
    }

    /// Ask whether to query again or go back to the main menu.
    pub fn follow_up(&mut self) -> io::Result<FollowUp> {
        loop {
            self.say("1. Enter another search for the same router/model")?;
            self.say("2. Go back to the main menu")?;

            let Some(choice) = self.prompt(CHOICE_PROMPT)? else {
                return Ok(FollowUp::Quit);
            };
            match choice.trim() {
                "1" => return Ok(FollowUp::Again),
                "2" => return Ok(FollowUp::MainMenu),
                _ => self.say(INVALID_RETRY)?,
            }
        }
    }

    /// Print each result as a bulleted line.
    pub fn display_results(&mut self, results: &[String]) -> io::Result<()> {
        self.say("\nSearch Results:")?;
        for result in results {
            writeln!(self.output, "- {}", result)?;
        }
        Ok(())
    }

    pub fn display_error(&mut self, error: &Error) -> io::Result<()> {
        writeln!(self.output, "Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn menu(input: &str) -> Menu<Cursor<Vec<u8>>, Vec<u8>> {
        Menu::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(menu: Menu<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(menu.into_inner().1).unwrap()
    }

    #[test]
    fn provider_menu_text() {
        let mut m = menu("1\n");
        assert_eq!(m.choose_provider().unwrap(), MainChoice::Provider(ProviderId::Groq));
        assert_eq!(
            output(m),
            "Choose an AI Router:\n1. Groq\n2. Hugging Face\n3. OpenRouter\n4. Google Gemini\n5. Exit\nEnter your choice: "
        );
    }

    #[test]
    fn provider_menu_reprompts_on_invalid() {
        let mut m = menu("9\nabc\n01\n+1\n05\n4\n");
        assert_eq!(
            m.choose_provider().unwrap(),
            MainChoice::Provider(ProviderId::GoogleGemini)
        );
        let out = output(m);
        assert_eq!(out.matches("Invalid choice. Please try again.").count(), 5);
        assert_eq!(out.matches("Choose an AI Router:").count(), 6);
    }

    #[test]
    fn provider_menu_exit_and_eof() {
        assert_eq!(menu("5\n").choose_provider().unwrap(), MainChoice::Exit);
        assert_eq!(menu("").choose_provider().unwrap(), MainChoice::Exit);
    }

    #[test]
    fn model_menu_valid_choice() {
        let mut m = menu("3\n");
        let model = m.choose_model(ProviderId::GoogleGemini).unwrap().unwrap();
        assert_eq!(model.id, "gemini-2.0-flash-thinking-exp-01-21");
        let out = output(m);
        assert!(out.starts_with(
            "Choose a model:\n1. Gemini 2.0 Flash\n2. Gemini 2.0 Flash Experimental\n3. Gemini 2.0 Flash Thinking\n4. Gemini 2.0 Pro\nEnter your choice: "
        ));
        assert!(!out.contains("Defaulting"));
        assert!(out.ends_with("Using model: gemini-2.0-flash-thinking-exp-01-21\n"));
    }

    #[test]
    fn model_menu_defaults_for_every_provider() {
        for provider in ProviderId::MENU_ORDER {
            for bad in ["0", "7", "x", "", "01", "02", "+1"] {
                let mut m = menu(&format!("{}\n", bad));
                let model = m.choose_model(provider).unwrap().unwrap();
                assert_eq!(model.id, provider.models()[0].id, "{} / {:?}", provider, bad);
                assert!(output(m).contains("Invalid choice. Defaulting to 1.\n"));
            }
        }
    }

    #[test]
    fn model_menu_eof() {
        assert!(menu("").choose_model(ProviderId::Groq).unwrap().is_none());
    }

    #[test]
    fn query_keeps_inner_whitespace() {
        let mut m = menu("  what is rust?  \r\n");
        assert_eq!(m.read_query().unwrap().as_deref(), Some("  what is rust?  "));
    }

    #[test]
    fn follow_up_choices() {
        assert_eq!(menu("1\n").follow_up().unwrap(), FollowUp::Again);
        assert_eq!(menu("2\n").follow_up().unwrap(), FollowUp::MainMenu);
        assert_eq!(menu("").follow_up().unwrap(), FollowUp::Quit);

        let mut m = menu("3\n2\n");
        assert_eq!(m.follow_up().unwrap(), FollowUp::MainMenu);
        assert!(output(m).contains("Invalid choice. Please try again.\n"));
    }

    #[test]
    fn results_are_bulleted() {
        let mut m = menu("");
        m.display_results(&["pong".to_string()]).unwrap();
        assert_eq!(output(m), "\nSearch Results:\n- pong\n");
    }

    #[test]
    fn empty_results_print_header_only() {
        let mut m = menu("");
        m.display_results(&[]).unwrap();
        assert_eq!(output(m), "\nSearch Results:\n");
    }
}
