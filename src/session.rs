//! Interactive session: main menu, model menu, and the query loop.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::menu::{FollowUp, MainChoice, Menu};
use crate::router::{Dispatcher, ProviderId};

/// Drives the menus and sends each query through the dispatcher.
pub struct Session<R, W> {
    menu: Menu<R, W>,
    dispatcher: Dispatcher,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, dispatcher: Dispatcher) -> Self {
        Self {
            menu: Menu::new(input, output),
            dispatcher,
        }
    }

    pub fn into_inner(self) -> (R, W) {
        self.menu.into_inner()
    }

    /// Run until the user exits or input ends.
    ///
    /// Dispatch errors are printed and the session continues. Only I/O errors
    /// on the terminal streams end it early.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let provider = match self.menu.choose_provider()? {
                MainChoice::Provider(provider) => provider,
                MainChoice::Exit => break,
            };

            let Some(model) = self.menu.choose_model(provider)? else {
                break;
            };

            loop {
                let Some(query) = self.menu.read_query()? else {
                    return Ok(());
                };
                self.ask(provider, model.id, &query).await?;

                match self.menu.follow_up()? {
                    FollowUp::Again => continue,
                    FollowUp::MainMenu => break,
                    FollowUp::Quit => return Ok(()),
                }
            }
        }

        tracing::debug!("Session ended");
        Ok(())
    }

    async fn ask(&mut self, provider: ProviderId, model: &str, query: &str) -> Result<()> {
        match self.dispatcher.dispatch(provider, model, query).await {
            Ok(results) => self.menu.display_results(&results)?,
            Err(e) => {
                tracing::error!(provider = %provider, model = %model, error = %e, "Query failed");
                self.menu.display_error(&e)?;
            }
        }
        Ok(())
    }
}
