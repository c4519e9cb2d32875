use std::io::{self, IsTerminal, Write};

use async_trait::async_trait;
use console::style;
use dialoguer::Password;
use secrecy::SecretString;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::services::OperatorConsole;

/// Operator console over stdin/stdout.
///
/// End of input reads as `AppError::Interrupted`. Ctrl-C is not handled here;
/// callers race reads against the session `Interrupt`.
pub struct TerminalConsole {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OperatorConsole for TerminalConsole {
    async fn read_line(&self, prompt: &str) -> AppResult<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}: ")?;
        stdout.flush()?;

        let mut lines = self.lines.lock().await;
        match lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(AppError::Interrupted),
        }
    }

    async fn read_secret(&self, prompt: &str) -> AppResult<SecretString> {
        if !io::stdin().is_terminal() {
            return self.read_line(prompt).await.map(SecretString::from);
        }

        let prompt = prompt.to_string();
        let secret = tokio::task::spawn_blocking(move || {
            Password::new().with_prompt(prompt).interact()
        })
        .await
        .map_err(|err| AppError::Io(io::Error::other(err)))?
        .map_err(|err| {
            let err = io::Error::from(err);
            if err.kind() == io::ErrorKind::Interrupted {
                AppError::Interrupted
            } else {
                AppError::Io(err)
            }
        })?;
        Ok(SecretString::from(secret))
    }

    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn success(&self, message: &str) {
        println!("{}", style(format!("✅ {message}")).green());
    }

    fn failure(&self, message: &str) {
        println!("{}", style(format!("❌ {message}")).red());
    }
}
