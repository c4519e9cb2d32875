use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::AppResult;

/// Line-based conversation with the operator.
///
/// Reads fail with `AppError::Interrupted` when input ends or the operator
/// aborts.
#[async_trait]
pub trait OperatorConsole: Send + Sync {
    async fn read_line(&self, prompt: &str) -> AppResult<String>;
    async fn read_secret(&self, prompt: &str) -> AppResult<SecretString>;
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
}
