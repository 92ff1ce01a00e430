use std::time::Duration;

use crate::errors::ExternalCallError;

/// Black-box prompt -> text completion service.
///
/// Calls are blocking and must honor the explicit timeout. Implementations
/// surface transport failures and timeouts as `ExternalCallError`; they never
/// attempt to interpret the completion text.
pub trait ITextCompletion: Send + Sync {
    fn complete(
        &self,
        prompt: &str,
        temperature: f64,
        timeout: Duration,
    ) -> Result<String, ExternalCallError>;

    /// Human-readable provider name, for logs.
    fn name(&self) -> &str;
}
