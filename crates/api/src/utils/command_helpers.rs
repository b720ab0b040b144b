//! Timing and logging wrapper shared by every command

use std::future::Future;
use std::time::Instant;

use crate::commands::CommandError;
use crate::utils::logging::log_command_execution;

/// Runs `command_fn`, logging `command_execution_success` or
/// `command_execution_failure` with the elapsed time and error kind.
pub async fn execute_command<F, Fut, T>(command_name: &str, command_fn: F) -> Result<T, CommandError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, CommandError>>,
{
    let start = Instant::now();
    let result = command_fn().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(|e| e.kind));

    result
}
