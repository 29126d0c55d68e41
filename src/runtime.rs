//! The async runtime the CLI drives a session on.
//!
//! A decode that times out leaves its blocking task running. Dropping a tokio
//! runtime waits for such tasks, so this runtime is shut down in the
//! background instead and the timeout error reaches the caller right away.

/// Run `future` to completion on a fresh current-thread runtime.
///
/// Blocking tasks still running afterwards are abandoned, not awaited.
pub fn block_on_detached<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}
