use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;

pub fn spawn<T>(task: T) -> JoinHandle<T::Output>
where
    T: Future + Send + 'static,
    T::Output: Send + 'static,
{
    crate::handle().spawn(task)
}

/// Run `f` once after `delay`
///
/// Fire and forget: dropping the returned handle does not cancel the task
pub fn spawn_after<F>(delay: Duration, f: F) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    spawn(async move {
        tokio::time::sleep(delay).await;
        f();
    })
}
