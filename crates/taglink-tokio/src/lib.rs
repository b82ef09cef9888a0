pub mod task;

use std::sync::{LazyLock, OnceLock};

use tokio::runtime::{Builder, Handle, Runtime};

pub(crate) static TOKIO: OnceLock<Handle> = OnceLock::new();

/// Runtime owned by this crate, only built when the host never registered one
static OWNED_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("taglink-worker")
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Register the current runtime, must be called from inside a tokio context
pub fn init() {
    if is_tokio_initialized() {
        return;
    }

    let _ = TOKIO.set(Handle::current());
}

pub fn is_tokio_initialized() -> bool {
    TOKIO.get().is_some()
}

/// Handle to spawn on: the ambient runtime if there is one, else the registered
/// runtime, else a runtime owned by this crate
pub fn handle() -> Handle {
    if let Ok(handle) = Handle::try_current() {
        return handle;
    }

    TOKIO
        .get_or_init(|| {
            tracing::debug!("no tokio runtime registered, starting one");
            OWNED_RUNTIME.handle().clone()
        })
        .clone()
}
