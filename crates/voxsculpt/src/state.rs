//! Global state management for voxsculpt.
//!
//! A panic inside a context closure poisons the lock. Every accessor here
//! recovers the guard from a poisoned lock, so the registry stays usable.

use std::sync::{OnceLock, PoisonError, RwLock};

use voxsculpt_core::{Options, Result, VoxelError};

use crate::registry::Registry;

/// Global context singleton.
static CONTEXT: OnceLock<RwLock<Context>> = OnceLock::new();

/// The global context containing all voxsculpt state.
#[derive(Default)]
pub struct Context {
    /// Whether voxsculpt is currently initialized.
    pub initialized: bool,

    /// The volume registry.
    pub registry: Registry,

    /// Global options.
    pub options: Options,
}

/// Initializes the global context.
///
/// Fails with [`VoxelError::AlreadyInitialized`] if the context is live. A
/// context that was shut down can be initialized again.
pub fn init_context() -> Result<()> {
    let lock = CONTEXT.get_or_init(|| RwLock::new(Context::default()));
    let mut ctx = lock.write().unwrap_or_else(PoisonError::into_inner);
    if ctx.initialized {
        return Err(VoxelError::AlreadyInitialized);
    }
    ctx.initialized = true;
    Ok(())
}

/// Returns whether the context has been initialized.
pub fn is_initialized() -> bool {
    CONTEXT.get().is_some_and(|lock| {
        lock.read()
            .unwrap_or_else(PoisonError::into_inner)
            .initialized
    })
}

/// Access the global context for reading.
///
/// # Panics
///
/// Panics if voxsculpt has not been initialized.
pub fn with_context<F, R>(f: F) -> R
where
    F: FnOnce(&Context) -> R,
{
    try_with_context(f).expect("voxsculpt not initialized")
}

/// Access the global context for writing.
///
/// # Panics
///
/// Panics if voxsculpt has not been initialized.
pub fn with_context_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Context) -> R,
{
    try_with_context_mut(f).expect("voxsculpt not initialized")
}

/// Try to access the global context for reading.
///
/// Returns `None` if voxsculpt is not initialized.
pub fn try_with_context<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Context) -> R,
{
    let lock = CONTEXT.get()?;
    let guard = lock.read().unwrap_or_else(PoisonError::into_inner);
    guard.initialized.then(|| f(&guard))
}

/// Try to access the global context for writing.
///
/// Returns `None` if voxsculpt is not initialized.
pub fn try_with_context_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Context) -> R,
{
    let lock = CONTEXT.get()?;
    let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
    if !guard.initialized {
        return None;
    }
    Some(f(&mut guard))
}

/// Shuts down the global context, dropping every registered volume.
///
/// Options are kept for the next [`init_context`].
pub fn shutdown_context() {
    if let Some(lock) = CONTEXT.get() {
        let mut ctx = lock.write().unwrap_or_else(PoisonError::into_inner);
        ctx.initialized = false;
        ctx.registry.clear();
    }
}
