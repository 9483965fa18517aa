//! Privileged read mode.
//!
//! Path containment checks read items that the current caller may not be
//! allowed to see, and must not populate host caches while doing so. Hosts
//! expose this as a toggle; the resolver wraps every use in a [`ReadScope`]
//! so the mode is released on every exit path, including unwinding.
//!
//! [`ThreadLocalReadMode`] is the default toggle. It keeps a per-thread
//! stack of active modes, so nested scopes compose and concurrent
//! resolutions on other threads never observe each other's scopes.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// Effective read mode on the current thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadMode {
    /// Security filtering is suppressed
    pub security_disabled: bool,

    /// Cache writes are suppressed
    pub cache_writes_disabled: bool,
}

impl ReadMode {
    /// No security filtering and no cache writes.
    pub const PRIVILEGED: ReadMode = ReadMode {
        security_disabled: true,
        cache_writes_disabled: true,
    };

    /// Returns true if this mode suppresses anything.
    pub fn is_privileged(&self) -> bool {
        self.security_disabled || self.cache_writes_disabled
    }
}

/// Host toggle for the privileged read mode.
///
/// Every `enter` is matched by exactly one `exit`, in stack order.
pub trait ReadModeToggle: Send + Sync {
    /// Enter the no-security, no-cache-write mode.
    fn enter(&self);

    /// Leave the most recently entered mode.
    fn exit(&self);
}

/// Guard holding a privileged read mode until dropped.
#[must_use = "the read mode is released as soon as the scope is dropped"]
pub struct ReadScope<'a> {
    toggle: &'a dyn ReadModeToggle,
}

impl<'a> ReadScope<'a> {
    /// Enter the privileged read mode of `toggle`.
    pub fn enter(toggle: &'a dyn ReadModeToggle) -> Self {
        toggle.enter();
        Self { toggle }
    }
}

impl Drop for ReadScope<'_> {
    fn drop(&mut self) {
        self.toggle.exit();
    }
}

thread_local! {
    static MODE_STACK: RefCell<Vec<ReadMode>> = const { RefCell::new(Vec::new()) };
}

/// Default toggle backed by a thread-local stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadLocalReadMode;

impl ThreadLocalReadMode {
    /// Create the toggle.
    pub fn new() -> Self {
        Self
    }

    /// Mode in effect on the calling thread.
    pub fn current() -> ReadMode {
        MODE_STACK.with(|stack| stack.borrow().last().copied().unwrap_or_default())
    }

    /// Returns true while a privileged scope is open on the calling thread.
    pub fn is_active() -> bool {
        Self::current().is_privileged()
    }

    /// Number of open scopes on the calling thread.
    pub fn depth() -> usize {
        MODE_STACK.with(|stack| stack.borrow().len())
    }
}

impl ReadModeToggle for ThreadLocalReadMode {
    fn enter(&self) {
        MODE_STACK.with(|stack| stack.borrow_mut().push(ReadMode::PRIVILEGED));
    }

    fn exit(&self) {
        MODE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}
