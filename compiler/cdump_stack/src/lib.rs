//! Stack growth for deep node-graph traversals.
//!
//! The dumper walks the front end's representation depth-first and
//! recursively. Shared sub-nodes are expanded only once, so depth is bounded
//! by the longest reference chain, but pointer-to-pointer chains or long
//! declaration nests in generated code can still exceed the main thread's
//! stack. Every Top-Level Visitor entry goes through [`guarded`].
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: passthrough.

/// Minimum stack left before growing (128KB red zone).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Run `f` behind [`ensure_sufficient_stack`] when `grow` is set, directly otherwise.
///
/// Lets callers turn stack growth off from configuration (e.g. when the
/// driver already runs the traversal on a thread with a large stack).
#[inline]
pub fn guarded<R>(grow: bool, f: impl FnOnce() -> R) -> R {
    if grow {
        ensure_sufficient_stack(f)
    } else {
        f()
    }
}
