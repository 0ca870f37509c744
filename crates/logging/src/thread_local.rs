//! crates/logging/src/thread_local.rs
//! Thread-local storage for each thread's log context.
//!
//! A context is only ever touched by the thread that owns it, so no locking is
//! involved once it exists. It is closed by the thread-local destructor when
//! the thread exits.

use std::cell::RefCell;
use std::fmt;

use crate::context::{LogContext, Location};
use crate::diagnostics;
use crate::global::LogGlobal;
use crate::levels::Level;

struct BoundContext {
    generation: u64,
    context: LogContext,
}

thread_local! {
    static CONTEXT: RefCell<Option<BoundContext>> = const { RefCell::new(None) };
}

/// Makes sure the calling thread holds a context for the current generation
/// of `global`.
///
/// Returns `false` when the context cannot be created, when the thread is
/// being torn down, or when called from inside a record being written on the
/// same thread.
pub(crate) fn ensure_context(global: &LogGlobal) -> bool {
    CONTEXT
        .try_with(|slot| match slot.try_borrow_mut() {
            Ok(mut slot) => bind(global, &mut slot).is_some(),
            Err(_) => false,
        })
        .unwrap_or(false)
}

/// Writes one record through the calling thread's context.
pub(crate) fn write_record(
    global: &LogGlobal,
    level: Level,
    location: &Location,
    args: fmt::Arguments<'_>,
) {
    // A record logged while formatting another one is dropped.
    let _ = CONTEXT.try_with(|slot| {
        if let Ok(mut slot) = slot.try_borrow_mut() {
            if let Some(context) = bind(global, &mut slot) {
                context.log(level, location, args);
            }
        }
    });
}

fn bind<'a>(
    global: &LogGlobal,
    slot: &'a mut Option<BoundContext>,
) -> Option<&'a mut LogContext> {
    let generation = global.generation();
    if slot.as_ref().is_none_or(|bound| bound.generation != generation) {
        // The old file is closed before the new directory is probed.
        *slot = None;
        match global.open_context() {
            Ok((generation, context)) => *slot = Some(BoundContext { generation, context }),
            Err(error) => {
                diagnostics::context_failed(&error);
                return None;
            }
        }
    }
    slot.as_mut().map(|bound| &mut bound.context)
}
