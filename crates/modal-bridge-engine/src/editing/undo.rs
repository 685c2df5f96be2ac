use serde::Serialize;

use crate::EditorError;
use crate::host::UndoManager;

/// Observable state of an [`UndoCoalescer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoalescerState {
    Idle,
    /// A checkpoint group opened by `set_undo_mark` is collecting edits
    CompoundOpen,
    /// Inside `begin_change`/`end_change`; checkpoints are suppressed
    Locked,
}

/// Groups primitive edits into user-visible undo steps.
///
/// Sits on top of the host's native [`UndoManager`], which is passed in on
/// every call so the coalescer never holds a borrow of the host. Without a
/// native manager every call only updates the bookkeeping.
///
/// `begin_change`/`end_change` nest: only the outermost pair opens and closes
/// the native compound change, so everything in between is one undo step.
#[derive(Debug, Default)]
pub struct UndoCoalescer {
    depth: usize,
    compound_open: bool,
}

impl UndoCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CoalescerState {
        if self.depth > 0 {
            CoalescerState::Locked
        } else if self.compound_open {
            CoalescerState::CompoundOpen
        } else {
            CoalescerState::Idle
        }
    }

    pub fn is_locked(&self) -> bool {
        self.depth > 0
    }

    /// Nesting depth of open `begin_change` calls
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn begin_change(&mut self, native: Option<&mut dyn UndoManager>) {
        if self.depth == 0 {
            if let Some(native) = native {
                if self.compound_open {
                    native.end_compound_change();
                }
                native.begin_compound_change();
            }
            self.compound_open = false;
        }
        self.depth += 1;
    }

    pub fn end_change(&mut self, native: Option<&mut dyn UndoManager>) -> Result<(), EditorError> {
        if self.depth == 0 {
            log::error!("end_change() without begin_change(); native undo state left untouched");
            return Err(EditorError::UnbalancedChange);
        }
        self.depth -= 1;
        if self.depth == 0
            && let Some(native) = native
        {
            native.end_compound_change();
        }
        Ok(())
    }

    /// Close the current checkpoint group and open the next one.
    ///
    /// Ignored while locked, so a composite edit stays a single step.
    pub fn set_undo_mark(&mut self, native: Option<&mut dyn UndoManager>) {
        if self.is_locked() {
            log::debug!("Undo mark ignored inside a locked change");
            return;
        }
        if let Some(native) = native {
            if self.compound_open {
                native.end_compound_change();
            }
            native.begin_compound_change();
        }
        self.compound_open = true;
    }

    pub fn undo(&mut self, native: Option<&mut dyn UndoManager>) {
        if let Some(native) = native {
            self.close_checkpoint(native);
            if native.undoable() {
                native.undo();
            }
        }
    }

    pub fn redo(&mut self, native: Option<&mut dyn UndoManager>) {
        if let Some(native) = native {
            self.close_checkpoint(native);
            if native.redoable() {
                native.redo();
            }
        }
    }

    fn close_checkpoint(&mut self, native: &mut dyn UndoManager) {
        if self.compound_open && !self.is_locked() {
            native.end_compound_change();
            self.compound_open = false;
        }
    }
}
