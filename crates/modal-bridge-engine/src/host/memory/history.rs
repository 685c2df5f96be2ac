/// One primitive replacement, enough to replay it in either direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditRecord {
    pub offset: usize,
    pub removed: String,
    pub inserted: String,
}

/// Native undo stack of the in-memory editor.
///
/// Outside a compound change every edit is its own undo step. Inside one,
/// edits accumulate until the compound change ends.
#[derive(Debug, Default)]
pub(crate) struct NativeHistory {
    undo: Vec<Vec<EditRecord>>,
    redo: Vec<Vec<EditRecord>>,
    current: Vec<EditRecord>,
    compound: bool,
}

impl NativeHistory {
    pub(crate) fn record(&mut self, edit: EditRecord) {
        self.redo.clear();
        if self.compound {
            self.current.push(edit);
        } else {
            self.undo.push(vec![edit]);
        }
    }

    pub(crate) fn begin_compound(&mut self) {
        self.commit();
        self.compound = true;
    }

    pub(crate) fn end_compound(&mut self) {
        self.commit();
        self.compound = false;
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo.is_empty() || !self.current.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo steps, counting a compound change still being built
    pub(crate) fn depth(&self) -> usize {
        self.undo.len() + usize::from(!self.current.is_empty())
    }

    pub(crate) fn take_undo(&mut self) -> Option<Vec<EditRecord>> {
        self.commit();
        self.undo.pop()
    }

    pub(crate) fn take_redo(&mut self) -> Option<Vec<EditRecord>> {
        self.commit();
        self.redo.pop()
    }

    pub(crate) fn push_undo(&mut self, group: Vec<EditRecord>) {
        self.undo.push(group);
    }

    pub(crate) fn push_redo(&mut self, group: Vec<EditRecord>) {
        self.redo.push(group);
    }

    fn commit(&mut self) {
        if !self.current.is_empty() {
            self.undo.push(std::mem::take(&mut self.current));
        }
    }
}
