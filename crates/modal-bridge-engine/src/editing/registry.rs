use std::collections::HashMap;

use crate::editing::{EditorBridge, EditorId, StatusRegistry};
use crate::host::EditorHost;

/// Creates and owns one [`EditorBridge`] per open editor.
///
/// Each editor gets its mode indicator from the [`StatusRegistry`] when it is
/// opened; nothing is looked up by name afterwards.
pub struct EditorRegistry<H: EditorHost> {
    editors: HashMap<EditorId, EditorBridge<H>>,
    status: StatusRegistry,
}

impl<H: EditorHost> Default for EditorRegistry<H> {
    fn default() -> Self {
        Self {
            editors: HashMap::new(),
            status: StatusRegistry::new(),
        }
    }
}

impl<H: EditorHost> EditorRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `host` in a new façade and return its identity
    pub fn open(&mut self, host: H) -> EditorId {
        let id = EditorId::new();
        let indicator = self.status.register(id);
        self.editors.insert(id, EditorBridge::new(id, host, indicator));
        log::debug!("Registered editor {id}");
        id
    }

    pub fn get(&self, id: EditorId) -> Option<&EditorBridge<H>> {
        self.editors.get(&id)
    }

    pub fn get_mut(&mut self, id: EditorId) -> Option<&mut EditorBridge<H>> {
        self.editors.get_mut(&id)
    }

    /// Forget an editor and its indicator, handing the façade back
    pub fn remove(&mut self, id: EditorId) -> Option<EditorBridge<H>> {
        self.status.remove(id);
        self.editors.remove(&id)
    }

    pub fn status(&self) -> &StatusRegistry {
        &self.status
    }

    pub fn ids(&self) -> impl Iterator<Item = EditorId> + '_ {
        self.editors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}
