use std::collections::HashMap;

use crate::HostError;
use crate::host::{PositionId, TextDocument};

/// Named positions that follow the text they were set on.
///
/// The host tracks each position; the registry only remembers which handle
/// belongs to which name. A position the host reports as deleted is evicted
/// on the next lookup and never comes back.
#[derive(Debug, Default)]
pub struct MarkRegistry {
    marks: HashMap<String, PositionId>,
}

impl MarkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `model_offset` under `name`, replacing any earlier mark
    pub fn set<H>(&mut self, host: &mut H, name: &str, model_offset: usize) -> Result<(), HostError>
    where
        H: TextDocument + ?Sized,
    {
        let id = host.add_position(model_offset)?;
        if let Some(previous) = self.marks.insert(name.to_string(), id) {
            host.remove_position(previous);
        }
        Ok(())
    }

    /// Current model offset of `name`, if the mark is still alive
    pub fn resolve<H>(&mut self, host: &mut H, name: &str) -> Option<usize>
    where
        H: TextDocument + ?Sized,
    {
        let id = *self.marks.get(name)?;
        match host.position(id) {
            Some(position) if !position.deleted => Some(position.offset),
            _ => {
                log::debug!("Evicting mark {name:?}: its text was deleted");
                self.marks.remove(name);
                host.remove_position(id);
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.marks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Forget every mark and release the host positions
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: TextDocument + ?Sized,
    {
        for (_, id) in self.marks.drain() {
            host.remove_position(id);
        }
    }
}
