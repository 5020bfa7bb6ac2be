use bearing_types::{BodyHandle, ComponentHandle, SketchHandle};
use host_kernel::{HostError, ModelingHost};
use tracing::{debug, warn};

/// An entity created in the host document during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    Component(ComponentHandle),
    Sketch(SketchHandle),
    Body(BodyHandle),
}

/// Creation-ordered record of host entities, undone newest first.
#[derive(Debug, Default)]
pub struct Journal {
    created: Vec<Created>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: Created) {
        self.created.push(entry);
    }

    pub fn len(&self) -> usize {
        self.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }

    /// Delete every recorded entity in reverse creation order.
    ///
    /// Keeps going past a failed delete so as much as possible is removed,
    /// then returns the first failure.
    pub fn rollback(mut self, host: &mut dyn ModelingHost) -> Result<(), HostError> {
        let mut first_error = None;
        while let Some(entry) = self.created.pop() {
            let result = match entry {
                Created::Body(body) => host.delete_body(body),
                Created::Sketch(sketch) => host.delete_sketch(sketch),
                Created::Component(component) => host.delete_component(component),
            };
            match result {
                Ok(()) => debug!(?entry, "rolled back"),
                Err(err) => {
                    warn!(?entry, error = %err, "rollback step failed");
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bearing_types::ConstructionPlane;
    use host_kernel::{HostCall, MemoryHost};

    #[test]
    fn rollback_empties_document() {
        let mut host = MemoryHost::new();
        let mut journal = Journal::new();
        let comp = host.add_component().unwrap();
        journal.record(Created::Component(comp));
        let plane = host.construction_plane(comp, ConstructionPlane::XZ).unwrap();
        let sketch = host.add_sketch(comp, plane).unwrap();
        journal.record(Created::Sketch(sketch));
        assert_eq!(journal.len(), 2);

        journal.rollback(&mut host).unwrap();
        assert!(host.is_empty());
        assert_eq!(host.call_count(HostCall::DeleteSketch), 1);
        assert_eq!(host.call_count(HostCall::DeleteComponent), 1);
    }

    #[test]
    fn failed_step_does_not_stop_rollback() {
        let mut host = MemoryHost::new();
        let mut journal = Journal::new();
        let comp = host.add_component().unwrap();
        journal.record(Created::Component(comp));
        let plane = host.construction_plane(comp, ConstructionPlane::XZ).unwrap();
        journal.record(Created::Sketch(host.add_sketch(comp, plane).unwrap()));

        host.inject_failure(HostCall::DeleteSketch, 1);
        let err = journal.rollback(&mut host).unwrap_err();
        assert!(matches!(err, HostError::Injected { .. }));
        assert!(host.is_empty(), "component delete still runs");
    }
}
