//! Work posted to run once on a later event-loop iteration.

/// A single queued task run against `T`. No cancellation, no retry.
pub struct Deferred<T> {
    task: Option<Box<dyn FnOnce(&mut T)>>,
}

impl<T> Deferred<T> {
    pub fn post(task: impl FnOnce(&mut T) + 'static) -> Self {
        Self {
            task: Some(Box::new(task)),
        }
    }

    pub fn empty() -> Self {
        Self { task: None }
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Remove the task so the caller can run it with `&mut T`.
    pub fn take(&mut self) -> Option<Box<dyn FnOnce(&mut T)>> {
        self.task.take()
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> std::fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("pending", &self.is_pending())
            .finish()
    }
}
