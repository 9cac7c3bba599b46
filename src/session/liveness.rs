use tokio::task::{AbortHandle, JoinHandle};

/// Handle of the periodic token-freshness task. The task stops when the
/// handle is cancelled or dropped; there is no implicit teardown to rely
/// on.
pub struct LivenessHandle {
    handle: AbortHandle,
}

impl LivenessHandle {
    pub(super) fn new(task: &JoinHandle<()>) -> LivenessHandle {
        LivenessHandle {
            handle: task.abort_handle(),
        }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for LivenessHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
