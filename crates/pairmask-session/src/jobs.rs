//! Named worker threads.

use std::thread::{self, JoinHandle};

use crate::{SessionError, SessionResult};

/// Handle to a running worker.
#[derive(Debug)]
pub struct JobHandle<T> {
    name: String,
    handle: JoinHandle<T>,
}

impl<T> JobHandle<T> {
    /// Worker thread name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` once the worker has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker and returns its result.
    pub fn join(self) -> SessionResult<T> {
        self.handle
            .join()
            .map_err(|_| SessionError::WorkerPanicked(self.name))
    }
}

/// Starts `f` on a new thread called `name`.
pub fn spawn<T, F>(name: &str, f: F) -> SessionResult<JobHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let handle = thread::Builder::new().name(name.to_owned()).spawn(f)?;
    Ok(JobHandle {
        name: name.to_owned(),
        handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_returns_value() {
        let job = spawn("adder", || 2 + 2).unwrap();
        assert_eq!(job.name(), "adder");
        assert_eq!(job.join().unwrap(), 4);
    }

    #[test]
    fn test_panic_is_reported() {
        let job = spawn("boom", || -> u8 { panic!("worker failure") }).unwrap();
        match job.join() {
            Err(SessionError::WorkerPanicked(name)) => assert_eq!(name, "boom"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
