use std::sync::{Arc, Mutex, MutexGuard};

use errors::*;
use grid::MazeGrid;
use session::{GenerationSession, SessionState};

/// A session that several threads can drive and observe, e.g. a generation thread stepping
/// while a render thread takes snapshots.
///
/// Each step takes the lock for exactly one step, so readers are never starved by a long
/// run. A panic while the lock is held does not poison the session for other handles.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<GenerationSession>>,
}

impl SharedSession {
    pub fn new(session: GenerationSession) -> SharedSession {
        SharedSession { inner: Arc::new(Mutex::new(session)) }
    }

    pub fn advance_one(&self) -> Result<bool> {
        self.lock().advance_one()
    }

    /// Same contract as `GenerationSession::run_to_completion`, releasing the lock between
    /// steps.
    pub fn run_to_completion(&self) -> Result<usize> {
        let budget = self.lock().step_budget();
        loop {
            let mut session = self.lock();
            if session.advance_one()? {
                return Ok(session.steps_taken());
            }
            if session.steps_taken() > budget {
                bail!(ErrorKind::AlgorithmDivergence(session.steps_taken(), budget));
            }
        }
    }

    /// A copy of the grid as of the last completed step.
    pub fn snapshot(&self) -> MazeGrid {
        self.lock().snapshot().clone()
    }

    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    pub fn rerun(&self) -> Result<()> {
        self.lock().rerun()
    }

    pub fn reset(&self) {
        self.lock().reset()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<F, R>(&self, f: F) -> R
        where F: FnOnce(&mut GenerationSession) -> R
    {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<GenerationSession> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("recovering a session lock poisoned by a panicked holder");
                poisoned.into_inner()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use cells::CellPosition;
    use pathing;
    use units::{Height, Width};

    fn shared(seed: u64) -> SharedSession {
        let session = GenerationSession::builder(Width(25), Height(25))
            .start_at(CellPosition::new(1, 1))
            .seed(seed)
            .build()
            .unwrap();
        SharedSession::new(session)
    }

    #[test]
    fn steps_from_another_thread() {
        let session = shared(9);
        let worker = session.clone();
        let handle = thread::spawn(move || worker.run_to_completion());

        let mut last_count = 0;
        while session.state() != SessionState::Complete {
            let count = session.snapshot().path_count();
            assert!(count >= last_count);
            last_count = count;
            thread::yield_now();
        }

        let steps = handle.join().unwrap().unwrap();
        assert_eq!(steps, 12 * 12 - 1);
        assert_eq!(pathing::path_components(&session.snapshot()), 1);
    }

    #[test]
    fn matches_an_unshared_run() {
        let session = shared(21);
        let _ = session.run_to_completion().unwrap();

        let mut plain = GenerationSession::builder(Width(25), Height(25))
            .start_at(CellPosition::new(1, 1))
            .seed(21)
            .build()
            .unwrap();
        let _ = plain.run_to_completion().unwrap();
        assert_eq!(session.snapshot(), *plain.snapshot());
    }

    #[test]
    fn survives_a_panicking_holder() {
        let session = shared(3);
        let poisoner = session.clone();
        let result = thread::spawn(move || {
                poisoner.with(|_| panic!("holder panicked"));
            })
            .join();
        assert!(result.is_err());

        assert!(!session.advance_one().unwrap());
        session.reset();
        assert_eq!(session.state(), SessionState::Uninitialized);
    }
}
