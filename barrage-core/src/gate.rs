use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Ready/go gate that lines workers up before the measured window opens.
///
/// Workers arrive, then spin (yielding) until the controller releases the
/// gate. The controller releases only after every worker has arrived, so no
/// worker begins counted work before the whole pool is armed. Spinning keeps
/// wake-up skew below what a long-period sleep primitive would add.
#[derive(Debug, Default)]
pub struct StartGate {
    ready: AtomicUsize,
    go: AtomicBool,
}

impl StartGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Worker side: signal ready, then block until the go signal.
    pub fn arrive_and_wait(&self) {
        self.ready.fetch_add(1, Ordering::AcqRel);
        while !self.go.load(Ordering::Acquire) {
            std::hint::spin_loop();
            std::thread::yield_now();
        }
    }

    /// Controller side: block until `workers` workers have arrived.
    pub fn wait_ready(&self, workers: usize) {
        while self.ready.load(Ordering::Acquire) < workers {
            std::thread::yield_now();
        }
    }

    /// Controller side: open the gate for every waiting worker at once.
    /// Must be called after [`StartGate::wait_ready`] returns.
    pub fn release(&self) {
        self.go.store(true, Ordering::Release);
    }

    pub fn ready_count(&self) -> usize {
        self.ready.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn no_worker_passes_the_gate_before_release() {
        let gate = Arc::new(StartGate::new());
        let passed = Arc::new(AtomicUsize::new(0));

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let gate = gate.clone();
                let passed = passed.clone();
                std::thread::spawn(move || {
                    gate.arrive_and_wait();
                    passed.fetch_add(1, Ordering::AcqRel);
                })
            })
            .collect();

        gate.wait_ready(4);
        assert_eq!(gate.ready_count(), 4);

        // All workers are armed but the gate is still closed.
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(passed.load(Ordering::Acquire), 0);

        gate.release();
        for worker in workers {
            if worker.join().is_err() {
                panic!("gate worker panicked");
            }
        }
        assert_eq!(passed.load(Ordering::Acquire), 4);
    }
}
