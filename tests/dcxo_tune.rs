// CLASSIFICATION: COMMUNITY
// Filename: dcxo_tune.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19
#![cfg(feature = "dcxo-tune")]

use std::sync::{Arc, Mutex};
use std::thread;

use mifmbox::{ApmOp, DcxoTune, MboxError, SimTuneRegister, TransportError, TuneTransport};

/// Records every request before delegating to a simulated register.
struct Recording {
    inner: SimTuneRegister,
    log: Mutex<Vec<(u32, u32)>>,
}

impl TuneTransport for Recording {
    fn apm_request(&self, op: ApmOp, value: u32) -> Result<u32, TransportError> {
        self.log.lock().unwrap().push((op.code(), value));
        self.inner.apm_request(op, value)
    }
}

#[test]
fn set_then_get_round_trips_through_apm() {
    let transport = Arc::new(Recording {
        inner: SimTuneRegister::new(0x20),
        log: Mutex::new(Vec::new()),
    });
    let tune = DcxoTune::new(transport.clone());
    assert_eq!(tune.cached().unwrap(), None);
    assert_eq!(tune.get().unwrap(), 0x20);
    tune.set(0x3A).unwrap();
    assert_eq!(tune.cached().unwrap(), Some(0x3A));
    assert_eq!(tune.get().unwrap(), 0x3A);

    let log = transport.log.lock().unwrap();
    assert_eq!(*log, vec![(0x4, 0), (0x5, 0x3A), (0x4, 0)]);
}

#[test]
fn transport_failure_is_surfaced() {
    let tune = DcxoTune::new(Arc::new(SimTuneRegister::offline()));
    assert_eq!(
        tune.set(1),
        Err(MboxError::Transport(TransportError::Unavailable))
    );
    assert_eq!(
        tune.get(),
        Err(MboxError::Transport(TransportError::Unavailable))
    );
    assert_eq!(tune.cached().unwrap(), None);
}

#[test]
fn concurrent_sets_leave_a_written_value() {
    let tune = Arc::new(DcxoTune::new(Arc::new(SimTuneRegister::new(0))));
    let workers: Vec<_> = (1..=8u32)
        .map(|v| {
            let tune = Arc::clone(&tune);
            thread::spawn(move || tune.set(v).unwrap())
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }
    let value = tune.get().unwrap();
    assert!((1..=8).contains(&value));
    assert_eq!(tune.cached().unwrap(), Some(value));
}
