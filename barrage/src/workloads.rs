use std::time::Duration;

use barrage_core::{Outcome, Param, UnitError, UnitFactory, WorkUnit, Workload};

pub(crate) const BUILTIN_NAMES: &[&str] = &["noop", "spin", "sleep"];

/// Build a workload for one of the built-in synthetic units. The payload
/// size travels as a display parameter and is read back in `init`, the same
/// path an external collaborator would use.
pub(crate) fn builtin(name: &str, times: u64, payload: u64) -> Option<Workload> {
    let factory: Box<dyn UnitFactory> = match name {
        "noop" => Box::new(NoopFactory::default()),
        "spin" => Box::new(SpinFactory::default()),
        "sleep" => Box::new(SleepFactory::default()),
        _ => return None,
    };

    Some(Workload::new(
        name,
        vec![Param::numeric("payload", payload)],
        times,
        factory,
    ))
}

fn payload_param(params: &[Param]) -> Result<u64, UnitError> {
    params
        .iter()
        .find(|p| p.name == "payload")
        .map(|p| p.value)
        .ok_or_else(|| "missing `payload` parameter".into())
}

/// Immediate success. Measures the harness floor: gate release, loop, and
/// tally overhead with a zero-cost unit.
#[derive(Default)]
struct NoopFactory {
    payload: u64,
}

impl UnitFactory for NoopFactory {
    fn init(&mut self, params: &[Param]) -> Result<(), UnitError> {
        self.payload = payload_param(params)?;
        Ok(())
    }

    fn unit(&self) -> Box<dyn WorkUnit> {
        let payload = self.payload;
        Box::new(move || Outcome::success(payload, payload))
    }
}

/// Short CPU burn proportional to the payload size.
#[derive(Default)]
struct SpinFactory {
    payload: u64,
}

struct SpinUnit {
    buffer: Vec<u8>,
}

impl WorkUnit for SpinUnit {
    fn execute(&mut self) -> Outcome {
        let mut checksum = 0u64;
        for &byte in &self.buffer {
            checksum = checksum.wrapping_mul(31).wrapping_add(byte as u64);
        }
        std::hint::black_box(checksum);

        let bytes = self.buffer.len() as u64;
        Outcome::success(bytes, bytes)
    }
}

impl UnitFactory for SpinFactory {
    fn init(&mut self, params: &[Param]) -> Result<(), UnitError> {
        self.payload = payload_param(params)?;
        Ok(())
    }

    fn unit(&self) -> Box<dyn WorkUnit> {
        let len = self.payload.min(usize::MAX as u64) as usize;
        Box::new(SpinUnit {
            buffer: (0..len).map(|i| i as u8).collect(),
        })
    }
}

/// Fixed short sleep, standing in for the latency of a remote call. The
/// blocking is intentionally inside the measured window.
#[derive(Default)]
struct SleepFactory {
    payload: u64,
}

impl UnitFactory for SleepFactory {
    fn init(&mut self, params: &[Param]) -> Result<(), UnitError> {
        self.payload = payload_param(params)?;
        Ok(())
    }

    fn unit(&self) -> Box<dyn WorkUnit> {
        let payload = self.payload;
        Box::new(move || {
            std::thread::sleep(Duration::from_micros(100));
            Outcome::success(payload, payload)
        })
    }
}
