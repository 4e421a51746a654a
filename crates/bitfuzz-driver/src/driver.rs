//! The transmission driver's main loop: pull a candidate, pace, send,
//! terminate.

use bitfuzz_mutate::{Candidate, MutationEngine};

use crate::{
    config::DriverConfig,
    error::{DriverError, Result},
    sender::Sender,
};

/// Drives a [`MutationEngine`] through a [`Sender`] until the engine
/// reports `EndOfAll`, the configured candidate cap is reached, or an
/// unrecoverable error occurs.
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    /// Construct a driver with the given pacing/bound configuration.
    #[must_use]
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Run the fuzz loop to completion.
    ///
    /// ```text
    /// loop:
    ///     p <- engine.get()
    ///     case EndOfStatic: continue           # no send, no sleep
    ///     case EndOfAll:    break               # terminate
    ///     case Bytes(p):    sender.send(p); sleep(interval)
    /// sender.kill()
    /// ```
    ///
    /// `kill` is called exactly once, from this method's single exit
    /// path, regardless of whether the loop ended normally or by error.
    pub fn fuzz<S: Sender>(&self, engine: &mut MutationEngine<'_>, sender: &mut S) -> Result<()> {
        let span = tracing::info_span!("fuzz_run");
        let _enter = span.enter();

        let mut sent: u64 = 0;
        let run = (|| -> Result<()> {
            loop {
                if let Some(limit) = self.config.candidate_limit() {
                    if sent >= limit {
                        break;
                    }
                }

                match engine.get().map_err(DriverError::Mutate)? {
                    Candidate::EndOfStatic => continue,
                    Candidate::EndOfAll => break,
                    Candidate::Bytes(bytes) => {
                        sender.send(&bytes).map_err(|err| DriverError::Send(Box::new(err)))?;
                        sent += 1;
                        tracing::trace!(candidate = sent, "candidate sent");
                        std::thread::sleep(self.config.interval_duration());
                    },
                }
            }
            Ok(())
        })();

        if let Err(err) = sender.kill() {
            tracing::warn!(error = %err, "sender kill failed");
        }
        tracing::info!(sent, "fuzz run complete");
        run
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::time::Duration;

    use bitfuzz_codec::payload::{BitLength, FieldOptions, FieldType, Format, Payload};
    use bitfuzz_mutate::EngineOptions;

    use super::*;

    #[derive(Default)]
    struct MockSender {
        sent: Vec<Vec<u8>>,
        kill_calls: u32,
    }

    impl Sender for MockSender {
        type Error = Infallible;

        fn send(&mut self, data: &[u8]) -> std::result::Result<usize, Self::Error> {
            self.sent.push(data.to_vec());
            Ok(data.len())
        }

        fn kill(&mut self) -> std::result::Result<(), Self::Error> {
            self.kill_calls += 1;
            Ok(())
        }
    }

    fn byte_aligned_payload() -> Payload {
        let mut payload = Payload::new();
        payload.add(
            "ff",
            FieldOptions::new(Format::Hex, FieldType::Static).length(BitLength::Fixed(8)),
        );
        payload
    }

    #[test]
    fn fuzz_calls_kill_exactly_once() {
        let payload = byte_aligned_payload();
        let mut engine = MutationEngine::new(&payload, EngineOptions::new());
        let mut sender = MockSender::default();
        let driver = Driver::new(DriverConfig::new().interval(Duration::ZERO));

        driver.fuzz(&mut engine, &mut sender).unwrap();

        assert_eq!(sender.kill_calls, 1);
    }

    #[test]
    fn fuzz_sends_every_static_candidate_once() {
        let payload = byte_aligned_payload();
        let mut engine = MutationEngine::new(&payload, EngineOptions::new());
        let mut sender = MockSender::default();
        let driver = Driver::new(DriverConfig::new().interval(Duration::ZERO));

        driver.fuzz(&mut engine, &mut sender).unwrap();

        assert_eq!(sender.sent, vec![vec![0xffu8]]);
    }

    #[test]
    fn end_of_static_is_skipped_without_a_send() {
        // A single static field's only candidate is the field itself;
        // after it, EndOfStatic then EndOfAll follow with no further
        // sends in between.
        let payload = byte_aligned_payload();
        let mut engine = MutationEngine::new(&payload, EngineOptions::new());
        let mut sender = MockSender::default();
        let driver = Driver::new(DriverConfig::new().interval(Duration::ZERO));

        driver.fuzz(&mut engine, &mut sender).unwrap();

        assert_eq!(sender.sent.len(), 1);
    }

    #[test]
    fn max_candidates_bounds_the_run() {
        let mut payload = Payload::new();
        payload.add(
            "00",
            FieldOptions::new(Format::Hex, FieldType::Binary).length(BitLength::Fixed(8)),
        );
        let mut engine = MutationEngine::new(&payload, EngineOptions::new());
        let mut sender = MockSender::default();
        let driver =
            Driver::new(DriverConfig::new().interval(Duration::ZERO).max_candidates(3));

        driver.fuzz(&mut engine, &mut sender).unwrap();

        assert_eq!(sender.sent.len(), 3);
        assert_eq!(sender.kill_calls, 1);
    }

    #[test]
    fn random_continuation_runs_until_cap() {
        let mut payload = Payload::new();
        payload.add(
            "ff",
            FieldOptions::new(Format::Hex, FieldType::Binary).length(BitLength::Fixed(8)),
        );
        let mut engine =
            MutationEngine::new(&payload, EngineOptions::new().random(true).seed(5));
        let mut sender = MockSender::default();
        let driver =
            Driver::new(DriverConfig::new().interval(Duration::ZERO).max_candidates(50));

        driver.fuzz(&mut engine, &mut sender).unwrap();

        assert_eq!(sender.sent.len(), 50);
        assert_eq!(sender.kill_calls, 1);
    }
}
