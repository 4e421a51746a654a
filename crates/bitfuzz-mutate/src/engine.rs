//! Mutation engine: per-field mutation, lazy Cartesian-product enumeration,
//! and unbounded random continuation, exposed to a driver through a single
//! pull method returning a sum-typed [`Candidate`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use bitfuzz_codec::{encoding, payload::FieldType, CodecError, Payload};

use crate::{
    binary,
    error::{MutateError, Result},
    random,
};

/// Options accepted by [`MutationEngine::new`]. Defaults match the schema:
/// `STATIC` enabled, `RANDOM` disabled, no seed (non-deterministic random
/// continuation).
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOptions {
    static_phase: bool,
    random: bool,
    seed: Option<u64>,
}

impl EngineOptions {
    /// Default options: static phase only.
    #[must_use]
    pub fn new() -> Self {
        Self { static_phase: true, random: false, seed: None }
    }

    /// Enable or disable the deterministic static (known-bad) phase.
    #[must_use]
    pub fn static_phase(mut self, enabled: bool) -> Self {
        self.static_phase = enabled;
        self
    }

    /// Enable or disable the random-continuation phase after static
    /// enumeration exhausts.
    #[must_use]
    pub fn random(mut self, enabled: bool) -> Self {
        self.random = enabled;
        self
    }

    /// Seed the random-continuation phase for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One pull result from [`MutationEngine::get`]: an assembled candidate, or
/// one of the two phase-transition sentinels. A genuine sum type in place
/// of mixing byte-strings and marker constants in one return channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A fully assembled, byte-packed payload candidate.
    Bytes(Vec<u8>),
    /// The static phase has just exhausted. Returned exactly once. The
    /// driver should treat this as "continue but skip this cycle" — no
    /// send, no sleep.
    EndOfStatic,
    /// Every phase is exhausted (or the engine was cancelled externally).
    /// Returned exactly once, as the engine's final candidate.
    EndOfAll,
}

#[derive(Debug, Clone)]
enum StaticState {
    Ready(Vec<usize>),
    Exhausted,
}

/// Orchestrates field conversion, per-field mutation, Cartesian-product
/// enumeration of the static corpus, and random continuation.
///
/// Borrows the [`Payload`] it was constructed from; it never mutates it.
/// All other state — per-field mutation sets, the odometer over them, the
/// owned RNG for the random phase — lives on the engine itself.
pub struct MutationEngine<'a> {
    payload: &'a Payload,
    field_sets: Vec<Vec<String>>,
    static_state: StaticState,
    random_enabled: bool,
    end_of_static_emitted: bool,
    end_of_all_emitted: bool,
    cancelled: bool,
    rng: ChaCha8Rng,
    candidate_ordinal: u64,
}

impl<'a> MutationEngine<'a> {
    /// Decode every field to its canonical bit-string (phase 1) and build
    /// its per-field mutation set (phase 2). A field that fails to decode
    /// is logged and degraded to an identity-only set of the empty string,
    /// rather than aborting construction for the whole payload.
    pub fn new(payload: &'a Payload, options: EngineOptions) -> Self {
        let mut field_sets = Vec::with_capacity(payload.field_count());
        for (index, field) in payload.fields().enumerate() {
            let canonical = match payload.canonical_bits(index) {
                Ok(bits) => bits,
                Err(err) => {
                    tracing::warn!(field = index, %err, "field failed to decode; degrading to identity-only");
                    String::new()
                },
            };

            let set = if !field.fuzzable() {
                vec![canonical]
            } else {
                match field.field_type() {
                    FieldType::Binary => binary::binary(&canonical, canonical.len()),
                    FieldType::Numeric | FieldType::String | FieldType::Delimiter | FieldType::Static => {
                        vec![canonical]
                    },
                }
            };
            field_sets.push(set);
        }

        let indices = vec![0; field_sets.len()];
        let rng_seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());

        Self {
            payload,
            field_sets,
            static_state: if options.static_phase { StaticState::Ready(indices) } else { StaticState::Exhausted },
            random_enabled: options.random,
            end_of_static_emitted: !options.static_phase,
            end_of_all_emitted: false,
            cancelled: false,
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
            candidate_ordinal: 0,
        }
    }

    /// Number of fields in the underlying payload.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.payload.field_count()
    }

    /// External cancellation: the next call to [`MutationEngine::get`]
    /// returns `EndOfAll` regardless of how much of the random phase is
    /// left (there is no "how much" — the phase is unbounded).
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Pull the next candidate. Returns assembled bytes, a phase-transition
    /// sentinel, or an error for a failure the engine cannot route around
    /// (anything other than a per-candidate alignment skip).
    pub fn get(&mut self) -> Result<Candidate> {
        loop {
            let combo = match &self.static_state {
                StaticState::Ready(indices) => indices.clone(),
                StaticState::Exhausted => break,
            };
            self.candidate_ordinal += 1;
            let ordinal = self.candidate_ordinal;
            self.advance_static();

            match self.assemble(&combo) {
                Ok(bytes) => return Ok(Candidate::Bytes(bytes)),
                Err(MutateError::Codec(CodecError::Unaligned { bits })) => {
                    tracing::debug!(candidate = ordinal, bits, "skipping unaligned static candidate");
                    continue;
                },
                Err(other) => return Err(other),
            }
        }

        if !self.end_of_static_emitted {
            self.end_of_static_emitted = true;
            tracing::debug!("static phase exhausted");
            return Ok(Candidate::EndOfStatic);
        }

        if self.cancelled || !self.random_enabled {
            if !self.end_of_all_emitted {
                self.end_of_all_emitted = true;
                tracing::debug!("mutation engine exhausted");
            }
            return Ok(Candidate::EndOfAll);
        }

        loop {
            self.candidate_ordinal += 1;
            let ordinal = self.candidate_ordinal;
            match self.random_candidate() {
                Ok(bytes) => {
                    tracing::trace!(candidate = ordinal, "random candidate drawn");
                    return Ok(Candidate::Bytes(bytes));
                },
                Err(MutateError::Codec(CodecError::Unaligned { bits })) => {
                    tracing::debug!(candidate = ordinal, bits, "skipping unaligned random candidate");
                    continue;
                },
                Err(other) => return Err(other),
            }
        }
    }

    /// Odometer-style advance over the per-field mutation sets, field 0
    /// outermost (slowest-changing), the last field innermost (fastest).
    /// Transitions to `Exhausted` once every combination has been handed
    /// out via [`MutationEngine::get`].
    fn advance_static(&mut self) {
        let StaticState::Ready(indices) = &mut self.static_state else { return };
        for i in (0..indices.len()).rev() {
            indices[i] += 1;
            if indices[i] < self.field_sets[i].len() {
                return;
            }
            indices[i] = 0;
        }
        self.static_state = StaticState::Exhausted;
    }

    fn assemble(&self, combo: &[usize]) -> Result<Vec<u8>> {
        let mut bits = String::new();
        for (field_index, &mutation_index) in combo.iter().enumerate() {
            bits.push_str(&self.field_sets[field_index][mutation_index]);
        }
        Ok(encoding::bin_to_bytes(&bits)?)
    }

    fn random_candidate(&mut self) -> Result<Vec<u8>> {
        let mut bits = String::new();
        for (index, field) in self.payload.fields().enumerate() {
            let identity = self.field_sets[index].first().map_or("", String::as_str);
            if field.fuzzable() {
                bits.push_str(&random::fill_bits(&mut self.rng, identity.len()));
            } else {
                bits.push_str(identity);
            }
        }
        Ok(encoding::bin_to_bytes(&bits)?)
    }
}
