//! Payload schema: an ordered, append-only sequence of bit-field
//! descriptors with attribute accessors and hash-based field identity.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::{
    encoding,
    error::{CodecError, Result},
};

/// Source encoding a field's `data` is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Already a `'0'`/`'1'` bit-string.
    Bin,
    /// Hexadecimal literal.
    Hex,
    /// Decimal literal.
    Dec,
    /// Octal literal.
    Oct,
    /// ASCII/Latin-1 string, one byte per character.
    Str,
    /// Raw bytes, expressed as a hex-encoded string for schema portability.
    Bytes,
}

/// Mutation family applied to a fuzzable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Bit-level mutations: flips, shifts, endian swap, known-bad patterns.
    Binary,
    /// Reserved: integer-aware mutations (boundary values, overflow probes).
    Numeric,
    /// Reserved: string-aware mutations (format strings, encoding edge cases).
    String,
    /// Reserved: delimiter/separator variation.
    Delimiter,
    /// Never mutated; always fuzzable = false unless explicitly overridden.
    Static,
}

/// A field's declared bit-width: either fixed, or variable (no alignment
/// performed, no contribution to `Payload::payload_length`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitLength {
    /// Exactly the wrapped number of bits wide.
    Fixed(usize),
    /// Unconstrained width; the field is excluded from alignment checks.
    Variable,
}

/// Options accepted by [`Payload::add`]. Construct with [`FieldOptions::new`]
/// and adjust with the builder methods; `format` and `type` are mandatory
/// constructor arguments rather than optional map keys, which removes the
/// "missing FORMAT/TYPE" schema error entirely: the invalid state is
/// unrepresentable.
#[derive(Debug, Clone)]
pub struct FieldOptions {
    format: Format,
    field_type: FieldType,
    length: Option<BitLength>,
    group: bool,
    fuzzable: Option<bool>,
    seed: Option<u64>,
}

impl FieldOptions {
    /// Start building options for a field of the given format and mutation
    /// type.
    #[must_use]
    pub fn new(format: Format, field_type: FieldType) -> Self {
        Self { format, field_type, length: None, group: false, fuzzable: None, seed: None }
    }

    /// Override the default length (data's natural length in its source
    /// format) with an explicit bit-width.
    #[must_use]
    pub fn length(mut self, length: BitLength) -> Self {
        self.length = Some(length);
        self
    }

    /// Mark `data` as a comma-separated group of candidate values, one of
    /// which is chosen per mutation.
    #[must_use]
    pub fn group(mut self, group: bool) -> Self {
        self.group = group;
        self
    }

    /// Override the default fuzzability (`true` unless `field_type ==
    /// Static`).
    #[must_use]
    pub fn fuzzable(mut self, fuzzable: bool) -> Self {
        self.fuzzable = Some(fuzzable);
        self
    }

    /// Seed the field's identity-hash tail for reproducible test fixtures.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// An immutable bit-field descriptor, as inserted into a [`Payload`].
#[derive(Debug, Clone)]
pub struct BitField {
    data: String,
    format: Format,
    field_type: FieldType,
    length: BitLength,
    group: bool,
    fuzzable: bool,
    hash: String,
}

impl BitField {
    /// The field's value in its declared source format.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The field's source format.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// The field's mutation family.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The field's declared bit-width.
    #[must_use]
    pub fn length(&self) -> BitLength {
        self.length
    }

    /// Whether `data` is a comma-list of one-of candidate values.
    #[must_use]
    pub fn group(&self) -> bool {
        self.group
    }

    /// Whether the mutation engine should mutate this field.
    #[must_use]
    pub fn fuzzable(&self) -> bool {
        self.fuzzable
    }

    /// The field's stable 64-hex-character identity hash.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Decode `data` under `format` into the canonical bit-string, checking
    /// it against the declared fixed width if one was given.
    ///
    /// A decoded value wider than a declared fixed width is a
    /// [`CodecError::SchemaError`]: the source data does not fit the field
    /// the schema author promised.
    pub fn canonical_bits(&self) -> Result<String> {
        let width = match self.length {
            BitLength::Fixed(n) => n,
            BitLength::Variable => 0,
        };
        let bits = match self.format {
            Format::Bin => encoding::pad_left(&self.data, width),
            Format::Hex => encoding::hex_to_bin(&self.data, width)?,
            Format::Dec => encoding::dec_to_bin(&self.data, width)?,
            Format::Oct => encoding::oct_to_bin(&self.data, width)?,
            Format::Str => encoding::str_to_bin(&self.data, width),
            Format::Bytes => {
                let raw = encoding::bin_to_bytes(&encoding::hex_to_bin(&self.data, 0)?)?;
                encoding::bytes_to_bin(&raw, width)
            },
        };

        if let BitLength::Fixed(n) = self.length {
            if bits.len() != n {
                return Err(CodecError::SchemaError {
                    field: 0,
                    reason: format!(
                        "decoded value is {} bits wide, exceeding declared length {n}",
                        bits.len()
                    ),
                });
            }
        }
        Ok(bits)
    }
}

/// Ordered, append-only sequence of bit-field descriptors.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    fields: Vec<BitField>,
}

impl Payload {
    /// Create an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field descriptor, applying the defaulting rules from the
    /// schema spec (length defaults to `data`'s natural length, `fuzzable`
    /// defaults to `field_type != Static`), and assigning a fresh identity
    /// hash. Returns the new field's index.
    pub fn add(&mut self, data: impl Into<String>, options: FieldOptions) -> usize {
        let data = data.into();
        let length = options.length.unwrap_or(BitLength::Fixed(data.len()));
        let fuzzable =
            options.fuzzable.unwrap_or_else(|| !matches!(options.field_type, FieldType::Static));
        let hash = gen_bitfield_hash(&data, options.seed);

        self.fields.push(BitField {
            data,
            format: options.format,
            field_type: options.field_type,
            length,
            group: options.group,
            fuzzable,
            hash,
        });
        self.fields.len() - 1
    }

    /// Number of fields in the payload.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Access a field by index.
    pub fn bitfield(&self, index: usize) -> Result<&BitField> {
        self.fields.get(index).ok_or(CodecError::IndexOutOfRange {
            index,
            field_count: self.fields.len(),
        })
    }

    /// Sum of declared fixed lengths across all fields (variable-length
    /// fields do not contribute).
    #[must_use]
    pub fn payload_length(&self) -> usize {
        self.fields
            .iter()
            .map(|f| match f.length {
                BitLength::Fixed(n) => n,
                BitLength::Variable => 0,
            })
            .sum()
    }

    /// Iterate over the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &BitField> {
        self.fields.iter()
    }

    /// Decode the field at `index` into its canonical bit-string, with any
    /// [`CodecError::SchemaError`] carrying the real field index rather
    /// than the placeholder `0` [`BitField::canonical_bits`] uses when
    /// called directly.
    pub fn canonical_bits(&self, index: usize) -> Result<String> {
        let field = self.bitfield(index)?;
        field.canonical_bits().map_err(|err| match err {
            CodecError::SchemaError { reason, .. } => CodecError::SchemaError { field: index, reason },
            other => other,
        })
    }
}

/// Generate a field's identity hash: SHA-256 of `data` concatenated with 128
/// random ASCII alphanumeric characters.
///
/// Each call owns a freshly constructed RNG scoped to that call: a seeded
/// call gets a deterministic [`ChaCha8Rng`], an unseeded call draws from the
/// process-wide thread RNG. Neither path mutates shared global state, so an
/// earlier seeded call can never leak determinism into a later unseeded one.
fn gen_bitfield_hash(data: &str, seed: Option<u64>) -> String {
    const TAIL_LEN: usize = 128;
    const ALPHANUMERIC: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let tail: String = match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..TAIL_LEN).map(|_| ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())] as char).collect()
        },
        None => {
            let mut rng = rand::thread_rng();
            (0..TAIL_LEN).map(|_| ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())] as char).collect()
        },
    };

    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hasher.update(tail.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_defaults_length_to_data_width() {
        let mut payload = Payload::new();
        payload.add("1010", FieldOptions::new(Format::Bin, FieldType::Binary));
        assert_eq!(payload.bitfield(0).unwrap().length(), BitLength::Fixed(4));
    }

    #[test]
    fn static_fields_default_to_not_fuzzable() {
        let mut payload = Payload::new();
        payload.add("ff", FieldOptions::new(Format::Hex, FieldType::Static));
        assert!(!payload.bitfield(0).unwrap().fuzzable());
    }

    #[test]
    fn non_static_fields_default_to_fuzzable() {
        let mut payload = Payload::new();
        payload.add("1010", FieldOptions::new(Format::Bin, FieldType::Binary));
        assert!(payload.bitfield(0).unwrap().fuzzable());
    }

    #[test]
    fn hash_is_64_hex_chars() {
        let mut payload = Payload::new();
        payload.add("1010", FieldOptions::new(Format::Bin, FieldType::Binary).seed(1));
        let hash = payload.bitfield(0).unwrap().hash();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn seeded_hash_is_deterministic() {
        let data = "cafebabe";
        let a = gen_bitfield_hash(data, Some(42));
        let b = gen_bitfield_hash(data, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_index_errors() {
        let payload = Payload::new();
        assert!(matches!(
            payload.bitfield(0),
            Err(CodecError::IndexOutOfRange { index: 0, field_count: 0 })
        ));
    }

    #[test]
    fn payload_length_sums_fixed_fields_only() {
        let mut payload = Payload::new();
        payload.add(
            "1010",
            FieldOptions::new(Format::Bin, FieldType::Binary).length(BitLength::Fixed(4)),
        );
        payload.add(
            "hello",
            FieldOptions::new(Format::Str, FieldType::String).length(BitLength::Variable),
        );
        payload.add(
            "ff",
            FieldOptions::new(Format::Hex, FieldType::Static).length(BitLength::Fixed(8)),
        );
        assert_eq!(payload.payload_length(), 12);
    }

    #[test]
    fn canonical_bits_matches_declared_width() {
        let mut payload = Payload::new();
        payload.add(
            "ff",
            FieldOptions::new(Format::Hex, FieldType::Binary).length(BitLength::Fixed(8)),
        );
        assert_eq!(payload.bitfield(0).unwrap().canonical_bits().unwrap(), "11111111");
    }

    #[test]
    fn canonical_bits_rejects_oversized_decode() {
        let mut payload = Payload::new();
        payload.add(
            "ff",
            FieldOptions::new(Format::Hex, FieldType::Binary).length(BitLength::Fixed(4)),
        );
        assert!(matches!(
            payload.bitfield(0).unwrap().canonical_bits(),
            Err(CodecError::SchemaError { .. })
        ));
    }
}
