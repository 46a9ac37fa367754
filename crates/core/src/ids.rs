//! Identifier and class-code generation.

use rand::Rng;
use uuid::Uuid;

/// Alphabet for class join codes. No `I`, `O`, `0` or `1`.
pub const CLASS_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of a class join code.
pub const CLASS_CODE_LEN: usize = 6;

/// Source of entity identifiers and candidate class codes.
///
/// `new_class_code` only proposes a code; checking it against existing
/// classes is the caller's job.
pub trait IdSource: Send + Sync {
    fn new_id(&self) -> String;
    fn new_class_code(&self) -> String;
}

/// UUID v4 ids and `rand`-drawn class codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn new_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn new_class_code(&self) -> String {
        let mut rng = rand::rng();
        (0..CLASS_CODE_LEN)
            .map(|_| {
                let idx = rng.random_range(0..CLASS_CODE_ALPHABET.len());
                CLASS_CODE_ALPHABET[idx] as char
            })
            .collect()
    }
}
