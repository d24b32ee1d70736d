use crate::generator::Generator;
use codemint_core::{Code, CodeError, CODE_ALPHABET, MAX_LENGTH, MIN_LENGTH};
use rand::Rng;

/// A generator drawing uniformly random symbols from the code alphabet.
///
/// Uses the thread-local RNG; two calls with the same length produce the same
/// code only by chance. This is not a cryptographic token generator and the
/// output must not be treated as unguessable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    /// Creates a new random generator.
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self, length: usize) -> Result<Code, CodeError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(CodeError::InvalidLength {
                min: MIN_LENGTH,
                max: MAX_LENGTH,
                got: length,
            });
        }

        let mut rng = rand::rng();
        let code: String = (0..length)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();

        Ok(Code::new_unchecked(code))
    }
}
