//! Input snapshots.

use propgen_extract::DeclarationInput;
use propgen_foundation::Seq;

/// The front end's ordered declaration stream for one pass.
///
/// Order is discovery order; it decides owner and member order in
/// generated text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    inputs: Seq<DeclarationInput>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot with one more declaration appended.
    #[must_use]
    pub fn with(&self, input: DeclarationInput) -> Self {
        Self {
            inputs: self.inputs.push_back(input),
        }
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Returns true if there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Iterates declarations in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &DeclarationInput> {
        self.inputs.iter()
    }
}

impl FromIterator<DeclarationInput> for Snapshot {
    fn from_iter<I: IntoIterator<Item = DeclarationInput>>(iter: I) -> Self {
        Self {
            inputs: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<DeclarationInput>> for Snapshot {
    fn from(inputs: Vec<DeclarationInput>) -> Self {
        Self {
            inputs: inputs.into(),
        }
    }
}
