/// Errors surfaced to the host. Construction errors are fatal to the call
/// that raised them and leave existing state untouched; lookup misses are
/// reported here only when the host asked for something by value (a kill of
/// an unknown sound id is a logged no-op instead, see `SoundField`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A staged speaker links to an index absent from the staged set.
    DanglingLink { from: u32, to: u32 },
    /// A raw coordinate list did not hold exactly three values.
    InvalidDimension { got: usize },
    /// A sound with this id is already live.
    DuplicateId(String),
    /// No speaker with this index exists in the graph.
    UnknownSpeaker(u32),
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::DanglingLink { from, to } => {
                write!(f, "speaker {from} links to nonexistent speaker {to}")
            }
            FieldError::InvalidDimension { got } => {
                write!(f, "expected 3 coordinates, got {got}")
            }
            FieldError::DuplicateId(id) => {
                write!(f, "sound id {id:?} is already live")
            }
            FieldError::UnknownSpeaker(index) => {
                write!(f, "no speaker with index {index}")
            }
        }
    }
}

impl std::error::Error for FieldError {}
