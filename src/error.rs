use parse_display::Display;

/// Error returned by operations that reject their arguments.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum CollectionError {
    #[display("element is not in the collection")]
    NotFound,
    #[display("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[display("listener is not registered")]
    UnknownListener,
}

impl std::error::Error for CollectionError {}
