pub mod compose;
pub mod drive;
pub mod error;
pub mod extract;
pub mod format;
pub mod staging;

pub use compose::{compose, ComposedDocument, RawFile};
pub use drive::{AcquiredDocument, DriveAcquirer};
pub use error::IngestError;
pub use extract::extract_text;
pub use format::RecognizedFormat;
pub use staging::StagedFile;
