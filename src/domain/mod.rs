pub mod reciter;
pub mod selection;
pub mod verse;

pub use reciter::{Reciter, ReciterRegistry, DEFAULT_RECITER_ID};
pub use selection::{InputField, Selection};
pub use verse::{Verse, VerseKey, CHAPTER_COUNT};
