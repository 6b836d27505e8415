//! Services module
//!
//! Business logic services that coordinate between embedders and the
//! repository.

pub mod assistant;
pub mod attachments;
pub mod folders;
pub mod notes;

pub use assistant::{AiResponder, ChatMessage, ChatSession, MockResponder};
pub use attachments::AttachmentsService;
pub use folders::FoldersService;
pub use notes::NotesService;
