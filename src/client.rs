//! Client for the RAG chat backend.
//!
//! Keep the public surface small: one [`RagClient`] with one method per
//! backend operation. Implementation details are split into submodules under
//! `src/client/`.

pub mod builder;
pub mod chat;
pub mod content;
pub mod core;
pub mod history;
pub mod stream;

pub use builder::RagClientBuilder;
pub use chat::ChatReply;
pub use content::UploadFile;
pub use core::RagClient;
pub use stream::ChatStream;
