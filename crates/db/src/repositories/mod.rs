pub mod conversation_repo;

pub use conversation_repo::ConversationRepo;
