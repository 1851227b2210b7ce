pub mod auth;

pub mod professors;

pub mod evaluations;

pub mod videos;

pub mod documents;

pub mod chatbot;

pub mod suggestions;

pub mod system;

pub use auth::configure_auth_routes;
pub use chatbot::configure_chatbot_routes;
pub use documents::configure_document_routes;
pub use evaluations::configure_evaluation_routes;
pub use professors::configure_professor_routes;
pub use suggestions::configure_suggestion_routes;
pub use system::configure_system_routes;
pub use videos::configure_video_routes;
