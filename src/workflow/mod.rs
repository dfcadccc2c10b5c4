pub mod editor_session;
pub mod exam_ctx;
pub mod publish_flow;

pub use editor_session::EditorSession;
pub use exam_ctx::ExamCtx;
pub use publish_flow::{PublishFlow, PublishOutcome};
