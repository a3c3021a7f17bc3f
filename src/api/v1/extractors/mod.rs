mod auth_ctx;
mod course_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use course_id::CourseId;
