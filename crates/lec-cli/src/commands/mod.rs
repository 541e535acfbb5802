pub mod assessment;
pub mod dispatch;
pub mod insights;
pub mod lesson;
pub mod relay;
pub mod schema;
pub mod topics;
