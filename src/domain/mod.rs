pub mod request;
pub mod result;

pub use request::ResolutionRequest;
pub use result::{Resolution, ResolutionResult, TitleSource};
