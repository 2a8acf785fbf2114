pub mod backend;
pub mod responder;
