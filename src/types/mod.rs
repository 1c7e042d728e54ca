pub mod futures;
pub mod market;
pub mod recommendation;
pub mod risk;
pub mod sentiment;

pub use futures::*;
pub use market::*;
pub use recommendation::*;
pub use risk::*;
pub use sentiment::*;
