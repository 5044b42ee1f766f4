pub mod favorites;
pub mod scholarship;
pub mod session;
pub mod user;

pub use favorites::*;
pub use scholarship::*;
pub use session::*;
pub use user::*;
