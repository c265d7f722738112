pub mod double_tap;
pub mod gesture;
pub mod session;

pub use double_tap::DoubleTap;
pub use gesture::GestureTracker;
pub use session::Session;
