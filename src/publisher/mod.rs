pub mod wordpress;

pub use wordpress::WordPressPublisher;
