pub mod speech;
pub mod toast;

pub use speech::SpeechRequest;
pub use toast::{Toast, ToastId, ToastQueue};
