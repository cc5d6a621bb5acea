//! Contact form domain: the submission state machine and its outbound
//! notification seam.

mod notifier;
mod submission;

pub use notifier::{Acknowledgment, Notifier, NotifyError, SupportInquiry};
pub use submission::{
    ContactForm, ERROR_RETRY_DELAY, FormInput, SUCCESS_DISPLAY_DELAY, SubmissionStatus, deliver,
};
