//! Contact form submission lifecycle.
//!
//! A form instance moves Idle -> Sending -> Success or Error. Success shows
//! a confirmation for a fixed delay, then closes the modal and resets the
//! form; Error shows an inline failure for a fixed delay, then reverts to
//! Idle so the visitor can resubmit. Each state arms at most one timer, and
//! any transition out of a state aborts the timer that state armed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::notifier::{Acknowledgment, Notifier, NotifyError, SupportInquiry};

/// How long the confirmation stays visible before the modal closes.
pub const SUCCESS_DISPLAY_DELAY: Duration = Duration::from_secs(3);

/// How long the inline failure stays visible before reverting to Idle.
pub const ERROR_RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

/// The form fields owned by one modal instance. `phone` and `message` may
/// stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl FormInput {
    /// Mirror of the browser-native `required` checks on name and email.
    /// No further validation happens here.
    pub fn has_required_fields(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

/// Runs the ordered notification pair for one submission.
///
/// The acknowledgment is only attempted once the support inquiry has been
/// delivered. There is no rollback: if the second call fails, the first
/// stays delivered and the caller sees the same single error.
pub async fn deliver(notifier: &dyn Notifier, form: &FormInput) -> Result<(), NotifyError> {
    notifier
        .notify_support(&SupportInquiry {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            message: form.message.clone(),
        })
        .await?;

    notifier
        .notify_submitter(&Acknowledgment {
            name: form.name.clone(),
            email: form.email.clone(),
        })
        .await?;

    Ok(())
}

struct Inner {
    status: SubmissionStatus,
    entered_at: Instant,
    /// Bumped on every transition; a timer or an in-flight delivery only
    /// applies its outcome if the epoch it captured is still current.
    epoch: u64,
    form: FormInput,
    open: bool,
    timer: Option<JoinHandle<()>>,
    tx: watch::Sender<SubmissionStatus>,
    on_close: Arc<dyn Fn() + Send + Sync>,
}

fn transition(inner: &mut Inner, next: SubmissionStatus) {
    if let Some(timer) = inner.timer.take() {
        timer.abort();
    }
    inner.status = next;
    inner.entered_at = Instant::now();
    inner.epoch += 1;
    inner.tx.send_replace(next);
}

/// The contact modal's submission state machine.
///
/// Owned by exactly one view instance; state is discarded on drop, which
/// also aborts any pending timer so nothing mutates a disposed form.
pub struct ContactForm {
    inner: Arc<Mutex<Inner>>,
    notifier: Arc<dyn Notifier>,
}

impl ContactForm {
    /// `on_close` is the host container hook, invoked after a successful
    /// send's display delay or on a direct dismissal.
    pub fn new(notifier: Arc<dyn Notifier>, on_close: impl Fn() + Send + Sync + 'static) -> Self {
        let (tx, _rx) = watch::channel(SubmissionStatus::Idle);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                status: SubmissionStatus::Idle,
                entered_at: Instant::now(),
                epoch: 0,
                form: FormInput::default(),
                open: false,
                timer: None,
                tx,
                on_close: Arc::new(on_close),
            })),
            notifier,
        }
    }

    pub fn open(&self) {
        self.inner.lock().unwrap().open = true;
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().unwrap().open
    }

    pub fn status(&self) -> SubmissionStatus {
        self.inner.lock().unwrap().status
    }

    /// Time spent in the current state.
    pub fn state_age(&self) -> Duration {
        self.inner.lock().unwrap().entered_at.elapsed()
    }

    /// Snapshot of the current form fields.
    pub fn form(&self) -> FormInput {
        self.inner.lock().unwrap().form.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.inner.lock().unwrap().tx.subscribe()
    }

    /// Field mutators return false while Sending: the form is locked for
    /// the duration of the outbound sequence.
    pub fn set_name(&self, value: impl Into<String>) -> bool {
        self.set_field(|form, v| form.name = v, value.into())
    }

    pub fn set_email(&self, value: impl Into<String>) -> bool {
        self.set_field(|form, v| form.email = v, value.into())
    }

    pub fn set_phone(&self, value: impl Into<String>) -> bool {
        self.set_field(|form, v| form.phone = v, value.into())
    }

    pub fn set_message(&self, value: impl Into<String>) -> bool {
        self.set_field(|form, v| form.message = v, value.into())
    }

    fn set_field(&self, apply: impl FnOnce(&mut FormInput, String), value: String) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.status == SubmissionStatus::Sending {
            return false;
        }
        apply(&mut inner.form, value);
        true
    }

    /// Submits the form: Idle -> Sending happens before the first await,
    /// then the ordered notification pair runs to completion. There is no
    /// cancellation path once the sequence has started; an outcome landing
    /// after a dismissal is discarded.
    pub async fn submit(&self) -> SubmissionStatus {
        let (form, sending_epoch) = {
            let mut inner = self.inner.lock().unwrap();
            if !inner.open || inner.status != SubmissionStatus::Idle {
                return inner.status;
            }
            if !inner.form.has_required_fields() {
                return inner.status;
            }
            transition(&mut inner, SubmissionStatus::Sending);
            (inner.form.clone(), inner.epoch)
        };

        let outcome = deliver(self.notifier.as_ref(), &form).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.epoch != sending_epoch || inner.status != SubmissionStatus::Sending {
            // The modal was dismissed mid-flight; the view is gone.
            return inner.status;
        }

        match outcome {
            Ok(()) => {
                transition(&mut inner, SubmissionStatus::Success);
                self.arm_success_close(&mut inner);
            }
            Err(err) => {
                tracing::error!(error = %err, detail = err.detail(), "contact form delivery failed");
                transition(&mut inner, SubmissionStatus::Error);
                self.arm_error_revert(&mut inner);
            }
        }
        inner.status
    }

    /// Direct dismissal by the visitor: closes, resets the fields and
    /// cancels whatever timer the current state armed.
    pub fn dismiss(&self) {
        let hook = {
            let mut inner = self.inner.lock().unwrap();
            if !inner.open {
                return;
            }
            inner.open = false;
            inner.form = FormInput::default();
            transition(&mut inner, SubmissionStatus::Idle);
            Arc::clone(&inner.on_close)
        };
        hook();
    }

    fn arm_success_close(&self, inner: &mut Inner) {
        let state = Arc::clone(&self.inner);
        let armed_epoch = inner.epoch;
        inner.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_DISPLAY_DELAY).await;
            let hook = {
                let mut inner = state.lock().unwrap();
                if inner.epoch != armed_epoch || inner.status != SubmissionStatus::Success {
                    return;
                }
                inner.open = false;
                inner.form = FormInput::default();
                transition(&mut inner, SubmissionStatus::Idle);
                Arc::clone(&inner.on_close)
            };
            hook();
        }));
    }

    fn arm_error_revert(&self, inner: &mut Inner) {
        let state = Arc::clone(&self.inner);
        let armed_epoch = inner.epoch;
        inner.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ERROR_RETRY_DELAY).await;
            let mut inner = state.lock().unwrap();
            if inner.epoch != armed_epoch || inner.status != SubmissionStatus::Error {
                return;
            }
            // Fields are kept so the visitor can resubmit as-is.
            transition(&mut inner, SubmissionStatus::Idle);
        }));
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        if let Some(timer) = self.inner.lock().unwrap().timer.take() {
            timer.abort();
        }
    }
}
