//! Hero carousel: the static slide set and the rotation timer.
//!
//! The timer advances the selection every [`ROTATION_PERIOD`] and is
//! re-armed on every index change, so a manual selection always buys a
//! full period before the next automatic advance.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use strum::Display;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Fixed rotation period. Not configurable; pure UX pacing.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(10);

/// Which visual canvas a slide drives on the right-hand side of the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Visual {
    Mobile,
    Security,
    Speed,
}

/// One carousel entry. Static display copy, not user-authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub tag: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub visual: Visual,
    pub accent: &'static str,
}

const SLIDES: [Slide; 3] = [
    Slide {
        tag: "On-hands protection",
        title: "Mobile App Protection.",
        description: "Protect your data with passcodes, biometrics, and more.",
        visual: Visual::Mobile,
        accent: "cyan",
    },
    Slide {
        tag: "Built on trust. Backed by encryption.",
        title: "Privacy is not optional.",
        description: "Real time end-to-end encryption. Your data stays yours.",
        visual: Visual::Security,
        accent: "indigo",
    },
    Slide {
        tag: "Real-time Messaging",
        title: "Messaging at blitz speed.",
        description: "Low latency communication for teams that move fast.",
        visual: Visual::Speed,
        accent: "blue",
    },
];

pub fn slides() -> &'static [Slide] {
    &SLIDES
}

struct Inner {
    index: usize,
    len: usize,
    entered_at: Instant,
    /// Guards against a timer that fired concurrently with a re-arm.
    epoch: u64,
    timer: Option<JoinHandle<()>>,
    tx: watch::Sender<usize>,
}

fn apply_locked(state: &Arc<Mutex<Inner>>, inner: &mut Inner, next: usize) {
    inner.index = next;
    inner.entered_at = Instant::now();
    inner.tx.send_replace(next);
    rearm_locked(state, inner);
}

fn rearm_locked(state: &Arc<Mutex<Inner>>, inner: &mut Inner) {
    if let Some(timer) = inner.timer.take() {
        timer.abort();
    }
    inner.epoch += 1;
    let armed_epoch = inner.epoch;
    let task_state = Arc::clone(state);
    inner.timer = Some(tokio::spawn(async move {
        tokio::time::sleep(ROTATION_PERIOD).await;
        let mut inner = task_state.lock().unwrap();
        if inner.epoch != armed_epoch {
            return;
        }
        let next = (inner.index + 1) % inner.len;
        apply_locked(&task_state, &mut inner, next);
    }));
}

/// Rotation state machine for one mounted carousel.
///
/// Must be created on a Tokio runtime; the first timer is armed
/// immediately. Dropping the instance aborts the timer, so no index
/// mutation is observable after teardown.
pub struct Carousel {
    inner: Arc<Mutex<Inner>>,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "a carousel needs at least one slide");
        let (tx, _rx) = watch::channel(0);
        let inner = Arc::new(Mutex::new(Inner {
            index: 0,
            len,
            entered_at: Instant::now(),
            epoch: 0,
            timer: None,
            tx,
        }));
        {
            let mut guard = inner.lock().unwrap();
            rearm_locked(&inner, &mut guard);
        }
        Self { inner }
    }

    pub fn index(&self) -> usize {
        self.inner.lock().unwrap().index
    }

    /// Time spent on the current slide.
    pub fn slide_age(&self) -> Duration {
        self.inner.lock().unwrap().entered_at.elapsed()
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.inner.lock().unwrap().tx.subscribe()
    }

    /// Automatic advance: `(current + 1) % len`, then re-arm.
    pub fn advance(&self) {
        let mut inner = self.inner.lock().unwrap();
        let next = (inner.index + 1) % inner.len;
        apply_locked(&self.inner, &mut inner, next);
    }

    /// Manual selection. Downstream this is indistinguishable from an
    /// automatic advance: the index changes and the countdown restarts.
    pub fn select(&self, index: usize) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if index >= inner.len {
            return false;
        }
        apply_locked(&self.inner, &mut inner, index);
        true
    }

    /// Re-asserts the current index when the page becomes visible again.
    /// The value does not change and the countdown is NOT restarted; the
    /// rotation stays wall-clock accurate while the page is hidden.
    pub fn handle_visibility_change(&self, visible: bool) {
        if !visible {
            return;
        }
        let inner = self.inner.lock().unwrap();
        inner.tx.send_replace(inner.index);
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        if let Some(timer) = self.inner.lock().unwrap().timer.take() {
            timer.abort();
        }
    }
}
