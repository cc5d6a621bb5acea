use askama::Template;
use axum::response::{Html, IntoResponse};

use crate::error::AppError;
use crate::hero::{Slide, slides};

/// One entry in the features grid.
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// One entry in the FAQ section.
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        title: "End-to-end encryption",
        description: "Every message is encrypted on your device and only decrypted by its recipient. Nobody in between can read it, including us.",
    },
    Feature {
        title: "Blitz-fast delivery",
        description: "A lean wire protocol and regional relays keep round trips low, so conversations feel instant even on weak connections.",
    },
    Feature {
        title: "Every platform",
        description: "Native apps for iOS, Android, macOS, Windows, and Linux, with seamless handoff between your devices.",
    },
    Feature {
        title: "On-device protection",
        description: "Lock the app behind a passcode or biometrics, and wipe chats remotely if a device goes missing.",
    },
];

const FAQS: [Faq; 3] = [
    Faq {
        question: "Is Blitz free?",
        answer: "Blitz is free for personal use. Team plans with admin controls are available for organizations.",
    },
    Faq {
        question: "Can you read my messages?",
        answer: "No. Messages are end-to-end encrypted; the keys never leave your devices.",
    },
    Faq {
        question: "Which platforms are supported?",
        answer: "iOS, Android, macOS, Windows, and Linux, plus a browser client for quick access.",
    },
];

#[derive(Template)]
#[template(path = "pages/home.html")]
struct HomeTemplate {
    slides: &'static [Slide],
    features: &'static [Feature],
    faqs: &'static [Faq],
}

/// GET / - The landing page composition: hero carousel, features,
/// platform call-to-action, FAQ, and the contact modal.
pub async fn page() -> Result<impl IntoResponse, AppError> {
    let template = HomeTemplate {
        slides: slides(),
        features: &FEATURES,
        faqs: &FAQS,
    };

    Ok(Html(template.render()?))
}
