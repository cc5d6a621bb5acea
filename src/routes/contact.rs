use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::contact::{FormInput, deliver};
use crate::routes::AppState;

#[derive(Template)]
#[template(path = "partials/contact-success.html")]
struct ContactSuccessTemplate;

#[derive(Template)]
#[template(path = "partials/contact-error.html")]
struct ContactErrorTemplate<'a> {
    message: &'a str,
}

/// Wire payload of the contact form. The constraints mirror the
/// browser-native `required` and `type="email"` checks; nothing more.
#[derive(Debug, Deserialize, Validate)]
pub struct ActionInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

fn render_fragment<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!("Failed to render contact fragment: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
        }
    }
}

/// POST /contact - Runs the ordered notification pair for one submission:
/// the support inquiry first, then the submitter acknowledgment. Any
/// failure collapses into the single "send failed" outcome.
pub async fn action(
    State(app_state): State<AppState>,
    Form(input): Form<ActionInput>,
) -> Response {
    if input.validate().is_err() {
        return render_fragment(
            StatusCode::UNPROCESSABLE_ENTITY,
            ContactErrorTemplate {
                message: "Please provide your name and a valid email address.",
            },
        );
    }

    let form = FormInput {
        name: input.name,
        email: input.email,
        phone: input.phone,
        message: input.message,
    };

    match deliver(app_state.notifier.as_ref(), &form).await {
        Ok(()) => {
            tracing::info!(email = %form.email, "contact form submitted");
            render_fragment(StatusCode::OK, ContactSuccessTemplate)
        }
        Err(err) => {
            tracing::error!(error = %err, detail = err.detail(), "contact form delivery failed");
            render_fragment(
                StatusCode::BAD_GATEWAY,
                ContactErrorTemplate {
                    message: "Failed to send. Please try again.",
                },
            )
        }
    }
}
