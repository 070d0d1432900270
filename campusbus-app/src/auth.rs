use std::sync::Arc;

use campusbus_core::validation::{require_email, require_fields};
use campusbus_core::{BusApi, CoreResult, Session};
use campusbus_nav::StudentEvent;
use campusbus_shared::models::{LoginRequest, RegisterRequest};
use campusbus_shared::Secret;
use tracing::info;

use crate::error::Notice;
use crate::store::IntentSender;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> CoreResult<LoginRequest> {
        require_fields(&[("Email", self.email.as_str()), ("Password", self.password.as_str())])?;
        require_email(&self.email)?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: Secret::new(self.password.clone()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
    pub room: String,
    pub phone: String,
}

impl RegisterForm {
    pub fn validate(&self) -> CoreResult<RegisterRequest> {
        require_fields(&[
            ("Email", self.email.as_str()),
            ("Name", self.name.as_str()),
            ("Password", self.password.as_str()),
            ("Room", self.room.as_str()),
            ("Phone", self.phone.as_str()),
        ])?;
        require_email(&self.email)?;
        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            password: Secret::new(self.password.clone()),
            room: self.room.trim().to_string(),
            phone: self.phone.trim().to_string(),
        })
    }
}

/// Sign-in, sign-up and sign-out for the student app
#[derive(Clone)]
pub struct AuthFlow {
    api: Arc<dyn BusApi>,
    session: Session,
    intents: IntentSender<StudentEvent>,
}

impl AuthFlow {
    pub fn new(api: Arc<dyn BusApi>, session: Session, intents: IntentSender<StudentEvent>) -> Self {
        Self { api, session, intents }
    }

    /// Validate, authenticate, keep the token, then move on to profile setup
    pub async fn login(&self, form: &LoginForm) -> Result<(), Notice> {
        let request = form.validate().map_err(|e| Notice::failure("Login Failed", &e))?;
        let response = self
            .api
            .login(&request)
            .await
            .map_err(|e| Notice::failure("Login Failed", &e))?;

        self.session.set_token(response.token).await;
        info!(email = %request.email, "Signed in");
        self.intents.send(StudentEvent::LoginSuccess);
        Ok(())
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<(), Notice> {
        let request = form
            .validate()
            .map_err(|e| Notice::failure("Registration Failed", &e))?;
        let response = self
            .api
            .register(&request)
            .await
            .map_err(|e| Notice::failure("Registration Failed", &e))?;

        self.session.set_token(response.token).await;
        info!(email = %request.email, "Registered");
        self.intents.send(StudentEvent::LoginSuccess);
        Ok(())
    }

    /// Development shortcut straight to the dashboard
    pub fn dev_skip(&self) {
        self.intents.send(StudentEvent::DevSkip);
    }

    pub async fn logout(&self) {
        self.session.clear().await;
        self.intents.send(StudentEvent::Logout);
    }
}
