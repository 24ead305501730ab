//! The authentication popup.

use super::{HomePage, PageContext};
use crate::result::ComprarResult;
use crate::session::DriverSession;

const PAGE: &str = "auth";

/// Auth popup: phone/code and email credential entry.
#[derive(Debug)]
pub struct AuthPage<S> {
    pub(crate) ctx: PageContext<S>,
}

impl<S: DriverSession> AuthPage<S> {
    /// Enter a phone number and request a code, then best-effort close
    /// the confirmation popup. The close control is optional by design:
    /// its absence never aborts the flow.
    pub async fn login_by_phone(self, phone: &str) -> ComprarResult<HomePage<S>> {
        let phone_input = self.ctx.locator(PAGE, "phone_input")?;
        let request_code = self.ctx.locator(PAGE, "request_code_button")?;
        let interactor = self.ctx.interactor();
        interactor.type_text(&phone_input, phone).await?;
        interactor.click(&request_code).await?;
        self.ctx.dismiss_if_present(PAGE, "close_button").await;
        Ok(HomePage { ctx: self.ctx })
    }

    /// Switch to the e-mail tab and submit credentials.
    pub async fn login_by_email(self, email: &str, password: &str) -> ComprarResult<HomePage<S>> {
        let tab = self.ctx.locator(PAGE, "email_tab")?;
        let email_input = self.ctx.locator(PAGE, "email_input")?;
        let password_input = self.ctx.locator(PAGE, "password_input")?;
        let submit = self.ctx.locator(PAGE, "submit_button")?;
        let interactor = self.ctx.interactor();
        interactor.click(&tab).await?;
        interactor.type_text(&email_input, email).await?;
        interactor.type_text(&password_input, password).await?;
        interactor.click(&submit).await?;
        Ok(HomePage { ctx: self.ctx })
    }

    /// Borrow the underlying session.
    #[must_use]
    pub fn session(&self) -> &S {
        &self.ctx.session
    }

    /// Recover the session, ending the flow.
    #[must_use]
    pub fn into_session(self) -> S {
        self.ctx.session
    }
}
