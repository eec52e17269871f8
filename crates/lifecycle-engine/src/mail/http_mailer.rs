//! HTTP transactional-mail client
//!
//! Posts the inactivity warning to a REST mail API (api-key header,
//! JSON body, 2xx means accepted). The executor enforces the send
//! timeout and treats every failure as non-fatal.

use async_trait::async_trait;
use serde::Serialize;

use lifecycle_core::error::DomainError;
use lifecycle_core::traits::{RepoResult, WarningMailer};
use lifecycle_common::MailConfig;

const WARNING_SUBJECT: &str = "Your account is scheduled for deletion due to inactivity";

#[derive(Debug, Serialize)]
struct MailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailBody {
    sender: MailAddress,
    to: Vec<MailAddress>,
    subject: String,
    text_content: String,
}

/// Warning mailer backed by an HTTP mail API
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    /// Create a new HttpMailer
    #[must_use]
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn body(&self, email: &str, display_name: &str) -> SendMailBody {
        SendMailBody {
            sender: MailAddress {
                email: self.config.sender_email.clone(),
                name: self.config.sender_name.clone(),
            },
            to: vec![MailAddress {
                email: email.to_string(),
                name: Some(display_name.to_string()),
            }],
            subject: WARNING_SUBJECT.to_string(),
            text_content: format!(
                "Hello {display_name},\n\n\
                 Your account has been inactive for a long time and is \
                 scheduled for deletion. Log in to keep it.\n"
            ),
        }
    }
}

#[async_trait]
impl WarningMailer for HttpMailer {
    async fn send_inactivity_warning(&self, email: &str, display_name: &str) -> RepoResult<()> {
        let response = self
            .client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(&self.body(email, display_name))
            .send()
            .await
            .map_err(|e| DomainError::MailError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DomainError::MailError(format!(
                "mail API returned {status}: {detail}"
            )));
        }

        Ok(())
    }
}
