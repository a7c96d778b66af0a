use crate::config::Settings;
use crate::mailer::Mailer;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

const PRE_STYLE: &str = "font: 14px/1.4 ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, 'Liberation Mono', monospace; white-space: pre-wrap;";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Delivers newsletters through the Resend transactional email API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    from: String,
    to: String,
}

impl ResendMailer {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_resend_api_key()?.to_string();
        let from = settings.require_from_email()?.to_string();
        let to = settings.require_substack_post_email()?.to_string();

        let http = reqwest::Client::builder()
            .build()
            .context("failed to build resend http client")?;

        Ok(Self {
            http,
            api_key,
            base_url: settings.resend_base_url.clone(),
            from,
            to,
        })
    }

    pub fn email_request(&self, subject: &str, markdown: &str) -> EmailRequest {
        EmailRequest {
            from: self.from.clone(),
            to: vec![self.to.clone()],
            subject: subject.to_string(),
            html: markdown_to_html(markdown),
        }
    }

    fn url(&self) -> String {
        format!("{}/emails", self.base_url.trim_end_matches('/'))
    }

    fn headers(&self) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .context("RESEND_API_KEY is not a valid header value")?,
        );
        Ok(headers)
    }
}

/// Wraps markdown in a monospace `<pre>` block so its layout survives the
/// trip through an HTML email body.
pub fn markdown_to_html(markdown: &str) -> String {
    format!(
        "<pre style=\"{PRE_STYLE}\">{}</pre>",
        html_escape::encode_text(markdown)
    )
}

#[async_trait::async_trait]
impl Mailer for ResendMailer {
    fn provider_name(&self) -> &'static str {
        "resend"
    }

    async fn send_markdown(&self, subject: &str, markdown: &str) -> anyhow::Result<()> {
        let req = self.email_request(subject, markdown);

        let res = self
            .http
            .post(self.url())
            .headers(self.headers()?)
            .json(&req)
            .send()
            .await
            .context("resend request failed")?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            anyhow::bail!("resend: status {status}: {body}");
        }

        tracing::info!(subject, to = %self.to, "newsletter email sent");
        Ok(())
    }
}
