pub mod analysis;
pub mod domain;
pub mod error;
pub mod jobs;
pub mod mailer;
pub mod render;
pub mod storage;
pub mod time;

pub use error::{Error, Result};

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    pub const DEFAULT_STATE_PATH: &str = "data/state.json";
    pub const DEFAULT_ROTATIONS_PATH: &str = "data/rotations.json";
    pub const DEFAULT_OUT_DIR: &str = "out";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub state_path: PathBuf,
        pub rotations_path: PathBuf,
        pub out_dir: PathBuf,
        pub templates_dir: Option<PathBuf>,
        pub resend_api_key: Option<String>,
        pub resend_base_url: String,
        pub from_email: Option<String>,
        pub substack_post_email: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                state_path: PathBuf::from(DEFAULT_STATE_PATH),
                rotations_path: PathBuf::from(DEFAULT_ROTATIONS_PATH),
                out_dir: PathBuf::from(DEFAULT_OUT_DIR),
                templates_dir: None,
                resend_api_key: None,
                resend_base_url: crate::mailer::resend::DEFAULT_BASE_URL.to_string(),
                from_email: None,
                substack_post_email: None,
                sentry_dsn: None,
            }
        }
    }

    fn var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let defaults = Self::default();
            Ok(Self {
                state_path: var("STATE_PATH").map(PathBuf::from).unwrap_or(defaults.state_path),
                rotations_path: var("ROTATIONS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.rotations_path),
                out_dir: var("OUT_DIR").map(PathBuf::from).unwrap_or(defaults.out_dir),
                templates_dir: var("TEMPLATES_DIR").map(PathBuf::from),
                resend_api_key: var("RESEND_API_KEY"),
                resend_base_url: var("RESEND_BASE_URL").unwrap_or(defaults.resend_base_url),
                from_email: var("FROM_EMAIL"),
                substack_post_email: var("SUBSTACK_POST_EMAIL"),
                sentry_dsn: var("SENTRY_DSN"),
            })
        }

        pub fn require_resend_api_key(&self) -> anyhow::Result<&str> {
            self.resend_api_key
                .as_deref()
                .context("RESEND_API_KEY is required")
        }

        pub fn require_from_email(&self) -> anyhow::Result<&str> {
            self.from_email.as_deref().context("FROM_EMAIL is required")
        }

        pub fn require_substack_post_email(&self) -> anyhow::Result<&str> {
            self.substack_post_email
                .as_deref()
                .context("SUBSTACK_POST_EMAIL is required")
        }
    }
}
