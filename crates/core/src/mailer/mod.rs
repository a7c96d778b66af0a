use crate::domain::report::{DailyReport, WeeklyReport};

pub mod resend;

#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn send_markdown(&self, subject: &str, markdown: &str) -> anyhow::Result<()>;
}

pub fn daily_subject(report: &DailyReport) -> String {
    format!("In Play: {}", report.date)
}

pub fn weekly_subject(report: &WeeklyReport) -> String {
    format!("Weekly Playbook: {} to {}", report.week_start, report.week_end)
}
