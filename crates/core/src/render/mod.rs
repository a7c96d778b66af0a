use crate::domain::report::{DailyReport, WeeklyReport};
use anyhow::Context;
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

pub const DAILY_TEMPLATE: &str = "daily.md";
pub const WEEKLY_TEMPLATE: &str = "weekly.md";

const TEMPLATE_EXTENSION: &str = "hbs";

const DEFAULT_DAILY: &str = include_str!("../../templates/daily.md.hbs");
const DEFAULT_WEEKLY: &str = include_str!("../../templates/weekly.md.hbs");

/// Markdown newsletter renderer.
///
/// Ships with embedded templates; a templates directory containing
/// `daily.md.hbs` / `weekly.md.hbs` overrides them file by file.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_overrides(None)
    }

    pub fn with_overrides(templates_dir: Option<&Path>) -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        // Output is markdown, not HTML.
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        for (name, embedded) in [(DAILY_TEMPLATE, DEFAULT_DAILY), (WEEKLY_TEMPLATE, DEFAULT_WEEKLY)] {
            let source = match templates_dir.map(|dir| template_path(dir, name)) {
                Some(path) if path.is_file() => {
                    tracing::info!(template = name, path = %path.display(), "using template override");
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read template {}", path.display()))?
                }
                _ => embedded.to_string(),
            };
            registry
                .register_template_string(name, source)
                .with_context(|| format!("failed to parse template {name}"))?;
        }

        Ok(Self { registry })
    }

    pub fn render_daily(&self, report: &DailyReport) -> anyhow::Result<String> {
        self.render(DAILY_TEMPLATE, report)
    }

    pub fn render_weekly(&self, report: &WeeklyReport) -> anyhow::Result<String> {
        self.render(WEEKLY_TEMPLATE, report)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> anyhow::Result<String> {
        self.registry
            .render(name, data)
            .with_context(|| format!("failed to render template {name}"))
    }
}

fn template_path(dir: &Path, name: &str) -> std::path::PathBuf {
    dir.join(format!("{name}.{TEMPLATE_EXTENSION}"))
}
