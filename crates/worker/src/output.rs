use anyhow::Context;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsletterKind {
    Daily,
    Weekly,
}

impl NewsletterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NewsletterKind::Daily => "daily",
            NewsletterKind::Weekly => "weekly",
        }
    }
}

/// `{out_dir}/{kind}-{date}.md`, with any `/` in the date label made file-safe.
pub fn newsletter_path(out_dir: &Path, kind: NewsletterKind, date_label: &str) -> PathBuf {
    let safe_date = date_label.replace('/', "-");
    out_dir.join(format!("{}-{safe_date}.md", kind.as_str()))
}

pub fn write_newsletter(
    out_dir: &Path,
    kind: NewsletterKind,
    date_label: &str,
    markdown: &str,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output dir {}", out_dir.display()))?;

    let path = newsletter_path(out_dir, kind, date_label);
    std::fs::write(&path, markdown)
        .with_context(|| format!("failed to write newsletter {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_files_by_kind_and_date() {
        let p = newsletter_path(Path::new("out"), NewsletterKind::Daily, "2024-03-01");
        assert_eq!(p, Path::new("out").join("daily-2024-03-01.md"));

        let p = newsletter_path(Path::new("out"), NewsletterKind::Weekly, "2024/03/08");
        assert_eq!(p, Path::new("out").join("weekly-2024-03-08.md"));
    }

    #[test]
    fn writes_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let path = write_newsletter(&out, NewsletterKind::Daily, "2024-03-01", "# In Play").unwrap();

        assert_eq!(path, out.join("daily-2024-03-01.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# In Play");
    }
}
