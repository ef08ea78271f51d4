use std::{fs::OpenOptions, io, path::Path};

/// Creates the backing file of a file-based SQLite url so a local dev database
/// can be opened without `mode=rwc`. Any other url is left alone.
pub fn create_dev_db(db_url: &str) -> io::Result<()> {
    let Some(path) = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") || Path::new(path).exists() {
        return Ok(());
    }

    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::create_dev_db;

    #[test]
    fn ignores_non_file_urls() {
        assert!(create_dev_db("postgres://localhost/tourney").is_ok());
        assert!(create_dev_db("sqlite::memory:").is_ok());
    }
}
