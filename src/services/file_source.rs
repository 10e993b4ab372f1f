use anyhow::{Context, Result};

use crate::parser::{SheetFormat, parse_records};
use crate::records::GradeRecord;
use crate::services::record_source::RecordSource;

/// Reads records from a local CSV or JSON export. The file is re-read on
/// every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
    format: SheetFormat,
}

impl FileSource {
    /// Picks the format from the file extension.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let format = SheetFormat::from_path(&path);
        Self { path, format }
    }
}

#[async_trait::async_trait]
impl RecordSource for FileSource {
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    async fn fetch(&self) -> Result<Vec<GradeRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read '{}'", self.path))?;
        let records = parse_records(&bytes, self.format)
            .with_context(|| format!("invalid grade data in '{}'", self.path))?;
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[tokio::test]
    async fn test_fetch_csv_file() {
        let path = temp_path("cla_grades_test_source.csv");
        fs::write(
            &path,
            "group,homework,points,total_possible_points,mark_date\n\
             g1,hw1,8,10,2023-04-01T12:00:00\n",
        )
        .unwrap();

        let records = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].group, "g1");

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_json_file() {
        let path = temp_path("cla_grades_test_source.json");
        fs::write(
            &path,
            r#"[{"group": "g1", "homework": 1, "points": 8, "total_possible_points": 10, "mark_date": "2023-04-01T12:00:00"}]"#,
        )
        .unwrap();

        let records = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(records[0].homework, "1");

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_missing_file_fails() {
        let source = FileSource::new(temp_path("cla_grades_does_not_exist.csv"));
        assert!(source.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_malformed_file_fails() {
        let path = temp_path("cla_grades_test_malformed.csv");
        fs::write(
            &path,
            "group,homework,points,total_possible_points,mark_date\n\
             g1,hw1,n/a,10,2023-04-01T12:00:00\n",
        )
        .unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(err.downcast_ref::<crate::error::DataFormatError>().is_some());

        fs::remove_file(&path).unwrap();
    }
}
