use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;

use crate::config::Secrets;
use crate::fetch::auth::{ApiKey, UrlParam};
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::parser::{SheetFormat, parse_records};
use crate::records::GradeRecord;
use crate::services::record_source::RecordSource;

const GOOGLE_SHEETS_HOST: &str = "docs.google.com";

/// Describes how the sheet endpoint authenticates requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetAuth {
    /// Publicly shared sheet.
    None,
    /// OAuth access token sent as `Authorization: Bearer`.
    Bearer { token: String },
    /// API key appended as the `key` query parameter. Google accepts keys
    /// only for sheets shared by link; private sheets need `Bearer`.
    ApiKey { key: String },
}

impl SheetAuth {
    /// Prefers an access token over an API key.
    pub fn from_secrets(secrets: &Secrets) -> Self {
        match (&secrets.access_token, &secrets.api_key) {
            (Some(token), _) => SheetAuth::Bearer {
                token: token.clone(),
            },
            (None, Some(key)) => SheetAuth::ApiKey { key: key.clone() },
            (None, None) => SheetAuth::None,
        }
    }

    fn client(&self) -> Result<Box<dyn HttpClient>> {
        let basic = BasicClient::new()?;
        let client: Box<dyn HttpClient> = match self {
            SheetAuth::None => Box::new(basic),
            SheetAuth::Bearer { token } => Box::new(ApiKey::bearer(basic, token)?),
            SheetAuth::ApiKey { key } => Box::new(UrlParam::google_api_key(basic, key)),
        };
        Ok(client)
    }
}

/// Whether `location` names an HTTP(S) resource rather than a local file.
pub fn is_remote(location: &str) -> bool {
    Url::parse(location).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Rewrites a Google Sheets link (`.../spreadsheets/d/<id>/edit#gid=<n>`)
/// into its CSV export endpoint. Other URLs are returned unchanged.
pub fn export_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("invalid sheet URL '{url}'"))?;
    if parsed.host_str() != Some(GOOGLE_SHEETS_HOST) {
        return Ok(url.to_string());
    }

    let segments: Vec<&str> = parsed.path_segments().map(|s| s.collect()).unwrap_or_default();
    let id = match segments.as_slice() {
        ["spreadsheets", "d", id, rest @ ..] if !rest.contains(&"export") => *id,
        _ => return Ok(url.to_string()),
    };

    let gid = parsed
        .query_pairs()
        .find(|(k, _)| k == "gid")
        .map(|(_, v)| v.into_owned())
        .or_else(|| {
            parsed
                .fragment()
                .and_then(|f| f.strip_prefix("gid="))
                .map(str::to_string)
        });

    let mut export = format!("https://{GOOGLE_SHEETS_HOST}/spreadsheets/d/{id}/export?format=csv");
    if let Some(gid) = gid {
        export.push_str(&format!("&gid={gid}"));
    }
    Ok(export)
}

/// Reads grade records from a remote sheet export over HTTP.
pub struct SheetClient {
    client: Box<dyn HttpClient>,
    url: String,
    format: SheetFormat,
}

impl SheetClient {
    pub fn new(url: &str, auth: &SheetAuth) -> Result<Self> {
        Self::with_client(auth.client()?, url)
    }

    /// Reads `url` through an already configured client.
    pub fn with_client(client: Box<dyn HttpClient>, url: &str) -> Result<Self> {
        let url = export_url(url)?;
        let format = if url.contains("format=csv") {
            SheetFormat::Csv
        } else {
            SheetFormat::from_path(Url::parse(&url)?.path())
        };

        Ok(Self {
            client,
            url,
            format,
        })
    }
}

#[async_trait]
impl RecordSource for SheetClient {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<GradeRecord>> {
        let bytes = fetch_bytes(self.client.as_ref(), &self.url)
            .await
            .context("failed to download grade sheet")?;
        tracing::debug!(bytes = bytes.len(), "Sheet downloaded, parsing");

        let records = parse_records(&bytes, self.format).context("invalid grade sheet")?;
        Ok(records)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
