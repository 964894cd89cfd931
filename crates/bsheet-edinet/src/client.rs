//! EDINET HTTP client.

use async_trait::async_trait;
use bsheet_core::{
    ArtifactCache, ArtifactKey, CodeResolver, Collaborator, DocumentType, ExtractError,
    ExtractedDocument, FilerId, FilerIdentity, Filing, FilingId, FilingLocator, PackageRetriever,
    Result, Ticker,
};
use chrono::{NaiveDate, TimeDelta, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::{Instant, sleep};
use tracing::{debug, instrument, warn};

use crate::{
    codelist::CodeList,
    config::EdinetConfig,
    package,
    search::{DocumentListResponse, first_match},
};

/// Rate limiter spacing out requests to the API.
#[derive(Debug)]
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

#[derive(Debug)]
struct LoadedCodeList {
    list: Arc<CodeList>,
    loaded_at: Instant,
}

/// EDINET client implementing code lookup, document search and package retrieval.
///
/// The code list is parsed once and kept in memory for the configured TTL.
/// With an [`ArtifactCache`] attached, the raw code list archive and every
/// downloaded package are also stored there.
pub struct EdinetClient {
    client: reqwest::Client,
    config: EdinetConfig,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    cache: Option<Arc<dyn ArtifactCache>>,
    code_list: RwLock<Option<LoadedCodeList>>,
}

impl fmt::Debug for EdinetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdinetClient")
            .field("config", &self.config)
            .field("cache", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl EdinetClient {
    /// Creates a client with default settings and the given subscription key.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidParameter`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(EdinetConfig::new(api_key))
    }

    /// Creates a client from a configuration.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidParameter`] if the HTTP client cannot be built.
    pub fn with_config(config: EdinetConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ExtractError::InvalidParameter(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a client around a pre-configured HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: EdinetConfig) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_interval))),
            config,
            cache: None,
            code_list: RwLock::new(None),
        }
    }

    /// Attaches an artifact cache for the code list and filing packages.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ArtifactCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EdinetConfig {
        &self.config
    }

    /// GETs a URL and returns the body, or a description of the failure.
    async fn get_bytes(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Vec<u8>, String> {
        self.rate_limiter.lock().await.wait().await;

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| e.without_url().to_string())
    }

    /// Returns the parsed code list, loading it when missing or expired.
    ///
    /// # Errors
    /// Returns [`ExtractError::CodeListUnavailable`] if the list cannot be
    /// downloaded or parsed.
    pub async fn code_list(&self) -> Result<Arc<CodeList>> {
        let ttl = self.config.code_list_ttl;
        if let Some(loaded) = self.code_list.read().await.as_ref()
            && loaded.loaded_at.elapsed() < ttl
        {
            return Ok(Arc::clone(&loaded.list));
        }

        let mut slot = self.code_list.write().await;
        if let Some(loaded) = slot.as_ref()
            && loaded.loaded_at.elapsed() < ttl
        {
            return Ok(Arc::clone(&loaded.list));
        }

        let list = Arc::new(self.load_code_list().await?);
        *slot = Some(LoadedCodeList {
            list: Arc::clone(&list),
            loaded_at: Instant::now(),
        });
        Ok(list)
    }

    /// Parses the code list from the artifact cache, else downloads it.
    async fn load_code_list(&self) -> Result<CodeList> {
        let ttl = self.config.code_list_ttl;
        if let Some(artifact) = self.cached(&ArtifactKey::CodeList).await
            && !artifact.is_stale(ttl)
        {
            match CodeList::from_archive(&artifact.bytes) {
                Ok(list) => {
                    debug!("Using cached code list");
                    return Ok(list);
                }
                Err(e) => warn!(error = %e, "Cached code list is unreadable, downloading"),
            }
        }

        debug!(url = %self.config.code_list_url, "Downloading code list");
        let bytes = self
            .get_bytes(&self.config.code_list_url, &[])
            .await
            .map_err(|e| ExtractError::CodeListUnavailable(format!("Download failed: {e}")))?;

        // Parse before caching so a broken download is not kept.
        let list = CodeList::from_archive(&bytes)?;
        self.store(&ArtifactKey::CodeList, &bytes).await;
        Ok(list)
    }

    async fn cached(&self, key: &ArtifactKey) -> Option<bsheet_core::CachedArtifact> {
        let cache = self.cache.as_ref()?;
        match cache.get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(%key, error = %e, "Artifact cache read failed");
                None
            }
        }
    }

    async fn store(&self, key: &ArtifactKey, bytes: &[u8]) {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.put(key, bytes).await
        {
            warn!(%key, error = %e, "Failed to cache artifact");
        }
    }

    /// Lists the documents submitted on one day.
    async fn documents_on(&self, date: NaiveDate) -> std::result::Result<DocumentListResponse, String> {
        let url = format!("{}/documents.json", self.config.api_base_url);
        let date_param = date.format("%Y-%m-%d").to_string();
        let body = self
            .get_bytes(
                &url,
                &[
                    ("date", date_param.as_str()),
                    ("type", "2"),
                    ("Subscription-Key", self.config.api_key.as_str()),
                ],
            )
            .await?;

        let response: DocumentListResponse =
            serde_json::from_slice(&body).map_err(|e| format!("Invalid response: {e}"))?;
        match response.error() {
            Some(error) => Err(error),
            None => Ok(response),
        }
    }

    /// Searches backward from `today` for the newest qualifying filing.
    ///
    /// Days whose listing cannot be fetched are logged and skipped.
    ///
    /// # Errors
    /// Returns [`ExtractError::FilingNotFound`] if no day in the window holds one.
    #[instrument(skip(self, document_types), fields(filer = %filer))]
    pub async fn find_latest_from(
        &self,
        filer: &FilerId,
        document_types: &[DocumentType],
        lookback_days: u32,
        today: NaiveDate,
    ) -> Result<Filing> {
        for offset in 0..lookback_days {
            let Some(date) = today.checked_sub_signed(TimeDelta::days(i64::from(offset))) else {
                break;
            };

            match self.documents_on(date).await {
                Ok(response) => {
                    if let Some((id, document_type)) =
                        first_match(&response.results, filer, document_types)
                    {
                        debug!(%id, %date, code = document_type.code(), "Found filing");
                        return Ok(Filing {
                            id,
                            document_type,
                            filed_on: date,
                        });
                    }
                }
                Err(e) => warn!(%date, error = %e, "Document search failed, skipping day"),
            }
        }

        Err(ExtractError::FilingNotFound {
            filer_id: filer.to_string(),
            lookback_days,
        })
    }

    async fn package_bytes(&self, filing: &FilingId) -> Result<Vec<u8>> {
        let key = ArtifactKey::FilingPackage(filing.clone());
        if let Some(artifact) = self.cached(&key).await {
            debug!(%filing, "Using cached package");
            return Ok(artifact.bytes);
        }

        let url = format!("{}/documents/{filing}", self.config.api_base_url);
        debug!(%url, "Downloading package");
        let bytes = self
            .get_bytes(
                &url,
                &[("type", "1"), ("Subscription-Key", self.config.api_key.as_str())],
            )
            .await
            .map_err(|e| ExtractError::DocumentUnavailable(format!("Download failed: {e}")))?;

        package::open(&bytes)?;
        self.store(&key, &bytes).await;
        Ok(bytes)
    }
}

/// Today's date on the registry's calendar (JST).
fn registry_today() -> NaiveDate {
    (Utc::now() + TimeDelta::hours(9)).date_naive()
}

impl Collaborator for EdinetClient {
    fn name(&self) -> &str {
        "EDINET"
    }
}

#[async_trait]
impl CodeResolver for EdinetClient {
    #[instrument(skip(self), fields(ticker = %ticker))]
    async fn lookup(&self, ticker: &Ticker) -> Result<FilerIdentity> {
        let list = self.code_list().await?;
        let entry = list
            .lookup(ticker)
            .ok_or_else(|| ExtractError::TickerNotFound(ticker.to_string()))?;
        debug!(filer = %entry.filer_id, name = %entry.entity_name, "Resolved ticker");
        Ok(FilerIdentity::from(entry))
    }
}

#[async_trait]
impl FilingLocator for EdinetClient {
    async fn find_latest(
        &self,
        filer: &FilerId,
        document_types: &[DocumentType],
        lookback_days: u32,
    ) -> Result<Filing> {
        self.find_latest_from(filer, document_types, lookback_days, registry_today())
            .await
    }
}

#[async_trait]
impl PackageRetriever for EdinetClient {
    #[instrument(skip(self), fields(filing = %filing))]
    async fn fetch_and_extract(&self, filing: &FilingId) -> Result<ExtractedDocument> {
        let bytes = self.package_bytes(filing).await?;
        package::unpack_primary_document(filing, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codelist, package::tests as pkg, test_server::serve};
    use std::collections::HashMap;
    use std::sync::atomic::Ordering;
    use tokio::sync::RwLock as AsyncRwLock;

    #[derive(Default)]
    struct MapCache(AsyncRwLock<HashMap<ArtifactKey, Vec<u8>>>);

    #[async_trait]
    impl ArtifactCache for MapCache {
        async fn get(&self, key: &ArtifactKey) -> Result<Option<bsheet_core::CachedArtifact>> {
            Ok(self.0.read().await.get(key).map(|b| bsheet_core::CachedArtifact {
                bytes: b.clone(),
                cached_at: Utc::now(),
            }))
        }
        async fn put(&self, key: &ArtifactKey, bytes: &[u8]) -> Result<()> {
            self.0.write().await.insert(key.clone(), bytes.to_vec());
            Ok(())
        }
        async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
            Ok(0)
        }
        async fn clear(&self) -> Result<()> {
            self.0.write().await.clear();
            Ok(())
        }
    }

    fn client(base: &str) -> EdinetClient {
        let config = EdinetConfig::new("test-key")
            .with_api_base_url(format!("{base}/api/v2"))
            .with_code_list_url(format!("{base}/codelist/Edinetcode.zip"))
            .with_min_interval(Duration::ZERO);
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        EdinetClient::with_client(http, config)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn listing(entries: &str) -> Vec<u8> {
        format!(r#"{{"metadata": {{"status": "200", "message": "OK"}}, "results": [{entries}]}}"#)
            .into_bytes()
    }

    #[test]
    fn test_debug_hides_key() {
        let client = client("http://127.0.0.1:1");
        assert!(!format!("{client:?}").contains("test-key"));
        assert_eq!(client.name(), "EDINET");
    }

    #[tokio::test]
    async fn test_lookup_loads_code_list_once() {
        let archive = codelist::tests::archive(codelist::tests::CSV);
        let (base, hits) = serve(move |target| {
            if target.starts_with("/codelist/Edinetcode.zip") {
                (200, archive.clone())
            } else {
                (404, Vec::new())
            }
        })
        .await;
        let client = client(&base);

        let identity = client.lookup(&Ticker::new("7203").unwrap()).await.unwrap();
        assert_eq!(identity.filer_id.as_str(), "E02144");
        assert_eq!(identity.industry, "輸送用機器");

        let err = client
            .lookup(&Ticker::new("0000").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::TickerNotFound(_)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_code_list_from_artifact_cache() {
        let (base, hits) = serve(|_| (503, Vec::new())).await;
        let cache = Arc::new(MapCache::default());
        cache
            .put(
                &ArtifactKey::CodeList,
                &codelist::tests::archive(codelist::tests::CSV),
            )
            .await
            .unwrap();

        let client = client(&base).with_cache(cache);
        let list = client.code_list().await.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_downloaded_code_list_is_cached() {
        let archive = codelist::tests::archive(codelist::tests::CSV);
        let (base, hits) = serve(move |_| (200, archive.clone())).await;
        let cache = Arc::new(MapCache::default());

        let client = client(&base).with_cache(cache.clone());
        assert_eq!(client.code_list().await.unwrap().len(), 3);
        assert!(cache.get(&ArtifactKey::CodeList).await.unwrap().is_some());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_code_list_download_failure() {
        let (base, _) = serve(|_| (503, Vec::new())).await;
        let err = client(&base)
            .lookup(&Ticker::new("7203").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::CodeListUnavailable(_)));
    }

    #[tokio::test]
    async fn test_find_latest_walks_back_and_skips_failures() {
        let (base, hits) = serve(|target| {
            if target.contains("date=2024-06-20") {
                (200, listing(r#"{"docID": "S100OTHR", "edinetCode": "E99999", "docTypeCode": "120"}"#))
            } else if target.contains("date=2024-06-19") {
                (500, Vec::new())
            } else if target.contains("date=2024-06-18") {
                (200, listing(r#"{"docID": "S100TOYO", "edinetCode": "E02144", "docTypeCode": "120"}"#))
            } else {
                (200, listing(""))
            }
        })
        .await;

        let filing = client(&base)
            .find_latest_from(&FilerId::new("E02144"), DocumentType::DEFAULT, 365, day(20))
            .await
            .unwrap();
        assert_eq!(filing.id.as_str(), "S100TOYO");
        assert_eq!(filing.filed_on, day(18));
        assert_eq!(filing.document_type, DocumentType::AnnualReport);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_find_latest_exhausts_window() {
        let (base, hits) = serve(|_| (200, listing(""))).await;

        let err = client(&base)
            .find_latest_from(&FilerId::new("E02144"), DocumentType::DEFAULT, 3, day(20))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ExtractError::FilingNotFound {
                filer_id: "E02144".to_string(),
                lookback_days: 3,
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_prefers_full_variant_and_caches_package() {
        let bytes = pkg::package(&[
            (pkg::SUMMARY, "<xbrl>summary</xbrl>"),
            (pkg::FULL, "<xbrl>full</xbrl>"),
        ]);
        let (base, hits) = serve(move |target| {
            if target.starts_with("/api/v2/documents/S100TOYO?") && target.contains("type=1") {
                (200, bytes.clone())
            } else {
                (404, Vec::new())
            }
        })
        .await;

        let cache = Arc::new(MapCache::default());
        let client = client(&base).with_cache(cache.clone());
        let filing = FilingId::new("S100TOYO");

        let document = client.fetch_and_extract(&filing).await.unwrap();
        assert_eq!(document.read().unwrap(), b"<xbrl>full</xbrl>");
        assert!(
            cache
                .get(&ArtifactKey::FilingPackage(filing.clone()))
                .await
                .unwrap()
                .is_some()
        );

        let again = client.fetch_and_extract(&filing).await.unwrap();
        assert_eq!(again.read().unwrap(), b"<xbrl>full</xbrl>");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_failures() {
        let (base, _) = serve(|target| {
            if target.starts_with("/api/v2/documents/S100JSON") {
                (200, br#"{"metadata": {"status": "404"}}"#.to_vec())
            } else {
                (404, Vec::new())
            }
        })
        .await;
        let client = client(&base);

        let err = client
            .fetch_and_extract(&FilingId::new("S100GONE"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::DocumentUnavailable(_)));

        let err = client
            .fetch_and_extract(&FilingId::new("S100JSON"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::DocumentUnavailable(_)));
    }
}
