//! Extraction orchestrator.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use bsheet_core::{
    BalanceSheet, CodeResolver, DocumentType, FilingLocator, PackageRetriever, Phase,
    ProgressSink, Result, Ticker, reconcile,
};
use bsheet_xbrl::{FactIndex, fill_figures};

use crate::progress::ScaledProgress;

/// Default filing search window in days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Turns a ticker into a reconciled [`BalanceSheet`].
///
/// Each request resolves the filer, locates its latest qualifying filing,
/// retrieves the primary document, indexes its facts, resolves every figure
/// and reconciles the result. Requests share no state beyond the collaborators.
///
/// # Example
///
/// ```no_run
/// use bsheet::{BalanceSheetService, NoopProgress};
///
/// #[tokio::main]
/// async fn main() -> bsheet::Result<()> {
///     let service = BalanceSheetService::with_edinet("your-subscription-key")?;
///     let sheet = service.extract("7203", &NoopProgress).await?;
///     println!("{}: equity ratio {:?}", sheet.entity_name, sheet.equity_ratio());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BalanceSheetService {
    resolver: Arc<dyn CodeResolver>,
    locator: Arc<dyn FilingLocator>,
    retriever: Arc<dyn PackageRetriever>,
    document_types: Vec<DocumentType>,
    lookback_days: u32,
}

impl std::fmt::Debug for BalanceSheetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceSheetService")
            .field("resolver", &self.resolver.name())
            .field("locator", &self.locator.name())
            .field("retriever", &self.retriever.name())
            .field("document_types", &self.document_types)
            .field("lookback_days", &self.lookback_days)
            .finish()
    }
}

impl BalanceSheetService {
    /// Creates a service from its three collaborators.
    #[must_use]
    pub fn new(
        resolver: Arc<dyn CodeResolver>,
        locator: Arc<dyn FilingLocator>,
        retriever: Arc<dyn PackageRetriever>,
    ) -> Self {
        debug!(
            resolver = resolver.name(),
            locator = locator.name(),
            retriever = retriever.name(),
            "Creating balance sheet service"
        );
        Self {
            resolver,
            locator,
            retriever,
            document_types: DocumentType::DEFAULT.to_vec(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    /// Creates a service from one value implementing all three collaborators.
    #[must_use]
    pub fn from_collaborator<C>(collaborator: Arc<C>) -> Self
    where
        C: CodeResolver + FilingLocator + PackageRetriever + 'static,
    {
        Self::new(collaborator.clone(), collaborator.clone(), collaborator)
    }

    /// Creates a service backed by EDINET.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    #[cfg(feature = "edinet")]
    pub fn edinet(config: bsheet_edinet::EdinetConfig) -> Result<Self> {
        let client = bsheet_edinet::EdinetClient::with_config(config)?;
        Ok(Self::from_collaborator(Arc::new(client)))
    }

    /// Creates a service backed by EDINET with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    #[cfg(feature = "edinet")]
    pub fn with_edinet(api_key: impl Into<String>) -> Result<Self> {
        Self::edinet(bsheet_edinet::EdinetConfig::new(api_key))
    }

    /// Sets the document types a filing search accepts.
    #[must_use]
    pub fn with_document_types(mut self, document_types: impl Into<Vec<DocumentType>>) -> Self {
        self.document_types = document_types.into();
        self
    }

    /// Sets the filing search window.
    #[must_use]
    pub const fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// Document types a filing search accepts.
    #[must_use]
    pub fn document_types(&self) -> &[DocumentType] {
        &self.document_types
    }

    /// Filing search window in days.
    #[must_use]
    pub const fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Extracts the balance sheet of the latest filing for `ticker`.
    ///
    /// Progress is reported after every phase. Failures before the fact
    /// index exists are returned as typed errors; afterwards extraction
    /// cannot fail.
    ///
    /// # Errors
    /// - [`InvalidParameter`](bsheet_core::ExtractError::InvalidParameter) for an empty or illegal ticker
    /// - [`CodeListUnavailable`](bsheet_core::ExtractError::CodeListUnavailable) or
    ///   [`TickerNotFound`](bsheet_core::ExtractError::TickerNotFound) from filer resolution
    /// - [`FilingNotFound`](bsheet_core::ExtractError::FilingNotFound) from the filing search
    /// - [`DocumentUnavailable`](bsheet_core::ExtractError::DocumentUnavailable) or
    ///   [`StructuredDocumentMissing`](bsheet_core::ExtractError::StructuredDocumentMissing) from retrieval
    /// - [`Parse`](bsheet_core::ExtractError::Parse) for a malformed document
    #[instrument(skip(self, progress))]
    pub async fn extract(&self, ticker: &str, progress: &dyn ProgressSink) -> Result<BalanceSheet> {
        let ticker = Ticker::new(ticker)?;

        let identity = self.resolver.lookup(&ticker).await?;
        Phase::FilerResolved.notify(progress);

        let filing = self
            .locator
            .find_latest(&identity.filer_id, &self.document_types, self.lookback_days)
            .await?;
        Phase::FilingLocated.notify(progress);

        let document = self.retriever.fetch_and_extract(&filing.id).await?;
        Phase::DocumentRetrieved.notify(progress);

        let index = FactIndex::parse(&document.read()?)?;
        drop(document);
        Phase::FactsIndexed.notify(progress);

        let record = BalanceSheet {
            ticker: Some(ticker),
            filer_id: Some(identity.filer_id),
            filing_id: Some(filing.id),
            ..BalanceSheet::new(identity.entity_name, identity.industry)
        };
        let drafted = fill_figures(record, &index);
        Phase::ConceptsResolved.notify(progress);

        let sheet = reconcile(drafted);
        Phase::Reconciled.notify(progress);

        info!(
            entity = %sheet.entity_name,
            filed_on = %filing.filed_on,
            total_assets = sheet.total_assets,
            net_assets = sheet.net_assets,
            adjustments = sheet.adjustments.len(),
            "Extracted balance sheet"
        );
        Phase::Complete.notify(progress);
        Ok(sheet)
    }

    /// Extracts two balance sheets one after the other, for comparison.
    ///
    /// The two requests share nothing; the first failure is returned.
    /// Progress covers the first request in `[0, 0.5]` and the second in `[0.5, 1]`.
    ///
    /// # Errors
    /// Any error [`extract`](Self::extract) can return.
    pub async fn extract_pair(
        &self,
        first: &str,
        second: &str,
        progress: &dyn ProgressSink,
    ) -> Result<(BalanceSheet, BalanceSheet)> {
        let a = self
            .extract(
                first,
                &ScaledProgress {
                    inner: progress,
                    offset: 0.0,
                    scale: 0.5,
                },
            )
            .await?;
        let b = self
            .extract(
                second,
                &ScaledProgress {
                    inner: progress,
                    offset: 0.5,
                    scale: 0.5,
                },
            )
            .await?;
        Ok((a, b))
    }
}
