//! Document search API payloads.

use bsheet_core::{DocumentType, FilerId, FilingId};
use serde::Deserialize;

/// Response of `documents.json?type=2`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DocumentListResponse {
    #[serde(default)]
    pub(crate) metadata: Option<Metadata>,
    #[serde(default)]
    pub(crate) results: Vec<DocumentEntry>,
}

/// Response metadata. The API reports some failures here with HTTP 200.
#[derive(Debug, Deserialize)]
pub(crate) struct Metadata {
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

/// One submitted document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentEntry {
    #[serde(rename = "docID")]
    pub(crate) doc_id: Option<String>,
    pub(crate) edinet_code: Option<String>,
    pub(crate) doc_type_code: Option<String>,
}

impl DocumentListResponse {
    /// Returns the API-level error message, if the response carries one.
    pub(crate) fn error(&self) -> Option<String> {
        let metadata = self.metadata.as_ref()?;
        match metadata.status.as_deref() {
            None | Some("200") => None,
            Some(status) => Some(format!(
                "status {status}: {}",
                metadata.message.as_deref().unwrap_or("")
            )),
        }
    }
}

/// Returns the first listed document from `filer` with one of `types`.
pub(crate) fn first_match(
    entries: &[DocumentEntry],
    filer: &FilerId,
    types: &[DocumentType],
) -> Option<(FilingId, DocumentType)> {
    entries.iter().find_map(|entry| {
        if entry.edinet_code.as_deref() != Some(filer.as_str()) {
            return None;
        }
        let document_type = DocumentType::from_code(entry.doc_type_code.as_deref()?)?;
        if !types.contains(&document_type) {
            return None;
        }
        let id = entry.doc_id.as_deref().filter(|id| !id.is_empty())?;
        Some((FilingId::new(id), document_type))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "metadata": {"title": "提出された書類を把握するためのAPI", "status": "200", "message": "OK",
                     "resultset": {"count": 4}},
        "results": [
            {"seqNumber": 1, "docID": "S100AAAA", "edinetCode": "E02144", "docTypeCode": "350",
             "filerName": "トヨタ自動車株式会社", "submitDateTime": "2024-06-18 09:00"},
            {"seqNumber": 2, "docID": "S100BBBB", "edinetCode": "E02166", "docTypeCode": "120",
             "filerName": "本田技研工業株式会社", "submitDateTime": "2024-06-18 10:00"},
            {"seqNumber": 3, "docID": "S100CCCC", "edinetCode": "E02144", "docTypeCode": "120",
             "filerName": "トヨタ自動車株式会社", "submitDateTime": "2024-06-18 15:00"},
            {"seqNumber": 4, "docID": "S100DDDD", "edinetCode": null, "docTypeCode": null,
             "filerName": null, "submitDateTime": "2024-06-18 16:00"}
        ]
    }"#;

    #[test]
    fn test_parse_and_match() {
        let response: DocumentListResponse = serde_json::from_str(RESPONSE).unwrap();
        assert!(response.error().is_none());
        assert_eq!(response.results.len(), 4);

        let (id, document_type) = first_match(
            &response.results,
            &FilerId::new("E02144"),
            DocumentType::DEFAULT,
        )
        .unwrap();
        assert_eq!(id.as_str(), "S100CCCC");
        assert_eq!(document_type, DocumentType::AnnualReport);
    }

    #[test]
    fn test_type_filter() {
        let response: DocumentListResponse = serde_json::from_str(RESPONSE).unwrap();
        assert!(
            first_match(
                &response.results,
                &FilerId::new("E02144"),
                &[DocumentType::QuarterlyReport],
            )
            .is_none()
        );
    }

    #[test]
    fn test_api_error_in_metadata() {
        let response: DocumentListResponse = serde_json::from_str(
            r#"{"metadata": {"status": "401", "message": "Access denied due to invalid subscription key."}}"#,
        )
        .unwrap();
        assert!(response.error().unwrap().contains("401"));
        assert!(response.results.is_empty());
    }
}
