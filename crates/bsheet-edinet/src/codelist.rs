//! EDINET code list.
//!
//! The code list is a ZIP archive holding one CSV file encoded in Shift_JIS.
//! Its first line is a download banner and its second line the header row.

use bsheet_core::{ExtractError, FilerId, FilerIdentity, Result, Ticker};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use tracing::{debug, warn};

const FILER_ID_COLUMN: &str = "ＥＤＩＮＥＴコード";
const NAME_COLUMN: &str = "提出者名";
const INDUSTRY_COLUMN: &str = "提出者業種";
const SECURITY_CODE_COLUMN: &str = "証券コード";

/// One registered filer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeListEntry {
    /// EDINET code, e.g. `E02144`.
    pub filer_id: FilerId,
    /// Registered name.
    pub entity_name: String,
    /// Registered industry.
    pub industry: String,
    /// Five-character security code, empty for unlisted filers.
    pub security_code: String,
}

impl From<&CodeListEntry> for FilerIdentity {
    fn from(entry: &CodeListEntry) -> Self {
        Self::new(
            entry.filer_id.clone(),
            entry.entity_name.clone(),
            entry.industry.clone(),
        )
    }
}

/// Parsed code list.
#[derive(Debug, Clone, Default)]
pub struct CodeList {
    entries: Vec<CodeListEntry>,
}

impl CodeList {
    /// Parses a code list archive.
    ///
    /// # Errors
    /// Returns [`ExtractError::CodeListUnavailable`] if the archive cannot be
    /// opened, holds no CSV file or the CSV lacks a required column.
    pub fn from_archive(bytes: &[u8]) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| unavailable(format!("Invalid code list archive: {e}")))?;

        let index = (0..archive.len())
            .find(|&i| {
                archive
                    .by_index(i)
                    .is_ok_and(|f| f.name().to_ascii_lowercase().ends_with(".csv"))
            })
            .ok_or_else(|| unavailable("No CSV found in code list archive"))?;

        let mut raw = Vec::new();
        archive
            .by_index(index)
            .and_then(|mut f| f.read_to_end(&mut raw).map_err(Into::into))
            .map_err(|e| unavailable(format!("Failed to read code list: {e}")))?;

        let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(&raw);
        if had_errors {
            warn!("Code list contains bytes that are not valid Shift_JIS");
        }
        Self::from_csv(&text)
    }

    /// Parses decoded CSV text, banner line included.
    ///
    /// # Errors
    /// Returns [`ExtractError::CodeListUnavailable`] if a required column is missing.
    pub fn from_csv(text: &str) -> Result<Self> {
        let body = text.split_once('\n').map_or("", |(_, rest)| rest);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(body.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| unavailable(format!("Failed to read code list header: {e}")))?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| unavailable(format!("Code list has no {name} column")))
        };
        let filer_col = column(FILER_ID_COLUMN)?;
        let name_col = column(NAME_COLUMN)?;
        let industry_col = column(INDUSTRY_COLUMN)?;
        let code_col = column(SECURITY_CODE_COLUMN)?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed code list row");
                    continue;
                }
            };
            let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();
            let filer_id = field(filer_col);
            if filer_id.is_empty() {
                continue;
            }
            entries.push(CodeListEntry {
                filer_id: FilerId::new(filer_id),
                entity_name: field(name_col),
                industry: field(industry_col),
                security_code: field(code_col),
            });
        }

        debug!(entries = entries.len(), "Parsed code list");
        Ok(Self { entries })
    }

    /// Finds the first entry whose security code starts with the ticker.
    #[must_use]
    pub fn lookup(&self, ticker: &Ticker) -> Option<&CodeListEntry> {
        self.entries.iter().find(|e| {
            !e.security_code.is_empty() && e.security_code.starts_with(ticker.as_str())
        })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn unavailable(detail: impl Into<String>) -> ExtractError {
    ExtractError::CodeListUnavailable(detail.into())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    pub(crate) const CSV: &str = "ダウンロード実行日,2024年06月20日現在,件数,3件\r\n\
ＥＤＩＮＥＴコード,提出者種別,上場区分,提出者名,提出者名（英字）,提出者業種,証券コード,提出者法人番号\r\n\
E00001,内国法人・組合,非上場,非上場株式会社,Unlisted Co.,サービス業,,1234567890123\r\n\
E02144,内国法人・組合,上場,トヨタ自動車株式会社,TOYOTA MOTOR CORPORATION,輸送用機器,72030,1180301018771\r\n\
E02166,内国法人・組合,上場,本田技研工業株式会社,HONDA MOTOR CO.，LTD.,輸送用機器,72670,5010401027815\r\n";

    pub(crate) fn archive(csv: &str) -> Vec<u8> {
        let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode(csv);
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("EdinetcodeDlInfo.csv", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(&encoded).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_parse_archive() {
        let list = CodeList::from_archive(&archive(CSV)).unwrap();
        assert_eq!(list.len(), 3);

        let toyota = list.lookup(&Ticker::new("7203").unwrap()).unwrap();
        assert_eq!(toyota.filer_id.as_str(), "E02144");
        assert_eq!(toyota.entity_name, "トヨタ自動車株式会社");
        assert_eq!(toyota.industry, "輸送用機器");

        let identity = FilerIdentity::from(toyota);
        assert_eq!(identity.filer_id, FilerId::new("E02144"));
    }

    #[test]
    fn test_unlisted_filers_never_match() {
        let list = CodeList::from_csv(CSV).unwrap();
        assert!(list.lookup(&Ticker::new("9999").unwrap()).is_none());
        assert_eq!(
            list.lookup(&Ticker::new("7267").unwrap()).unwrap().filer_id.as_str(),
            "E02166"
        );
    }

    #[test]
    fn test_first_prefix_match_wins() {
        let list = CodeList::from_csv(CSV).unwrap();
        assert_eq!(
            list.lookup(&Ticker::new("72").unwrap()).unwrap().filer_id.as_str(),
            "E02144"
        );
    }

    #[test]
    fn test_missing_column_fails() {
        let err = CodeList::from_csv("banner\nfoo,bar\n1,2\n").unwrap_err();
        assert!(matches!(err, ExtractError::CodeListUnavailable(_)));
    }

    #[test]
    fn test_archive_without_csv_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("readme.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"nothing here").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = CodeList::from_archive(&bytes).unwrap_err();
        assert!(matches!(err, ExtractError::CodeListUnavailable(_)));

        let err = CodeList::from_archive(b"not a zip").unwrap_err();
        assert!(matches!(err, ExtractError::CodeListUnavailable(_)));
    }
}
