//! CSV rendering of result sets.
//!
//! Layout: header row, one row per record (1-based ordinal first), a blank
//! separator line, then a summary block (total, success, failed, success
//! rate, export time, tool label).

use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::domain::entities::{
    BatchRecord, CsvLocale, LookupResult, ShortenResult, Summary, UpdateResult,
};
use crate::domain::errors::ExportError;

/// UTF-8 byte-order mark prepended to native-locale exports.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Timestamp format used inside exported rows.
pub const EXPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A record type that knows its CSV columns.
pub trait CsvRecord: BatchRecord {
    /// File-name stem, e.g. `sv-link-results`.
    const FILE_STEM: &'static str;

    fn headers(locale: CsvLocale) -> &'static [&'static str];

    fn tool_label(locale: CsvLocale) -> &'static str;

    fn cells(&self, ordinal: usize, locale: CsvLocale, export_time: &str) -> Vec<String>;
}

impl CsvRecord for ShortenResult {
    const FILE_STEM: &'static str = "sv-link-results";

    fn headers(locale: CsvLocale) -> &'static [&'static str] {
        match locale {
            CsvLocale::Native => &["序號", "原始網址", "短網址", "狀態", "處理時間"],
            CsvLocale::English => &["No", "Original URL", "Short URL", "Status", "Process Time"],
        }
    }

    fn tool_label(locale: CsvLocale) -> &'static str {
        match locale {
            CsvLocale::Native => "StreetVoice sv.link 批次短網址生成器",
            CsvLocale::English => "StreetVoice sv.link Batch Generator",
        }
    }

    fn cells(&self, ordinal: usize, locale: CsvLocale, export_time: &str) -> Vec<String> {
        vec![
            ordinal.to_string(),
            self.original.clone(),
            self.short.clone(),
            locale.status_label(self.success).to_string(),
            export_time.to_string(),
        ]
    }
}

impl CsvRecord for LookupResult {
    const FILE_STEM: &'static str = "sv-link-lookup";

    fn headers(locale: CsvLocale) -> &'static [&'static str] {
        match locale {
            CsvLocale::Native => &["序號", "短網址", "點擊次數", "目標網址", "建立時間", "狀態"],
            CsvLocale::English => &["No", "Short URL", "Views", "Target URL", "Created", "Status"],
        }
    }

    fn tool_label(locale: CsvLocale) -> &'static str {
        match locale {
            CsvLocale::Native => "StreetVoice sv.link 批次反查",
            CsvLocale::English => "StreetVoice sv.link Batch Lookup",
        }
    }

    fn cells(&self, ordinal: usize, locale: CsvLocale, _export_time: &str) -> Vec<String> {
        vec![
            ordinal.to_string(),
            self.link.clone(),
            self.views.to_string(),
            self.target.clone(),
            self.created.clone(),
            locale.status_label(self.success).to_string(),
        ]
    }
}

impl CsvRecord for UpdateResult {
    const FILE_STEM: &'static str = "sv-link-update";

    fn headers(locale: CsvLocale) -> &'static [&'static str] {
        match locale {
            CsvLocale::Native => &["序號", "短網址", "新目標網址", "狀態", "訊息", "更新時間"],
            CsvLocale::English => &[
                "No",
                "Short URL",
                "New Target URL",
                "Status",
                "Message",
                "Update Time",
            ],
        }
    }

    fn tool_label(locale: CsvLocale) -> &'static str {
        match locale {
            CsvLocale::Native => "StreetVoice sv.link 批次修改",
            CsvLocale::English => "StreetVoice sv.link Batch Update",
        }
    }

    fn cells(&self, ordinal: usize, locale: CsvLocale, export_time: &str) -> Vec<String> {
        vec![
            ordinal.to_string(),
            self.short_url.clone().unwrap_or_default(),
            self.new_target.clone().unwrap_or_default(),
            locale.status_label(self.success).to_string(),
            self.note().to_string(),
            export_time.to_string(),
        ]
    }
}

struct SummaryLabels {
    title: &'static str,
    total: &'static str,
    success: &'static str,
    failed: &'static str,
    rate: &'static str,
    export_time: &'static str,
    tool: &'static str,
}

fn summary_labels(locale: CsvLocale) -> SummaryLabels {
    match locale {
        CsvLocale::Native => SummaryLabels {
            title: "=== 處理摘要 ===",
            total: "總數量",
            success: "成功數量",
            failed: "失敗數量",
            rate: "成功率",
            export_time: "匯出時間",
            tool: "工具",
        },
        CsvLocale::English => SummaryLabels {
            title: "=== Summary ===",
            total: "Total",
            success: "Success",
            failed: "Failed",
            rate: "Success Rate",
            export_time: "Export Time",
            tool: "Tool",
        },
    }
}

/// Formats a success rate with one decimal, `0%` when undefined.
pub fn format_success_rate(summary: &Summary) -> String {
    match summary.success_rate() {
        Some(rate) => format!("{rate:.1}%"),
        None => "0%".to_string(),
    }
}

fn quote_style(locale: CsvLocale) -> QuoteStyle {
    match locale {
        CsvLocale::Native => QuoteStyle::Always,
        CsvLocale::English => QuoteStyle::Necessary,
    }
}

fn csv_writer(locale: CsvLocale, out: Vec<u8>) -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .flexible(true)
        .quote_style(quote_style(locale))
        .terminator(Terminator::CRLF)
        .from_writer(out)
}

fn csv_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Csv(err.to_string())
}

/// Renders `records` into CSV bytes for `locale`.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if the writer fails.
pub fn render_csv<R: CsvRecord>(
    records: &[R],
    locale: CsvLocale,
    exported_at: NaiveDateTime,
) -> Result<Vec<u8>, ExportError> {
    let export_time = exported_at.format(EXPORT_TIME_FORMAT).to_string();
    let summary = Summary::from_records(records);
    let labels = summary_labels(locale);

    let mut out = Vec::new();
    if locale == CsvLocale::Native {
        out.extend_from_slice(UTF8_BOM);
    }

    let mut writer = csv_writer(locale, out);

    writer.write_record(R::headers(locale)).map_err(csv_error)?;

    for (index, record) in records.iter().enumerate() {
        writer
            .write_record(record.cells(index + 1, locale, &export_time))
            .map_err(csv_error)?;
    }

    // a zero-field record would be written as `""`, so the separator goes in raw
    let mut out = writer.into_inner().map_err(csv_error)?;
    out.extend_from_slice(b"\r\n");
    let mut writer = csv_writer(locale, out);

    let rows = [
        vec![labels.title.to_string()],
        vec![labels.total.to_string(), summary.total.to_string()],
        vec![labels.success.to_string(), summary.success.to_string()],
        vec![labels.failed.to_string(), summary.failed.to_string()],
        vec![labels.rate.to_string(), format_success_rate(&summary)],
        vec![labels.export_time.to_string(), export_time.clone()],
        vec![labels.tool.to_string(), R::tool_label(locale).to_string()],
    ];
    for row in rows {
        writer.write_record(&row).map_err(csv_error)?;
    }

    writer.into_inner().map_err(csv_error)
}

/// Builds the timestamped export file name for a record type.
pub fn csv_filename<R: CsvRecord>(exported_at: NaiveDateTime) -> String {
    format!("{}_{}.csv", R::FILE_STEM, exported_at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LinkChange, LinkIndexEntry};
    use crate::domain::errors::ItemError;
    use chrono::NaiveDate;
    use csv::ReaderBuilder;

    fn exported_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn sample() -> Vec<ShortenResult> {
        vec![
            ShortenResult::created("https://a.com/1", "https://sv.link/a"),
            ShortenResult::created("https://a.com/2?x=1,2", "https://sv.link/b"),
            ShortenResult::failed("https://a.com/\"3\"", &ItemError::rejected(500)),
            ShortenResult::created("https://a.com/4\nnext", "https://sv.link/d"),
        ]
    }

    fn parse_rows(bytes: &[u8]) -> Vec<Vec<String>> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_data_rows_carry_ordinals_in_order() {
        let bytes = render_csv(&sample(), CsvLocale::English, exported_at()).unwrap();
        let rows = parse_rows(&bytes);

        assert_eq!(rows[0], ShortenResult::headers(CsvLocale::English));
        let ordinals: Vec<&str> = rows[1..=4].iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ordinals, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_embedded_delimiters_survive() {
        let bytes = render_csv(&sample(), CsvLocale::English, exported_at()).unwrap();
        let rows = parse_rows(&bytes);

        assert_eq!(rows[2][1], "https://a.com/2?x=1,2");
        assert_eq!(rows[3][1], "https://a.com/\"3\"");
        assert_eq!(rows[4][1], "https://a.com/4\nnext");
        assert_eq!(rows[3][3], "Failed");
        assert_eq!(rows[3][2], "HTTP 500");
    }

    #[test]
    fn test_summary_block() {
        let bytes = render_csv(&sample(), CsvLocale::English, exported_at()).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        let rows = parse_rows(&bytes);

        // header + 4 data rows, then a blank line before the summary
        assert!(text.contains("2024-05-01 12:30:00\r\n\r\n=== Summary ===\r\n"));
        let summary = &rows[5..];
        assert_eq!(summary[0], vec!["=== Summary ==="]);
        assert_eq!(summary[1], vec!["Total", "4"]);
        assert_eq!(summary[2], vec!["Success", "3"]);
        assert_eq!(summary[3], vec!["Failed", "1"]);
        assert_eq!(summary[4], vec!["Success Rate", "75.0%"]);
        assert_eq!(summary[5], vec!["Export Time", "2024-05-01 12:30:00"]);
        assert_eq!(summary[6], vec!["Tool", "StreetVoice sv.link Batch Generator"]);
    }

    #[test]
    fn test_english_has_no_bom() {
        let bytes = render_csv(&sample(), CsvLocale::English, exported_at()).unwrap();
        assert!(bytes.starts_with(b"No,Original URL"));
    }

    #[test]
    fn test_native_has_bom_and_quotes_everything() {
        let bytes = render_csv(&sample(), CsvLocale::Native, exported_at()).unwrap();

        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.starts_with("\"序號\",\"原始網址\",\"短網址\",\"狀態\",\"處理時間\"\r\n"));
        assert!(text.contains("\"1\",\"https://a.com/1\",\"https://sv.link/a\",\"成功\""));
        assert!(text.contains("\"成功率\",\"75.0%\""));
    }

    #[test]
    fn test_native_summary_follows_one_blank_line() {
        let bytes = render_csv(&sample(), CsvLocale::Native, exported_at()).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();

        assert!(!text.contains('\u{feff}'));
        assert!(text.contains("\r\n\r\n\"=== 處理摘要 ===\"\r\n"));
        assert!(!text.contains("\"\"\r\n"));
    }

    #[test]
    fn test_lookup_columns() {
        let entry = LinkIndexEntry {
            visit_count: 10,
            target: "https://a.com".to_string(),
            created_at: "2024-01-01".to_string(),
            ..Default::default()
        };
        let records = vec![
            LookupResult::found("https://sv.link/xyz", &entry),
            LookupResult::not_found("https://sv.link/missing"),
        ];

        let rows = parse_rows(&render_csv(&records, CsvLocale::English, exported_at()).unwrap());

        assert_eq!(
            rows[1],
            vec!["1", "https://sv.link/xyz", "10", "https://a.com", "2024-01-01", "Success"]
        );
        assert_eq!(rows[2][2], "NOT_FOUND");
        assert_eq!(rows[2][5], "Failed");
    }

    #[test]
    fn test_update_message_column() {
        let change = LinkChange {
            link_id: None,
            short_url: Some("https://sv.link/a".to_string()),
            new_target: Some("https://new.com".to_string()),
        };
        let records = vec![
            UpdateResult::updated(&change),
            UpdateResult::failed(&change, &ItemError::MissingParameter),
        ];

        let rows = parse_rows(&render_csv(&records, CsvLocale::English, exported_at()).unwrap());

        assert_eq!(rows[1][4], "Updated");
        assert_eq!(rows[2][4], "Missing required parameter");
        assert_eq!(rows.last().unwrap()[1], "StreetVoice sv.link Batch Update");
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            csv_filename::<LookupResult>(exported_at()),
            "sv-link-lookup_20240501_123000.csv"
        );
    }

    #[test]
    fn test_success_rate_of_empty_summary() {
        assert_eq!(format_success_rate(&Summary::default()), "0%");
    }
}
