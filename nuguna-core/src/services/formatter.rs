//! Korean natural-language rendering of query results
//!
//! Renderers are matched against the first row in registration order; the
//! first whose predicate holds renders the whole result set. Rows no
//! renderer recognises are dumped as JSON.

use serde_json::Value as JsonValue;

use crate::domain::row::value_to_string;
use crate::domain::ResultRow;

pub const NO_DATA_MESSAGE: &str = "데이터가 없습니다.";

/// A report shape: a predicate over the first row and a renderer for all rows
#[derive(Clone, Copy)]
pub struct ReportRenderer {
    pub name: &'static str,
    pub matches: fn(&ResultRow) -> bool,
    pub render: fn(&[ResultRow]) -> String,
}

impl std::fmt::Debug for ReportRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportRenderer")
            .field("name", &self.name)
            .finish()
    }
}

/// Visitor count per acquisition channel
pub const VISITOR_COUNT_REPORT: ReportRenderer = ReportRenderer {
    name: "visitor_count",
    matches: |row| row.contains_key("visitor_count"),
    render: |rows| {
        render_list(rows, "유입 채널별 방문자 수는 다음과 같습니다:", |row| {
            format!(
                "{} - 방문자 수: {}명",
                cell(row, "source_medium"),
                cell(row, "visitor_count")
            )
        })
    },
};

/// Donation conversion rate per acquisition channel
pub const CONVERSION_RATE_REPORT: ReportRenderer = ReportRenderer {
    name: "conversion_rate",
    matches: |row| row.contains_key("conversion_rate"),
    render: |rows| {
        render_list(rows, "유입 채널별 후원 전환율은 다음과 같습니다:", |row| {
            format!(
                "{} - 전환율: {}% (총 후원자 수: {})",
                cell(row, "source_medium"),
                cell(row, "conversion_rate"),
                cell(row, "total_donors")
            )
        })
    },
};

fn cell(row: &ResultRow, column: &str) -> String {
    value_to_string(row.get(column).unwrap_or(&JsonValue::Null))
}

fn render_list(rows: &[ResultRow], header: &str, line: impl Fn(&ResultRow) -> String) -> String {
    let mut out = String::from(header);
    for (i, row) in rows.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{}. {}", i + 1, line(row)));
    }
    out
}

#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    renderers: Vec<ReportRenderer>,
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        Self {
            renderers: vec![VISITOR_COUNT_REPORT, CONVERSION_RATE_REPORT],
        }
    }
}

impl ResponseFormatter {
    /// A formatter with no report shapes; everything is dumped as JSON
    pub fn empty() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    /// Register another report shape after the existing ones
    pub fn with_renderer(mut self, renderer: ReportRenderer) -> Self {
        self.renderers.push(renderer);
        self
    }

    pub fn format(&self, rows: &[ResultRow]) -> String {
        let Some(first) = rows.first() else {
            return NO_DATA_MESSAGE.to_string();
        };

        match self.renderers.iter().find(|r| (r.matches)(first)) {
            Some(renderer) => (renderer.render)(rows),
            None => serde_json::to_string(rows).unwrap_or_else(|_| format!("{:?}", rows)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: JsonValue) -> ResultRow {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("row must be an object"),
        }
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(ResponseFormatter::default().format(&[]), "데이터가 없습니다.");
    }

    #[test]
    fn test_visitor_count_report() {
        let rows = vec![
            row(json!({"source_medium": "Google", "visitor_count": 1200})),
            row(json!({"source_medium": "Facebook", "visitor_count": 900})),
        ];

        assert_eq!(
            ResponseFormatter::default().format(&rows),
            "유입 채널별 방문자 수는 다음과 같습니다:\n\
             1. Google - 방문자 수: 1200명\n\
             2. Facebook - 방문자 수: 900명"
        );
    }

    #[test]
    fn test_conversion_rate_report() {
        let rows = vec![row(json!({
            "source_medium": "Email",
            "total_donors": 1,
            "conversion_rate": 0.13
        }))];

        assert_eq!(
            ResponseFormatter::default().format(&rows),
            "유입 채널별 후원 전환율은 다음과 같습니다:\n\
             1. Email - 전환율: 0.13% (총 후원자 수: 1)"
        );
    }

    #[test]
    fn test_visitor_count_checked_before_conversion_rate() {
        // The conversion query also selects visitor_count
        let rows = vec![row(json!({
            "source_medium": "Google",
            "total_donors": 1,
            "visitor_count": 1200,
            "conversion_rate": 0.08
        }))];

        let out = ResponseFormatter::default().format(&rows);
        assert!(out.starts_with("유입 채널별 방문자 수는 다음과 같습니다:"));
    }

    #[test]
    fn test_only_first_row_decides_the_shape() {
        let rows = vec![
            row(json!({"page": "/home"})),
            row(json!({"source_medium": "Google", "visitor_count": 1})),
        ];

        assert_eq!(
            ResponseFormatter::default().format(&rows),
            r#"[{"page":"/home"},{"source_medium":"Google","visitor_count":1}]"#
        );
    }

    #[test]
    fn test_missing_columns_render_as_null() {
        let rows = vec![row(json!({"visitor_count": 5}))];

        assert_eq!(
            ResponseFormatter::default().format(&rows),
            "유입 채널별 방문자 수는 다음과 같습니다:\n1. NULL - 방문자 수: 5명"
        );
    }

    #[test]
    fn test_registered_renderer_extends_shapes() {
        let page_views = ReportRenderer {
            name: "page_views",
            matches: |row| row.contains_key("page_views"),
            render: |rows| format!("{} pages", rows.len()),
        };
        let formatter = ResponseFormatter::default().with_renderer(page_views);

        let rows = vec![row(json!({"page_views": 3})), row(json!({"page_views": 4}))];
        assert_eq!(formatter.format(&rows), "2 pages");
    }

    #[test]
    fn test_empty_formatter_dumps_json() {
        let rows = vec![row(json!({"source_medium": "Google", "visitor_count": 1}))];
        assert_eq!(
            ResponseFormatter::empty().format(&rows),
            r#"[{"source_medium":"Google","visitor_count":1}]"#
        );
    }
}
