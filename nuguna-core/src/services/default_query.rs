//! Rule-based SQL for when the text-to-SQL model gives no usable answer

use tracing::info;

/// Keyword for visitor-count questions ("visitor count")
pub const VISITOR_COUNT_KEYWORD: &str = "방문자 수";
/// Keyword for donation conversion questions ("donation conversion rate")
pub const CONVERSION_RATE_KEYWORD: &str = "후원 전환율";

pub const VISITOR_COUNT_QUERY: &str = "SELECT source_medium, SUM(visitor_count) AS visitor_count
FROM source_report
GROUP BY source_medium
ORDER BY visitor_count DESC
LIMIT 10";

pub const CONVERSION_RATE_QUERY: &str = "SELECT source_medium,
       COUNT(user_id) AS total_donors,
       SUM(visitor_count) AS visitor_count,
       ROUND((COUNT(user_id) * 1.0 / SUM(visitor_count)) * 100, 2) AS conversion_rate
FROM source_report
GROUP BY source_medium
ORDER BY conversion_rate DESC
LIMIT 10";

pub const FALLBACK_QUERY: &str = "SELECT * FROM source_report LIMIT 10";

/// Pick a fixed query by keyword; the first matching rule wins
pub fn default_query(question: &str) -> String {
    info!("Generating default SQL query");
    let sql = if question.contains(VISITOR_COUNT_KEYWORD) {
        VISITOR_COUNT_QUERY
    } else if question.contains(CONVERSION_RATE_KEYWORD) {
        CONVERSION_RATE_QUERY
    } else {
        FALLBACK_QUERY
    };
    sql.to_string()
}
