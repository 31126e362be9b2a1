//! HTTP fetch and payload decoding for the stats feed.

use crate::error::{IplError, Result};
use crate::storage::StatTable;
use crate::Season;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Substitute `{resource}` and `{season}` into the feed URL template.
pub fn expand_template(template: &str, resource: &str, season: Season) -> String {
    template
        .replace("{resource}", resource)
        .replace("{season}", &season.to_string())
}

pub fn default_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/csv;q=0.9, */*;q=0.1"),
    );
    h
}

/// GET `url` and return the body text. Non-2xx statuses are errors.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    debug!(url, "fetching feed");
    let body = client
        .get(url)
        .headers(default_headers())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Decode a feed body as either a JSON array of objects or CSV text.
///
/// JSON columns come from the first object; later objects missing a key get
/// a blank cell.
pub fn parse_payload(body: &str) -> Result<StatTable> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('[') {
        let items: Vec<Value> = serde_json::from_str(trimmed).map_err(|e| IplError::Upstream {
            message: format!("feed returned malformed JSON: {}", e),
        })?;
        let Some(first) = items.first() else {
            return Ok(StatTable::new(Vec::new(), Vec::new()));
        };
        let Value::Object(first) = first else {
            return Err(IplError::Upstream {
                message: "feed JSON must be an array of objects".to_string(),
            });
        };
        let headers: Vec<String> = first.keys().cloned().collect();

        let mut rows = Vec::with_capacity(items.len());
        for item in &items {
            let Value::Object(obj) = item else {
                return Err(IplError::Upstream {
                    message: "feed JSON must be an array of objects".to_string(),
                });
            };
            rows.push(
                headers
                    .iter()
                    .map(|h| obj.get(h).map(cell_text).unwrap_or_default())
                    .collect(),
            );
        }
        return Ok(StatTable::new(headers, rows));
    }

    if trimmed.starts_with('{') || trimmed.starts_with('<') {
        return Err(IplError::Upstream {
            message: "feed returned neither a JSON array nor CSV".to_string(),
        });
    }
    StatTable::from_csv(trimmed.as_bytes()).map_err(|e| IplError::Upstream {
        message: format!("feed returned malformed CSV: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_template() {
        let url = expand_template(
            "https://feed.example/{season}/{resource}.json",
            "purple-cap",
            Season::new(2024),
        );
        assert_eq!(url, "https://feed.example/2024/purple-cap.json");
    }

    #[test]
    fn test_default_headers_accept_json() {
        let headers = default_headers();
        assert!(headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json")));
    }

    #[test]
    fn test_parse_json_array() {
        let body = r#"[
            {"Team": "MI", "Played": 14, "NRR": "+1.142"},
            {"Team": "GT", "Played": 14, "NRR": null}
        ]"#;
        let table = parse_payload(body).unwrap();
        assert_eq!(table.rows.len(), 2);
        let records = table.to_records();
        assert_eq!(records[0]["Team"], "MI");
        assert_eq!(records[0]["Played"], "14");
        assert_eq!(records[1]["NRR"], "");
    }

    #[test]
    fn test_parse_csv_body() {
        let table = parse_payload("POS,Player,Wkts\n1,Prasidh Krishna,25\n").unwrap();
        assert_eq!(table.headers, vec!["POS", "Player", "Wkts"]);
        assert_eq!(table.rows[0][1], "Prasidh Krishna");
    }

    #[test]
    fn test_parse_rejects_html_and_objects() {
        assert!(matches!(
            parse_payload("<html>maintenance</html>"),
            Err(IplError::Upstream { .. })
        ));
        assert!(matches!(
            parse_payload(r#"{"error": "rate limited"}"#),
            Err(IplError::Upstream { .. })
        ));
        assert!(matches!(
            parse_payload("[1, 2, 3]"),
            Err(IplError::Upstream { .. })
        ));
    }

    #[test]
    fn test_empty_json_array() {
        assert!(parse_payload("[]").unwrap().is_empty());
    }
}
