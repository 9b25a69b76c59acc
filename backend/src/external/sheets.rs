//! Spreadsheet API client for the stock master sheet
//!
//! Each retail location owns one tab of a single spreadsheet document with a
//! fixed four-column layout starting at row 2: name, identification number,
//! price, stock. Reads feed the stock sync; order settlement writes the new
//! stock back into column D.

use base64::Engine;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;

use crate::config::SheetsConfig;
use crate::error::{AppError, AppResult};
use shared::models::SheetStockRow;

/// Spreadsheet API client
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    api_base: String,
    spreadsheet_id: String,
    token: String,
}

/// Spreadsheet metadata response
#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// Values range response
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    /// Create a new SheetsClient from configuration
    ///
    /// The service token may arrive base64-encoded (some deployment
    /// environments cannot hold the raw value); an encoded token is decoded
    /// transparently.
    pub fn new(config: &SheetsConfig) -> AppResult<Self> {
        if config.spreadsheet_id.is_empty() {
            return Err(AppError::Configuration(
                "sheets.spreadsheet_id is not set".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            token: decode_service_token(&config.service_token),
        })
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(spreadsheet_id: String, api_base: String, token: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
            spreadsheet_id,
            token,
        }
    }

    /// List the tab titles of the spreadsheet document
    pub async fn list_tabs(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/spreadsheets/{}", self.api_base, self.spreadsheet_id);
        let response: SpreadsheetResponse = self.get_json(&url).await?;
        Ok(response
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    /// Fetch the stock rows of one tab (range A2:D)
    pub async fn fetch_rows(&self, tab: &str) -> AppResult<Vec<SheetStockRow>> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}!A2:D",
            self.api_base, self.spreadsheet_id, tab
        );
        let response: ValuesResponse = self.get_json(&url).await?;
        Ok(parse_rows(&response.values))
    }

    /// Push a new stock value into column D of the row whose identification
    /// number matches
    ///
    /// Returns false when no row carries the identification number; the
    /// caller decides whether that is worth more than a log line.
    pub async fn update_stock(
        &self,
        tab: &str,
        identification_number: &str,
        new_stock: i32,
    ) -> AppResult<bool> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}!A2:D",
            self.api_base, self.spreadsheet_id, tab
        );
        let response: ValuesResponse = self.get_json(&url).await?;

        // Data starts at sheet row 2
        let row_number = response
            .values
            .iter()
            .position(|row| row.get(1).map(String::as_str) == Some(identification_number))
            .map(|idx| idx + 2);

        let Some(row_number) = row_number else {
            return Ok(false);
        };

        let update_url = format!(
            "{}/spreadsheets/{}/values/{}!D{}?valueInputOption=RAW",
            self.api_base, self.spreadsheet_id, tab, row_number
        );
        let body = json!({ "values": [[new_stock.to_string()]] });

        let response = self
            .client
            .put(&update_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::SheetsApi(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SheetsApi(format!("{} - {}", status, body)));
        }

        Ok(true)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| AppError::SheetsApi(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SheetsApi(format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::SheetsApi(format!("failed to parse response: {}", e)))
    }
}

/// Decode a possibly base64-encoded service token
fn decode_service_token(raw: &str) -> String {
    match base64::engine::general_purpose::STANDARD.decode(raw.trim()) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(decoded) => decoded.trim().to_string(),
            Err(_) => raw.trim().to_string(),
        },
        Err(_) => raw.trim().to_string(),
    }
}

/// Parse raw cell rows into stock rows
///
/// Cells are tolerated missing or malformed: names and identifiers default
/// to empty, prices to zero, and stock counts to zero (the sheet is hand
/// edited and rows routinely carry "null" or blanks).
pub fn parse_rows(values: &[Vec<String>]) -> Vec<SheetStockRow> {
    values
        .iter()
        .map(|row| SheetStockRow {
            name: row.first().cloned().unwrap_or_default(),
            identification_number: row.get(1).cloned().unwrap_or_default(),
            price: row
                .get(2)
                .and_then(|c| Decimal::from_str(c.trim()).ok())
                .unwrap_or(Decimal::ZERO),
            in_stock: row.get(3).map(|c| parse_stock_cell(c)).unwrap_or(0),
        })
        .collect()
}

/// Parse a stock cell, treating blanks and null markers as zero
fn parse_stock_cell(cell: &str) -> i32 {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "None" {
        return 0;
    }
    trimmed.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn parses_complete_rows() {
        let values = vec![row(&["Agege Bread", "AGB-01", "750.00", "40"])];
        let rows = parse_rows(&values);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Agege Bread");
        assert_eq!(rows[0].identification_number, "AGB-01");
        assert_eq!(rows[0].price, Decimal::from_str("750.00").unwrap());
        assert_eq!(rows[0].in_stock, 40);
    }

    #[test]
    fn short_and_malformed_rows_default() {
        let values = vec![
            row(&["Sardine Roll"]),
            row(&["Meat Pie", "MP-02", "not-a-price", "null"]),
            row(&["Coconut Bread", "CB-03", "500", ""]),
        ];
        let rows = parse_rows(&values);
        assert_eq!(rows[0].identification_number, "");
        assert_eq!(rows[0].in_stock, 0);
        assert_eq!(rows[1].price, Decimal::ZERO);
        assert_eq!(rows[1].in_stock, 0);
        assert_eq!(rows[2].in_stock, 0);
    }

    #[test]
    fn service_token_base64_round_trip() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("secret-token");
        assert_eq!(decode_service_token(&encoded), "secret-token");
        // Tokens that are not valid base64 pass through untouched
        assert_eq!(decode_service_token("raw_token!"), "raw_token!");
    }
}
