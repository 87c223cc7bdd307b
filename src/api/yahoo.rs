// ============================================================================
// API Client : Yahoo Finance
// ============================================================================
// Récupère le prix spot des cryptos dans la devise fiat (ex: BTC-USD)
//
// CONCEPTS RUST AVANCÉS :
// 1. async/await : programmation asynchrone (non-bloquante)
// 2. Result<T, E> : gestion d'erreurs avec contexte
// 3. Serde : désérialisation JSON automatique
// ============================================================================

use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::models::ExchangeRates;

// ============================================================================
// Structures pour parser la réponse JSON de Yahoo Finance
// ============================================================================
// On ne garde que les métadonnées : le prix du marché suffit pour la liste
// ============================================================================

/// Réponse complète de l'API Yahoo Finance
#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Meta,
}

/// Métadonnées du symbole
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]  // Convertit automatiquement snake_case -> camelCase
struct Meta {
    symbol: String,
    regular_market_price: Option<f64>,
}

// ============================================================================
// Fonctions publiques de l'API
// ============================================================================

/// Récupère le prix d'une unité de `currency_code` dans la devise `fiat_code`
///
/// # Arguments
/// * `client` - Client HTTP partagé
/// * `currency_code` - Code crypto (ex: "BTC")
/// * `fiat_code` - Code ISO fiat (ex: "USD")
///
/// CONCEPT RUST : #[instrument]
/// - Macro tracing qui ajoute automatiquement un span
/// - Tous les logs à l'intérieur auront le contexte currency + fiat
#[instrument(skip(client))]
pub async fn fetch_spot_price(client: &reqwest::Client, currency_code: &str, fiat_code: &str) -> Result<Decimal> {
    let url = build_yahoo_url(currency_code, fiat_code);
    debug!(url = %url, "Built Yahoo Finance API URL");

    let response = client
        .get(&url)
        .send()
        .await
        .context("Échec de la requête HTTP vers Yahoo Finance")?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, "Yahoo Finance returned error status");
        anyhow::bail!("Yahoo Finance a retourné une erreur : HTTP {}", status);
    }

    let yahoo_response: YahooResponse = response
        .json()
        .await
        .context("Échec du parsing JSON de la réponse Yahoo")?;

    parse_spot_price(yahoo_response)
}

/// Récupère les taux de toutes les devises demandées
///
/// Une devise en échec est ignorée (warning) : les autres taux restent utiles.
/// Échoue seulement si aucun taux n'a pu être récupéré.
#[instrument(skip(currency_codes), fields(count = currency_codes.len()))]
pub async fn fetch_exchange_rates(currency_codes: &[String], fiat_code: &str) -> Result<ExchangeRates> {
    // Ajout d'un User-Agent pour éviter le blocage par Yahoo
    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()
        .context("Échec de la création du client HTTP")?;

    let mut rates = ExchangeRates::new();

    for (i, code) in currency_codes.iter().enumerate() {
        match fetch_spot_price(&client, code, fiat_code).await {
            Ok(price) => {
                debug!(currency = %code, %price, "Spot price fetched");
                rates.set_rate(code, price);
            }
            Err(e) => {
                warn!(currency = %code, error = ?e, "Failed to fetch spot price");
            }
        }

        // Petit délai entre les requêtes (rate limiting)
        if i + 1 < currency_codes.len() {
            tokio::time::sleep(tokio::time::Duration::from_millis(250)).await;
        }
    }

    if rates.is_empty() && !currency_codes.is_empty() {
        anyhow::bail!("Aucun taux récupéré pour {} devise(s)", currency_codes.len());
    }

    rates.updated_at = Some(Utc::now());
    info!(rates = rates.rates.len(), "Exchange rates fetched");
    Ok(rates)
}

/// Construit l'URL de l'API Yahoo Finance (ex: .../chart/BTC-USD?range=1d)
fn build_yahoo_url(currency_code: &str, fiat_code: &str) -> String {
    format!(
        "https://query1.finance.yahoo.com/v8/finance/chart/{}-{}?interval=1d&range=1d",
        currency_code.to_uppercase(),
        fiat_code.to_uppercase()
    )
}

/// Extrait le prix du marché de la réponse Yahoo
///
/// CONCEPT RUST : f64 -> Decimal
/// - Yahoo renvoie un flottant, on le convertit une seule fois ici
/// - Tous les calculs suivants se font en Decimal
fn parse_spot_price(yahoo_response: YahooResponse) -> Result<Decimal> {
    if let Some(api_error) = yahoo_response.chart.error {
        anyhow::bail!("Yahoo Finance a retourné une erreur : {}", api_error);
    }

    let result = yahoo_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .context("Aucune donnée retournée par Yahoo Finance")?;

    let price = result
        .meta
        .regular_market_price
        .with_context(|| format!("Pas de prix de marché pour {}", result.meta.symbol))?;

    Decimal::from_f64(price).with_context(|| format!("Prix invalide pour {} : {}", result.meta.symbol, price))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_yahoo_url() {
        let url = build_yahoo_url("btc", "usd");
        assert!(url.contains("/chart/BTC-USD?"));
        assert!(url.contains("yahoo.com"));
    }

    #[test]
    fn test_parse_spot_price() {
        let json = r#"{ "chart": { "result": [
            { "meta": { "symbol": "BTC-USD", "regularMarketPrice": 65000.5 } }
        ], "error": null } }"#;
        let response: YahooResponse = serde_json::from_str(json).unwrap();

        let price = parse_spot_price(response).unwrap();
        assert_eq!(price, Decimal::from_f64(65000.5).unwrap());
    }

    #[test]
    fn test_parse_spot_price_errors() {
        let not_found = r#"{ "chart": { "result": null,
            "error": { "code": "Not Found", "description": "No data found" } } }"#;
        let response: YahooResponse = serde_json::from_str(not_found).unwrap();
        assert!(parse_spot_price(response).is_err());

        let no_price = r#"{ "chart": { "result": [ { "meta": { "symbol": "XYZ-USD" } } ], "error": null } }"#;
        let response: YahooResponse = serde_json::from_str(no_price).unwrap();
        assert!(parse_spot_price(response).is_err());
    }

    // Test async nécessite tokio test runtime
    // Appel réel (peut échouer si pas de connexion) : on ne vérifie que la forme
    #[tokio::test]
    async fn test_fetch_exchange_rates() {
        let codes = vec!["BTC".to_string()];
        match fetch_exchange_rates(&codes, "USD").await {
            Ok(rates) => {
                assert!(rates.rate("BTC").is_some());
                assert!(rates.updated_at.is_some());
            }
            Err(e) => {
                println!("⚠ Test skippé (pas de connexion?) : {}", e);
            }
        }
    }
}
