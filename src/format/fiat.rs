// ============================================================================
// Montants fiat
// ============================================================================
// Symboles des devises fiat et conversion crypto -> fiat
// ============================================================================

use rust_decimal::Decimal;

use crate::error::RowResult;
use crate::format::amount::DIVIDE_PRECISION;
use crate::format::exact::ExactAmount;

/// Symbole d'une devise fiat ("iso:USD" ou "USD" -> "$")
///
/// Retourne None pour une devise inconnue (l'appelant affiche alors le code).
pub fn fiat_symbol(fiat_code: &str) -> Option<&'static str> {
    let code = fiat_code.strip_prefix("iso:").unwrap_or(fiat_code);
    let symbol = match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" | "NZD" | "MXN" | "HKD" | "SGD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "INR" => "₹",
        "RUB" => "₽",
        "BRL" => "R$",
        "CHF" => "CHF",
        "PLN" => "zł",
        "TRY" => "₺",
        "UAH" => "₴",
        _ => return None,
    };
    Some(symbol)
}

/// Valeur fiat d'un solde natif
///
/// # Arguments
/// * `native_balance` - Solde en unités natives
/// * `exchange_multiplier` - Multiplicateur de l'unité d'échange (1 BTC, 1 ETH)
/// * `rate` - Prix d'une unité d'échange en fiat
///
/// Le produit reste exact : aucun plafond, même pour un solde énorme.
pub fn fiat_from_native(native_balance: &str, exchange_multiplier: &str, rate: Decimal) -> RowResult<ExactAmount> {
    let native = ExactAmount::parse(native_balance)?;
    let multiplier = ExactAmount::parse(exchange_multiplier)?;

    let crypto_amount = native.div_truncate(&multiplier, DIVIDE_PRECISION)?;
    Ok(crypto_amount.mul(&ExactAmount::from_decimal(rate)))
}
