use crate::error::BrowserError;

/// Parse a displayed price such as `"Rs. 1,500"` into `1500`.
///
/// Strips the `Rs.` prefix and `,` separators, trims, then parses an integer.
/// Anything that still fails to parse yields 0.
pub fn parse_price(text: &str) -> i64 {
    text.replace("Rs.", "")
        .replace(',', "")
        .trim()
        .parse()
        .unwrap_or(0)
}

/// Parse a cart quantity cell. Unlike prices, a non-integer is an error.
pub fn parse_quantity(text: &str) -> Result<i64, BrowserError> {
    text.trim()
        .parse()
        .map_err(|_| BrowserError::UnexpectedText {
            context: "cart quantity".into(),
            text: text.to_string(),
        })
}

/// Whether `price × quantity` equals the displayed line total.
pub fn line_total_matches(
    price_text: &str,
    quantity_text: &str,
    total_text: &str,
) -> Result<bool, BrowserError> {
    let quantity = parse_quantity(quantity_text)?;
    Ok(parse_price(price_text) * quantity == parse_price(total_text))
}
