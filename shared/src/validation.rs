//! Validation utilities for the scrap ERP
//!
//! Includes India-specific validations for GST invoicing compliance.

use rust_decimal::Decimal;

use crate::models::Unit;

const GSTIN_CHARSET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// ============================================================================
// Scrap Entry Validations
// ============================================================================

/// Mandatory fields of a manual scrap entry that are still missing.
/// An empty result means the entry may be submitted.
pub fn missing_entry_fields(
    unit: Option<Unit>,
    warehouse_id: Option<i64>,
    reason: Option<&str>,
) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if unit.is_none() {
        missing.push("Unit");
    }
    if warehouse_id.is_none() {
        missing.push("Warehouse");
    }
    if reason.map_or(true, |r| r.trim().is_empty()) {
        missing.push("Reason");
    }
    missing
}

/// A converted weight must be positive before an entry can be saved
pub fn validate_positive_weight(weight_kg: f64) -> Result<(), &'static str> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err("Converted weight must be greater than zero");
    }
    Ok(())
}

/// Discount, GST and TCS percentages
pub fn validate_percentage(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

// ============================================================================
// India-Specific Validations
// ============================================================================

/// Validate GSTIN (GST identification number)
/// Format: 2-digit state code, 10-character PAN, entity number, 'Z', checksum
/// e.g. 27AAPFU0939F1ZV
pub fn validate_gstin(gstin: &str) -> Result<(), &'static str> {
    let gstin = gstin.trim().to_ascii_uppercase();
    let bytes = gstin.as_bytes();

    if bytes.len() != 15 || !gstin.is_ascii() {
        return Err("GSTIN must be 15 characters");
    }
    if gst_state_code(&gstin).is_none() {
        return Err("Invalid state code in GSTIN");
    }
    validate_pan(&gstin[2..12]).map_err(|_| "Invalid PAN in GSTIN")?;
    if !bytes[12].is_ascii_alphanumeric() || bytes[12] == b'0' {
        return Err("Invalid entity number in GSTIN");
    }
    if bytes[13] != b'Z' {
        return Err("GSTIN 14th character must be 'Z'");
    }
    if gstin_check_char(&bytes[..14]) != Some(bytes[14]) {
        return Err("Invalid GSTIN checksum");
    }
    Ok(())
}

/// State code prefix of a GSTIN, e.g. `27` for Maharashtra
pub fn gst_state_code(gstin: &str) -> Option<u32> {
    let prefix = gstin.trim().get(..2)?;
    if !prefix.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let code: u32 = prefix.parse().ok()?;
    match code {
        1..=38 | 97 | 99 => Some(code),
        _ => None,
    }
}

/// Validate PAN format: 5 letters, 4 digits, 1 letter (e.g. AAPFU0939F)
pub fn validate_pan(pan: &str) -> Result<(), &'static str> {
    let bytes = pan.trim().as_bytes();
    if bytes.len() != 10 {
        return Err("PAN must be 10 characters");
    }
    let valid = bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase();
    if !valid {
        return Err("PAN must be in format AAAAA9999A");
    }
    Ok(())
}

/// HSN/SAC codes are 4, 6 or 8 digits
pub fn validate_hsn_code(code: &str) -> Result<(), &'static str> {
    let code = code.trim();
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("HSN code must be numeric");
    }
    match code.len() {
        4 | 6 | 8 => Ok(()),
        _ => Err("HSN code must be 4, 6 or 8 digits"),
    }
}

/// Indian PIN code: 6 digits, not starting with 0
pub fn validate_pincode(pincode: &str) -> Result<(), &'static str> {
    let pincode = pincode.trim();
    if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err("PIN code must be 6 digits");
    }
    if pincode.starts_with('0') {
        return Err("PIN code cannot start with 0");
    }
    Ok(())
}

/// Mod-36 check character over the first 14 characters
fn gstin_check_char(body: &[u8]) -> Option<u8> {
    let mut sum = 0u32;
    for (i, c) in body.iter().enumerate() {
        let value = GSTIN_CHARSET.iter().position(|x| x == c)? as u32;
        let product = value * if i % 2 == 0 { 1 } else { 2 };
        sum += product / 36 + product % 36;
    }
    Some(GSTIN_CHARSET[((36 - sum % 36) % 36) as usize])
}
