//! Common regex patterns for invoice field extraction.
//!
//! The `DATE_*` strings are the default date rules; they are compiled per
//! pipeline from configuration, so only their source text lives here.

use lazy_static::lazy_static;
use regex::Regex;

/// `YYYY-MM-DD` with `-`, `/` or `.` separators, years 2000-2099.
pub const DATE_YMD: &str = r"(20\d{2})[-/.](1[0-2]|0?[1-9])[-/.](3[01]|[12]\d|0?[1-9])";

/// `DD-MM-YYYY` with `-`, `/` or `.` separators, years 2000-2099.
pub const DATE_DMY: &str = r"(3[01]|[12]\d|0?[1-9])[-/.](1[0-2]|0?[1-9])[-/.](20\d{2})";

/// English month name (abbreviated or full) followed by `DD, YYYY`.
pub const DATE_MONTH_NAME: &str = r"(?P<month>jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+(?P<day>\d{1,2}),\s+(?P<year>20\d{2})";

/// Arabic "date" label followed by a year-first date.
pub const DATE_ARABIC_LABEL: &str = r"(?:تاريخ|التاريخ)\s*[:\-]?\s*(20\d{2}[-/.]\d{1,2}[-/.]\d{1,2})";

// Number patterns read ASCII digits only. Arabic-Indic digits are normalized
// to ASCII first; Persian digits (U+06F0-U+06F9) are left alone and never
// count as numbers.
lazy_static! {
    // Amount candidates: integer part with up to two decimals
    pub static ref AMOUNT_NUMBER: Regex = Regex::new(
        r"[0-9]+(?:\.[0-9]{1,2})?"
    ).unwrap();

    // Magnitude candidates for currency inference: any decimal precision
    pub static ref MAGNITUDE_NUMBER: Regex = Regex::new(
        r"[0-9]+(?:\.[0-9]+)?"
    ).unwrap();

    // Arabic letters hamza through yeh
    pub static ref ARABIC_LETTER: Regex = Regex::new(
        r"[\x{0621}-\x{064A}]"
    ).unwrap();
}
