//! Localized labels for exporting extracted records.
//!
//! The detected script language of the OCR text picks the label set; the
//! working record itself stays language-neutral.

use super::invoice::{Currency, Language};

/// Column labels for a one-row invoice export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLabels {
    pub filename: &'static str,
    pub invoice_date: &'static str,
    pub amount: &'static str,
    pub currency: &'static str,
    pub category: &'static str,
    pub status: &'static str,
}

impl ExportLabels {
    /// Header row in column order.
    pub fn headers(&self) -> [&'static str; 6] {
        [
            self.filename,
            self.invoice_date,
            self.amount,
            self.currency,
            self.category,
            self.status,
        ]
    }
}

const ENGLISH: ExportLabels = ExportLabels {
    filename: "Filename",
    invoice_date: "Invoice Date",
    amount: "Amount",
    currency: "Currency",
    category: "Category",
    status: "Status",
};

const ARABIC: ExportLabels = ExportLabels {
    filename: "اسم الملف",
    invoice_date: "تاريخ الفاتورة",
    amount: "المبلغ",
    currency: "العملة",
    category: "التصنيف",
    status: "الحالة",
};

impl Language {
    /// Export column labels for this language.
    pub fn export_labels(&self) -> &'static ExportLabels {
        match self {
            Language::Ar => &ARABIC,
            Language::En => &ENGLISH,
        }
    }

    /// Currency as shown in an export: Arabic names, otherwise the ISO code.
    pub fn currency_name(&self, currency: Currency) -> &'static str {
        match (self, currency) {
            (Language::Ar, Currency::Iqd) => "دينار عراقي",
            (Language::Ar, Currency::Usd) => "دولار",
            (Language::En, currency) => currency.code(),
        }
    }

    /// Status of a freshly extracted record.
    pub fn processed_status(&self) -> &'static str {
        match self {
            Language::Ar => "تمت المعالجة",
            Language::En => "Processed",
        }
    }
}
