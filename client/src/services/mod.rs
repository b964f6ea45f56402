//! Business logic services for the Scrap ERP client

pub mod entry;
pub mod invoicing;
pub mod ledger;
pub mod reporting;

pub use entry::{EntryService, ManualEntryForm, ProductionDetail, ProductionScrapItem};
pub use invoicing::{InvoiceHeader, InvoicePayload, InvoiceService};
pub use ledger::LedgerService;
pub use reporting::ReportingService;
