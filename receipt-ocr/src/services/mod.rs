mod receipt;

pub use receipt::{ReceiptScan, ReceiptService, ScanStage};
