//! Prompt templates for the receipt formatting step
//!
//! These templates use basic `format!()` interpolation for type safety.

/// Marker the model is told to use for anything it cannot read reliably.
pub const NOT_AVAILABLE: &str = "not available";

/// Generate the prompt that turns raw OCR text into an expense-ready summary
///
/// The model gets the OCR text verbatim plus a fixed template of labeled
/// sections. Uncertain values must be written as [`NOT_AVAILABLE`] instead
/// of guessed.
///
/// # Example
/// ```
/// use receipt_ocr::llm::prompts::receipt_summary_prompt;
///
/// let prompt = receipt_summary_prompt("CAFE NORTE\nAmericano 4,500");
/// assert!(prompt.contains("Americano 4,500"));
/// assert!(prompt.contains("[Store Information]"));
/// ```
pub fn receipt_summary_prompt(ocr_text: &str) -> String {
    format!(
        r#"The following text was extracted from a receipt with OCR. Organize it into a form that is easy to use as proof of expense.

OCR source text:
{ocr_text}

Use exactly this format:
[Store Information]
- Store name:
- Business registration number:
- Address:
- Phone number:

[Transaction Information]
- Date/time: YYYY-MM-DD HH:MM
- Receipt number:
- Payment method:

[Purchased Items]
- Item | Unit price | Quantity | Amount
- (one line per item)

[Amount Information]
- Subtotal:
- Tax (VAT):
- Total paid:

Write "{NOT_AVAILABLE}" for any value that is missing or not clearly readable. Do not invent values."#
    )
}
