// Prompt construction for the classification oracle.
//
// Every call carries the same policy preamble as its system instruction,
// plus a short module-specific prompt. Prompt building is pure so the date
// handling for payment proofs can be tested without a clock.

use chrono::NaiveDate;

use crate::models::Feature;

/// Domains the LINK policy must always resolve to Safe.
pub const TRUSTED_DOMAINS: [&str; 7] = [
    "google.com",
    "flipkart.com",
    "amazon.in",
    "paytm.com",
    "hdfcbank.com",
    "icicibank.com",
    "sbi.co.in",
];

/// Fixed system instruction sent out-of-band with every request.
pub const POLICY_PREAMBLE: &str = r#"You are a cybersecurity AI specialized in detecting INDIAN scams and fraudulent documents.
Your goal is to protect users and shop owners from SMS, link, screenshot, and payment-based frauds.
DO NOT hallucinate. DO NOT over-warn. DO NOT under-warn.

CRITICAL RULES:
1. SMS / MESSAGE:
   - Classify as SCAM only if ≥2 indicators exist: Urgency, Payment request, Fake bank impersonation, Suspicious link, OTP request.
   - 1 indicator → Suspicious, 0 indicators → Safe.

2. LINK:
   - Trusted domains (google.com, flipkart.com, amazon.in, paytm.com, hdfcbank.com, icicibank.com, sbi.co.in) MUST be marked as Safe.
   - Fake domains or suspicious redirects → Scam.

3. PAYMENT PROOF VERIFICATION (For Shop Owners):
   - Analyze screenshots of UPI apps (GPay, PhonePe, Paytm).
   - DATE INTERPRETATION LOGIC:
     * Compare the transaction date in the screenshot with the "Current Date" provided in the prompt.
     * Past transactions are VALID and GENUINE (older dates do NOT indicate fraud).
     * Transactions from today are VALID.
     * ONLY transactions with a FUTURE date relative to the current system date are suspicious/fake.
   - Classify as SCAM (Fake) if: Inconsistent fonts/colors, Missing Transaction ID, "Processing" or "Pending" status shown as success, obvious visual manipulation, or FUTURE transaction dates.
   - Classify as SUSPICIOUS if: Status is "Pending", "Scheduled", text is blurry/unclear, or transaction date appears to be in the future.
   - MANDATORY EXPLANATION: If flagged due to date issues, you MUST explicitly include the reason: "Transaction date appears to be in the future."
   - ADVICE: Always tell the owner to check their actual bank/app balance before releasing goods.

4. SCREENSHOT:
   - Analyze extracted text for scam indicators (job scams, investment frauds).

5. PHONE NUMBER:
   - Context is MANDATORY. Strong payment pressure or impersonation → Scam.

CONFIDENCE SCORES:
- Safe: 90–100%
- Suspicious: 40–70%
- Scam: 80–95%

RESPONSE FORMAT:
Return ONLY valid JSON:
{
  "risk_level": "Safe | Suspicious | Scam",
  "confidence_score": 0-100,
  "reasons": ["string"],
  "recommendation": "string"
}
"#;

/// Join a phone number and its context into the single labeled string the
/// oracle (and the reward ledger) sees.
pub fn phone_input(phone: &str, context: &str) -> String {
    format!("Phone: {} | Context: {}", phone.trim(), context.trim())
}

/// Render a date the way the payment-proof prompt expects it, e.g. "05 March 2026".
pub fn format_prompt_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// Build the per-call prompt for a module.
///
/// `today` is only consulted for payment proofs, which need the current date
/// so the oracle can tell future-dated transactions from past ones.
pub fn build_prompt(feature: Feature, input: &str, today: NaiveDate) -> String {
    let input = input.trim();
    match feature {
        Feature::Sms => format!(
            "Analyze this SMS/Message for potential scams in an Indian context: \"{input}\""
        ),
        Feature::Link => format!(
            "Analyze this URL/Link for potential scams targeting Indian users: \"{input}\""
        ),
        Feature::Phone => format!(
            "Analyze this phone number and the following context for payment fraud: \"{input}\""
        ),
        Feature::Screenshot => {
            let mut prompt =
                "Extract text and analyze this screenshot for scam indicators.".to_string();
            if !input.is_empty() {
                prompt.push_str(&format!(" Additional user context: {input}"));
            }
            prompt
        }
        Feature::PaymentProof => {
            let mut prompt = format!(
                "SHOP OWNER ALERT: Analyze this payment proof screenshot (UPI/GPay/PhonePe/Paytm) for validity.\n\
                 Current System Date for comparison: {}.\n\
                 Check for \"Pending\", \"Processing\", missing IDs, visual manipulation, or FUTURE transaction dates.\n\
                 Note: Past dates are perfectly valid.",
                format_prompt_date(today)
            );
            if !input.is_empty() {
                prompt.push_str(&format!("\nShop owner notes: {input}"));
            }
            prompt
        }
    }
}
