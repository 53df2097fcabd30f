use serde::{Deserialize, Serialize};

/// Terminal-state machine for a payment attempt. Starts `Pending`; the
/// webhook handler moves it to `Completed` or `Failed`. `Refunded` is a
/// reserved value set out-of-band (never by this flow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One payment attempt, optionally tied to a lead.
///
/// The amount is stored canonically in integer minor units (pence/cents);
/// major-unit decimals exist only at the JSON edge. The Stripe payment
/// intent id is the sole correlation key used by the webhook handler.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: i64,
    /// Weak reference: SET NULL on lead deletion, the payment survives.
    pub lead_id: Option<i64>,
    pub stripe_payment_intent_id: String,
    pub stripe_customer_id: String,
    pub amount_minor: i64,
    /// 3-letter code, lowercase-normalized (e.g. "gbp").
    pub currency: String,
    pub status: PaymentStatus,
    pub description: String,
    pub customer_email: String,
    pub customer_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Payment {
    /// Major-unit view of the amount, for responses and email templates.
    pub fn amount_major(&self) -> f64 {
        self.amount_minor as f64 / 100.0
    }
}

/// Data required to persist a new pending payment.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub lead_id: Option<i64>,
    pub stripe_payment_intent_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub description: String,
    pub customer_email: String,
    pub customer_name: String,
}
