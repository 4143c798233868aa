//! Typed representation of the partner's order webhook payload.
//!
//! The integration partner's field formats are unreliable: numbers arrive as
//! strings, strings arrive as numbers, and whole sections go missing. Every
//! leaf field is therefore optional, scalar fields that flip-flop between
//! types are modelled as a [`FlexValue`], and unrecognised fields are
//! discarded rather than rejected. Structural validation only checks that the
//! sections the write path cannot do without are present.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

//--------------------------------------     FlexValue       ---------------------------------------------------------

/// A scalar field as the partner actually sends it: absent, null, text,
/// integer or float. Coercion to a target type is best-effort and returns
/// `None` on failure, so a single bad field degrades to SQL NULL instead of
/// sinking the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexValue {
    #[default]
    Absent,
    Int(i64),
    Float(f64),
    Text(String),
}

impl FlexValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FlexValue::Absent)
    }

    /// Coerce to an integer. Floats are not silently truncated; like text
    /// that fails to parse, they coerce to `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FlexValue::Absent => None,
            FlexValue::Int(i) => Some(*i),
            FlexValue::Float(_) => None,
            FlexValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse().ok()
                }
            },
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FlexValue::Absent => None,
            FlexValue::Int(i) => Some(*i as f64),
            FlexValue::Float(f) => Some(*f),
            FlexValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse().ok()
                }
            },
        }
    }

    /// Coerce to text. Numeric input is formatted rather than dropped, since
    /// several passthrough columns (`table_no`, `round_off`, ids) are stored
    /// as text whatever the partner sent.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FlexValue::Absent => None,
            FlexValue::Int(i) => Some(i.to_string()),
            FlexValue::Float(f) => Some(f.to_string()),
            FlexValue::Text(s) => Some(s.clone()),
        }
    }
}

//--------------------------------------     Payload tree    ---------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Restaurant {
    pub res_name: Option<String>,
    pub address: Option<String>,
    pub contact_information: Option<String>,
    #[serde(rename = "restID")]
    pub rest_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub gstin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartPayment {
    pub payment_type: Option<String>,
    #[serde(default)]
    pub amount: FlexValue,
    // The partner spells it this way on the wire.
    pub custome_payment_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderID", default)]
    pub order_id: FlexValue,
    pub customer_invoice_id: Option<String>,
    #[serde(default)]
    pub delivery_charges: FlexValue,
    pub order_type: Option<String>,
    pub payment_type: Option<String>,
    #[serde(default)]
    pub table_no: FlexValue,
    #[serde(default)]
    pub no_of_persons: FlexValue,
    #[serde(default)]
    pub discount_total: FlexValue,
    #[serde(default)]
    pub tax_total: FlexValue,
    #[serde(default)]
    pub round_off: FlexValue,
    #[serde(default)]
    pub core_total: FlexValue,
    #[serde(default)]
    pub total: FlexValue,
    #[serde(default)]
    pub created_on: FlexValue,
    pub order_from: Option<String>,
    #[serde(default)]
    pub order_from_id: FlexValue,
    pub sub_order_type: Option<String>,
    #[serde(default)]
    pub packaging_charge: FlexValue,
    pub status: Option<String>,
    pub comment: Option<String>,
    /// Present in the partner contract but not persisted anywhere yet.
    #[serde(default)]
    pub service_charge: FlexValue,
    pub biller: Option<String>,
    pub assignee: Option<String>,
    #[serde(default)]
    pub part_payments: Vec<PartPayment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Addon {
    pub group_name: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub price: FlexValue,
    #[serde(default)]
    pub quantity: FlexValue,
    pub sap_code: Option<String>,
    #[serde(default)]
    pub addon_id: FlexValue,
    #[serde(default)]
    pub addon_group_id: FlexValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: Option<String>,
    #[serde(default)]
    pub itemid: FlexValue,
    pub itemcode: Option<String>,
    pub vendoritemcode: Option<String>,
    pub specialnotes: Option<String>,
    #[serde(default)]
    pub price: FlexValue,
    #[serde(default)]
    pub quantity: FlexValue,
    #[serde(default)]
    pub total: FlexValue,
    #[serde(rename = "addon", default)]
    pub addons: Vec<Addon>,
    pub category_name: Option<String>,
    pub sap_code: Option<String>,
    #[serde(default)]
    pub discount: FlexValue,
    #[serde(default)]
    pub tax: FlexValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tax {
    pub title: Option<String>,
    #[serde(default)]
    pub rate: FlexValue,
    #[serde(default)]
    pub amount: FlexValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Discount {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub rate: FlexValue,
    #[serde(default)]
    pub amount: FlexValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    #[serde(rename = "Restaurant")]
    pub restaurant: Option<Restaurant>,
    #[serde(rename = "Customer")]
    pub customer: Option<Customer>,
    #[serde(rename = "Order")]
    pub order: Option<Order>,
    // Tax and Discount may be missing or explicitly null; both mean "none".
    #[serde(rename = "Tax", default)]
    pub taxes: Option<Vec<Tax>>,
    #[serde(rename = "Discount", default)]
    pub discounts: Option<Vec<Discount>>,
    #[serde(rename = "OrderItem")]
    pub order_items: Option<Vec<OrderItem>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub token: Option<String>,
    pub properties: Option<Properties>,
    pub event: Option<String>,
}

//--------------------------------------     Validation      ---------------------------------------------------------

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("required field {0} is missing")]
    MissingField(&'static str),
    #[error("payload structure is invalid: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl WebhookPayload {
    /// Parses a raw JSON structure into a validated payload tree.
    ///
    /// Unknown fields are ignored and absent optional fields default to
    /// empty. The error names the first missing required section, or the
    /// first field whose fundamental shape is wrong (e.g. `OrderItem` being
    /// an object instead of a list).
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let payload: WebhookPayload = serde_json::from_value(value.clone())?;
        payload.validate()?;
        Ok(payload)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let props = self.properties.as_ref().ok_or(ValidationError::MissingField("properties"))?;
        if props.restaurant.is_none() {
            return Err(ValidationError::MissingField("properties.Restaurant"));
        }
        if props.customer.is_none() {
            return Err(ValidationError::MissingField("properties.Customer"));
        }
        if props.order.is_none() {
            return Err(ValidationError::MissingField("properties.Order"));
        }
        if props.order_items.is_none() {
            return Err(ValidationError::MissingField("properties.OrderItem"));
        }
        Ok(())
    }
}
