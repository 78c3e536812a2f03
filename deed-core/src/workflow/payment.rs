use std::collections::BTreeMap;
use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::forms::{FormData, FormType, WorkflowSubmission};

/// Sent to the payment initialisation endpoint once the backend has issued a
/// form id. Serialises as `{ formId, amount, formType, formData }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub form_id: String,
    pub amount: Decimal,
    #[serde(flatten)]
    pub data: FormData,
}

impl PaymentRequest {
    pub fn new(
        form_id: impl Into<String>,
        submission: &WorkflowSubmission,
    ) -> Self {
        Self {
            form_id: form_id.into(),
            amount: submission.amount,
            data: submission.data.clone(),
        }
    }

    pub fn form_type(&self) -> FormType {
        self.data.form_type()
    }
}

/// Signed parameters returned by the server for the hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayParams {
    pub payment_url: String,
    pub txnid: String,
    /// Exactly as the server sent it. The hash is signed over this text, so
    /// it is never re-rendered.
    #[serde(deserialize_with = "amount_text")]
    pub amount: String,
    pub surl: String,
    pub furl: String,
    pub hash: String,
    /// Any further fields the gateway expects (product info, payer details).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl GatewayParams {
    /// Hidden fields in the order the gateway form posts them.
    pub fn into_handoff(self) -> GatewayHandoff {
        let mut fields = vec![
            ("txnid".to_string(), self.txnid),
            ("amount".to_string(), self.amount),
            ("surl".to_string(), self.surl),
            ("furl".to_string(), self.furl),
            ("hash".to_string(), self.hash),
        ];
        for (name, value) in self.extra {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            fields.push((name, value));
        }

        GatewayHandoff {
            action: self.payment_url,
            fields,
        }
    }
}

/// Accepts the amount as a JSON string or number and keeps its text.
fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "amount must be a string or a number, got {other}"
        ))),
    }
}

/// A form post that navigates the payer to the hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayHandoff {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl GatewayHandoff {
    pub fn field(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// A standalone page that submits itself to the gateway on load.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<body onload=\"document.forms[0].submit()\">\n");
        let _ = writeln!(
            html,
            "<form method=\"post\" action=\"{}\">",
            escape_html(&self.action)
        );
        for (name, value) in &self.fields {
            let _ = writeln!(
                html,
                "  <input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape_html(name),
                escape_html(value)
            );
        }
        html.push_str("  <noscript><button type=\"submit\">Continue to payment</button></noscript>\n");
        html.push_str("</form>\n</body>\n</html>\n");
        html
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
