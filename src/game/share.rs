//! Share intent construction
//!
//! A share intent is a link to a social posting endpoint with the result text
//! and the page address pre-filled as query parameters.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_PRODUCT_NAME: &str = "Reaction Nano";
pub const DEFAULT_SHARE_ENDPOINT: &str = "https://twitter.com/intent/tweet";

/// Bytes left alone by a browser's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Where results get shared and how the page names itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    pub product_name: String,
    pub page_url: String,
    pub intent_endpoint: String,
}

/// A ready-to-open share action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareIntent {
    pub text: String,
    pub page_url: String,
    pub intent_url: String,
}

impl ShareTarget {
    pub fn new(product_name: String, page_url: String, intent_endpoint: String) -> Self {
        Self {
            product_name,
            page_url,
            intent_endpoint,
        }
    }

    /// Message announcing a result, followed by the page URL when shared
    pub fn message(&self, reaction_time_ms: u64) -> String {
        format!(
            "{} ms on {}! Try it too → ",
            reaction_time_ms, self.product_name
        )
    }

    /// Build the intent for a result. `text` and `url` are appended to the
    /// endpoint's query string, each percent-encoded as a URI component.
    pub fn intent(&self, reaction_time_ms: u64) -> Result<ShareIntent, String> {
        let mut endpoint = Url::parse(&self.intent_endpoint)
            .map_err(|e| format!("Invalid share endpoint {}: {}", self.intent_endpoint, e))?;
        endpoint.set_fragment(None);

        let text = self.message(reaction_time_ms);
        let separator = match endpoint.query() {
            Some(query) if !query.is_empty() => "&",
            Some(_) => "",
            None => "?",
        };
        let intent_url = format!(
            "{}{}text={}&url={}",
            endpoint,
            separator,
            utf8_percent_encode(&text, URI_COMPONENT),
            utf8_percent_encode(&self.page_url, URI_COMPONENT),
        );

        Ok(ShareIntent {
            text,
            page_url: self.page_url.clone(),
            intent_url,
        })
    }
}
