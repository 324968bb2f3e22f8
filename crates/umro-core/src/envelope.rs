//! Transport envelope around a response fragment.
//!
//! ```text
//! <UMROEnvelope Time='2009 12 01 10:34:11.955'>
//!   <Response>
//!     <CDAConnect Version='1.0.0'>
//!       <connect>
//! ...content...
//!       </connect>
//!     </CDAConnect>
//!   </Response>
//! </UMROEnvelope>
//! ```
//!
//! Service and method names become element names verbatim. They are checked
//! against the XML `NCName` production when the [`Envelope`] is built, so a
//! bad name fails there instead of producing broken markup.

use std::fmt::Display;
use std::time::Instant;

use chrono::{DateTime, Local, TimeZone};

use crate::codec::{decode, encode};
use crate::document::Document;
use crate::errors::{Result, UmroError};
use crate::model::StructuredError;
use crate::query::{element_name, get_multiple_nodes, get_required_value, get_single_node, get_value};
use crate::text::escape;
pub use crate::text::is_xml_name;
use crate::{log_op_end, log_op_start};

/// `yyyy MM dd HH:mm:ss.SSS`
pub const TIMESTAMP_FORMAT: &str = "%Y %m %d %H:%M:%S%.3f";

const ENVELOPE_TAG: &str = "UMROEnvelope";
const EXCEPTION_PATH: &str = "/UMROEnvelope/Response/*/*/Exception";

/// Service/version/method addressing for responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    service_name: String,
    service_version: String,
    method_name: String,
}

/// Addressing and timestamp read back from a received envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeInfo {
    pub timestamp: String,
    pub service_name: String,
    pub service_version: Option<String>,
    pub method_name: String,
}

impl Envelope {
    /// # Errors
    /// * `InvalidXmlName` - If `service_name` or `method_name` is not an XML name
    pub fn new(
        service_name: impl Into<String>,
        service_version: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Result<Self> {
        let service_name = service_name.into();
        let method_name = method_name.into();
        validate_name("service name", &service_name)?;
        validate_name("method name", &method_name)?;
        Ok(Self {
            service_name,
            service_version: service_version.into(),
            method_name,
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn service_version(&self) -> &str {
        &self.service_version
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Wrap `content`, stamped with the current local time
    pub fn response(&self, content: &str) -> String {
        self.response_at(content, &Local::now())
    }

    /// Wrap `content`, stamped with `timestamp`
    pub fn response_at<Tz>(&self, content: &str, timestamp: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        tracing::debug!(
            component = module_path!(),
            op = "response",
            service = self.service_name.as_str(),
            method = self.method_name.as_str(),
            input_len = content.len(),
        );
        render(
            &self.service_name,
            &self.service_version,
            &self.method_name,
            content,
            &format_timestamp(timestamp),
        )
    }

    /// Wrap an error as the response content.
    ///
    /// A [`StructuredError`] is encoded as is; any other error is first
    /// turned into one with [`StructuredError::from_error`].
    pub fn error_response<E>(&self, err: &E) -> String
    where
        E: std::error::Error + 'static,
    {
        self.wrap_error(|| {
            let any: &(dyn std::error::Error + 'static) = err;
            match any.downcast_ref::<StructuredError>() {
                Some(structured) => encode(structured),
                None => encode(&StructuredError::from_error(err)),
            }
        })
    }

    /// [`error_response`](Self::error_response) for a trait object, such as
    /// the contents of a `Box<dyn Error>`.
    ///
    /// Without the concrete type, a foreign error is named after its trait.
    pub fn dyn_error_response(&self, err: &(dyn std::error::Error + 'static)) -> String {
        self.wrap_error(|| match err.downcast_ref::<StructuredError>() {
            Some(structured) => encode(structured),
            None => encode(&StructuredError::from_error(err)),
        })
    }

    fn wrap_error(&self, content: impl FnOnce() -> String) -> String {
        let started = Instant::now();
        log_op_start!(
            "error_response",
            service = self.service_name.as_str(),
            method = self.method_name.as_str()
        );

        let text = self.response(&content());

        log_op_end!(
            "error_response",
            duration_ms = started.elapsed().as_millis() as u64
        );
        text
    }
}

/// Build a response envelope in one call.
///
/// # Errors
/// * `InvalidXmlName` - If `service_name` or `method_name` is not an XML name
pub fn build_response<Tz>(
    service_name: &str,
    service_version: &str,
    method_name: &str,
    content: &str,
    timestamp: &DateTime<Tz>,
) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let envelope = Envelope::new(service_name, service_version, method_name)?;
    Ok(envelope.response_at(content, timestamp))
}

/// Format `timestamp` the way envelopes carry it
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn render(service: &str, version: &str, method: &str, content: &str, time: &str) -> String {
    let mut text = format!(
        "<{ENVELOPE_TAG} Time='{time}'>\n\
         \x20 <Response>\n\
         \x20   <{service} Version='{version}'>\n\
         \x20     <{method}>\n\
         {content}",
        version = escape(version),
    );
    if !content.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&format!(
        "      </{method}>\n\
         \x20   </{service}>\n\
         \x20 </Response>\n\
         </{ENVELOPE_TAG}>\n"
    ));
    text
}

/// Read the addressing of a parsed envelope.
///
/// # Errors
/// * `ValueNotFound` - If the envelope has no `Time` attribute
/// * `NodeNotFound` / `MultipleNodes` - If there is not exactly one service
///   element and one method element
pub fn read_envelope(document: &Document) -> Result<EnvelopeInfo> {
    let root = document.root();
    let timestamp = get_required_value(root, "/UMROEnvelope/@Time")?;
    let service = get_single_node(root, "/UMROEnvelope/Response/*")?;
    let method = get_single_node(service, "*")?;

    Ok(EnvelopeInfo {
        timestamp,
        service_name: element_name(service).unwrap_or_default(),
        service_version: get_value(service, "@Version")?,
        method_name: element_name(method).unwrap_or_default(),
    })
}

/// Parse an envelope and decode the `<Exception>` it carries, if any.
///
/// # Errors
/// * Any parse error of [`Document::parse`]
/// * `MultipleNodes` - If the envelope carries more than one exception
pub fn decode_response(text: &str) -> Result<Option<StructuredError>> {
    let document = Document::parse(text)?;
    let mut exceptions = get_multiple_nodes(document.root(), EXCEPTION_PATH)?;
    match exceptions.len() {
        0 => Ok(None),
        1 => decode(exceptions.remove(0)).map(Some),
        count => Err(UmroError::MultipleNodes {
            path: EXCEPTION_PATH.to_string(),
            count,
        }),
    }
}

fn validate_name(role: &str, name: &str) -> Result<()> {
    if is_xml_name(name) {
        Ok(())
    } else {
        Err(UmroError::InvalidXmlName {
            role: role.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_escaped() {
        let envelope = Envelope::new("Svc", "1.0 'beta'", "call").unwrap();
        let text = envelope.response("<x/>");
        assert!(text.contains("Version='1.0 &apos;beta&apos;'"));
    }

    #[test]
    fn test_content_newline_not_doubled() {
        let envelope = Envelope::new("Svc", "1", "call").unwrap();
        let text = envelope.response("<x/>\n");
        assert!(text.contains("<x/>\n      </call>"));
    }
}
