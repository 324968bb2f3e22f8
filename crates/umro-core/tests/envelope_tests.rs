mod common;

use common::{disk_full, fixed_time};
use umro_core::codec::encode;
use umro_core::envelope::{decode_response, format_timestamp, read_envelope, TIMESTAMP_FORMAT};
use umro_core::text::{is_xml_name, to_xml_name};
use umro_core::{build_response, parse, Envelope, ExErrorKind, StructuredError, UmroError};

#[test]
fn test_timestamp_format() {
    assert_eq!(TIMESTAMP_FORMAT, "%Y %m %d %H:%M:%S%.3f");
    assert_eq!(format_timestamp(&fixed_time()), "2009 12 01 10:34:11.955");
}

#[test]
fn test_build_response_layout() {
    let text = build_response("CDAConnect", "1.0.0", "connect", "<Result/>", &fixed_time()).unwrap();
    let expected = "<UMROEnvelope Time='2009 12 01 10:34:11.955'>\n  <Response>\n    <CDAConnect Version='1.0.0'>\n      <connect>\n<Result/>\n      </connect>\n    </CDAConnect>\n  </Response>\n</UMROEnvelope>\n";
    assert_eq!(text, expected);
}

#[test]
fn test_envelope_is_well_formed_with_fragment() {
    let envelope = Envelope::new("CDAConnect", "1.0.0", "connect").unwrap();
    let text = envelope.response_at(&encode(&disk_full()), &fixed_time());

    let doc = parse(&text).unwrap();
    let info = read_envelope(&doc).unwrap();
    assert_eq!(info.timestamp, "2009 12 01 10:34:11.955");
    assert_eq!(info.service_name, "CDAConnect");
    assert_eq!(info.service_version.as_deref(), Some("1.0.0"));
    assert_eq!(info.method_name, "connect");
}

#[test]
fn test_invalid_service_name_rejected() {
    let err = Envelope::new("Bad Service", "1", "connect").unwrap_err();
    assert_eq!(
        err,
        UmroError::InvalidXmlName {
            role: "service name".to_string(),
            name: "Bad Service".to_string()
        }
    );
    assert_eq!(err.kind(), ExErrorKind::InvalidArgument);
}

#[test]
fn test_invalid_method_name_rejected() {
    for method in ["", "9lives", "a><b", "x:y"] {
        let err = build_response("Svc", "1", method, "", &fixed_time()).unwrap_err();
        assert!(matches!(err, UmroError::InvalidXmlName { .. }), "{}", method);
    }
}

#[test]
fn test_structured_error_response_round_trip() {
    let envelope = Envelope::new("CDAConnect", "1.0.0", "connect").unwrap();
    let text = envelope.error_response(&disk_full());

    let decoded = decode_response(&text).unwrap().unwrap();
    assert_eq!(decoded, disk_full());
}

#[test]
fn test_foreign_error_response_is_synthesized() {
    let envelope = Envelope::new("CDAConnect", "1.0.0", "connect").unwrap();
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "case 200900005 missing");
    let text = envelope.error_response(&io);

    assert!(!text.contains("<Exception Code="));
    assert!(text.contains("<Code>-1</Code>"));

    let decoded = decode_response(&text).unwrap().unwrap();
    assert_eq!(decoded.code, 0);
    assert_eq!(decoded.what, "");
    assert_eq!(decoded.scope, "");
    assert_eq!(
        decoded.programmer_message.as_deref(),
        Some("case 200900005 missing")
    );
    assert_eq!(
        decoded.name,
        to_xml_name(std::any::type_name::<std::io::Error>())
    );
}

#[test]
fn test_message_only_error_response() {
    let envelope = Envelope::new("Svc", "2", "call").unwrap();
    let text = envelope.error_response(&StructuredError::from_message("boom"));
    let decoded = decode_response(&text).unwrap().unwrap();
    assert_eq!(decoded.programmer_message.as_deref(), Some("boom"));
}

#[test]
fn test_response_without_exception() {
    let text = build_response("Svc", "1", "call", "<Result>ok</Result>", &fixed_time()).unwrap();
    assert_eq!(decode_response(&text).unwrap(), None);
}

#[test]
fn test_response_with_two_exceptions_is_ambiguous() {
    let content = format!("{}\n{}", encode(&disk_full()), encode(&disk_full()));
    let text = build_response("Svc", "1", "call", &content, &fixed_time()).unwrap();
    let err = decode_response(&text).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Cardinality);
}

#[test]
fn test_read_envelope_without_time_fails() {
    let doc = parse("<UMROEnvelope><Response><Svc><call/></Svc></Response></UMROEnvelope>").unwrap();
    let err = read_envelope(&doc).unwrap_err();
    assert!(matches!(err, UmroError::ValueNotFound { .. }));
}

#[test]
fn test_current_time_stamp_shape() {
    let envelope = Envelope::new("Svc", "1", "call").unwrap();
    let doc = parse(&envelope.response("<x/>")).unwrap();
    let stamp = read_envelope(&doc).unwrap().timestamp;

    // yyyy MM dd HH:mm:ss.SSS
    assert_eq!(stamp.len(), 23);
    let bytes = stamp.as_bytes();
    assert_eq!(bytes[4], b' ');
    assert_eq!(bytes[7], b' ');
    assert_eq!(bytes[10], b' ');
    assert_eq!(bytes[13], b':');
    assert_eq!(bytes[16], b':');
    assert_eq!(bytes[19], b'.');
}

#[derive(Debug)]
struct Wrapped<T>(T);

impl<T: std::fmt::Debug> std::fmt::Display for Wrapped<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wrapped <{:?}>", self.0)
    }
}

impl<T: std::fmt::Debug> std::error::Error for Wrapped<T> {}

#[test]
fn test_generic_error_response_reparses() {
    let envelope = Envelope::new("CDAConnect", "1.0.0", "connect").unwrap();
    let text = envelope.error_response(&Wrapped(3u8));

    let decoded = decode_response(&text).unwrap().unwrap();
    assert!(is_xml_name(&decoded.name), "{}", decoded.name);
    assert!(decoded.name.ends_with("Wrapped"));
    assert_eq!(decoded.programmer_message.as_deref(), Some("wrapped <3>"));
}

#[test]
fn test_boxed_error_response_reparses() {
    let envelope = Envelope::new("CDAConnect", "1.0.0", "connect").unwrap();
    let boxed: Box<dyn std::error::Error + Send + Sync> = "case 200900005 locked".into();
    let text = envelope.dyn_error_response(&*boxed);

    let decoded = decode_response(&text).unwrap().unwrap();
    assert!(is_xml_name(&decoded.name), "{}", decoded.name);
    assert_eq!(
        decoded.programmer_message.as_deref(),
        Some("case 200900005 locked")
    );
}

#[test]
fn test_boxed_structured_error_is_encoded_as_is() {
    let envelope = Envelope::new("CDAConnect", "1.0.0", "connect").unwrap();
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(disk_full());
    let text = envelope.dyn_error_response(&*boxed);

    assert_eq!(decode_response(&text).unwrap().unwrap(), disk_full());
}
