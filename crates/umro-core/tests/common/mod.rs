use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use umro_core::StructuredError;

/// The disk-full report used across scenarios
#[allow(dead_code)]
pub fn disk_full() -> StructuredError {
    StructuredError::new(
        42,
        "Disk full",
        "Node-7",
        "Retry",
        "",
        Some("IOException: disk".to_string()),
    )
    .with_name("DiskFullError")
}

/// 2009-12-01 10:34:11.955 UTC
#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(2009, 12, 1)
        .and_then(|d| d.and_hms_milli_opt(10, 34, 11, 955))
        .unwrap();
    Utc.from_utc_datetime(&naive)
}

/// A small document with repeated, unique and missing elements
#[allow(dead_code)]
pub const CATALOG: &str = "<Root>\
<Item id='1'>alpha</Item>\
<Item id='2'>beta</Item>\
<Single kind='only'>only</Single>\
<Empty/>\
</Root>";
