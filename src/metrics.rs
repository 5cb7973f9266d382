use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_gauge, Encoder, IntCounter, IntGauge, TextEncoder,
};

lazy_static! {
    pub(crate) static ref RECORDS_DECODED: IntCounter = register_int_counter!(
        "airdraw_records_decoded",
        "Total number of gesture records decoded"
    )
    .unwrap();
    pub(crate) static ref DECODE_FAILURES: IntCounter = register_int_counter!(
        "airdraw_decode_failures",
        "Framed candidates dropped because they failed to parse"
    )
    .unwrap();
    pub(crate) static ref BUFFER_BYTES: IntGauge = register_int_gauge!(
        "airdraw_buffer_bytes",
        "Current size of the working buffer in bytes"
    )
    .unwrap();
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
