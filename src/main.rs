//! Headless gesture viewer: pipe the device's serial output into stdin and
//! watch decoded records go by, e.g.
//! `cat /dev/ttyUSB0 | airdraw_stream` (with the port set to 115200 baud).

use airdraw_stream::{
    GestureRecord, GestureView, RecordSink, Session, SessionEnd, Status, DEFAULT_BAUD_RATE,
};
use tracing_subscriber::EnvFilter;

/// Renders each record's readouts as console text.
struct ConsoleSink {
    view: GestureView,
}

impl RecordSink for ConsoleSink {
    fn on_record(&mut self, record: &GestureRecord) {
        self.view.on_record(record);
        let result = &self.view.result;
        println!(
            "gesture: {} [{}] confidence {}",
            result.name, result.kind, result.confidence
        );
        for alternative in &result.alternatives {
            println!("  alt: {alternative}");
        }
        let features = &self.view.features;
        println!(
            "  points: {}  length: {}  dtw: {}  angles: {}",
            self.view.path.len(),
            features.length,
            features.dtw_distance,
            features.angles
        );
        println!(
            "  tilt: roll {:.1} deg, pitch {:.1} deg",
            self.view.tilt.roll, self.view.tilt.pitch
        );
    }

    fn on_status(&mut self, status: Status) {
        self.view.on_status(status);
        println!("[{status}]");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!(
        "airdraw viewer: reading records from stdin (serial link runs at {} baud)",
        DEFAULT_BAUD_RATE
    );

    let sink = ConsoleSink {
        view: GestureView::default(),
    };
    let mut session = Session::new(tokio::io::stdin(), sink);
    match session.run().await? {
        SessionEnd::StreamClosed => println!("stream closed"),
        SessionEnd::Cancelled => println!("cancelled"),
    }
    Ok(())
}
