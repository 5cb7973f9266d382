//! Replays the canned simulate gestures through the full transport path,
//! delivering the wire bytes in deliberately awkward chunk sizes.

use airdraw_stream::{samples, ChunkReader, GestureRecord, GestureView, RecordSink, Session};
use rand::Rng;
use tokio::sync::mpsc;

struct PrintSink {
    view: GestureView,
}

impl RecordSink for PrintSink {
    fn on_record(&mut self, record: &GestureRecord) {
        self.view.on_record(record);
        println!(
            "decoded {} ({}), {} path points, tilt roll {:.1} pitch {:.1}",
            self.view.result.name,
            self.view.result.kind,
            self.view.path.len(),
            self.view.tilt.roll,
            self.view.tilt.pitch
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel::<Vec<u8>>(64);

    let mut wire = Vec::new();
    for record in [samples::triangle(), samples::circle(), samples::letter_a()] {
        wire.extend(simd_json::to_string(&record)?.into_bytes());
        wire.push(b'\n');
    }

    // Split the stream without any respect for record boundaries.
    let mut chunks = Vec::new();
    {
        let mut rng = rand::thread_rng();
        let mut rest = wire.as_slice();
        while !rest.is_empty() {
            let n = rng.gen_range(1..=9).min(rest.len());
            chunks.push(rest[..n].to_vec());
            rest = &rest[n..];
        }
    }
    println!("replaying {} bytes in {} chunks", wire.len(), chunks.len());

    tokio::spawn(async move {
        for chunk in chunks {
            tx.send(chunk).await.unwrap();
        }
    });

    let mut session = Session::new(
        ChunkReader::new(rx),
        PrintSink {
            view: GestureView::default(),
        },
    );
    let end = session.run().await?;
    println!("session ended: {end:?}");
    Ok(())
}
