//! Gesture viewer over TCP, for devices bridged through a serial-to-network
//! forwarder. Try it with:
//! `printf '{"result":{"name":"Circle","confidence":0.9}}\n' | nc 127.0.0.1 7700`

use airdraw_stream::{GestureRecord, GestureView, RecordSink, Session, Status};
use tokio::io::BufReader;
use tokio::net::TcpListener;

struct PrintSink {
    view: GestureView,
}

impl RecordSink for PrintSink {
    fn on_record(&mut self, record: &GestureRecord) {
        self.view.on_record(record);
        println!(
            "gesture: {} [{}] confidence {}",
            self.view.result.name, self.view.result.kind, self.view.result.confidence
        );
    }

    fn on_status(&mut self, status: Status) {
        self.view.on_status(status);
        println!("[{status}]");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:7700").await?;
    println!("listening on 127.0.0.1:7700; pipe NDJSON gesture records in");

    loop {
        let (socket, addr) = listener.accept().await?;
        println!("device connected: {addr}");

        tokio::spawn(async move {
            let sink = PrintSink {
                view: GestureView::default(),
            };
            let mut session = Session::new(BufReader::new(socket), sink);
            match session.run().await {
                Ok(end) => println!("{addr}: session ended: {end:?}"),
                Err(err) => eprintln!("{addr}: session failed: {err}"),
            }
        });
    }
}
