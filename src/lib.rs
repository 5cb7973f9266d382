//! # airdraw_stream
//!
//! Host-side ingestion and view model for an air-draw gesture device. The
//! device streams JSON-encoded gesture reports over a serial link, one object
//! per line in the happy case, chunked arbitrarily by the transport. This
//! crate frames that stream into complete records, decodes them leniently
//! (every section optional, bad candidates dropped and reported), and computes
//! the render model a UI binds to: fitted stroke path, feature and result
//! readouts, and a roll/pitch tilt preview.
//!
//! ## Example
//!
//! ```no_run
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Chunks arrive from the transport with no relation to record boundaries.
//!     let (tx, rx) = mpsc::channel::<Vec<u8>>(8);
//!     let reader = airdraw_stream::ChunkReader::new(rx);
//!     let mut parser = airdraw_stream::RecordParser::new(reader);
//!
//!     tokio::spawn(async move {
//!         tx.send(b"{\"result\":{\"type\":\"shape\",\"name\":\"Cir".to_vec())
//!             .await
//!             .unwrap();
//!         tx.send(b"cle\",\"confidence\":0.97}}\n".to_vec()).await.unwrap();
//!     });
//!
//!     let record = parser.next_record().await?;
//!     println!("classified: {:?}", record.result);
//!     Ok(())
//! }
//! ```

#[cfg(test)]
mod tests;

mod framer;
pub use framer::*;

mod decoder;
pub use decoder::*;

mod record;
pub use record::*;

mod parser;
pub use parser::*;

mod reader;
pub use reader::*;

mod session;
pub use session::*;

mod view;
pub use view::*;

mod analysis;
pub use analysis::*;

pub mod samples;

#[cfg(feature = "metrics")]
mod metrics;
#[cfg(feature = "metrics")]
pub use metrics::gather_metrics;

mod settings;
#[cfg(feature = "configs")]
pub use settings::configuration;
