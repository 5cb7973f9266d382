#[cfg(test)]
mod tests {
    use crate::samples;
    use crate::{ChunkReader, GestureRecord, ParserConfig, ParserError, RecordParser};
    use simd_json::{json, OwnedValue};
    use std::io::Cursor;
    use tokio::io::BufReader;
    use tokio::sync::mpsc;
    use tokio::time::{sleep, Duration};
    use tokio_stream::StreamExt;

    fn ndjson(record: &GestureRecord) -> Vec<u8> {
        let mut line = simd_json::to_string(record).unwrap().into_bytes();
        line.push(b'\n');
        line
    }

    #[tokio::test]
    async fn single_chunk_record() {
        let data = ndjson(&samples::triangle());
        let stream = BufReader::new(Cursor::new(data));
        let mut parser = RecordParser::new(stream);
        let record = parser.next_record().await.unwrap();
        assert_eq!(record, samples::triangle());
    }

    #[tokio::test]
    async fn record_split_mid_brace() {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(4);
        let mut parser = RecordParser::new(ChunkReader::new(rx));
        tokio::spawn(async move {
            let data = ndjson(&samples::letter_a());
            let mid = data.len() / 2;
            tx.send(data[..mid].to_vec()).await.unwrap();
            sleep(Duration::from_millis(20)).await;
            tx.send(data[mid..].to_vec()).await.unwrap();
        });
        let record = parser.next_record().await.unwrap();
        assert_eq!(record, samples::letter_a());
    }

    #[tokio::test]
    async fn records_keep_arrival_order() {
        let mut data = Vec::new();
        for name in ["Circle", "Triangle", "A", "Z"] {
            data.extend_from_slice(
                format!("{{\"result\":{{\"name\":\"{name}\",\"confidence\":0.5}}}}\n").as_bytes(),
            );
        }
        let stream = BufReader::new(Cursor::new(data));
        let parser = RecordParser::new(stream);
        let records: Vec<_> = parser
            .into_stream::<GestureRecord>()
            .collect::<Vec<_>>()
            .await;
        let names: Vec<String> = records
            .into_iter()
            .map(|r| r.unwrap().result.unwrap().name.unwrap())
            .collect();
        assert_eq!(names, ["Circle", "Triangle", "A", "Z"]);
    }

    // One syntactically broken candidate must not cost the records around it.
    #[tokio::test]
    async fn invalid_record_is_isolated() {
        let data = b"{\"result\":{\"name\":\"first\"}}\n{\"result\": nonsense}\n{\"result\":{\"name\":\"second\"}}\n";
        let stream = BufReader::new(Cursor::new(data.to_vec()));
        let mut parser = RecordParser::new(stream);

        let first = parser.next_record().await.unwrap();
        assert_eq!(first.result.unwrap().name.unwrap(), "first");
        let second = parser.next_record().await.unwrap();
        assert_eq!(second.result.unwrap().name.unwrap(), "second");
        assert!(matches!(
            parser.next_record().await,
            Err(ParserError::Eof)
        ));
    }

    #[tokio::test]
    async fn strict_mode_surfaces_decode_failure() {
        let data = b"{\"result\": nonsense}\n{\"result\":{\"name\":\"after\"}}\n";
        let stream = BufReader::new(Cursor::new(data.to_vec()));
        let config = ParserConfig {
            skip_invalid: false,
            ..Default::default()
        };
        let mut parser = RecordParser::with_config(stream, config);

        match parser.next_record().await {
            Err(ParserError::Decode(err)) => {
                assert!(err.snippet.starts_with("{\"result\": nonsense}"));
            }
            other => panic!("expected decode failure, got {other:?}"),
        }
        // The bad candidate was consumed; the stream is still usable.
        let after = parser.next_record().await.unwrap();
        assert_eq!(after.result.unwrap().name.unwrap(), "after");
    }

    #[tokio::test]
    async fn chunking_does_not_change_decoded_sequence() {
        let input = b"{\"a\":1}\n{\"b\":{\"c\":2}}\n";

        let mut whole = RecordParser::new(BufReader::new(Cursor::new(input.to_vec())));
        let first: OwnedValue = whole.next().await.unwrap();
        let second: OwnedValue = whole.next().await.unwrap();
        assert_eq!(first, OwnedValue::from(json!({"a": 1})));
        assert_eq!(second, OwnedValue::from(json!({"b": {"c": 2}})));

        // Same input split right after the first newline.
        let (tx, rx) = mpsc::channel::<Vec<u8>>(2);
        let mut split = RecordParser::new(ChunkReader::new(rx));
        tokio::spawn(async move {
            tx.send(input[..8].to_vec()).await.unwrap();
            sleep(Duration::from_millis(10)).await;
            tx.send(input[8..].to_vec()).await.unwrap();
        });
        let split_first: OwnedValue = split.next().await.unwrap();
        let split_second: OwnedValue = split.next().await.unwrap();
        assert_eq!(split_first, first);
        assert_eq!(split_second, second);
    }

    #[tokio::test]
    async fn closed_channel_reads_as_eof() {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(1);
        drop(tx);
        let mut parser = RecordParser::new(ChunkReader::new(rx));
        assert!(matches!(
            parser.next_record().await,
            Err(ParserError::Eof)
        ));
    }

    #[tokio::test]
    async fn eof_with_partial_record() {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(1);
        let mut parser = RecordParser::new(ChunkReader::new(rx));
        tx.send(b"{\"input\":{\"raw\":[".to_vec()).await.unwrap();
        drop(tx);
        assert!(matches!(
            parser.next_record().await,
            Err(ParserError::Eof)
        ));
    }

    // Junk that never frames must hit the cap, not grow forever.
    #[tokio::test]
    async fn runaway_buffer_fails_cleanly() {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(4);
        let config = ParserConfig {
            max_buffer_size: 64,
            ..Default::default()
        };
        let mut parser = RecordParser::with_config(ChunkReader::new(rx), config);
        tx.send(vec![b'x'; 256]).await.unwrap();
        match parser.next_record().await {
            Err(ParserError::BufferOverflow { size, limit }) => {
                assert_eq!(limit, 64);
                assert!(size > limit);
            }
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[cfg(feature = "metrics")]
    #[tokio::test]
    async fn decoding_shows_up_in_metrics() {
        let data = ndjson(&samples::triangle());
        let mut parser = RecordParser::new(BufReader::new(Cursor::new(data)));
        parser.next_record().await.unwrap();

        let report = crate::gather_metrics();
        assert!(report.contains("airdraw_records_decoded"));
        assert!(report.contains("airdraw_buffer_bytes"));
    }

    #[tokio::test]
    async fn stream_ends_at_eof() {
        let data = ndjson(&samples::circle());
        let parser = RecordParser::new(BufReader::new(Cursor::new(data)));
        let records: Vec<_> = parser
            .into_stream::<GestureRecord>()
            .collect::<Vec<_>>()
            .await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap(), &samples::circle());
    }
}
