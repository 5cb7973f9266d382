#[cfg(test)]
mod tests {
    use crate::samples;
    use crate::{
        ChunkReader, GestureRecord, ParserConfig, ParserError, RecordSink, Session, SessionEnd,
        Status,
    };
    use std::io::Cursor;
    use tokio::io::BufReader;
    use tokio::sync::mpsc;
    use tokio::time::{sleep, timeout, Duration};

    #[derive(Default)]
    struct Probe {
        records: Vec<GestureRecord>,
        statuses: Vec<Status>,
    }

    impl RecordSink for Probe {
        fn on_record(&mut self, record: &GestureRecord) {
            self.records.push(record.clone());
        }

        fn on_status(&mut self, status: Status) {
            self.statuses.push(status);
        }
    }

    fn ndjson(records: &[GestureRecord]) -> Vec<u8> {
        let mut data = Vec::new();
        for record in records {
            data.extend_from_slice(simd_json::to_string(record).unwrap().as_bytes());
            data.push(b'\n');
        }
        data
    }

    #[tokio::test]
    async fn records_reach_the_sink_in_order() {
        let sent = vec![samples::triangle(), samples::circle(), samples::letter_a()];
        let reader = BufReader::new(Cursor::new(ndjson(&sent)));
        let mut session = Session::new(reader, Probe::default());

        let end = session.run().await.unwrap();
        assert_eq!(end, SessionEnd::StreamClosed);

        let probe = session.into_sink();
        assert_eq!(probe.records, sent);
        assert_eq!(probe.statuses, vec![Status::Connected, Status::Disconnected]);
    }

    #[tokio::test]
    async fn cancellation_stops_a_pending_read() {
        // The channel never delivers anything; only the token can end this.
        let (_tx, rx) = mpsc::channel::<Vec<u8>>(1);
        let mut session = Session::new(ChunkReader::new(rx), Probe::default());
        let token = session.cancellation_token();

        let (end, _) = tokio::join!(session.run(), async {
            sleep(Duration::from_millis(20)).await;
            token.cancel();
        });
        assert_eq!(end.unwrap(), SessionEnd::Cancelled);
        assert_eq!(
            session.into_sink().statuses,
            vec![Status::Connected, Status::Disconnected]
        );
    }

    #[tokio::test]
    async fn cancelling_twice_is_harmless() {
        let (_tx, rx) = mpsc::channel::<Vec<u8>>(1);
        let mut session = Session::new(ChunkReader::new(rx), Probe::default());
        let token = session.cancellation_token();
        token.cancel();
        token.cancel();

        let end = timeout(Duration::from_secs(1), session.run())
            .await
            .expect("session must exit promptly once cancelled")
            .unwrap();
        assert_eq!(end, SessionEnd::Cancelled);
    }

    #[tokio::test]
    async fn bad_records_never_reach_the_sink() {
        let data = b"{\"result\":{\"name\":\"good\"}}\nnot json at all {\"broken\": }\n{\"result\":{\"name\":\"also good\"}}\n";
        let reader = BufReader::new(Cursor::new(data.to_vec()));
        let mut session = Session::new(reader, Probe::default());

        let end = session.run().await.unwrap();
        assert_eq!(end, SessionEnd::StreamClosed);

        let probe = session.into_sink();
        let names: Vec<_> = probe
            .records
            .into_iter()
            .map(|r| r.result.unwrap().name.unwrap())
            .collect();
        assert_eq!(names, ["good", "also good"]);
    }

    #[tokio::test]
    async fn transport_failure_is_reported_once() {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(1);
        let config = ParserConfig {
            max_buffer_size: 32,
            ..Default::default()
        };
        let mut session = Session::with_config(ChunkReader::new(rx), Probe::default(), config);
        tx.send(vec![b'~'; 128]).await.unwrap();

        let err = session.run().await.unwrap_err();
        assert!(matches!(err, ParserError::BufferOverflow { .. }));
        assert_eq!(
            session.into_sink().statuses,
            vec![Status::Connected, Status::ReadError]
        );
    }
}
