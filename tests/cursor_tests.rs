// tests/cursor_tests.rs
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use welllog_rs::*;

fn m(value: f64) -> Index {
    Index::depth(value, DepthUnit::Meter)
}

fn ts(text: &str) -> Index {
    Index::DateTime(DateTimeIndex::parse(text).unwrap())
}

fn depth_store(rows: usize, max_rows: usize) -> Arc<MemoryLogStore> {
    let header = LogHeader::new(vec!["MNEM1".into(), "MNEM2".into()], vec!["gAPI".into(), "".into()]).unwrap();
    let rows = (0..rows)
        .map(|i| {
            Row::new(
                m(i as f64),
                vec![Some(CurveValue::Numeric(i as f64 * 0.5)), Some(CurveValue::Text(format!("S{}", i)))],
            )
        })
        .collect();
    Arc::new(MemoryLogStore::new(header, max_rows).unwrap().with_rows(rows).unwrap())
}

/// Treats every start bound as inclusive, so each page repeats the last row
struct InclusiveStore(Arc<MemoryLogStore>);

#[async_trait]
impl LogStore for InclusiveStore {
    fn max_rows(&self) -> usize {
        self.0.max_rows()
    }

    async fn fetch(&self, request: &FetchRequest) -> std::result::Result<RawBatch, StoreError> {
        let mut inclusive = request.clone();
        inclusive.start = StartBound::Inclusive(*request.start.index());
        self.0.fetch(&inclusive).await
    }

    async fn write(&self, batch: &WriteBatch) -> std::result::Result<(), StoreError> {
        self.0.write(batch).await
    }
}

/// Cancels the token while a fetch is in flight
struct CancellingStore {
    inner: Arc<MemoryLogStore>,
    token: CancellationToken,
}

#[async_trait]
impl LogStore for CancellingStore {
    fn max_rows(&self) -> usize {
        self.inner.max_rows()
    }

    async fn fetch(&self, request: &FetchRequest) -> std::result::Result<RawBatch, StoreError> {
        self.token.cancel();
        self.inner.fetch(request).await
    }

    async fn write(&self, batch: &WriteBatch) -> std::result::Result<(), StoreError> {
        self.inner.write(batch).await
    }
}

/// Returns fixed records regardless of the request
struct FixedStore(Vec<&'static str>);

#[async_trait]
impl LogStore for FixedStore {
    fn max_rows(&self) -> usize {
        100
    }

    async fn fetch(&self, _request: &FetchRequest) -> std::result::Result<RawBatch, StoreError> {
        Ok(RawBatch::new(self.0.iter().map(|r| r.to_string()).collect()))
    }

    async fn write(&self, _batch: &WriteBatch) -> std::result::Result<(), StoreError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_read_750_rows_in_two_batches() {
    let store = depth_store(750, 500);
    let mut reader = LogDataReader::new(store.clone(), vec!["MNEM1".into()], m(0.0), m(1000.0)).unwrap();

    let first = reader.next_batch().await.unwrap().unwrap();
    assert_eq!(first.len(), 500);
    assert!(matches!(reader.state(), CursorState::Ready(StartBound::Exclusive(_))));

    let second = reader.next_batch().await.unwrap().unwrap();
    assert_eq!(second.len(), 250);
    assert_eq!(reader.state(), &CursorState::Exhausted);

    assert!(reader.next_batch().await.unwrap().is_none());
    assert_eq!(store.fetch_count(), 2);
    assert_eq!(second.first_index(), Some(&m(500.0)));
    assert_eq!(second.last_index(), Some(&m(749.0)));
}

#[tokio::test]
async fn test_empty_first_response_exhausts_cursor() {
    let store = depth_store(0, 500);
    let mut reader = LogDataReader::new(store.clone(), vec!["MNEM1".into()], m(0.0), m(1000.0)).unwrap();

    assert!(reader.next_batch().await.unwrap().is_none());
    assert_eq!(reader.state(), &CursorState::Exhausted);
    assert!(reader.next_batch().await.unwrap().is_none());
    assert_eq!(store.fetch_count(), 1);
}

#[tokio::test]
async fn test_rows_keep_curve_order() {
    let store = depth_store(3, 10);
    let mut reader =
        LogDataReader::new(store, vec!["MNEM2".into(), "MNEM1".into()], m(0.0), m(10.0)).unwrap();

    let batch = reader.next_batch().await.unwrap().unwrap();
    assert_eq!(batch.curve_names(), &["MNEM2".to_string(), "MNEM1".to_string()]);
    assert_eq!(
        batch.rows()[2].values,
        vec![Some(CurveValue::Text("S2".into())), Some(CurveValue::Numeric(1.0))]
    );
}

#[tokio::test]
async fn test_progress_is_monotonic() {
    let store = depth_store(1001, 64);
    let mut reader = LogDataReader::new(store, vec!["MNEM1".into()], m(0.0), m(1000.0)).unwrap();
    assert_eq!(reader.progress().unwrap(), 0.0);

    let mut previous = 0.0;
    let mut batches = 0;
    while let Some(batch) = reader.next_batch().await.unwrap() {
        let progress = progress_of(&batch);
        assert!(progress >= previous, "{} after {}", progress, previous);
        assert!((0.0..=1.0).contains(&progress));
        previous = progress;
        batches += 1;
    }
    assert_eq!(batches, 16);
    assert_eq!(previous, 1.0);
}

#[tokio::test]
async fn test_progress_against_adjusted_bounds() {
    let store = depth_store(100, 50);
    let mut reader = LogDataReader::new(store, vec!["MNEM1".into()], m(0.0), m(1000.0))
        .unwrap()
        .with_progress_bounds(None, Some(m(99.0)))
        .unwrap();

    let first = reader.next_batch().await.unwrap().unwrap();
    assert!((first.progress() - 49.0 / 99.0).abs() < 1e-12);
    let second = reader.next_batch().await.unwrap().unwrap();
    assert_eq!(second.progress(), 1.0);
}

#[tokio::test]
async fn test_inclusive_store_duplicates_are_dropped() {
    let inner = depth_store(10, 4);
    let store = Arc::new(InclusiveStore(inner.clone()));
    let mut reader = LogDataReader::new(store, vec!["MNEM1".into()], m(0.0), m(100.0)).unwrap();

    let mut sizes = Vec::new();
    let mut indices = Vec::new();
    while let Some(batch) = reader.next_batch().await.unwrap() {
        sizes.push(batch.len());
        indices.extend(batch.rows().iter().map(|r| r.index));
    }

    assert_eq!(sizes, vec![4, 3, 3]);
    assert_eq!(indices, (0..10).map(|i| m(i as f64)).collect::<Vec<_>>());
    assert_eq!(inner.fetch_count(), 4);
}

#[tokio::test]
async fn test_sub_epsilon_steps_are_not_skipped() {
    let header = LogHeader::unitless(vec!["GR".into()]);
    let rows = (0..6)
        .map(|i| Row::new(m(100.0 + i as f64 * 0.0001), vec![Some(CurveValue::Numeric(i as f64))]))
        .collect();
    let store = Arc::new(MemoryLogStore::new(header, 2).unwrap().with_rows(rows).unwrap());

    let mut reader = LogDataReader::new(store, vec!["GR".into()], m(100.0), m(101.0)).unwrap();
    let curves = reader.read_to_end().await.unwrap();
    assert_eq!(curves.len(), 6);
}

#[tokio::test]
async fn test_cancel_between_fetches() {
    let store = depth_store(100, 10);
    let token = CancellationToken::new();
    let mut reader = LogDataReader::new(store.clone(), vec!["MNEM1".into()], m(0.0), m(100.0))
        .unwrap()
        .with_cancellation(token.clone());

    assert_eq!(reader.next_batch().await.unwrap().unwrap().len(), 10);
    token.cancel();

    assert!(reader.next_batch().await.unwrap().is_none());
    assert!(reader.was_cancelled());
    assert_eq!(reader.state(), &CursorState::Exhausted);
    assert_eq!(store.fetch_count(), 1);
}

#[tokio::test]
async fn test_cancel_during_fetch_flushes_batch() {
    let inner = depth_store(100, 10);
    let token = CancellationToken::new();
    let store = Arc::new(CancellingStore {
        inner: inner.clone(),
        token: token.clone(),
    });
    let mut reader = LogDataReader::new(store, vec!["MNEM1".into()], m(0.0), m(100.0))
        .unwrap()
        .with_cancellation(token);

    let in_flight = reader.next_batch().await.unwrap();
    assert_eq!(in_flight.map(|b| b.len()), Some(10));
    assert!(reader.next_batch().await.unwrap().is_none());
    assert_eq!(inner.fetch_count(), 1);
}

#[tokio::test]
async fn test_resume_after_failure() {
    let store = depth_store(30, 10);
    store.fail_on_fetch(2);

    let mut reader = LogDataReader::new(store.clone(), vec!["MNEM1".into()], m(0.0), m(100.0)).unwrap();
    let mut curves = CurveSet::new(vec!["MNEM1".into()]);
    curves.extend_from_batch(&reader.next_batch().await.unwrap().unwrap()).unwrap();

    let err = reader.next_batch().await.unwrap_err();
    assert!(matches!(err, LogDataError::Store(_)));
    let resume_at = *reader.last_index().unwrap();

    let mut resumed = LogDataReader::new(store, vec!["MNEM1".into()], m(0.0), m(100.0))
        .unwrap()
        .starting_after(resume_at)
        .unwrap();
    while let Some(batch) = resumed.next_batch().await.unwrap() {
        curves.extend_from_batch(&batch).unwrap();
    }

    assert_eq!(curves.len(), 30);
    assert_eq!(curves.indices(), (0..30).map(|i| m(i as f64)).collect::<Vec<_>>().as_slice());
}

#[tokio::test]
async fn test_malformed_record_fails_cursor() {
    let store = Arc::new(FixedStore(vec!["1,2", "oops,3"]));
    let mut reader = LogDataReader::new(store, vec!["GR".into()], m(0.0), m(10.0)).unwrap();

    match reader.next_batch().await {
        Err(LogDataError::RecordFormat { record, .. }) => assert_eq!(record, "oops,3"),
        other => panic!("Expected RecordFormat, got {:?}", other.map(|b| b.map(|b| b.len()))),
    }
    assert!(matches!(reader.state(), CursorState::Failed(_)));
    assert_eq!(reader.last_index(), None);
}

#[tokio::test]
async fn test_wrong_index_kind_fails_cursor() {
    let store = Arc::new(FixedStore(vec!["2023-05-01T10:00:00.000Z,2"]));
    let mut reader = LogDataReader::new(store, vec!["GR".into()], m(0.0), m(10.0)).unwrap();

    assert!(matches!(reader.next_batch().await, Err(LogDataError::RecordFormat { .. })));
    assert!(matches!(reader.next_batch().await, Err(LogDataError::CursorFailed(_))));
}

#[tokio::test]
async fn test_full_page_without_progress_fails_cursor() {
    let inner = depth_store(5, 1);
    let store = Arc::new(InclusiveStore(inner.clone()));
    let mut reader = LogDataReader::new(store, vec!["MNEM1".into()], m(0.0), m(100.0)).unwrap();

    assert_eq!(reader.next_batch().await.unwrap().unwrap().len(), 1);
    match reader.next_batch().await {
        Err(LogDataError::StalledFetch { after, rows }) => {
            assert_eq!(after, "0");
            assert_eq!(rows, 1);
        }
        other => panic!("Expected StalledFetch, got {:?}", other.map(|b| b.map(|b| b.len()))),
    }
    assert!(matches!(reader.state(), CursorState::Failed(_)));
    assert_eq!(reader.last_index(), Some(&m(0.0)));
    assert_eq!(inner.fetch_count(), 2);
}

#[tokio::test]
async fn test_time_span_indexed_read() {
    let header = LogHeader::new(vec!["ROP".into()], vec!["m/h".into()]).unwrap();
    let span = |millis| Index::TimeSpan(TimeSpanIndex::from_millis(millis));
    let rows = (0..5)
        .map(|i| Row::new(span(i * 2000), vec![Some(CurveValue::Numeric(i as f64))]))
        .collect();
    let store = Arc::new(MemoryLogStore::new(header, 2).unwrap().with_rows(rows).unwrap());

    let mut reader = LogDataReader::new(store.clone(), vec!["ROP".into()], span(0), span(10_000)).unwrap();
    let mut sizes = Vec::new();
    let mut last_progress = 0.0;
    while let Some(batch) = reader.next_batch().await.unwrap() {
        assert!(batch.rows().iter().all(|r| r.index.kind() == IndexKind::TimeSpan));
        sizes.push(batch.len());
        last_progress = batch.progress();
    }

    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(reader.last_index(), Some(&span(8000)));
    assert_eq!(last_progress, 0.8);
    assert_eq!(store.fetch_requests()[1].start, StartBound::Exclusive(span(2000)));
}

#[tokio::test]
async fn test_time_indexed_read() {
    let header = LogHeader::new(vec!["ROP".into()], vec!["m/h".into()]).unwrap();
    let base = DateTimeIndex::parse("2023-05-01T10:00:00.000Z").unwrap().value();
    let rows = (0..61)
        .map(|i| {
            Row::new(
                Index::DateTime(DateTimeIndex::new(base + chrono::Duration::seconds(i))),
                vec![Some(CurveValue::Numeric(i as f64))],
            )
        })
        .collect();
    let store = Arc::new(MemoryLogStore::new(header, 25).unwrap().with_rows(rows).unwrap());

    let mut reader = LogDataReader::new(
        store,
        vec!["ROP".into()],
        ts("2023-05-01T10:00:00.000Z"),
        ts("2023-05-01T10:01:00.000Z"),
    )
    .unwrap();

    let mut sizes = Vec::new();
    let mut last_progress = 0.0;
    while let Some(batch) = reader.next_batch().await.unwrap() {
        sizes.push(batch.len());
        last_progress = batch.progress();
    }
    assert_eq!(sizes, vec![25, 25, 11]);
    assert_eq!(last_progress, 1.0);
    assert_eq!(reader.last_index(), Some(&ts("2023-05-01T10:01:00.000Z")));
}

#[tokio::test]
async fn test_read_all_stream() {
    let store = depth_store(750, 500);
    let batches: Vec<RowBatch> = read_all(store, vec!["MNEM1".into()], m(0.0), m(1000.0))
        .try_collect()
        .await
        .unwrap();

    let sizes: Vec<usize> = batches.iter().map(RowBatch::len).collect();
    assert_eq!(sizes, vec![500, 250]);
}

#[tokio::test]
async fn test_read_all_over_dyn_store() {
    let store: Arc<dyn LogStore> = depth_store(12, 5);
    let options = TransferOptions::default().with_max_rows(4);
    let stream = read_all_with_options(store, vec!["MNEM2".into()], m(0.0), m(100.0), options);
    futures::pin_mut!(stream);

    let mut count = 0;
    let mut batches = 0;
    while let Some(batch) = stream.next().await {
        let batch = batch.unwrap();
        assert!(batch.len() <= 4);
        count += batch.len();
        batches += 1;
    }
    assert_eq!((count, batches), (12, 3));
}

#[tokio::test]
async fn test_read_all_surfaces_construction_errors() {
    let store = depth_store(1, 5);
    let results: Vec<Result<RowBatch>> =
        read_all(store, vec!["MNEM1".into()], m(0.0), ts("2023-05-01T10:00:00.000Z"))
            .collect()
            .await;
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(LogDataError::TypeMismatch { .. })));
}

#[tokio::test]
async fn test_into_stream_custom_delimiter() {
    let header = LogHeader::unitless(vec!["GR".into()]);
    let rows = (0..5)
        .map(|i| Row::new(Index::depth(i as f64, DepthUnit::Feet), vec![Some(CurveValue::Numeric(1.5))]))
        .collect();
    let store = Arc::new(
        MemoryLogStore::new(header, 2)
            .unwrap()
            .with_delimiter(';')
            .with_rows(rows)
            .unwrap(),
    );

    let options = TransferOptions::default().with_delimiter(';');
    let reader = LogDataReader::with_options(
        store,
        vec!["GR".into()],
        Index::depth(0.0, DepthUnit::Feet),
        Index::depth(10.0, DepthUnit::Feet),
        &options,
    )
    .unwrap();

    let rows: Vec<Row> = reader
        .into_stream()
        .map_ok(|batch| futures::stream::iter(batch.into_rows().into_iter().map(Ok::<Row, LogDataError>)))
        .try_flatten()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.index.depth_unit() == Some(DepthUnit::Feet)));
}
