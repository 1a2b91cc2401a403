use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use splocli::dispatch::dispatch;

// Records every chunk the action saw, failing on a chosen chunk
fn recording_action(
    seen: Arc<Mutex<Vec<Vec<u32>>>>,
    fail_on: Option<Vec<u32>>,
) -> impl FnMut(Vec<u32>) -> Pin<Box<dyn Future<Output = Result<(), String>>>> {
    move |chunk: Vec<u32>| {
        let seen = Arc::clone(&seen);
        let fail_on = fail_on.clone();
        Box::pin(async move {
            seen.lock().unwrap().push(chunk.clone());
            if fail_on.as_deref() == Some(chunk.as_slice()) {
                Err("remote rejected batch".to_string())
            } else {
                Ok(())
            }
        })
    }
}

#[tokio::test]
async fn test_chunk_sizing_and_success_count() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let items: Vec<u32> = (1..=5).collect();

    let report = dispatch(&items, 2, false, recording_action(Arc::clone(&seen), None)).await;

    assert_eq!(
        *seen.lock().unwrap(),
        vec![vec![1, 2], vec![3, 4], vec![5]]
    );
    assert_eq!(report.succeeded, 5);
    assert!(report.all_succeeded());
}

#[tokio::test]
async fn test_halting_skips_remaining_chunks() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let items: Vec<u32> = (1..=6).collect();

    let report = dispatch(
        &items,
        2,
        true,
        recording_action(Arc::clone(&seen), Some(vec![3, 4])),
    )
    .await;

    // Chunk 3 is never invoked
    assert_eq!(*seen.lock().unwrap(), vec![vec![1, 2], vec![3, 4]]);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].index, 1);
}

#[tokio::test]
async fn test_non_halting_attempts_every_chunk() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let items: Vec<u32> = (1..=6).collect();

    let report = dispatch(
        &items,
        2,
        false,
        recording_action(Arc::clone(&seen), Some(vec![3, 4])),
    )
    .await;

    assert_eq!(
        *seen.lock().unwrap(),
        vec![vec![1, 2], vec![3, 4], vec![5, 6]]
    );
    assert_eq!(report.succeeded, 4);
    assert_eq!(report.failed.len(), 1);
    assert!(!report.all_succeeded());
}

#[tokio::test]
async fn test_empty_input_and_zero_batch_size() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let report = dispatch(&[], 2, true, recording_action(Arc::clone(&seen), None)).await;
    assert_eq!(report.succeeded, 0);
    assert!(report.all_succeeded());

    let items: Vec<u32> = vec![1, 2, 3];
    let report = dispatch(&items, 0, true, recording_action(Arc::clone(&seen), None)).await;
    assert_eq!(report.succeeded, 0);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_error_text_is_preserved() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let items: Vec<u32> = vec![7];

    let report = dispatch(
        &items,
        10,
        true,
        recording_action(Arc::clone(&seen), Some(vec![7])),
    )
    .await;

    assert_eq!(report.failed[0].error, "remote rejected batch");
}
