//! OCR engine lifecycle tests.

mod helpers;

use doctext::plugins::MissingBackend;
use doctext::{DoctextError, EngineStatus, OcrEngineLifecycle};
use helpers::*;
use std::sync::Arc;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_engine_created_lazily_and_reused() {
    let factory = Arc::new(MockFactory::new(MockEngine::new("eng", vec![])));
    let mut lifecycle = OcrEngineLifecycle::new(factory.clone());

    assert_eq!(lifecycle.status(), EngineStatus::Uninitialized);
    assert_eq!(factory.creates(), 0);

    let engine = lifecycle.acquire("eng").await.unwrap();
    assert_eq!(engine.language(), "eng");
    assert_eq!(lifecycle.status(), EngineStatus::Ready);

    lifecycle.acquire("eng").await.unwrap();
    lifecycle.acquire("eng").await.unwrap();
    assert_eq!(factory.creates(), 1);

    lifecycle.terminate().await.unwrap();
    assert_eq!(lifecycle.status(), EngineStatus::Terminated);
    assert_eq!(factory.terminates(), 1);
}

#[tokio::test]
async fn test_terminate_is_idempotent() {
    let factory = Arc::new(MockFactory::new(MockEngine::new("eng", vec![])));
    let mut lifecycle = OcrEngineLifecycle::new(factory.clone());

    lifecycle.acquire("eng").await.unwrap();
    lifecycle.terminate().await.unwrap();
    lifecycle.terminate().await.unwrap();
    drop(lifecycle);

    assert_eq!(factory.terminates(), 1);
}

#[tokio::test]
async fn test_terminate_without_engine_makes_no_calls() {
    let factory = Arc::new(MockFactory::new(MockEngine::new("eng", vec![])));
    let mut lifecycle = OcrEngineLifecycle::new(factory.clone());

    lifecycle.terminate().await.unwrap();

    assert_eq!(lifecycle.status(), EngineStatus::Terminated);
    assert_eq!(factory.creates(), 0);
    assert_eq!(factory.terminates(), 0);
}

#[tokio::test]
async fn test_acquire_after_terminate_fails() {
    let factory = Arc::new(MockFactory::new(MockEngine::new("eng", vec![])));
    let mut lifecycle = OcrEngineLifecycle::new(factory.clone());

    lifecycle.acquire("eng").await.unwrap();
    lifecycle.terminate().await.unwrap();

    let err = lifecycle.acquire("eng").await.err().unwrap();
    assert!(matches!(err, DoctextError::EngineInit { .. }));
    assert_eq!(factory.creates(), 1);
}

#[tokio::test]
async fn test_factory_errors_become_engine_init() {
    let factory = Arc::new(MockFactory::failing(|| {
        DoctextError::MissingDependency("tesseract".to_string())
    }));
    let mut lifecycle = OcrEngineLifecycle::new(factory.clone());

    let err = lifecycle.acquire("eng").await.err().unwrap();
    assert!(matches!(err, DoctextError::EngineInit { .. }));
    assert!(err.to_string().contains("language 'eng'"));
    assert_eq!(lifecycle.status(), EngineStatus::Uninitialized);
}

#[tokio::test]
async fn test_unavailable_backend_yields_no_engine() {
    let mut lifecycle = OcrEngineLifecycle::new(Arc::new(MissingBackend::new("OCR", "ocr")));

    assert!(lifecycle.acquire_if_available("eng").await.unwrap().is_none());
    assert_eq!(lifecycle.status(), EngineStatus::Uninitialized);

    lifecycle.terminate().await.unwrap();
    assert_eq!(lifecycle.status(), EngineStatus::Terminated);
}

#[tokio::test]
async fn test_available_backend_acquires_once() {
    let factory = Arc::new(MockFactory::new(MockEngine::new("eng", vec![])));
    let mut lifecycle = OcrEngineLifecycle::new(factory.clone());

    assert!(lifecycle.acquire_if_available("eng").await.unwrap().is_some());
    assert!(lifecycle.acquire_if_available("eng").await.unwrap().is_some());
    assert_eq!(factory.creates(), 1);
}

#[tokio::test]
async fn test_language_mismatch_reuses_running_engine() {
    let factory = Arc::new(MockFactory::new(MockEngine::new("eng", vec![])));
    let mut lifecycle = OcrEngineLifecycle::new(factory.clone());

    lifecycle.acquire("eng").await.unwrap();
    let engine = lifecycle.acquire("deu").await.unwrap();

    assert_eq!(engine.language(), "eng");
    assert_eq!(*factory.languages.lock().unwrap(), vec!["eng".to_string()]);
}

#[tokio::test]
async fn test_drop_with_live_engine_schedules_terminate() {
    let factory = Arc::new(MockFactory::new(MockEngine::new("eng", vec![])));
    let mut lifecycle = OcrEngineLifecycle::new(factory.clone());
    lifecycle.acquire("eng").await.unwrap();

    drop(lifecycle);

    for _ in 0..10 {
        if factory.engine.terminated.load(Ordering::SeqCst) {
            break;
        }
        tokio::task::yield_now().await;
    }

    assert_eq!(factory.terminates(), 1);
}
