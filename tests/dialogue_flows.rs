//! Preference-driven reply shaping through the engine.

mod common;

use common::test_engine;
use ledgerbot::models::DetailLevel;

async fn reply(engine: &ledgerbot::services::ChatEngine, user: &str, text: &str) -> String {
    engine
        .handle_message(user, text)
        .await
        .expect("turn failed")
        .expect("expected a reply")
}

#[tokio::test]
async fn full_detail_appends_the_topic_explanation() {
    let (engine, _kv) = test_engine();

    {
        let handle = engine.sessions().get_or_create("alice").await;
        handle.lock().await.preferences.detail = DetailLevel::Full;
    }

    let answer = reply(&engine, "alice", "create an invoice").await;
    // The long-form explanation rides along after the templated reply.
    assert!(answer.contains("creating records"), "got: {answer}");
}

#[tokio::test]
async fn brief_detail_strips_the_chrome() {
    let (engine, _kv) = test_engine();

    {
        let handle = engine.sessions().get_or_create("erin").await;
        handle.lock().await.preferences.detail = DetailLevel::Brief;
    }

    let answer = reply(&engine, "erin", "show invoices").await;
    assert!(!answer.contains("\n\n"), "got: {answer}");
    assert!(answer.contains("Finance"), "got: {answer}");
}

#[tokio::test]
async fn emoji_can_be_turned_off() {
    let (engine, _kv) = test_engine();

    {
        let handle = engine.sessions().get_or_create("bob").await;
        handle.lock().await.preferences.emoji = false;
    }

    let greeting = reply(&engine, "bob", "hi").await;
    assert!(!greeting.contains('👋'), "got: {greeting}");

    reply(&engine, "bob", "no").await; // resolve the gate
    let thanks = reply(&engine, "bob", "thanks").await;
    assert!(!thanks.contains('😊'), "got: {thanks}");
}

#[tokio::test]
async fn follow_ups_are_counted_on_the_session() {
    let (engine, _kv) = test_engine();

    reply(&engine, "carol", "how do i create a purchase order").await;
    reply(&engine, "carol", "tell me more").await;
    reply(&engine, "carol", "go on").await;

    let handle = engine.sessions().get_or_create("carol").await;
    let session = handle.lock().await;
    assert_eq!(session.state.follow_up_count, 2);
}

#[tokio::test]
async fn topic_is_tracked_across_turns() {
    let (engine, _kv) = test_engine();

    reply(&engine, "dave", "show pending approvals").await;
    let handle = engine.sessions().get_or_create("dave").await;
    let session = handle.lock().await;
    assert_eq!(session.last_topic, Some(ledgerbot::models::Intent::View));
    assert_eq!(session.state.topic.as_deref(), Some("view"));
}
