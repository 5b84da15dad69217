//! Integration tests for Store action broadcasting
//!
//! A view that dispatches an intent often needs to wait for the outcome the
//! resulting effects produce (a payment settling, for instance). These tests
//! cover that observation path without any UI attached.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use event_place_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use event_place_runtime::{Store, StoreError};
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Start a multi-step job
    Start { id: u64 },
    /// One step of the job finished
    StepCompleted { id: u64, step: u32 },
    /// Job finished (terminal action)
    Completed { id: u64 },
    /// Job rejected (terminal action)
    Rejected { id: u64, reason: String },
    /// Plain counter bump, no effects
    Bump,
}

#[derive(Debug, Clone, Default)]
struct TestState {
    counter: u32,
    steps: Vec<u32>,
    finished: Option<u64>,
}

struct TestEnvironment;

struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Start { id } if id == 0 => {
                smallvec![Effect::Future(Box::pin(async move {
                    Some(TestAction::Rejected {
                        id,
                        reason: "id must be positive".to_string(),
                    })
                }))]
            },
            TestAction::Start { id } => {
                state.steps.clear();
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(TestAction::StepCompleted { id, step: 1 })
                }))]
            },
            TestAction::StepCompleted { id, step } => {
                state.steps.push(step);
                if step < 3 {
                    smallvec![Effect::Future(Box::pin(async move {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Some(TestAction::StepCompleted { id, step: step + 1 })
                    }))]
                } else {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(TestAction::Completed { id })
                    }))]
                }
            },
            TestAction::Completed { id } => {
                state.finished = Some(id);
                smallvec![Effect::None]
            },
            TestAction::Rejected { .. } => smallvec![Effect::None],
            TestAction::Bump => {
                state.counter += 1;
                smallvec![Effect::None]
            },
        }
    }
}

fn store() -> Store<TestState, TestAction, TestEnvironment, TestReducer> {
    Store::new(TestState::default(), TestReducer, TestEnvironment)
}

fn is_terminal(id: u64) -> impl Fn(&TestAction) -> bool {
    move |action| {
        matches!(action, TestAction::Completed { id: done } if *done == id)
            || matches!(action, TestAction::Rejected { id: failed, .. } if *failed == id)
    }
}

// ============================================================================
// send_and_wait_for
// ============================================================================

#[tokio::test]
async fn test_send_and_wait_for_terminal_action() {
    let store = store();

    let result = store
        .send_and_wait_for(TestAction::Start { id: 7 }, is_terminal(7), Duration::from_secs(2))
        .await
        .unwrap();

    assert_eq!(result, TestAction::Completed { id: 7 });
}

#[tokio::test]
async fn test_terminal_action_is_reduced_before_it_is_observed() {
    let store = store();

    store
        .send_and_wait_for(TestAction::Start { id: 3 }, is_terminal(3), Duration::from_secs(2))
        .await
        .unwrap();

    // The terminal action is already applied when the waiter wakes up
    assert_eq!(store.state(|s| s.finished).await, Some(3));
    assert_eq!(store.state(|s| s.steps.clone()).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_send_and_wait_for_failure_outcome() {
    let store = store();

    let result = store
        .send_and_wait_for(TestAction::Start { id: 0 }, is_terminal(0), Duration::from_secs(1))
        .await
        .unwrap();

    match result {
        TestAction::Rejected { reason, .. } => assert_eq!(reason, "id must be positive"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_and_wait_for_times_out() {
    let store = store();

    // Bump produces no effects, so nothing is ever broadcast
    let result = store
        .send_and_wait_for(
            TestAction::Bump,
            |a| matches!(a, TestAction::Completed { .. }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
    assert_eq!(store.state(|s| s.counter).await, 1);
}

#[tokio::test]
async fn test_send_and_wait_for_after_shutdown() {
    let store = store();
    store.shutdown(Duration::from_secs(1)).await.unwrap();

    let result = store
        .send_and_wait_for(TestAction::Start { id: 1 }, is_terminal(1), Duration::from_millis(50))
        .await;

    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
}

// ============================================================================
// subscribe_actions
// ============================================================================

#[tokio::test]
async fn test_subscriber_sees_every_effect_action_in_order() {
    let store = store();
    let mut rx = store.subscribe_actions();

    store.send(TestAction::Start { id: 9 }).await.unwrap();

    let mut seen = Vec::new();
    while seen.len() < 4 {
        let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for broadcast")
            .expect("broadcast closed");
        seen.push(action);
    }

    assert_eq!(
        seen,
        vec![
            TestAction::StepCompleted { id: 9, step: 1 },
            TestAction::StepCompleted { id: 9, step: 2 },
            TestAction::StepCompleted { id: 9, step: 3 },
            TestAction::Completed { id: 9 },
        ]
    );
}

#[tokio::test]
async fn test_directly_sent_actions_are_not_broadcast() {
    let store = store();
    let mut rx = store.subscribe_actions();

    store.send(TestAction::Bump).await.unwrap();

    let received = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
    assert!(received.is_err(), "Bump must not be broadcast");
}

#[tokio::test]
async fn test_concurrent_waiters_get_their_own_outcome() {
    let store = store();

    let waiters: Vec<_> = (1..=3_u64)
        .map(|id| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .send_and_wait_for(
                        TestAction::Start { id },
                        is_terminal(id),
                        Duration::from_secs(2),
                    )
                    .await
            })
        })
        .collect();

    for (idx, waiter) in waiters.into_iter().enumerate() {
        let id = u64::try_from(idx).unwrap() + 1;
        let result = waiter.await.unwrap().unwrap();
        assert_eq!(result, TestAction::Completed { id });
    }
}
