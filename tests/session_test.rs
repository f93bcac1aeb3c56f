use tally::broker::mock::MockBroker;
use tally::input::{self, Input};
use tally::notification::ParseError;
use tally::session::{Session, SessionConfig, SessionError};

const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:tally";
const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/tally";

fn build_session(broker: &MockBroker) -> Session {
    Session::new(
        Box::new(broker.clone()),
        Box::new(broker.clone()),
        SessionConfig {
            destination: TOPIC_ARN.to_string(),
            source: QUEUE_URL.to_string(),
        },
    )
}

#[tokio::test]
async fn push_round_trips_one_value() {
    let broker = MockBroker::new();
    let mut session = build_session(&broker);

    let total = session.push(5).await.unwrap();

    assert_eq!(total, 5);
    assert_eq!(session.pushes(), 1);
    // Consumed and acknowledged: nothing left in the queue
    assert_eq!(broker.pending(), 0);
    assert_eq!(broker.deleted().len(), 1);
}

#[tokio::test]
async fn totals_accumulate_across_pushes() {
    let broker = MockBroker::new();
    let mut session = build_session(&broker);

    assert_eq!(session.push(5).await.unwrap(), 5);
    assert_eq!(session.push(-3).await.unwrap(), 2);
    assert_eq!(session.pushes(), 2);
}

#[tokio::test]
async fn empty_batches_are_polled_again() {
    let broker = MockBroker::new();
    broker.delay_delivery(2);
    let mut session = build_session(&broker);

    let total = session.push(7).await.unwrap();

    assert_eq!(total, 7);
    // Two empty polls, then the one that delivered
    assert_eq!(broker.receive_count(), 3);
}

#[tokio::test]
async fn exit_performs_no_broker_calls() {
    let broker = MockBroker::new();
    let _session = build_session(&broker);

    assert_eq!(input::classify("exit"), Input::Exit);
    assert_eq!(broker.publish_count(), 0);
    assert_eq!(broker.receive_count(), 0);
}

#[tokio::test]
async fn publish_failure_is_fatal() {
    let broker = MockBroker::new();
    broker.fail_publish();
    let mut session = build_session(&broker);

    let err = session.push(5).await.unwrap_err();

    assert!(matches!(err, SessionError::Publish(_)));
    // The pipeline never reached the queue
    assert_eq!(broker.receive_count(), 0);
    assert_eq!(session.total(), 0);
}

#[tokio::test]
async fn receive_failure_is_fatal() {
    let broker = MockBroker::new();
    broker.fail_receive();
    let mut session = build_session(&broker);

    let err = session.push(5).await.unwrap_err();

    assert!(matches!(err, SessionError::Receive(_)));
    assert_eq!(session.total(), 0);
}

#[tokio::test]
async fn malformed_envelope_is_fatal() {
    let broker = MockBroker::new();
    broker.enqueue_raw("definitely not json");
    let mut session = build_session(&broker);

    let err = session.push(1).await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Parse(ParseError::InvalidEnvelope(_))
    ));
    // The poisoned message is not acknowledged
    assert!(broker.deleted().is_empty());
}

#[tokio::test]
async fn non_integer_payload_is_fatal() {
    let broker = MockBroker::new();
    broker.enqueue_raw(r#"{"Type":"Notification","Message":"abc"}"#);
    let mut session = build_session(&broker);

    let err = session.push(1).await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Parse(ParseError::NonIntegerPayload { .. })
    ));
    assert_eq!(session.total(), 0);
}

#[tokio::test]
async fn delete_failure_is_fatal_but_total_already_moved() {
    let broker = MockBroker::new();
    broker.fail_delete();
    let mut session = build_session(&broker);

    let err = session.push(5).await.unwrap_err();

    assert!(matches!(err, SessionError::Delete(_)));
    // Accumulation happens before the acknowledgment stage
    assert_eq!(session.total(), 5);
}

#[tokio::test]
async fn only_first_message_of_batch_is_consumed() {
    let broker = MockBroker::new();
    // Another producer's notification is already waiting in the queue
    broker.enqueue_raw(r#"{"Type":"Notification","MessageId":"m-0","Message":"7"}"#);
    let mut session = build_session(&broker);

    let total = session.push(5).await.unwrap();

    // The older message wins the batch; ours stays queued un-deleted
    assert_eq!(total, 7);
    assert_eq!(broker.pending(), 1);
    assert_eq!(broker.deleted().len(), 1);
}
