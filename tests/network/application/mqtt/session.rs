use super::super::super::mock::MockBroker;
use super::*;
use libmqtt::network::application::mqtt::{ConnectPacket, Error};
use libmqtt::network::error::Error as NetworkError;
use std::time::Duration;

#[test]
fn test_connect_sends_connect_and_returns_connack() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    broker.push(&connack(false, ConnectReturnCode::Accepted));

    let opts = Options {
        keep_alive_seconds: 30,
        username: Some("user"),
        password: Some("pass"),
        ..options()
    };
    let ack = client.connect(&opts).unwrap();

    assert_eq!(ack.return_code, ConnectReturnCode::Accepted);
    assert!(!ack.session_present);
    assert!(client.is_connected());
    assert_eq!(
        broker.last_target(),
        Some(("broker.local".to_string(), 1883, Duration::from_millis(5_000)))
    );

    let sent = broker.take_sent();
    assert_eq!(sent.len(), 1);
    let Packet::Connect(connect) = &sent[0] else {
        panic!("expected CONNECT, got {:?}", sent[0]);
    };
    assert_eq!(connect.client_id.as_str(), "libmqtt-test");
    assert_eq!(connect.keep_alive, 30);
    assert!(connect.clean_session);
    assert_eq!(connect.username.as_deref(), Some("user"));
    assert_eq!(connect.password.as_deref(), Some(&b"pass"[..]));
}

#[test]
fn test_connect_from_json_options() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    broker.push(&accepted());

    let opts = Options::from_json(
        r#"{"host":"10.0.0.2","port":1884,"client_id":"dev-1","clean_session":false,
            "will":{"topic":"dev-1/status","payload":"gone","qos":1}}"#,
    )
    .unwrap();
    client.connect(&opts).unwrap();

    assert_eq!(broker.last_target().unwrap().1, 1884);
    let connect = client.connect_packet().unwrap();
    assert!(!connect.clean_session);
    let will = connect.will.as_ref().unwrap();
    assert_eq!(will.topic.as_str(), "dev-1/status");
    assert_eq!(will.qos, QoS::AtLeastOnce);
}

#[test]
fn test_connect_rejected() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    broker.push(&connack(false, ConnectReturnCode::NotAuthorized));

    assert_eq!(
        client.connect(&options()),
        Err(Error::ConnectionRejected(ConnectReturnCode::NotAuthorized))
    );
    assert!(!client.is_connected());
}

#[test]
fn test_connect_invalid_response() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    broker.push(&Packet::PingResp);

    assert_eq!(client.connect(&options()), Err(Error::InvalidResponse));
    assert!(!client.is_connected());
}

#[test]
fn test_connect_fails_when_publish_precedes_connack() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    broker.push(&publish("early", b"x", QoS::AtLeastOnce, Some(3)));
    broker.push(&accepted());

    assert_eq!(client.connect(&options()), Err(Error::InvalidResponse));
    assert!(!client.is_connected());
    assert_eq!(client.inbound_len(), 0);

    // Only the CONNECT went out; the publish was not acknowledged.
    let sent = broker.take_sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(sent[0], Packet::Connect(_)));
}

#[test]
fn test_connect_times_out_without_connack() {
    let broker = MockBroker::new();
    let mut client = Client::with_time_source(broker.connector(), SteppingClock::new(1_000));

    let opts = Options {
        response_timeout_ms: 3_000,
        ..options()
    };
    assert_eq!(client.connect(&opts), Err(Error::Timeout));
    assert!(!client.is_connected());
    assert_eq!(
        client.publish("t", b"x", QoS::AtMostOnce, false),
        Err(Error::NotConnected)
    );
}

#[test]
fn test_connect_refused_by_transport() {
    let broker = MockBroker::new();
    broker.refuse_connections(true);
    let mut client = Client::new(broker.connector());

    assert_eq!(
        client.connect(&options()),
        Err(Error::Transport(NetworkError::ConnectionRefused))
    );
    assert!(!client.is_connected());
}

#[test]
fn test_connect_rejects_invalid_options() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    let opts = Options {
        clean_session: false,
        ..Options::new("broker.local", "")
    };

    assert_eq!(client.connect(&opts), Err(Error::InvalidOptions));
    assert_eq!(broker.connects(), 0);
}

#[test]
fn test_connect_clears_inbound_queue() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);

    broker.push(&publish("a", b"1", QoS::AtMostOnce, None));
    client.recv().unwrap();
    assert_eq!(client.inbound_len(), 1);

    broker.push(&accepted());
    client.connect(&options()).unwrap();
    assert_eq!(client.inbound_len(), 0);
    assert_eq!(broker.connects(), 2);
}

#[test]
fn test_clean_connect_discards_previous_session() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    client.publish("t", b"x", QoS::AtLeastOnce, false).unwrap();
    broker.push(&suback(2, &[1]));
    client.subscribe("s", QoS::AtLeastOnce).unwrap();
    broker.push(&publish("in", b"held", QoS::ExactlyOnce, Some(4)));
    client.recv().unwrap();

    // A resumed session keeps everything.
    broker.push(&connack(true, ConnectReturnCode::Accepted));
    let resume = Options {
        clean_session: false,
        ..options()
    };
    client.connect(&resume).unwrap();
    assert_eq!(client.pending_count(), 1);
    assert_eq!(client.incoming().len(), 1);
    assert_eq!(client.subscriptions().len(), 1);

    broker.push(&accepted());
    client.connect(&options()).unwrap();
    assert_eq!(client.pending_count(), 0);
    assert!(client.incoming().is_empty());
    assert!(client.subscriptions().is_empty());
}

#[test]
fn test_reconnect_over_live_connection() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    let id = client
        .publish("t/live", b"v", QoS::AtLeastOnce, false)
        .unwrap()
        .unwrap();
    broker.take_sent();

    broker.push(&connack(true, ConnectReturnCode::Accepted));
    client.reconnect().unwrap();
    assert_eq!(broker.connects(), 1);
    assert!(client.is_connected());

    let sent = broker.take_sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(sent[0], Packet::Connect(ConnectPacket { clean_session: false, .. })));
    let Packet::Publish(replayed) = &sent[1] else {
        panic!("expected PUBLISH, got {:?}", sent[1]);
    };
    assert_eq!(replayed.packet_id, Some(id));
    assert_eq!(replayed.topic.as_str(), "t/live");
    assert!(replayed.dup);
}

#[test]
fn test_reconnect_replays_pending_in_order() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);

    let a = client.publish("t/a", b"a", QoS::AtLeastOnce, false).unwrap();
    let b = client.publish("t/b", b"b", QoS::ExactlyOnce, false).unwrap();
    let c = client.publish("t/c", b"c", QoS::AtLeastOnce, true).unwrap();
    assert_eq!((a, b, c), (Some(1), Some(2), Some(3)));
    broker.take_sent();

    broker.break_connection();
    assert_eq!(
        client.recv(),
        Err(Error::Transport(NetworkError::ConnectionClosed))
    );
    assert!(!client.is_connected());

    broker.push(&connack(true, ConnectReturnCode::Accepted));
    let ack = client.reconnect().unwrap();
    assert!(ack.session_present);
    assert_eq!(broker.connects(), 2);

    let sent = broker.take_sent();
    assert_eq!(sent.len(), 4);
    let Packet::Connect(connect) = &sent[0] else {
        panic!("expected CONNECT, got {:?}", sent[0]);
    };
    assert!(!connect.clean_session);

    let replayed: Vec<(Option<u16>, &str, bool)> = sent[1..]
        .iter()
        .map(|packet| match packet {
            Packet::Publish(p) => (p.packet_id, p.topic.as_str(), p.dup),
            other => panic!("expected PUBLISH, got {other:?}"),
        })
        .collect();
    assert_eq!(
        replayed,
        vec![
            (Some(1), "t/a", true),
            (Some(2), "t/b", true),
            (Some(3), "t/c", true)
        ]
    );
    assert_eq!(client.pending_count(), 3);
}

#[test]
fn test_reconnect_without_session_keeps_pending() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);

    client.publish("t/a", b"a", QoS::AtLeastOnce, false).unwrap();
    client.publish("t/b", b"b", QoS::ExactlyOnce, false).unwrap();
    broker.take_sent();
    broker.break_connection();
    let _ = client.recv();

    broker.push(&connack(false, ConnectReturnCode::Accepted));
    client.reconnect().unwrap();

    let sent = broker.take_sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(sent[0], Packet::Connect(ConnectPacket { clean_session: false, .. })));
    assert_eq!(client.pending_count(), 2);
    assert!(client.outgoing().iter().all(|entry| !entry.publish.dup));
}

#[test]
fn test_reconnect_requires_prior_connect() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    assert_eq!(client.reconnect(), Err(Error::NotConnected));
}

#[test]
fn test_publish_requires_connection() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    assert_eq!(
        client.publish("t", b"x", QoS::AtLeastOnce, false),
        Err(Error::NotConnected)
    );
}

#[test]
fn test_failed_write_keeps_publish_pending() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    broker.break_connection();

    assert_eq!(
        client.publish("t", b"x", QoS::AtLeastOnce, false),
        Err(Error::Transport(NetworkError::WriteError))
    );
    assert_eq!(client.pending_count(), 1);
    assert!(client.is_pending(1));
    assert!(!client.is_connected());
}

#[test]
fn test_disconnect_sends_disconnect_and_keeps_session() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    client.publish("t", b"x", QoS::AtLeastOnce, false).unwrap();
    broker.take_sent();

    client.disconnect().unwrap();
    assert_eq!(broker.take_sent(), vec![Packet::Disconnect]);
    assert!(!client.is_connected());
    assert_eq!(client.pending_count(), 1);
    assert_eq!(
        client.publish("t", b"y", QoS::AtMostOnce, false),
        Err(Error::NotConnected)
    );
    // Nothing to do the second time.
    assert_eq!(client.disconnect(), Ok(()));
}

#[test]
fn test_ping() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    broker.push(&Packet::PingResp);

    client.ping().unwrap();
    assert_eq!(broker.take_sent(), vec![Packet::PingReq]);
    assert_eq!(broker.pending_bytes(), 0);
}

#[test]
fn test_ping_times_out() {
    let broker = MockBroker::new();
    let mut client = Client::with_time_source(broker.connector(), SteppingClock::new(500));
    broker.push(&accepted());
    client.connect(&options()).unwrap();

    assert_eq!(client.ping(), Err(Error::Timeout));
    assert!(client.is_connected());
}
