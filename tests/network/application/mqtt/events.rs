use super::super::super::mock::MockBroker;
use super::*;
use libmqtt::network::application::mqtt::{Error, Event, EventKind};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[test]
fn test_connect_handler_edits_outgoing_connect() {
    fn shorten_keep_alive(event: &mut Event<'_>) -> Result<(), Error> {
        if let Event::Connect(connect) = event {
            connect.keep_alive = 5;
        }
        Ok(())
    }

    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    client.once(EventKind::Connect, shorten_keep_alive).unwrap();
    broker.push(&accepted());
    client.connect(&options()).unwrap();

    let sent = broker.take_sent();
    let Packet::Connect(connect) = &sent[0] else {
        panic!("expected CONNECT, got {:?}", sent[0]);
    };
    assert_eq!(connect.keep_alive, 5);

    // The edit sticks to the stored CONNECT used for reconnects.
    broker.break_connection();
    let _ = client.recv();
    broker.push(&accepted());
    client.reconnect().unwrap();
    let sent = broker.take_sent();
    let Packet::Connect(connect) = &sent[0] else {
        panic!("expected CONNECT, got {:?}", sent[0]);
    };
    assert_eq!(connect.keep_alive, 5);
}

#[test]
fn test_persistent_handlers_run_before_one_shot() {
    static TRACE: AtomicU32 = AtomicU32::new(0);
    fn h1(_: &mut Event<'_>) -> Result<(), Error> {
        let t = TRACE.load(Ordering::SeqCst);
        TRACE.store(t * 10 + 1, Ordering::SeqCst);
        Ok(())
    }
    fn h2(_: &mut Event<'_>) -> Result<(), Error> {
        let t = TRACE.load(Ordering::SeqCst);
        TRACE.store(t * 10 + 2, Ordering::SeqCst);
        Ok(())
    }

    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    client.on(EventKind::Connected, h1).unwrap();
    client.once(EventKind::Connected, h2).unwrap();

    broker.push(&accepted());
    client.connect(&options()).unwrap();
    assert_eq!(TRACE.load(Ordering::SeqCst), 12);

    broker.push(&accepted());
    client.connect(&options()).unwrap();
    assert_eq!(TRACE.load(Ordering::SeqCst), 121);
}

#[test]
fn test_connected_handler_sees_connack() {
    static SESSION_PRESENT: AtomicBool = AtomicBool::new(false);
    fn record(event: &mut Event<'_>) -> Result<(), Error> {
        if let Event::Connected(ack) = event {
            SESSION_PRESENT.store(ack.session_present, Ordering::SeqCst);
        }
        Ok(())
    }

    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    client.on(EventKind::Connected, record).unwrap();
    broker.push(&connack(true, ConnectReturnCode::Accepted));
    client.connect(&options()).unwrap();
    assert!(SESSION_PRESENT.load(Ordering::SeqCst));
}

#[test]
fn test_failing_connect_handler_aborts_connect() {
    static CALLS: AtomicU32 = AtomicU32::new(0);
    fn refuse(_: &mut Event<'_>) -> Result<(), Error> {
        Err(Error::HandlerFailed)
    }
    fn count(_: &mut Event<'_>) -> Result<(), Error> {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    client.on(EventKind::Connect, refuse).unwrap();
    client.on(EventKind::Connected, count).unwrap();
    broker.push(&accepted());

    assert_eq!(client.connect(&options()), Err(Error::HandlerFailed));
    assert!(broker.sent_bytes().is_empty());
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn test_rejected_connect_skips_connected_handlers() {
    static CALLS: AtomicU32 = AtomicU32::new(0);
    fn count(_: &mut Event<'_>) -> Result<(), Error> {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    client.on(EventKind::Connected, count).unwrap();
    broker.push(&connack(false, ConnectReturnCode::ServerUnavailable));

    assert!(client.connect(&options()).is_err());
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn test_clear_handlers() {
    static CALLS: AtomicU32 = AtomicU32::new(0);
    fn count(_: &mut Event<'_>) -> Result<(), Error> {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    client.on(EventKind::Connect, count).unwrap();
    client.once(EventKind::Connected, count).unwrap();
    client.clear_handlers();
    assert_eq!(client.events_mut().handler_count(EventKind::Connect), 0);

    broker.push(&accepted());
    client.connect(&options()).unwrap();
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}
