use super::super::super::mock::MockBroker;
use super::*;
use libmqtt::network::application::mqtt::{Error, MAX_INBOUND, MAX_INFLIGHT};
use rand::Rng;
use std::collections::HashSet;

#[test]
fn test_qos0_publish_is_untracked() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);

    assert_eq!(
        client.publish("t", b"x", QoS::AtMostOnce, true),
        Ok(None)
    );
    assert_eq!(client.pending_count(), 0);
    let sent = broker.take_sent();
    let Packet::Publish(p) = &sent[0] else {
        panic!("expected PUBLISH, got {:?}", sent[0]);
    };
    assert!(p.retain);
    assert_eq!(p.packet_id, None);
}

#[test]
fn test_qos1_publish_retired_by_puback() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);

    let id = client
        .publish("sensors/t", b"23.5", QoS::AtLeastOnce, false)
        .unwrap()
        .unwrap();
    assert!(client.is_pending(id));
    assert_eq!(
        broker.take_sent(),
        vec![publish("sensors/t", b"23.5", QoS::AtLeastOnce, Some(id))]
    );

    broker.push(&Packet::PubAck(id));
    client.recv().unwrap();
    assert!(!client.is_pending(id));
    assert_eq!(client.inbound_len(), 0);
    assert!(broker.take_sent().is_empty());
}

#[test]
fn test_qos2_publish_survives_pubrec() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);

    let id = client
        .publish("t", b"x", QoS::ExactlyOnce, false)
        .unwrap()
        .unwrap();
    broker.take_sent();

    broker.push(&Packet::PubRec(id));
    client.recv().unwrap();
    assert!(client.is_pending(id));
    assert!(client.outgoing().get(id).unwrap().released);
    assert_eq!(broker.take_sent(), vec![Packet::PubRel(id)]);

    broker.push(&Packet::PubComp(id));
    client.recv().unwrap();
    assert!(!client.is_pending(id));
}

#[test]
fn test_unknown_acknowledgments_are_ignored() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    client.publish("t", b"x", QoS::AtLeastOnce, false).unwrap();
    broker.take_sent();

    broker.push(&Packet::PubAck(99));
    broker.push(&Packet::PubRec(98));
    broker.push(&Packet::PubComp(97));
    for _ in 0..3 {
        client.recv().unwrap();
    }
    assert!(broker.take_sent().is_empty());
    assert_eq!(client.pending_count(), 1);
    assert_eq!(client.inbound_len(), 0);
}

#[test]
fn test_inbound_qos0_is_delivered() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    let message = publish("news", b"hi", QoS::AtMostOnce, None);
    broker.push(&message);

    assert_eq!(client.next_message().unwrap(), message);
    assert!(broker.take_sent().is_empty());
}

#[test]
fn test_inbound_qos1_is_acknowledged_and_delivered() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    let message = publish("cmd", b"reboot", QoS::AtLeastOnce, Some(7));
    broker.push(&message);

    client.recv().unwrap();
    assert_eq!(broker.take_sent(), vec![Packet::PubAck(7)]);
    assert_eq!(client.next_message().unwrap(), message);
}

#[test]
fn test_inbound_qos2_is_delivered_exactly_once() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    let message = publish("cmd", b"fire", QoS::ExactlyOnce, Some(9));

    broker.push(&message);
    client.recv().unwrap();
    assert_eq!(client.inbound_len(), 0);
    assert_eq!(client.incoming().len(), 1);
    assert_eq!(broker.take_sent(), vec![Packet::PubRec(9)]);

    // The broker retransmits before seeing PUBREC.
    let Packet::Publish(mut again) = message.clone() else {
        unreachable!()
    };
    again.dup = true;
    broker.push(&Packet::Publish(again));
    client.recv().unwrap();
    assert_eq!(client.inbound_len(), 0);
    assert_eq!(client.incoming().len(), 1);
    assert_eq!(broker.take_sent(), vec![Packet::PubRec(9)]);

    broker.push(&Packet::PubRel(9));
    client.recv().unwrap();
    assert_eq!(client.inbound_len(), 1);
    assert!(client.incoming().is_empty());
    assert_eq!(broker.take_sent(), vec![Packet::PubComp(9)]);

    // A late PUBREL for the released id is a no-op.
    broker.push(&Packet::PubRel(9));
    client.recv().unwrap();
    assert_eq!(client.inbound_len(), 1);
    assert!(broker.take_sent().is_empty());

    let Packet::Publish(delivered) = client.next_message().unwrap() else {
        panic!("expected PUBLISH");
    };
    assert_eq!(&delivered.payload[..], b"fire");
}

#[test]
fn test_full_queue_refuses_before_acknowledging() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);

    for i in 0..MAX_INBOUND {
        broker.push(&publish("fill", &[i as u8], QoS::AtMostOnce, None));
        client.recv().unwrap();
    }
    broker.push(&publish("late", b"x", QoS::AtLeastOnce, Some(5)));
    assert_eq!(client.recv(), Err(Error::QueueFull));
    assert!(broker.take_sent().is_empty());
    assert!(client.is_connected());

    let Packet::Publish(first) = client.next_message().unwrap() else {
        panic!("expected PUBLISH");
    };
    assert_eq!(&first.payload[..], &[0]);
}

#[test]
fn test_next_message_skips_acknowledgments() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    let id = client
        .publish("t", b"x", QoS::AtLeastOnce, false)
        .unwrap()
        .unwrap();

    broker.push(&Packet::PubAck(id));
    broker.push(&publish("t", b"echo", QoS::AtMostOnce, None));
    let message = client.next_message().unwrap();
    assert_eq!(message, publish("t", b"echo", QoS::AtMostOnce, None));
    assert_eq!(client.pending_count(), 0);
}

#[test]
fn test_poll_returns_none_when_idle() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    assert_eq!(client.poll(), Ok(None));

    broker.push(&Packet::PingResp);
    assert_eq!(client.poll(), Ok(Some(Packet::PingResp)));
}

#[test]
fn test_inflight_window_is_bounded() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    for _ in 0..MAX_INFLIGHT {
        client.publish("t", b"x", QoS::AtLeastOnce, false).unwrap();
    }
    assert_eq!(
        client.publish("t", b"x", QoS::AtLeastOnce, false),
        Err(Error::InflightFull)
    );
    // QoS 0 is not limited by the window.
    assert_eq!(client.publish("t", b"x", QoS::AtMostOnce, false), Ok(None));
}

#[test]
fn test_malformed_frame_keeps_connection() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);

    // Reserved packet type 0.
    broker.push_bytes(&[0x00, 0x00]);
    assert!(matches!(client.recv(), Err(Error::Malformed(_))));
    assert!(client.is_connected());

    broker.push(&Packet::PingResp);
    assert_eq!(client.next_message().unwrap(), Packet::PingResp);
}

#[test]
fn test_oversized_frame_is_skipped() {
    let broker = MockBroker::new();
    let mut client = Client::new(broker.connector());
    broker.push(&accepted());
    let opts = Options {
        max_packet_size: 32,
        ..options()
    };
    client.connect(&opts).unwrap();

    broker.push(&publish("big", &[0xAB; 64], QoS::AtMostOnce, None));
    assert_eq!(client.recv(), Err(Error::PacketTooLarge));

    let small = publish("small", b"ok", QoS::AtMostOnce, None);
    broker.push(&small);
    assert_eq!(client.next_message().unwrap(), small);
}

#[test]
fn test_identifiers_never_collide_with_pending() {
    let broker = MockBroker::new();
    let mut client = connected(&broker);
    let mut rng = rand::thread_rng();
    let mut pending: Vec<u16> = Vec::new();

    for _ in 0..2_000 {
        let publish_next = pending.is_empty() || (pending.len() < MAX_INFLIGHT && rng.gen_bool(0.6));
        if publish_next {
            let id = client
                .publish("t", b"x", QoS::AtLeastOnce, false)
                .unwrap()
                .unwrap();
            assert_ne!(id, 0);
            assert!(!pending.contains(&id), "id {id} handed out twice");
            pending.push(id);
        } else {
            let id = pending.swap_remove(rng.gen_range(0..pending.len()));
            broker.push(&Packet::PubAck(id));
            client.recv().unwrap();
            assert!(!client.is_pending(id));
        }
        broker.take_sent();
    }

    let live: HashSet<u16> = client.outgoing().iter().map(|e| e.packet_id).collect();
    assert_eq!(live, pending.into_iter().collect::<HashSet<u16>>());
}
