use crate::error::TraceError;
use crate::net::{FlowId, LinkId, PacketId, RouterId, Tick};
use crate::trace::{
    decode, decode_file, encode_events, Diagnostic, EventKind, EventRecord, FramingIssue,
    GarnetEvent, TraceReader, TraceWriter, WireStatus, MAX_RECORD_BYTES, MAX_REPORTED_EXAMPLES,
};
use prost::Message;

use super::single_flit_trace;

fn write_all(events: &[EventRecord]) -> TraceWriter<Vec<u8>> {
    let mut w = TraceWriter::new(Vec::new());
    for ev in events {
        w.write_event(ev).expect("write to Vec");
    }
    w
}

#[test]
fn decode_preserves_stream_order_and_fields() {
    let events = vec![
        EventRecord::inject(7, 42, 2, 9).in_packet(11, 3),
        EventRecord::enter_router(7, 42, 2).in_packet(11, 3),
        EventRecord::link_start(8, 42, 17).in_packet(11, 3),
        EventRecord::link_transit(9, 42, 17).in_packet(11, 3),
        EventRecord::router_receive(3, 42, 6).in_packet(11, 3),
        EventRecord::eject(12, 42).in_packet(11, 3),
    ];
    let bytes = encode_events(&events);
    let decoded = decode(&bytes);

    // 解码器不排序：tick 3 的记录仍在第 5 位
    assert_eq!(decoded.events, events);
    assert!(decoded.report.is_clean());
    assert!(!decoded.report.stopped_early);
    assert_eq!(decoded.report.records, events.len() as u64);
    assert_eq!(decoded.report.bytes, bytes.len() as u64);
}

#[test]
fn empty_stream_is_a_clean_end() {
    let decoded = decode(&[]);
    assert!(decoded.events.is_empty());
    assert!(decoded.report.is_clean());
    assert!(!decoded.report.stopped_early);
}

#[test]
fn link_id_field_is_resolved_per_status() {
    let wire = |status: &str| GarnetEvent {
        tick: 5,
        status: status.to_string(),
        global_id: 1,
        packet_id: 2,
        id: 1,
        src: 4,
        dest: 8,
        link_id: 3,
    };

    let ri = EventRecord::from_wire(wire("RI")).expect("RI");
    assert_eq!(ri.status, WireStatus::Ri);
    assert_eq!(
        ri.kind,
        EventKind::Inject {
            src: RouterId(4),
            dest: RouterId(8)
        }
    );
    assert_eq!(ri.flow, FlowId(1));
    assert_eq!(ri.packet, PacketId(2));
    assert_eq!(ri.flit_index, 1);
    assert_eq!(ri.tick, Tick(5));

    for status in ["SI", "RR"] {
        let ev = EventRecord::from_wire(wire(status)).expect(status);
        assert_eq!(ev.kind, EventKind::RouterReceive { router: RouterId(3) });
    }
    assert_eq!(
        EventRecord::from_wire(wire("ST")).expect("ST").kind,
        EventKind::LinkStart { link: LinkId(3) }
    );
    assert_eq!(
        EventRecord::from_wire(wire("DT")).expect("DT").kind,
        EventKind::LinkTransit { link: LinkId(3) }
    );
    assert_eq!(EventRecord::from_wire(wire("SE")).expect("SE").kind, EventKind::Eject);
    assert!(EventRecord::from_wire(wire("XX")).is_err());
}

#[test]
fn truncated_final_record_keeps_prior_events() {
    let events = single_flit_trace();
    let mut bytes = encode_events(&events);
    let tail = encode_events(&[EventRecord::router_receive(40, 1, 2)]);
    // 保留长度前缀，负载只写一半
    bytes.extend_from_slice(&tail[..4 + (tail.len() - 4) / 2]);

    let decoded = decode(&bytes);
    assert_eq!(decoded.events, events);
    assert_eq!(decoded.report.framing_errors, 1);
    assert_eq!(decoded.report.payload_errors, 0);
    assert!(decoded.report.stopped_early);
    match &decoded.report.examples[0] {
        Diagnostic::MalformedFraming {
            issue: FramingIssue::TruncatedRecord { declared, got },
            ..
        } => {
            assert_eq!(*declared as usize, tail.len() - 4);
            assert!(*got < *declared as usize);
        }
        other => panic!("expected truncated record, got {other:?}"),
    }
}

#[test]
fn partial_length_prefix_stops_with_partial_results() {
    let events = single_flit_trace();
    let mut bytes = encode_events(&events);
    let clean_len = bytes.len() as u64;
    bytes.extend_from_slice(&[0x10, 0x00]);

    let decoded = decode(&bytes);
    assert_eq!(decoded.events.len(), events.len());
    assert_eq!(
        decoded.report.examples,
        vec![Diagnostic::MalformedFraming {
            offset: clean_len,
            issue: FramingIssue::PartialLengthPrefix { got: 2 },
        }]
    );
}

#[test]
fn oversized_length_prefix_aborts_remaining_parse() {
    let mut bytes = encode_events(&[EventRecord::inject(0, 1, 0, 1)]);
    bytes.extend_from_slice(&(MAX_RECORD_BYTES + 1).to_le_bytes());
    bytes.extend_from_slice(&encode_events(&[EventRecord::eject(1, 1)]));

    let decoded = decode(&bytes);
    assert_eq!(decoded.events.len(), 1);
    assert!(decoded.report.stopped_early);
    assert!(matches!(
        decoded.report.examples[0],
        Diagnostic::MalformedFraming {
            issue: FramingIssue::OversizedRecord { .. },
            ..
        }
    ));
}

#[test]
fn corrupt_payload_is_skipped_and_parsing_continues() {
    let mut w = TraceWriter::new(Vec::new());
    w.write_event(&EventRecord::inject(0, 1, 0, 3)).unwrap();
    w.write_raw(&[0xFF, 0xFF, 0xFF]).unwrap();
    let unknown = GarnetEvent {
        tick: 1,
        status: "ZZ".to_string(),
        global_id: 1,
        ..Default::default()
    };
    w.write_raw(&unknown.encode_to_vec()).unwrap();
    w.write_event(&EventRecord::eject(2, 1)).unwrap();
    let bytes = w.into_inner().unwrap();

    let decoded = decode(&bytes);
    assert_eq!(
        decoded.events,
        vec![EventRecord::inject(0, 1, 0, 3), EventRecord::eject(2, 1)]
    );
    assert_eq!(decoded.report.payload_errors, 2);
    assert_eq!(decoded.report.framing_errors, 0);
    assert!(!decoded.report.stopped_early);

    let records = decoded
        .report
        .examples
        .iter()
        .map(|d| match d {
            Diagnostic::MalformedPayload { record, .. } => *record,
            other => panic!("unexpected diagnostic {other:?}"),
        })
        .collect::<Vec<_>>();
    assert_eq!(records, vec![1, 2]);
    assert!(decoded.report.examples[1].to_string().contains("ZZ"));
}

#[test]
fn report_keeps_counts_but_caps_examples() {
    let mut w = TraceWriter::new(Vec::new());
    for _ in 0..(MAX_REPORTED_EXAMPLES + 3) {
        w.write_raw(&[0xFF]).unwrap();
    }
    w.write_event(&EventRecord::eject(1, 9)).unwrap();
    let bytes = w.into_inner().unwrap();

    let decoded = decode(&bytes);
    assert_eq!(decoded.events.len(), 1);
    assert_eq!(
        decoded.report.payload_errors,
        (MAX_REPORTED_EXAMPLES + 3) as u64
    );
    assert_eq!(decoded.report.examples.len(), MAX_REPORTED_EXAMPLES);
}

#[test]
fn reader_is_lazy_and_reports_progress() {
    let w = write_all(&single_flit_trace());
    let bytes = w.into_inner().unwrap();

    let mut reader = TraceReader::new(bytes.as_slice());
    let first = reader.next().expect("first event");
    assert_eq!(first, EventRecord::inject(0, 1, 0, 3));
    assert_eq!(reader.report().records, 1);

    assert_eq!(reader.by_ref().count(), 4);
    assert!(reader.next().is_none());
    assert_eq!(reader.into_report().records, 5);
}

#[test]
fn decode_file_reports_missing_path() {
    let dir = super::unique_temp_dir("decode-missing");
    let path = dir.join("nope.bin");
    match decode_file(&path) {
        Err(TraceError::MissingFile(p)) => assert_eq!(p, path),
        other => panic!("expected MissingFile, got {other:?}"),
    }
    let _ = std::fs::remove_dir_all(&dir);
}
