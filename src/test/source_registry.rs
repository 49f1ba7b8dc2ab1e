use crate::source::{SourceDraft, SourceError, SourceId, SourceKind, SourceRegistry, SourceUpdate};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

#[test]
fn add_derives_url_and_starts_inactive() {
    let mut reg = SourceRegistry::new();
    let net = reg
        .add(SourceDraft::network("Ku-band feed", "10.0.0.5", "1234"))
        .expect("add network")
        .clone();
    assert_eq!(net.url, "udp://10.0.0.5:1234");
    assert!(!net.active);
    assert_eq!(net.last_connected, None);

    let file = reg
        .add(SourceDraft::file("Capture", "/data/capture.ts"))
        .expect("add file")
        .clone();
    assert_eq!(file.url, "/data/capture.ts");
    assert_eq!(file.kind, SourceKind::File);
    assert_ne!(net.id, file.id);
}

#[test]
fn add_validates_required_fields() {
    let mut reg = SourceRegistry::new();
    assert_eq!(
        reg.add(SourceDraft::receiver("  ", "rtp://x")).err(),
        Some(SourceError::MissingName)
    );
    let mut draft = SourceDraft::network("n", "host", "");
    assert_eq!(
        reg.add(draft.clone()).err(),
        Some(SourceError::MissingField("port"))
    );
    draft.host = None;
    assert_eq!(
        reg.add(draft).err(),
        Some(SourceError::MissingField("host"))
    );
    assert_eq!(
        reg.add(SourceDraft::new("f", SourceKind::File)).err(),
        Some(SourceError::MissingField("path"))
    );
    assert_eq!(
        reg.add(SourceDraft::new("r", SourceKind::Receiver)).err(),
        Some(SourceError::MissingField("url"))
    );
    assert!(reg.is_empty());
}

#[test]
fn list_is_newest_first() {
    let mut reg = SourceRegistry::new();
    reg.add(SourceDraft::receiver("a", "dvb://a")).expect("add");
    reg.add(SourceDraft::receiver("b", "dvb://b")).expect("add");
    reg.add(SourceDraft::receiver("c", "dvb://c")).expect("add");
    let names: Vec<&str> = reg.list().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["c", "b", "a"]);
    assert_eq!(reg.len(), 3);
}

#[test]
fn update_merges_and_revalidates() {
    let mut reg = SourceRegistry::new();
    let id = reg
        .add(SourceDraft::network("feed", "10.0.0.1", "5000"))
        .expect("add")
        .id;

    let updated = reg
        .update(
            id,
            SourceUpdate {
                port: Some("6000".into()),
                ..SourceUpdate::default()
            },
        )
        .expect("update");
    assert_eq!(updated.url, "udp://10.0.0.1:6000");

    let err = reg
        .update(
            id,
            SourceUpdate {
                kind: Some(SourceKind::File),
                ..SourceUpdate::default()
            },
        )
        .expect_err("file without path");
    assert_eq!(err, SourceError::MissingField("path"));
    // failed update leaves the record untouched
    assert_eq!(reg.get(id).map(|s| s.kind), Some(SourceKind::Network));
}

#[test]
fn connect_keeps_a_single_active_source() {
    let mut reg = SourceRegistry::new();
    let a = reg.add(SourceDraft::receiver("a", "dvb://a")).expect("add").id;
    let b = reg.add(SourceDraft::receiver("b", "dvb://b")).expect("add").id;

    reg.connect(a, at(10)).expect("connect a");
    assert_eq!(reg.active().map(|s| s.id), Some(a));

    let conn = reg.connect(b, at(20)).expect("connect b");
    assert!(conn.active);
    assert_eq!(conn.last_connected, Some(at(20)));
    assert_eq!(reg.list().filter(|s| s.active).count(), 1);
    assert_eq!(reg.get(a).and_then(|s| s.last_connected), Some(at(10)));
}

#[test]
fn disconnect_reports_whether_anything_was_active() {
    let mut reg = SourceRegistry::new();
    assert!(!reg.disconnect());
    let id = reg.add(SourceDraft::receiver("a", "dvb://a")).expect("add").id;
    reg.connect(id, at(1)).expect("connect");
    assert!(reg.disconnect());
    assert!(reg.active().is_none());
    assert!(!reg.disconnect());
}

#[test]
fn unknown_ids_are_not_found() {
    let mut reg = SourceRegistry::new();
    let missing = SourceId(99);
    assert_eq!(
        reg.connect(missing, at(1)).err(),
        Some(SourceError::NotFound(missing))
    );
    assert_eq!(
        reg.update(missing, SourceUpdate::default()).err(),
        Some(SourceError::NotFound(missing))
    );
    assert_eq!(reg.delete(missing).err(), Some(SourceError::NotFound(missing)));
    assert_eq!(
        SourceError::NotFound(missing).to_string(),
        "no such source: source-99"
    );
}

#[test]
fn delete_removes_the_source() {
    let mut reg = SourceRegistry::new();
    let id = reg.add(SourceDraft::receiver("a", "dvb://a")).expect("add").id;
    let removed = reg.delete(id).expect("delete");
    assert_eq!(removed.name, "a");
    assert!(reg.get(id).is_none());
    assert!(reg.is_empty());
}
