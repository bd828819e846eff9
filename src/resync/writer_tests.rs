//! Tests for writing the output tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

use crate::classify::{Lanes, Satellite};
use crate::inventory::InventoryNode;
use crate::render::TemplateSet;

use super::{
    DIR_MODE, OutputLayout, ResyncError, ResyncPlan, ResyncStage, ResyncWriter, SatelliteNames,
};

const HOST_TEMPLATE: &str = "object Host \"{{name}}\" {\n  import \"{{template}}\"\n  {{address}}\n  {{variables}}\n}\n";
const ZONE_TEMPLATE: &str = "object Zone \"{{name}}\" { parent = \"{{satellite}}\" }\n";

fn writer(root: &Path) -> ResyncWriter {
    ResyncWriter::new(OutputLayout {
        zones_root: root.to_path_buf(),
        satellites: SatelliteNames::new("sat-icinga", "sat-nrpe"),
        hosts_dir: "hosts.dynamic".to_string(),
        zones_dir: "zones.dynamic".to_string(),
    })
}

fn plan(nodes: Vec<InventoryNode>) -> ResyncPlan {
    let templates = TemplateSet::from_strings(HOST_TEMPLATE, ZONE_TEMPLATE).unwrap();
    ResyncPlan::build(
        &Lanes::partition(nodes),
        &templates,
        &SatelliteNames::new("sat-icinga", "sat-nrpe"),
    )
    .unwrap()
}

fn sample() -> Vec<InventoryNode> {
    vec![
        InventoryNode::new("web01.example.com")
            .with_tags(["icinga2-client", "kvm"])
            .with_ipv4("10.0.0.1/24"),
        InventoryNode::new("db01.example.com")
            .with_tags(["nrpe-client", "mdadm"])
            .with_ipv4("10.0.0.2/24"),
        InventoryNode::new("misc.example.com").with_ipv6("2001:db8::9/64"),
    ]
}

fn hosts_dir(dir: &TempDir, satellite: &str) -> PathBuf {
    dir.path().join(satellite).join("hosts.dynamic")
}

fn zones_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("sat-icinga").join("zones.dynamic")
}

fn listing(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn writes_files_into_satellite_trees() {
    let dir = tempdir().unwrap();

    let stage = writer(dir.path()).apply(&plan(sample())).unwrap();

    assert_eq!(stage, ResyncStage::Done);
    assert_eq!(
        listing(&hosts_dir(&dir, "sat-icinga")),
        ["misc.conf", "web01.conf"]
    );
    assert_eq!(listing(&hosts_dir(&dir, "sat-nrpe")), ["db01.conf"]);
    assert_eq!(listing(&zones_dir(&dir)), ["web01-zone.conf"]);

    let zone = fs::read_to_string(zones_dir(&dir).join("web01-zone.conf")).unwrap();
    assert!(zone.contains("parent = \"sat-icinga\""));
}

#[test]
fn nrpe_satellite_has_no_zones_directory() {
    let dir = tempdir().unwrap();

    writer(dir.path()).apply(&plan(sample())).unwrap();

    assert!(!dir.path().join("sat-nrpe").join("zones.dynamic").exists());
}

#[test]
fn stale_files_are_removed() {
    let dir = tempdir().unwrap();
    let writer = writer(dir.path());
    writer.apply(&plan(sample())).unwrap();

    writer
        .apply(&plan(vec![
            InventoryNode::new("new.example.com")
                .with_tags(["nrpe-client"])
                .with_ipv4("10.0.0.3"),
        ]))
        .unwrap();

    assert!(listing(&hosts_dir(&dir, "sat-icinga")).is_empty());
    assert_eq!(listing(&hosts_dir(&dir, "sat-nrpe")), ["new.conf"]);
    assert!(listing(&zones_dir(&dir)).is_empty());
}

/// Every generated file below the three dynamic directories, keyed by path.
fn snapshot(dir: &TempDir) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    for generated in [
        hosts_dir(dir, "sat-icinga"),
        hosts_dir(dir, "sat-nrpe"),
        zones_dir(dir),
    ] {
        for entry in fs::read_dir(&generated).unwrap() {
            let path = entry.unwrap().path();
            let contents = fs::read(&path).unwrap();
            files.insert(path, contents);
        }
    }
    files
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempdir().unwrap();
    let writer = writer(dir.path());
    let mut nodes = sample();
    nodes.push(
        InventoryNode::new("win01.example.com")
            .with_tags(["icinga2-windows"])
            .with_ipv4("10.0.0.4"),
    );

    writer.apply(&plan(nodes.clone())).unwrap();
    let first = snapshot(&dir);
    writer.apply(&plan(nodes)).unwrap();
    let second = snapshot(&dir);

    let names: Vec<String> = first
        .keys()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "misc.conf",
            "web01.conf",
            "win01.conf",
            "web01-zone.conf",
            "win01-zone.conf",
            "db01.conf"
        ]
    );
    assert_eq!(first, second);
}

#[test]
fn hand_written_siblings_survive() {
    let dir = tempdir().unwrap();
    let static_dir = dir.path().join("sat-icinga").join("hosts.static");
    fs::create_dir_all(&static_dir).unwrap();
    fs::write(static_dir.join("keep.conf"), "keep").unwrap();

    writer(dir.path()).apply(&plan(sample())).unwrap();

    assert_eq!(
        fs::read_to_string(static_dir.join("keep.conf")).unwrap(),
        "keep"
    );
}

#[test]
fn addressless_agent_gets_only_zone_file() {
    let dir = tempdir().unwrap();
    let bare = InventoryNode::new("agent.example.com").with_tags(["icinga2-client"]);

    writer(dir.path()).apply(&plan(vec![bare])).unwrap();

    assert!(listing(&hosts_dir(&dir, "sat-icinga")).is_empty());
    assert_eq!(listing(&zones_dir(&dir)), ["agent-zone.conf"]);
}

#[test]
fn empty_plan_leaves_empty_directories() {
    let dir = tempdir().unwrap();

    writer(dir.path()).apply(&ResyncPlan::default()).unwrap();

    assert!(listing(&hosts_dir(&dir, "sat-icinga")).is_empty());
    assert!(listing(&hosts_dir(&dir, "sat-nrpe")).is_empty());
    assert!(listing(&zones_dir(&dir)).is_empty());
}

#[cfg(unix)]
#[test]
fn directories_are_world_readable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    writer(dir.path()).apply(&plan(sample())).unwrap();

    for path in [
        hosts_dir(&dir, "sat-icinga"),
        hosts_dir(&dir, "sat-nrpe"),
        zones_dir(&dir),
    ] {
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, DIR_MODE, "{}", path.display());
    }
}

#[test]
fn root_below_a_file_fails() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let result = writer(&blocker).apply(&plan(sample()));

    assert!(matches!(
        result,
        Err(ResyncError::RemoveDir { .. } | ResyncError::CreateDir { .. })
    ));
}

#[test]
fn preview_touches_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("zones.d");

    writer(&root).preview(&plan(sample()));

    assert!(!root.exists());
}

#[test]
fn target_joins_satellite_and_kind() {
    let dir = tempdir().unwrap();
    let writer = writer(dir.path());
    let plan = plan(sample());

    let zone = &plan.zone_files()[0];
    assert_eq!(writer.target(zone), zones_dir(&dir).join("web01-zone.conf"));
    assert_eq!(
        writer.layout().hosts_path(Satellite::Nrpe),
        hosts_dir(&dir, "sat-nrpe")
    );
}

#[test]
fn stages_advance_to_done() {
    let mut stage = ResyncStage::HostTreeReset;
    let mut seen = vec![stage];
    while stage != ResyncStage::Done {
        stage = stage.next();
        seen.push(stage);
    }

    assert_eq!(seen.len(), 5);
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ResyncStage::Done.next(), ResyncStage::Done);
}
