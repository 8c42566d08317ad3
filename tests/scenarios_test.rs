mod common;

use anyhow::Result;
use common::{HELLO_HEX, TestDir, WORLD_HEX};
use intact::events::{EventLevel, RecordingSink};
use intact::integrity::{Discrepancy, IntegrityCoordinator, Status};
use intact::manifest::{FormatError, FormatReason, Manifest};
use std::collections::{HashMap, HashSet};
use std::fs;

fn generate(fixture: &TestDir) -> Result<()> {
    IntegrityCoordinator::new(RecordingSink::new()).generate(&fixture.dir(), &fixture.list)?;
    Ok(())
}

#[test]
fn scenario_a_generate_then_verify_passes() -> Result<()> {
    let fixture = TestDir::new()?;
    let mut coordinator = IntegrityCoordinator::new(RecordingSink::new());

    let report = coordinator.generate(&fixture.dir(), &fixture.list)?;
    assert_eq!(report.written, 2);
    assert!(report.skipped.is_empty());

    let manifest = Manifest::load(&fixture.list)?;
    let digests: HashMap<_, _> = manifest
        .iter()
        .map(|e| (e.path.clone(), e.digest.to_hex()))
        .collect();
    assert_eq!(digests.len(), 2);
    assert_eq!(digests[&fixture.entry("a.txt")], HELLO_HEX);
    assert_eq!(digests[&fixture.entry("b.txt")], WORLD_HEX);

    let result = coordinator.verify(&fixture.dir(), &fixture.list)?;
    assert_eq!(result.status(), Status::Pass);
    assert!(result.discrepancies().is_empty());
    assert_eq!(result.checked(), 2);
    Ok(())
}

#[test]
fn scenario_b_modified_file() -> Result<()> {
    let fixture = TestDir::new()?;
    generate(&fixture)?;
    fixture.write("b.txt", "WORLD")?;

    let result = IntegrityCoordinator::new(RecordingSink::new()).verify(&fixture.dir(), &fixture.list)?;

    assert_eq!(result.status(), Status::Fail);
    assert_eq!(
        result.discrepancies(),
        &[Discrepancy::HashMismatch(fixture.entry("b.txt"))]
    );
    Ok(())
}

#[test]
fn scenario_c_deleted_file() -> Result<()> {
    let fixture = TestDir::new()?;
    generate(&fixture)?;
    fixture.remove("b.txt")?;

    let result = IntegrityCoordinator::new(RecordingSink::new()).verify(&fixture.dir(), &fixture.list)?;

    assert_eq!(result.status(), Status::Fail);
    assert_eq!(
        result.discrepancies(),
        &[Discrepancy::FileMissing(fixture.entry("b.txt"))]
    );
    Ok(())
}

#[test]
fn scenario_d_added_file() -> Result<()> {
    let fixture = TestDir::new()?;
    generate(&fixture)?;
    fixture.write("c.txt", "new")?;

    let result = IntegrityCoordinator::new(RecordingSink::new()).verify(&fixture.dir(), &fixture.list)?;

    assert_eq!(result.status(), Status::Fail);
    assert_eq!(
        result.discrepancies(),
        &[Discrepancy::UnexpectedFile(fixture.entry("c.txt"))]
    );
    Ok(())
}

#[test]
fn scenario_e_malformed_manifest_stops_before_checking() -> Result<()> {
    let fixture = TestDir::new()?;
    fs::write(&fixture.list, "onlypath\n")?;

    let mut coordinator = IntegrityCoordinator::new(RecordingSink::new());
    let err = coordinator.verify(&fixture.dir(), &fixture.list).unwrap_err();

    assert_eq!(
        err.as_format_error(),
        Some(&FormatError {
            line: 1,
            reason: FormatReason::MissingHash,
        })
    );

    // Only the fatal error itself was reported; no file was looked at
    let sink = coordinator.into_sink();
    assert_eq!(sink.events().len(), 1);
    assert_eq!(sink.events()[0].level, EventLevel::Error);
    Ok(())
}

#[test]
fn every_discrepancy_is_collected() -> Result<()> {
    let fixture = TestDir::new()?;
    fixture.write("c.txt", "see")?;
    generate(&fixture)?;

    fixture.write("a.txt", "HELLO")?;
    fixture.remove("b.txt")?;
    fixture.write("d.txt", "dee")?;
    fixture.write("e.txt", "eee")?;

    let result = IntegrityCoordinator::new(RecordingSink::new()).verify(&fixture.dir(), &fixture.list)?;

    let (modified, missing, unexpected) = result.counts();
    assert_eq!((modified, missing, unexpected), (1, 1, 2));
    assert_eq!(result.discrepancies().len(), 4);

    // Listed-path discrepancies come before the unexpected-file pass
    assert!(matches!(
        result.discrepancies()[2],
        Discrepancy::UnexpectedFile(_)
    ));
    assert!(matches!(
        result.discrepancies()[3],
        Discrepancy::UnexpectedFile(_)
    ));
    Ok(())
}

#[test]
fn missing_and_unexpected_partition_paths() -> Result<()> {
    let fixture = TestDir::new()?;
    fixture.write("c.txt", "see")?;
    generate(&fixture)?;
    let manifest = Manifest::load(&fixture.list)?;

    fixture.remove("a.txt")?;
    fixture.write("b.txt", "changed")?;
    fixture.write("z.txt", "zed")?;

    let result = IntegrityCoordinator::new(RecordingSink::new()).verify(&fixture.dir(), &fixture.list)?;

    let mut missing = HashSet::new();
    let mut mismatched = HashSet::new();
    let mut unexpected = HashSet::new();
    for d in result.discrepancies() {
        let set = match d {
            Discrepancy::FileMissing(_) => &mut missing,
            Discrepancy::HashMismatch(_) => &mut mismatched,
            Discrepancy::UnexpectedFile(_) => &mut unexpected,
        };
        assert!(set.insert(d.path().to_string()), "reported twice: {d}");
    }

    assert!(missing.is_disjoint(&unexpected));

    let listed: HashSet<String> = manifest.iter().map(|e| e.path.clone()).collect();
    let live: HashSet<String> = ["b.txt", "c.txt", "z.txt"]
        .iter()
        .map(|n| fixture.entry(n))
        .collect();

    let matched: HashSet<String> = listed
        .difference(&missing)
        .filter(|p| !mismatched.contains(*p))
        .cloned()
        .collect();

    // Listed paths split into matched, mismatched and missing
    let rebuilt: HashSet<String> = matched
        .iter()
        .chain(&mismatched)
        .chain(&missing)
        .cloned()
        .collect();
    assert_eq!(rebuilt, listed);

    // Unexpected is exactly live minus listed
    let expected_unexpected: HashSet<String> = live.difference(&listed).cloned().collect();
    assert_eq!(unexpected, expected_unexpected);

    assert_eq!(missing, HashSet::from([fixture.entry("a.txt")]));
    assert_eq!(mismatched, HashSet::from([fixture.entry("b.txt")]));
    Ok(())
}

#[test]
fn manifest_inside_directory_is_reported_new() -> Result<()> {
    let fixture = TestDir::new()?;
    let inner_list = fixture.data.join("list.txt");

    let mut coordinator = IntegrityCoordinator::new(RecordingSink::new());
    coordinator.generate(&fixture.dir(), &inner_list)?;
    assert!(
        coordinator
            .sink()
            .at_level(EventLevel::Warning)
            .any(|e| e.message.contains("inside the scanned directory"))
    );

    let result = coordinator.verify(&fixture.dir(), &inner_list)?;
    assert_eq!(
        result.discrepancies(),
        &[Discrepancy::UnexpectedFile(fixture.entry("list.txt"))]
    );
    Ok(())
}

#[test]
fn generate_empty_directory() -> Result<()> {
    let fixture = TestDir::empty()?;
    let mut coordinator = IntegrityCoordinator::new(RecordingSink::new());

    let report = coordinator.generate(&fixture.dir(), &fixture.list)?;
    assert_eq!(report.written, 0);
    assert_eq!(fs::read_to_string(&fixture.list)?, "");

    assert!(coordinator.verify(&fixture.dir(), &fixture.list)?.is_pass());
    Ok(())
}

#[test]
fn generate_overwrites_existing_list() -> Result<()> {
    let fixture = TestDir::new()?;
    fs::write(&fixture.list, "stale content that is not a manifest\n")?;

    generate(&fixture)?;
    assert_eq!(Manifest::load(&fixture.list)?.len(), 2);
    Ok(())
}

#[test]
fn verify_missing_directory_is_fatal() -> Result<()> {
    let fixture = TestDir::new()?;
    generate(&fixture)?;
    let missing = fixture.path().join("elsewhere").to_string_lossy().into_owned();

    let result = IntegrityCoordinator::new(RecordingSink::new()).verify(&missing, &fixture.list);
    assert!(result.is_err());
    Ok(())
}

#[test]
fn chunk_size_does_not_change_outcome() -> Result<()> {
    let fixture = TestDir::new()?;
    IntegrityCoordinator::new(RecordingSink::new())
        .with_chunk_size(1)
        .generate(&fixture.dir(), &fixture.list)?;

    let result = IntegrityCoordinator::new(RecordingSink::new())
        .with_chunk_size(1 << 20)
        .verify(&fixture.dir(), &fixture.list)?;
    assert!(result.is_pass());
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn added_file_with_non_utf8_name_fails_verify() -> Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fixture = TestDir::new()?;
    generate(&fixture)?;

    let added = fixture.data.join(OsStr::from_bytes(b"evil\xff"));
    fs::write(&added, "x")?;

    let mut coordinator = IntegrityCoordinator::new(RecordingSink::new());
    let result = coordinator.verify(&fixture.dir(), &fixture.list)?;

    assert_eq!(result.status(), Status::Fail);
    assert_eq!(
        result.discrepancies(),
        &[Discrepancy::UnexpectedFile(added.display().to_string())]
    );
    assert!(
        coordinator
            .sink()
            .at_level(EventLevel::Error)
            .any(|e| e.message.starts_with("New file detected"))
    );
    Ok(())
}
