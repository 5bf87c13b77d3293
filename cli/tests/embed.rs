//! # warembed CLI Embed Integration Tests
//!
//! File: cli/tests/embed.rs
//!
//! ## Overview
//!
//! End-to-end tests of `warembed embed`: each test lays out a project
//! directory (manifest, build directory, war file) and a throwaway local
//! repository holding fixture container jars, runs the binary, and reads the
//! produced standalone jar back.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Project {
    _temp: TempDir,
    dir: PathBuf,
    repo: PathBuf,
    manifest: PathBuf,
}

impl Project {
    /// Project `demo` with `target/demo.war` and the given manifest body.
    fn new(manifest_body: &str) -> Self {
        let temp = tempdir().expect("Failed to create temp dir");
        let dir = temp.path().join("demo");
        let repo = temp.path().join("repo");
        fs::create_dir_all(dir.join("target")).unwrap();
        fs::create_dir_all(&repo).unwrap();
        fs::write(dir.join("target/demo.war"), b"PK\x03\x04demo war payload").unwrap();
        let manifest = dir.join("warembed.toml");
        fs::write(&manifest, manifest_body).unwrap();
        Project {
            _temp: temp,
            dir,
            repo,
            manifest,
        }
    }

    fn embed_cmd(&self) -> Command {
        let mut cmd = warembed_cmd();
        cmd.current_dir(&self.dir)
            .arg("embed")
            .arg("--manifest")
            .arg(&self.manifest)
            .arg("--repository")
            .arg(&self.repo);
        cmd
    }

    fn output(&self) -> PathBuf {
        self.dir.join("target/demo-standalone.jar")
    }
}

fn entry<'a>(entries: &'a [(String, Vec<u8>)], name: &str) -> Option<&'a [u8]> {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, data)| data.as_slice())
}

fn names(path: &Path) -> Vec<String> {
    read_zip(path).into_iter().map(|(n, _)| n).collect()
}

#[test]
fn test_embed_with_default_container_and_options() {
    let project = Project::new(
        "[project]\nfinal_name = \"demo\"\n\n[embed.options]\nhttpPort = \"9090\"\nprefix = \"/demo\"\n",
    );
    let container = container_entries();
    install_container(&project.repo, DEFAULT_CONTAINER_PATH, &container);

    project
        .embed_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let entries = read_zip(&project.output());
    assert_eq!(entries.len(), container.len() + 2);
    for (name, data) in &container {
        assert_eq!(entry(&entries, name), Some(*data), "entry {}", name);
    }
    assert_eq!(
        entry(&entries, "embedded.war"),
        Some(fs::read(project.dir.join("target/demo.war")).unwrap().as_slice())
    );

    let text = String::from_utf8(entry(&entries, "embedded.properties").unwrap().to_vec()).unwrap();
    assert!(text.starts_with("#embedded command line options for winstone\n"));
    let options = parse_simple_properties(&text);
    assert_eq!(options.len(), 2);
    assert_eq!(options["httpPort"], "9090");
    assert_eq!(options["prefix"], "/demo");
}

#[test]
fn test_container_entries_come_first() {
    let project = Project::new("[project]\nfinal_name = \"demo\"\n");
    install_container(&project.repo, DEFAULT_CONTAINER_PATH, &container_entries());

    project.embed_cmd().assert().success();

    assert_eq!(
        names(&project.output()),
        vec![
            "META-INF/MANIFEST.MF",
            "winstone/Launcher.class",
            "winstone/default.properties",
            "embedded.war",
        ]
    );
}

#[test]
fn test_declared_container_preferred_over_default() {
    let project = Project::new(
        r#"
[project]
final_name = "demo"

[[plugin.dependencies]]
group = "org.slf4j"
name = "slf4j-simple"
version = "1.7.36"

[[plugin.dependencies]]
group = "net.sourceforge.winstone"
name = "winstone-lite"
version = "0.9.10"
"#,
    );
    install_container(
        &project.repo,
        DEFAULT_CONTAINER_PATH,
        &[("from-default.txt", b"default".as_slice())],
    );
    install_container(
        &project.repo,
        "net/sourceforge/winstone/winstone-lite/0.9.10/winstone-lite-0.9.10.jar",
        &[("from-lite.txt", b"lite".as_slice())],
    );

    project.embed_cmd().assert().success();

    let names = names(&project.output());
    assert!(names.contains(&"from-lite.txt".to_string()));
    assert!(!names.contains(&"from-default.txt".to_string()));
}

#[test]
fn test_missing_declared_container_falls_back_to_default() {
    let project = Project::new(
        "[project]\nfinal_name = \"demo\"\n\n[[plugin.dependencies]]\ngroup = \"g\"\nname = \"winstone-custom\"\nversion = \"1.0\"\n",
    );
    install_container(
        &project.repo,
        DEFAULT_CONTAINER_PATH,
        &[("from-default.txt", b"default".as_slice())],
    );

    project.embed_cmd().assert().success();
    assert!(names(&project.output()).contains(&"from-default.txt".to_string()));
}

#[test]
fn test_no_options_means_no_properties_entry() {
    let project = Project::new("[project]\nfinal_name = \"demo\"\n");
    install_container(&project.repo, DEFAULT_CONTAINER_PATH, &container_entries());

    project.embed_cmd().assert().success();

    let names = names(&project.output());
    assert!(names.contains(&"embedded.war".to_string()));
    assert!(!names.contains(&"embedded.properties".to_string()));
}

#[test]
fn test_cli_options_override_manifest_options() {
    let project =
        Project::new("[project]\nfinal_name = \"demo\"\n\n[embed.options]\nhttpPort = \"9090\"\n");
    install_container(&project.repo, DEFAULT_CONTAINER_PATH, &container_entries());

    project
        .embed_cmd()
        .args(["-D", "httpPort=7070", "--option", "ajp13Port=-1"])
        .assert()
        .success();

    let entries = read_zip(&project.output());
    let text = String::from_utf8(entry(&entries, "embedded.properties").unwrap().to_vec()).unwrap();
    let options = parse_simple_properties(&text);
    assert_eq!(options["httpPort"], "7070");
    assert_eq!(options["ajp13Port"], "-1");
}

#[test]
fn test_war_packaging_is_a_no_op() {
    let project = Project::new("[project]\nfinal_name = \"demo\"\npackaging = \"war\"\n");
    install_container(&project.repo, DEFAULT_CONTAINER_PATH, &container_entries());

    project
        .embed_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to embed"));
    assert!(!project.output().exists());
}

#[test]
fn test_packaging_flag_overrides_manifest() {
    let project = Project::new("[project]\nfinal_name = \"demo\"\n");

    // No container installed: the skip must happen before resolution.
    project
        .embed_cmd()
        .args(["--packaging", "war"])
        .assert()
        .success();
    assert!(!project.output().exists());
}

#[test]
fn test_missing_container_fails_without_output() {
    let project = Project::new("[project]\nfinal_name = \"demo\"\n");

    project
        .embed_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Container artifact not found"));
    assert!(!project.output().exists());
}

#[test]
fn test_missing_war_fails() {
    let project = Project::new("[project]\nfinal_name = \"demo\"\n");
    install_container(&project.repo, DEFAULT_CONTAINER_PATH, &container_entries());
    fs::remove_file(project.dir.join("target/demo.war")).unwrap();

    project
        .embed_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("appending application archive"));
}

#[test]
fn test_explicit_war_and_output_paths() {
    let project = Project::new("[project]\nfinal_name = \"demo\"\n");
    install_container(&project.repo, DEFAULT_CONTAINER_PATH, &container_entries());
    let war = project.dir.join("other.war");
    fs::write(&war, b"other war").unwrap();
    let output = project.dir.join("dist/nested/app.jar");

    project
        .embed_cmd()
        .arg("--war")
        .arg(&war)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let entries = read_zip(&output);
    assert_eq!(entry(&entries, "embedded.war"), Some(b"other war".as_slice()));
    assert!(!project.output().exists());
}

#[test]
fn test_output_equal_to_war_is_rejected() {
    let project = Project::new("[project]\nfinal_name = \"demo\"\n");
    install_container(&project.repo, DEFAULT_CONTAINER_PATH, &container_entries());
    let war = project.dir.join("target/demo.war");
    let before = fs::read(&war).unwrap();

    project
        .embed_cmd()
        .args(["--output", "target/demo.war"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is also the application archive"));
    assert_eq!(fs::read(&war).unwrap(), before);
}
