use std::path::{Path, PathBuf};
use vizepisode_core::Episode;
use vizepisode_dot::{AssembleOptions, assemble};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn fixtures_root() -> PathBuf {
    workspace_root().join("fixtures")
}

fn list_fixture_yml_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let Ok(entries) = std::fs::read_dir(root) else {
        return out;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "yml") {
            out.push(path);
        }
    }
    out.sort();
    out
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

#[test]
fn fixtures_match_golden_dot() {
    let fixtures = list_fixture_yml_files(&fixtures_root());
    assert!(
        !fixtures.is_empty(),
        "no fixtures found under {}",
        fixtures_root().display()
    );

    let mut failures = Vec::new();
    for yml_path in fixtures {
        let text = read(&yml_path);
        let episode = Episode::from_yaml_str(&text)
            .unwrap_or_else(|e| panic!("failed to parse {}: {e}", yml_path.display()));
        let dot = assemble(&episode, None, &AssembleOptions::default())
            .unwrap_or_else(|e| panic!("failed to assemble {}: {e}", yml_path.display()))
            .to_dot();

        let golden_path = yml_path.with_extension("dot");
        if std::env::var("VIZEPISODE_UPDATE_SNAPSHOTS").as_deref() == Ok("1") {
            std::fs::write(&golden_path, &dot).expect("write golden");
            continue;
        }
        let golden = read(&golden_path);
        if golden != dot {
            failures.push(format!(
                "{}\n--- expected\n{golden}\n--- actual\n{dot}",
                golden_path.display()
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "snapshot mismatches:\n{}",
        failures.join("\n")
    );
}

#[test]
fn output_is_deterministic() {
    for yml_path in list_fixture_yml_files(&fixtures_root()) {
        let text = read(&yml_path);
        let render = || {
            let episode = Episode::from_yaml_str(&text).unwrap();
            assemble(&episode, None, &AssembleOptions::default())
                .unwrap()
                .to_dot()
        };
        assert_eq!(render(), render(), "{}", yml_path.display());
    }
}
