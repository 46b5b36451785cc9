use std::fs;
use std::path::{Path, PathBuf};

use heft_core::config::Config;
use heft_core::footprint::FootprintPipeline;
use heft_core::provision::{Environment, InspectError, Inspector};

/// In-memory inspector over a real directory tree, standing in for pip.
struct FakeInspector {
    packages: Vec<(String, Vec<PathBuf>)>,
}

impl FakeInspector {
    fn new(packages: &[(&str, &[&str])]) -> Self {
        Self {
            packages: packages
                .iter()
                .map(|(name, files)| {
                    (
                        name.to_string(),
                        files.iter().map(PathBuf::from).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl Inspector for FakeInspector {
    fn install_root(&self, env: &Environment) -> Result<PathBuf, InspectError> {
        Ok(env.root().join("site-packages"))
    }

    fn list_packages(&self, _env: &Environment) -> Result<Vec<String>, InspectError> {
        Ok(self.packages.iter().map(|(name, _)| name.clone()).collect())
    }

    fn files_owned_by(
        &self,
        _env: &Environment,
        package: &str,
    ) -> Result<Vec<PathBuf>, InspectError> {
        self.packages
            .iter()
            .find(|(name, _)| name == package)
            .map(|(_, files)| files.clone())
            .ok_or_else(|| InspectError::NotInstalled(package.to_string()))
    }
}

fn write_file(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join("site-packages").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn run_pipeline(env_root: &Path, inspector: &FakeInspector) -> heft_core::FootprintReport {
    let pipeline = FootprintPipeline::new(&Config::default());
    let env = Environment::new(env_root.to_path_buf());
    pipeline.run(inspector, &env).unwrap()
}

#[test]
fn test_single_package_with_only_source() {
    let tmp = tempfile::tempdir().unwrap();
    // 10 code lines, one comment, two blanks.
    write_file(
        tmp.path(),
        "leftpad/__init__.py",
        b"# leftpad: pad strings to a fixed width\n__version__ = \"1.0.0\"\n__all__ = [\"pad\", \"rpad\"]\n\ndef pad(s, n, fill=' '):\n    if len(s) >= n:\n        return s\n    return fill * (n - len(s)) + s\n\ndef rpad(s, n, fill=' '):\n    if len(s) >= n:\n        return s\n    return s + fill * (n - len(s))\n",
    );
    let inspector = FakeInspector::new(&[("leftpad", &["leftpad/__init__.py"])]);

    let report = run_pipeline(tmp.path(), &inspector);

    assert_eq!(report.loc.len(), 1);
    assert_eq!(report.loc[0].package, "leftpad");
    assert_eq!(report.loc[0].code_lines, 10);
    assert!(report.binaries.is_empty());
    assert_eq!(report.summary.package_count, 1);
    assert_eq!(report.summary.source_file_count, 1);
    assert_eq!(report.summary.skipped_file_count, 0);
}

#[test]
fn test_ranking_and_binary_grouping_across_packages() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "big/a.py", b"a=1\nb=2\nc=3\n");
    write_file(tmp.path(), "big/b.py", b"d=4\ne=5\n");
    write_file(tmp.path(), "small/a.py", b"# only a comment\nx=1\n");
    write_file(tmp.path(), "withext/mod.py", b"y=2\n");
    write_file(tmp.path(), "withext/_speedups.so", &[0u8; 256]);
    write_file(tmp.path(), "withext/docs.txt", b"ignored entirely\n");

    let inspector = FakeInspector::new(&[
        ("withext", &["withext/mod.py", "withext/_speedups.so", "withext/docs.txt"]),
        ("big", &["big/a.py", "big/b.py"]),
        ("small", &["small/a.py"]),
    ]);

    let report = run_pipeline(tmp.path(), &inspector);

    let ranking: Vec<(&str, u64)> = report
        .loc
        .iter()
        .map(|e| (e.package.as_str(), e.code_lines))
        .collect();
    assert_eq!(ranking, vec![("big", 5), ("small", 1), ("withext", 1)]);

    assert_eq!(report.binaries.len(), 1);
    assert_eq!(report.binaries[0].package, "withext");
    assert_eq!(report.binaries[0].artifacts.len(), 1);
    assert_eq!(
        report.binaries[0].artifacts[0].path,
        PathBuf::from("withext/_speedups.so")
    );
    assert_eq!(report.binaries[0].artifacts[0].size, 256);
}

#[test]
fn test_missing_files_are_skipped_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "pkg/present.py", b"x=1\ny=2\n");

    let inspector = FakeInspector::new(&[(
        "pkg",
        &["pkg/present.py", "pkg/vanished.py", "pkg/vanished.so"],
    )]);

    let report = run_pipeline(tmp.path(), &inspector);

    assert_eq!(report.loc.len(), 1);
    assert_eq!(report.loc[0].code_lines, 2);
    assert!(report.binaries.is_empty());
    assert_eq!(report.summary.skipped_file_count, 2);
}

#[test]
fn test_missing_package_is_skipped_others_survive() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "alive/mod.py", b"x=1\n");

    let inspector = FakeInspector {
        packages: vec![("alive".to_string(), vec![PathBuf::from("alive/mod.py")])],
    };

    // "ghost" is enumerated but files_owned_by fails for it.
    struct Wrapper(FakeInspector);
    impl Inspector for Wrapper {
        fn install_root(&self, env: &Environment) -> Result<PathBuf, InspectError> {
            self.0.install_root(env)
        }
        fn list_packages(&self, _env: &Environment) -> Result<Vec<String>, InspectError> {
            Ok(vec!["alive".to_string(), "ghost".to_string()])
        }
        fn files_owned_by(
            &self,
            env: &Environment,
            package: &str,
        ) -> Result<Vec<PathBuf>, InspectError> {
            self.0.files_owned_by(env, package)
        }
    }

    let pipeline = FootprintPipeline::new(&Config::default());
    let env = Environment::new(tmp.path().to_path_buf());
    let report = pipeline.run(&Wrapper(inspector), &env).unwrap();

    assert_eq!(report.loc.len(), 1);
    assert_eq!(report.loc[0].package, "alive");
    assert_eq!(report.summary.package_count, 2);
}

#[test]
fn test_duplicate_claim_counted_exactly_once() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "shared/util.py", b"a=1\nb=2\nc=3\n");
    write_file(tmp.path(), "alpha/own.py", b"x=1\n");

    let inspector = FakeInspector::new(&[
        ("alpha", &["alpha/own.py", "shared/util.py"]),
        ("omega", &["shared/util.py"]),
    ]);

    let report = run_pipeline(tmp.path(), &inspector);

    // The later claimant (name order) owns the shared file.
    let totals: Vec<(&str, u64)> = report
        .loc
        .iter()
        .map(|e| (e.package.as_str(), e.code_lines))
        .collect();
    assert_eq!(totals, vec![("omega", 3), ("alpha", 1)]);
    assert_eq!(report.summary.source_file_count, 2);
}

#[test]
fn test_equal_totals_ordered_by_package_name() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "cherry/mod.py", b"x=1\ny=2\n");
    write_file(tmp.path(), "apple/mod.py", b"x=1\ny=2\n");
    write_file(tmp.path(), "banana/mod.py", b"x=1\n");

    let inspector = FakeInspector::new(&[
        ("cherry", &["cherry/mod.py"]),
        ("apple", &["apple/mod.py"]),
        ("banana", &["banana/mod.py"]),
    ]);

    let report = run_pipeline(tmp.path(), &inspector);

    let order: Vec<&str> = report.loc.iter().map(|e| e.package.as_str()).collect();
    assert_eq!(order, vec!["apple", "cherry", "banana"]);
}
