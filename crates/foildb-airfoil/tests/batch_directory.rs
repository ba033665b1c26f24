// Integration tests for directory-level uniformization

use std::fs;
use std::path::Path;

use foildb_airfoil::batch::{output_path, uniformize_file};
use foildb_airfoil::{load_file, uniformize_directory, BatchOptions, UniformizeConfig};

const SCENARIO: &str = "SCENARIO FOIL
1.0 0.0
0.5 0.05
0.0 0.0
0.5 -0.03
1.0 0.0
";

const HEADERLESS: &str = "1.000000e+00 1.260000e-03
5.000000e-01 5.294000e-02
0.000000e+00 0.000000e+00
5.000000e-01 -5.294000e-02
1.000000e+00 -1.260000e-03
";

const MALFORMED: &str = "BROKEN
1.0 0.0
0.5 oops
0.0 0.0
";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("scenario.dat"), SCENARIO).unwrap();
    fs::write(dir.join("naca0012.dat"), HEADERLESS).unwrap();
    fs::write(dir.join("broken.dat"), MALFORMED).unwrap();
    fs::write(dir.join("README.txt"), "not an airfoil").unwrap();
}

fn options(n_points: usize) -> BatchOptions {
    BatchOptions {
        config: UniformizeConfig::default().with_n_points(n_points).unwrap(),
        ..BatchOptions::default()
    }
}

#[test]
fn integration_directory_run_writes_and_reports() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("uniform");
    write_inputs(input.path());

    let report = uniformize_directory(input.path(), &out_dir, &options(32)).unwrap();

    assert_eq!(report.total(), 3);
    assert_eq!(report.written.len(), 2);
    assert!(report.skipped.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].path.ends_with("broken.dat"));
    assert!(report.failures[0].error.is_parse());
    assert!(report.summary().contains("broken.dat"));

    for name in ["uniform_scenario.dat", "uniform_naca0012.dat"] {
        let path = out_dir.join(name);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 32, "{}", name);

        let reloaded = load_file(&path).unwrap();
        assert_eq!(reloaded.len(), 32);
        assert!(reloaded.points().iter().all(|p| (0.0..=1.0).contains(&p.x)));
    }

    // Nothing is written for the failed file
    assert!(!out_dir.join("uniform_broken.dat").exists());
    assert!(!out_dir.join("uniform_README.txt").exists());
}

#[test]
fn integration_existing_outputs_are_skipped_unless_forced() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("scenario.dat"), SCENARIO).unwrap();

    let first = uniformize_directory(input.path(), output.path(), &options(16)).unwrap();
    assert_eq!(first.written.len(), 1);

    let second = uniformize_directory(input.path(), output.path(), &options(24)).unwrap();
    assert_eq!(second.skipped.len(), 1);
    assert!(second.written.is_empty());
    let kept = fs::read_to_string(output.path().join("uniform_scenario.dat")).unwrap();
    assert_eq!(kept.lines().count(), 16);

    let forced = BatchOptions {
        force: true,
        ..options(24)
    };
    let third = uniformize_directory(input.path(), output.path(), &forced).unwrap();
    assert_eq!(third.written.len(), 1);
    let replaced = fs::read_to_string(output.path().join("uniform_scenario.dat")).unwrap();
    assert_eq!(replaced.lines().count(), 24);
}

#[test]
fn integration_missing_input_directory_fails_the_run() {
    let output = tempfile::tempdir().unwrap();
    let missing = output.path().join("does-not-exist");
    assert!(uniformize_directory(&missing, output.path(), &BatchOptions::default()).is_err());
}

#[test]
fn integration_single_file_fit_error_names_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("vertical.dat");
    fs::write(&input, "VERTICAL\n0.0 0.0\n0.0 0.1\n0.0 0.2\n0.0 0.3\n").unwrap();
    let output = output_path(dir.path(), &input, "uniform_");

    let err = uniformize_file(&input, &output, &UniformizeConfig::default()).unwrap_err();
    assert!(err.is_fit());
    assert!(err.to_string().contains("vertical.dat"));
    assert!(!output.exists());
}
