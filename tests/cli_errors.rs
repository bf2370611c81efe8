use predicates::prelude::*;
use tempfile::tempdir;

fn nutrient_cmd(data_dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nutrient_rs");
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

#[test]
fn solve_fails_without_any_input() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .arg("solve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input data"));
}

#[test]
fn solve_reports_invalid_target_json() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .args(["solve", "--phase", "vegetative", "--system", "hydro"])
        .args(["--volume", "10", "--salts", "mkp"])
        .args(["--target-json", "{not valid json}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON for --target-json"));
}

#[test]
fn solve_reports_invalid_json_in_file() {
    use std::fs::File;
    use std::io::Write as _;

    let dir = tempdir().unwrap();
    let file_path = dir.path().join("bad.json");
    let mut f = File::create(&file_path).unwrap();
    writeln!(f, "this is not json").unwrap();

    nutrient_cmd(dir.path())
        .arg("solve")
        .arg("--input")
        .arg(file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in input document"));
}

#[test]
fn solve_rejects_unknown_salt_ids() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .args(["solve", "--phase", "vegetative", "--system", "coco"])
        .args(["--volume", "10", "--salts", "mkp,unobtainium"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown salt id 'unobtainium'"));
}

#[test]
fn solve_rejects_zero_volume() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .args(["solve", "--phase", "vegetative", "--system", "coco"])
        .args(["--volume", "0", "--salts", "mkp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("volume must be greater than 0"));
}

#[test]
fn ph_out_of_range_is_invalid_input() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .args(["ph", "--current", "15", "--target", "6", "--volume", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input: current pH"));
}

#[test]
fn vpd_humidity_over_100_is_rejected() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .args(["vpd", "--air", "25", "--leaf", "23", "--humidity", "150"])
        .args(["--phase", "vegetative"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("humidity must be a percentage"));
}

#[test]
fn missing_recipe_is_reported() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .args(["recipes", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No recipe with id 'nope'"));
}

#[test]
fn deducting_unstocked_salt_fails() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .args(["inventory", "deduct", "--salt", "mkp", "--grams", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot deduct 5 g of 'mkp'"));
}

#[test]
fn reminder_interval_out_of_range_is_rejected() {
    let dir = tempdir().unwrap();
    for interval in ["0", "366", "4294967295"] {
        nutrient_cmd(dir.path())
            .args(["reminder", "set", "--phase", "vegetative", "--interval", interval])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--interval"));
    }
    assert!(!dir.path().join("watering_reminders.json").exists());
}

#[test]
fn solve_input_rejects_bad_purity_and_negative_profiles() {
    let dir = tempdir().unwrap();
    let salt = |purity: f64, k: f64| {
        serde_json::json!({
            "target": { "K": 100.0 },
            "salts": [{
                "id": "sop",
                "name": "Potassium sulfate",
                "formula": "K2SO4",
                "kind": "macro",
                "provides": { "K": k, "S": 18.4 },
                "purity": purity
            }],
            "volume_liters": 10.0
        })
        .to_string()
    };

    nutrient_cmd(dir.path())
        .args(["solve", "--input", "-"])
        .write_stdin(salt(-5.0, 44.87))
        .assert()
        .failure()
        .stderr(predicate::str::contains("purity of salt 'sop'"));

    nutrient_cmd(dir.path())
        .args(["solve", "--input", "-"])
        .write_stdin(salt(98.0, -44.87))
        .assert()
        .failure()
        .stderr(predicate::str::contains("salt 'sop' K must not be negative"));

    nutrient_cmd(dir.path())
        .args(["solve", "--phase", "vegetative", "--system", "hydro"])
        .args(["--volume", "10", "--salts", "mkp"])
        .args(["--target-json", "{\"P\":-50}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target P must not be negative"));
}

#[test]
fn vpd_rejects_temperatures_outside_the_magnus_range() {
    let dir = tempdir().unwrap();
    nutrient_cmd(dir.path())
        .args(["vpd", "--air", "25", "--leaf", "-237.3", "--humidity", "60"])
        .args(["--phase", "vegetative"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("leaf temperature must be between"));

    nutrient_cmd(dir.path())
        .args(["--json", "vpd", "--air", "-5", "--leaf", "-6", "--humidity", "80"])
        .args(["--phase", "seedling"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"low\""));
}
