use predicates::prelude::*;
use wxport::test_utils::ProjectFixture;

use super::wxport;

#[test]
fn test_convert_single_page() {
    let fixture = ProjectFixture::sample().unwrap();

    wxport(&fixture)
        .args(["convert", "src/pages/index/index.wxml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 1 page(s) into 4 file(s)"));

    assert!(fixture.path("dist/pages/index/index.axml").is_file());
    assert!(fixture.path("dist/pages/index/index-row.axml").is_file());
    assert!(fixture.path("dist/pages/index/index-wxs-fmt.sjs").is_file());
    assert!(fixture.path("dist/common/card.axml").is_file());
}

#[test]
fn test_convert_all_pages() {
    let fixture = ProjectFixture::sample().unwrap();
    fixture.write("src/pages/about/about.wxml", "<view>about</view>").unwrap();

    wxport(&fixture)
        .args(["convert", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 3 page(s)"));

    assert_eq!(fixture.read("dist/pages/about/about.axml").unwrap(), "<view>about</view>\n");
}

#[test]
fn test_convert_dry_run_writes_nothing() {
    let fixture = ProjectFixture::sample().unwrap();

    wxport(&fixture)
        .args(["convert", "--dry-run", "src/pages/index/index.wxml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write"))
        .stdout(predicate::str::contains("index-row.axml"));

    assert!(!fixture.path("dist").exists());
}

#[test]
fn test_convert_with_extension_overrides() {
    let fixture = ProjectFixture::sample().unwrap();

    wxport(&fixture)
        .args([
            "convert",
            "--output",
            "build",
            "--wxml-ext",
            ".swan",
            "--wxs-ext",
            ".filter.js",
            "src/pages/index/index.wxml",
        ])
        .assert()
        .success();

    let index = fixture.read("build/pages/index/index.swan").unwrap();
    assert!(index.contains("from=\"./index-wxs-fmt.filter.js\""));
    assert!(index.contains("src=\"../../common/card.swan\""));
    assert!(fixture.path("build/pages/index/index-wxs-fmt.filter.js").is_file());
}

#[test]
fn test_missing_import_fails_but_still_writes() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write("src/a.wxml", "<import src=\"./gone.wxml\"/><view/>").unwrap();

    wxport(&fixture)
        .args(["convert", "src/a.wxml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("1 error(s) reported"));

    assert!(fixture.path("dist/a.axml").is_file());
}

#[test]
fn test_parse_error_reports_position() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write("src/a.wxml", "<view>\n  <text>hi</view>").unwrap();

    wxport(&fixture)
        .args(["convert", "src/a.wxml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));

    assert!(!fixture.path("dist").exists());
}

#[test]
fn test_quiet_suppresses_summary() {
    let fixture = ProjectFixture::sample().unwrap();

    wxport(&fixture)
        .args(["--quiet", "convert", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_convert_requires_pages_or_all() {
    let fixture = ProjectFixture::new().unwrap();

    wxport(&fixture).arg("convert").assert().failure();
}

#[test]
fn test_invalid_extension_is_rejected() {
    let fixture = ProjectFixture::sample().unwrap();

    wxport(&fixture)
        .args(["convert", "--wxml-ext", "axml", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ext.wxml must start with '.'"));
}
