use predicates::prelude::*;
use wxport::test_utils::ProjectFixture;

use super::wxport;

#[test]
fn test_config_file_in_working_directory_is_used() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write("app/pages/a/a.wxml", "<view>a</view>").unwrap();
    fixture.write("wxport.toml", "input = \"app\"\noutput = \"out\"\n\n[ext]\nwxml = \".ttml\"\n").unwrap();

    wxport(&fixture).args(["convert", "--all"]).assert().success();

    assert!(fixture.path("out/pages/a/a.ttml").is_file());
}

#[test]
fn test_explicit_config_path() {
    let fixture = ProjectFixture::sample().unwrap();
    fixture.write("configs/alipay.toml", "input = \"../src\"\noutput = \"../alipay\"\n").unwrap();

    wxport(&fixture)
        .args(["--config", "configs/alipay.toml", "convert", "--all"])
        .assert()
        .success();

    assert!(fixture.path("alipay/pages/index/index.axml").is_file());
}

#[test]
fn test_command_line_overrides_config_file() {
    let fixture = ProjectFixture::sample().unwrap();
    fixture.write("wxport.toml", "output = \"from-config\"\n").unwrap();

    wxport(&fixture).args(["convert", "--output", "from-flag", "--all"]).assert().success();

    assert!(fixture.path("from-flag/common/card.axml").is_file());
    assert!(!fixture.path("from-config").exists());
}

#[test]
fn test_missing_explicit_config_fails() {
    let fixture = ProjectFixture::sample().unwrap();

    wxport(&fixture)
        .args(["-c", "nope.toml", "convert", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn test_malformed_config_fails() {
    let fixture = ProjectFixture::sample().unwrap();
    fixture.write("wxport.toml", "input = [\n").unwrap();

    wxport(&fixture).args(["convert", "--all"]).assert().failure();
}
