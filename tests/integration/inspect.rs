use wxport::test_utils::ProjectFixture;

use super::wxport;

#[test]
fn test_inspect_prints_report_json() {
    let fixture = ProjectFixture::sample().unwrap();

    let output = wxport(&fixture)
        .args(["--quiet", "inspect", "src/pages/index/index.wxml"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let deps = report["result"]["deps"].as_object().unwrap();
    assert_eq!(deps.len(), 2);
    assert!(deps.keys().any(|path| path.ends_with("index-row.axml")));
    assert_eq!(report["result"]["entry"]["wxs"][0]["name"], "fmt");
    assert!(report["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn test_inspect_reports_cycle() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write("src/a.wxml", "<import src=\"./b.wxml\"/><view/>").unwrap();
    fixture.write("src/b.wxml", "<import src=\"./a.wxml\"/><view/>").unwrap();

    let output = wxport(&fixture).args(["-q", "inspect", "src/a.wxml"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let diagnostic = &report["diagnostics"][0];
    assert_eq!(diagnostic["kind"], "circular-import");
    assert_eq!(diagnostic["chain"].as_array().unwrap().len(), 3);
}
