use wxport::fragment::Node;
use wxport::parser::MarkupParser;
use wxport::resolver::{DiagnosticKind, convert_page};
use wxport::test_utils::{ProjectFixture, init_test_logging};
use wxport::utils::LocalFs;
use wxport::writer;

fn import_names(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().filter(|n| n.name == "import").filter_map(|n| n.attr("name")).collect()
}

#[test]
fn test_sample_project_resolves_into_three_artifacts() {
    init_test_logging(None);
    let fixture = ProjectFixture::sample().unwrap();
    let options = fixture.options();
    let parser = MarkupParser::new().unwrap();
    let entry = fixture.path("src/pages/index/index.wxml");

    let report = convert_page(&LocalFs, &parser, &options, &entry).unwrap();

    assert!(report.diagnostics.is_empty());
    // entry, the split `row` template and the folded card library
    assert_eq!(report.result.artifact_count(), 3);

    let entry_artifact = report.result.entry.as_ref().unwrap();
    assert_eq!(import_names(&entry_artifact.nodes), vec!["import-row", "import-card"]);
    assert_eq!(entry_artifact.wxs.len(), 1);
    assert_eq!(entry_artifact.wxs[0].path, fixture.path("src/pages/index/index-wxs-fmt.sjs"));

    let row = report.result.dep(&fixture.path("dist/pages/index/index-row.axml")).unwrap();
    assert_eq!(import_names(&row.nodes), vec!["row", "import-card"]);

    let card = report.result.dep(&fixture.path("dist/common/card.axml")).unwrap();
    assert_eq!(import_names(&card.nodes), vec!["card"]);
}

#[test]
fn test_sample_project_written_to_disk() {
    let fixture = ProjectFixture::sample().unwrap();
    let options = fixture.options();
    let parser = MarkupParser::new().unwrap();
    let entry = fixture.path("src/pages/index/index.wxml");

    let report = convert_page(&LocalFs, &parser, &options, &entry).unwrap();
    let written = writer::write_run(&report.result, &entry, &options, &LocalFs).unwrap();
    assert_eq!(written.len(), 4);

    let index = fixture.read("dist/pages/index/index.axml").unwrap();
    assert!(index.starts_with("<import-sjs name=\"fmt\" from=\"./index-wxs-fmt.sjs\"/>\n"));
    assert!(index.contains("<import name=\"import-row\" src=\"./index-row.axml\" template=\"false\"/>"));
    assert!(index.contains("<import name=\"import-card\" src=\"../../common/card.axml\" template=\"false\"/>"));
    assert!(index.contains("<text>{{fmt.upper(title)}}</text>"));

    let row = fixture.read("dist/pages/index/index-row.axml").unwrap();
    assert!(row.starts_with("<import name=\"row\" src=\"./index-row.axml\" template=\"true\"/>\n"));

    let script = fixture.read("dist/pages/index/index-wxs-fmt.sjs").unwrap();
    assert!(script.starts_with("module.exports"));

    let card = fixture.read("dist/common/card.axml").unwrap();
    assert!(card.contains("<view class=\"card\">{{item.title}}</view>"));
}

#[test]
fn test_rerunning_a_page_is_stable() {
    let fixture = ProjectFixture::sample().unwrap();
    let options = fixture.options();
    let parser = MarkupParser::new().unwrap();
    let entry = fixture.path("src/pages/index/index.wxml");

    let first = convert_page(&LocalFs, &parser, &options, &entry).unwrap();
    let second = convert_page(&LocalFs, &parser, &options, &entry).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_transitive_imports_on_disk() {
    let fixture = ProjectFixture::new().unwrap();
    fixture
        .write("src/pages/a/a.wxml", "<import src=\"../../b.wxml\"/><view><template is=\"b\"/></view>")
        .unwrap();
    fixture
        .write("src/b.wxml", "<import src=\"./c.wxml\"/><template name=\"b\"><template is=\"c\"/></template>")
        .unwrap();
    fixture.write("src/c.wxml", "<template name=\"c\"><text>c</text></template>").unwrap();

    let options = fixture.options();
    let parser = MarkupParser::new().unwrap();
    let report =
        convert_page(&LocalFs, &parser, &options, &fixture.path("src/pages/a/a.wxml")).unwrap();

    assert!(report.diagnostics.is_empty());
    let b = report.result.dep(&fixture.path("dist/b.axml")).unwrap();
    let mut names = import_names(&b.nodes);
    names.sort_unstable();
    assert_eq!(names, vec!["b", "import-c"]);
    assert!(report.result.dep(&fixture.path("dist/c.axml")).is_some());

    // a sees only what b exports, not c
    let entry = report.result.entry.as_ref().unwrap();
    assert_eq!(import_names(&entry.nodes), vec!["import-b"]);
}

#[test]
fn test_cycle_on_disk_is_reported() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write("src/a.wxml", "<import src=\"./b.wxml\"/><view/>").unwrap();
    fixture.write("src/b.wxml", "<import src=\"./a.wxml\"/><template name=\"b\"><view/></template>").unwrap();

    let options = fixture.options();
    let parser = MarkupParser::new().unwrap();
    let report = convert_page(&LocalFs, &parser, &options, &fixture.path("src/a.wxml")).unwrap();

    assert_eq!(report.error_count(), 1);
    assert!(matches!(report.diagnostics[0].kind, DiagnosticKind::CircularImport { .. }));
    assert_eq!(report.diagnostics[0].referrer.as_deref(), Some(fixture.path("src/b.wxml").as_path()));
    assert!(report.result.entry.is_some());
}

#[test]
fn test_entry_outside_input_root_keeps_relative_position() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write("shared/lib.wxml", "<template name=\"lib\"><view/></template>").unwrap();

    let options = fixture.options();
    let parser = MarkupParser::new().unwrap();
    let report =
        convert_page(&LocalFs, &parser, &options, &fixture.path("shared/lib.wxml")).unwrap();

    assert!(report.result.dep(&fixture.path("shared/lib.axml")).is_some());
}
