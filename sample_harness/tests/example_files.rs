//! Content and write guarantees of generated example files.

use anyhow::{Result, ensure};
use rstest::{fixture, rstest};
use sample_harness::{
    Attribute, CatalogBackend, Component, DocOptions, Harness, HarnessConfig, HarnessError,
    RecordingRegistry, Section, Sections,
};
use serde_json::json;
use test_helpers::fixtures::{FIXED_HEADER, button_catalog, button_sections, fixed_clock};
use test_helpers::fs::TempTree;
use test_helpers::text::{example_blocks, header, lines_starting_with};

#[fixture]
fn backend() -> CatalogBackend {
    CatalogBackend::new(button_catalog())
}

fn guide(tree: &TempTree) -> HarnessConfig {
    HarnessConfig::new().with_doc(DocOptions::new(tree.path("guide")))
}

#[rstest]
fn button_label_round_trips_into_its_file(backend: CatalogBackend) -> Result<()> {
    let tree = TempTree::new()?;
    let mut registry = RecordingRegistry::new();
    let report = Harness::new(&backend).with_clock(fixed_clock()).run(
        &button_sections()?,
        &guide(&tree),
        &mut registry,
    )?;

    ensure!(report.is_success());
    let text = tree.read("guide/Button.md")?;
    ensure!(
        text == format!(
            "{FIXED_HEADER}\n\n### props\n\n#### label\n```js\n<Button label=\"Hi\" />\n```\n"
        ),
        "unexpected file:\n{text}"
    );
    ensure!(
        registry.case_titles()
            == [
                "Button: Button: [ prop: label ] styleguide example appended",
                "Button: Button: example file written",
            ]
    );
    ensure!(registry.group_titles() == ["Button: Button: Props Styleguide Examples"]);
    Ok(())
}

#[rstest]
fn file_lists_props_before_methods_with_preambles(backend: CatalogBackend) -> Result<()> {
    let tree = TempTree::new()?;
    let component = Component::new()
        .with_method("focus", Attribute::new().with_prop("label", "F"))
        .with_prop(
            "size",
            Attribute::new()
                .with_prop("label", "S")
                .with_prop("size", "lg")
                .with_doc_script("import theme from './theme';"),
        )
        .with_prop("primary", Attribute::new().with_prop("label", "P").with_prop("primary", true));
    let mut sections = Sections::new();
    sections.insert("Buttons".to_owned(), Section::new().with_component("Button", component));
    let config = HarnessConfig::new()
        .with_doc(DocOptions::new(tree.path("guide")).with_preamble("import Button from './Button';"));

    Harness::new(&backend)
        .with_clock(fixed_clock())
        .build_guide(&sections, &config, &mut RecordingRegistry::new())?;

    let text = tree.read("guide/Button.md")?;
    ensure!(header(&text) == FIXED_HEADER);
    ensure!(
        lines_starting_with(&text, "#")
            == ["### props", "#### size", "#### primary", "### methods", "#### focus()"],
        "headings out of order:\n{text}"
    );
    ensure!(
        example_blocks(&text)
            == [
                "import theme from './theme';\n<Button label=\"S\" size=\"lg\" />",
                "import Button from './Button';\n<Button label=\"P\" primary />",
                "import Button from './Button';\n<Button label=\"F\" />",
            ],
        "blocks were {:?}",
        example_blocks(&text)
    );
    Ok(())
}

#[rstest]
fn broken_example_leaves_siblings_intact(backend: CatalogBackend) -> Result<()> {
    let tree = TempTree::new()?;
    let component = Component::new()
        .with_prop("before", Attribute::new().with_prop("label", "A"))
        .with_prop("broken", Attribute::new())
        .with_prop("after", Attribute::new().with_prop("label", "B"));
    let mut sections = Sections::new();
    sections.insert("Buttons".to_owned(), Section::new().with_component("Button", component));
    let mut registry = RecordingRegistry::new();

    let report = Harness::new(&backend).run(&sections, &guide(&tree), &mut registry)?;

    ensure!(report.is_success());
    let text = tree.read("guide/Button.md")?;
    ensure!(
        example_blocks(&text) == ["<Button label=\"A\" />", "", "<Button label=\"B\" />"],
        "blocks were {:?}",
        example_blocks(&text)
    );
    ensure!(registry.summary().failed == 0);
    Ok(())
}

#[rstest]
fn stale_files_are_replaced_not_appended(backend: CatalogBackend) -> Result<()> {
    let tree = TempTree::new()?;
    tree.write("guide/Button.md", "stale content that must disappear\n")?;
    Harness::new(&backend).with_clock(fixed_clock()).run(
        &button_sections()?,
        &guide(&tree),
        &mut RecordingRegistry::new(),
    )?;
    let text = tree.read("guide/Button.md")?;
    ensure!(text.starts_with(FIXED_HEADER));
    ensure!(!text.contains("stale"));
    Ok(())
}

#[rstest]
fn flush_failure_is_reported_and_later_sections_still_run(backend: CatalogBackend) -> Result<()> {
    let tree = TempTree::new()?;
    let blocker = tree.write("blocker", "not a directory")?;
    let mut sections = Sections::new();
    sections.insert(
        "Broken".to_owned(),
        Section::new().with_component(
            "Button",
            Component::new()
                .with_prop("label", Attribute::new().with_prop("label", "x"))
                .with_options(json!({"doc": {"output_dir": blocker.join("nested").as_str()}})),
        ),
    );
    sections.insert(
        "Fine".to_owned(),
        Section::new().with_component(
            "TextField",
            Component::new().with_prop("value", Attribute::new().with_prop("value", "v")),
        ),
    );
    let mut registry = RecordingRegistry::new();

    let report = Harness::new(&backend).run(&sections, &guide(&tree), &mut registry)?;

    ensure!(report.failures.len() == 1, "failures: {:?}", report.failures);
    let failure = report
        .failures
        .first()
        .ok_or_else(|| anyhow::anyhow!("missing failure"))?;
    ensure!(failure.section == "Broken");
    ensure!(matches!(failure.error, HarnessError::Io { .. }));
    ensure!(tree.exists("guide/TextField.md"));
    ensure!(!tree.exists("guide/Button.md"));
    Ok(())
}
