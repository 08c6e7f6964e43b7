//! Ordering, titling and dispatch guarantees of a full traversal.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use anyhow::{Result, ensure};
use rstest::{fixture, rstest};
use sample_harness::assertions::Registration;
use sample_harness::strategy::{Leaf, LeafEnv, LeafStrategy};
use sample_harness::{
    AssertionFailure, Attribute, CatalogBackend, Component, Depth, DocOptions, Harness,
    HarnessConfig, RecordingRegistry, Section, Sections, TestOptions,
};
use serde_json::Value;
use test_helpers::fixtures::{button_catalog, fixed_clock};
use test_helpers::fs::TempTree;

#[fixture]
fn backend() -> CatalogBackend {
    CatalogBackend::new(button_catalog())
}

fn passing(_: Option<&sample_harness::Wrapper>, _: &str, _: &str) -> sample_harness::CaseResult {
    Ok(())
}

fn button_component() -> Component {
    Component::new()
        .with_method(
            "click",
            Attribute::new()
                .with_prop("label", "Go")
                .with_test("mount", "clicks", passing),
        )
        .with_prop(
            "label",
            Attribute::new()
                .with_prop("label", "Hi")
                .with_test("shallow", "rendersLabel", passing)
                .with_test("render", "rendersMarkup", passing),
        )
        .with_prop(
            "primary",
            Attribute::new()
                .with_prop("label", "Go")
                .with_prop("primary", true)
                .with_test("mount", "isPrimary", passing),
        )
}

fn sections() -> Sections {
    let mut sections = Sections::new();
    sections.insert(
        "Buttons".to_owned(),
        Section::new().with_component("Button", button_component()),
    );
    sections.insert(
        "Inputs".to_owned(),
        Section::new().with_component(
            "TextField",
            Component::new().with_prop(
                "value",
                Attribute::new()
                    .with_prop("value", "x")
                    .with_test("mount", "showsValue", passing),
            ),
        ),
    );
    sections
}

fn both_modes(tree: &TempTree) -> HarnessConfig {
    HarnessConfig::new()
        .with_doc(DocOptions::new(tree.path("guide")))
        .with_test(TestOptions::default())
}

#[rstest]
fn identical_inputs_produce_identical_runs(backend: CatalogBackend) -> Result<()> {
    let first = TempTree::new()?;
    let second = TempTree::new()?;
    let harness = Harness::new(&backend).with_clock(fixed_clock());
    let mut first_registry = RecordingRegistry::new();
    let mut second_registry = RecordingRegistry::new();

    harness.run(&sections(), &both_modes(&first), &mut first_registry)?;
    harness.run(&sections(), &both_modes(&second), &mut second_registry)?;

    ensure!(first_registry == second_registry, "registration streams differ");
    for file in ["guide/Button.md", "guide/TextField.md"] {
        ensure!(first.read(file)? == second.read(file)?, "{file} differs");
    }
    Ok(())
}

#[rstest]
fn attribute_titles_are_unique_per_component(backend: CatalogBackend) -> Result<()> {
    let component = button_component().with_method(
        "label",
        Attribute::new()
            .with_prop("label", "x")
            .with_test("mount", "rendersLabel", passing),
    );
    let mut sections = Sections::new();
    sections.insert("S".to_owned(), Section::new().with_component("Button", component));
    let mut registry = RecordingRegistry::new();
    Harness::new(&backend).run(
        &sections,
        &HarnessConfig::new().with_test(TestOptions::default()),
        &mut registry,
    )?;

    let titles = registry.case_titles();
    let unique: HashSet<_> = titles.iter().collect();
    ensure!(unique.len() == titles.len(), "duplicate titles in {titles:?}");
    ensure!(titles.contains(&"S: Button: [ prop: label ] enzyme-shallow: rendersLabel"));
    ensure!(titles.contains(&"S: Button: [ method: label() ] enzyme-mount: rendersLabel"));
    Ok(())
}

#[rstest]
fn documentation_completes_before_tests_start(backend: CatalogBackend) -> Result<()> {
    let tree = TempTree::new()?;
    let mut registry = RecordingRegistry::new();
    Harness::new(&backend)
        .with_clock(fixed_clock())
        .run(&sections(), &both_modes(&tree), &mut registry)?;

    let mut current_section = None;
    let mut test_started = false;
    for event in registry.events() {
        let Registration::Case { title, .. } = event else {
            continue;
        };
        let section = title.split(':').next().unwrap_or_default().to_owned();
        if current_section.as_ref() != Some(&section) {
            current_section = Some(section);
            test_started = false;
        }
        let is_test = title.contains(" enzyme-");
        ensure!(!(test_started && !is_test), "doc side effect after tests: {title}");
        test_started |= is_test;
    }
    ensure!(registry.summary().failed == 0);
    Ok(())
}

struct ConfigProbe {
    seen: Rc<RefCell<Vec<Value>>>,
}

impl LeafStrategy for ConfigProbe {
    fn run(&self, _leaf: &Leaf<'_>, config: &HarnessConfig, _env: &mut LeafEnv<'_>) {
        if let Ok(value) = serde_json::to_value(config) {
            self.seen.borrow_mut().push(value);
        }
    }
}

#[rstest]
fn passes_never_see_the_other_namespace(backend: CatalogBackend) -> Result<()> {
    let tree = TempTree::new()?;
    let doc_seen = Rc::new(RefCell::new(Vec::new()));
    let test_seen = Rc::new(RefCell::new(Vec::new()));
    let harness = Harness::new(&backend)
        .with_doc_strategy(ConfigProbe { seen: Rc::clone(&doc_seen) })
        .with_test_strategy(ConfigProbe { seen: Rc::clone(&test_seen) });
    let mut registry = RecordingRegistry::new();
    harness.run(&sections(), &both_modes(&tree), &mut registry)?;

    let snapshots: Vec<Value> = doc_seen
        .borrow()
        .iter()
        .chain(test_seen.borrow().iter())
        .cloned()
        .collect();
    ensure!(!snapshots.is_empty());
    for snapshot in &snapshots {
        let has_doc = snapshot.get("doc").is_some();
        let has_test = snapshot.get("test").is_some();
        ensure!(has_doc != has_test, "namespaces leaked: {snapshot}");
    }
    Ok(())
}

#[rstest]
fn shallow_test_receives_shallow_wrapper_once(backend: CatalogBackend) -> Result<()> {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let component = Component::new().with_prop(
        "label",
        Attribute::new()
            .with_prop("label", "Hi")
            .with_test("shallow", "rendersLabel", move |wrapper, title, name| {
                sink.borrow_mut()
                    .push((wrapper.map(sample_harness::Wrapper::depth), title.to_owned(), name.to_owned()));
                Ok(())
            }),
    );
    let mut sections = Sections::new();
    sections.insert("Buttons".to_owned(), Section::new().with_component("Button", component));
    let mut registry = RecordingRegistry::new();
    Harness::new(&backend).run(
        &sections,
        &HarnessConfig::new().with_test(TestOptions::default()),
        &mut registry,
    )?;

    let recorded = calls.borrow();
    ensure!(recorded.len() == 1, "callback ran {} times", recorded.len());
    let (depth, title, name) = recorded
        .first()
        .ok_or_else(|| anyhow::anyhow!("no call recorded"))?;
    ensure!(*depth == Some(Depth::Shallow));
    ensure!(title.ends_with("enzyme-shallow: rendersLabel"), "title was {title}");
    ensure!(name == "label");
    Ok(())
}

#[rstest]
fn props_groups_register_before_methods_groups(backend: CatalogBackend) -> Result<()> {
    let mut registry = RecordingRegistry::new();
    Harness::new(&backend).run(
        &sections(),
        &HarnessConfig::new().with_test(TestOptions::default()),
        &mut registry,
    )?;
    ensure!(
        registry.group_titles()
            == [
                "Buttons: Button: Props",
                "Buttons: Button: Methods",
                "Inputs: TextField: Props",
            ],
        "groups were {:?}",
        registry.group_titles()
    );
    let titles = registry.case_titles();
    ensure!(
        titles.first() == Some(&"Buttons: Button: [ prop: label ] enzyme-shallow: rendersLabel"),
        "cases were {titles:?}"
    );
    Ok(())
}

#[rstest]
fn unknown_depth_still_invokes_callback(backend: CatalogBackend) -> Result<()> {
    let invoked = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&invoked);
    let component = Component::new().with_prop(
        "label",
        Attribute::new()
            .with_prop("label", "Hi")
            .with_test("static", "renders", move |wrapper, _, _| {
                *sink.borrow_mut() = Some(wrapper.is_none());
                Ok(())
            }),
    );
    let mut sections = Sections::new();
    sections.insert("Buttons".to_owned(), Section::new().with_component("Button", component));
    let mut registry = RecordingRegistry::new();
    let report = Harness::new(&backend).run(
        &sections,
        &HarnessConfig::new().with_test(TestOptions::default()),
        &mut registry,
    )?;

    ensure!(report.is_success());
    ensure!(*invoked.borrow() == Some(true), "callback not invoked with None");
    Ok(())
}

#[rstest]
fn failing_assertions_surface_through_the_registry(backend: CatalogBackend) -> Result<()> {
    let component = Component::new()
        .with_prop(
            "label",
            Attribute::new().with_prop("label", "Hi").with_test("mount", "fails", |_, _, _| {
                Err(AssertionFailure::new("label mismatch"))
            }),
        )
        .with_prop(
            "missing",
            Attribute::new().with_test("mount", "neverRuns", passing),
        );
    let mut sections = Sections::new();
    sections.insert("Buttons".to_owned(), Section::new().with_component("Button", component));
    let mut registry = RecordingRegistry::new();
    let report = Harness::new(&backend).run_tests(
        &sections,
        &HarnessConfig::new().with_test(TestOptions::default()),
        &mut registry,
    )?;

    ensure!(report.is_success());
    let failures = registry.failures();
    ensure!(failures.len() == 2, "failures were {failures:?}");
    ensure!(failures
        .iter()
        .any(|(_, err)| err.message().contains("requires prop 'label'")));
    Ok(())
}
