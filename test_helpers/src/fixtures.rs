//! Sample trees, catalogs and clocks used across integration tests.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use sample_harness::{ComponentCatalog, ComponentSpec, FixedClock, Sections};

/// Header line produced by [`fixed_clock`].
pub const FIXED_HEADER: &str = "[//]: # (** auto-generated 2024-05-01T12:00:00.000Z **)";

/// Sample file with a catalog and two sections, in the JSON layout the
/// guide builder reads.
pub const GUIDE_SAMPLES_JSON: &str = r#"{
  "components": {
    "Button": {"requiredProps": ["label"], "defaultProps": {"primary": false}},
    "TextField": {"defaultProps": {"value": ""}}
  },
  "sections": {
    "Buttons": {"sectionComponents": {
      "Button": {"samples": {
        "props": {
          "label": {"props": {"label": "Hi"}, "styleguidist": {}},
          "primary": {"props": {"label": "Go", "primary": true}}
        },
        "methods": {
          "click": {"props": {"label": "Go", "onClick": {"$fn": "() => {}"}}}
        }
      }}
    }},
    "Forms": {"sectionComponents": {
      "TextField": {"samples": {"props": {
        "value": {"props": {"value": "typed"}, "styleguidist": {"script": "const noop = () => {};"}}
      }}}
    }}
  }
}"#;

/// Instant used by [`fixed_clock`].
#[must_use]
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Clock frozen at [`fixed_instant`].
#[must_use]
pub fn fixed_clock() -> FixedClock {
    FixedClock(fixed_instant())
}

/// Catalog declaring `Button`, `Icon` and `TextField`.
#[must_use]
pub fn button_catalog() -> ComponentCatalog {
    ComponentCatalog::new()
        .with(
            "Button",
            ComponentSpec::default()
                .with_required("label")
                .with_default("primary", false)
                .with_default("size", "md"),
        )
        .with("Icon", ComponentSpec::default().with_required("name"))
        .with("TextField", ComponentSpec::default().with_default("value", ""))
}

/// The single-attribute `Button` section used by round-trip tests.
///
/// # Errors
///
/// Returns an error if the embedded sample tree fails to decode.
pub fn button_sections() -> Result<Sections> {
    sections_from_json(
        r#"{"Button": {"sectionComponents": {"Button": {"samples": {"props": {
            "label": {"props": {"label": "Hi"}, "styleguidist": {}}
        }}}}}}"#,
    )
}

/// Decodes a sample tree from JSON text.
///
/// # Errors
///
/// Returns an error if `json` is not a valid sample tree.
pub fn sections_from_json(json: &str) -> Result<Sections> {
    serde_json::from_str(json).context("decode sample sections")
}
