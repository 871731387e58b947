//! Integration tests running the full check engine over a fixture repository.

use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};

use fluxdoc_corpus::CorpusError;
use fluxdoc_rules::{
    CheckEngine, ConfigError, DocsConfig, DocsWorkspace, RuleError, RuleId, RunMode, RunOutcome,
    MAX_WIDTH_ENV,
};

const MANIFEST: &str = r#"{
  "navigation": {
    "tabs": [
      {
        "tab": "Docs",
        "groups": [
          { "group": "Start", "pages": ["index", "guides/quickstart"] },
          { "group": "Runtime", "pages": [
            { "group": "Embedding", "pages": ["runtime/jsr223"] }
          ] }
        ]
      }
    ]
  },
  "footer": { "socials": { "github": "https://github.com/TabooLib/fluxon" } }
}"#;

const INDEX: &str = r#"---
title: "Fluxon"
description: "A scripting language for the JVM"
---

Fluxon is a small scripting language. Start with the [quickstart](/guides/quickstart).

| Page | Purpose |
| --- | --- |
| [JSR-223](/runtime/jsr223) | Embedding through `javax.script` |
"#;

const QUICKSTART: &str = r#"---
title: "Quickstart"
description: "Add Fluxon to a Gradle build"
---

Add both artifacts to your build:

```kotlin
dependencies {
    implementation("org.tabooproject.fluxon:fluxon-core:1.2.0")
    implementation("org.tabooproject.fluxon:fluxon-jsr223:1.2.0")
}
```

Then read about [embedding](/runtime/jsr223#setup).
"#;

const JSR223: &str = r#"---
title: "JSR-223"
description: "Run Fluxon through javax.script"
---

```xml
<dependency>org.tabooproject.fluxon:fluxon-jsr223:1.2.0</dependency>
```

<Card title="Back" href="/">Home</Card>
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture_repo() -> TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write(root, "gradle.properties", "group=org.tabooproject.fluxon\nversion=1.2.0\n");
    write(root, "mintlify-docs/docs.json", MANIFEST);
    write(root, "mintlify-docs/index.mdx", INDEX);
    write(root, "mintlify-docs/guides/quickstart.mdx", QUICKSTART);
    write(root, "mintlify-docs/runtime/jsr223.mdx", JSR223);
    write(root, "mintlify-docs/node_modules/pkg/broken.mdx", "no frontmatter");
    temp
}

fn run(root: &Path, mode: RunMode) -> RunOutcome {
    run_with(root, DocsConfig::default(), mode)
}

fn run_with(root: &Path, config: DocsConfig, mode: RunMode) -> RunOutcome {
    let workspace = DocsWorkspace::load(root, config).unwrap();
    CheckEngine::standard()
        .with_mode(mode)
        .run(&workspace.context())
        .unwrap()
}

#[test]
fn test_clean_repository_passes() {
    let temp = fixture_repo();
    let outcome = run(temp.path(), RunMode::FailFast);

    assert!(outcome.passed(), "{:?}", outcome.violations);
    assert_eq!(outcome.checks_run, CheckEngine::standard().check_ids());
}

#[test]
fn test_repeated_runs_are_identical() {
    let temp = fixture_repo();
    write(temp.path(), "mintlify-docs/extra.mdx", "---\ntitle: \"Extra\"\n---\n");
    write(
        temp.path(),
        "mintlify-docs/guides/quickstart.mdx",
        &QUICKSTART.replace("fluxon-core:1.2.0", "fluxon-core:1.0.0"),
    );

    let first = run(temp.path(), RunMode::KeepGoing);
    let second = run(temp.path(), RunMode::KeepGoing);
    assert!(!first.passed());
    assert_eq!(first, second);
}

#[test]
fn test_missing_page_lists_reference() {
    let temp = fixture_repo();
    fs::remove_file(temp.path().join("mintlify-docs/guides/quickstart.mdx")).unwrap();

    let outcome = run(temp.path(), RunMode::FailFast);
    let violation = outcome.first().unwrap();
    assert_eq!(violation.rule, RuleId::PageExists);
    assert_eq!(violation.file, "mintlify-docs/docs.json");
    assert!(violation.message.contains("guides/quickstart"));
    assert_eq!(outcome.violations.len(), 1);
}

#[test]
fn test_inline_code_page_reference_fails() {
    let temp = fixture_repo();
    write(
        temp.path(),
        "mintlify-docs/index.mdx",
        &format!("{INDEX}\nScripts can also run via `runtime/jsr223`.\n"),
    );

    let outcome = run(temp.path(), RunMode::FailFast);
    let violation = outcome.first().unwrap();
    assert_eq!(violation.rule, RuleId::ClickableReference);
    assert_eq!(violation.file, "index.mdx");
    assert!(violation.message.contains("not clickable"));
}

#[test]
fn test_stale_version_names_expected_coordinate() {
    let temp = fixture_repo();
    write(
        temp.path(),
        "mintlify-docs/guides/quickstart.mdx",
        &QUICKSTART.replace("fluxon-core:1.2.0", "fluxon-core:1.1.0"),
    );

    let outcome = run(temp.path(), RunMode::FailFast);
    let violation = outcome.first().unwrap();
    assert_eq!(violation.rule, RuleId::VersionPin);
    assert_eq!(violation.file, "guides/quickstart.mdx");
    assert!(violation
        .message
        .contains("org.tabooproject.fluxon:fluxon-core:1.2.0"));
}

#[test]
fn test_overlong_prose_line_fails() {
    let temp = fixture_repo();
    let long = "a".repeat(121);
    write(
        temp.path(),
        "mintlify-docs/index.mdx",
        &format!("{INDEX}\n{long}\n"),
    );

    let outcome = run(temp.path(), RunMode::FailFast);
    let violation = outcome.first().unwrap();
    assert_eq!(violation.rule, RuleId::LineWidth);
    assert!(violation.message.starts_with("visible width 121 > 120"));

    let mut config = DocsConfig::default();
    config
        .apply_env_with(|name| (name == MAX_WIDTH_ENV).then(|| "121".to_string()))
        .unwrap();
    assert!(run_with(temp.path(), config, RunMode::FailFast).passed());
}

#[test]
fn test_fail_fast_reports_earliest_check_only() {
    let temp = fixture_repo();
    write(
        temp.path(),
        "mintlify-docs/index.mdx",
        &format!("{}\nBroken [link](/nowhere).\n", INDEX.replace("title: \"Fluxon\"\n", "")),
    );

    let outcome = run(temp.path(), RunMode::FailFast);
    assert_eq!(outcome.violations.len(), 1);
    assert_eq!(outcome.first().unwrap().rule, RuleId::Frontmatter);

    let outcome = run(temp.path(), RunMode::KeepGoing);
    let rules: Vec<RuleId> = outcome.violations.iter().map(|v| v.rule).collect();
    assert_eq!(rules, vec![RuleId::Frontmatter, RuleId::LinkResolves]);
}

#[test]
fn test_config_file_overrides_defaults() {
    let temp = fixture_repo();
    write(
        temp.path(),
        "fluxdoc.toml",
        "max_visible_width = 0\nexclude = [\"drafts/**\"]\n",
    );
    write(temp.path(), "mintlify-docs/drafts/wip.mdx", "not a page yet");
    write(
        temp.path(),
        "mintlify-docs/index.mdx",
        &format!("{INDEX}\n{}\n", "b".repeat(300)),
    );

    let config = DocsConfig::discover(temp.path(), None).unwrap();
    assert!(run_with(temp.path(), config, RunMode::FailFast).passed());
}

#[test]
fn test_missing_manifest_is_environment_error() {
    let temp = fixture_repo();
    fs::remove_file(temp.path().join("mintlify-docs/docs.json")).unwrap();

    let err = DocsWorkspace::load(temp.path(), DocsConfig::default()).unwrap_err();
    assert!(matches!(err, RuleError::Corpus(CorpusError::ManifestNotFound(_))));
}

#[test]
fn test_missing_metadata_is_environment_error() {
    let temp = fixture_repo();
    fs::remove_file(temp.path().join("gradle.properties")).unwrap();

    let workspace = DocsWorkspace::load(temp.path(), DocsConfig::default()).unwrap();
    let err = CheckEngine::standard()
        .run(&workspace.context())
        .unwrap_err();
    assert!(matches!(err, RuleError::Corpus(CorpusError::MetadataNotFound(_))));
}

#[test]
fn test_invalid_width_override_fails_before_loading() {
    let mut config = DocsConfig::default();
    let err = config
        .apply_env_with(|name| (name == MAX_WIDTH_ENV).then(|| "abc".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidInteger { .. }));
}
