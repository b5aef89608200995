//! Property-based tests for mdlinkcheck using proptest
//!
//! These tests generate random inputs to test edge cases and ensure
//! robustness across a wide range of potential inputs.

use assert_cmd::prelude::*;
use mdlinkcheck::checker::extract::heading_slug;
use mdlinkcheck::checker::extract_links;
use mdlinkcheck::config::parse_duration;
use mdlinkcheck::discovery::{FileFinder, MarkdownFinder};
use proptest::prelude::*;
use std::fs;
use std::process::Command;
use std::time::Duration;

const NAME: &str = "mdlinkcheck";

/// Relative link targets that never leave the scanned directory
fn relative_target_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[a-z]{1,8}\.md",
        r"\./[a-z]{1,8}/[a-z]{1,8}\.md",
        r"[a-z]{1,8}\.md#[a-z]{1,8}",
        r"#[a-z]{1,8}",
    ]
}

/// Generate markdown content made of headings, prose and relative links
fn markdown_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            r"# [A-Za-z ]{1,20}",
            Just("Plain text without links".to_string()),
            Just("".to_string()),
            relative_target_strategy().prop_map(|target| format!("[link]({target})")),
            relative_target_strategy().prop_map(|target| format!("![img]({target})")),
            Just("```\n[not a link](nowhere.md)\n```".to_string()),
        ],
        0..15,
    )
    .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_parse_duration_seconds(n in 0u64..100_000) {
        prop_assert_eq!(parse_duration(&format!("{n}s")).unwrap(), Duration::from_secs(n));
    }

    #[test]
    fn test_parse_duration_millis_and_bare_numbers(n in 0u64..10_000_000) {
        let expected = Duration::from_millis(n);
        prop_assert_eq!(parse_duration(&format!("{n}ms")).unwrap(), expected);
        prop_assert_eq!(parse_duration(&n.to_string()).unwrap(), expected);
    }

    #[test]
    fn test_parse_duration_rejects_unknown_units(n in 0u64..1000, unit in "[a-ce-gi-ln-rt-z]{1,3}") {
        let input = format!("{n}{unit}");
        prop_assert!(parse_duration(&input).is_err());
    }

    #[test]
    fn test_heading_slug_is_lowercase_without_whitespace(text in "[A-Za-z0-9 _\\-!?.,]{0,40}") {
        let slug = heading_slug(&text);
        prop_assert_eq!(slug.clone(), slug.to_lowercase());
        prop_assert!(!slug.chars().any(char::is_whitespace));
    }

    #[test]
    fn test_extract_links_keeps_first_seen_order(
        targets in prop::collection::vec(r"https://[a-z]{3,8}\.test/[a-z]{0,6}", 1..8)
    ) {
        let markdown = targets
            .iter()
            .map(|target| format!("[x]({target})"))
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut expected: Vec<String> = Vec::new();
        for target in &targets {
            if !expected.contains(target) {
                expected.push(target.clone());
            }
        }

        prop_assert_eq!(extract_links(&markdown), expected);
    }

    #[test]
    fn test_discovery_skips_node_modules(
        kept in prop::collection::btree_set("[a-z]{1,8}", 0..6),
        vendored in prop::collection::btree_set("[a-z]{1,8}", 0..6),
    ) {
        let dir = tempfile::Builder::new().prefix("docs").tempdir().unwrap();
        let nested = dir.path().join("guide");
        let node_modules = dir.path().join("node_modules").join("pkg");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(&node_modules).unwrap();
        for name in &kept {
            fs::write(nested.join(format!("{name}.md")), "# doc").unwrap();
        }
        for name in &vendored {
            fs::write(node_modules.join(format!("{name}.md")), "# vendored").unwrap();
        }

        let files = MarkdownFinder::default().find_markdown_files(dir.path()).unwrap();

        prop_assert_eq!(files.len(), kept.len());
        prop_assert!(files.iter().all(|f| !f.path().to_string_lossy().contains("node_modules")));
        let paths: Vec<_> = files.iter().map(|f| f.path().to_path_buf()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        prop_assert_eq!(paths, sorted);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_handles_random_markdown(content in markdown_strategy()) {
        let dir = tempfile::Builder::new().prefix("docs").tempdir().unwrap();
        fs::write(dir.path().join("README.md"), &content).unwrap();

        let output = Command::cargo_bin(NAME)
            .unwrap()
            .current_dir(dir.path())
            .env("NO_COLOR", "1")
            .arg("--no-config")
            .output()
            .unwrap();

        // Broken links are expected, crashes are not
        prop_assert!(matches!(output.status.code(), Some(0) | Some(1)));
    }
}
