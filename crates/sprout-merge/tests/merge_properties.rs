use proptest::prelude::*;
use sprout_core::{ZONE_BEGIN, ZONE_END};
use sprout_merge::{find_zone, scan_open_tags, IdClassMap, StyleReconciler, ZoneMerger};

// ===================
// Strategies
// ===================

const CLASS_POOL: &[&str] = &[
    "flex",
    "flex-col",
    "p-4",
    "gap-2",
    "bg-white",
    "bg-red-500",
    "text-black",
    "rounded-lg",
    "hover:bg-blue-600",
    "focus:ring-2",
    "dark:bg-slate-900",
    "w-[37px]",
    "animate-pulse",
    "group-hover:underline",
];

/// Text that never contains a zone marker.
fn outside_text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ;=(){}\n]{0,60}"
}

fn class_list_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(CLASS_POOL.to_vec(), 0..=5)
}

/// Zone content with one element per entry, ids `1:0`, `1:1`, ...
/// `None` entries are emitted without a class attribute.
fn markup_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::option::weighted(0.8, class_list_strategy()), 1..6).prop_map(
        |elements| {
            let lines: Vec<String> = elements
                .iter()
                .enumerate()
                .map(|(i, classes)| match classes {
                    Some(classes) => format!(
                        "\n      <div className=\"{}\" data-mcp-id=\"1:{}\" />",
                        classes.join(" "),
                        i
                    ),
                    None => format!("\n      <div data-mcp-id=\"1:{}\" />", i),
                })
                .collect();
            format!("{}\n      ", lines.concat())
        },
    )
}

fn wrap(prefix: &str, inner: &str, suffix: &str) -> String {
    format!("{prefix}{ZONE_BEGIN}{inner}{ZONE_END}{suffix}")
}

// ===================
// Property Test Functions
// ===================

/// Merging the same output twice changes nothing the second time.
fn check_merge_is_idempotent(existing: &str, new: &str) -> Result<(), TestCaseError> {
    let merger = ZoneMerger::default();
    let once = merger.merge(existing, new);
    let twice = merger.merge(&once, new);
    prop_assert_eq!(once, twice);
    Ok(())
}

/// Bytes outside the existing zone survive every merge.
fn check_outside_is_preserved(
    prefix: &str,
    old_inner: &str,
    suffix: &str,
    new: &str,
) -> Result<(), TestCaseError> {
    let existing = wrap(prefix, old_inner, suffix);
    let merged = ZoneMerger::default().merge(&existing, new);

    let zone = find_zone(&merged);
    prop_assert!(zone.is_some(), "merged output lost its zone: {merged:?}");
    let zone = zone.unwrap();
    prop_assert_eq!(zone.prefix, prefix);
    prop_assert_eq!(zone.suffix, suffix);
    Ok(())
}

/// Protected classes of old elements reappear on the same ids.
fn check_protected_classes_survive(old_inner: &str, new_inner: &str) -> Result<(), TestCaseError> {
    let reconciler = StyleReconciler::default();
    let merged = reconciler.reconcile(old_inner, new_inner);
    let old = IdClassMap::from_source(old_inner);
    let result = IdClassMap::from_source(&merged);

    for tag in scan_open_tags(new_inner) {
        let Some(id) = tag.quoted("data-mcp-id") else {
            continue;
        };
        let Some(old_classes) = old.get(id) else {
            continue;
        };
        let merged_classes: Vec<&str> = result
            .get(id)
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default();
        for class in old_classes
            .split_whitespace()
            .filter(|class| reconciler.is_protected(class))
        {
            prop_assert!(
                merged_classes.contains(&class),
                "`{class}` dropped from {id}: {merged:?}"
            );
        }
    }
    Ok(())
}

/// Generated classes always come through, whatever the old classes were.
fn check_new_classes_are_kept(old_inner: &str, new_inner: &str) -> Result<(), TestCaseError> {
    let merged = StyleReconciler::default().reconcile(old_inner, new_inner);
    let fresh = IdClassMap::from_source(new_inner);
    let result = IdClassMap::from_source(&merged);

    for tag in scan_open_tags(new_inner) {
        let Some(id) = tag.quoted("data-mcp-id") else {
            continue;
        };
        let Some(new_classes) = fresh.get(id) else {
            continue;
        };
        let merged_classes = result.get(id).unwrap_or_default();
        for class in new_classes.split_whitespace() {
            prop_assert!(
                merged_classes.split_whitespace().any(|c| c == class),
                "`{class}` missing from {id}: {merged:?}"
            );
        }
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn merge_is_idempotent_with_zones(
        prefix in outside_text_strategy(),
        old_inner in markup_strategy(),
        suffix in outside_text_strategy(),
        new_prefix in outside_text_strategy(),
        new_inner in markup_strategy(),
        new_suffix in outside_text_strategy(),
    ) {
        check_merge_is_idempotent(
            &wrap(&prefix, &old_inner, &suffix),
            &wrap(&new_prefix, &new_inner, &new_suffix),
        )?;
    }

    #[test]
    fn merge_is_idempotent_without_zones(
        old_inner in markup_strategy(),
        new_inner in markup_strategy(),
    ) {
        check_merge_is_idempotent(&old_inner, &new_inner)?;
    }

    #[test]
    fn outside_zone_is_preserved(
        prefix in outside_text_strategy(),
        old_inner in markup_strategy(),
        suffix in outside_text_strategy(),
        new_inner in markup_strategy(),
        marked in any::<bool>(),
    ) {
        let new = if marked {
            wrap("import React from 'react';\n", &new_inner, "\nexport default X;\n")
        } else {
            new_inner
        };
        check_outside_is_preserved(&prefix, &old_inner, &suffix, &new)?;
    }

    #[test]
    fn protected_classes_survive(
        old_inner in markup_strategy(),
        new_inner in markup_strategy(),
    ) {
        check_protected_classes_survive(&old_inner, &new_inner)?;
    }

    #[test]
    fn new_classes_are_kept(
        old_inner in markup_strategy(),
        new_inner in markup_strategy(),
    ) {
        check_new_classes_are_kept(&old_inner, &new_inner)?;
    }
}
