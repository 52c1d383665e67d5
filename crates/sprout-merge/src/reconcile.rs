//! Per-element class reconciliation by stable node id.

use std::collections::BTreeSet;
use std::ops::Range;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Deserialize;
use sprout_core::{CLASS_ATTRIBUTE, ID_ATTRIBUTE};

use crate::scanner::{scan_open_tags, AttrValue, OpenTag};

/// Class prefixes that only a developer adds by hand.
pub const DEFAULT_PROTECTED_PREFIXES: &[&str] = &[
    "hover:",
    "focus:",
    "active:",
    "disabled:",
    "visited:",
    "group-",
    "peer-",
    "dark:",
    "data-",
    "motion-",
    "animate-",
];

/// Merge settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    pub protected_prefixes: Vec<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            protected_prefixes: DEFAULT_PROTECTED_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }
}

/// Class strings of the previous output, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdClassMap {
    classes: IndexMap<String, String>,
}

impl IdClassMap {
    /// Collect every tag that has both a quoted id and a quoted class list.
    /// The first tag seen for an id wins.
    pub fn from_source(source: &str) -> Self {
        let mut classes = IndexMap::new();
        for tag in scan_open_tags(source) {
            let (Some(id), Some(class)) = (tag.quoted(ID_ATTRIBUTE), tag.quoted(CLASS_ATTRIBUTE))
            else {
                continue;
            };
            if !id.is_empty() {
                classes
                    .entry(id.to_string())
                    .or_insert_with(|| class.to_string());
            }
        }
        Self { classes }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.classes.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// A replacement of `range` in the new content.
struct Patch {
    range: Range<usize>,
    text: String,
}

/// Carries hand-written classes from old output into new output.
///
/// Generated classes always come from the new output. A class from the old
/// output survives only if it is protected: it starts with one of the
/// protected prefixes or holds an arbitrary `[...]` value. The class list of
/// every tag whose id appears in the old output is written deduplicated and
/// sorted.
#[derive(Debug, Clone, Default)]
pub struct StyleReconciler {
    options: MergeOptions,
}

impl StyleReconciler {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Check if a class must survive regeneration.
    pub fn is_protected(&self, class: &str) -> bool {
        let arbitrary = class
            .find('[')
            .is_some_and(|open| class[open..].contains(']'));
        arbitrary
            || self
                .options
                .protected_prefixes
                .iter()
                .any(|prefix| class.starts_with(prefix.as_str()))
    }

    /// Reconcile `new` against `old`. Text outside patched class lists is
    /// returned exactly as in `new`.
    pub fn reconcile(&self, old: &str, new: &str) -> String {
        let old_classes = IdClassMap::from_source(old);
        if old_classes.is_empty() {
            return new.to_string();
        }

        let patches: Vec<Patch> = scan_open_tags(new)
            .iter()
            .filter_map(|tag| self.patch(tag, &old_classes))
            .collect();
        debug!(
            known_ids = old_classes.len(),
            patched = patches.len();
            "Reconciled classes"
        );

        let mut out = String::with_capacity(new.len());
        let mut cursor = 0;
        for patch in patches {
            out.push_str(&new[cursor..patch.range.start]);
            out.push_str(&patch.text);
            cursor = patch.range.end;
        }
        out.push_str(&new[cursor..]);
        out
    }

    fn patch(&self, tag: &OpenTag<'_>, old_classes: &IdClassMap) -> Option<Patch> {
        let id_attr = tag.attribute(ID_ATTRIBUTE)?;
        let id = tag.quoted(ID_ATTRIBUTE).filter(|id| !id.is_empty())?;
        let old = old_classes.get(id)?;

        let class_value = tag.attribute(CLASS_ATTRIBUTE).map(|attr| &attr.value);
        let (new_classes, target) = match class_value {
            Some(Some(AttrValue::Quoted { text, span })) => (*text, Some(span.clone())),
            // Computed class lists are left alone
            Some(_) => return None,
            None => ("", None),
        };

        let mut merged: BTreeSet<&str> = new_classes.split_whitespace().collect();
        merged.extend(old.split_whitespace().filter(|class| self.is_protected(class)));
        if merged.is_empty() {
            return None;
        }

        let class_list = merged.into_iter().collect::<Vec<_>>().join(" ");
        if target.is_some() && class_list == new_classes {
            return None;
        }
        trace!(node_id = id, classes = class_list.as_str(); "Reconciled class list");

        Some(match target {
            Some(range) => Patch {
                range,
                text: class_list,
            },
            None => {
                let at = id_attr.span.start;
                Patch {
                    range: at..at,
                    text: format!("{}=\"{}\" ", CLASS_ATTRIBUTE, class_list),
                }
            }
        })
    }
}
