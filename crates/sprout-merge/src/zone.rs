//! Managed-zone detection and replacement.

use log::{debug, warn};
use sprout_core::{ZONE_BEGIN, ZONE_END};

use crate::reconcile::{MergeOptions, StyleReconciler};

/// A file split around its managed zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedZone<'a> {
    /// Everything before the begin marker.
    pub prefix: &'a str,
    /// Everything between the markers.
    pub inner: &'a str,
    /// Everything after the end marker.
    pub suffix: &'a str,
}

/// Locate the managed zone: the first begin marker and the first end marker
/// after it. Returns `None` when either is missing.
pub fn find_zone(text: &str) -> Option<ManagedZone<'_>> {
    let begin = text.find(ZONE_BEGIN)?;
    let inner_start = begin + ZONE_BEGIN.len();
    let Some(inner_len) = text[inner_start..].find(ZONE_END) else {
        warn!(position = begin; "Zone begin marker without end marker, treating file as unmarked");
        return None;
    };
    let inner_end = inner_start + inner_len;

    Some(ManagedZone {
        prefix: &text[..begin],
        inner: &text[inner_start..inner_end],
        suffix: &text[inner_end + ZONE_END.len()..],
    })
}

/// Add each of `imports` that `text` does not already contain.
///
/// Missing lines go after the last import statement before the managed
/// zone, or at the top of the file when there is none. Code outside the
/// zone is otherwise left alone, so a component registered after the file
/// was first generated still gets its import.
pub fn add_missing_imports(text: &str, imports: &[String]) -> String {
    let missing: Vec<&str> = imports
        .iter()
        .map(String::as_str)
        .filter(|line| !line.is_empty() && !text.contains(line))
        .collect();
    if missing.is_empty() {
        return text.to_string();
    }

    let head_end = text.find(ZONE_BEGIN).unwrap_or(text.len());
    let at = import_block_end(&text[..head_end]);
    debug!(added = missing.len(); "Adding missing imports");

    let added: usize = missing.iter().map(|line| line.len() + 1).sum();
    let mut out = String::with_capacity(text.len() + added + 1);
    out.push_str(&text[..at]);
    if at > 0 && !text[..at].ends_with('\n') {
        out.push('\n');
    }
    for line in missing {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&text[at..]);
    out
}

/// Byte offset just past the last import statement in `head`, or 0.
fn import_block_end(head: &str) -> usize {
    let mut line_start = 0;
    let mut last_import = None;
    for line in head.split_inclusive('\n') {
        if line.trim_start().starts_with("import ") {
            last_import = Some(line_start);
        }
        line_start += line.len();
    }

    let Some(start) = last_import else {
        return 0;
    };
    let statement_end = head[start..]
        .find(';')
        .map_or(head.len(), |semicolon| start + semicolon);
    head[statement_end..]
        .find('\n')
        .map_or(head.len(), |newline| statement_end + newline + 1)
}

/// Merges freshly generated output into an existing file.
///
/// Only the managed zone of the existing file is rewritten. Inside the zone
/// the new markup wins, except for protected classes, which the
/// [`StyleReconciler`] carries over by node id.
#[derive(Debug, Clone, Default)]
pub struct ZoneMerger {
    reconciler: StyleReconciler,
}

impl ZoneMerger {
    pub fn new(options: MergeOptions) -> Self {
        Self {
            reconciler: StyleReconciler::new(options),
        }
    }

    pub fn reconciler(&self) -> &StyleReconciler {
        &self.reconciler
    }

    /// Merge `new` into `existing`.
    ///
    /// Without markers in `existing` the result follows the layout of `new`;
    /// nothing outside the markup is preserved in that case.
    pub fn merge(&self, existing: &str, new: &str) -> String {
        match (find_zone(existing), find_zone(new)) {
            (Some(old), Some(fresh)) => {
                debug!("Merging into existing managed zone");
                self.splice(old.prefix, self.reconciler.reconcile(old.inner, fresh.inner), old.suffix)
            }
            (Some(old), None) => {
                debug!("Merging unmarked output into existing managed zone");
                self.splice(old.prefix, self.reconciler.reconcile(old.inner, new), old.suffix)
            }
            (None, Some(fresh)) => {
                debug!("Existing file has no managed zone, adopting generated layout");
                self.splice(fresh.prefix, self.reconciler.reconcile(existing, fresh.inner), fresh.suffix)
            }
            (None, None) => {
                debug!("Neither side has a managed zone, reconciling whole files");
                self.reconciler.reconcile(existing, new)
            }
        }
    }

    fn splice(&self, prefix: &str, inner: String, suffix: &str) -> String {
        let mut out = String::with_capacity(
            prefix.len() + ZONE_BEGIN.len() + inner.len() + ZONE_END.len() + suffix.len(),
        );
        out.push_str(prefix);
        out.push_str(ZONE_BEGIN);
        out.push_str(&inner);
        out.push_str(ZONE_END);
        out.push_str(suffix);
        out
    }
}
