use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of infrastructure a denied frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// The test framework's own code.
    Framework,

    /// The language runtime's support code for running tests.
    TestSupport,

    /// The language runtime's entry points, thread startup and scheduling.
    Scheduler,
}

impl Category {
    /// All categories, in the order presets list them.
    pub const ALL: [Category; 3] = [
        Category::Framework,
        Category::TestSupport,
        Category::Scheduler,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Framework => "framework",
            Category::TestSupport => "test support",
            Category::Scheduler => "scheduler",
        })
    }
}

/// The configuration form of a single denylist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternConfig {
    /// Which kind of frame the pattern identifies.
    pub category: Category,

    /// A regular expression matched against a frame's identifier line.
    pub pattern: String,
}

#[derive(Debug, Clone)]
struct Entry {
    category: Category,
    regex: Regex,
}

/// A set of patterns identifying stack frames that belong to infrastructure
/// rather than to the code under test.
///
/// Patterns are matched against the identifier line of each frame (the
/// function name line, not the `file:line` line). Entries are kept in the
/// order they were added, and the first matching entry decides the
/// [`Category`] reported by [`Denylist::matching`].
#[derive(Debug, Clone)]
pub struct Denylist {
    entries: Vec<Entry>,
}

// Go stack dumps: package paths appear in the identifier line, either as
// GOPATH-style `/pkg/<name>/` directories or as bare standard library
// package names.
const GO_FRAMEWORK: &str = r"(^|/)ginkgo[/.]";
const GO_TEST_SUPPORT: &str = r"/pkg/testing/|^testing\.";
const GO_SCHEDULER: &str = r"/pkg/runtime/|^runtime[./]";

// Traces rendered by `crate::format_backtrace`: the identifier line is a
// demangled Rust path, possibly wrapped in `<... as Trait>`. With only line
// tables in the debug info, names lose their path and this crate's entry
// points show up bare.
const RUST_FRAMEWORK: &str = concat!(
    r"^<?(codelocation|backtrace)::",
    r"|^(stack_trace|format_backtrace|capture|capture_from|capture_frame|capture_with_stack_trace|trace_unsynchronized)$",
);
const RUST_TEST_SUPPORT: &str = r"^<?test::";
const RUST_SCHEDULER: &str = concat!(
    r"^<?(std::(rt|thread|sys|sys_common|panicking|panic)|core::(ops::function|panic))::",
    r"|^<alloc::boxed::Box<.*> as core::ops::function::",
    r"|__rust_(begin|end)_short_backtrace|^__rust_try",
    r"|^(main|_start|__libc_start_main|__libc_start_call_main|start_thread|(__)?clone3?|thread_start|BaseThreadInitThunk|RtlUserThreadStart)$",
);

fn preset(patterns: [(Category, &str); 3]) -> Denylist {
    patterns
        .into_iter()
        .fold(Denylist::new(), |denylist, (category, pattern)| {
            denylist
                .with(category, pattern)
                .unwrap_or_else(|error| panic!("built-in denylist is invalid: {error}"))
        })
}

lazy_static! {
    static ref GO: Denylist = preset([
        (Category::Framework, GO_FRAMEWORK),
        (Category::TestSupport, GO_TEST_SUPPORT),
        (Category::Scheduler, GO_SCHEDULER),
    ]);
    static ref RUST: Denylist = preset([
        (Category::Framework, RUST_FRAMEWORK),
        (Category::TestSupport, RUST_TEST_SUPPORT),
        (Category::Scheduler, RUST_SCHEDULER),
    ]);
}

/// The compiled Go preset, shared instead of cloned.
pub(crate) fn go_preset() -> &'static Denylist {
    &GO
}

impl Denylist {
    /// An empty denylist that lets every frame through.
    pub fn new() -> Self {
        Denylist {
            entries: Vec::new(),
        }
    }

    /// The denylist for Go stack dumps produced by `runtime/debug.Stack`,
    /// hiding the Ginkgo framework, the `testing` package and the Go
    /// runtime.
    pub fn go() -> Self {
        GO.clone()
    }

    /// The denylist for traces rendered by [`stack_trace`](crate::stack_trace)
    /// and [`format_backtrace`](crate::format_backtrace), hiding this crate,
    /// the `backtrace` crate, libtest and the standard library's thread and
    /// panic machinery.
    pub fn rust() -> Self {
        RUST.clone()
    }

    /// Build a denylist from its configuration form.
    pub fn from_patterns(patterns: impl IntoIterator<Item = PatternConfig>) -> Result<Self, Error> {
        patterns
            .into_iter()
            .try_fold(Denylist::new(), |denylist, config| {
                denylist.with(config.category, &config.pattern)
            })
    }

    /// Add a pattern to the end of the denylist.
    pub fn with(mut self, category: Category, pattern: &str) -> Result<Self, Error> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            category,
            pattern: pattern.to_string(),
            source,
        })?;

        self.entries.push(Entry { category, regex });

        Ok(self)
    }

    /// Append every entry of `other`.
    pub fn extend(mut self, other: Denylist) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Keep only the entries in `category`.
    pub fn only(&self, category: Category) -> Self {
        self.filtered(|entry| entry.category == category)
    }

    /// Drop the entries in `category`.
    pub fn without(&self, category: Category) -> Self {
        self.filtered(|entry| entry.category != category)
    }

    fn filtered(&self, f: impl Fn(&Entry) -> bool) -> Self {
        Denylist {
            entries: self.entries.iter().filter(|entry| f(entry)).cloned().collect(),
        }
    }

    /// The category of the first entry matching `line`, if any.
    pub fn matching(&self, line: &str) -> Option<Category> {
        self.entries
            .iter()
            .find(|entry| entry.regex.is_match(line))
            .map(|entry| entry.category)
    }

    /// Whether a frame with this identifier line should be hidden.
    pub fn is_denied(&self, line: &str) -> bool {
        self.matching(line).is_some()
    }

    /// Whether the denylist has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configuration form of this denylist.
    pub fn patterns(&self) -> Vec<PatternConfig> {
        self.entries
            .iter()
            .map(|entry| PatternConfig {
                category: entry.category,
                pattern: entry.regex.as_str().to_string(),
            })
            .collect()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Denylist::go()
    }
}
