//! Edit programs
//!
//!     A program is a named queue of rewrite operations over a token sequence. Several programs
//!     can rewrite the same tokens independently, e.g. one producing a source file and another
//!     its header, and each is rendered on its own.
//!
//! Ordering
//!
//!     Operations are kept sorted by anchor index as they are queued, so rendering is a single
//!     forward merge. Within one anchor:
//!         - inserts come first, most recently queued first ("A" then "B" renders "BA");
//!         - at most one replace or delete follows them, and queuing another one overwrites it.
//!
//! Rollback
//!
//!     Besides the sorted list, a program keeps every operation in the order it was queued.
//!     Rolling back to `n` keeps the first `n` queued operations and rebuilds the sorted list
//!     from them, which restores exactly what those operations produced on their own (a
//!     replace that a later one overwrote comes back).

use crate::rewrite::operation::RewriteOperation;
use std::collections::HashMap;

/// Program used by every operation that does not name one
pub const DEFAULT_PROGRAM_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    /// Sorted by anchor, in render order
    operations: Vec<RewriteOperation>,
    /// Queue order
    journal: Vec<RewriteOperation>,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Program {
            name: name.into(),
            operations: Vec::new(),
            journal: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Live operations in render order.
    pub fn operations(&self) -> &[RewriteOperation] {
        &self.operations
    }

    /// Operations in the order they were queued, including overwritten ones.
    pub fn queued(&self) -> &[RewriteOperation] {
        &self.journal
    }

    /// Number of operations queued so far; the upper bound for [Program::rollback].
    pub fn queued_count(&self) -> usize {
        self.journal.len()
    }

    /// True when rendering this program gives the original text.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Queue an operation, keeping the render order invariants.
    pub fn add(&mut self, operation: RewriteOperation) {
        self.journal.push(operation.clone());
        insert_sorted(&mut self.operations, operation);
    }

    /// Keep only the first `count` queued operations.
    pub fn rollback(&mut self, count: usize) {
        if count >= self.journal.len() {
            return;
        }
        self.journal.truncate(count);
        self.operations.clear();
        for operation in &self.journal {
            insert_sorted(&mut self.operations, operation.clone());
        }
    }

    /// Drop every queued operation.
    pub fn clear(&mut self) {
        self.rollback(0);
    }
}

/// Binary search for the anchor, then settle the position within the run of operations that
/// share it. The search may land anywhere inside such a run.
fn insert_sorted(operations: &mut Vec<RewriteOperation>, operation: RewriteOperation) {
    let index = operation.index();
    let found = match operations.binary_search_by_key(&index, RewriteOperation::index) {
        Ok(found) => found,
        Err(position) => {
            operations.insert(position, operation);
            return;
        }
    };

    let mut run_start = found;
    while run_start > 0 && operations[run_start - 1].index() == index {
        run_start -= 1;
    }

    if !operation.is_replace() {
        operations.insert(run_start, operation);
        return;
    }

    let mut position = run_start;
    while position < operations.len() && operations[position].index() == index {
        if operations[position].is_replace() {
            operations[position] = operation;
            return;
        }
        position += 1;
    }
    operations.insert(position, operation);
}

/// Named programs, created on first use.
#[derive(Debug, Clone, Default)]
pub struct ProgramStore {
    programs: HashMap<String, Program>,
}

impl ProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Program> {
        self.programs.get_mut(name)
    }

    pub fn get_or_create(&mut self, name: &str) -> &mut Program {
        self.programs
            .entry(name.to_string())
            .or_insert_with(|| Program::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    /// Program names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.programs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
