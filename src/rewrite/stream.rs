//! Lazy token rewriting
//!
//!     [TokenRewriteStream] sits on top of a token sequence and lets callers insert, replace
//!     and delete text around tokens. The edits are only queued; the tokens are never touched.
//!     Asking for a rendering merges the tokens with one program's queue in a single pass.
//!
//!     Because nothing is applied eagerly, an insert at token `i` does not shift the indices of
//!     tokens `i + 1..`, the original text is always available, and undoing edits is a matter of
//!     dropping queued operations (see [TokenRewriteStream::rollback]).
//!
//! Programs
//!
//!     Every method has a `_in` variant taking a program name. The plain variants use
//!     [DEFAULT_PROGRAM_NAME]. Programs are independent of each other: rendering, rolling back
//!     or deleting one never affects another.
//!
//! Windows
//!
//!     `render_range(start, end)` renders tokens `start..end`; the token at `end` is left out
//!     while operations anchored at `end` still run. `render_original_range(start, end)` on
//!     the other hand is inclusive of `end`.

use crate::rewrite::operation::RewriteOperation;
use crate::rewrite::program::{Program, ProgramStore, DEFAULT_PROGRAM_NAME};
use crate::rewrite::token::{TokenPosition, TokenSource};

/// A token sequence plus named programs of queued edits over it.
#[derive(Debug, Clone)]
pub struct TokenRewriteStream<S> {
    source: S,
    programs: ProgramStore,
}

impl<S: TokenSource> TokenRewriteStream<S> {
    pub fn new(source: S) -> Self {
        let mut programs = ProgramStore::new();
        programs.get_or_create(DEFAULT_PROGRAM_NAME);
        TokenRewriteStream { source, programs }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub fn token_count(&self) -> usize {
        self.source.token_count()
    }

    pub fn programs(&self) -> &ProgramStore {
        &self.programs
    }

    pub fn program(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    // ----- Queuing -----

    pub fn insert_before(&mut self, position: impl TokenPosition, text: impl Into<String>) {
        self.insert_before_in(DEFAULT_PROGRAM_NAME, position, text);
    }

    pub fn insert_before_in(
        &mut self,
        program: &str,
        position: impl TokenPosition,
        text: impl Into<String>,
    ) {
        let operation = RewriteOperation::insert_before(position.token_index(), text);
        self.queue(program, operation);
    }

    pub fn insert_after(&mut self, position: impl TokenPosition, text: impl Into<String>) {
        self.insert_after_in(DEFAULT_PROGRAM_NAME, position, text);
    }

    /// Insert before the next token, even when `position` is the last one.
    pub fn insert_after_in(
        &mut self,
        program: &str,
        position: impl TokenPosition,
        text: impl Into<String>,
    ) {
        let next = position.token_index().saturating_add(1);
        self.insert_before_in(program, next, text);
    }

    /// Replace the single token at `position`.
    pub fn replace_at(&mut self, position: impl TokenPosition, text: impl Into<String>) {
        let index = position.token_index();
        self.replace_in(DEFAULT_PROGRAM_NAME, index, index, text);
    }

    pub fn replace(
        &mut self,
        from: impl TokenPosition,
        to: impl TokenPosition,
        text: impl Into<String>,
    ) {
        self.replace_in(DEFAULT_PROGRAM_NAME, from, to, text);
    }

    /// Replace tokens `from..=to` with `text`.
    ///
    /// Queued as one deletion per token in `from..to` plus a replace at `to` carrying the
    /// text, so the replacement shows up where token `to` was. Overlapping ranges are not
    /// merged; they simply queue more per-token operations.
    pub fn replace_in(
        &mut self,
        program: &str,
        from: impl TokenPosition,
        to: impl TokenPosition,
        text: impl Into<String>,
    ) {
        self.queue_range(program, from.token_index(), to.token_index(), Some(text.into()));
    }

    pub fn delete_at(&mut self, position: impl TokenPosition) {
        let index = position.token_index();
        self.delete_in(DEFAULT_PROGRAM_NAME, index, index);
    }

    pub fn delete(&mut self, from: impl TokenPosition, to: impl TokenPosition) {
        self.delete_in(DEFAULT_PROGRAM_NAME, from, to);
    }

    /// Delete tokens `from..=to`; a replace without text.
    pub fn delete_in(&mut self, program: &str, from: impl TokenPosition, to: impl TokenPosition) {
        self.queue_range(program, from.token_index(), to.token_index(), None);
    }

    fn queue_range(&mut self, program: &str, from: usize, to: usize, text: Option<String>) {
        for index in from..to {
            self.queue(program, RewriteOperation::delete(index, index));
        }
        let last = match text {
            Some(text) => RewriteOperation::replace(to, to, text),
            None => RewriteOperation::delete(to, to),
        };
        self.queue(program, last);
    }

    fn queue(&mut self, program: &str, operation: RewriteOperation) {
        tracing::trace!(program, %operation, "queue rewrite");
        self.programs.get_or_create(program).add(operation);
    }

    // ----- Rollback -----

    pub fn rollback(&mut self, count: usize) {
        self.rollback_in(DEFAULT_PROGRAM_NAME, count);
    }

    /// Keep only the first `count` operations queued on `program`. Unknown programs are ignored.
    pub fn rollback_in(&mut self, program: &str, count: usize) {
        if let Some(queue) = self.programs.get_mut(program) {
            tracing::debug!(
                program,
                from = queue.queued_count(),
                to = count,
                "rollback"
            );
            queue.rollback(count);
        }
    }

    pub fn delete_program(&mut self) {
        self.delete_program_in(DEFAULT_PROGRAM_NAME);
    }

    /// Drop every operation queued on `program`.
    pub fn delete_program_in(&mut self, program: &str) {
        self.rollback_in(program, 0);
    }

    // ----- Rendering -----

    /// Default program over all tokens.
    pub fn render(&self) -> String {
        self.render_program_range(DEFAULT_PROGRAM_NAME, 0, self.token_count())
    }

    pub fn render_program(&self, program: &str) -> String {
        self.render_program_range(program, 0, self.token_count())
    }

    pub fn render_range(&self, start: usize, end: usize) -> String {
        self.render_program_range(DEFAULT_PROGRAM_NAME, start, end)
    }

    /// Merge tokens `start..end` with the operations queued on `program`.
    ///
    /// Operations anchored at or past the window's end that are never reached by the token
    /// cursor run after the pass, in order; these are typically inserts after the last token.
    pub fn render_program_range(&self, program: &str, start: usize, end: usize) -> String {
        let operations = match self.programs.get(program) {
            Some(queue) if !queue.is_empty() => queue.operations(),
            _ => return self.concat(start, end),
        };
        tracing::debug!(
            program,
            start,
            end,
            operations = operations.len(),
            "render"
        );

        let len = self.token_count();
        let mut out = String::new();
        // Operations anchored before the window never get a chance to run
        let mut next_op = operations.partition_point(|op| op.index() < start);
        let mut cursor = start;

        while cursor <= end && cursor < len {
            while let Some(operation) = operations.get(next_op) {
                if operation.index() != cursor {
                    break;
                }
                cursor = operation.execute(&mut out);
                next_op += 1;
            }
            if cursor >= end || cursor >= len {
                break;
            }
            if let Some(text) = self.source.token_text(cursor) {
                out.push_str(text);
            }
            cursor += 1;
        }

        for operation in &operations[next_op..] {
            operation.execute(&mut out);
        }

        out
    }

    /// All tokens, ignoring every program.
    pub fn render_original(&self) -> String {
        self.concat(0, self.token_count())
    }

    /// Tokens `start..=end`, ignoring every program.
    pub fn render_original_range(&self, start: usize, end: usize) -> String {
        self.concat(start, end.saturating_add(1))
    }

    fn concat(&self, start: usize, end: usize) -> String {
        let end = end.min(self.token_count());
        (start..end)
            .filter_map(|index| self.source.token_text(index))
            .collect()
    }
}
