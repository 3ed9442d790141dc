//! Atomic source rewriting
//!
//! Builds the two-way parameter swap as a replacement set, applies it to an
//! in-memory copy of the file text, and overwrites the target file in a
//! single write. Either both edits land or the file is untouched.

use std::ops::Range;
use std::path::Path;

use crate::error::{MutationError, Result};
use crate::model::SourceModel;
use crate::selector::CandidatePair;

/// One pending text edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Range<usize>,
    pub text: String,
}

/// A group of non-overlapping edits applied together or not at all
#[derive(Debug, Default)]
pub struct ReplacementSet {
    replacements: Vec<Replacement>,
}

impl ReplacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an edit, rejecting any overlap with an already-registered one
    ///
    /// Distinct parameters occupy disjoint spans, so a conflict here should
    /// be unreachable; it is still checked because silently misapplying
    /// overlapping edits would corrupt the source.
    pub fn add(&mut self, replacement: Replacement) -> Result<()> {
        for existing in &self.replacements {
            if overlaps(&existing.span, &replacement.span) {
                return Err(MutationError::ReplacementConflict {
                    incoming: replacement.span,
                    existing: existing.span.clone(),
                });
            }
        }
        self.replacements.push(replacement);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Apply every edit to `source`, returning the new text
    ///
    /// Edits are applied in ascending span order against the original
    /// offsets, so registration order does not matter.
    pub fn apply(&self, source: &str) -> String {
        let mut edits: Vec<&Replacement> = self.replacements.iter().collect();
        edits.sort_by_key(|r| r.span.start);

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for edit in edits {
            out.push_str(&source[cursor..edit.span.start]);
            out.push_str(&edit.text);
            cursor = edit.span.end;
        }
        out.push_str(&source[cursor..]);
        out
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Build the two-way swap for a selected pair
pub fn swap_replacements(model: &SourceModel, pair: &CandidatePair) -> Result<ReplacementSet> {
    let function = &model.candidates()[pair.function];
    let first = &function.params[pair.first];
    let second = &function.params[pair.second];

    let mut set = ReplacementSet::new();
    set.add(Replacement {
        span: first.span.clone(),
        text: second.text.clone(),
    })?;
    set.add(Replacement {
        span: second.span.clone(),
        text: first.text.clone(),
    })?;
    Ok(set)
}

/// Apply the swap and overwrite the target file
///
/// The complete mutated content is buffered before the single write call, so
/// a failed write never leaves a half-applied mutation written by this path.
pub fn commit_mutation(model: &SourceModel, pair: &CandidatePair) -> Result<()> {
    let set = swap_replacements(model, pair)?;
    let mutated = set.apply(model.source());
    persist(model.file(), &mutated)
}

fn persist(file: &Path, content: &str) -> Result<()> {
    std::fs::write(file, content).map_err(|e| MutationError::Persist {
        file: file.to_path_buf(),
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn model(source: &str) -> SourceModel {
        SourceModel::from_source(Path::new("test.rs"), source.to_string()).unwrap()
    }

    fn pair(function: usize, first: usize, second: usize) -> CandidatePair {
        CandidatePair {
            function,
            first,
            second,
        }
    }

    #[test]
    fn test_swap_exchanges_full_parameter_texts() {
        let model = model("fn f(a: i32, b: f64) -> f64 { b }\n");

        let set = swap_replacements(&model, &pair(0, 0, 1)).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.apply(model.source()),
            "fn f(b: f64, a: i32) -> f64 { b }\n"
        );
    }

    #[test]
    fn test_bytes_outside_the_spans_are_untouched() {
        let source = "// header comment\nfn f(a: i32,   b: f64) {}\nfn tail() {}\n";
        let model = model(source);

        let mutated = swap_replacements(&model, &pair(0, 0, 1))
            .unwrap()
            .apply(model.source());
        assert_eq!(
            mutated,
            "// header comment\nfn f(b: f64,   a: i32) {}\nfn tail() {}\n"
        );
    }

    #[test]
    fn test_swap_is_symmetric_in_index_order() {
        let model = model("fn f(a: i32, b: f64) {}\n");

        let forward = swap_replacements(&model, &pair(0, 0, 1))
            .unwrap()
            .apply(model.source());
        let backward = swap_replacements(&model, &pair(0, 1, 0))
            .unwrap()
            .apply(model.source());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_double_application_restores_the_original() {
        let source = "fn f(a: i32, b: f64) {}\n";
        let first_pass = {
            let model = model(source);
            swap_replacements(&model, &pair(0, 0, 1))
                .unwrap()
                .apply(model.source())
        };

        // The mutated file has exactly one valid pair; swapping again
        // inverts the first swap.
        let second_pass = {
            let model = model(&first_pass);
            swap_replacements(&model, &pair(0, 0, 1))
                .unwrap()
                .apply(model.source())
        };
        assert_eq!(second_pass, source);
    }

    #[test]
    fn test_overlapping_edit_is_rejected() {
        let mut set = ReplacementSet::new();
        set.add(Replacement {
            span: 5..12,
            text: "x".to_string(),
        })
        .unwrap();

        let result = set.add(Replacement {
            span: 10..20,
            text: "y".to_string(),
        });
        assert!(matches!(
            result,
            Err(MutationError::ReplacementConflict { .. })
        ));
        // The failed add leaves the set unchanged.
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_adjacent_edits_do_not_conflict() {
        let mut set = ReplacementSet::new();
        set.add(Replacement {
            span: 0..5,
            text: "a".to_string(),
        })
        .unwrap();
        set.add(Replacement {
            span: 5..10,
            text: "b".to_string(),
        })
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_commit_overwrites_the_target_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("victim.rs");
        std::fs::write(&path, "fn f(a: i32, b: f64) {}\n").unwrap();

        let model = SourceModel::load(&path).unwrap();
        commit_mutation(&model, &pair(0, 0, 1)).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "fn f(b: f64, a: i32) {}\n"
        );
    }

    #[test]
    fn test_exactly_one_function_mutated_per_run() {
        use crate::selector::select_candidate;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let source = "fn f(a: i32, b: f64) {}\nfn h(x: u8, y: String) {}\n";
        let originals = ["fn f(a: i32, b: f64) {}", "fn h(x: u8, y: String) {}"];

        for seed in 0..20 {
            let model = model(source);
            let mut rng = StdRng::seed_from_u64(seed);
            let pair = select_candidate(model.candidates(), &mut rng).unwrap();
            let mutated = swap_replacements(&model, &pair)
                .unwrap()
                .apply(model.source());

            let untouched = originals
                .iter()
                .filter(|line| mutated.contains(*line))
                .count();
            assert_eq!(untouched, 1, "exactly one function changes:\n{mutated}");
        }
    }

    #[test]
    fn test_no_candidates_leaves_the_file_untouched() {
        use crate::selector::select_candidate;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("victim.rs");
        let source = "fn g(a: i32, b: i32) {}\n";
        std::fs::write(&path, source).unwrap();

        let model = SourceModel::load(&path).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_candidate(model.candidates(), &mut rng).is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), source);
    }

    #[test]
    fn test_mutating_a_method_keeps_the_receiver() {
        let model = model(
            "struct S;\n\
             impl S {\n\
                 fn m(&self, a: i32, b: f64) {}\n\
             }\n",
        );

        let mutated = swap_replacements(&model, &pair(0, 0, 1))
            .unwrap()
            .apply(model.source());
        assert!(mutated.contains("fn m(&self, b: f64, a: i32)"));
    }
}
