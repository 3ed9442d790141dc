//! syn-backed source model
//!
//! Parses one Rust file and exposes its user-written function definitions
//! with byte-exact parameter spans, so the mutator can swap parameter
//! declarations without disturbing any other byte of the file.

use std::ops::Range;
use std::path::{Path, PathBuf};

use quote::ToTokens;
use syn::visit::Visit;

use crate::error::{MutationError, Result};

/// Opaque, equality-comparable identity of a declared parameter type
///
/// Comparison is purely syntactic over the normalized token rendering of the
/// declared type, so whitespace and formatting never matter but a type alias
/// compares distinct from its underlying type. That is a deliberate policy:
/// without name resolution the declared spelling is the only identity the
/// model can promise, and a swap across an alias boundary still changes the
/// declared signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeIdentity(String);

impl TypeIdentity {
    fn of(ty: &syn::Type) -> Self {
        Self(ty.to_token_stream().to_string())
    }
}

/// One parameter declaration of a candidate function
///
/// `span` is the byte range of the whole declaration in the original source,
/// pattern through type, including any `mut` or attribute tokens. `text` is
/// the exact substring at that span.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    pub ty: TypeIdentity,
    pub span: Range<usize>,
    pub text: String,
}

/// A user-written function definition eligible for mutation
///
/// Parameters are in declaration order and index-addressable. `self`
/// receivers are not parameters for swapping purposes and are not listed.
#[derive(Debug, Clone)]
pub struct FunctionCandidate {
    pub name: String,
    pub params: Vec<ParameterInfo>,
}

/// Parsed view of one translation unit
///
/// Owns the original text and the candidate list; read-only to the selection
/// and rewrite stages.
pub struct SourceModel {
    file: PathBuf,
    source: String,
    candidates: Vec<FunctionCandidate>,
}

impl SourceModel {
    /// Read and parse the file at `file`
    pub fn load(file: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(file).map_err(|e| MutationError::FileRead {
            file: file.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_source(file, source)
    }

    /// Parse already-loaded source text
    pub fn from_source(file: &Path, source: String) -> Result<Self> {
        let ast = syn::parse_file(&source).map_err(|e| MutationError::Parse {
            file: file.to_path_buf(),
            error: e.to_string(),
        })?;
        let candidates = collect_candidates(&ast, &source);
        Ok(Self {
            file: file.to_path_buf(),
            source,
            candidates,
        })
    }

    /// Candidate functions in document order
    pub fn candidates(&self) -> &[FunctionCandidate] {
        &self.candidates
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Collect every function definition in the file, in document order
///
/// Free functions and impl methods both carry a body in syn, so everything
/// collected here is a definition; trait method declarations without a body
/// are never visited. syn parses exactly the one file it is given and never
/// synthesizes implicit declarations, so no extra filtering is needed.
pub fn collect_candidates(ast: &syn::File, source: &str) -> Vec<FunctionCandidate> {
    let mut collector = CandidateCollector {
        source,
        candidates: Vec::new(),
    };
    collector.visit_file(ast);
    collector.candidates
}

struct CandidateCollector<'a> {
    source: &'a str,
    candidates: Vec<FunctionCandidate>,
}

impl<'ast> Visit<'ast> for CandidateCollector<'_> {
    fn visit_item_fn(&mut self, func: &'ast syn::ItemFn) {
        self.push(&func.sig);
        // Recurse for functions nested inside the body
        syn::visit::visit_item_fn(self, func);
    }

    fn visit_impl_item_fn(&mut self, func: &'ast syn::ImplItemFn) {
        self.push(&func.sig);
        syn::visit::visit_impl_item_fn(self, func);
    }
}

impl CandidateCollector<'_> {
    fn push(&mut self, sig: &syn::Signature) {
        let params: Option<Vec<ParameterInfo>> = sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                syn::FnArg::Typed(param) => Some(param),
                syn::FnArg::Receiver(_) => None,
            })
            .map(|param| self.parameter(param))
            .collect();

        // A parameter whose span cannot be mapped back to the source text
        // would make index-based swapping unsound; drop the whole function.
        if let Some(params) = params {
            self.candidates.push(FunctionCandidate {
                name: sig.ident.to_string(),
                params,
            });
        }
    }

    fn parameter(&self, param: &syn::PatType) -> Option<ParameterInfo> {
        let span = token_byte_range(param)?;
        let text = self.source.get(span.clone())?.to_string();
        Some(ParameterInfo {
            ty: TypeIdentity::of(&param.ty),
            span,
            text,
        })
    }
}

/// Byte range covered by a node's tokens in the original source
fn token_byte_range<T: ToTokens>(node: &T) -> Option<Range<usize>> {
    let mut tokens = node.to_token_stream().into_iter();
    let first = tokens.next()?.span().byte_range();
    let last = tokens
        .last()
        .map_or_else(|| first.clone(), |token| token.span().byte_range());
    Some(first.start..last.end)
}
