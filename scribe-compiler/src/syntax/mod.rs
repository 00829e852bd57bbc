//! Source analysis for the built-in backend: tokenizer, declaration parser
//! and the symbols it produces.

mod ast;
mod lexer;
mod parser;
mod text;

pub use ast::{MemberKind, MemberSymbol, SyntaxTree, TypeKind, TypeSymbol};
pub use lexer::{Span, Token, TokenKind, tokenize};
pub use parser::{ParseOptions, parse};
pub use text::SourceText;
