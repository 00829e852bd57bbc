//! Declaration-level parser.
//!
//! Recognizes usings, namespaces, type declarations and member signatures.
//! Member and accessor bodies are checked for balanced delimiters and
//! statement terminators, and scanned for unused locals, but not parsed
//! further.

use super::{
    ast::{MemberKind, MemberSymbol, SyntaxTree, TypeKind, TypeSymbol},
    lexer::{Token, TokenKind, tokenize},
    text::SourceText,
};
use crate::{
    diagnostic::{Diagnostic, codes},
    options::LanguageVersion,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub language_version: LanguageVersion,
}

/// Parse one source fragment. `index` identifies the fragment in
/// diagnostic locations.
pub fn parse(text: impl Into<String>, index: usize, options: ParseOptions) -> SyntaxTree {
    let source = SourceText::new(text, index);
    let (tokens, mut diagnostics) = tokenize(&source);

    let mut parser = Parser {
        source: &source,
        tokens,
        pos: 0,
        version: options.language_version,
        diagnostics: Vec::new(),
        usings: Vec::new(),
        types: Vec::new(),
        file_namespace: None,
    };
    parser.compilation_unit();

    let Parser {
        diagnostics: parsed,
        usings,
        types,
        ..
    } = parser;
    diagnostics.extend(parsed);
    diagnostics.sort_by_key(|d| d.location.map(|l| l.offset));

    SyntaxTree {
        source,
        usings,
        types,
        diagnostics,
    }
}

const MODIFIER_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "abstract", "sealed", "virtual",
    "override", "readonly", "extern", "unsafe", "new", "const", "volatile", "ref",
];

const MODIFIER_WORDS: &[&str] = &["partial", "async", "required", "file"];

const BUILTIN_TYPES: &[&str] = &[
    "bool", "byte", "char", "decimal", "double", "float", "int", "long", "object", "sbyte",
    "short", "string", "uint", "ulong", "ushort", "void",
];

/// Keywords whose parenthesized header is followed by a statement block.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "while", "for", "foreach", "using", "lock", "fixed", "switch", "catch",
];

/// Keywords directly followed by a statement block.
const ACCESSOR_WORDS: &[&str] = &["get", "set", "init", "add", "remove"];

const BLOCK_KEYWORDS: &[&str] = &[
    "else", "try", "finally", "do", "checked", "unchecked", "unsafe", "catch",
];

struct Parser<'a> {
    source: &'a SourceText,
    tokens: Vec<Token>,
    pos: usize,
    version: LanguageVersion,
    diagnostics: Vec<Diagnostic>,
    usings: Vec<String>,
    types: Vec<TypeSymbol>,
    file_namespace: Option<String>,
}

impl Parser<'_> {
    // Token cursor

    fn peek(&self) -> &Token {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn at_punct(&self, p: &str) -> bool {
        self.peek().is_punct(p)
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.at_punct(p) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn identifier(&mut self) -> Option<Token> {
        (self.peek().kind == TokenKind::Identifier).then(|| self.bump())
    }

    // Diagnostics

    fn push(&mut self, diagnostic: Diagnostic, offset: usize, length: usize) {
        let location = self.source.location(offset, length);
        self.diagnostics.push(diagnostic.at(location));
    }

    fn error_at_current(&mut self, id: &'static str, message: impl Into<String>) {
        let span = self.peek().span;
        self.push(Diagnostic::error(id, message), span.start, span.len());
    }

    /// Report a missing token just after the previous one.
    fn error_expected(&mut self, id: &'static str, message: impl Into<String>) {
        let offset = match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span.end,
            None => self.peek().span.start,
        };
        self.push(Diagnostic::error(id, message), offset, 0);
    }

    fn expect_semicolon(&mut self) {
        if !self.eat_punct(";") {
            self.error_expected(codes::SEMICOLON_EXPECTED, "; expected");
        }
    }

    fn require(&mut self, feature: &str, min: LanguageVersion, offset: usize) {
        if self.version < min {
            let message = format!(
                "Feature '{feature}' is not available in C# {}. Please use language version {} or greater.",
                self.version.as_str(),
                min.as_str()
            );
            self.push(
                Diagnostic::error(codes::FEATURE_UNAVAILABLE, message),
                offset,
                0,
            );
        }
    }

    // Compilation unit and namespaces

    fn compilation_unit(&mut self) {
        let mut seen_member = false;
        loop {
            let start = self.pos;
            if self.at_eof() {
                break;
            }
            if self.at_using_directive() {
                if seen_member {
                    self.using_out_of_order();
                }
                self.using_directive();
            } else if self.peek().is_keyword("extern") && self.nth(1).is_word("alias") {
                self.skip_member();
            } else if self.peek().is_keyword("namespace") {
                self.namespace_declaration(None, seen_member, true);
                seen_member = true;
            } else if self.at_punct("}") {
                self.error_at_current(
                    codes::TYPE_OR_NAMESPACE_EXPECTED,
                    "Type or namespace definition, or end-of-file expected",
                );
                self.bump();
            } else {
                let namespace = self.file_namespace.clone();
                self.namespace_member(namespace.as_deref());
                seen_member = true;
            }
            if self.pos == start {
                self.bump();
            }
        }
    }

    fn at_using_directive(&self) -> bool {
        (self.peek().is_keyword("using") && !self.nth(1).is_punct("("))
            || (self.peek().is_word("global") && self.nth(1).is_keyword("using"))
    }

    fn using_out_of_order(&mut self) {
        self.error_at_current(
            codes::USING_AFTER_MEMBERS,
            "A using clause must precede all other elements defined in the namespace except extern alias declarations",
        );
    }

    fn using_directive(&mut self) {
        let start = self.peek().span.start;
        if self.peek().is_word("global") {
            self.bump();
            self.require("global using directive", LanguageVersion::CSharp10, start);
        }
        self.bump();
        if self.peek().is_keyword("static") {
            self.bump();
        }
        if self.peek().kind == TokenKind::Identifier && self.nth(1).is_punct("=") {
            self.bump();
            self.bump();
        }

        let mut name = String::new();
        loop {
            let token = self.peek();
            let ends = match token.kind {
                TokenKind::Eof => true,
                TokenKind::Punct => matches!(token.text.as_str(), ";" | "{" | "}"),
                TokenKind::Keyword => !BUILTIN_TYPES.contains(&token.text.as_str()),
                _ => false,
            };
            if ends {
                break;
            }
            name.push_str(&self.bump().text);
        }

        if name.is_empty() {
            self.error_expected(codes::IDENTIFIER_EXPECTED, "Identifier expected");
        } else {
            self.usings.push(name);
        }
        self.expect_semicolon();
    }

    fn qualified_name(&mut self) -> Option<String> {
        let mut name = self.identifier()?.text;
        while (self.at_punct(".") || self.at_punct("::"))
            && self.nth(1).kind == TokenKind::Identifier
        {
            name.push_str(&self.bump().text);
            name.push_str(&self.bump().text);
        }
        Some(name)
    }

    fn namespace_declaration(&mut self, parent: Option<&str>, seen_member: bool, top_level: bool) {
        let keyword = self.bump();
        let name = match self.qualified_name() {
            Some(name) => name,
            None => {
                self.error_expected(codes::IDENTIFIER_EXPECTED, "Identifier expected");
                String::new()
            }
        };
        let full = match parent {
            Some(p) if !name.is_empty() => format!("{p}.{name}"),
            Some(p) => p.to_string(),
            None => name,
        };

        if self.eat_punct(";") {
            let offset = keyword.span.start;
            self.require("file-scoped namespace", LanguageVersion::CSharp10, offset);
            if !top_level || self.file_namespace.is_some() {
                self.push(
                    Diagnostic::error(
                        codes::FILE_SCOPED_NAMESPACE,
                        "Source file can only contain one file-scoped namespace declaration",
                    ),
                    offset,
                    keyword.span.len(),
                );
            } else if seen_member {
                self.push(
                    Diagnostic::error(
                        codes::FILE_SCOPED_NAMESPACE_ORDER,
                        "File-scoped namespace must precede all other members in a file",
                    ),
                    offset,
                    keyword.span.len(),
                );
            }
            self.file_namespace = Some(full);
            return;
        }

        if !self.eat_punct("{") {
            self.error_expected(codes::OPEN_BRACE_EXPECTED, "{ expected");
            return;
        }

        let mut seen = false;
        loop {
            let start = self.pos;
            if self.eat_punct("}") {
                self.eat_punct(";");
                return;
            }
            if self.at_eof() {
                self.error_expected(codes::CLOSE_BRACE_EXPECTED, "} expected");
                return;
            }
            if self.at_using_directive() {
                if seen {
                    self.using_out_of_order();
                }
                self.using_directive();
            } else if self.peek().is_keyword("namespace") {
                self.namespace_declaration(Some(&full), seen, false);
                seen = true;
            } else {
                self.namespace_member(Some(&full));
                seen = true;
            }
            if self.pos == start {
                self.bump();
            }
        }
    }

    fn namespace_member(&mut self, namespace: Option<&str>) {
        self.attributes();
        if self.at_eof() || self.at_punct("}") || self.peek().is_keyword("namespace") {
            return;
        }
        let modifiers = self.modifiers();
        if self.at_type_keyword() {
            let symbol = self.type_declaration(namespace, &modifiers);
            self.types.push(symbol);
        } else if self.peek().is_keyword("delegate") {
            if let Some(symbol) = self.delegate_declaration(namespace) {
                self.types.push(symbol);
            }
        } else {
            self.error_at_current(
                codes::NAMESPACE_MEMBER,
                "A namespace cannot directly contain members such as fields, methods or statements",
            );
            self.skip_member();
        }
    }

    // Declarations

    fn attributes(&mut self) {
        while self.at_punct("[") {
            if !self.skip_balanced() {
                return;
            }
        }
    }

    fn modifiers(&mut self) -> Vec<String> {
        let mut modifiers = Vec::new();
        loop {
            let token = self.peek();
            let is_modifier = match token.kind {
                TokenKind::Keyword => MODIFIER_KEYWORDS.contains(&token.text.as_str()),
                TokenKind::Identifier => {
                    MODIFIER_WORDS.contains(&token.text.as_str())
                        && matches!(
                            self.nth(1).kind,
                            TokenKind::Identifier | TokenKind::Keyword
                        )
                }
                _ => false,
            };
            if !is_modifier {
                return modifiers;
            }
            let token = self.bump();
            match token.text.as_str() {
                "required" => self.require("required members", LanguageVersion::CSharp11, token.span.start),
                "file" => self.require("file types", LanguageVersion::CSharp11, token.span.start),
                _ => {}
            }
            modifiers.push(token.text);
        }
    }

    fn at_type_keyword(&self) -> bool {
        let token = self.peek();
        if token.kind == TokenKind::Keyword {
            return matches!(token.text.as_str(), "class" | "struct" | "interface" | "enum");
        }
        token.is_word("record") && {
            let next = self.nth(1);
            next.kind == TokenKind::Identifier || next.is_keyword("class") || next.is_keyword("struct")
        }
    }

    fn type_declaration(&mut self, namespace: Option<&str>, modifiers: &[String]) -> TypeSymbol {
        let keyword = self.bump();
        let kind = match keyword.text.as_str() {
            "class" => TypeKind::Class,
            "struct" => TypeKind::Struct,
            "interface" => TypeKind::Interface,
            "enum" => TypeKind::Enum,
            _ if self.peek().is_keyword("struct") => {
                self.bump();
                self.require("record structs", LanguageVersion::CSharp10, keyword.span.start);
                TypeKind::RecordStruct
            }
            _ => {
                if self.peek().is_keyword("class") {
                    self.bump();
                }
                self.require("records", LanguageVersion::CSharp9, keyword.span.start);
                TypeKind::Record
            }
        };

        let (name, offset) = match self.identifier() {
            Some(token) => (token.text, token.span.start),
            None => {
                self.error_expected(codes::IDENTIFIER_EXPECTED, "Identifier expected");
                (String::new(), keyword.span.end)
            }
        };
        let arity = if self.at_punct("<") {
            self.type_parameters()
        } else {
            0
        };

        let mut symbol = TypeSymbol {
            namespace: namespace.map(str::to_string),
            name,
            arity,
            kind,
            partial: modifiers.iter().any(|m| m == "partial"),
            members: Vec::new(),
            nested: Vec::new(),
            offset,
        };

        if self.at_punct("(") {
            if matches!(kind, TypeKind::Class | TypeKind::Struct) {
                self.require("primary constructors", LanguageVersion::CSharp12, offset);
            }
            self.skip_balanced();
        }
        if self.at_punct(":") || self.peek().is_word("where") {
            self.skip_until_body();
        }

        if self.eat_punct("{") {
            if kind == TypeKind::Enum {
                self.enum_members(&mut symbol);
            } else {
                self.member_list(&mut symbol);
            }
            if !self.eat_punct("}") {
                self.error_expected(codes::CLOSE_BRACE_EXPECTED, "} expected");
            }
            self.eat_punct(";");
        } else if kind != TypeKind::Enum && self.eat_punct(";") {
            if matches!(kind, TypeKind::Class | TypeKind::Struct | TypeKind::Interface) {
                self.require(
                    "type declarations without a body",
                    LanguageVersion::CSharp12,
                    offset,
                );
            }
        } else {
            self.error_expected(codes::OPEN_BRACE_EXPECTED, "{ expected");
        }

        symbol
    }

    fn delegate_declaration(&mut self, namespace: Option<&str>) -> Option<TypeSymbol> {
        self.bump();
        if !self.parse_type() {
            self.error_at_current(codes::IDENTIFIER_EXPECTED, "Identifier expected");
            self.skip_member();
            return None;
        }
        let Some(name) = self.identifier() else {
            self.error_expected(codes::IDENTIFIER_EXPECTED, "Identifier expected");
            self.skip_member();
            return None;
        };
        let arity = if self.at_punct("<") {
            self.type_parameters()
        } else {
            0
        };
        if self.at_punct("(") {
            self.skip_balanced();
        } else {
            self.error_expected(codes::SYNTAX_ERROR, "Syntax error, '(' expected");
        }
        if self.peek().is_word("where") {
            self.skip_until_body();
        }
        self.expect_semicolon();

        Some(TypeSymbol {
            namespace: namespace.map(str::to_string),
            name: name.text,
            arity,
            kind: TypeKind::Delegate,
            partial: false,
            members: Vec::new(),
            nested: Vec::new(),
            offset: name.span.start,
        })
    }

    /// `<T, U>`, returning the number of parameters.
    fn type_parameters(&mut self) -> usize {
        self.bump();
        let mut arity = 1;
        let mut depth = 1;
        loop {
            let token = self.peek();
            if token.kind == TokenKind::Eof
                || ["{", "}", ";", "(", "=>"].iter().any(|p| token.is_punct(p))
            {
                self.error_expected(codes::SYNTAX_ERROR, "Syntax error, '>' expected");
                return arity;
            }
            if token.is_punct("<") {
                depth += 1;
            } else if token.is_punct(">") {
                depth -= 1;
                if depth == 0 {
                    self.bump();
                    return arity;
                }
            } else if token.is_punct(",") && depth == 1 {
                arity += 1;
            }
            self.bump();
        }
    }

    fn member_list(&mut self, parent: &mut TypeSymbol) {
        loop {
            if self.at_punct("}") || self.at_eof() {
                return;
            }
            let start = self.pos;
            self.member(parent);
            if self.pos == start {
                let text = self.peek().text.clone();
                self.error_at_current(
                    codes::INVALID_MEMBER_TOKEN,
                    format!("Invalid token '{text}' in class, record, struct, or interface member declaration"),
                );
                self.bump();
            }
        }
    }

    fn enum_members(&mut self, parent: &mut TypeSymbol) {
        loop {
            if self.at_punct("}") || self.at_eof() {
                return;
            }
            let start = self.pos;
            self.attributes();
            match self.identifier() {
                Some(token) => parent.members.push(MemberSymbol {
                    kind: MemberKind::EnumMember,
                    name: token.text,
                    is_static: true,
                }),
                None => {
                    self.error_at_current(codes::IDENTIFIER_EXPECTED, "Identifier expected");
                    self.skip_expression(&[","]);
                }
            }
            if self.eat_punct("=") {
                self.skip_expression(&[","]);
            }
            if !self.eat_punct(",") {
                if self.pos == start {
                    self.bump();
                }
                if !self.at_punct("}") && !self.at_eof() {
                    continue;
                }
                return;
            }
        }
    }

    fn member(&mut self, parent: &mut TypeSymbol) {
        self.attributes();
        let modifiers = self.modifiers();
        let is_static = modifiers.iter().any(|m| m == "static" || m == "const");
        let member = |kind, name: String| MemberSymbol {
            kind,
            name,
            is_static,
        };

        let token = self.peek().clone();
        if token.is_punct("}") || token.kind == TokenKind::Eof {
            return;
        }
        if self.at_type_keyword() {
            let nested = self.type_declaration(None, &modifiers);
            parent.nested.push(nested);
            return;
        }
        if token.is_keyword("delegate") {
            if let Some(nested) = self.delegate_declaration(None) {
                parent.nested.push(nested);
            }
            return;
        }
        if token.is_punct("~") {
            self.bump();
            self.identifier();
            if self.at_punct("(") {
                self.skip_balanced();
            }
            self.body();
            parent
                .members
                .push(member(MemberKind::Destructor, "Finalize".to_string()));
            return;
        }
        if token.is_keyword("event") {
            self.bump();
            self.parse_type();
            let name = self.member_name();
            if self.at_punct("{") {
                self.skip_balanced();
            } else {
                self.skip_expression(&[";"]);
                self.expect_semicolon();
            }
            if let Some(name) = name {
                parent.members.push(member(MemberKind::Event, name));
            }
            return;
        }
        if token.kind == TokenKind::Identifier
            && token.text == parent.name
            && self.nth(1).is_punct("(")
        {
            self.bump();
            self.skip_balanced();
            if self.eat_punct(":") {
                if self.peek().is_keyword("base") || self.peek().is_keyword("this") {
                    self.bump();
                }
                if self.at_punct("(") {
                    self.skip_balanced();
                } else {
                    self.error_expected(codes::SYNTAX_ERROR, "Syntax error, '(' expected");
                }
            }
            self.body();
            parent
                .members
                .push(member(MemberKind::Constructor, ".ctor".to_string()));
            return;
        }
        if token.is_keyword("implicit") || token.is_keyword("explicit") {
            self.bump();
            if self.peek().is_keyword("operator") {
                self.bump();
            }
            self.parse_type();
            if self.at_punct("(") {
                self.skip_balanced();
            }
            self.body();
            let name = format!("op_{}", if token.text == "implicit" { "Implicit" } else { "Explicit" });
            parent.members.push(member(MemberKind::Operator, name));
            return;
        }

        if !self.parse_type() {
            self.error_at_current(
                codes::INVALID_MEMBER_TOKEN,
                format!("Invalid token '{}' in class, record, struct, or interface member declaration", token.text),
            );
            self.skip_member();
            return;
        }

        if self.peek().is_keyword("operator") {
            self.bump();
            while !self.at_punct("(") && !self.at_punct("{") && !self.at_punct(";") && !self.at_eof() {
                self.bump();
            }
            if self.at_punct("(") {
                self.skip_balanced();
            }
            self.body();
            parent
                .members
                .push(member(MemberKind::Operator, "operator".to_string()));
            return;
        }
        if self.peek().is_keyword("this") && self.nth(1).is_punct("[") {
            self.bump();
            self.skip_balanced();
            self.accessors();
            parent
                .members
                .push(member(MemberKind::Indexer, "this[]".to_string()));
            return;
        }
        if self.at_punct("(") {
            self.error_expected(codes::METHOD_RETURN_TYPE, "Method must have a return type");
            self.skip_balanced();
            self.body();
            return;
        }

        let Some(name) = self.member_name() else {
            self.error_expected(codes::IDENTIFIER_EXPECTED, "Identifier expected");
            self.skip_member();
            return;
        };

        if self.at_punct("<") || self.at_punct("(") {
            if self.at_punct("<") {
                self.type_parameters();
            }
            parent.members.push(member(MemberKind::Method, name));
            if self.at_punct("(") {
                if !self.skip_balanced() {
                    return;
                }
            } else {
                self.error_expected(codes::SYNTAX_ERROR, "Syntax error, '(' expected");
            }
            if self.peek().is_word("where") {
                self.skip_until_body();
            }
            self.body();
        } else if self.at_punct("{") || self.at_punct("=>") {
            self.accessors();
            parent.members.push(member(MemberKind::Property, name));
        } else {
            parent.members.push(member(MemberKind::Field, name));
            loop {
                if self.eat_punct("=") {
                    self.skip_expression(&[",", ";"]);
                }
                if !self.eat_punct(",") {
                    break;
                }
                match self.identifier() {
                    Some(next) => parent.members.push(member(MemberKind::Field, next.text)),
                    None => {
                        self.error_expected(codes::IDENTIFIER_EXPECTED, "Identifier expected");
                        break;
                    }
                }
            }
            self.expect_semicolon();
        }
    }

    /// Member name, including explicit interface qualifiers such as
    /// `IEnumerable<T>.GetEnumerator`.
    fn member_name(&mut self) -> Option<String> {
        let mut name = self.identifier()?.text;
        loop {
            if self.at_punct(".") && self.nth(1).kind == TokenKind::Identifier {
                self.bump();
                name.push('.');
                name.push_str(&self.bump().text);
            } else if self.at_punct("<") {
                let Some(close) = self.angle_close(self.pos) else {
                    break;
                };
                if !self.tokens.get(close + 1).is_some_and(|t| t.is_punct(".")) {
                    break;
                }
                while self.pos <= close {
                    name.push_str(&self.bump().text);
                }
            } else {
                break;
            }
        }
        Some(name)
    }

    /// Index of the `>` matching the `<` at `open`.
    fn angle_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.is_punct("<") {
                depth += 1;
            } else if token.is_punct(">") {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            } else if token.kind == TokenKind::Eof
                || ["{", "}", ";", "("].iter().any(|p| token.is_punct(p))
            {
                return None;
            }
        }
        None
    }

    /// A type reference: named, built-in or tuple, with generic arguments
    /// and nullable, pointer or array suffixes.
    fn parse_type(&mut self) -> bool {
        let token = self.peek();
        if token.is_punct("(") {
            if !self.skip_balanced() {
                return false;
            }
        } else if token.kind == TokenKind::Identifier
            || (token.kind == TokenKind::Keyword && BUILTIN_TYPES.contains(&token.text.as_str()))
        {
            self.bump();
            loop {
                if (self.at_punct(".") || self.at_punct("::"))
                    && self.nth(1).kind == TokenKind::Identifier
                {
                    self.bump();
                    self.bump();
                } else if self.at_punct("<") {
                    self.type_parameters();
                } else {
                    break;
                }
            }
        } else {
            return false;
        }

        loop {
            if self.at_punct("?") || self.at_punct("*") {
                self.bump();
            } else if self.at_punct("[") && (self.nth(1).is_punct("]") || self.nth(1).is_punct(",")) {
                self.skip_balanced();
            } else {
                return true;
            }
        }
    }

    /// Property or indexer accessors: a block, or an expression body.
    fn accessors(&mut self) {
        if self.at_punct("{") {
            let open = self.pos;
            if self.skip_balanced() {
                self.check_accessors(open, self.pos - 1);
            }
            if self.eat_punct("=") {
                self.skip_expression(&[";"]);
                self.expect_semicolon();
            }
        } else if self.eat_punct("=>") {
            self.skip_expression(&[";"]);
            self.expect_semicolon();
        } else {
            self.error_expected(codes::OPEN_BRACE_EXPECTED, "{ expected");
        }
    }

    /// Method-like body: a block, an expression body or `;`.
    fn body(&mut self) {
        if self.at_punct("{") {
            let open = self.pos;
            if self.skip_balanced() {
                let close = self.pos - 1;
                self.check_statements(open, close);
                self.check_locals(open, close);
            }
        } else if self.eat_punct("=>") {
            self.skip_expression(&[";"]);
            self.expect_semicolon();
        } else if !self.eat_punct(";") {
            self.error_expected(codes::SEMICOLON_EXPECTED, "; expected");
        }
    }

    // Skipping and recovery

    /// Skip a bracketed group starting at the current opener, reporting
    /// closers that are missing or out of place. Returns false if the group
    /// was never closed.
    fn skip_balanced(&mut self) -> bool {
        let mut stack: Vec<&'static str> = Vec::new();
        loop {
            let token = self.peek().clone();
            if token.kind == TokenKind::Eof {
                self.report_unclosed(&stack);
                return false;
            }
            if token.kind == TokenKind::Punct {
                match token.text.as_str() {
                    "(" => stack.push(")"),
                    "[" => stack.push("]"),
                    "{" => stack.push("}"),
                    close @ (")" | "]" | "}") => {
                        if let Some(depth) = stack.iter().rposition(|c| *c == close) {
                            self.report_unclosed(&stack[depth + 1..]);
                            stack.truncate(depth);
                            self.bump();
                            if stack.is_empty() {
                                return true;
                            }
                            continue;
                        }
                        if close == "}" {
                            self.report_unclosed(&stack);
                            return false;
                        }
                        self.error_at_current(
                            codes::INVALID_EXPRESSION_TERM,
                            format!("Invalid expression term '{close}'"),
                        );
                    }
                    _ => {}
                }
            }
            self.bump();
        }
    }

    fn report_unclosed(&mut self, closers: &[&'static str]) {
        for closer in closers.iter().rev() {
            let (id, message) = match *closer {
                ")" => (codes::CLOSE_PAREN_EXPECTED, ") expected"),
                "]" => (codes::SYNTAX_ERROR, "Syntax error, ']' expected"),
                _ => (codes::CLOSE_BRACE_EXPECTED, "} expected"),
            };
            self.error_expected(id, message);
        }
    }

    /// Skip an expression up to one of `stops` at depth zero, without
    /// consuming it. Also stops at an unmatched closer.
    fn skip_expression(&mut self, stops: &[&str]) {
        loop {
            let token = self.peek();
            if token.kind == TokenKind::Eof {
                return;
            }
            if token.kind == TokenKind::Punct {
                let text = token.text.as_str();
                if stops.contains(&text) || matches!(text, ")" | "]" | "}") {
                    return;
                }
                if matches!(text, "(" | "[" | "{") {
                    if !self.skip_balanced() {
                        return;
                    }
                    continue;
                }
            }
            self.bump();
        }
    }

    /// Skip a base list or constraint clauses up to the body.
    fn skip_until_body(&mut self) {
        loop {
            let token = self.peek();
            if token.kind == TokenKind::Eof
                || ["{", "}", ";", "=>"].iter().any(|p| token.is_punct(p))
            {
                return;
            }
            if token.is_punct("(") || token.is_punct("[") {
                if !self.skip_balanced() {
                    return;
                }
                continue;
            }
            self.bump();
        }
    }

    /// Recover from a bad member: skip through the next `;`, leaving any
    /// enclosing `}` in place.
    fn skip_member(&mut self) {
        let start = self.pos;
        self.skip_expression(&[";"]);
        if !self.eat_punct(";") && self.pos == start && !self.at_punct("}") && !self.at_eof() {
            self.bump();
        }
    }

    // Body checks

    /// Report accessors in `{ get; set; }` that have no `;`, block or
    /// expression body, then check accessor blocks like method bodies.
    fn check_accessors(&mut self, open: usize, close: usize) {
        let mut depth = 0usize;
        let mut block_start = None;
        let mut blocks = Vec::new();
        let mut missing = Vec::new();
        let mut in_expression = false;

        for i in open + 1..close {
            let token = &self.tokens[i];
            if depth == 0 {
                let prev = &self.tokens[i - 1];
                let at_accessor = ACCESSOR_WORDS.contains(&token.text.as_str())
                    && token.kind == TokenKind::Identifier
                    && (i == open + 1
                        || prev.kind == TokenKind::Keyword
                        || [";", "}", "]"].iter().any(|p| prev.is_punct(p)));
                if at_accessor {
                    if in_expression {
                        missing.push(prev.span.end);
                        in_expression = false;
                    }
                    let next = &self.tokens[i + 1];
                    if ![";", "{", "=>"].iter().any(|p| next.is_punct(p)) {
                        missing.push(token.span.end);
                    }
                } else if token.is_punct("=>") {
                    in_expression = true;
                } else if token.is_punct(";") {
                    in_expression = false;
                }
            }

            if token.kind != TokenKind::Punct {
                continue;
            }
            match token.text.as_str() {
                "{" | "(" | "[" => {
                    if depth == 0 && token.text == "{" && !in_expression {
                        block_start = Some(i);
                    }
                    depth += 1;
                }
                "}" | ")" | "]" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0
                        && token.text == "}"
                        && let Some(start) = block_start.take()
                    {
                        blocks.push((start, i));
                    }
                }
                _ => {}
            }
        }
        if in_expression {
            missing.push(self.tokens[close - 1].span.end);
        }

        for offset in missing {
            self.push(
                Diagnostic::error(codes::SEMICOLON_EXPECTED, "; expected"),
                offset,
                0,
            );
        }
        for (block_open, block_close) in blocks {
            self.check_statements(block_open, block_close);
            self.check_locals(block_open, block_close);
        }
    }

    /// Report statements in a block that are closed by `}` without a
    /// terminator. Only braces known to open statement blocks are checked;
    /// initializer and pattern braces are skipped.
    fn check_statements(&mut self, open: usize, close: usize) {
        let mut braces: Vec<bool> = Vec::new();
        let mut parens: Vec<bool> = Vec::new();
        let mut control_paren = false;
        let mut missing = Vec::new();

        for i in open..=close {
            let token = &self.tokens[i];
            if token.kind != TokenKind::Punct {
                continue;
            }
            let prev = (i > open).then(|| &self.tokens[i - 1]);
            match token.text.as_str() {
                "(" => parens.push(prev.is_some_and(|p| {
                    (p.kind == TokenKind::Keyword && CONTROL_KEYWORDS.contains(&p.text.as_str()))
                        || p.is_word("when")
                })),
                ")" => control_paren = parens.pop().unwrap_or(false),
                "{" => {
                    let statement = match prev {
                        None => true,
                        Some(p) => {
                            let enclosing = braces.last().copied().unwrap_or(false);
                            (p.is_punct(")") && control_paren)
                                || p.is_punct("=>")
                                || (p.kind == TokenKind::Keyword
                                    && BLOCK_KEYWORDS.contains(&p.text.as_str()))
                                || (enclosing && [";", "{", "}", ":"].iter().any(|s| p.is_punct(s)))
                        }
                    };
                    braces.push(statement);
                }
                "}" => {
                    if braces.pop() == Some(true)
                        && let Some(p) = prev
                        && ![";", "{", "}", ":"].iter().any(|s| p.is_punct(s))
                    {
                        missing.push(p.span.end);
                    }
                }
                _ => {}
            }
        }

        for offset in missing {
            self.push(
                Diagnostic::error(codes::SEMICOLON_EXPECTED, "; expected"),
                offset,
                0,
            );
        }
    }

    /// Warn about locals that are declared at statement level and never
    /// mentioned again in the same body.
    fn check_locals(&mut self, open: usize, close: usize) {
        let body = &self.tokens[open + 1..close];
        let mut warnings = Vec::new();

        for i in 0..body.len() {
            let at_statement_start = i == 0
                || [";", "{", "}"].iter().any(|s| body[i - 1].is_punct(s));
            if !at_statement_start {
                continue;
            }
            let Some((name_index, init)) = local_declaration(body, i) else {
                continue;
            };
            let name = &body[name_index];
            let used = body.iter().enumerate().any(|(k, t)| {
                k != name_index
                    && ((t.kind == TokenKind::Identifier && t.text == name.text)
                        || (t.kind == TokenKind::InterpolatedString && mentions(&t.text, &name.text)))
            });
            if used {
                continue;
            }
            let warning = match init {
                LocalInit::None => Diagnostic::warning(
                    codes::VARIABLE_UNUSED,
                    format!("The variable '{}' is declared but never used", name.text),
                ),
                LocalInit::Constant => Diagnostic::warning(
                    codes::VARIABLE_ASSIGNED_UNUSED,
                    format!("The variable '{}' is assigned but its value is never used", name.text),
                ),
                LocalInit::Other => continue,
            };
            warnings.push((warning, name.span));
        }

        for (warning, span) in warnings {
            self.push(warning, span.start, span.len());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocalInit {
    None,
    Constant,
    Other,
}

/// Recognize `Type name;` or `Type name = value` at `start`, returning the
/// index of the name token.
fn local_declaration(body: &[Token], start: usize) -> Option<(usize, LocalInit)> {
    let first = &body[start];
    let is_type = match first.kind {
        TokenKind::Keyword => {
            BUILTIN_TYPES.contains(&first.text.as_str()) && first.text != "void"
        }
        TokenKind::Identifier => !matches!(first.text.as_str(), "await" | "yield" | "nameof"),
        _ => false,
    };
    if !is_type {
        return None;
    }

    let mut j = start + 1;
    if first.kind == TokenKind::Identifier {
        while j + 1 < body.len() && body[j].is_punct(".") && body[j + 1].kind == TokenKind::Identifier {
            j += 2;
        }
    }
    if body.get(j).is_some_and(|t| t.is_punct("<")) {
        let mut depth = 0usize;
        loop {
            let token = body.get(j)?;
            if token.is_punct("<") {
                depth += 1;
            } else if token.is_punct(">") {
                depth -= 1;
                if depth == 0 {
                    j += 1;
                    break;
                }
            } else if [";", "{", "}", "="].iter().any(|p| token.is_punct(p)) {
                return None;
            }
            j += 1;
        }
    }
    loop {
        if body.get(j).is_some_and(|t| t.is_punct("?")) {
            j += 1;
        } else if body.get(j).is_some_and(|t| t.is_punct("["))
            && body.get(j + 1).is_some_and(|t| t.is_punct("]"))
        {
            j += 2;
        } else {
            break;
        }
    }

    let name = body.get(j)?;
    if name.kind != TokenKind::Identifier {
        return None;
    }
    let next = body.get(j + 1)?;
    if next.is_punct(";") {
        return Some((j, LocalInit::None));
    }
    if !next.is_punct("=") {
        return None;
    }
    let value = body.get(j + 2)?;
    let literal = matches!(value.kind, TokenKind::Number | TokenKind::String | TokenKind::Char)
        || ["true", "false", "null"].iter().any(|k| value.is_keyword(k));
    let ends = body.get(j + 3).is_some_and(|t| t.is_punct(";"));
    Some((j, if literal && ends { LocalInit::Constant } else { LocalInit::Other }))
}

/// Whether `name` appears as a whole word in `text`.
fn mentions(text: &str, name: &str) -> bool {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(name).any(|(i, _)| {
        let before = text[..i].chars().next_back();
        let after = text[i + name.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    fn parse_latest(src: &str) -> SyntaxTree {
        parse(src, 0, ParseOptions::default())
    }

    fn ids(src: &str) -> Vec<&'static str> {
        parse_latest(src).diagnostics.iter().map(|d| d.id).collect()
    }

    fn ids_with(src: &str, version: LanguageVersion) -> Vec<&'static str> {
        parse(src, 0, ParseOptions { language_version: version })
            .diagnostics
            .iter()
            .map(|d| d.id)
            .collect()
    }

    #[test]
    fn test_parse_generated_class() {
        let src = r#"
using System;
using System.Collections.Generic;

namespace Shop.Orders
{
    public class Order
    {
        private int _id;
        private List<string> _lines = new();

        public Order(int id)
        {
            _id = id;
        }

        public int Id { get; private set; }

        public string Describe() => $"Order {_id}";

        public void Add(string line)
        {
            _lines.Add(line);
        }
    }
}
"#;
        let tree = parse_latest(src);
        assert!(tree.diagnostics.is_empty(), "{:?}", tree.diagnostics);
        assert_eq!(tree.usings, vec!["System", "System.Collections.Generic"]);
        assert_eq!(tree.types.len(), 1);

        let order = &tree.types[0];
        assert_eq!(order.full_name(), "Shop.Orders.Order");
        let members: Vec<_> = order.members.iter().map(|m| (m.kind, m.name.as_str())).collect();
        assert_eq!(
            members,
            vec![
                (MemberKind::Field, "_id"),
                (MemberKind::Field, "_lines"),
                (MemberKind::Constructor, ".ctor"),
                (MemberKind::Property, "Id"),
                (MemberKind::Method, "Describe"),
                (MemberKind::Method, "Add"),
            ]
        );
    }

    #[test]
    fn test_parse_terminated_and_primary_constructor_types() {
        let src = "namespace test;\n\npublic class TestClass;\npublic readonly struct Point(int X, int Y);\npublic record Person(string Name);";
        let tree = parse_latest(src);
        assert!(tree.diagnostics.is_empty(), "{:?}", tree.diagnostics);
        let names: Vec<_> = tree.types.iter().map(TypeSymbol::full_name).collect();
        assert_eq!(names, vec!["test.TestClass", "test.Point", "test.Person"]);
    }

    #[test]
    fn test_parse_other_declarations() {
        let src = r#"
namespace A { namespace B {
    public interface IShape { double Area { get; } double Scale(double f); }
    public enum Color { Red, Green = 2, Blue }
    public delegate void Changed<T>(T value);
    public static class Ext
    {
        public static int Twice(this int x) => x * 2;
        public static implicit operator int(Ext e) => 0;
        public int this[int i] { get { return i; } }
        public event EventHandler Raised;
        private class Inner<T> where T : new() { }
        ~Ext() { }
    }
} }
"#;
        let tree = parse_latest(src);
        assert!(tree.diagnostics.is_empty(), "{:?}", tree.diagnostics);
        let names: Vec<_> = tree.types.iter().map(TypeSymbol::full_name).collect();
        assert_eq!(names, vec!["A.B.IShape", "A.B.Color", "A.B.Changed`1", "A.B.Ext"]);
        assert_eq!(tree.types[1].members.len(), 3);
        assert_eq!(tree.types[3].nested[0].full_name(), "Inner`1");
    }

    #[test]
    fn test_missing_semicolon() {
        assert_eq!(ids("class A { int x }"), vec![codes::SEMICOLON_EXPECTED]);
        assert_eq!(ids("class A { void M() { Call() } }"), vec![codes::SEMICOLON_EXPECTED]);
        assert_eq!(ids("using System\nclass A { }"), vec![codes::SEMICOLON_EXPECTED]);
    }

    #[test]
    fn test_initializer_braces_are_not_statements() {
        let src = "class A { void M() { var p = new P { X = 1 }; if (p.X > 0) { p.X = 2; } } }";
        assert!(ids(src).is_empty());
    }

    #[test]
    fn test_accessor_without_terminator() {
        assert_eq!(ids("class A { public int P { get; set } }"), vec![codes::SEMICOLON_EXPECTED]);
        assert_eq!(ids("class A { public int P { get => 1 } }"), vec![codes::SEMICOLON_EXPECTED]);
        assert_eq!(
            ids("class A { int this[int i] { get => i; set { _ = value } } }"),
            vec![codes::SEMICOLON_EXPECTED]
        );
    }

    #[test]
    fn test_accessor_forms_accepted() {
        assert!(ids("class A { public int P { get; private set; } = 1; }").is_empty());
        assert!(ids("class A { public int P { get { return 1; } set { } } }").is_empty());
        assert!(ids("class A { public List<int> P { get => new List<int> { 1 }; } }").is_empty());
        assert!(ids("class A { public int P { [Obsolete] get; init; } }").is_empty());
    }

    #[test]
    fn test_invalid_member_token() {
        assert_eq!(ids("class A { 123 }"), vec![codes::INVALID_MEMBER_TOKEN]);
    }

    #[test]
    fn test_method_without_return_type() {
        assert_eq!(ids("class A { Foo() { } }"), vec![codes::METHOD_RETURN_TYPE]);
    }

    #[test]
    fn test_stray_close_paren_in_body() {
        assert!(ids("class A { void M() { x = (1)); } }").contains(&codes::INVALID_EXPRESSION_TERM));
    }

    #[test]
    fn test_unclosed_attribute_bracket() {
        assert_eq!(ids("[Obsolete class A { }"), vec![codes::SYNTAX_ERROR]);
    }

    #[test]
    fn test_literal_errors_surface_in_tree() {
        assert!(ids("class A { char c = 'ab'; }").contains(&codes::TOO_MANY_CHARACTERS));
        assert!(ids("class A { string s = @\"abc; }").contains(&codes::UNTERMINATED_STRING));
        assert!(ids("class A { string s = \"\"\"abc; }").contains(&codes::UNTERMINATED_STRING));
    }

    #[test]
    fn test_missing_close_brace() {
        assert_eq!(ids("namespace N { class A { void M() { } }"), vec![codes::CLOSE_BRACE_EXPECTED]);
        assert_eq!(ids("class A {"), vec![codes::CLOSE_BRACE_EXPECTED]);
    }

    #[test]
    fn test_missing_open_brace() {
        assert_eq!(
            ids("class A int x; }"),
            vec![
                codes::OPEN_BRACE_EXPECTED,
                codes::NAMESPACE_MEMBER,
                codes::TYPE_OR_NAMESPACE_EXPECTED,
            ]
        );
        assert!(ids("class A : B").contains(&codes::OPEN_BRACE_EXPECTED));
    }

    #[test]
    fn test_missing_close_paren() {
        assert_eq!(ids("class A { void M(int x { } }"), vec![codes::CLOSE_PAREN_EXPECTED]);
    }

    #[test]
    fn test_stray_close_brace() {
        assert_eq!(ids("class A { } }"), vec![codes::TYPE_OR_NAMESPACE_EXPECTED]);
    }

    #[test]
    fn test_namespace_member() {
        assert_eq!(ids("namespace N { int x; }"), vec![codes::NAMESPACE_MEMBER]);
    }

    #[test]
    fn test_identifier_expected() {
        assert_eq!(ids("class { }"), vec![codes::IDENTIFIER_EXPECTED]);
    }

    #[test]
    fn test_using_after_member() {
        assert_eq!(ids("class A { }\nusing System;"), vec![codes::USING_AFTER_MEMBERS]);
    }

    #[test]
    fn test_language_version_gates() {
        assert_eq!(
            ids_with("public class P(string name);", LanguageVersion::CSharp11),
            vec![codes::FEATURE_UNAVAILABLE, codes::FEATURE_UNAVAILABLE]
        );
        assert_eq!(
            ids_with("namespace N;\nclass A { }", LanguageVersion::CSharp9),
            vec![codes::FEATURE_UNAVAILABLE]
        );
        assert_eq!(
            ids_with("record R(int X);", LanguageVersion::CSharp8),
            vec![codes::FEATURE_UNAVAILABLE]
        );
        assert!(ids_with("record R(int X);", LanguageVersion::CSharp9).is_empty());
        assert!(ids_with("class A { }", LanguageVersion::CSharp6).is_empty());
    }

    #[test]
    fn test_feature_message() {
        let tree = parse(
            "namespace N;",
            0,
            ParseOptions {
                language_version: LanguageVersion::CSharp9,
            },
        );
        assert_eq!(
            tree.diagnostics[0].message,
            "Feature 'file-scoped namespace' is not available in C# 9. Please use language version 10 or greater."
        );
    }

    #[test]
    fn test_file_scoped_namespace_rules() {
        assert_eq!(
            ids("namespace A;\nnamespace B;"),
            vec![codes::FILE_SCOPED_NAMESPACE]
        );
        assert_eq!(
            ids("class C { }\nnamespace A;"),
            vec![codes::FILE_SCOPED_NAMESPACE_ORDER]
        );
    }

    #[test]
    fn test_unused_locals() {
        let tree = parse_latest("class A { void M() { int x; int y = 5; int z = 1; Use(z); } }");
        let warnings: Vec<_> = tree
            .diagnostics
            .iter()
            .map(|d| (d.id, d.severity, d.message.as_str()))
            .collect();
        assert_eq!(
            warnings,
            vec![
                (
                    codes::VARIABLE_UNUSED,
                    Severity::Warning,
                    "The variable 'x' is declared but never used"
                ),
                (
                    codes::VARIABLE_ASSIGNED_UNUSED,
                    Severity::Warning,
                    "The variable 'y' is assigned but its value is never used"
                ),
            ]
        );
    }

    #[test]
    fn test_locals_used_in_interpolation() {
        let src = r#"class A { string M() { int count = 3; return $"{count} items"; } }"#;
        assert!(ids(src).is_empty());
    }

    #[test]
    fn test_locals_assigned_from_calls_not_reported() {
        let src = "class A { void M() { var item = Load(); List<int> xs = new(); } }";
        assert!(ids(src).is_empty());
    }

    #[test]
    fn test_diagnostic_location() {
        let tree = parse_latest("class A\n{\n    int x\n}");
        let location = tree.diagnostics[0].location.unwrap();
        assert_eq!((location.line, location.column), (3, 10));
    }

    #[test]
    fn test_mentions() {
        assert!(mentions("$\"{count}\"", "count"));
        assert!(!mentions("$\"{counter}\"", "count"));
    }
}
