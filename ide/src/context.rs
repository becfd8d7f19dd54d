//! Cursor-context detection: classifies the trigger position into one of the
//! completion contexts using token neighborhoods, never a full parse.
//! All coordinates are UTF-8 byte offsets into the original source text.

use semantics::{SemanticModel, Site, Span, SymbolKind, Token, TokenKind, Ty, TypeId};

/// Modifier keywords that may precede an in-progress member declaration.
const MODIFIER_WORDS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "sealed", "abstract", "virtual",
    "unsafe", "required", "partial", "new", "extern", "readonly", "override",
];

const TYPE_DECL_WORDS: &[&str] = &["class", "struct", "interface", "enum", "record"];

/// A using directive found in the file, with the byte range of its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub namespace: String,
    pub line_start: u32,
    pub line_end: u32,
}

/// The classified completion context at the cursor.
#[derive(Debug, Clone)]
pub(crate) struct AnalyzedContext {
    pub kind: ContextKind,
    /// Span the committed text replaces (typed prefix, or empty at cursor).
    pub replace: Span,
    /// Typed prefix text, if any.
    pub query: Option<String>,
    pub site: Site,
}

#[derive(Debug, Clone)]
pub(crate) enum ContextKind {
    MemberAccess(MemberAccessCtx),
    OverrideDecl(OverrideCtx),
    ExplicitInterface(ExplicitInterfaceCtx),
    InitializerMember(InitializerCtx),
    DeclarationName(DeclNameCtx),
    None,
}

impl ContextKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContextKind::MemberAccess(_) => "member-access",
            ContextKind::OverrideDecl(_) => "override-declaration",
            ContextKind::ExplicitInterface(_) => "explicit-interface",
            ContextKind::InitializerMember(_) => "initializer-member",
            ContextKind::DeclarationName(_) => "declaration-name",
            ContextKind::None => "none",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemberAccessCtx {
    pub receiver: Span,
    /// `None` when the receiver has no resolvable type (broken mid-edit
    /// code); resolvers then degrade to empty candidate sets.
    pub receiver_ty: Option<Ty>,
    /// The trigger dot is `?.`.
    pub conditional: bool,
    /// Namespaces imported in this file.
    pub imports: Vec<String>,
    /// Existing using directives, for ordered import insertion.
    pub directives: Vec<Directive>,
    /// Insertion offset when no directive exists yet.
    pub fallback_import_at: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct OverrideCtx {
    pub current_type: TypeId,
    /// Modifier keywords already written before `override`.
    pub written_modifiers: Vec<String>,
    /// Start of the modifier run (or of the `override` keyword itself).
    pub decl_start: u32,
    /// The modifier run and keyword do not share a line; stub insertion is
    /// rejected at commit.
    pub multiline: bool,
    pub indent: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ExplicitInterfaceCtx {
    pub current_type: TypeId,
    pub interface: TypeId,
    /// The interface qualifier exactly as written, without the final dot.
    pub qualifier: String,
    pub decl_start: u32,
    pub indent: String,
}

#[derive(Debug, Clone)]
pub(crate) struct InitializerCtx {
    pub target: TypeId,
    /// Member names already assigned earlier in the same initializer list.
    pub assigned: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct DeclNameCtx {
    pub declared_ty: Ty,
    pub symbol_kind: SymbolKind,
    /// An identifier already following the cursor on the same declaration.
    pub following_ident: Option<String>,
}

/// Classifies the cursor position. Never fails: unrecognized positions yield
/// [`ContextKind::None`] and an empty candidate set downstream.
pub(crate) fn analyze(
    source: &str,
    tokens: &[Token],
    cursor: u32,
    model: &SemanticModel,
) -> AnalyzedContext {
    let site = model.site_at(cursor);
    let stack = block_stack(tokens, cursor);
    let partial = partial_ident_at(tokens, cursor);

    let replace = match partial {
        Some((_, span)) => span,
        None => Span::empty(cursor),
    };
    let query = replace
        .slice(source)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    let trigger = match partial {
        Some((idx, _)) => prev_non_trivia_before(tokens, idx),
        None => prev_non_trivia_insertion(tokens, cursor),
    };

    let kind = detect_kind(source, tokens, cursor, model, &stack, partial, trigger, site);
    tracing::debug!(context = kind.label(), cursor, "classified completion context");

    AnalyzedContext {
        kind,
        replace,
        query,
        site,
    }
}

#[allow(clippy::too_many_arguments)]
fn detect_kind(
    source: &str,
    tokens: &[Token],
    cursor: u32,
    model: &SemanticModel,
    stack: &[Block],
    partial: Option<(usize, Span)>,
    trigger: Option<(usize, &Token)>,
    site: Site,
) -> ContextKind {
    let Some((trigger_idx, trigger_token)) = trigger else {
        return ContextKind::None;
    };
    let prefix_start = partial.map(|(_, span)| span.start).unwrap_or(cursor);
    let top = stack.last();

    if trigger_token.is_word("override")
        && only_trivia_between(tokens, trigger_token.span.end, prefix_start)
        && matches!(top.map(|b| &b.kind), Some(BlockKind::TypeBody))
        && let Some(current_type) = site.enclosing_type
    {
        return override_context(source, tokens, trigger_idx, current_type);
    }

    if trigger_token.kind.is_member_access_dot() {
        let in_type_body = matches!(top.map(|b| &b.kind), Some(BlockKind::TypeBody));
        if in_type_body {
            if trigger_token.kind == TokenKind::Dot
                && let Some(ctx) = explicit_interface_context(source, tokens, trigger_idx, model, site)
            {
                return ContextKind::ExplicitInterface(ctx);
            }
            return ContextKind::None;
        }
        return member_access_context(source, tokens, trigger_idx, model);
    }

    if let Some(Block {
        kind: BlockKind::Initializer { type_span },
        open_idx,
    }) = top
        && initializer_trigger(tokens, *open_idx, trigger_idx, trigger_token)
    {
        return initializer_context(source, tokens, cursor, model, *type_span, *open_idx);
    }

    declaration_name_context(source, tokens, cursor, model, stack, partial, trigger_idx)
}

// ---- block structure ----

#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockKind {
    Namespace,
    TypeBody,
    MemberBody,
    Initializer { type_span: Span },
    Other,
}

#[derive(Debug, Clone)]
struct Block {
    kind: BlockKind,
    open_idx: usize,
}

fn block_stack(tokens: &[Token], cursor: u32) -> Vec<Block> {
    let mut stack: Vec<Block> = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        if token.is_trivia() || token.kind == TokenKind::Eof {
            continue;
        }
        if token.span.start >= cursor {
            break;
        }
        match token.kind {
            TokenKind::OpenBrace => {
                let kind = classify_open_brace(tokens, idx, &stack);
                stack.push(Block {
                    kind,
                    open_idx: idx,
                });
            }
            TokenKind::CloseBrace => {
                stack.pop();
            }
            _ => {}
        }
    }
    stack
}

fn classify_open_brace(tokens: &[Token], brace_idx: usize, stack: &[Block]) -> BlockKind {
    if let Some(type_span) = initializer_type_span(tokens, brace_idx) {
        return BlockKind::Initializer { type_span };
    }

    // Scan the declaration header back to the previous statement boundary.
    let mut idx = brace_idx;
    while let Some((prev_idx, prev)) = prev_non_trivia_before(tokens, idx) {
        match &prev.kind {
            TokenKind::Semi | TokenKind::OpenBrace | TokenKind::CloseBrace => break,
            TokenKind::Ident(symbol) if symbol.text == "namespace" => {
                return BlockKind::Namespace;
            }
            TokenKind::Ident(symbol) if TYPE_DECL_WORDS.contains(&symbol.text.as_str()) => {
                return BlockKind::TypeBody;
            }
            _ => {}
        }
        idx = prev_idx;
    }

    match stack.last().map(|b| &b.kind) {
        Some(BlockKind::TypeBody) => BlockKind::MemberBody,
        _ => BlockKind::Other,
    }
}

/// For a `{` opening an object initializer, the span of the constructed type
/// reference between `new` and the brace. Constructor argument lists are
/// skipped; their tokens never shape the type.
fn initializer_type_span(tokens: &[Token], brace_idx: usize) -> Option<Span> {
    let mut idx = brace_idx;
    let mut angle_depth = 0i32;
    let mut paren_depth = 0i32;
    let mut type_start: Option<u32> = None;
    let mut type_end: Option<u32> = None;

    while let Some((prev_idx, prev)) = prev_non_trivia_before(tokens, idx) {
        let mut part_of_type = false;
        match &prev.kind {
            TokenKind::CloseParen => paren_depth += 1,
            TokenKind::OpenParen => {
                if paren_depth == 0 {
                    return None;
                }
                paren_depth -= 1;
            }
            _ if paren_depth > 0 => {}
            TokenKind::Ident(symbol) if symbol.text == "new" && angle_depth == 0 => {
                let start = type_start?;
                let end = type_end?;
                return (start <= end).then_some(Span::new(start, end));
            }
            TokenKind::Gt => {
                angle_depth += 1;
                part_of_type = true;
            }
            TokenKind::Lt => {
                angle_depth -= 1;
                part_of_type = true;
            }
            TokenKind::Comma if angle_depth > 0 => part_of_type = true,
            TokenKind::Ident(_)
            | TokenKind::Dot
            | TokenKind::Question
            | TokenKind::OpenBracket
            | TokenKind::CloseBracket => part_of_type = true,
            _ => return None,
        }
        if part_of_type {
            type_start = Some(prev.span.start);
            type_end.get_or_insert(prev.span.end);
        }
        idx = prev_idx;
    }
    None
}

// ---- override ----

fn override_context(
    source: &str,
    tokens: &[Token],
    keyword_idx: usize,
    current_type: TypeId,
) -> ContextKind {
    let mut written_modifiers = Vec::new();
    let mut decl_start = tokens[keyword_idx].span.start;
    let mut idx = keyword_idx;

    while let Some((prev_idx, prev)) = prev_non_trivia_before(tokens, idx) {
        let Some(word) = prev.ident_text() else { break };
        if word == "override" || !MODIFIER_WORDS.contains(&word) {
            break;
        }
        written_modifiers.insert(0, word.to_string());
        decl_start = prev.span.start;
        idx = prev_idx;
    }

    let keyword_end = tokens[keyword_idx].span.end;
    let multiline = source
        .get(decl_start as usize..keyword_end as usize)
        .is_some_and(|run| run.contains('\n'));

    ContextKind::OverrideDecl(OverrideCtx {
        current_type,
        written_modifiers,
        decl_start,
        multiline,
        indent: line_indent(source, decl_start),
    })
}

// ---- explicit interface ----

fn explicit_interface_context(
    source: &str,
    tokens: &[Token],
    dot_idx: usize,
    model: &SemanticModel,
    site: Site,
) -> Option<ExplicitInterfaceCtx> {
    // Walk the pure dotted name chain backwards: Ident (`.` Ident)* `.`
    let mut idx = dot_idx;
    let mut start_span: Option<Span> = None;
    loop {
        let (ident_idx, ident) = prev_non_trivia_before(tokens, idx)?;
        if ident.ident_text().is_none() {
            return None;
        }
        start_span = Some(ident.span);
        match prev_non_trivia_before(tokens, ident_idx) {
            Some((prev_dot_idx, prev_dot)) if prev_dot.kind == TokenKind::Dot => {
                idx = prev_dot_idx;
            }
            _ => break,
        }
    }

    let start = start_span?;
    let qualifier_span = Span::new(start.start, tokens[dot_idx].span.start);
    let qualifier = qualifier_span.slice(source)?.trim().to_string();
    let interface = model.resolve_type_path(&qualifier)?;
    if !model.type_def(interface)?.is_interface() {
        return None;
    }

    Some(ExplicitInterfaceCtx {
        current_type: site.enclosing_type?,
        interface,
        qualifier,
        decl_start: start.start,
        indent: line_indent(source, start.start),
    })
}

// ---- member access ----

fn member_access_context(
    source: &str,
    tokens: &[Token],
    dot_idx: usize,
    model: &SemanticModel,
) -> ContextKind {
    let Some((receiver, first_idx, last_idx)) = receiver_before_dot(tokens, dot_idx) else {
        return ContextKind::None;
    };

    // A bare literal receiver never triggers member completion: string
    // literals and numbers that could still become a float are excluded.
    if first_idx == last_idx
        && matches!(tokens[first_idx].kind, TokenKind::Literal(_))
    {
        return ContextKind::None;
    }

    let Some(text) = receiver.slice(source) else {
        return ContextKind::None;
    };
    let receiver_ty = match model.classify_expr(text) {
        Some(semantics::ExprClass::Value(ty)) => Some(ty.clone()),
        Some(semantics::ExprClass::TypeName(_)) | Some(semantics::ExprClass::Namespace) => {
            return ContextKind::None;
        }
        None => None,
    };

    let (directives, fallback_import_at) = scan_using_directives(source, tokens);
    let imports = directives.iter().map(|d| d.namespace.clone()).collect();

    ContextKind::MemberAccess(MemberAccessCtx {
        receiver,
        receiver_ty,
        conditional: tokens[dot_idx].kind == TokenKind::QuestionDot,
        imports,
        directives,
        fallback_import_at,
    })
}

/// Finds the receiver expression bounds before a member-access dot, handling
/// parenthesized groups, indexers, invocations, and `.`/`?.` chains.
fn receiver_before_dot(tokens: &[Token], dot_idx: usize) -> Option<(Span, usize, usize)> {
    let (last_idx, last) = prev_non_trivia_before(tokens, dot_idx)?;
    let mut idx = last_idx;
    let mut start_idx = last_idx;

    loop {
        match &tokens[idx].kind {
            TokenKind::CloseParen | TokenKind::CloseBracket => {
                let open = match_opener_back(tokens, idx)?;
                start_idx = open;
                match prev_non_trivia_before(tokens, open) {
                    Some((prev_idx, prev))
                        if matches!(
                            prev.kind,
                            TokenKind::Ident(_)
                                | TokenKind::CloseParen
                                | TokenKind::CloseBracket
                        ) =>
                    {
                        idx = prev_idx;
                    }
                    _ => break,
                }
            }
            TokenKind::Ident(_) => {
                start_idx = idx;
                match prev_non_trivia_before(tokens, idx) {
                    Some((dot_prev_idx, dot_prev))
                        if dot_prev.kind.is_member_access_dot() =>
                    {
                        match prev_non_trivia_before(tokens, dot_prev_idx) {
                            Some((atom_idx, atom))
                                if matches!(
                                    atom.kind,
                                    TokenKind::Ident(_)
                                        | TokenKind::CloseParen
                                        | TokenKind::CloseBracket
                                        | TokenKind::Literal(_)
                                ) =>
                            {
                                idx = atom_idx;
                            }
                            _ => break,
                        }
                    }
                    _ => break,
                }
            }
            TokenKind::Literal(_) => {
                start_idx = idx;
                break;
            }
            _ => return None,
        }
    }

    let span = Span::new(tokens[start_idx].span.start, last.span.end);
    Some((span, start_idx, last_idx))
}

fn match_opener_back(tokens: &[Token], closer_idx: usize) -> Option<usize> {
    let (open_kind, close_kind) = match tokens[closer_idx].kind {
        TokenKind::CloseParen => (TokenKind::OpenParen, TokenKind::CloseParen),
        TokenKind::CloseBracket => (TokenKind::OpenBracket, TokenKind::CloseBracket),
        _ => return None,
    };
    let mut depth = 0i32;
    let mut idx = closer_idx;
    loop {
        let token = &tokens[idx];
        if token.kind == close_kind {
            depth += 1;
        } else if token.kind == open_kind {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
        if idx == 0 {
            return None;
        }
        idx -= 1;
    }
}

// ---- initializer ----

fn initializer_trigger(
    tokens: &[Token],
    open_idx: usize,
    trigger_idx: usize,
    trigger: &Token,
) -> bool {
    if trigger_idx == open_idx && trigger.kind == TokenKind::OpenBrace {
        return true;
    }
    if trigger.kind != TokenKind::Comma || trigger_idx <= open_idx {
        return false;
    }
    // The comma must separate entries of this initializer, not of a nested
    // argument list or element.
    let mut depth = 0i32;
    for token in tokens.iter().take(trigger_idx).skip(open_idx + 1) {
        match token.kind {
            TokenKind::OpenBrace | TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
            TokenKind::CloseBrace | TokenKind::CloseParen | TokenKind::CloseBracket => depth -= 1,
            _ => {}
        }
    }
    depth == 0
}

fn initializer_context(
    source: &str,
    tokens: &[Token],
    cursor: u32,
    model: &SemanticModel,
    type_span: Span,
    open_idx: usize,
) -> ContextKind {
    let Some(type_text) = type_span.slice(source) else {
        return ContextKind::None;
    };
    let Some(target) = model
        .resolve_type_text(type_text)
        .as_ref()
        .and_then(Ty::named_def)
    else {
        return ContextKind::None;
    };

    // Collect `Name =` bindings written earlier in this initializer list.
    let mut assigned = Vec::new();
    let mut depth = 0i32;
    let mut idx = open_idx + 1;
    while idx < tokens.len() {
        let token = &tokens[idx];
        if token.span.start >= cursor {
            break;
        }
        match &token.kind {
            TokenKind::OpenBrace | TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
            TokenKind::CloseBrace | TokenKind::CloseParen | TokenKind::CloseBracket => depth -= 1,
            TokenKind::Ident(symbol) if depth == 0 => {
                if let Some((_, next)) = next_non_trivia_after(tokens, idx)
                    && next.kind == TokenKind::Eq
                {
                    assigned.push(symbol.text.clone());
                }
            }
            _ => {}
        }
        idx += 1;
    }

    ContextKind::InitializerMember(InitializerCtx { target, assigned })
}

// ---- declaration name ----

fn declaration_name_context(
    source: &str,
    tokens: &[Token],
    cursor: u32,
    model: &SemanticModel,
    stack: &[Block],
    partial: Option<(usize, Span)>,
    trigger_idx: usize,
) -> ContextKind {
    let trigger = &tokens[trigger_idx];
    let prefix_start = partial.map(|(_, span)| span.start).unwrap_or(cursor);

    // The name slot must be separated from the type reference.
    if prefix_start <= trigger.span.end {
        return ContextKind::None;
    }
    if !only_trivia_between(tokens, trigger.span.end, prefix_start) {
        return ContextKind::None;
    }

    let start_idx = match &trigger.kind {
        TokenKind::Ident(symbol) if !MODIFIER_WORDS.contains(&symbol.text.as_str()) => {
            type_ref_start(tokens, trigger_idx)
        }
        TokenKind::Question | TokenKind::CloseBracket | TokenKind::Gt => {
            type_ref_start(tokens, trigger_idx)
        }
        _ => None,
    };
    let Some(start_idx) = start_idx else {
        return ContextKind::None;
    };

    let type_span = Span::new(tokens[start_idx].span.start, trigger.span.end);
    let Some(type_text) = type_span.slice(source) else {
        return ContextKind::None;
    };
    let Some(declared_ty) = model.resolve_type_text(type_text) else {
        return ContextKind::None;
    };

    let symbol_kind = match declaration_slot(tokens, stack, start_idx) {
        Some(kind) => kind,
        None => return ContextKind::None,
    };

    let after = partial.map(|(idx, _)| idx + 1).unwrap_or_else(|| {
        tokens
            .iter()
            .position(|t| t.span.start >= cursor)
            .unwrap_or(tokens.len())
    });
    let following_ident = tokens[after.min(tokens.len())..]
        .iter()
        .find(|t| !t.is_trivia() && t.kind != TokenKind::Eof)
        .and_then(|t| t.ident_text())
        .map(str::to_string);

    ContextKind::DeclarationName(DeclNameCtx {
        declared_ty,
        symbol_kind,
        following_ident,
    })
}

/// Walks a type reference backwards from its last token (`Ident`, `?`, `]`,
/// or `>`), returning the index of its first token.
fn type_ref_start(tokens: &[Token], tail_idx: usize) -> Option<usize> {
    let mut idx = tail_idx;

    // `?` suffix.
    if tokens[idx].kind == TokenKind::Question {
        let (prev_idx, _) = prev_non_trivia_before(tokens, idx)?;
        idx = prev_idx;
    }

    // `[]` rank suffixes.
    while tokens[idx].kind == TokenKind::CloseBracket {
        let (open_idx, open) = prev_non_trivia_before(tokens, idx)?;
        if open.kind != TokenKind::OpenBracket {
            return None;
        }
        let (prev_idx, _) = prev_non_trivia_before(tokens, open_idx)?;
        idx = prev_idx;
    }

    // `<...>` argument list.
    if tokens[idx].kind == TokenKind::Gt {
        let mut depth = 0i32;
        loop {
            match tokens[idx].kind {
                TokenKind::Gt => depth += 1,
                TokenKind::Lt => {
                    depth -= 1;
                    if depth == 0 {
                        let (prev_idx, prev) = prev_non_trivia_before(tokens, idx)?;
                        if prev.ident_text().is_none() {
                            return None;
                        }
                        idx = prev_idx;
                        break;
                    }
                }
                _ => {}
            }
            if idx == 0 {
                return None;
            }
            idx -= 1;
        }
    }

    if tokens[idx].ident_text().is_none() {
        return None;
    }

    // Dotted qualification.
    let mut start = idx;
    while let Some((dot_idx, dot)) = prev_non_trivia_before(tokens, start) {
        if dot.kind != TokenKind::Dot {
            break;
        }
        let (ident_idx, ident) = prev_non_trivia_before(tokens, dot_idx)?;
        if ident.ident_text().is_none() {
            break;
        }
        start = ident_idx;
    }
    Some(start)
}

/// Which declaration slot a type reference at `start_idx` introduces.
fn declaration_slot(tokens: &[Token], stack: &[Block], start_idx: usize) -> Option<SymbolKind> {
    // Inside an open paren since the enclosing block: a parameter (or an
    // `out`/pattern variable, which shares the parameter casing rule).
    let from = stack.last().map(|b| b.open_idx + 1).unwrap_or(0);
    let mut paren_depth = 0i32;
    for token in tokens.iter().take(start_idx).skip(from) {
        match token.kind {
            TokenKind::OpenParen => paren_depth += 1,
            TokenKind::CloseParen => paren_depth -= 1,
            _ => {}
        }
    }
    if paren_depth > 0 {
        return Some(SymbolKind::Parameter);
    }

    match stack.last().map(|b| &b.kind) {
        Some(BlockKind::TypeBody) => Some(SymbolKind::Field),
        Some(BlockKind::MemberBody) | Some(BlockKind::Other) | None => Some(SymbolKind::Local),
        Some(BlockKind::Namespace) | Some(BlockKind::Initializer { .. }) => None,
    }
}

// ---- using directives ----

fn scan_using_directives(source: &str, tokens: &[Token]) -> (Vec<Directive>, u32) {
    let mut directives = Vec::new();
    let mut depth = 0i32;
    let mut at_statement_start = true;
    let mut idx = 0usize;

    while idx < tokens.len() {
        let token = &tokens[idx];
        if token.is_trivia() || token.kind == TokenKind::Eof {
            idx += 1;
            continue;
        }
        match &token.kind {
            TokenKind::OpenBrace => {
                depth += 1;
                at_statement_start = true;
            }
            TokenKind::CloseBrace => {
                depth -= 1;
                at_statement_start = true;
            }
            TokenKind::Semi => at_statement_start = true,
            TokenKind::Ident(symbol)
                if symbol.text == "using" && at_statement_start && depth <= 1 =>
            {
                if let Some((namespace, end_idx)) = using_namespace(tokens, idx) {
                    directives.push(Directive {
                        namespace,
                        line_start: line_start_offset(source, token.span.start),
                        line_end: line_end_offset(source, tokens[end_idx].span.end),
                    });
                    idx = end_idx;
                }
                at_statement_start = true;
            }
            _ => at_statement_start = false,
        }
        idx += 1;
    }

    // No directive yet: the canonical spot is the line of the first
    // significant token (after any leading banner/trivia).
    let fallback = tokens
        .iter()
        .find(|t| !t.is_trivia() && t.kind != TokenKind::Eof)
        .map(|t| line_start_offset(source, t.span.start))
        .unwrap_or(0);
    (directives, fallback)
}

fn using_namespace(tokens: &[Token], using_idx: usize) -> Option<(String, usize)> {
    let mut parts = String::new();
    let mut idx = using_idx;
    loop {
        let (next_idx, next) = next_non_trivia_after(tokens, idx)?;
        match &next.kind {
            TokenKind::Ident(symbol) => parts.push_str(&symbol.text),
            TokenKind::Dot => parts.push('.'),
            TokenKind::Semi => return (!parts.is_empty()).then_some((parts, next_idx)),
            _ => return None,
        }
        idx = next_idx;
    }
}

// ---- token neighborhood helpers ----

/// The identifier being typed at the cursor: the token strictly containing
/// the cursor or ending exactly at it. A cursor at a token's start is an
/// insertion before it, not a partial word.
fn partial_ident_at(tokens: &[Token], cursor: u32) -> Option<(usize, Span)> {
    tokens.iter().enumerate().find_map(|(idx, token)| {
        let is_ident = matches!(token.kind, TokenKind::Ident(_));
        (is_ident && token.span.start < cursor && cursor <= token.span.end)
            .then_some((idx, token.span))
    })
}

/// The previous non-trivia token, treating `cursor == token.span.start` as
/// "before the token" (completion before `)` behaves like insertion).
fn prev_non_trivia_insertion(tokens: &[Token], cursor: u32) -> Option<(usize, &Token)> {
    let mut prev = None;
    for (idx, token) in tokens.iter().enumerate() {
        if token.is_trivia() || token.kind == TokenKind::Eof {
            continue;
        }
        if token.span.end <= cursor {
            prev = Some((idx, token));
        } else {
            break;
        }
    }
    prev
}

pub(crate) fn prev_non_trivia_before(tokens: &[Token], idx: usize) -> Option<(usize, &Token)> {
    let mut i = idx;
    while i > 0 {
        i -= 1;
        let token = &tokens[i];
        if token.is_trivia() || token.kind == TokenKind::Eof {
            continue;
        }
        return Some((i, token));
    }
    None
}

fn next_non_trivia_after(tokens: &[Token], idx: usize) -> Option<(usize, &Token)> {
    tokens
        .iter()
        .enumerate()
        .skip(idx + 1)
        .find(|(_, token)| !token.is_trivia() && token.kind != TokenKind::Eof)
}

fn only_trivia_between(tokens: &[Token], start: u32, end: u32) -> bool {
    if start > end {
        return false;
    }
    tokens
        .iter()
        .filter(|t| !t.is_trivia() && t.kind != TokenKind::Eof)
        .all(|t| t.span.end <= start || t.span.start >= end)
}

/// Leading whitespace of the line containing `offset`.
pub(crate) fn line_indent(source: &str, offset: u32) -> String {
    let start = line_start_offset(source, offset) as usize;
    source[start..]
        .chars()
        .take_while(|c| matches!(c, ' ' | '\t'))
        .collect()
}

pub(crate) fn line_start_offset(source: &str, offset: u32) -> u32 {
    let offset = (offset as usize).min(source.len());
    source[..offset]
        .rfind('\n')
        .map(|idx| idx as u32 + 1)
        .unwrap_or(0)
}

/// Offset just past the line (including its newline) containing `offset`.
pub(crate) fn line_end_offset(source: &str, offset: u32) -> u32 {
    let offset = (offset as usize).min(source.len());
    source[offset..]
        .find('\n')
        .map(|idx| (offset + idx) as u32 + 1)
        .unwrap_or(source.len() as u32)
}
