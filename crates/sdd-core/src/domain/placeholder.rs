//! Named-placeholder rendering for stamped template files.
//!
//! Templates carry two kinds of markers:
//!
//! - **Tokens** like `{{PROJECT_NAME}}`, resolved to text or to [`Value::Omit`],
//!   which removes the whole line holding the token.
//! - **Sections** delimited by marker lines:
//!
//!   ```text
//!   <!-- sdd:begin backend -->
//!   ...
//!   <!-- sdd:end backend -->
//!   ```
//!
//!   In `#`-comment formats the markers read `# sdd:begin backend`. A section
//!   is kept (markers stripped), dropped, or replaced by generated text.
//!   Sections do not nest; the same section may appear several times.
//!
//! Both vocabularies are closed enums, so a misspelled marker is reported in
//! [`Rendered::unresolved`] instead of silently passing through.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// ── Vocabulary ───────────────────────────────────────────────────────────────

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $accessor:ident, $parser:ident {
            $($variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            pub const fn $accessor(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            pub fn $parser(s: &str) -> Option<Self> {
                match s {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.$accessor())
            }
        }
    };
}

vocabulary! {
    /// A `{{TOKEN}}` a stamped template may carry.
    Placeholder, token, from_token {
        ProjectName => "PROJECT_NAME",
        ProjectDescription => "PROJECT_DESCRIPTION",
        BusinessContext => "BUSINESS_CONTEXT",
        Branching => "BRANCHING",
        BackendStack => "BACKEND_STACK",
        Database => "DATABASE",
        Orm => "ORM",
        FrontendStack => "FRONTEND_STACK",
        BackendPort => "BACKEND_PORT",
        DatabasePort => "DATABASE_PORT",
        ApiBaseUrl => "API_BASE_URL",
        FrontendPort => "FRONTEND_PORT",
        FrontendHosting => "FRONTEND_HOSTING",
        BackendHosting => "BACKEND_HOSTING",
        DatabaseHosting => "DATABASE_HOSTING",
        DataModelPath => "DATA_MODEL_PATH",
        DatabaseEnvVar => "DATABASE_ENV_VAR",
        DatabaseUrl => "DATABASE_URL",
        AutonomyLevel => "AUTONOMY_LEVEL",
        AutonomyName => "AUTONOMY_NAME",
        SprintStart => "SPRINT_START",
        SprintEnd => "SPRINT_END",
        ProjectTree => "PROJECT_TREE",
        BackendPatterns => "BACKEND_PATTERNS",
        FrontendPatterns => "FRONTEND_PATTERNS",
        BackendGlobs => "BACKEND_GLOBS",
        FrontendGlobs => "FRONTEND_GLOBS",
    }
}

vocabulary! {
    /// A named block a stamped template may carry.
    Section, name, from_name {
        ProjectInformation => "project-information",
        DataModel => "data-model",
        Backend => "backend",
        Frontend => "frontend",
        RetrofitTesting => "retrofit-testing",
        WorkspaceInstall => "workspace-install",
        StackNotice => "stack-notice",
        BackendTechStack => "backend-tech-stack",
        BackendArchitecture => "backend-architecture",
        DatabasePatterns => "database-patterns",
        QuerySafety => "query-safety",
        QueryEfficiency => "query-efficiency",
        FrontendTechStack => "frontend-tech-stack",
        FrontendStructure => "frontend-structure",
    }
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// What a token resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    /// Remove every line that carries the token.
    Omit,
}

/// What a section resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionAction {
    Keep,
    Drop,
    /// Emit this text instead of the section body.
    Replace(String),
}

impl SectionAction {
    pub fn keep_if(condition: bool) -> Self {
        if condition { Self::Keep } else { Self::Drop }
    }
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content: String,
    /// Markers left verbatim, in first-seen order.
    pub unresolved: Vec<String>,
}

/// Token and section names found in a template, resolved or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markers {
    pub tokens: BTreeSet<String>,
    pub sections: BTreeSet<String>,
}

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z][A-Z0-9_]*)\}\}").expect("token regex is valid"));

static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:<!--|#)\s*sdd:(begin|end)\s+([a-z0-9-]+)\s*(?:-->)?\s*$")
        .expect("section marker regex is valid")
});

/// List every marker a template uses.
pub fn markers(template: &str) -> Markers {
    let mut found = Markers::default();
    for line in template.lines() {
        if let Some(caps) = SECTION_MARKER.captures(line) {
            found.sections.insert(caps[2].to_string());
            continue;
        }
        for caps in TOKEN.captures_iter(line) {
            found.tokens.insert(caps[1].to_string());
        }
    }
    found
}

/// Values for every token and section one materialization run knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<Placeholder, Value>,
    sections: BTreeMap<Section, SectionAction>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, placeholder: Placeholder, value: Value) -> &mut Self {
        self.values.insert(placeholder, value);
        self
    }

    pub fn text(&mut self, placeholder: Placeholder, text: impl Into<String>) -> &mut Self {
        self.set(placeholder, Value::Text(text.into()))
    }

    pub fn omit(&mut self, placeholder: Placeholder) -> &mut Self {
        self.set(placeholder, Value::Omit)
    }

    /// Text when present, otherwise omit the line.
    pub fn text_or_omit(&mut self, placeholder: Placeholder, text: Option<String>) -> &mut Self {
        match text {
            Some(t) => self.text(placeholder, t),
            None => self.omit(placeholder),
        }
    }

    pub fn section(&mut self, section: Section, action: SectionAction) -> &mut Self {
        self.sections.insert(section, action);
        self
    }

    pub fn value(&self, placeholder: Placeholder) -> Option<&Value> {
        self.values.get(&placeholder)
    }

    pub fn action(&self, section: Section) -> Option<&SectionAction> {
        self.sections.get(&section)
    }

    /// Render one template.
    ///
    /// Unknown or unset markers never fail the render: they are left in place
    /// and listed in [`Rendered::unresolved`]. An unset section is kept.
    pub fn render(&self, template: &str) -> Rendered {
        let mut out = Renderer {
            ctx: self,
            content: String::with_capacity(template.len()),
            unresolved: Vec::new(),
        };
        let mut open: Option<OpenSection<'_>> = None;

        for line in template.split_inclusive('\n') {
            let marker = SECTION_MARKER.captures(line.trim_end_matches(['\n', '\r']));

            match (marker, open.take()) {
                (Some(caps), None) if &caps[1] == "begin" => {
                    let name = caps.get(2).map_or("", |m| m.as_str());
                    match Section::from_name(name) {
                        Some(section) => {
                            open = Some(OpenSection {
                                section,
                                begin: line,
                                body: Vec::new(),
                            });
                        }
                        None => {
                            out.report(format!("section {name}"));
                            out.emit(line);
                        }
                    }
                }
                (Some(caps), None) => {
                    out.report(format!("unmatched end marker {}", &caps[2]));
                    out.content.push_str(line);
                }
                (Some(caps), Some(section)) if &caps[1] == "end" && &caps[2] == section.section.name() => {
                    out.close(section, line);
                }
                (Some(caps), Some(mut section)) => {
                    out.report(format!(
                        "marker {} {} inside section {}",
                        &caps[1], &caps[2], section.section
                    ));
                    section.body.push(line);
                    open = Some(section);
                }
                (None, Some(mut section)) => {
                    section.body.push(line);
                    open = Some(section);
                }
                (None, None) => out.emit(line),
            }
        }

        if let Some(section) = open {
            out.report(format!("unterminated section {}", section.section));
            out.content.push_str(section.begin);
            for line in section.body {
                out.content.push_str(line);
            }
        }

        Rendered {
            content: out.content,
            unresolved: out.unresolved,
        }
    }
}

struct OpenSection<'t> {
    section: Section,
    begin: &'t str,
    body: Vec<&'t str>,
}

struct Renderer<'c> {
    ctx: &'c RenderContext,
    content: String,
    unresolved: Vec<String>,
}

impl Renderer<'_> {
    fn report(&mut self, what: String) {
        if !self.unresolved.contains(&what) {
            self.unresolved.push(what);
        }
    }

    fn close(&mut self, open: OpenSection<'_>, end: &str) {
        let ctx = self.ctx;
        match ctx.action(open.section) {
            Some(SectionAction::Keep) => {
                for line in open.body {
                    self.emit(line);
                }
            }
            Some(SectionAction::Drop) => {}
            Some(SectionAction::Replace(text)) => {
                self.content.push_str(text);
                if !text.is_empty() && !text.ends_with('\n') && end.ends_with('\n') {
                    self.content.push('\n');
                }
            }
            None => {
                self.report(format!("section {}", open.section));
                for line in open.body {
                    self.emit(line);
                }
            }
        }
    }

    /// Substitute tokens in one line, or drop it if any token omits.
    fn emit(&mut self, line: &str) {
        let ctx = self.ctx;
        let mut rendered = String::with_capacity(line.len());
        let mut last = 0;

        for caps in TOKEN.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            let name = &caps[1];
            rendered.push_str(&line[last..whole.start()]);
            last = whole.end();

            match Placeholder::from_token(name).and_then(|p| ctx.value(p)) {
                Some(Value::Text(text)) => rendered.push_str(text),
                Some(Value::Omit) => return,
                None => {
                    self.report(format!("{{{{{name}}}}}"));
                    rendered.push_str(whole.as_str());
                }
            }
        }

        rendered.push_str(&line[last..]);
        self.content.push_str(&rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderContext {
        let mut ctx = RenderContext::new();
        ctx.text(Placeholder::ProjectName, "acme")
            .omit(Placeholder::Orm)
            .section(Section::Backend, SectionAction::Keep)
            .section(Section::Frontend, SectionAction::Drop)
            .section(
                Section::StackNotice,
                SectionAction::Replace("<!-- review me -->".into()),
            );
        ctx
    }

    #[test]
    fn tokens_are_substituted() {
        let out = ctx().render("# {{PROJECT_NAME}}\n- **Name**: {{PROJECT_NAME}}\n");
        assert_eq!(out.content, "# acme\n- **Name**: acme\n");
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn omitted_token_removes_its_line() {
        let out = ctx().render("a\n- **ORM**: {{ORM}}\nb\n");
        assert_eq!(out.content, "a\nb\n");
    }

    #[test]
    fn sections_keep_drop_and_replace() {
        let template = "\
top
<!-- sdd:begin backend -->
- **Backend**: {{PROJECT_NAME}}
<!-- sdd:end backend -->
<!-- sdd:begin frontend -->
- **Frontend**: x
<!-- sdd:end frontend -->
<!-- sdd:begin stack-notice -->
<!-- defaults -->
<!-- sdd:end stack-notice -->
bottom
";
        let out = ctx().render(template);
        assert_eq!(
            out.content,
            "top\n- **Backend**: acme\n<!-- review me -->\nbottom\n"
        );
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn hash_comment_markers() {
        let template = "# sdd:begin frontend\nNEXT_PUBLIC_API_URL=x\n# sdd:end frontend\n# sdd:begin backend\nPORT=1\n# sdd:end backend\n";
        assert_eq!(ctx().render(template).content, "PORT=1\n");
    }

    #[test]
    fn unknown_and_unset_markers_are_reported_and_left_in_place() {
        let template = "{{NOPE}} {{BRANCHING}}\n<!-- sdd:begin mystery -->\nx\n<!-- sdd:end mystery -->\n";
        let out = ctx().render(template);
        assert!(out.content.contains("{{NOPE}} {{BRANCHING}}"));
        assert!(out.content.contains("<!-- sdd:begin mystery -->"));
        assert_eq!(
            out.unresolved,
            vec![
                "{{NOPE}}".to_string(),
                "{{BRANCHING}}".to_string(),
                "section mystery".to_string(),
                "unmatched end marker mystery".to_string(),
            ]
        );
    }

    #[test]
    fn unset_section_is_kept_and_reported() {
        let out = ctx().render("<!-- sdd:begin data-model -->\n## Data Model\n<!-- sdd:end data-model -->\n");
        assert_eq!(out.content, "## Data Model\n");
        assert_eq!(out.unresolved, vec!["section data-model".to_string()]);
    }

    #[test]
    fn unterminated_section_is_emitted_verbatim() {
        let template = "<!-- sdd:begin backend -->\n{{PROJECT_NAME}}\n";
        let out = ctx().render(template);
        assert_eq!(out.content, template);
        assert_eq!(out.unresolved, vec!["unterminated section backend".to_string()]);
    }

    #[test]
    fn lowercase_tool_syntax_is_not_a_token() {
        let out = ctx().render("prompt = \"{{args}}\"\n");
        assert_eq!(out.content, "prompt = \"{{args}}\"\n");
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn content_without_trailing_newline_is_preserved() {
        assert_eq!(ctx().render("{{PROJECT_NAME}}").content, "acme");
    }

    #[test]
    fn markers_lists_tokens_and_sections() {
        let found = markers("{{PROJECT_NAME}}\n# sdd:begin backend\n{{ORM}}\n# sdd:end backend\n");
        assert!(found.tokens.contains("PROJECT_NAME"));
        assert!(found.tokens.contains("ORM"));
        assert_eq!(found.sections.len(), 1);
    }

    #[test]
    fn vocabulary_round_trips() {
        for p in Placeholder::ALL {
            assert_eq!(Placeholder::from_token(p.token()), Some(*p));
        }
        for s in Section::ALL {
            assert_eq!(Section::from_name(s.name()), Some(*s));
        }
    }
}
