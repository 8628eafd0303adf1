//! The analysis driver: one entry point per analysis surface.
//!
//! `Engine::check_declaration` runs every documentation rule over a single
//! declaration's comment, in a fixed group order with cancellation
//! checkpoints between groups. Cancellation aborts the whole call; partial
//! findings are never returned.

use crate::config::Config;
use crate::markup::{sections, MarkupNode, Span};

use super::blocks::{self, BlockToggles};
use super::cancel::{CancelToken, Cancelled};
use super::decl::{DeclarationContext, DocumentationComment, IncludeResolver};
use super::duplicate;
use super::elements;
use super::header;
use super::messages;
use super::params::{self, ParamKind};
use super::types::{Finding, Rule};

pub struct Engine {
    config: Config,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render a finding's message in the configured culture.
    pub fn render_message(&self, finding: &Finding) -> String {
        messages::render(&self.config.culture, finding.rule, &finding.args)
    }

    /// Run all declaration-level documentation rules.
    ///
    /// Include references are expanded first; an unresolvable reference
    /// silently skips the declaration. After expansion, `<inheritdoc>` or
    /// `<exclude>` anywhere in the content suppresses all rules.
    pub fn check_declaration(
        &self,
        decl: &DeclarationContext,
        doc: &DocumentationComment,
        resolver: &dyn IncludeResolver,
        cancel: &CancelToken,
    ) -> Result<Vec<Finding>, Cancelled> {
        cancel.check()?;

        let content = match self.expand(decl, doc, resolver) {
            Some(content) => content,
            None => return Ok(Vec::new()),
        };

        if sections::contains_tag_deep(&content, "inheritdoc")
            || sections::contains_tag_deep(&content, "exclude")
        {
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();

        let toggles = BlockToggles {
            block_content_required: self.config.is_enabled(Rule::BlockContentRequired),
            mixed_block_inline: self.config.is_enabled(Rule::MixedBlockInline),
            sibling_block_mismatch: self.config.is_enabled(Rule::SiblingBlockMismatch),
        };
        findings.extend(blocks::analyze(&content, &toggles));
        cancel.check()?;

        for kind in [ParamKind::Parameter, ParamKind::TypeParameter] {
            let entries = params::extract_entries(&content, kind);
            findings.extend(params::check_missing_names(&entries, kind));
            let declared = match kind {
                ParamKind::Parameter => &decl.parameters,
                ParamKind::TypeParameter => &decl.type_parameters,
            };
            findings.extend(params::reconcile(declared, &entries, kind));
        }
        cancel.check()?;

        findings.extend(elements::check_summary(&content, decl));
        findings.extend(elements::check_returns(&content, decl));
        findings.extend(elements::check_value(&content, decl));
        findings.extend(elements::check_property_summary(&content, decl));
        findings.extend(elements::check_punctuation(
            &content,
            &self.config.punctuation_exempt_tags,
        ));
        cancel.check()?;

        findings.extend(duplicate::check(&content, &self.config.placeholder_text));

        findings.retain(|f| self.config.is_enabled(f.rule));
        Ok(findings)
    }

    /// Run the file header checks over a source file's text.
    pub fn check_header(&self, source: &str, file_name: &str) -> Vec<Finding> {
        header::validate(source, file_name, &self.config)
    }

    /// Check the file name against the first top-level type declared in it.
    pub fn check_file_name(&self, file_name: &str, decl: &DeclarationContext) -> Vec<Finding> {
        if !self.config.is_enabled(Rule::FileNameMismatch) {
            return Vec::new();
        }
        let stem = file_name.strip_suffix(".cs").unwrap_or(file_name);
        let matches = match self.config.file_naming {
            crate::config::FileNaming::Stem => stem == decl.name,
            crate::config::FileNaming::AllowSuffix => {
                stem == decl.name
                    || stem
                        .strip_prefix(decl.name.as_str())
                        .map_or(false, |rest| rest.starts_with('.'))
            }
        };
        if matches {
            return Vec::new();
        }
        vec![Finding::at_spans(
            Rule::FileNameMismatch,
            decl.identifier_spans.clone(),
        )
        .with_arg(file_name)
        .with_arg(&decl.name)]
    }

    /// Expand the comment into top-level markup nodes. `None` means an
    /// include reference could not be resolved and analysis must skip.
    fn expand(
        &self,
        decl: &DeclarationContext,
        doc: &DocumentationComment,
        resolver: &dyn IncludeResolver,
    ) -> Option<Vec<MarkupNode>> {
        match doc {
            DocumentationComment::Included {
                file,
                selector,
                span,
            } => {
                let mut nodes = resolver.resolve(decl, file, selector)?;
                stamp_spans(&mut nodes, *span);
                Some(nodes)
            }
            DocumentationComment::Inline(nodes) => {
                let mut expanded = Vec::with_capacity(nodes.len());
                for node in nodes {
                    if node.prefix().is_none() && node.tag_name() == Some("include") {
                        let file = node.attribute("file").unwrap_or_default();
                        let selector = node.attribute("path").unwrap_or_default();
                        let mut resolved = resolver.resolve(decl, file, selector)?;
                        stamp_spans(&mut resolved, node.span());
                        expanded.extend(resolved);
                    } else {
                        expanded.push(node.clone());
                    }
                }
                Some(expanded)
            }
        }
    }
}

/// Overwrite every span in the expanded content with the span of the include
/// reference it came from, so findings point at the reference in the
/// analyzed file rather than at offsets in the external document.
fn stamp_spans(nodes: &mut [MarkupNode], span: Span) {
    for node in nodes {
        match node {
            MarkupNode::Text { runs } => {
                for run in runs {
                    run.span = span;
                }
            }
            MarkupNode::Element {
                span: s, children, ..
            } => {
                *s = span;
                stamp_spans(children, span);
            }
            MarkupNode::Empty { span: s, .. } => *s = span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decl::{DeclarationKind, NoIncludes, ReturnKind};
    use crate::markup::node::Attribute;

    fn section(tag: &str, text: &str) -> MarkupNode {
        MarkupNode::Element {
            name: tag.to_string(),
            prefix: None,
            attributes: Vec::new(),
            children: vec![MarkupNode::text(text, Span::new(10, 10 + text.len()))],
            span: Span::new(0, 20 + text.len()),
        }
    }

    fn method() -> DeclarationContext {
        let mut decl = DeclarationContext::new("Compute", DeclarationKind::Method);
        decl.returns = ReturnKind::NonVoid;
        decl
    }

    struct FixedResolver(Vec<MarkupNode>);

    impl IncludeResolver for FixedResolver {
        fn resolve(
            &self,
            _: &DeclarationContext,
            _: &str,
            _: &str,
        ) -> Option<Vec<MarkupNode>> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn test_full_pipeline_reports_missing_sections() {
        let engine = Engine::new(Config::default());
        let doc = DocumentationComment::Inline(vec![section("remarks", "Extra notes.")]);
        let findings = engine
            .check_declaration(&method(), &doc, &NoIncludes, &CancelToken::default())
            .unwrap();
        let rules: Vec<Rule> = findings.iter().map(|f| f.rule).collect();
        assert!(rules.contains(&Rule::SummaryMissing));
        assert!(rules.contains(&Rule::ReturnsMissing));
    }

    #[test]
    fn test_disabled_rule_is_filtered() {
        let mut config = Config::default();
        config.rules.insert("summary_missing".to_string(), false);
        let engine = Engine::new(config);
        let doc = DocumentationComment::Inline(vec![section("remarks", "Extra notes.")]);
        let findings = engine
            .check_declaration(&method(), &doc, &NoIncludes, &CancelToken::default())
            .unwrap();
        assert!(findings.iter().all(|f| f.rule != Rule::SummaryMissing));
        assert!(findings.iter().any(|f| f.rule == Rule::ReturnsMissing));
    }

    #[test]
    fn test_inheritdoc_suppresses_everything() {
        let engine = Engine::new(Config::default());
        let doc = DocumentationComment::Inline(vec![MarkupNode::Empty {
            name: "inheritdoc".to_string(),
            prefix: None,
            attributes: Vec::new(),
            span: Span::new(0, 14),
        }]);
        let findings = engine
            .check_declaration(&method(), &doc, &NoIncludes, &CancelToken::default())
            .unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unresolved_include_skips_silently() {
        let engine = Engine::new(Config::default());
        let doc = DocumentationComment::Included {
            file: "docs.xml".to_string(),
            selector: "member".to_string(),
            span: Span::new(0, 40),
        };
        let findings = engine
            .check_declaration(&method(), &doc, &NoIncludes, &CancelToken::default())
            .unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_expanded_include_is_analyzed_with_stamped_spans() {
        let engine = Engine::new(Config::default());
        let include_span = Span::new(5, 45);
        let doc = DocumentationComment::Included {
            file: "docs.xml".to_string(),
            selector: "member".to_string(),
            span: include_span,
        };
        // Expanded content is missing its summary.
        let resolver = FixedResolver(vec![section("returns", "The result.")]);
        let findings = engine
            .check_declaration(&method(), &doc, &resolver, &CancelToken::default())
            .unwrap();
        assert!(findings.iter().any(|f| f.rule == Rule::SummaryMissing));
        // Punctuation-style findings on expanded content point at the
        // include reference.
        let doc = DocumentationComment::Included {
            file: "docs.xml".to_string(),
            selector: "member".to_string(),
            span: include_span,
        };
        let resolver = FixedResolver(vec![
            section("summary", "Does things"),
            section("returns", "The result."),
        ]);
        let findings = engine
            .check_declaration(&method(), &doc, &resolver, &CancelToken::default())
            .unwrap();
        let punct = findings
            .iter()
            .find(|f| f.rule == Rule::SentencePunctuation)
            .unwrap();
        assert_eq!(punct.span(), include_span);
    }

    #[test]
    fn test_inline_include_element_expands_in_place() {
        let engine = Engine::new(Config::default());
        let include = MarkupNode::Empty {
            name: "include".to_string(),
            prefix: None,
            attributes: vec![
                Attribute::new("file", "docs.xml"),
                Attribute::new("path", "member[@name='M:Compute']/*"),
            ],
            span: Span::new(0, 50),
        };
        let doc = DocumentationComment::Inline(vec![include]);
        let resolver = FixedResolver(vec![
            section("summary", "Does things."),
            section("returns", "The result."),
        ]);
        let findings = engine
            .check_declaration(&method(), &doc, &resolver, &CancelToken::default())
            .unwrap();
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_cancellation_returns_no_findings() {
        let engine = Engine::new(Config::default());
        let cancel = CancelToken::default();
        cancel.cancel();
        let doc = DocumentationComment::Inline(vec![section("remarks", "Notes.")]);
        let result = engine.check_declaration(&method(), &doc, &NoIncludes, &cancel);
        assert!(result.is_err());
    }

    #[test]
    fn test_file_name_check_modes() {
        let decl = DeclarationContext::new("Widget", DeclarationKind::Type);

        let engine = Engine::new(Config::default());
        assert!(engine.check_file_name("Widget.cs", &decl).is_empty());
        let findings = engine.check_file_name("Widget.Designer.cs", &decl);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::FileNameMismatch);
        assert_eq!(
            findings[0].args,
            vec!["Widget.Designer.cs".to_string(), "Widget".to_string()]
        );

        let mut config = Config::default();
        config.file_naming = crate::config::FileNaming::AllowSuffix;
        let engine = Engine::new(config);
        assert!(engine.check_file_name("Widget.Designer.cs", &decl).is_empty());
        assert!(!engine.check_file_name("WidgetFactory.cs", &decl).is_empty());
    }

    #[test]
    fn test_render_message_uses_args() {
        let engine = Engine::new(Config::default());
        let finding = Finding::new(Rule::ParamUnknown, Span::at(0)).with_arg("count");
        assert!(engine.render_message(&finding).contains("'count'"));
    }
}
