//! Context classifier: text before the cursor + trigger char -> candidate list.
//!
//! Classification is two steps. [`detect`] picks a [`Context`] (which catalog,
//! which rendering) using first-match-wins rules per editor kind; the context
//! then renders its candidates. Nothing is parsed: every rule is a suffix or
//! substring check on the text preceding the cursor.

use crate::catalog::{
    ARRAY_MEMBERS, CLASS_LIST_MEMBERS, DOM_QUERY_PREFIXES, MARKUP_ATTRIBUTES, MARKUP_TAGS,
    SCRIPT_MEMBERS, STYLE_PROPERTIES, STYLE_VALUES,
};
use crate::{CandidateList, EditorKind, TriggerChar};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// `<` + letters with no `>` after it: an unclosed opening tag.
static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z]+[^>]*$").expect("static open-tag pattern"));

/// Property name, optional whitespace, then the colon that was just typed.
static PROPERTY_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z-]+\s*:$").expect("static property pattern"));

/// Tag name typed after the last `<`, when it consists of letters only.
static TAG_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z]*)$").expect("static tag-prefix pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifierOptions {
    /// Narrow the tag list to names starting with the letters typed after the last `<`.
    pub filter_tags_by_prefix: bool,
}

/// Which vocabulary applies at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Tag names rendered as `name>`.
    TagName,
    /// Attribute names rendered as `name=""`.
    Attribute,
    /// Style values verbatim.
    StyleValue,
    /// Style properties rendered as `name: `.
    StyleProperty,
    /// DOM query/creation members (`document.`, `element.`).
    DomQuery,
    /// `classList.` methods.
    ClassList,
    /// Style properties as assignment targets, rendered as `name = `.
    StyleAssignment,
    /// Collection members (`array.`, `items.`, anything ending in `s`).
    Collection,
    /// Full script member catalog.
    AnyMember,
    None,
}

impl Context {
    pub fn candidates(self) -> CandidateList {
        match self {
            Context::TagName => MARKUP_TAGS.iter().map(|t| format!("{t}>")).collect(),
            Context::Attribute => MARKUP_ATTRIBUTES
                .iter()
                .map(|a| format!("{a}=\"\""))
                .collect(),
            Context::StyleValue => owned(STYLE_VALUES),
            Context::StyleProperty => STYLE_PROPERTIES.iter().map(|p| format!("{p}: ")).collect(),
            Context::DomQuery => SCRIPT_MEMBERS
                .iter()
                .filter(|m| DOM_QUERY_PREFIXES.iter().any(|p| m.starts_with(p)))
                .map(|m| m.to_string())
                .collect(),
            Context::ClassList => owned(CLASS_LIST_MEMBERS),
            Context::StyleAssignment => STYLE_PROPERTIES.iter().map(|p| format!("{p} = ")).collect(),
            Context::Collection => owned(ARRAY_MEMBERS),
            Context::AnyMember => owned(SCRIPT_MEMBERS),
            Context::None => Vec::new(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Context::TagName => "tag_name",
            Context::Attribute => "attribute",
            Context::StyleValue => "style_value",
            Context::StyleProperty => "style_property",
            Context::DomQuery => "dom_query",
            Context::ClassList => "class_list",
            Context::StyleAssignment => "style_assignment",
            Context::Collection => "collection",
            Context::AnyMember => "any_member",
            Context::None => "none",
        }
    }
}

fn owned(list: &[&str]) -> CandidateList {
    list.iter().map(|s| s.to_string()).collect()
}

/// Pick the context for `text_before_cursor` (which normally ends with the trigger char).
pub fn detect(text_before_cursor: &str, trigger: TriggerChar, kind: EditorKind) -> Context {
    match (kind, trigger) {
        (EditorKind::Markup, TriggerChar::Angle) => Context::TagName,
        (EditorKind::Markup, TriggerChar::Space) if OPEN_TAG.is_match(text_before_cursor) => {
            Context::Attribute
        }
        (EditorKind::Style, TriggerChar::Colon) if PROPERTY_COLON.is_match(text_before_cursor) => {
            Context::StyleValue
        }
        (EditorKind::Style, TriggerChar::Space) if !text_before_cursor.trim().ends_with('{') => {
            Context::StyleProperty
        }
        (EditorKind::Script, TriggerChar::Dot) => member_context(receiver_name(text_before_cursor)),
        _ => Context::None,
    }
}

fn member_context(receiver: &str) -> Context {
    match receiver {
        "document" | "element" => Context::DomQuery,
        "classList" => Context::ClassList,
        "style" => Context::StyleAssignment,
        "array" | "items" => Context::Collection,
        r if r.ends_with('s') => Context::Collection,
        _ => Context::AnyMember,
    }
}

/// Identifier immediately before the last `.`: the second-to-last dot segment, cut at the last
/// whitespace, `;`, `,`, `(` or `)`. Empty when the text holds no dot.
pub fn receiver_name(text: &str) -> &str {
    let mut segments = text.rsplit('.');
    segments.next();
    let Some(before_dot) = segments.next() else {
        return "";
    };
    before_dot
        .rsplit(|c: char| c.is_whitespace() || matches!(c, ';' | ',' | '(' | ')'))
        .next()
        .unwrap_or("")
}

/// Classify with default options (no tag prefix filtering).
pub fn classify(text_before_cursor: &str, trigger: TriggerChar, kind: EditorKind) -> CandidateList {
    classify_with(
        text_before_cursor,
        trigger,
        kind,
        &ClassifierOptions::default(),
    )
}

pub fn classify_with(
    text_before_cursor: &str,
    trigger: TriggerChar,
    kind: EditorKind,
    opts: &ClassifierOptions,
) -> CandidateList {
    let context = detect(text_before_cursor, trigger, kind);
    let mut list = context.candidates();
    if context == Context::TagName
        && opts.filter_tags_by_prefix
        && let Some(prefix) = TAG_PREFIX
            .captures(text_before_cursor)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
        && !prefix.is_empty()
    {
        list.retain(|tag| tag.starts_with(prefix));
    }
    debug!(
        target: "suggest.classify",
        kind = kind.label(),
        trigger = %trigger,
        context = context.as_str(),
        count = list.len(),
        "classified"
    );
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn angle_returns_every_tag_with_closing_bracket() {
        let list = classify("<", TriggerChar::Angle, EditorKind::Markup);
        assert_eq!(list.len(), MARKUP_TAGS.len());
        assert_eq!(list[0], "div>");
        assert!(list.iter().all(|t| t.ends_with('>')));
    }

    #[test]
    fn angle_ignores_typed_prefix_by_default() {
        let list = classify("<di", TriggerChar::Angle, EditorKind::Markup);
        assert!(list.contains(&"div>".to_string()));
        assert!(list.contains(&"span>".to_string()));
    }

    #[test]
    fn prefix_filter_narrows_tags_when_enabled() {
        let opts = ClassifierOptions {
            filter_tags_by_prefix: true,
        };
        let list = classify_with("<p><fi", TriggerChar::Angle, EditorKind::Markup, &opts);
        assert_eq!(list, vec!["figure>".to_string(), "figcaption>".to_string()]);
        let all = classify_with("<", TriggerChar::Angle, EditorKind::Markup, &opts);
        assert_eq!(all.len(), MARKUP_TAGS.len());
    }

    #[test]
    fn space_inside_open_tag_offers_attributes() {
        let list = classify("<div ", TriggerChar::Space, EditorKind::Markup);
        assert_eq!(list.first().map(String::as_str), Some("class=\"\""));
        assert_eq!(list.len(), MARKUP_ATTRIBUTES.len());
    }

    #[test]
    fn space_after_closed_tag_offers_nothing() {
        assert!(classify("<div> ", TriggerChar::Space, EditorKind::Markup).is_empty());
        assert!(classify("hello ", TriggerChar::Space, EditorKind::Markup).is_empty());
        assert!(classify("< ", TriggerChar::Space, EditorKind::Markup).is_empty());
    }

    #[test]
    fn colon_after_property_offers_values() {
        let list = classify("p {\n  color:", TriggerChar::Colon, EditorKind::Style);
        for known in ["red", "50%", "bold"] {
            assert!(list.contains(&known.to_string()), "missing {known}");
        }
        assert_eq!(list.len(), STYLE_VALUES.len());
        let spaced = classify("margin  :", TriggerChar::Colon, EditorKind::Style);
        assert_eq!(spaced.len(), STYLE_VALUES.len());
    }

    #[test]
    fn colon_without_property_offers_nothing() {
        assert!(classify(":", TriggerChar::Colon, EditorKind::Style).is_empty());
        assert!(classify("a { 12:", TriggerChar::Colon, EditorKind::Style).is_empty());
    }

    #[test]
    fn space_in_fresh_block_offers_nothing() {
        assert!(classify("body { ", TriggerChar::Space, EditorKind::Style).is_empty());
        let props = classify("body { color: red; ", TriggerChar::Space, EditorKind::Style);
        assert_eq!(props[0], "color: ");
        assert_eq!(props.len(), STYLE_PROPERTIES.len());
    }

    #[test]
    fn document_receiver_limits_to_dom_queries() {
        let list = classify("document.", TriggerChar::Dot, EditorKind::Script);
        assert!(!list.is_empty());
        assert!(list.iter().all(|m| {
            m.starts_with("query") || m.starts_with("getElement") || m.starts_with("create")
        }));
        assert!(!list.contains(&"addEventListener".to_string()));
    }

    #[test]
    fn receiver_dispatch() {
        let class_list = classify("el.classList.", TriggerChar::Dot, EditorKind::Script);
        assert_eq!(class_list, vec!["add()", "remove()", "toggle()", "contains()"]);

        let style = classify("box.style.", TriggerChar::Dot, EditorKind::Script);
        assert_eq!(style[0], "color = ");

        let items = classify("for (x of users.", TriggerChar::Dot, EditorKind::Script);
        assert_eq!(items[0], "length");
        assert_eq!(items.len(), ARRAY_MEMBERS.len());

        let other = classify("const n = foo.", TriggerChar::Dot, EditorKind::Script);
        assert_eq!(other.len(), SCRIPT_MEMBERS.len());
    }

    #[test]
    fn receiver_name_extraction() {
        assert_eq!(receiver_name("document."), "document");
        assert_eq!(receiver_name("x = f(list."), "list");
        assert_eq!(receiver_name("a;b,items."), "items");
        assert_eq!(receiver_name("a.b.c."), "c");
        assert_eq!(receiver_name("no dot"), "");
        assert_eq!(receiver_name("(."), "");
    }

    #[test]
    fn mismatched_editor_and_trigger_is_empty() {
        assert!(classify("<", TriggerChar::Angle, EditorKind::Style).is_empty());
        assert!(classify("a.", TriggerChar::Dot, EditorKind::Markup).is_empty());
        assert!(classify("a:", TriggerChar::Colon, EditorKind::Script).is_empty());
    }
}
