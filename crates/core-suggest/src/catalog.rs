//! Static vocabularies. Order is presentation order; never mutated at runtime.

pub const MARKUP_TAGS: &[&str] = &[
    "div", "span", "p", "h1", "h2", "h3", "h4", "h5", "h6", "a", "img", "ul", "ol", "li", "table",
    "tr", "td", "th", "form", "input", "button", "textarea", "select", "option", "header",
    "footer", "section", "article", "aside", "nav", "main", "figure", "figcaption", "time",
    "mark", "code", "pre", "blockquote", "iframe", "video", "audio", "canvas",
];

pub const MARKUP_ATTRIBUTES: &[&str] = &[
    "class",
    "id",
    "style",
    "src",
    "href",
    "alt",
    "title",
    "width",
    "height",
    "target",
    "rel",
    "type",
    "value",
    "placeholder",
    "required",
    "disabled",
    "checked",
    "selected",
    "rows",
    "cols",
    "maxlength",
    "min",
    "max",
    "step",
];

pub const STYLE_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "font-size",
    "font-family",
    "font-weight",
    "text-align",
    "margin",
    "padding",
    "border",
    "width",
    "height",
    "display",
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "flex",
    "grid",
    "justify-content",
    "align-items",
    "background",
    "border-radius",
    "box-shadow",
    "opacity",
    "transition",
    "transform",
    "animation",
    "z-index",
];

pub const STYLE_VALUES: &[&str] = &[
    "red",
    "blue",
    "green",
    "black",
    "white",
    "transparent",
    "12px",
    "14px",
    "16px",
    "1em",
    "1.2em",
    "100%",
    "50%",
    "block",
    "inline",
    "inline-block",
    "flex",
    "grid",
    "none",
    "relative",
    "absolute",
    "fixed",
    "sticky",
    "center",
    "left",
    "right",
    "space-between",
    "space-around",
    "bold",
    "normal",
    "italic",
    "underline",
    "uppercase",
    "lowercase",
    "capitalize",
];

pub const SCRIPT_MEMBERS: &[&str] = &[
    "querySelector",
    "querySelectorAll",
    "addEventListener",
    "getElementById",
    "getElementsByClassName",
    "getElementsByTagName",
    "createElement",
    "appendChild",
    "removeChild",
    "classList.add",
    "classList.remove",
    "classList.toggle",
    "setAttribute",
    "getAttribute",
    "removeAttribute",
    "innerHTML",
    "textContent",
    "value",
    "style",
    "setTimeout",
    "setInterval",
    "clearTimeout",
    "clearInterval",
    "parseInt",
    "parseFloat",
    "toString",
    "toFixed",
    "split",
    "join",
    "push",
    "pop",
    "shift",
    "unshift",
    "slice",
    "splice",
    "indexOf",
    "includes",
    "forEach",
    "map",
    "filter",
    "reduce",
    "find",
    "some",
    "every",
    "sort",
    "reverse",
];

/// Members offered after a `classList.` receiver.
pub const CLASS_LIST_MEMBERS: &[&str] = &["add()", "remove()", "toggle()", "contains()"];

/// Members offered after a receiver that looks like a collection.
pub const ARRAY_MEMBERS: &[&str] = &[
    "length",
    "push()",
    "pop()",
    "shift()",
    "unshift()",
    "slice()",
    "splice()",
    "forEach()",
    "map()",
    "filter()",
];

/// Prefixes of `SCRIPT_MEMBERS` entries that make sense on a DOM node receiver.
pub const DOM_QUERY_PREFIXES: &[&str] = &["query", "getElement", "create"];
