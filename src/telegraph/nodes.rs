//! HTML to Telegraph's `Node` content format.
//!
//! Telegraph accepts a small tag set. Headings are folded into the two sizes it
//! supports, other unknown tags are dropped but keep their children, and only
//! `href`/`src` survive as attributes.

use std::collections::BTreeMap;

use serde::Serialize;

const ALLOWED: &[&str] = &[
    "a", "aside", "b", "blockquote", "br", "code", "em", "figcaption", "figure", "h3", "h4", "hr",
    "i", "iframe", "img", "li", "ol", "p", "pre", "s", "strong", "u", "ul", "video",
];
const VOID: &[&str] = &["br", "hr", "img", "input", "meta", "link", "source", "wbr"];
const KEPT_ATTRS: &[&str] = &["href", "src"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

fn telegraph_tag(tag: &str) -> Option<&str> {
    match tag {
        "h1" | "h2" => Some("h3"),
        "h5" | "h6" => Some("h4"),
        "strike" | "del" => Some("s"),
        "ins" => Some("u"),
        tag if ALLOWED.contains(&tag) => Some(tag),
        _ => None,
    }
}

/// An open tag while parsing. `element` is `None` for tags being unwrapped.
struct Frame {
    source_tag: String,
    element: Option<Element>,
    children: Vec<Node>,
}

impl Frame {
    fn close(self) -> Vec<Node> {
        match self.element {
            Some(mut element) => {
                element.children = self.children;
                vec![Node::Element(element)]
            }
            None => self.children,
        }
    }
}

fn push_text(children: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    let text = decode_entities(text);
    match children.last_mut() {
        Some(Node::Text(previous)) => previous.push_str(&text),
        _ => children.push(Node::Text(text)),
    }
}

pub fn html_to_nodes(html: &str) -> Vec<Node> {
    let mut stack = vec![Frame {
        source_tag: String::new(),
        element: None,
        children: Vec::new(),
    }];
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        let (text, tail) = rest.split_at(open);
        push_text(&mut current(&mut stack).children, text);

        if let Some(comment) = tail.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }
        let Some(close) = tail.find('>') else {
            push_text(&mut current(&mut stack).children, tail);
            rest = "";
            break;
        };
        let inner = &tail[1..close];
        rest = &tail[close + 1..];

        if let Some(name) = inner.strip_prefix('/') {
            close_tag(&mut stack, &name.trim().to_ascii_lowercase());
        } else if !inner.starts_with('!') && !inner.starts_with('?') {
            open_tag(&mut stack, inner);
        }
    }
    push_text(&mut current(&mut stack).children, rest);

    while stack.len() > 1 {
        fold_top(&mut stack);
    }
    stack.pop().map(|root| root.children).unwrap_or_default()
}

fn current(stack: &mut [Frame]) -> &mut Frame {
    // The root frame is never popped while parsing.
    let last = stack.len() - 1;
    &mut stack[last]
}

fn fold_top(stack: &mut Vec<Frame>) {
    if let Some(frame) = stack.pop() {
        let nodes = frame.close();
        current(stack).children.extend(nodes);
    }
}

fn close_tag(stack: &mut Vec<Frame>, name: &str) {
    // Ignore stray closers; otherwise close everything opened after the match.
    let Some(position) = stack.iter().skip(1).rposition(|f| f.source_tag == name) else {
        return;
    };
    while stack.len() > position + 1 {
        fold_top(stack);
    }
}

fn open_tag(stack: &mut Vec<Frame>, inner: &str) {
    let self_closing = inner.trim_end().ends_with('/');
    let inner = inner.trim_end().trim_end_matches('/');
    let name_end = inner
        .find(|c: char| c.is_whitespace())
        .unwrap_or(inner.len());
    let source_tag = inner[..name_end].to_ascii_lowercase();
    if source_tag.is_empty() {
        return;
    }

    let element = telegraph_tag(&source_tag).map(|tag| {
        let mut element = Element::new(tag);
        element.attrs = parse_attrs(&inner[name_end..])
            .into_iter()
            .filter(|(name, _)| KEPT_ATTRS.contains(&name.as_str()))
            .collect();
        element
    });

    if self_closing || VOID.contains(&source_tag.as_str()) {
        if let Some(element) = element {
            current(stack).children.push(Node::Element(element));
        }
        return;
    }
    stack.push(Frame {
        source_tag,
        element,
        children: Vec::new(),
    });
}

fn parse_attrs(source: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = source.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let mut name = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
            name.push(c);
        }
        if name.is_empty() {
            if chars.next().is_none() {
                break;
            }
            continue;
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let mut value = String::new();
        if chars.next_if_eq(&'=').is_some() {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            match chars.next_if(|c| *c == '"' || *c == '\'') {
                Some(quote) => {
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                }
                None => {
                    while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                        value.push(c);
                    }
                }
            }
        }
        attrs.push((name.to_ascii_lowercase(), decode_entities(&value)));
    }
    attrs
}

/// Decodes the named entities AniList descriptions use plus numeric ones.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&end| end <= 10).and_then(|end| {
            let entity = &tail[1..end];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, end))
        });

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
