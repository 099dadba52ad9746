//! Abstract syntax tree produced by the parser.
//!
//! Every [`Node`] carries byte offsets into the document it was parsed from.
//! Nodes parsed from a container directive's body are shifted so their
//! offsets are relative to the outer document as well.

mod anchor;
mod attributes;
mod directive;
mod link;
mod verbatim;

use std::fmt::{self, Write};
use std::slice;

pub use anchor::{AnchorLinkSuperNode, slugify, wrap_in_anchor};
pub use attributes::{CLASS_KEY, DirectiveAttributes, IDENTIFIER_KEY};
pub use directive::{DirectiveNode, Format, Source};
pub use link::{ActiveLinkNode, ClassyLinkNode};
pub use verbatim::VerbatimGroupNode;

/// A node with its source span.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    /// Byte offset where the node starts.
    pub start: usize,
    /// Byte offset just past the node's end.
    pub end: usize,
    /// What the node is.
    pub kind: NodeKind,
}

/// Node variants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    /// Document root.
    Root(Vec<Node>),
    /// Generic grouping of nodes.
    Super(Vec<Node>),
    /// Paragraph.
    Para(Vec<Node>),
    /// ATX header.
    Header { level: u8, children: Vec<Node> },
    /// Plain text.
    Text(String),
    /// Text from an escape sequence.
    SpecialText(String),
    /// Code span.
    Code(String),
    /// Emphasis.
    Emph(Vec<Node>),
    /// Strong emphasis.
    Strong(Vec<Node>),
    /// Explicit link `[text](href)`.
    Link { href: String, children: Vec<Node> },
    /// Fenced code block.
    Verbatim(VerbatimGroupNode),
    /// Directive of any form.
    Directive(DirectiveNode),
    /// Anchor wrapping a header's children.
    AnchorLink(AnchorLinkSuperNode),
    /// Link to the active page.
    ActiveLink(ActiveLinkNode),
    /// Link with a class attribute.
    ClassyLink(ClassyLinkNode),
}

impl Node {
    #[must_use]
    pub fn new(start: usize, end: usize, kind: NodeKind) -> Self {
        Self { start, end, kind }
    }

    /// Child nodes, in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Root(children)
            | NodeKind::Super(children)
            | NodeKind::Para(children)
            | NodeKind::Emph(children)
            | NodeKind::Strong(children)
            | NodeKind::Header { children, .. }
            | NodeKind::Link { children, .. } => children,
            NodeKind::Directive(directive) => slice::from_ref(&*directive.contents_node),
            NodeKind::AnchorLink(anchor) => slice::from_ref(&*anchor.contents),
            NodeKind::ActiveLink(link) => slice::from_ref(&*link.child),
            NodeKind::ClassyLink(link) => slice::from_ref(&*link.child),
            NodeKind::Text(_)
            | NodeKind::SpecialText(_)
            | NodeKind::Code(_)
            | NodeKind::Verbatim(_) => &[],
        }
    }

    fn children_mut(&mut self) -> &mut [Node] {
        match &mut self.kind {
            NodeKind::Root(children)
            | NodeKind::Super(children)
            | NodeKind::Para(children)
            | NodeKind::Emph(children)
            | NodeKind::Strong(children)
            | NodeKind::Header { children, .. }
            | NodeKind::Link { children, .. } => children,
            NodeKind::Directive(directive) => slice::from_mut(&mut *directive.contents_node),
            NodeKind::AnchorLink(anchor) => slice::from_mut(&mut *anchor.contents),
            NodeKind::ActiveLink(link) => slice::from_mut(&mut *link.child),
            NodeKind::ClassyLink(link) => slice::from_mut(&mut *link.child),
            NodeKind::Text(_)
            | NodeKind::SpecialText(_)
            | NodeKind::Code(_)
            | NodeKind::Verbatim(_) => &mut [],
        }
    }

    /// Text carried by text-bearing nodes (text, special text, code).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::SpecialText(text) | NodeKind::Code(text) => {
                Some(text)
            }
            _ => None,
        }
    }

    /// The directive carried by this node, if it is one.
    #[must_use]
    pub fn as_directive(&self) -> Option<&DirectiveNode> {
        match &self.kind {
            NodeKind::Directive(directive) => Some(directive),
            _ => None,
        }
    }

    /// Translate this node and all of its descendants by `delta` bytes.
    pub fn shift_indices(&mut self, delta: usize) {
        self.start += delta;
        self.end += delta;
        for child in self.children_mut() {
            child.shift_indices(delta);
        }
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }

    /// Render the tree as indented text, one node per line.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let _ = writeln!(out, "{:indent$}{self}", "", indent = depth * 2);
        for child in self.children() {
            child.dump_into(out, depth + 1);
        }
    }

    fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Root(_) => "Root",
            NodeKind::Super(_) => "Super",
            NodeKind::Para(_) => "Para",
            NodeKind::Header { .. } => "Header",
            NodeKind::Text(_) => "Text",
            NodeKind::SpecialText(_) => "SpecialText",
            NodeKind::Code(_) => "Code",
            NodeKind::Emph(_) => "Emph",
            NodeKind::Strong(_) => "Strong",
            NodeKind::Link { .. } => "Link",
            NodeKind::Verbatim(_) => "VerbatimGroup",
            NodeKind::Directive(_) => "Directive",
            NodeKind::AnchorLink(_) => "AnchorLink",
            NodeKind::ActiveLink(_) => "ActiveLink",
            NodeKind::ClassyLink(_) => "ClassyLink",
        }
    }
}

/// One-line description: kind, span and node-specific detail.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}-{}]", self.kind_name(), self.start, self.end)?;
        match &self.kind {
            NodeKind::Header { level, .. } => write!(f, " h{level}"),
            NodeKind::Text(text) | NodeKind::SpecialText(text) | NodeKind::Code(text) => {
                write!(f, " '{}'", text.escape_debug())
            }
            NodeKind::Link { href, .. } | NodeKind::ActiveLink(ActiveLinkNode { href, .. }) => {
                write!(f, " '{href}'")
            }
            NodeKind::ClassyLink(link) => {
                write!(f, " '{}'", link.href)?;
                match &link.class_attribute {
                    Some(class) => write!(f, " class='{class}'"),
                    None => Ok(()),
                }
            }
            NodeKind::Verbatim(verbatim) => {
                if !verbatim.lang().is_empty() {
                    write!(f, " {}", verbatim.lang())?;
                }
                if !verbatim.group().is_empty() {
                    write!(f, " group='{}'", verbatim.group())?;
                }
                write!(f, " '{}'", verbatim.text().escape_debug())
            }
            NodeKind::Directive(directive) => write!(f, " {directive}"),
            NodeKind::AnchorLink(anchor) => write!(f, " '{}'", anchor.name),
            NodeKind::Root(_)
            | NodeKind::Super(_)
            | NodeKind::Para(_)
            | NodeKind::Emph(_)
            | NodeKind::Strong(_) => Ok(()),
        }
    }
}
