//! Arena-allocated syntax tree.
//!
//! No boxed recursion: nodes live in one contiguous array and refer to
//! children by [`NodeId`]; child lists are flattened into a side array
//! addressed by [`NodeRange`]. The tree is append-only during parsing and
//! immutable afterwards.

use crate::{BinaryOp, Name, UnaryOp};

/// Index of a node in its [`SyntaxTree`].
///
/// Ids are only meaningful against the tree that produced them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Contiguous run of child ids in the tree's child list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct NodeRange {
    pub start: u32,
    pub len: u16,
}

impl NodeRange {
    pub const EMPTY: Self = Self { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        Self { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl std::fmt::Debug for NodeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NodeRange({}..{})",
            self.start,
            self.start + u32::from(self.len)
        )
    }
}

/// Closed set of node kinds.
///
/// Terminal kinds memoize their payload at parse time (numerics parse
/// their text once, strings and identifiers intern once); composite kinds
/// hold child ids or ranges.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum NodeKind {
    // Terminals
    Nil,
    Bool(bool),
    Number(f64),
    Str(Name),
    Ident(Name),

    // Expressions
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Assign {
        target: NodeId,
        value: NodeId,
    },
    Member {
        object: NodeId,
        field: Name,
    },
    Call {
        callee: NodeId,
        args: NodeRange,
    },
    Index {
        object: NodeId,
        index: NodeId,
    },
    Elements {
        items: NodeRange,
    },
    /// `fn` expression or declaration; `params` is a range of `Ident`
    /// nodes. A named function also binds itself where it is evaluated.
    Function {
        name: Option<Name>,
        params: NodeRange,
        body: NodeId,
    },

    // Statements
    If {
        cond: NodeId,
        then_block: NodeId,
        else_branch: Option<NodeId>,
    },
    While {
        cond: NodeId,
        body: NodeId,
    },
    Return {
        value: Option<NodeId>,
    },
    Block {
        body: NodeRange,
    },
    Class {
        name: Name,
        base: Option<Name>,
        body: NodeId,
    },
    ClassBody {
        members: NodeRange,
    },
    Program {
        body: NodeRange,
    },
}

/// One tree node: its kind plus the 1-based line it started on.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub line: u32,
}

/// The arena holding one parsed program.
///
/// Invariant: every `NodeId`/`NodeRange` stored in a node was produced by
/// this tree's `push`/`push_list`, so accessors index directly.
#[derive(Default, Debug)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    children: Vec<NodeId>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for an estimated node count.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            children: Vec::new(),
            root: NodeId(0),
        }
    }

    /// Allocate a node, returning its id.
    pub fn push(&mut self, kind: NodeKind, line: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, line });
        id
    }

    /// Flatten a child list into the side array.
    pub fn push_list(&mut self, ids: &[NodeId]) -> NodeRange {
        let start = self.children.len() as u32;
        self.children.extend_from_slice(ids);
        NodeRange::new(start, ids.len() as u16)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn line(&self, id: NodeId) -> u32 {
        self.nodes[id.index()].line
    }

    /// Resolve a range to its child ids.
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        let start = range.start as usize;
        self.children.get(start..start + range.len()).unwrap_or(&[])
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = id;
    }

    /// The program node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
