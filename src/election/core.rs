use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type alias for ring position indices (0..N-1, fixed at initialization)
pub type NodeId = usize;

/// Type alias for node identities (distinct positive integers supplied by the caller)
pub type Identity = u64;

/// Smallest ring the simulator accepts
pub const MIN_RING_SIZE: usize = 3;
/// Largest ring the simulator accepts
pub const MAX_RING_SIZE: usize = 8;

/// The election algorithm a simulation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Unidirectional ring, every candidacy makes a full tour (Le Lann, 1977)
    LeLann,
    /// Unidirectional ring, candidacies filtered by the best identity seen (Chang-Roberts, 1979)
    ChangRoberts,
    /// Bidirectional ring, tournament elimination of local non-minima (Franklin, 1982)
    Franklin,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::LeLann => write!(f, "le-lann"),
            Algorithm::ChangRoberts => write!(f, "chang-roberts"),
            Algorithm::Franklin => write!(f, "franklin"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "le-lann" | "lelann" => Ok(Algorithm::LeLann),
            "chang-roberts" => Ok(Algorithm::ChangRoberts),
            "franklin" => Ok(Algorithm::Franklin),
            other => Err(format!(
                "unknown algorithm '{other}' (expected le-lann, chang-roberts or franklin)"
            )),
        }
    }
}

/// Represents the three possible states a node can be in during an election
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
    /// Node is still eligible to become leader
    Candidate,
    /// Node has been eliminated from contention (it may still relay messages)
    Defeated,
    /// Node won the election (terminal, at most one per run)
    Elected,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Candidate => write!(f, "Candidate"),
            NodeState::Defeated => write!(f, "Defeated"),
            NodeState::Elected => write!(f, "Elected"),
        }
    }
}

/// A single process on the ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Ring position of this node (insertion order, never changes)
    pub id: NodeId,
    /// Caller-supplied identity, unique across the ring
    pub identity: Identity,
    /// Current election state
    pub state: NodeState,
    /// Smallest identity observed so far, initialized to the node's own.
    /// Filter threshold for Chang-Roberts, observed-minimum accumulator for
    /// Le Lann; Franklin never reads it.
    pub leader_belief: Identity,
}

impl Node {
    /// Creates a fresh candidate node at the given ring position
    pub fn new(id: NodeId, identity: Identity) -> Self {
        Self {
            id,
            identity,
            state: NodeState::Candidate,
            leader_belief: identity,
        }
    }

    /// Returns true while the node is still in contention
    pub fn is_candidate(&self) -> bool {
        matches!(self.state, NodeState::Candidate)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node{} [{}] id:{} belief:{}",
            self.id, self.state, self.identity, self.leader_belief
        )
    }
}

/// What a message in transit carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// An identity competing for leadership
    Candidacy,
    /// The post-election confirmation hop Chang-Roberts sends forward
    Announcement,
}

/// A message travelling along one ring link, produced by one step and consumed
/// (or retired) by the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Ring position of the sender
    pub from: NodeId,
    /// Ring position of the receiver (a direct ring neighbor of the sender)
    pub to: NodeId,
    /// The identity the message carries
    pub value: Identity,
    /// What the message means to the receiver
    pub kind: MessageKind,
    /// Set when the step rule discarded the message instead of forwarding it
    pub destroyed: bool,
}

impl Message {
    /// Creates a new candidacy message
    pub fn candidacy(from: NodeId, to: NodeId, value: Identity) -> Self {
        Self {
            from,
            to,
            value,
            kind: MessageKind::Candidacy,
            destroyed: false,
        }
    }

    /// Creates a new election announcement message
    pub fn announcement(from: NodeId, to: NodeId, value: Identity) -> Self {
        Self {
            from,
            to,
            value,
            kind: MessageKind::Announcement,
            destroyed: false,
        }
    }

    /// Returns a destroyed copy of this message, kept visible for one step
    pub fn into_destroyed(mut self) -> Self {
        self.destroyed = true;
        self
    }

    /// Returns the message kind as a string for logging
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            MessageKind::Candidacy => "Candidacy",
            MessageKind::Announcement => "Announcement",
        }
    }
}
