use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::election::config::{SimulationConfig, ValidationError};
use crate::election::core::{Algorithm, Identity, Message, Node, NodeId, NodeState};
use crate::election::events::LogEntry;

/// Read-only node projection consumed by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    /// Ring position
    pub position: NodeId,
    /// Node identity
    pub identity: Identity,
    /// Current election state
    pub state: NodeState,
    /// Best identity observed so far; None for Franklin, which does not track one
    pub leader_belief: Option<Identity>,
}

/// Complete state of one simulation run. Advancing is synchronous and
/// atomic: each `advance` call finishes before control returns, and there is
/// no partial-step observable state.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Which step rule this run uses, fixed at initialization
    pub(crate) algorithm: Algorithm,
    /// Nodes in ring order (insertion order = ring position)
    pub(crate) nodes: Vec<Node>,
    /// Messages produced by the latest step, consumed by the next one
    pub(crate) messages: Vec<Message>,
    /// Append-only execution journal
    pub(crate) log: Vec<LogEntry>,
    /// Monotonic step counter, 0 until the first advance
    pub(crate) step: u64,
    /// Ring position of the elected node, set at most once per run
    pub(crate) elected: Option<NodeId>,
    /// Total messages emitted so far, destroyed ones included
    pub(crate) messages_sent: u64,
}

impl Simulation {
    /// Validates the configuration and creates a fresh simulation with every
    /// node in candidate state. Re-initialization is just constructing a new
    /// value; nothing carries over.
    pub fn new(config: &SimulationConfig) -> Result<Self, ValidationError> {
        let identities = config.validated_identities()?;
        let nodes = identities
            .iter()
            .enumerate()
            .map(|(id, &identity)| Node::new(id, identity))
            .collect();

        let mut simulation = Self {
            algorithm: config.algorithm,
            nodes,
            messages: Vec::new(),
            log: Vec::new(),
            step: 0,
            elected: None,
            messages_sent: 0,
        };
        simulation.push_log(LogEntry::info(
            0,
            "Simulation initialized. All nodes are candidates.",
        ));

        info!(
            algorithm = %simulation.algorithm,
            ring_size = simulation.nodes.len(),
            "simulation initialized"
        );
        Ok(simulation)
    }

    /// Advances the simulation by exactly one step. A no-op once a node has
    /// been elected, so redundant calls from a UI are harmless.
    pub fn advance(&mut self) {
        if self.elected.is_some() {
            debug!(step = self.step, "advance after election ignored");
            return;
        }

        self.step += 1;
        match self.algorithm {
            Algorithm::LeLann => self.step_lelann(),
            Algorithm::ChangRoberts => self.step_chang_roberts(),
            Algorithm::Franklin => self.step_franklin(),
        }
    }

    /// Number of nodes on the ring
    pub fn ring_size(&self) -> usize {
        self.nodes.len()
    }

    /// The algorithm this run uses
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current step counter (0 before the first advance)
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Ring position of the elected node, if the election has completed
    pub fn elected(&self) -> Option<NodeId> {
        self.elected
    }

    /// True once a node has been elected; further advances are no-ops
    pub fn is_finished(&self) -> bool {
        self.elected.is_some()
    }

    /// Total messages emitted so far, destroyed ones included
    pub fn messages_sent(&self) -> u64 {
        self.messages_sent
    }

    /// The execution journal, oldest entry first
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Messages currently in transit. Destroyed messages remain visible for
    /// the step in which they were discarded, then disappear.
    pub fn messages_in_transit(&self) -> &[Message] {
        &self.messages
    }

    /// Node projections for the renderer, in ring order
    pub fn nodes(&self) -> Vec<NodeView> {
        self.nodes
            .iter()
            .map(|node| NodeView {
                position: node.id,
                identity: node.identity,
                state: node.state,
                leader_belief: match self.algorithm {
                    Algorithm::Franklin => None,
                    Algorithm::LeLann | Algorithm::ChangRoberts => Some(node.leader_belief),
                },
            })
            .collect()
    }

    /// Ring position of the clockwise neighbor of `id`
    pub(crate) fn clockwise(&self, id: NodeId) -> NodeId {
        (id + 1) % self.nodes.len()
    }

    /// Ring position of the counter-clockwise neighbor of `id`
    pub(crate) fn counter_clockwise(&self, id: NodeId) -> NodeId {
        (id + self.nodes.len() - 1) % self.nodes.len()
    }

    /// Puts a message on the ring and counts it
    pub(crate) fn send(&mut self, message: Message) {
        self.messages_sent += 1;
        self.messages.push(message);
    }

    /// Takes the messages the previous step produced, dropping the ones it
    /// marked destroyed. The following step resolves each of these exactly once.
    pub(crate) fn take_transit(&mut self) -> Vec<Message> {
        let transit = std::mem::take(&mut self.messages);
        transit.into_iter().filter(|m| !m.destroyed).collect()
    }

    /// Appends an entry to the journal
    pub(crate) fn push_log(&mut self, entry: LogEntry) {
        debug!(step = entry.step, category = %entry.category, "{}", entry.description);
        self.log.push(entry);
    }

    /// Marks `id` elected; the state never changes again within this run
    pub(crate) fn mark_elected(&mut self, id: NodeId) {
        self.nodes[id].state = NodeState::Elected;
        self.elected = Some(id);
        info!(
            node = id,
            identity = self.nodes[id].identity,
            step = self.step,
            "👑 node elected"
        );
    }

    /// Count of nodes still in candidate state
    pub(crate) fn candidate_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_candidate()).count()
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {} [{}] candidates:{} in-transit:{} elected:{}",
            self.step,
            self.algorithm,
            self.candidate_count(),
            self.messages.iter().filter(|m| !m.destroyed).count(),
            match self.elected {
                Some(id) => format!("node {id}"),
                None => "-".to_string(),
            }
        )
    }
}
