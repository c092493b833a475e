use tracing::trace;

use crate::election::core::{Message, NodeId, NodeState};
use crate::election::engine::Simulation;
use crate::election::events::LogEntry;

impl Simulation {
    /// Executes one Le Lann step: every candidacy makes a complete clockwise
    /// tour with no filtering, each node tracking the smallest identity it
    /// relays. When a node's own identity comes back it has seen every
    /// identity on the ring, and the node holding the minimum is elected.
    pub(crate) fn step_lelann(&mut self) {
        if self.step == 1 {
            // Bootstrap: every node starts a tour with its own identity
            for id in 0..self.ring_size() {
                let next = self.clockwise(id);
                let identity = self.nodes[id].identity;
                self.send(Message::candidacy(id, next, identity));
                self.push_log(LogEntry::send(
                    self.step,
                    format!("Node {id} (id={identity}) starts a tour with its identity"),
                ));
            }
            return;
        }

        let incoming = self.take_transit();
        let mut completed: Vec<NodeId> = Vec::new();
        for message in incoming {
            let receiver = message.to;
            let value = message.value;
            let own = self.nodes[receiver].identity;

            if value == own {
                // The node's own candidacy finished its tour; all tours move
                // in lockstep, so every node completes in the same step
                completed.push(receiver);
                self.push_log(LogEntry::receive(
                    self.step,
                    format!("Node {receiver} sees its own identity {value} return - tour complete"),
                ));
            } else {
                if value < self.nodes[receiver].leader_belief {
                    self.nodes[receiver].leader_belief = value;
                }
                let next = self.clockwise(receiver);
                trace!(receiver, value, next, "relaying candidacy");
                self.send(Message::candidacy(receiver, next, value));
                self.push_log(LogEntry::receive(
                    self.step,
                    format!("Node {receiver} relays identity {value} to node {next}"),
                ));
            }
        }

        // Completed nodes have observed every identity and can decide
        for id in completed {
            let identity = self.nodes[id].identity;
            let belief = self.nodes[id].leader_belief;
            if identity == belief {
                self.mark_elected(id);
                self.push_log(LogEntry::elect(
                    self.step,
                    format!(
                        "Node {id} observed every identity; its own {identity} is the minimum - it is elected!"
                    ),
                ));
            } else {
                self.nodes[id].state = NodeState::Defeated;
                self.push_log(LogEntry::info(
                    self.step,
                    format!("Node {id} (id={identity}) observed minimum {belief} - it is defeated"),
                ));
            }
        }
    }
}
