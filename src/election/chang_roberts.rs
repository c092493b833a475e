use tracing::trace;

use crate::election::core::{Message, NodeState};
use crate::election::engine::Simulation;
use crate::election::events::LogEntry;

impl Simulation {
    /// Executes one Chang-Roberts step: candidacies travel clockwise, a node
    /// forwards only values better than its current leader belief, and a
    /// candidacy that makes it back to its originator elects it.
    pub(crate) fn step_chang_roberts(&mut self) {
        if self.step == 1 {
            // Bootstrap: every node announces its own identity clockwise
            for id in 0..self.ring_size() {
                let next = self.clockwise(id);
                let identity = self.nodes[id].identity;
                self.send(Message::candidacy(id, next, identity));
                self.push_log(LogEntry::send(
                    self.step,
                    format!("Node {id} (id={identity}) sends its candidacy to node {next}"),
                ));
            }
            return;
        }

        // Resolve every in-transit message exactly once. Order is irrelevant:
        // each node has a single predecessor, so it receives at most one
        // message per step.
        let incoming = self.take_transit();
        for message in incoming {
            let receiver = message.to;
            let value = message.value;
            let own = self.nodes[receiver].identity;
            let belief = self.nodes[receiver].leader_belief;
            trace!(receiver, value, belief, "resolving candidacy");

            if value == own {
                // Identities are distinct, so equality means the node's own
                // candidacy made a full tour: it wins. One announcement is
                // forwarded for confirmation but nothing waits for it.
                self.mark_elected(receiver);
                self.push_log(LogEntry::elect(
                    self.step,
                    format!(
                        "Node {receiver} receives its own identity {value} back - it is elected!"
                    ),
                ));
                let next = self.clockwise(receiver);
                self.send(Message::announcement(receiver, next, value));
            } else if value < belief {
                // A better identity: adopt it, drop out of contention, relay
                self.nodes[receiver].leader_belief = value;
                let was_candidate = self.nodes[receiver].is_candidate();
                if was_candidate {
                    self.nodes[receiver].state = NodeState::Defeated;
                }
                let next = self.clockwise(receiver);
                self.send(Message::candidacy(receiver, next, value));
                let description = if was_candidate {
                    format!(
                        "Node {receiver} receives {value} < leader {belief}. Forwards it and is defeated."
                    )
                } else {
                    format!(
                        "Node {receiver} receives {value} < leader {belief}. Updates its leader and forwards."
                    )
                };
                self.push_log(LogEntry::receive(self.step, description));
            } else {
                // The receiver already knows a better leader: the candidacy dies here
                self.push_log(LogEntry::destroy(
                    self.step,
                    format!("Node {receiver} receives {value} >= leader {belief}. Message destroyed."),
                ));
                self.messages.push(message.into_destroyed());
            }
        }
    }
}
