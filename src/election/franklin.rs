use tracing::trace;

use crate::election::core::{Identity, Message, NodeId, NodeState};
use crate::election::engine::Simulation;
use crate::election::events::LogEntry;

impl Simulation {
    /// Executes one Franklin step: candidates send their identity both ways,
    /// then each elimination round keeps only the candidates that hold the
    /// minimum identity among themselves and their nearest surviving
    /// candidate in each direction. The last candidate standing is elected.
    pub(crate) fn step_franklin(&mut self) {
        // A sole surviving candidate wins outright, no messages needed
        let survivors: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|n| n.is_candidate())
            .map(|n| n.id)
            .collect();
        if survivors.len() == 1 {
            let winner = survivors[0];
            let identity = self.nodes[winner].identity;
            self.mark_elected(winner);
            self.push_log(LogEntry::elect(
                self.step,
                format!(
                    "Node {winner} (id={identity}) is the only remaining candidate - it is elected!"
                ),
            ));
            return;
        }

        if self.step == 1 {
            // Bootstrap: every candidate announces itself in both directions
            for id in 0..self.ring_size() {
                if !self.nodes[id].is_candidate() {
                    continue;
                }
                let identity = self.nodes[id].identity;
                let left = self.counter_clockwise(id);
                let right = self.clockwise(id);
                self.send(Message::candidacy(id, left, identity));
                self.send(Message::candidacy(id, right, identity));
                self.push_log(LogEntry::send(
                    self.step,
                    format!("Node {id} (id={identity}) sends its identity in both directions"),
                ));
            }
            return;
        }

        // The incoming messages carry exactly the identities the snapshot
        // below provides, so the round is computed from the snapshot and the
        // transit set is simply consumed.
        let _ = self.take_transit();

        // Snapshot of who is still a candidate, taken before anyone changes
        // state: every elimination in this round is derived from it, so a
        // node eliminated here cannot influence another node's comparison.
        let snapshot: Vec<bool> = self.nodes.iter().map(|n| n.is_candidate()).collect();

        let mut eliminated: Vec<NodeId> = Vec::new();
        for id in 0..self.ring_size() {
            if !snapshot[id] {
                continue;
            }
            let identity = self.nodes[id].identity;

            // Nearest surviving candidate in each direction; defeated nodes
            // in between contribute nothing. Both scans terminate because at
            // least two candidates remain.
            let cw_rival = self.scan_candidate(&snapshot, id, true);
            let ccw_rival = self.scan_candidate(&snapshot, id, false);
            let mut rivals: Vec<Identity> = vec![self.nodes[cw_rival].identity];
            let ccw_identity = self.nodes[ccw_rival].identity;
            if !rivals.contains(&ccw_identity) {
                rivals.push(ccw_identity);
            }

            let local_min = rivals
                .iter()
                .copied()
                .chain(std::iter::once(identity))
                .min()
                .unwrap_or(identity);
            trace!(node = id, identity, ?rivals, local_min, "elimination round");

            if identity != local_min {
                eliminated.push(id);
                let rival_list = rivals
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.push_log(LogEntry::destroy(
                    self.step,
                    format!(
                        "Node {id} (id={identity}) is eliminated (competing candidates: {rival_list})"
                    ),
                ));
            } else {
                self.push_log(LogEntry::receive(
                    self.step,
                    format!("Node {id} (id={identity}) survives this round (local minimum)"),
                ));
            }
        }

        // Apply the eliminations atomically, then the survivors open the next round
        for id in eliminated {
            self.nodes[id].state = NodeState::Defeated;
        }
        for id in 0..self.ring_size() {
            if !self.nodes[id].is_candidate() {
                continue;
            }
            let identity = self.nodes[id].identity;
            let left = self.counter_clockwise(id);
            let right = self.clockwise(id);
            self.send(Message::candidacy(id, left, identity));
            self.send(Message::candidacy(id, right, identity));
        }
    }

    /// Walks the ring from `start` and returns the first other position the
    /// snapshot marks as candidate, clockwise or counter-clockwise
    fn scan_candidate(&self, snapshot: &[bool], start: NodeId, clockwise: bool) -> NodeId {
        let mut position = start;
        loop {
            position = if clockwise {
                self.clockwise(position)
            } else {
                self.counter_clockwise(position)
            };
            if position == start || snapshot[position] {
                return position;
            }
        }
    }
}
